//! Core data types for the IR receiver

use crate::hal::Duration;

/// Decoded remote-control button identity
///
/// The numeric payload codes 0-15 map onto `Digit(0)`..`Power` in order;
/// the remaining named buttons arrive through the special-code escape
/// (`Last`, `Language`, `Enter`, `Info`). `Invalid` stands for anything
/// the decoder could not make sense of and never matches a real key.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Numeric key 0-9
    Digit(u8),
    VolumeUp,
    VolumeDown,
    Mute,
    ChannelUp,
    ChannelDown,
    Power,
    Last,
    Language,
    Enter,
    Info,
    /// Garbled or unrecognized transmission
    Invalid,
}

impl Button {
    /// Map a direct payload code to a button identity
    ///
    /// The protocol's direct encoding covers codes 0-15; everything else
    /// has no assigned key.
    pub const fn from_code(code: i32) -> Option<Button> {
        match code {
            0..=9 => Some(Button::Digit(code as u8)),
            10 => Some(Button::VolumeUp),
            11 => Some(Button::VolumeDown),
            12 => Some(Button::Mute),
            13 => Some(Button::ChannelUp),
            14 => Some(Button::ChannelDown),
            15 => Some(Button::Power),
            _ => None,
        }
    }

    /// Returns true if this is a decodable key rather than noise
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Button::Invalid)
    }
}

/// One decoded key event: identity plus an independent repeat flag
///
/// The repeat flag marks a held key being re-reported by the remote; it
/// is carried separately rather than packed into the identity.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPress {
    pub button: Button,
    pub repeat: bool,
}

impl ButtonPress {
    /// The event every decode failure collapses to
    pub const fn invalid() -> Self {
        Self {
            button: Button::Invalid,
            repeat: false,
        }
    }
}

/// Reasons a captured frame failed to decode
///
/// None of these propagate: the pipeline collapses every variant to
/// [`ButtonPress::invalid`] and moves on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Wrong edge count, inconsistent header timing, or an interval
    /// outside quantization tolerance
    MalformedFrame,
    /// Payload level sum not a multiple of 16
    ChecksumFailure,
    /// Special-code escape selected a code with no assigned key
    UnmappedCode,
}

#[cfg(feature = "std")]
impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::MalformedFrame => write!(f, "malformed frame timing"),
            DecodeError::ChecksumFailure => write!(f, "payload checksum failed"),
            DecodeError::UnmappedCode => write!(f, "unmapped special code"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Receiver configuration parameters
#[derive(Copy, Clone, Debug)]
pub struct ReceiverConfig {
    /// Quiet period that closes a frame (end-of-frame heuristic, not a
    /// correctness timeout)
    pub quiet_period: Duration,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(50),
        }
    }
}

impl ReceiverConfig {
    /// Create a new configuration with validation
    pub fn new(quiet_period_ms: u64) -> Result<Self, &'static str> {
        if quiet_period_ms == 0 || quiet_period_ms > 500 {
            return Err("Quiet period must be between 1 and 500ms");
        }

        Ok(Self {
            quiet_period: Duration::from_millis(quiet_period_ms),
        })
    }
}
