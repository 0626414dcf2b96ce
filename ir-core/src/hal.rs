//! Hardware Abstraction Layer for the IR receiver

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock instant type for compilation without embassy-time
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Instant(u64);

    impl Instant {
        pub fn now() -> Self {
            Self(0) // Placeholder implementation
        }

        pub const fn from_ticks(ticks: u64) -> Self {
            Self(ticks)
        }

        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_ticks(&self) -> u64 {
            self.0
        }

        pub fn duration_since(&self, other: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(other.0))
        }
    }

    /// Mock duration type
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }

    impl core::ops::Mul<u32> for Duration {
        type Output = Duration;

        fn mul(self, rhs: u32) -> Duration {
            Duration(self.0 * rhs as u64)
        }
    }
}

use embedded_hal::digital::OutputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Timer operation failed
    TimerError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::TimerError => write!(f, "Timer operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for the "sequence unlocked" action output
///
/// The receiver invokes this once each time the unlock sequence
/// completes. What the indication looks like (LED pattern, relay pulse)
/// is up to the implementation.
pub trait UnlockIndicator {
    type Error: From<HalError>;

    /// Signal that the unlock sequence completed
    fn signal_unlocked(&mut self) -> Result<(), Self::Error>;
}

/// Generic indicator implementation for embedded-hal compatible pins
///
/// Drives the pin high on unlock. Latching it back low is left to the
/// external blink logic that owns the visual pattern.
pub struct EmbeddedHalIndicator<P> {
    pin: P,
    inverted: bool,
}

impl<P> EmbeddedHalIndicator<P>
where
    P: OutputPin,
{
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }
}

impl<P> UnlockIndicator for EmbeddedHalIndicator<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn signal_unlocked(&mut self) -> Result<(), Self::Error> {
        if self.inverted {
            self.pin.set_low().map_err(|_| HalError::GpioError)
        } else {
            self.pin.set_high().map_err(|_| HalError::GpioError)
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;

    /// Mock indicator that counts unlock signals
    #[derive(Debug, Default)]
    pub struct MockIndicator {
        unlocks: u32,
    }

    impl MockIndicator {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of times the unlock signal fired
        pub fn unlock_count(&self) -> u32 {
            self.unlocks
        }
    }

    impl UnlockIndicator for MockIndicator {
        type Error = HalError;

        fn signal_unlocked(&mut self) -> Result<(), Self::Error> {
            self.unlocks += 1;
            Ok(())
        }
    }
}
