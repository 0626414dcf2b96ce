//! Frame decoder: interval quantization and button mapping
//!
//! A closed packet holds 17 absolute edge timestamps. The decoder turns
//! them into 16 inter-edge intervals, infers the protocol bit time from
//! the header, quantizes every interval into a small signed level, and
//! maps the 8 payload levels to a button identity plus repeat flag.
//! Every failure collapses to [`ButtonPress::invalid`]; nothing here is
//! fatal.

use crate::capture::{FrameQueue, IrCapture, Packet};
use crate::hal::UnlockIndicator;
use crate::sequence::UnlockSequence;
use crate::types::{Button, ButtonPress, DecodeError};

/// Edges in a well-formed frame: 16 intervals framed by 17 edges
pub const FRAME_EDGES: usize = 17;

/// Intervals carried by a well-formed frame
pub const FRAME_INTERVALS: usize = FRAME_EDGES - 1;

/// Payload levels encoding the button (the trailing 8 of 16)
pub const PAYLOAD_LEVELS: usize = 8;

/// Fixed-point scale-up applied to intervals before quantization
const INTERVAL_SHIFT: u32 = 3;

/// Quantized timing levels of one frame
pub type Levels = [i32; FRAME_INTERVALS];

/// Decode a closed packet into a button press
pub fn decode(packet: &Packet) -> Result<ButtonPress, DecodeError> {
    let levels = quantize(packet)?;
    map_button(&levels)
}

/// Decode, collapsing every failure to the invalid press
///
/// This is the pipeline-boundary policy: a garbled frame is noise, not
/// a fault, and flows through the unlock machine as `Invalid`.
pub fn decode_or_invalid(packet: &Packet) -> ButtonPress {
    decode(packet).unwrap_or(ButtonPress::invalid())
}

/// Convert raw edge timestamps into quantized timing levels
///
/// Interval indices follow the wire layout: [2] and [3] are the
/// header's min and max spans whose difference covers 15 bit times,
/// [4]..[7] carry the half/below-full spans the consistency checks
/// validate before the inferred bit time is trusted.
pub fn quantize(packet: &Packet) -> Result<Levels, DecodeError> {
    if packet.samples != FRAME_EDGES {
        return Err(DecodeError::MalformedFrame);
    }

    let mut intervals = [0i32; FRAME_INTERVALS];
    for (i, pair) in packet.edge_ticks[..FRAME_EDGES].windows(2).enumerate() {
        intervals[i] = (pair[1].wrapping_sub(pair[0]) as i32) << INTERVAL_SHIFT;
    }

    // Bit time inferred from the header's min/max span
    let spacing = (intervals[3] - intervals[2]) / 15;
    if spacing <= 0 {
        return Err(DecodeError::MalformedFrame);
    }

    // Header must be internally coherent before trusting the spacing
    if (intervals[3] - intervals[4] - intervals[5]).abs() > spacing
        || (intervals[7] - intervals[6] - intervals[5]).abs() > spacing
    {
        return Err(DecodeError::MalformedFrame);
    }

    // Intervals at or past this are an idle tail, not a data bit, and
    // are exempt from the remainder tolerance
    let tail_floor = 2 * intervals[3];

    let mut levels = [0i32; FRAME_INTERVALS];
    for (level, &interval) in levels.iter_mut().zip(intervals.iter()) {
        let mut remainder = interval % spacing;
        if remainder > spacing / 2 {
            remainder -= spacing;
        }

        if remainder.abs() > spacing * 4 / 10 && interval < tail_floor {
            return Err(DecodeError::MalformedFrame);
        }

        *level = interval / spacing + i32::from(remainder < 0) - 7;
    }

    Ok(levels)
}

/// Map quantized levels to a button identity and repeat flag
pub fn map_button(levels: &Levels) -> Result<ButtonPress, DecodeError> {
    let payload = &levels[FRAME_INTERVALS - PAYLOAD_LEVELS..];

    let sum: i32 = payload.iter().sum();
    if sum.rem_euclid(16) != 0 {
        return Err(DecodeError::ChecksumFailure);
    }

    let button = if payload[4] == 0 {
        // Direct encoding: the enum order matches the payload codes
        Button::from_code(payload[5]).ok_or(DecodeError::UnmappedCode)?
    } else {
        match payload[5] {
            1 => Button::Last,
            2 => Button::Language,
            5 => Button::Enter,
            6 => Button::Info,
            _ => return Err(DecodeError::UnmappedCode),
        }
    };

    Ok(ButtonPress {
        button,
        repeat: payload[2] == 8,
    })
}

/// Consumer loop: fetch closed frames, decode, feed the unlock machine
///
/// Suspends only on the queue fetch. Runs for the process lifetime;
/// indicator faults are swallowed like every other error on this path.
pub async fn decode_task<I: UnlockIndicator>(
    capture: &IrCapture,
    frames: &FrameQueue,
    indicator: &mut I,
) -> ! {
    let mut unlock = UnlockSequence::new();

    loop {
        let slot = frames.receive().await;
        let packet = capture.take(slot);
        let press = decode_or_invalid(&packet);

        #[cfg(feature = "defmt")]
        defmt::trace!("decoded {:?} repeat={}", press.button, press.repeat);

        if unlock.advance(press.button) {
            #[cfg(feature = "defmt")]
            defmt::info!("unlock sequence complete");
            indicator.signal_unlocked().ok();
        }
    }
}
