#![cfg_attr(not(feature = "std"), no_std)]

//! # IR Core
//!
//! IR remote receiver core logic library for embedded systems.
//! Decodes edge-timestamped IR frames into button presses and matches
//! a fixed unlock sequence against the decoded stream.

pub mod types;
pub mod capture;
pub mod decoder;
pub mod sequence;
pub mod hal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use types::*;
pub use capture::*;
pub use decoder::*;
pub use sequence::*;
pub use hal::{Duration, Instant};

/// Receiver library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for consumer IR receiver modules
pub fn default_config() -> ReceiverConfig {
    ReceiverConfig {
        quiet_period: Duration::from_millis(50),
    }
}
