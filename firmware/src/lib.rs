#![no_std]

//! Firmware library exposing mock hardware and tasks for bring-up

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;
pub use static_cell::StaticCell;

pub use ir_core::*;

// Re-export hardware implementations
pub use crate::mock_hardware::*;
pub use crate::tasks::*;

// Mock hardware module
pub mod mock_hardware {
    use embassy_time::{Duration, Timer};
    use ir_core::hal::{HalError, UnlockIndicator};

    /// Mock IR receiver that replays a scripted edge pattern
    ///
    /// Each entry is the delay in microseconds before the next falling
    /// edge. Once the script runs out the receiver goes quiet for good.
    #[derive(Debug)]
    pub struct MockIrReceiver {
        delays_us: &'static [u64],
        pos: usize,
    }

    impl MockIrReceiver {
        pub const fn new(delays_us: &'static [u64]) -> Self {
            Self { delays_us, pos: 0 }
        }

        /// Wait for the next scripted falling edge
        pub async fn wait_for_falling_edge(&mut self) {
            match self.delays_us.get(self.pos) {
                Some(&delay) => {
                    self.pos += 1;
                    Timer::after(Duration::from_micros(delay)).await;
                }
                None => core::future::pending::<()>().await,
            }
        }
    }

    /// Mock unlock indicator implementation
    #[derive(Debug, Default)]
    pub struct MockIndicator {
        unlocks: u32,
    }

    impl MockIndicator {
        pub fn new() -> Self {
            #[cfg(feature = "defmt")]
            defmt::info!("🧪 Using mock indicator (for bring-up)");
            Self { unlocks: 0 }
        }

        /// Number of unlock signals fired so far
        pub fn unlock_count(&self) -> u32 {
            self.unlocks
        }
    }

    impl UnlockIndicator for MockIndicator {
        type Error = HalError;

        fn signal_unlocked(&mut self) -> Result<(), Self::Error> {
            self.unlocks += 1;
            #[cfg(feature = "defmt")]
            defmt::info!("🔓 UNLOCKED ({} total)", self.unlocks);
            Ok(())
        }
    }

    /// Edge delay script playing the full unlock sequence: four frames
    /// (digits 1, 5, 9 then enter), 17 edges each, separated by gaps
    /// well past the quiet period. One script entry per falling edge;
    /// frame-internal delays are the protocol intervals with a 300 µs
    /// bit time, keeping each whole frame inside the 50 ms window that
    /// starts at its first edge.
    #[rustfmt::skip]
    pub const DEMO_UNLOCK_EDGE_DELAYS_US: [u64; 68] = [
        // digit 1
        200_000, 2100, 2400, 900, 5400, 2700, 2700, 1200, 3900,
        3900, 2100, 2100, 2100, 2100, 2400, 2100, 4800,
        // digit 5
        200_000, 2100, 2400, 900, 5400, 2700, 2700, 1200, 3900,
        3900, 2100, 2100, 2100, 2100, 3600, 2100, 3600,
        // digit 9
        200_000, 2100, 2400, 900, 5400, 2700, 2700, 1200, 3900,
        3900, 2100, 2100, 2100, 2100, 4800, 2100, 2400,
        // enter
        200_000, 2100, 2400, 900, 5400, 2700, 2700, 1200, 3900,
        3900, 2100, 2100, 2100, 2400, 3600, 2100, 3300,
    ];
}

// Embassy tasks module
pub mod tasks {
    use super::*;
    use embassy_time::{with_timeout, Instant};
    use ir_core::capture::{FrameQueue, IrCapture};

    /// Edge capture task: realizes the falling-edge interrupt plus the
    /// one-shot quiet-period deadline
    ///
    /// Only the first edge of a frame arms the deadline; it is never
    /// re-armed mid-frame, so the frame closes a fixed quiet period
    /// after it began regardless of how many edges follow.
    #[embassy_executor::task]
    pub async fn capture_task(
        mut receiver: MockIrReceiver,
        capture: &'static IrCapture,
        frames: &'static FrameQueue,
        config: ReceiverConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("📡 Capture task started");

        loop {
            receiver.wait_for_falling_edge().await;
            let armed_at = Instant::now();
            capture.on_edge(armed_at);
            let deadline = armed_at + config.quiet_period;

            // Frame open: collect edges until the one-shot expires
            loop {
                let now = Instant::now();
                if now >= deadline {
                    close_frame(capture, frames);
                    break;
                }
                match with_timeout(deadline - now, receiver.wait_for_falling_edge()).await {
                    Ok(()) => {
                        capture.on_edge(Instant::now());
                    }
                    Err(_) => {
                        close_frame(capture, frames);
                        break;
                    }
                }
            }
        }
    }

    fn close_frame(capture: &IrCapture, frames: &FrameQueue) {
        if let Some(slot) = capture.on_deadline() {
            if frames.try_send(slot).is_err() {
                // Queue full: newest frame dropped, no retry
                #[cfg(feature = "defmt")]
                defmt::warn!("frame queue full, dropping frame");
            }
        }
    }

    /// Decoder task wrapper around the core consumer loop
    #[embassy_executor::task]
    pub async fn decode_task_wrapper(
        capture: &'static IrCapture,
        frames: &'static FrameQueue,
        indicator: &'static mut MockIndicator,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("🧠 Decoder task started");
        ir_core::decoder::decode_task(capture, frames, indicator).await
    }
}
