//! Host-based integration tests for the IR unlock receiver

#[cfg(test)]
mod pipeline;

pub mod harness {
    //! Shared pipeline harness: drives the capture path with synthetic
    //! packets and drains the queue the way the consumer task does

    use ir_core::capture::{FrameQueue, IrCapture, Packet};
    use ir_core::decoder::decode_or_invalid;
    use ir_core::hal::mock::MockIndicator;
    use ir_core::hal::{Instant, UnlockIndicator};
    use ir_core::sequence::UnlockSequence;
    use ir_core::types::ButtonPress;

    /// Gap between injected frames, comfortably past any frame span
    const FRAME_GAP_TICKS: u64 = 100_000;

    pub struct Harness {
        pub capture: IrCapture,
        pub queue: FrameQueue,
        unlock: UnlockSequence,
        indicator: MockIndicator,
        clock: u64,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                capture: IrCapture::new(),
                queue: FrameQueue::new(),
                unlock: UnlockSequence::new(),
                indicator: MockIndicator::new(),
                clock: 0,
            }
        }

        /// Replay a packet's edges through the capture path and close
        /// the frame; a full queue drops it, as on the device
        pub fn inject(&mut self, packet: &Packet) {
            for &t in &packet.edge_ticks[..packet.samples] {
                self.capture.on_edge(Instant::from_ticks(self.clock + t));
            }
            if let Some(slot) = self.capture.on_deadline() {
                let _ = self.queue.try_send(slot);
            }
            self.clock += FRAME_GAP_TICKS;
        }

        /// Drain queued frames through decode and the unlock machine,
        /// returning the decoded presses in order
        pub fn drain(&mut self) -> Vec<ButtonPress> {
            let mut presses = Vec::new();
            while let Ok(slot) = self.queue.try_receive() {
                let packet = self.capture.take(slot);
                let press = decode_or_invalid(&packet);
                if self.unlock.advance(press.button) {
                    self.indicator.signal_unlocked().unwrap();
                }
                presses.push(press);
            }
            presses
        }

        /// Unlock signals fired so far
        pub fn unlocks(&self) -> u32 {
            self.indicator.unlock_count()
        }

        /// Matched prefix length of the unlock machine
        pub fn matched_len(&self) -> usize {
            self.unlock.matched_len()
        }
    }

    impl Default for Harness {
        fn default() -> Self {
            Self::new()
        }
    }
}
