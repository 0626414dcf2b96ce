//! Interrupt-fed edge capture: packet pool, framing, and the frame queue
//!
//! The producer side (edge interrupt plus the quiet-period deadline)
//! mutates one shared state block, always inside a `critical_section`
//! scope so the two interrupt-context entry points never interleave.
//! Closed frames travel to the consumer as slot ids through a bounded
//! channel; the consumer copies the packet out, so the two sides never
//! alias a mutable slot.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::hal::Instant;

/// Number of reusable packet slots in the pool
pub const SLOT_COUNT: usize = 8;

/// Maximum edges recorded per frame
pub const MAX_EDGES: usize = 32;

/// One captured IR frame: raw edge timestamps in clock ticks
#[derive(Copy, Clone, Debug)]
pub struct Packet {
    pub samples: usize,
    pub edge_ticks: [u64; MAX_EDGES],
}

impl Packet {
    pub const EMPTY: Packet = Packet {
        samples: 0,
        edge_ticks: [0; MAX_EDGES],
    };
}

/// Opaque reference to a closed pool slot
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotId(u8);

impl SlotId {
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Bounded FIFO of closed frames, producer = interrupt context
///
/// `try_send` never blocks; a full queue drops the frame (the slot gets
/// silently recycled by a later frame). `receive().await` is the sole
/// consumer suspension point.
pub type FrameQueue = Channel<CriticalSectionRawMutex, SlotId, SLOT_COUNT>;

/// Outcome of feeding one edge to the capture state
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// First edge of a new frame: the caller must arm the one-shot
    /// quiet-period timer now
    FrameStarted,
    /// Edge recorded into the already-open frame
    FrameContinued,
}

struct CaptureState {
    slots: [Packet; SLOT_COUNT],
    write_idx: usize,
    deadline_armed: bool,
}

/// Shared capture state: pool ring, write index, armed-deadline flag
///
/// All three live in a single critical-section-guarded block. Invariant:
/// at most the slot at `write_idx` is open for writing, and only while
/// `deadline_armed` is set.
pub struct IrCapture {
    state: Mutex<RefCell<CaptureState>>,
}

impl IrCapture {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(CaptureState {
                slots: [Packet::EMPTY; SLOT_COUNT],
                write_idx: 0,
                deadline_armed: false,
            })),
        }
    }

    /// Record one falling edge
    ///
    /// Called once per qualifying edge, from interrupt context. If no
    /// deadline is armed this edge opens a new frame in the next pool
    /// slot. The timestamp is appended unless the slot already holds
    /// [`MAX_EDGES`] samples; overflow is a silent no-op and the
    /// oversized frame gets rejected by the decoder later.
    pub fn on_edge(&self, now: Instant) -> EdgeOutcome {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);

            let outcome = if state.deadline_armed {
                EdgeOutcome::FrameContinued
            } else {
                state.write_idx = (state.write_idx + 1) % SLOT_COUNT;
                let idx = state.write_idx;
                state.slots[idx].samples = 0;
                state.deadline_armed = true;
                EdgeOutcome::FrameStarted
            };

            let idx = state.write_idx;
            let n = state.slots[idx].samples;
            if n < MAX_EDGES {
                state.slots[idx].edge_ticks[n] = now.as_ticks();
                state.slots[idx].samples = n + 1;
            }

            outcome
        })
    }

    /// Close the open frame when the quiet-period deadline fires
    ///
    /// Returns the id of the just-closed slot for posting onto the
    /// [`FrameQueue`], or `None` on a spurious expiry with no frame
    /// open. Runs in interrupt context; never blocks.
    pub fn on_deadline(&self) -> Option<SlotId> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if !state.deadline_armed {
                return None;
            }
            state.deadline_armed = false;
            Some(SlotId(state.write_idx as u8))
        })
    }

    /// Whether a frame is currently open (deadline timer pending)
    pub fn is_armed(&self) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).deadline_armed)
    }

    /// Copy a closed frame out of the pool
    ///
    /// Only call with a slot id dequeued from the [`FrameQueue`]; the
    /// copy decouples the consumer from the cyclically recycled slot.
    pub fn take(&self, slot: SlotId) -> Packet {
        critical_section::with(|cs| self.state.borrow_ref(cs).slots[slot.index()])
    }
}

impl Default for IrCapture {
    fn default() -> Self {
        Self::new()
    }
}
