//! Unlock sequence matching state machine
//!
//! Matches decoded buttons against a fixed ordered sequence. The
//! machine is tolerant of noise (`Invalid` presses pass through without
//! touching the match) and of key repeat (a re-report of the element
//! just matched holds position instead of resetting).

use crate::types::Button;

/// The fixed button sequence that triggers the unlock action
pub const UNLOCK_SEQUENCE: [Button; 4] = [
    Button::Digit(1),
    Button::Digit(5),
    Button::Digit(9),
    Button::Enter,
];

/// Matched-prefix state over [`UNLOCK_SEQUENCE`]
///
/// Created once at task start and lives for the process lifetime; the
/// machine is cyclic and restarts immediately after firing.
pub struct UnlockSequence {
    matched: usize,
}

impl UnlockSequence {
    pub const fn new() -> Self {
        Self { matched: 0 }
    }

    /// Length of the sequence prefix matched so far
    pub fn matched_len(&self) -> usize {
        self.matched
    }

    /// Feed one decoded button; returns true when the full sequence
    /// just completed
    ///
    /// The repeat flag must be stripped before calling (pass
    /// `press.button`, not the press): a held key re-reports its
    /// identity and is handled by the held-key rule below.
    pub fn advance(&mut self, button: Button) -> bool {
        if button == UNLOCK_SEQUENCE[self.matched] {
            self.matched += 1;
            if self.matched == UNLOCK_SEQUENCE.len() {
                self.matched = 0;
                return true;
            }
        } else if button == Button::Invalid {
            // Garbled frames are transparent noise
        } else if self.matched > 0 && button == UNLOCK_SEQUENCE[self.matched - 1] {
            // Held or auto-repeated key reported again: hold position
        } else {
            self.matched = 0;
        }
        false
    }

    /// Reset match progress
    pub fn reset(&mut self) {
        self.matched = 0;
    }
}

impl Default for UnlockSequence {
    fn default() -> Self {
        Self::new()
    }
}
