//! Full-pipeline integration tests over the shared harness

use crate::harness::Harness;
use ir_core::capture::Packet;
use ir_core::test_utils::frames::{digit_frame, enter_frame, well_formed};
use ir_core::types::Button;

fn unlock_frames() -> [Packet; 4] {
    [digit_frame(1), digit_frame(5), digit_frame(9), enter_frame()]
}

#[test]
fn unlock_fires_exactly_once() {
    let mut harness = Harness::new();
    for frame in unlock_frames() {
        harness.inject(&frame);
    }
    harness.drain();

    assert_eq!(harness.unlocks(), 1);
    assert_eq!(harness.matched_len(), 0);
}

#[test]
fn unlock_works_across_partial_drains() {
    // The consumer keeps its state between queue fetches; draining
    // mid-sequence must not disturb the match
    let mut harness = Harness::new();
    harness.inject(&digit_frame(1));
    harness.inject(&digit_frame(5));
    harness.drain();
    assert_eq!(harness.matched_len(), 2);

    harness.inject(&digit_frame(9));
    harness.inject(&enter_frame());
    harness.drain();
    assert_eq!(harness.unlocks(), 1);
}

#[test]
fn noise_between_keys_is_transparent() {
    let mut harness = Harness::new();
    harness.inject(&digit_frame(1));
    harness.inject(&digit_frame(5));
    // Truncated burst: decodes as Invalid
    let mut glitch = Packet::EMPTY;
    glitch.samples = 5;
    for (i, t) in glitch.edge_ticks[..5].iter_mut().enumerate() {
        *t = i as u64 * 500;
    }
    harness.inject(&glitch);
    harness.inject(&digit_frame(9));
    harness.inject(&enter_frame());

    harness.drain();
    assert_eq!(harness.unlocks(), 1);
}

#[test]
fn foreign_key_resets_the_sequence() {
    let mut harness = Harness::new();
    harness.inject(&digit_frame(1));
    harness.inject(&digit_frame(5));
    harness.inject(&digit_frame(2));
    harness.inject(&digit_frame(9));
    harness.inject(&enter_frame());

    harness.drain();
    assert_eq!(harness.unlocks(), 0);
}

#[test]
fn held_keys_do_not_reset_the_sequence() {
    let mut harness = Harness::new();
    harness.inject(&digit_frame(1));
    harness.inject(&digit_frame(5));
    // Repeat report of the 5 key (payload[2] = 8, checksum rebalanced)
    harness.inject(&well_formed([6, 0, 8, 0, 0, 5, 0, -3]));
    harness.inject(&digit_frame(9));
    harness.inject(&enter_frame());

    harness.drain();
    assert_eq!(harness.unlocks(), 1);
}

#[test]
fn overflow_retains_queue_capacity_in_order() {
    let mut harness = Harness::new();
    for digit in 0..=9u8 {
        harness.inject(&digit_frame(digit));
    }

    // Eight slot references survive; the two overflow frames recycled
    // the two oldest slots, so those decode with the newer contents
    let presses = harness.drain();
    assert_eq!(presses.len(), 8);
    assert_eq!(presses[0].button, Button::Digit(8));
    assert_eq!(presses[1].button, Button::Digit(9));
    for (i, press) in presses[2..].iter().enumerate() {
        assert_eq!(press.button, Button::Digit(i as u8 + 2));
    }
}

#[test]
fn two_full_sequences_unlock_twice() {
    let mut harness = Harness::new();
    for _ in 0..2 {
        for frame in unlock_frames() {
            harness.inject(&frame);
        }
    }
    harness.drain();
    assert_eq!(harness.unlocks(), 2);
}
