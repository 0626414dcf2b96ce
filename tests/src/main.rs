// Host-side integration smoke test for the IR unlock receiver

use ir_core::test_utils::frames::{digit_frame, enter_frame};
use ir_core::types::Button;
use ir_tests::harness::Harness;

fn main() {
    println!("🧪 IR Receiver Integration Smoke Test");

    // Test 1: Digits decode through the full capture path
    test_digits_decode();

    // Test 2: Unlock sequence fires end to end
    test_unlock_end_to_end();

    // Test 3: Queue overflow never blocks the producer
    test_queue_overflow();

    println!("✅ All smoke tests passed!");
    println!();
    println!("📝 Run the full suite with: cargo test");
}

fn test_digits_decode() {
    println!("📡 Testing digit decode...");

    // Drain in two batches to stay under the queue capacity
    let mut harness = Harness::new();
    let mut presses = Vec::new();
    for batch in [0..5u8, 5..10u8] {
        for digit in batch {
            harness.inject(&digit_frame(digit));
        }
        presses.extend(harness.drain());
    }

    assert_eq!(presses.len(), 10);
    for (digit, press) in presses.iter().enumerate() {
        assert_eq!(press.button, Button::Digit(digit as u8));
        assert!(!press.repeat);
    }

    println!("  ✅ All ten digits decode");
}

fn test_unlock_end_to_end() {
    println!("🔓 Testing unlock sequence...");

    let mut harness = Harness::new();
    for frame in [digit_frame(1), digit_frame(5), digit_frame(9), enter_frame()] {
        harness.inject(&frame);
    }
    harness.drain();

    assert_eq!(harness.unlocks(), 1);
    assert_eq!(harness.matched_len(), 0);

    println!("  ✅ Unlock fired exactly once");
}

fn test_queue_overflow() {
    println!("📦 Testing queue overflow policy...");

    let mut harness = Harness::new();
    for _ in 0..12 {
        harness.inject(&digit_frame(7));
    }

    // Only the queue capacity worth of frames survives
    let presses = harness.drain();
    assert_eq!(presses.len(), 8);
    assert!(presses.iter().all(|p| p.button == Button::Digit(7)));

    println!("  ✅ Overflow drops frames without blocking");
}
