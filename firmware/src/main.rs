#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// RISC-V runtime
use riscv_rt as _;

// Panic handler
use panic_halt as _;

use embassy_executor::Spawner;
use embassy_time::Duration;
use static_cell::StaticCell;

use ir_core::capture::{FrameQueue, IrCapture};
use irlock_firmware::*;

// Static resources
static CAPTURE: IrCapture = IrCapture::new();
static FRAMES: FrameQueue = FrameQueue::new();
static INDICATOR: StaticCell<MockIndicator> = StaticCell::new();

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("🔧 IR Unlock Receiver Starting...");

    let config = ir_core::default_config();
    #[cfg(feature = "defmt")]
    defmt::info!(
        "⚙️ Receiver config: quiet period {}ms",
        config.quiet_period.as_millis()
    );

    let indicator = INDICATOR.init(MockIndicator::new());

    // Mock receiver replays the full unlock sequence for bring-up;
    // a board port replaces this with the real falling-edge input
    let receiver = MockIrReceiver::new(&DEMO_UNLOCK_EDGE_DELAYS_US);

    #[cfg(feature = "defmt")]
    defmt::info!("🚀 Spawning receiver tasks...");

    spawner.must_spawn(capture_task(receiver, &CAPTURE, &FRAMES, config));
    spawner.must_spawn(decode_task_wrapper(&CAPTURE, &FRAMES, indicator));

    #[cfg(feature = "defmt")]
    defmt::info!("✨ Receiver ready!");

    // Main supervision loop
    loop {
        embassy_time::Timer::after(Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("💓 Heartbeat");
    }
}
