use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::peripherals::P0_13;
use embassy_nrf::Peri;
use embassy_time::{Instant, Timer};

use crate::CLOCK;

const BLINK_MS: u64 = 500;
/// Log both clocks every this many blinks.
const REPORT_EVERY: u32 = 20;

/// Blinks LED 1 and compares the RTC2 millisecond clock against the
/// embassy time driver, which runs off RTC1.
#[embassy_executor::task]
pub async fn heartbeat_task(led: Peri<'static, P0_13>) {
    let mut led = Output::new(led, Level::High, OutputDrive::Standard);
    let mut blinks: u32 = 0;

    loop {
        led.toggle();
        Timer::after_millis(BLINK_MS).await;

        blinks = blinks.wrapping_add(1);
        if blinks % REPORT_EVERY == 0 {
            let driver_ms = Instant::now().as_millis() as u32;
            let clock_ms = CLOCK.now();
            info!(
                "clock {} ms, driver {} ms, offset {} ms",
                clock_ms,
                driver_ms,
                driver_ms.wrapping_sub(clock_ms) as i32
            );
        }
    }
}
