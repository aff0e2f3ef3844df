use board_events::{Board, BringUpError, Handlers, RadioBus, Threading};
use embassy_executor::SendSpawner;
use embassy_nrf::peripherals::RTC2;
use embassy_nrf::Peri;

use crate::board::RadioResources;
use crate::config::BOARD;
use crate::interrupts::{self, Worker};
use crate::resources::Nrf52;

#[cfg(feature = "multi-threaded")]
pub use self::multi::*;

/// Runs bring-up, then hands the interrupt half to the vectors.
fn finish<Th: Threading<Worker = Worker>>(
    radio: RadioResources,
    rtc: Peri<'static, RTC2>,
    irq_spawner: SendSpawner,
    handlers: Handlers,
    threading: Th,
) -> Result<RadioBus<Nrf52>, BringUpError> {
    let parts = radio.into_parts(rtc, irq_spawner);
    let board = Board::bring_up(&BOARD, parts, handlers, threading)
        .inspect_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::error!("{}", _e);
        })?;

    let (bus, router) = board.into_parts();
    interrupts::install(router);
    Ok(bus)
}

/// Bring the radio up and start routing its interrupts. Every event is
/// handled in interrupt context.
///
/// Returns the radio bus at the slow clock preset; switch it to
/// [`BusSpeed::Fast`](board_events::BusSpeed::Fast) once the DW1000 is
/// initialized.
#[cfg(not(feature = "multi-threaded"))]
pub fn bring_up(
    radio: RadioResources,
    rtc: Peri<'static, RTC2>,
    irq_spawner: SendSpawner,
    handlers: Handlers,
) -> Result<RadioBus<Nrf52>, BringUpError> {
    finish(radio, rtc, irq_spawner, handlers, board_events::SingleThreaded)
}

#[cfg(feature = "multi-threaded")]
mod multi {
    use board_events::{ConfigError, MultiThreaded, WorkSemaphore};
    use embassy_nrf::peripherals::TIMER2;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    use super::*;
    use crate::config::WORKER;
    use crate::resources::Timer2;

    /// Released once per TIMER2 period, acquired by the worker.
    pub static WORK: WorkSemaphore<CriticalSectionRawMutex> =
        WorkSemaphore::new(WORKER.queue_limit);

    /// Bring the radio up and start routing its interrupts. TIMER2 hands
    /// periodic work to the task started by `spawn_worker`.
    ///
    /// Returns the radio bus at the slow clock preset.
    pub fn bring_up<F>(
        radio: RadioResources,
        rtc: Peri<'static, RTC2>,
        timer: Peri<'static, TIMER2>,
        irq_spawner: SendSpawner,
        handlers: Handlers,
        spawn_worker: F,
    ) -> Result<RadioBus<Nrf52>, BringUpError>
    where
        F: FnOnce(
            &'static WorkSemaphore<CriticalSectionRawMutex>,
        ) -> Result<(), ConfigError>,
    {
        let threading = MultiThreaded {
            timer: Timer2::new(timer),
            config: WORKER,
            semaphore: &WORK,
            spawn: spawn_worker,
        };
        finish(radio, rtc, irq_spawner, handlers, threading)
    }
}
