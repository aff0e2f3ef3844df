#![no_std]

// This must go first so the macros are visible to the other modules.
mod fmt;

pub mod dw1000;
pub mod tasks;

use board_events::{Handlers, IrqHandler, MillisClock, RadioSignal, TickHandler};
use embassy_executor::{InterruptExecutor, SendSpawner};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};

pub const FW_VERSION: &str = env!("FW_VERSION");
pub const BUILD_SHAPE: &str = env!("BUILD_SHAPE");

/// Milliseconds since bring-up, advanced by the RTC2 time base.
pub static CLOCK: MillisClock = MillisClock::new();

/// Raised for every radio interrupt.
pub static RADIO_IRQ: RadioSignal = RadioSignal::new();

/// Where the event layer reports to.
pub fn handlers() -> Handlers {
    Handlers {
        irq: IrqHandler::Signal(&RADIO_IRQ),
        tick: TickHandler::Clock(&CLOCK),
    }
}

// Statics
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

// Interrupt executors
#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Start the executor the radio IRQ task runs on.
pub fn init_executors() -> SendSpawner {
    // High-priority executor: EGU1_SWI1, priority level 6
    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    EXECUTOR_HIGH.start(interrupt::EGU1_SWI1)
}

pub mod prelude {
    pub use super::{
        error, handlers, info, init_executors, tasks::*, warn, BUILD_SHAPE,
        CLOCK, FW_VERSION, RADIO_IRQ,
    };
    pub use board_events::{BringUpError, BusSpeed, ConfigError, RadioBus};
    pub use dwnrf_bsp::{Dw1000Dk, Nrf52};
    pub use embassy_executor::Spawner;
    pub use embassy_time::{Duration, Timer};
}
