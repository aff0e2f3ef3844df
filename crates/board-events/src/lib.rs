#![no_std]
//! Interrupt and timing glue between a UWB transceiver and its host MCU.
//!
//! Routes the transceiver's IRQ line to the ranging layer, derives a
//! millisecond time base from a free-running counter, and optionally hands
//! periodic work from a hardware timer to a worker task through a counting
//! semaphore. Peripherals are reached through the traits in [`hal`], so the
//! same logic runs on the board and on the host.

// This must go first so the macros are visible to the other modules.
mod fmt;

mod board;
mod clock;
mod config;
mod error;
pub mod hal;
mod handler;
mod handoff;
mod irq;
mod semaphore;
mod time_base;

pub use board::{
    Board, EventRouter, Handlers, MultiThreaded, RadioBus, SingleThreaded,
    Threading,
};
pub use clock::{Deadline, MillisClock};
pub use config::{
    BoardConfig, BusConfig, BusSpeed, Edge, HandoffConfig, PinId, SpiMode,
    TimeBaseConfig,
};
pub use error::{BringUpError, ConfigError, Step};
pub use hal::{Parts, Platform};
pub use handler::{IrqHandler, RadioSignal, Source, TickHandler};
pub use handoff::{
    serve, serve_one, NoWorker, RangingWork, WorkerHandoff, WorkerSlot,
};
pub use irq::IrqLine;
pub use semaphore::{Release, WorkSemaphore};
pub use time_base::TimeBase;
