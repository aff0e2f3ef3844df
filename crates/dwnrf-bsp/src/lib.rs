#![no_std]
//! nRF52840 board support for a DW1000 UWB transceiver.
//!
//! Binds the peripherals the radio uses (TWISPI0 as SPI master, the reset
//! and IRQ lines, RTC2 for the millisecond time base and, with the
//! `multi-threaded` feature, TIMER2 for the worker hand-off) to the
//! event layer in `board-events`, and owns their interrupt vectors.

// Modules
mod board;
mod bring_up;
mod config;
mod interrupts;
mod resources;

// Flatten
pub use board::*;
pub use bring_up::*;
pub use config::*;
pub use interrupts::Worker;
pub use resources::*;

pub use board_events;
