//! Peripheral operations the event layer needs from the chip.
//!
//! Every method that takes `&mut self` is called either during bring-up
//! (before any interrupt is unmasked) or from the single interrupt
//! context that owns the peripheral, never from both.

use crate::config::{Edge, PinId, SpiMode};
use crate::error::ConfigError;

/// Plain GPIO setup for the transceiver's control lines.
pub trait PinControl {
    /// Configure the reset line and leave the transceiver running.
    fn init_pins(&mut self, reset: PinId) -> Result<(), ConfigError>;

    /// Hold the transceiver in reset, or release it.
    ///
    /// Releasing must let the line float; the transceiver drives its own
    /// reset pin high.
    fn set_reset(&mut self, asserted: bool);
}

/// Mode and clock control for the SPI master the radio sits on.
pub trait SpiControl {
    fn configure(&mut self, mode: SpiMode, hz: u32) -> Result<(), ConfigError>;
}

/// The external-interrupt controller.
pub trait ExtInterrupt {
    /// Route edges on `pin` to the radio interrupt service.
    ///
    /// Fails if the pin is already routed, no channel is free, or `edge`
    /// cannot be detected.
    fn claim(&mut self, pin: PinId, edge: Edge) -> Result<(), ConfigError>;
}

/// A free-running counter with one compare register.
pub trait CompareCounter {
    /// Valid counter bits, e.g. `0x00FF_FFFF` for a 24-bit counter.
    const MASK: u32;

    /// Smallest distance ahead of the counter at which a newly written
    /// compare value is guaranteed to match.
    const MIN_LEAD: u32 = 1;

    /// Load `initial` and start counting.
    fn start(&mut self, initial: u32) -> Result<(), ConfigError>;

    fn set_compare(&mut self, value: u32);

    /// Current counter value.
    fn now(&self) -> u32;

    /// Clear the compare event, returning whether it was pending.
    fn take_compare_event(&mut self) -> bool;
}

/// A hardware timer that restarts itself every period.
pub trait PeriodicTimer {
    fn start_periodic(
        &mut self,
        channel: u8,
        frequency_hz: u32,
        ticks: u32,
    ) -> Result<(), ConfigError>;

    /// Clear the period event, returning whether it was pending.
    fn take_event(&mut self) -> bool;
}

/// The set of peripherals a board provides for the radio.
pub trait Platform {
    type Pins: PinControl;
    type Spi: SpiControl;
    type Ext: ExtInterrupt;
    type Counter: CompareCounter;
}

/// Peripheral instances handed to bring-up.
pub struct Parts<P: Platform> {
    pub pins: P::Pins,
    pub spi: P::Spi,
    pub ext: P::Ext,
    pub counter: P::Counter,
}
