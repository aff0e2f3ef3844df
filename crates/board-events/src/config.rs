//! Static board description: bus presets, pin assignments and timer
//! periods. Everything here is plain data, fixed at build time.

use core::fmt;

/// A GPIO pin, written `P<port>.<pin>` in schematics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: u8,
    pub pin: u8,
}

impl PinId {
    pub const fn new(port: u8, pin: u8) -> Self {
        Self { port, pin }
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}.{:02}", self.port, self.pin)
    }
}

/// Signal edge that raises the external interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
    Both,
}

/// Clock polarity / phase combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// CPOL = 0, CPHA = 0
    Mode0,
    /// CPOL = 0, CPHA = 1
    Mode1,
    /// CPOL = 1, CPHA = 0
    Mode2,
    /// CPOL = 1, CPHA = 1
    Mode3,
}

/// Which clock preset the radio bus is running at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// Used for every transfer until the transceiver is initialized.
    Slow,
    /// Used for all transfers after initialization.
    Fast,
}

/// SPI settings for the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub mode: SpiMode,
    pub clock_slow_hz: u32,
    pub clock_fast_hz: u32,
    pub chip_select: PinId,
    /// Index of the SPI master peripheral.
    pub instance: u8,
}

impl BusConfig {
    pub const fn clock(&self, speed: BusSpeed) -> u32 {
        match speed {
            BusSpeed::Slow => self.clock_slow_hz,
            BusSpeed::Fast => self.clock_fast_hz,
        }
    }
}

/// Free-running counter settings for the millisecond time base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeBaseConfig {
    /// Counter value loaded at start.
    pub initial: u32,
    /// Counter ticks in one period (roughly one millisecond).
    pub ticks_per_period: u32,
}

/// Settings for the timer that feeds the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandoffConfig {
    /// Hardware timer index.
    pub instance: u8,
    /// Compare channel of that timer.
    pub channel: u8,
    pub frequency_hz: u32,
    pub ticks_per_period: u32,
    /// Pending work items kept before further fires are dropped.
    pub queue_limit: usize,
}

/// Everything bring-up needs to know about the board wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub bus: BusConfig,
    /// Active-low transceiver reset.
    pub reset: PinId,
    pub irq: PinId,
    pub irq_edge: Edge,
    pub time_base: TimeBaseConfig,
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    #[test]
    fn pin_display_matches_schematic_names() {
        assert_eq!(PinId::new(0, 19).to_string(), "P0.19");
        assert_eq!(PinId::new(1, 3).to_string(), "P1.03");
    }

    #[test]
    fn clock_presets() {
        let bus = BusConfig {
            mode: SpiMode::Mode0,
            clock_slow_hz: 1_000_000,
            clock_fast_hz: 5_000_000,
            chip_select: PinId::new(0, 17),
            instance: 0,
        };
        assert_eq!(bus.clock(BusSpeed::Slow), 1_000_000);
        assert_eq!(bus.clock(BusSpeed::Fast), 5_000_000);
    }
}
