use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{
    P0_13, P0_17, P0_19, P0_21, P0_23, P0_24, P0_25, RTC2, TIMER2, TWISPI0,
};
use embassy_nrf::Peri;

/// Pins and bus of the DW1000 shield.
pub struct RadioResources {
    /// SPI master the radio sits on (instance 0).
    pub spim: Peri<'static, TWISPI0>,
    pub sck: Peri<'static, P0_25>,
    pub mosi: Peri<'static, P0_23>,
    pub miso: Peri<'static, P0_24>,
    /// Chip select, active low.
    pub cs: Peri<'static, P0_17>,
    /// RSTn. Open drain: driven low or left floating, never driven high.
    pub reset: Peri<'static, P0_21>,
    /// DW1000 IRQ output, active high.
    pub irq: Peri<'static, P0_19>,
}

/// Represents the peripherals of an nRF52840 DK with a DW1000 shield.
pub struct Dw1000Dk {
    /// Peripherals for the radio.
    pub radio: RadioResources,
    /// Real-Time Clock 2, the millisecond time base.
    pub rtc2: Peri<'static, RTC2>,
    /// Timer 2, feeds the worker on multi-threaded builds.
    pub timer2: Peri<'static, TIMER2>,
    /// LED 1 of the DK, active low.
    pub led1: Peri<'static, P0_13>,
}

impl Default for Dw1000Dk {
    fn default() -> Self {
        let mut config = embassy_nrf::config::Config::default();
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;
        Self::new(config)
    }
}

impl Dw1000Dk {
    /// Create a new instance based on HAL configuration
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            radio: RadioResources {
                spim: p.TWISPI0,
                sck: p.P0_25,
                mosi: p.P0_23,
                miso: p.P0_24,
                cs: p.P0_17,
                reset: p.P0_21,
                irq: p.P0_19,
            },
            rtc2: p.RTC2,
            timer2: p.TIMER2,
            led1: p.P0_13,
        }
    }
}
