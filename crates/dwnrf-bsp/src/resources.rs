use board_events::hal::{
    CompareCounter, ExtInterrupt, PeriodicTimer, PinControl, SpiControl,
};
use board_events::{ConfigError, Edge, Parts, PinId, Platform, SpiMode};
use embassy_embedded_hal::SetConfig;
use embassy_executor::SendSpawner;
use embassy_nrf::gpio::{Flex, Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::{self, InterruptExt};
use embassy_nrf::pac;
use embassy_nrf::peripherals::{self, P0_19, RTC2, TIMER2};
use embassy_nrf::{bind_interrupts, spim, Peri};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;

use crate::board::RadioResources;
use crate::config::BOARD;
use crate::interrupts::radio_irq_task;

bind_interrupts!(struct SpiIrq {
    TWISPI0 => spim::InterruptHandler<peripherals::TWISPI0>;
});

/// The radio's SPI device: bus plus its chip select.
pub type RadioDevice =
    ExclusiveDevice<spim::Spim<'static>, Output<'static>, Delay>;

/// SPIM0 and its pins, left untouched until the bus is first configured.
struct SpiPins {
    spim: Peri<'static, peripherals::TWISPI0>,
    sck: Peri<'static, peripherals::P0_25>,
    mosi: Peri<'static, peripherals::P0_23>,
    miso: Peri<'static, peripherals::P0_24>,
    cs: Peri<'static, peripherals::P0_17>,
}

impl SpiPins {
    fn into_device(self, config: spim::Config) -> RadioDevice {
        let SpiPins { spim, sck, mosi, miso, cs } = self;
        interrupt::TWISPI0.set_priority(interrupt::Priority::P3);

        let spi = spim::Spim::new(spim, SpiIrq, sck, miso, mosi, config);
        let cs = Output::new(cs, Level::High, OutputDrive::Standard);
        match ExclusiveDevice::new(spi, cs, Delay) {
            Ok(device) => device,
            Err(never) => match never {},
        }
    }
}

/// The radio bus as seen by the event layer.
///
/// SPIM0 is enabled and CS driven by the first `configure`, which
/// bring-up runs after the GPIO step.
pub struct RadioSpi {
    pins: Option<SpiPins>,
    device: Option<RadioDevice>,
}

impl RadioSpi {
    /// The radio's SPI device, for register access. `None` until the bus
    /// has been configured.
    pub fn device(&mut self) -> Option<&mut RadioDevice> {
        self.device.as_mut()
    }
}

/// Fastest SPIM clock not above `hz`. TWISPI0 tops out at 8 MHz.
fn spim_frequency(hz: u32) -> Option<spim::Frequency> {
    const STEPS: [(u32, spim::Frequency); 7] = [
        (8_000_000, spim::Frequency::M8),
        (4_000_000, spim::Frequency::M4),
        (2_000_000, spim::Frequency::M2),
        (1_000_000, spim::Frequency::M1),
        (500_000, spim::Frequency::K500),
        (250_000, spim::Frequency::K250),
        (125_000, spim::Frequency::K125),
    ];
    STEPS.iter().find(|(max, _)| *max <= hz).map(|(_, f)| *f)
}

fn spim_mode(mode: SpiMode) -> spim::Mode {
    match mode {
        SpiMode::Mode0 => spim::MODE_0,
        SpiMode::Mode1 => spim::MODE_1,
        SpiMode::Mode2 => spim::MODE_2,
        SpiMode::Mode3 => spim::MODE_3,
    }
}

impl SpiControl for RadioSpi {
    fn configure(&mut self, mode: SpiMode, hz: u32) -> Result<(), ConfigError> {
        let mut config = spim::Config::default();
        config.mode = spim_mode(mode);
        config.frequency =
            spim_frequency(hz).ok_or(ConfigError::UnsupportedClock(hz))?;

        if let Some(device) = self.device.as_mut() {
            return device
                .bus_mut()
                .set_config(&config)
                .map_err(|_| ConfigError::UnsupportedClock(hz));
        }
        let pins = self.pins.take().ok_or(ConfigError::PeripheralUnavailable)?;
        self.device = Some(pins.into_device(config));
        Ok(())
    }
}

/// RSTn of the DW1000.
pub struct ResetLine {
    line: Flex<'static>,
    pin: PinId,
    claimed: bool,
}

impl PinControl for ResetLine {
    fn init_pins(&mut self, reset: PinId) -> Result<(), ConfigError> {
        if reset != self.pin {
            return Err(ConfigError::PeripheralUnavailable);
        }
        if self.claimed {
            return Err(ConfigError::PinClaimed(reset));
        }
        self.claimed = true;
        self.set_reset(false);
        Ok(())
    }

    fn set_reset(&mut self, asserted: bool) {
        if asserted {
            self.line.set_low();
            self.line.set_as_output(OutputDrive::Standard);
        } else {
            // The DW1000 pulls RSTn up itself.
            self.line.set_as_input(Pull::None);
        }
    }
}

/// Edge detection on the radio IRQ pin through GPIOTE port events.
///
/// A claim hands the pin to a task on the high-priority executor that
/// routes every detected edge to the event layer.
pub struct RadioIrq {
    pin: Option<Peri<'static, P0_19>>,
    id: PinId,
    spawner: SendSpawner,
}

impl ExtInterrupt for RadioIrq {
    fn claim(&mut self, pin: PinId, edge: Edge) -> Result<(), ConfigError> {
        if pin != self.id {
            return Err(ConfigError::PeripheralUnavailable);
        }
        let irq = self.pin.take().ok_or(ConfigError::PinClaimed(pin))?;
        let input = Input::new(irq, Pull::None);
        self.spawner
            .spawn(radio_irq_task(input, edge))
            .map_err(|_| ConfigError::SpawnFailed)
    }
}

/// RTC2 as a 24-bit compare counter.
///
/// The RTC can only be cleared, so a non-zero start value is kept as an
/// offset applied to every read and compare.
pub struct Rtc2Counter {
    _rtc: Peri<'static, RTC2>,
    offset: u32,
}

impl CompareCounter for Rtc2Counter {
    const MASK: u32 = 0x00FF_FFFF;
    // A compare at COUNTER or COUNTER + 1 may not match.
    const MIN_LEAD: u32 = 2;

    fn start(&mut self, initial: u32) -> Result<(), ConfigError> {
        let r = pac::RTC2;
        r.tasks_stop().write_value(1);
        r.tasks_clear().write_value(1);
        r.prescaler().write(|w| w.set_prescaler(0));
        r.events_compare(0).write_value(0);
        r.intenset().write(|w| w.set_compare(0, true));
        self.offset = initial;
        r.tasks_start().write_value(1);
        Ok(())
    }

    fn set_compare(&mut self, value: u32) {
        let raw = value.wrapping_sub(self.offset) & Self::MASK;
        pac::RTC2.cc(0).write(|w| w.set_compare(raw));
    }

    fn now(&self) -> u32 {
        let raw = pac::RTC2.counter().read().counter();
        raw.wrapping_add(self.offset) & Self::MASK
    }

    fn take_compare_event(&mut self) -> bool {
        let event = pac::RTC2.events_compare(0);
        let fired = event.read() != 0;
        if fired {
            event.write_value(0);
        }
        fired
    }
}

/// TIMER2 restarting on one compare channel.
pub struct Timer2 {
    _timer: Peri<'static, TIMER2>,
    channel: usize,
}

impl Timer2 {
    pub fn new(timer: Peri<'static, TIMER2>) -> Self {
        Self { _timer: timer, channel: 0 }
    }
}

/// TIMER runs from a 16 MHz base divided by a power of two.
fn timer_prescaler(frequency_hz: u32) -> Option<u8> {
    const BASE_HZ: u32 = 16_000_000;
    (0u8..=9).find(|p| BASE_HZ >> *p == frequency_hz)
}

impl PeriodicTimer for Timer2 {
    fn start_periodic(
        &mut self,
        channel: u8,
        frequency_hz: u32,
        ticks: u32,
    ) -> Result<(), ConfigError> {
        // TIMER0..2 have four compare channels.
        if channel >= 4 {
            return Err(ConfigError::PeripheralUnavailable);
        }
        let prescaler = timer_prescaler(frequency_hz)
            .ok_or(ConfigError::UnsupportedClock(frequency_hz))?;
        let n = usize::from(channel);

        let t = pac::TIMER2;
        t.tasks_stop().write_value(1);
        t.mode().write(|w| w.set_mode(pac::timer::vals::Mode::TIMER));
        t.bitmode()
            .write(|w| w.set_bitmode(pac::timer::vals::Bitmode::_32BIT));
        t.prescaler().write(|w| w.set_prescaler(prescaler));
        t.cc(n).write_value(ticks);
        t.shorts().write(|w| w.set_compare_clear(n, true));
        t.events_compare(n).write_value(0);
        t.intenset().write(|w| w.set_compare(n, true));
        t.tasks_clear().write_value(1);
        t.tasks_start().write_value(1);

        self.channel = n;
        Ok(())
    }

    fn take_event(&mut self) -> bool {
        let event = pac::TIMER2.events_compare(self.channel);
        let fired = event.read() != 0;
        if fired {
            event.write_value(0);
        }
        fired
    }
}

/// The nRF52840 peripherals behind the event layer.
pub struct Nrf52;

impl Platform for Nrf52 {
    type Pins = ResetLine;
    type Spi = RadioSpi;
    type Ext = RadioIrq;
    type Counter = Rtc2Counter;
}

impl RadioResources {
    /// Hand the radio peripherals to bring-up.
    ///
    /// `irq_spawner` runs the IRQ edge task and should belong to a
    /// high-priority interrupt executor.
    pub fn into_parts(
        self,
        rtc: Peri<'static, RTC2>,
        irq_spawner: SendSpawner,
    ) -> Parts<Nrf52> {
        let RadioResources { spim, sck, mosi, miso, cs, reset, irq } = self;

        Parts {
            pins: ResetLine {
                line: Flex::new(reset),
                pin: BOARD.reset,
                claimed: false,
            },
            spi: RadioSpi {
                pins: Some(SpiPins { spim, sck, mosi, miso, cs }),
                device: None,
            },
            ext: RadioIrq {
                pin: Some(irq),
                id: BOARD.irq,
                spawner: irq_spawner,
            },
            counter: Rtc2Counter { _rtc: rtc, offset: 0 },
        }
    }
}
