use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;

use crate::config::{BoardConfig, BusConfig, BusSpeed, HandoffConfig};
use crate::error::{BringUpError, ConfigError, Step};
use crate::hal::{Parts, PeriodicTimer, PinControl, Platform, SpiControl};
use crate::handler::{IrqHandler, Source, TickHandler};
use crate::handoff::{NoWorker, WorkerHandoff, WorkerSlot};
use crate::irq::IrqLine;
use crate::semaphore::WorkSemaphore;
use crate::time_base::TimeBase;

/// Reset pulse width.
const RESET_ASSERT_MS: u32 = 1;
/// Time for the transceiver's clocks to settle after reset.
const RESET_SETTLE_MS: u32 = 2;

/// Upward notifications installed at bring-up.
#[derive(Clone, Copy)]
pub struct Handlers {
    pub irq: IrqHandler,
    pub tick: TickHandler,
}

/// Thread-mode side of the board: the radio's bus and control pins.
pub struct RadioBus<P: Platform> {
    pub spi: P::Spi,
    pub pins: P::Pins,
    bus: BusConfig,
    speed: BusSpeed,
}

impl<P: Platform> RadioBus<P> {
    /// Reprogram the bus clock. Call with [`BusSpeed::Fast`] once the
    /// transceiver reports it is initialized.
    pub fn set_bus_speed(
        &mut self,
        speed: BusSpeed,
    ) -> Result<(), ConfigError> {
        self.spi.configure(self.bus.mode, self.bus.clock(speed))?;
        self.speed = speed;
        info!("radio bus now {} ({} Hz)", speed, self.bus.clock(speed));
        Ok(())
    }

    pub fn bus_speed(&self) -> BusSpeed {
        self.speed
    }

    pub fn bus_config(&self) -> &BusConfig {
        &self.bus
    }

    /// Pulse the reset line and drop the bus back to the slow preset,
    /// since the transceiver restarts in its slow-clock state.
    pub fn reset_radio(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<(), ConfigError> {
        self.pins.set_reset(true);
        delay.delay_ms(RESET_ASSERT_MS);
        self.pins.set_reset(false);
        delay.delay_ms(RESET_SETTLE_MS);
        self.set_bus_speed(BusSpeed::Slow)
    }
}

/// Interrupt side of the board: everything the interrupt vectors touch.
pub struct EventRouter<P: Platform, W: WorkerSlot> {
    pub irq: IrqLine<P::Ext>,
    pub time_base: TimeBase<P::Counter>,
    pub worker: W,
}

impl<P: Platform, W: WorkerSlot> EventRouter<P, W> {
    /// Route one interrupt to the component that owns its source.
    pub fn dispatch(&mut self, source: Source) {
        match source {
            Source::RadioIrq => {
                self.irq.on_edge();
            }
            Source::TimeBase => {
                self.time_base.on_compare();
            }
            Source::WorkerTimer => self.worker.on_timer(),
        }
    }
}

/// Build shape of the board: with or without a worker.
pub trait Threading {
    type Worker: WorkerSlot;

    /// Last bring-up step.
    fn start(self) -> Result<Self::Worker, ConfigError>;
}

/// Everything runs from interrupt context.
pub struct SingleThreaded;

impl Threading for SingleThreaded {
    type Worker = NoWorker;

    fn start(self) -> Result<NoWorker, ConfigError> {
        Ok(NoWorker::new())
    }
}

/// Adds a timer that hands periodic work to a worker task.
///
/// `spawn` starts the worker on the semaphore once the timer is running.
pub struct MultiThreaded<T: PeriodicTimer, M: RawMutex + 'static, F> {
    pub timer: T,
    pub config: HandoffConfig,
    pub semaphore: &'static WorkSemaphore<M>,
    pub spawn: F,
}

impl<T, M, F> Threading for MultiThreaded<T, M, F>
where
    T: PeriodicTimer,
    M: RawMutex + 'static,
    F: FnOnce(&'static WorkSemaphore<M>) -> Result<(), ConfigError>,
{
    type Worker = WorkerHandoff<T, M>;

    fn start(self) -> Result<Self::Worker, ConfigError> {
        let handoff =
            WorkerHandoff::init(self.timer, self.config, self.semaphore)?;
        (self.spawn)(self.semaphore)?;
        Ok(handoff)
    }
}

/// A brought-up board.
pub struct Board<P: Platform, W: WorkerSlot> {
    pub radio: RadioBus<P>,
    pub events: EventRouter<P, W>,
}

impl<P: Platform, W: WorkerSlot> Board<P, W> {
    /// Initialize GPIO, SPI, the IRQ line, the time base and (depending on
    /// `threading`) the worker, in that order.
    ///
    /// The first failing step aborts the sequence. Not idempotent: a second
    /// call on the same hardware fails when it claims pins again.
    pub fn bring_up<Th>(
        config: &BoardConfig,
        parts: Parts<P>,
        handlers: Handlers,
        threading: Th,
    ) -> Result<Self, BringUpError>
    where
        Th: Threading<Worker = W>,
    {
        let Parts { mut pins, mut spi, ext, counter } = parts;

        pins.init_pins(config.reset).map_err(BringUpError::at(Step::Gpio))?;
        debug!("gpio ready, reset line {}", config.reset);

        spi.configure(config.bus.mode, config.bus.clock(BusSpeed::Slow))
            .map_err(BringUpError::at(Step::Spi))?;
        debug!(
            "spi{} ready at {} Hz",
            config.bus.instance, config.bus.clock_slow_hz
        );

        let mut irq =
            IrqLine::init(ext, config.irq, config.irq_edge, handlers.irq)
                .map_err(BringUpError::at(Step::Interrupt))?;
        irq.enable();

        let time_base = TimeBase::init(counter, config.time_base, handlers.tick)
            .map_err(BringUpError::at(Step::TimeBase))?;

        let worker =
            threading.start().map_err(BringUpError::at(Step::Worker))?;

        info!("board up");
        Ok(Self {
            radio: RadioBus {
                spi,
                pins,
                bus: config.bus,
                speed: BusSpeed::Slow,
            },
            events: EventRouter { irq, time_base, worker },
        })
    }

    pub fn dispatch(&mut self, source: Source) {
        self.events.dispatch(source);
    }

    /// Split into the thread-mode and interrupt halves.
    pub fn into_parts(self) -> (RadioBus<P>, EventRouter<P, W>) {
        (self.radio, self.events)
    }
}
