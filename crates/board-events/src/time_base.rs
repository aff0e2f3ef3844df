use crate::config::TimeBaseConfig;
use crate::error::ConfigError;
use crate::hal::CompareCounter;
use crate::handler::TickHandler;

/// Periodic callback derived from a free-running counter.
///
/// Each compare match re-arms the compare register at the matched value
/// plus one period. The next match therefore never depends on how long
/// the interrupt took to be serviced, and the armed value is always
/// `initial + (fires + 1) * ticks_per_period` modulo the counter width.
pub struct TimeBase<C: CompareCounter> {
    counter: C,
    ticks_per_period: u32,
    compare: u32,
    fires: u32,
    spurious: u32,
    handler: TickHandler,
}

impl<C: CompareCounter> TimeBase<C> {
    /// Start `counter` at `config.initial` and arm the first period.
    pub fn init(
        mut counter: C,
        config: TimeBaseConfig,
        handler: TickHandler,
    ) -> Result<Self, ConfigError> {
        let ticks = config.ticks_per_period;
        // Past half the range a late match can't be told from an early one.
        if ticks == 0 || ticks > C::MASK / 2 {
            return Err(ConfigError::InvalidPeriod(ticks));
        }

        let initial = config.initial & C::MASK;
        counter.start(initial)?;
        let compare = initial.wrapping_add(ticks) & C::MASK;
        counter.set_compare(compare);
        debug!("time base armed at {}, period {} ticks", compare, ticks);

        Ok(Self {
            counter,
            ticks_per_period: ticks,
            compare,
            fires: 0,
            spurious: 0,
            handler,
        })
    }

    /// Service a compare interrupt.
    ///
    /// Returns the number of periods delivered to the handler: zero for a
    /// spurious call, more than one when servicing ran late enough that
    /// the counter already passed the next compare value.
    pub fn on_compare(&mut self) -> u32 {
        if !self.counter.take_compare_event() {
            self.spurious = self.spurious.wrapping_add(1);
            trace!("spurious time base interrupt");
            return 0;
        }

        let mut delivered = 0;
        let mut catching_up = false;
        loop {
            self.fires = self.fires.wrapping_add(1);
            self.compare =
                self.compare.wrapping_add(self.ticks_per_period) & C::MASK;
            self.counter.set_compare(self.compare);
            if catching_up {
                // The previous compare may still have matched after it was
                // found passed. Its period is delivered below, so drop the
                // event, but only once the register has moved past it.
                self.counter.take_compare_event();
            }
            self.handler.invoke(self.fires);
            delivered += 1;

            if !self.is_behind() {
                break;
            }
            catching_up = true;
            warn!("time base late, catching up at {}", self.compare);
        }
        delivered
    }

    /// Whether the armed compare value is too close or already passed.
    fn is_behind(&self) -> bool {
        let ahead = self.compare.wrapping_sub(self.counter.now()) & C::MASK;
        ahead < C::MIN_LEAD || ahead > C::MASK / 2
    }

    /// The value currently loaded in the compare register.
    pub fn compare(&self) -> u32 {
        self.compare
    }

    pub fn ticks_per_period(&self) -> u32 {
        self.ticks_per_period
    }

    /// Periods delivered since start.
    pub fn fires(&self) -> u32 {
        self.fires
    }

    /// Interrupts taken with no compare event pending.
    pub fn spurious(&self) -> u32 {
        self.spurious
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn counter_mut(&mut self) -> &mut C {
        &mut self.counter
    }
}
