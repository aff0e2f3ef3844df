//! Periodic work moved out of interrupt context.
//!
//! A hardware timer releases a [`WorkSemaphore`] once per period; a worker
//! task acquires it and runs one unit of ranging work per permit.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::HandoffConfig;
use crate::error::ConfigError;
use crate::hal::PeriodicTimer;
use crate::semaphore::{Release, WorkSemaphore};

/// Handles the worker-timer interrupt.
///
/// Implemented by [`WorkerHandoff`] and by [`NoWorker`] for boards built
/// without a worker.
pub trait WorkerSlot {
    fn on_timer(&mut self);
}

/// Worker slot of a single-threaded board.
pub struct NoWorker {
    spurious: u32,
}

impl NoWorker {
    pub(crate) const fn new() -> Self {
        Self { spurious: 0 }
    }

    pub fn spurious(&self) -> u32 {
        self.spurious
    }
}

impl WorkerSlot for NoWorker {
    fn on_timer(&mut self) {
        self.spurious = self.spurious.wrapping_add(1);
        warn!("worker timer interrupt on a board without worker");
    }
}

/// Timer half of the hand-off: one release per timer period.
pub struct WorkerHandoff<T: PeriodicTimer, M: RawMutex + 'static> {
    timer: T,
    config: HandoffConfig,
    semaphore: &'static WorkSemaphore<M>,
    fires: u32,
    spurious: u32,
}

impl<T: PeriodicTimer, M: RawMutex + 'static> WorkerHandoff<T, M> {
    pub fn init(
        mut timer: T,
        config: HandoffConfig,
        semaphore: &'static WorkSemaphore<M>,
    ) -> Result<Self, ConfigError> {
        if config.ticks_per_period == 0 {
            return Err(ConfigError::InvalidPeriod(0));
        }
        // The semaphore enforces the limit; both must agree and be non-zero.
        let limit = config.queue_limit;
        if limit == 0 || semaphore.limit() != limit {
            return Err(ConfigError::InvalidQueueLimit(limit));
        }
        timer.start_periodic(
            config.channel,
            config.frequency_hz,
            config.ticks_per_period,
        )?;
        debug!(
            "worker timer {} ch {} every {} ticks",
            config.instance, config.channel, config.ticks_per_period
        );

        Ok(Self { timer, config, semaphore, fires: 0, spurious: 0 })
    }

    /// Service a timer interrupt.
    pub fn on_fire(&mut self) {
        if !self.timer.take_event() {
            self.spurious = self.spurious.wrapping_add(1);
            return;
        }
        self.fires = self.fires.wrapping_add(1);
        if let Release::Saturated = self.semaphore.release() {
            warn!(
                "worker behind, {} permits pending, fire {} dropped",
                self.semaphore.limit(),
                self.fires
            );
        }
    }

    pub fn semaphore(&self) -> &'static WorkSemaphore<M> {
        self.semaphore
    }

    pub fn config(&self) -> &HandoffConfig {
        &self.config
    }

    pub fn fires(&self) -> u32 {
        self.fires
    }

    pub fn spurious(&self) -> u32 {
        self.spurious
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<T: PeriodicTimer, M: RawMutex + 'static> WorkerSlot
    for WorkerHandoff<T, M>
{
    fn on_timer(&mut self) {
        self.on_fire();
    }
}

/// One unit of work run by the worker for each timer period.
#[allow(async_fn_in_trait)]
pub trait RangingWork {
    async fn step(&mut self);
}

/// Wait for one permit, then run one step.
pub async fn serve_one<M: RawMutex, W: RangingWork>(
    semaphore: &WorkSemaphore<M>,
    work: &mut W,
) {
    semaphore.acquire().await;
    work.step().await;
}

/// The worker loop. Never returns.
pub async fn serve<M: RawMutex, W: RangingWork>(
    semaphore: &WorkSemaphore<M>,
    mut work: W,
) -> ! {
    loop {
        serve_one(semaphore, &mut work).await;
    }
}
