use board_events::{serve, RangingWork, WorkSemaphore};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::CLOCK;

/// Log once per this many steps.
const REPORT_EVERY: u32 = 1000;

/// Periodic ranging work. Tracks its own cadence against the RTC2 clock
/// and reports periods it lost to a saturated queue.
pub struct Cadence {
    semaphore: &'static WorkSemaphore<CriticalSectionRawMutex>,
    steps: u32,
    since: u32,
    overruns: u32,
}

impl Cadence {
    pub fn new(
        semaphore: &'static WorkSemaphore<CriticalSectionRawMutex>,
    ) -> Self {
        Self { semaphore, steps: 0, since: CLOCK.now(), overruns: 0 }
    }
}

impl RangingWork for Cadence {
    async fn step(&mut self) {
        self.steps = self.steps.wrapping_add(1);

        let overruns = self.semaphore.overruns();
        if overruns != self.overruns {
            warn!(
                "worker fell behind, {} periods dropped",
                overruns.wrapping_sub(self.overruns)
            );
            self.overruns = overruns;
        }

        if self.steps % REPORT_EVERY == 0 {
            info!(
                "worker: {} steps in {} ms",
                REPORT_EVERY,
                CLOCK.elapsed_since(self.since)
            );
            self.since = CLOCK.now();
        }
    }
}

#[embassy_executor::task]
pub async fn worker_task(
    semaphore: &'static WorkSemaphore<CriticalSectionRawMutex>,
) {
    serve(semaphore, Cadence::new(semaphore)).await
}
