use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::waitqueue::WakerRegistration;

/// Outcome of [`WorkSemaphore::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Release {
    /// Counted; the value is the number of permits now pending.
    Queued(usize),
    /// The limit was reached and the release was dropped.
    Saturated,
}

struct State {
    permits: usize,
    overruns: u32,
    waker: WakerRegistration,
}

/// Counting semaphore that carries work from interrupt context to a
/// single worker task.
///
/// `release` never blocks and is safe to call from an interrupt handler
/// when `M` is a critical-section mutex. Pending permits saturate at the
/// limit given to [`new`](Self::new); releases beyond it are dropped and
/// counted in [`overruns`](Self::overruns).
pub struct WorkSemaphore<M: RawMutex> {
    state: Mutex<M, RefCell<State>>,
    limit: usize,
}

impl<M: RawMutex> WorkSemaphore<M> {
    pub const fn new(limit: usize) -> Self {
        Self {
            state: Mutex::new(RefCell::new(State {
                permits: 0,
                overruns: 0,
                waker: WakerRegistration::new(),
            })),
            limit,
        }
    }

    /// Add one permit and wake the worker.
    pub fn release(&self) -> Release {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            if state.permits >= self.limit {
                state.overruns = state.overruns.wrapping_add(1);
                // The worker is still woken so it drains what is pending.
                state.waker.wake();
                return Release::Saturated;
            }
            state.permits += 1;
            state.waker.wake();
            Release::Queued(state.permits)
        })
    }

    /// Take one permit, waiting for a release if none is pending.
    ///
    /// Only one task may wait at a time.
    pub async fn acquire(&self) {
        poll_fn(|cx| {
            self.state.lock(|state| {
                let mut state = state.borrow_mut();
                if state.permits > 0 {
                    state.permits -= 1;
                    Poll::Ready(())
                } else {
                    state.waker.register(cx.waker());
                    Poll::Pending
                }
            })
        })
        .await
    }

    /// Take one permit if one is pending.
    pub fn try_acquire(&self) -> bool {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            if state.permits > 0 {
                state.permits -= 1;
                true
            } else {
                false
            }
        })
    }

    /// Permits released and not yet acquired.
    pub fn pending(&self) -> usize {
        self.state.lock(|state| state.borrow().permits)
    }

    /// Releases dropped because the limit was reached.
    pub fn overruns(&self) -> u32 {
        self.state.lock(|state| state.borrow().overruns)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
