//! Interrupt vectors and the router they share.

use core::cell::RefCell;

use board_events::{Edge, EventRouter, Source};
use embassy_nrf::gpio::Input;
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::resources::Nrf52;

cfg_if::cfg_if! {
    if #[cfg(feature = "multi-threaded")] {
        /// Worker slot of this build.
        pub type Worker = board_events::WorkerHandoff<
            crate::resources::Timer2,
            CriticalSectionRawMutex,
        >;
    } else {
        /// Worker slot of this build.
        pub type Worker = board_events::NoWorker;
    }
}

pub(crate) type Router = EventRouter<Nrf52, Worker>;

/// Written once by bring-up, then only touched from interrupt context.
static ROUTER: Mutex<CriticalSectionRawMutex, RefCell<Option<Router>>> =
    Mutex::new(RefCell::new(None));

const VECTOR_PRIORITY: Priority = Priority::P2;

/// Install the router and unmask the vectors that feed it.
pub(crate) fn install(router: Router) {
    ROUTER.lock(|slot| *slot.borrow_mut() = Some(router));

    interrupt::RTC2.set_priority(VECTOR_PRIORITY);
    // SAFETY: the handler only reaches shared state through `ROUTER`.
    unsafe { interrupt::RTC2.enable() };

    #[cfg(feature = "multi-threaded")]
    {
        interrupt::TIMER2.set_priority(VECTOR_PRIORITY);
        // SAFETY: as above.
        unsafe { interrupt::TIMER2.enable() };
    }
}

fn dispatch(source: Source) {
    ROUTER.lock(|slot| match slot.borrow_mut().as_mut() {
        Some(router) => router.dispatch(source),
        None => {
            #[cfg(feature = "defmt")]
            defmt::trace!("{} before bring-up finished", source);
        }
    });
}

#[interrupt]
fn RTC2() {
    dispatch(Source::TimeBase);
}

#[cfg(feature = "multi-threaded")]
#[interrupt]
fn TIMER2() {
    dispatch(Source::WorkerTimer);
}

/// Forwards edges on the radio IRQ pin.
#[embassy_executor::task]
pub(crate) async fn radio_irq_task(mut irq: Input<'static>, edge: Edge) {
    loop {
        match edge {
            Edge::Rising => irq.wait_for_rising_edge().await,
            Edge::Falling => irq.wait_for_falling_edge().await,
            Edge::Both => irq.wait_for_any_edge().await,
        }
        dispatch(Source::RadioIrq);
    }
}
