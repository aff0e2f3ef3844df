//! Fixed dispatch table between interrupt sources and the layer above.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::clock::MillisClock;

/// Raised once per delivered radio interrupt.
pub type RadioSignal = Signal<CriticalSectionRawMutex, ()>;

/// Interrupt sources wired to the event layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// Edge on the transceiver's IRQ pin.
    RadioIrq,
    /// Compare match on the time-base counter.
    TimeBase,
    /// Period event of the worker timer.
    WorkerTimer,
}

/// Who hears about radio interrupts.
#[derive(Clone, Copy)]
pub enum IrqHandler {
    None,
    Call(fn()),
    /// Wake the task waiting on the signal.
    Signal(&'static RadioSignal),
}

impl IrqHandler {
    #[inline]
    pub(crate) fn invoke(&self) {
        match self {
            Self::None => {}
            Self::Call(f) => f(),
            Self::Signal(signal) => signal.signal(()),
        }
    }
}

/// Who hears about elapsed time-base periods.
#[derive(Clone, Copy)]
pub enum TickHandler {
    None,
    /// Advance a millisecond clock by one.
    Clock(&'static MillisClock),
    /// Called with the sequence number of the period, starting at 1.
    Call(fn(u32)),
}

impl TickHandler {
    #[inline]
    pub(crate) fn invoke(&self, seq: u32) {
        match self {
            Self::None => {}
            Self::Clock(clock) => clock.advance(),
            Self::Call(f) => f(seq),
        }
    }
}
