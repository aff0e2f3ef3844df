use core::fmt;

use crate::config::{Edge, PinId};

/// Fatal configuration errors detected while bringing the board up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The pin is already owned by another driver or a previous bring-up.
    PinClaimed(PinId),
    /// Every external-interrupt channel of the controller is in use.
    NoFreeChannel,
    /// The controller cannot detect this edge type.
    UnsupportedTrigger(Edge),
    /// The bus cannot run at (or below) the requested clock, in Hz.
    UnsupportedClock(u32),
    /// A timer period of this many ticks cannot be scheduled.
    InvalidPeriod(u32),
    /// The work queue limit is zero or differs from the semaphore's.
    InvalidQueueLimit(usize),
    /// The peripheral instance was already taken.
    PeripheralUnavailable,
    /// The worker task could not be started.
    SpawnFailed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinClaimed(pin) => write!(f, "pin {pin} already claimed"),
            Self::NoFreeChannel => f.write_str("no free interrupt channel"),
            Self::UnsupportedTrigger(edge) => {
                write!(f, "unsupported trigger {edge:?}")
            }
            Self::UnsupportedClock(hz) => {
                write!(f, "unsupported bus clock {hz} Hz")
            }
            Self::InvalidPeriod(ticks) => {
                write!(f, "invalid timer period of {ticks} ticks")
            }
            Self::InvalidQueueLimit(limit) => {
                write!(f, "invalid work queue limit {limit}")
            }
            Self::PeripheralUnavailable => {
                f.write_str("peripheral already taken")
            }
            Self::SpawnFailed => f.write_str("failed to spawn worker"),
        }
    }
}

/// Bring-up stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Gpio,
    Spi,
    Interrupt,
    TimeBase,
    Worker,
}

/// A bring-up step failed; the steps after it were not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringUpError {
    pub step: Step,
    pub error: ConfigError,
}

impl BringUpError {
    pub(crate) fn at(step: Step) -> impl FnOnce(ConfigError) -> Self {
        move |error| Self { step, error }
    }
}

impl fmt::Display for BringUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bring-up failed at {:?}: {}", self.step, self.error)
    }
}
