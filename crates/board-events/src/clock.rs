use portable_atomic::{AtomicU32, Ordering};

/// Coarse millisecond count advanced by the time base.
///
/// Wraps after roughly 49.7 days; comparisons go through
/// [`elapsed_since`](Self::elapsed_since) so the wrap is harmless for
/// intervals shorter than that.
pub struct MillisClock {
    ms: AtomicU32,
}

impl MillisClock {
    pub const fn new() -> Self {
        Self { ms: AtomicU32::new(0) }
    }

    pub fn now(&self) -> u32 {
        self.ms.load(Ordering::Acquire)
    }

    pub(crate) fn advance(&self) {
        self.ms.fetch_add(1, Ordering::Release);
    }

    /// Milliseconds since `earlier` was read from [`now`](Self::now).
    pub fn elapsed_since(&self, earlier: u32) -> u32 {
        self.now().wrapping_sub(earlier)
    }

    /// A deadline `timeout_ms` from now.
    pub fn deadline(&self, timeout_ms: u32) -> Deadline {
        Deadline { start: self.now(), timeout_ms }
    }
}

impl Default for MillisClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Timeout tracked against a [`MillisClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    start: u32,
    timeout_ms: u32,
}

impl Deadline {
    pub fn expired(&self, clock: &MillisClock) -> bool {
        clock.elapsed_since(self.start) >= self.timeout_ms
    }

    pub fn remaining(&self, clock: &MillisClock) -> u32 {
        self.timeout_ms.saturating_sub(clock.elapsed_since(self.start))
    }
}
