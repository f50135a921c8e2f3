//! Pending pulse counter.

use core::cell::Cell;
use critical_section::Mutex;

/// Bounded signed count of pulses still to be produced.
///
/// Positive values are pulses for [channel A][crate::ChannelId::A], negative values for
/// [channel B][crate::ChannelId::B]. Incremented and decremented by the decoder
/// callbacks in interrupt context, consumed by the [Scheduler][crate::Scheduler] in the
/// main loop. Every read-modify-write runs inside a critical section.
///
/// Clicks beyond the limit are dropped.
pub struct PulseCounter {
    value: Mutex<Cell<i8>>,
    limit: i8,
}

impl PulseCounter {
    /// New counter, saturating at `±limit`.
    pub const fn new(limit: i8) -> Self {
        Self {
            value: Mutex::new(Cell::new(0)),
            limit,
        }
    }

    #[inline]
    pub fn limit(&self) -> i8 {
        self.limit
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> i8 {
        critical_section::with(|cs| self.value.borrow(cs).get())
    }

    /// Add a pending pulse for channel A.
    ///
    /// Returns `false` if the counter was already at the limit.
    pub fn increment(&self) -> bool {
        critical_section::with(|cs| {
            let value = self.value.borrow(cs);
            if value.get() < self.limit {
                value.set(value.get() + 1);
                true
            } else {
                false
            }
        })
    }

    /// Add a pending pulse for channel B.
    ///
    /// Returns `false` if the counter was already at the negative limit.
    pub fn decrement(&self) -> bool {
        critical_section::with(|cs| {
            let value = self.value.borrow(cs);
            if value.get() > -self.limit {
                value.set(value.get() - 1);
                true
            } else {
                false
            }
        })
    }

    /// Take one delivered pulse off a positive count.
    ///
    /// No-op if the count is no longer positive.
    pub fn consume_positive(&self) -> bool {
        critical_section::with(|cs| {
            let value = self.value.borrow(cs);
            if value.get() > 0 {
                value.set(value.get() - 1);
                true
            } else {
                false
            }
        })
    }

    /// Take one delivered pulse off a negative count.
    ///
    /// No-op if the count is no longer negative.
    pub fn consume_negative(&self) -> bool {
        critical_section::with(|cs| {
            let value = self.value.borrow(cs);
            if value.get() < 0 {
                value.set(value.get() + 1);
                true
            } else {
                false
            }
        })
    }
}
