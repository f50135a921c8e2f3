//! Timer tick durations.

/// Length of one full cycle of the 8-bit timer, in ticks.
pub const CYCLE: u16 = 256;

/// Duration in timer ticks.
///
/// The comparator is only 8 bits wide, so a duration is consumed as a number of
/// full cycles ([high][Ticks::high()] byte) plus a remainder ([low][Ticks::low()] byte).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticks(pub u16);

impl Ticks {
    #[inline]
    pub const fn new(ticks: u16) -> Self {
        Self(ticks)
    }

    /// Convert milliseconds to ticks.
    ///
    /// `ticks = ms * (clock_hz / 1000) / prescaler`, saturates at [u16::MAX].
    pub const fn from_millis(ms: u32, clock_hz: u32, prescaler: u32) -> Self {
        let ticks = (ms as u64 * (clock_hz / 1000) as u64) / prescaler as u64;
        if ticks > u16::MAX as u64 {
            Self(u16::MAX)
        } else {
            Self(ticks as u16)
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    /// Whether the remaining duration ends within one timer cycle.
    #[inline]
    pub const fn fits_cycle(self) -> bool {
        self.0 <= CYCLE
    }

    /// Consume one full timer cycle.
    ///
    /// Only called when the duration does not [fit][Ticks::fits_cycle()], so the
    /// high byte is non-zero.
    #[inline]
    pub fn drop_cycle(&mut self) {
        self.0 -= CYCLE;
    }
}

impl From<u16> for Ticks {
    #[inline]
    fn from(ticks: u16) -> Self {
        Self(ticks)
    }
}

/// One single-shot pulse: active for `active` ticks, then inactive for `inactive` ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pulse {
    pub active: Ticks,
    pub inactive: Ticks,
}

impl Pulse {
    #[inline]
    pub const fn new(active: Ticks, inactive: Ticks) -> Self {
        Self { active, inactive }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_to_ticks() {
        // 72 MHz / 9216 is the same 7812.5 Hz as 8 MHz / 1024.
        assert_eq!(Ticks::from_millis(250, 72_000_000, 9216), Ticks(1953));
        assert_eq!(Ticks::from_millis(250, 8_000_000, 1024), Ticks(1953));
        assert_eq!(Ticks::from_millis(0, 72_000_000, 9216), Ticks(0));
    }

    #[test]
    fn millis_saturate() {
        assert_eq!(Ticks::from_millis(60_000, 72_000_000, 1), Ticks(u16::MAX));
    }

    #[test]
    fn bytes() {
        let t = Ticks(300);
        assert_eq!(t.high(), 1);
        assert_eq!(t.low(), 44);
    }

    #[test]
    fn cycles() {
        assert!(Ticks(256).fits_cycle());
        assert!(!Ticks(257).fits_cycle());

        let mut t = Ticks(0x06CD);
        t.drop_cycle();
        assert_eq!(t, Ticks(0x05CD));
        assert_eq!(t.low(), 0xCD);
    }
}
