use super::super::timer;
use crate::gpio;

/// Output compare channel for single pulses.
///
/// The pin follows the compare unit: it can be forced to a level, or set to a
/// level on the next compare match.
#[derive(Clone, Debug)]
pub struct Channel {
    timer: timer::Timer,
    channel: timer::Channel,
}

/// Level of the channel output.
///
/// The pin level is inverted by the configured [Polarity].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Active,
    Inactive,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug)]
pub enum Polarity {
    ActiveHigh = 0,
    ActiveLow = 1,
}

impl Channel {
    #[inline]
    pub const fn new(timer: timer::Timer, channel: timer::Channel) -> Self {
        Self { timer, channel }
    }

    /// Force the output inactive, then hand the pin to the timer.
    #[inline]
    pub fn configure(&mut self, polarity: Polarity, gpio_mode: gpio::AlternateFunctionOutputMode) {
        self.force(Level::Inactive);
        self.timer.polarity(self.channel, polarity as u8 > 0);
        self.timer.output_enable(self.channel);
        gpio::configure(self.timer.gpio(self.channel), gpio_mode.into());
    }

    /// Drive the output to `level` now.
    #[inline]
    pub fn force(&mut self, level: Level) {
        let mode = match level {
            Level::Active => timer::OutputCompareMode::ForceActive,
            Level::Inactive => timer::OutputCompareMode::ForceInactive,
        };
        self.timer.output_compare_mode(self.channel, mode);
    }

    /// Drive the output to `level` on the next compare match.
    #[inline]
    pub fn on_match(&mut self, level: Level) {
        let mode = match level {
            Level::Active => timer::OutputCompareMode::ActiveMatch,
            Level::Inactive => timer::OutputCompareMode::InactiveMatch,
        };
        self.timer.output_compare_mode(self.channel, mode);
    }

    #[inline]
    pub fn write_ccr(&mut self, ccr: u16) {
        self.timer.write_ccr(self.channel, ccr);
    }

    /// Enable or disable the compare interrupt, dropping a pending match.
    #[inline]
    pub fn match_interrupt_enable(&mut self, enable: bool) {
        self.timer.clear_compare_interrupt_flag(self.channel);
        self.timer.compare_interrupt_enable(self.channel, enable);
    }

    /// Whether this channel's compare interrupt is enabled and has matched.
    ///
    /// The timer shares one interrupt between its channels, the handler uses
    /// this to find the channel that fired.
    #[inline]
    pub fn match_pending(&self) -> bool {
        self.timer.read_compare_interrupt_enable(self.channel)
            && self.timer.read_compare_interrupt_flag(self.channel)
    }

    #[inline]
    pub fn clear_match(&mut self) {
        self.timer.clear_compare_interrupt_flag(self.channel);
    }

    #[inline]
    pub fn gpio(&self) -> gpio::Gpio {
        self.timer.gpio(self.channel)
    }
}
