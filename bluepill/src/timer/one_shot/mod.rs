//! Single pulses from the output compare channels of an 8-bit timebase.
//!
//! The counter wraps at 255. Each channel drives its pin to a level when the
//! counter matches the compare value, and raises the timer interrupt.

mod channel;

use super::timer;
pub use channel::{Channel, Level, Polarity};

/// Counter top value: one cycle is 256 ticks.
pub const ARR: u16 = u8::MAX as u16;

#[derive(Clone, Copy, Debug)]
pub struct OneShot {
    timer: timer::Timer,
    psc: u16,
}

#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Prescaler register value: one tick every `psc + 1` timer clock cycles.
    pub psc: u16,
}

impl Config {
    #[inline]
    pub fn make(self, timer: timer::Timer) -> OneShot {
        OneShot::new(timer, self)
    }
}

impl OneShot {
    /// Configure the timebase, stopped.
    #[inline]
    pub fn new(mut timer: timer::Timer, config: Config) -> Self {
        timer.enable_rcc();
        timer.disable();
        timer.write_arr(ARR);
        timer.write_psc(config.psc);
        timer.generate_update();
        Self {
            timer,
            psc: config.psc,
        }
    }

    /// Handle to a timebase already configured with `config`.
    ///
    /// Used from interrupt handlers, which cannot own the timebase.
    #[inline]
    pub const fn steal(timer: timer::Timer, config: Config) -> Self {
        Self {
            timer,
            psc: config.psc,
        }
    }

    /// Reset the prescaler, place the counter one tick before wrap, and start.
    ///
    /// The first compare match at `0` happens one tick later.
    #[inline]
    pub fn restart(&mut self) {
        self.timer.disable();
        self.timer.generate_update();
        self.timer.write_counter_value(ARR);
        self.timer.enable();
    }

    #[inline]
    pub fn halt(&mut self) {
        self.timer.disable();
    }

    #[inline]
    pub fn read_counter_value(&self) -> u16 {
        self.timer.read_counter_value()
    }

    /// Timer clock cycles per tick.
    #[inline]
    pub fn prescaler(&self) -> u32 {
        self.psc as u32 + 1
    }

    /// Prescaler input clock in Hertz.
    #[inline]
    pub fn clock_speed(&self) -> u32 {
        self.timer.clock_speed()
    }

    #[inline]
    pub fn channel(&self, channel: timer::Channel) -> Channel {
        Channel::new(self.timer, channel)
    }
}
