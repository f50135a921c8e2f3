//! Pulse outputs on the compare channels of one timer.
//!
//! Channel A on TIM3_CH1 (PA6), channel B on TIM3_CH2 (PA7). Both are active
//! low, idle high.

use bluepill::gpio;
use bluepill::timer;
use bluepill::timer::one_shot;
use pulser::{CompareOutput, Level, PulseSlot, PulseTimer};

/// Shared timebase:
const TIMER: timer::Timer = timer::TIM3;

/// Channel A compare unit:
pub const CHANNEL_A: timer::Channel = timer::Channel::C1;

/// Channel B compare unit:
pub const CHANNEL_B: timer::Channel = timer::Channel::C2;

/// Timebase configuration.
///
/// 72MHz / 9216 = 7812.5Hz ticks, one 256 tick cycle is ~33ms.
const TIMEBASE: one_shot::Config = one_shot::Config { psc: 9215 };

/// Output configuration:
const POLARITY: one_shot::Polarity = one_shot::Polarity::ActiveLow;
const GPIO_MODE: gpio::AlternateFunctionOutputMode =
    gpio::AlternateFunctionOutputMode::PushPull(gpio::Speed::Max2MHz);

#[inline]
fn level(level: Level) -> one_shot::Level {
    match level {
        Level::Active => one_shot::Level::Active,
        Level::Inactive => one_shot::Level::Inactive,
    }
}

/// Compare unit and pin of one pulse channel.
pub struct Output(one_shot::Channel);

impl Output {
    pub const fn new(channel: timer::Channel) -> Self {
        Self(one_shot::Channel::new(TIMER, channel))
    }
}

impl CompareOutput for Output {
    #[inline]
    fn write_compare(&mut self, value: u8) {
        self.0.write_ccr(value as u16);
    }

    #[inline]
    fn output_on_match(&mut self, l: Level) {
        self.0.on_match(level(l));
    }

    #[inline]
    fn force_output(&mut self, l: Level) {
        self.0.force(level(l));
    }

    #[inline]
    fn enable_match_interrupt(&mut self, enable: bool) {
        self.0.match_interrupt_enable(enable);
    }
}

/// The timer shared by both channels.
#[derive(Clone, Copy)]
pub struct Timebase(one_shot::OneShot);

impl Timebase {
    /// Handle to the timebase configured by [init].
    pub const fn steal() -> Self {
        Self(one_shot::OneShot::steal(TIMER, TIMEBASE))
    }

    /// Timer clock cycles per tick.
    pub fn prescaler(&self) -> u32 {
        self.0.prescaler()
    }

    /// Prescaler input clock in Hertz.
    pub fn clock_speed(&self) -> u32 {
        self.0.clock_speed()
    }
}

impl PulseTimer for Timebase {
    #[inline]
    fn restart(&mut self) {
        self.0.restart();
    }

    #[inline]
    fn halt(&mut self) {
        self.0.halt();
    }
}

/// Configure the stopped timebase, and both output pins idle.
pub fn init(a: &PulseSlot<Output>, b: &PulseSlot<Output>) -> Timebase {
    let timebase = Timebase(TIMEBASE.make(TIMER));
    for &channel in [CHANNEL_A, CHANNEL_B].iter() {
        one_shot::Channel::new(TIMER, channel).configure(POLARITY, GPIO_MODE);
    }
    a.init();
    b.init();
    timebase
}

/// Timer interrupt: forward compare matches to their channel.
pub fn on_timer_interrupt(a: &PulseSlot<Output>, b: &PulseSlot<Output>) {
    let mut timebase = Timebase::steal();
    for &(channel, slot) in [(CHANNEL_A, a), (CHANNEL_B, b)].iter() {
        let mut unit = one_shot::Channel::new(TIMER, channel);
        if unit.match_pending() {
            unit.clear_match();
            slot.on_compare_match(&mut timebase);
        }
    }
}
