//! One-shot pulse channels on a shared 8-bit timer.
//!
//! Each channel drives one compare output. A pulse is started by arming the
//! channel and restarting the timer; from then on every compare match of that
//! channel runs [PulseChannel::on_compare_match()], which reprograms the
//! comparator until both the active and the inactive time have elapsed.
//!
//! The comparator only spans one timer cycle of [CYCLE] ticks. Longer
//! durations are built by letting the comparator match at the same value once
//! per cycle and counting the cycles down:
//!
//! ```text
//!   start     active edge                inactive edge             finished
//!     |            |<------- active -------->|<------ inactive ------->|
//!     |  count: 255 -> 0 ... 0 ... active.low ... 0 ... 0 ... inactive.low
//!     |       ActiveStart (per cycle)   InactiveStart  InactiveContinue  InactiveFinish
//! ```

use crate::scheduler::{ChannelId, PulseOutput};
use crate::ticks::{Pulse, Ticks, CYCLE};
use core::cell::RefCell;
use critical_section::Mutex;

/// Logical output level.
///
/// The electrical level (active low or high) is decided by the output hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Active,
    Inactive,
}

/// One compare unit of the shared timer, with its output pin.
pub trait CompareOutput {
    /// Program the compare value.
    fn write_compare(&mut self, value: u8);

    /// Drive the pin to `level` on the next compare match.
    fn output_on_match(&mut self, level: Level);

    /// Drive the pin to `level` now.
    fn force_output(&mut self, level: Level);

    /// Enable or disable the compare match interrupt.
    ///
    /// Also clears a pending match flag, so a stale match cannot fire right after enabling.
    fn enable_match_interrupt(&mut self, enable: bool);
}

/// The 8-bit timer shared by both channels.
pub trait PulseTimer {
    /// Reset the prescaler, set the count one tick before wrap, and run.
    fn restart(&mut self);

    /// Stop counting.
    fn halt(&mut self);
}

/// Stage of the pulse, advanced on every compare match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Output just went active (or a full active cycle passed).
    ActiveStart,
    /// Output just went inactive.
    InactiveStart,
    /// A full inactive cycle passed.
    InactiveContinue,
    /// The inactive time elapsed.
    InactiveFinish,
}

/// Pulse state of one output channel.
#[derive(Debug)]
pub struct PulseChannel<C> {
    output: C,
    /// Remaining active time.
    active: Ticks,
    /// Remaining inactive time.
    inactive: Ticks,
    phase: Phase,
    finished: bool,
}

impl<C> PulseChannel<C> {
    /// New idle channel.
    ///
    /// Call [init][PulseChannel::init()] before the first pulse.
    pub const fn new(output: C) -> Self {
        Self {
            output,
            active: Ticks(0),
            inactive: Ticks(0),
            phase: Phase::InactiveFinish,
            finished: true,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn output(&self) -> &C {
        &self.output
    }
}

impl<C: CompareOutput> PulseChannel<C> {
    /// Force the output inactive, and keep it inactive on matches.
    pub fn init(&mut self) {
        self.output.output_on_match(Level::Inactive);
        self.output.force_output(Level::Inactive);
    }

    /// Prepare a new pulse.
    ///
    /// The output goes active on the first match at count `0`. The shared
    /// timer must be [restarted][PulseTimer::restart()] afterwards.
    ///
    /// Must not be called while a pulse is in flight on this channel.
    pub fn arm(&mut self, pulse: Pulse) {
        self.active = pulse.active;
        self.inactive = pulse.inactive;
        self.phase = Phase::ActiveStart;
        self.finished = false;
        self.output.write_compare(0);
        self.output.output_on_match(Level::Active);
        self.output.enable_match_interrupt(true);
    }

    /// Compare match interrupt handler of this channel.
    pub fn on_compare_match<T: PulseTimer>(&mut self, timer: &mut T) {
        match self.phase {
            Phase::ActiveStart => {
                if self.active.fits_cycle() {
                    self.output.output_on_match(Level::Inactive);
                    self.output.write_compare(self.active.low());
                    self.phase = Phase::InactiveStart;
                } else {
                    self.active.drop_cycle();
                }
            }
            Phase::InactiveStart => {
                // Ticks left until the count wraps back to 0.
                let remainder = CYCLE - self.active.low() as u16;
                if self.inactive.get() <= remainder {
                    self.output
                        .write_compare(self.active.low().wrapping_add(self.inactive.low()));
                    self.phase = Phase::InactiveFinish;
                } else {
                    self.inactive = Ticks(self.inactive.get() - remainder);
                    self.output.write_compare(0);
                    self.phase = Phase::InactiveContinue;
                }
            }
            Phase::InactiveContinue => {
                if self.inactive.fits_cycle() {
                    self.output.write_compare(self.inactive.low());
                    self.phase = Phase::InactiveFinish;
                } else {
                    self.inactive.drop_cycle();
                }
            }
            Phase::InactiveFinish => {
                self.output.enable_match_interrupt(false);
                timer.halt();
                self.finished = true;
            }
        }
    }
}

/// A [PulseChannel] reachable from both the main loop and its interrupt.
pub struct PulseSlot<C> {
    channel: Mutex<RefCell<PulseChannel<C>>>,
}

impl<C> PulseSlot<C> {
    pub const fn new(channel: PulseChannel<C>) -> Self {
        Self {
            channel: Mutex::new(RefCell::new(channel)),
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        critical_section::with(|cs| self.channel.borrow(cs).borrow().is_finished())
    }

    /// Block until the current pulse is finished.
    ///
    /// Busy waits, the pulse is driven by interrupts.
    pub fn wait(&self) {
        while !self.is_finished() {
            core::hint::spin_loop();
        }
    }
}

impl<C: CompareOutput> PulseSlot<C> {
    /// See [PulseChannel::init()].
    pub fn init(&self) {
        critical_section::with(|cs| self.channel.borrow(cs).borrow_mut().init());
    }

    /// Arm the channel and restart the shared timer.
    pub fn start<T: PulseTimer>(&self, pulse: Pulse, timer: &mut T) {
        critical_section::with(|cs| {
            self.channel.borrow(cs).borrow_mut().arm(pulse);
            timer.restart();
        });
    }

    /// Forward a compare match interrupt to the channel.
    pub fn on_compare_match<T: PulseTimer>(&self, timer: &mut T) {
        critical_section::with(|cs| {
            self.channel
                .borrow(cs)
                .borrow_mut()
                .on_compare_match(timer)
        });
    }
}

/// Both channels of the shared timer, as seen by the [Scheduler][crate::Scheduler].
pub struct PulsePair<'a, C, T> {
    a: &'a PulseSlot<C>,
    b: &'a PulseSlot<C>,
    timer: T,
}

impl<'a, C, T> PulsePair<'a, C, T> {
    pub fn new(a: &'a PulseSlot<C>, b: &'a PulseSlot<C>, timer: T) -> Self {
        Self { a, b, timer }
    }

    #[inline]
    fn slot(&self, channel: ChannelId) -> &'a PulseSlot<C> {
        match channel {
            ChannelId::A => self.a,
            ChannelId::B => self.b,
        }
    }
}

impl<'a, C: CompareOutput, T: PulseTimer> PulseOutput for PulsePair<'a, C, T> {
    fn start(&mut self, channel: ChannelId, pulse: Pulse) {
        self.slot(channel).start(pulse, &mut self.timer);
    }

    fn wait(&mut self, channel: ChannelId) {
        self.slot(channel).wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Hardware, SimCompare, SimTimer};

    fn pulse(active: u16, inactive: u16) -> Pulse {
        Pulse::new(Ticks(active), Ticks(inactive))
    }

    /// Run one pulse on unit 0, returns (active ticks, inactive ticks).
    fn measure(active: u16, inactive: u16) -> (u32, u32) {
        let hw = Hardware::new();
        let mut timer = SimTimer::new(&hw);
        let mut channel = PulseChannel::new(SimCompare::new(&hw, 0));
        channel.init();

        channel.arm(pulse(active, inactive));
        timer.restart();
        let end = hw.run(&mut channel, &mut timer, 1 << 20);

        let edges = hw.edges(0);
        assert_eq!(edges.len(), 2, "edges: {:?}", edges);
        assert_eq!(edges[0].1, Level::Active);
        assert_eq!(edges[1].1, Level::Inactive);
        (edges[1].0 - edges[0].0, end - edges[1].0)
    }

    #[test]
    fn multi_cycle_active_time() {
        let hw = Hardware::new();
        let mut timer = SimTimer::new(&hw);
        let mut channel = PulseChannel::new(SimCompare::new(&hw, 0));
        channel.init();
        channel.arm(pulse(300, 1953));
        timer.restart();

        // Active edge at count 0: 300 ticks do not fit, one cycle is chained.
        hw.step(&mut channel, &mut timer);
        assert_eq!(hw.now(), 1);
        assert_eq!(channel.phase(), Phase::ActiveStart);
        assert_eq!(hw.compare(0), 0);

        // One cycle later: the remaining 44 ticks fit.
        hw.step(&mut channel, &mut timer);
        assert_eq!(hw.now(), 257);
        assert_eq!(channel.phase(), Phase::InactiveStart);
        assert_eq!(hw.compare(0), 44);

        let end = hw.run(&mut channel, &mut timer, 1 << 20);
        let edges = hw.edges(0);
        assert_eq!(edges, vec![(1, Level::Active), (301, Level::Inactive)]);
        assert_eq!(end - 301, 1953);
    }

    #[test]
    fn durations() {
        assert_eq!(measure(1, 1), (1, 1));
        assert_eq!(measure(44, 212), (44, 212));
        assert_eq!(measure(255, 2), (255, 2));
        assert_eq!(measure(256, 256), (256, 256));
        assert_eq!(measure(257, 300), (257, 300));
        assert_eq!(measure(512, 100), (512, 100));
        assert_eq!(measure(1953, 1953), (1953, 1953));
        assert_eq!(measure(0x1234, 0x0100), (0x1234, 0x0100));
    }

    #[test]
    fn zero_is_a_full_cycle() {
        assert_eq!(measure(0, 0), (256, 256));
    }

    #[test]
    fn finish_stops_everything() {
        let hw = Hardware::new();
        let mut timer = SimTimer::new(&hw);
        let mut channel = PulseChannel::new(SimCompare::new(&hw, 0));
        channel.init();
        assert!(channel.is_finished());

        channel.arm(pulse(10, 10));
        assert!(!channel.is_finished());
        timer.restart();
        hw.run(&mut channel, &mut timer, 1 << 12);

        assert!(channel.is_finished());
        assert_eq!(channel.phase(), Phase::InactiveFinish);
        assert!(!hw.running());
        assert!(!hw.interrupt_enabled(0));
        assert_eq!(hw.level(0), Level::Inactive);
    }

    #[test]
    fn other_unit_untouched() {
        let hw = Hardware::new();
        let mut timer = SimTimer::new(&hw);
        let mut a = PulseChannel::new(SimCompare::new(&hw, 0));
        let mut b = PulseChannel::new(SimCompare::new(&hw, 1));
        a.init();
        b.init();

        a.arm(pulse(600, 600));
        timer.restart();
        hw.run(&mut a, &mut timer, 1 << 12);

        assert!(hw.edges(1).is_empty());
        assert!(!hw.interrupt_enabled(1));
        assert_eq!(hw.level(1), Level::Inactive);
    }

    #[test]
    fn init_forces_inactive() {
        let hw = Hardware::new();
        hw.set_level(0, Level::Active);
        let mut channel = PulseChannel::new(SimCompare::new(&hw, 0));
        channel.init();
        assert_eq!(hw.level(0), Level::Inactive);
    }

    #[test]
    fn slot_start_and_wait() {
        let hw = Hardware::new();
        let mut timer = SimTimer::new(&hw);
        let slot = PulseSlot::new(PulseChannel::new(SimCompare::new(&hw, 0)));
        slot.init();

        slot.start(pulse(300, 300), &mut timer);
        assert!(hw.running());
        assert!(!slot.is_finished());

        while !slot.is_finished() {
            if hw.tick()[0] {
                slot.on_compare_match(&mut timer);
            }
        }
        slot.wait();
        assert_eq!(hw.restarts(), 1);
        assert_eq!(hw.edges(0), vec![(1, Level::Active), (301, Level::Inactive)]);
    }
}
