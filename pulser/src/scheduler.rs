//! Main loop turning pending clicks into pulses.

use crate::counter::PulseCounter;
use crate::ticks::Pulse;

/// Output channel selector.
///
/// Channel A drains clockwise clicks, channel B counter-clockwise clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelId {
    A,
    B,
}

/// Pulse generator with two channels.
pub trait PulseOutput {
    /// Start one pulse on `channel`.
    fn start(&mut self, channel: ChannelId, pulse: Pulse);

    /// Block until the pulse on `channel` is finished.
    fn wait(&mut self, channel: ChannelId);
}

/// Drains the [PulseCounter], one blocking pulse per pending click.
///
/// Only one channel is ever running: a pulse is started only after the
/// previous one finished.
pub struct Scheduler<'a, P> {
    counter: &'a PulseCounter,
    output: P,
    pulse: Pulse,
}

impl<'a, P: PulseOutput> Scheduler<'a, P> {
    pub fn new(counter: &'a PulseCounter, output: P, pulse: Pulse) -> Self {
        Self {
            counter,
            output,
            pulse,
        }
    }

    /// Run forever.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// One iteration of the loop.
    ///
    /// Returns the channel that produced a pulse, if any.
    pub fn step(&mut self) -> Option<ChannelId> {
        let pending = self.counter.get();
        if pending > 0 {
            self.produce(ChannelId::A);
            // Clicks may have arrived during the pulse; the count only moves away from zero.
            self.counter.consume_positive();
            Some(ChannelId::A)
        } else if pending < 0 {
            self.produce(ChannelId::B);
            self.counter.consume_negative();
            Some(ChannelId::B)
        } else {
            core::hint::spin_loop();
            None
        }
    }

    #[inline]
    fn produce(&mut self, channel: ChannelId) {
        self.output.start(channel, self.pulse);
        self.output.wait(channel);
    }

    #[inline]
    pub fn output(&self) -> &P {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{Decoder, Direction};
    use crate::sim::Bench;
    use crate::ticks::Ticks;

    const PULSE: Pulse = Pulse::new(Ticks(1953), Ticks(1953));

    #[test]
    fn idle_at_zero() {
        let counter = PulseCounter::new(5);
        let mut scheduler = Scheduler::new(&counter, Bench::new(), PULSE);
        for _ in 0..10 {
            assert_eq!(scheduler.step(), None);
        }
        assert!(scheduler.output().pulses().is_empty());
    }

    #[test]
    fn positive_count_is_drained_on_channel_a() {
        let counter = PulseCounter::new(5);
        for _ in 0..4 {
            counter.increment();
        }
        let mut scheduler = Scheduler::new(&counter, Bench::new(), PULSE);

        for _ in 0..4 {
            assert_eq!(scheduler.step(), Some(ChannelId::A));
        }
        assert_eq!(scheduler.step(), None);
        assert_eq!(counter.get(), 0);

        let pulses = scheduler.output().pulses();
        assert_eq!(pulses.len(), 4);
        assert!(pulses.iter().all(|p| p.channel == ChannelId::A));
        assert!(scheduler.output().edges(ChannelId::B).is_empty());
    }

    #[test]
    fn negative_count_is_drained_on_channel_b() {
        let counter = PulseCounter::new(5);
        counter.decrement();
        counter.decrement();
        let mut scheduler = Scheduler::new(&counter, Bench::new(), PULSE);

        assert_eq!(scheduler.step(), Some(ChannelId::B));
        assert_eq!(counter.get(), -1);
        assert_eq!(scheduler.step(), Some(ChannelId::B));
        assert_eq!(scheduler.step(), None);

        assert!(scheduler.output().edges(ChannelId::A).is_empty());
        assert!(!scheduler.output().interrupt_enabled(ChannelId::A));
    }

    static DURING_PULSE: PulseCounter = PulseCounter::new(5);

    fn click_during_pulse() {
        DURING_PULSE.increment();
    }

    #[test]
    fn clicks_during_a_pulse_are_kept() {
        DURING_PULSE.increment();
        let mut bench = Bench::new();
        // Every pulse sees one more click, until the counter saturates.
        bench.interleave(click_during_pulse);
        let mut scheduler = Scheduler::new(&DURING_PULSE, bench, PULSE);

        assert_eq!(scheduler.step(), Some(ChannelId::A));
        assert_eq!(DURING_PULSE.get(), 1);
        assert_eq!(scheduler.step(), Some(ChannelId::A));
        assert_eq!(DURING_PULSE.get(), 1);
    }

    static END_TO_END: PulseCounter = PulseCounter::new(5);

    fn clockwise() {
        END_TO_END.increment();
    }

    fn counter_clockwise() {
        END_TO_END.decrement();
    }

    #[test]
    fn three_clicks_three_pulses() {
        let mut decoder = Decoder::new(Some(clockwise), Some(counter_clockwise));
        // Electrical levels of one clockwise detent to detent rotation.
        let rotation = [(false, true), (false, false), (true, false), (true, true)];
        for _ in 0..3 {
            let clicks: Vec<_> = rotation
                .iter()
                .filter_map(|&(a, b)| decoder.on_pin_sample(a, b))
                .collect();
            assert_eq!(clicks, vec![Direction::Clockwise]);
        }
        assert_eq!(END_TO_END.get(), 3);

        let mut scheduler = Scheduler::new(&END_TO_END, Bench::new(), PULSE);
        while scheduler.step().is_some() {}

        assert_eq!(END_TO_END.get(), 0);
        let bench = scheduler.output();
        let pulses = bench.pulses();
        assert_eq!(pulses.len(), 3);
        for p in pulses {
            assert_eq!(p.channel, ChannelId::A);
            assert_eq!(p.active, 1953);
            assert_eq!(p.inactive, 1953);
        }
        assert!(bench.is_finished(ChannelId::A));
        assert!(!bench.interrupt_enabled(ChannelId::A));
        assert!(!bench.running());
        assert!(bench.edges(ChannelId::B).is_empty());
    }
}
