//! Tick-exact model of the shared 8-bit timer, for tests.
//!
//! The count advances by one per [tick][Hardware::tick()]. When it equals a
//! unit's compare value the unit's pin takes the programmed level and, if
//! enabled, the unit's interrupt is reported to the caller, who runs the
//! channel handler before the next tick.

use crate::channel::{CompareOutput, Level, PulseChannel, PulseTimer};
use crate::scheduler::{ChannelId, PulseOutput};
use crate::ticks::Pulse;
use std::cell::RefCell;
use std::rc::Rc;

const TICK_LIMIT: u32 = 1 << 22;

#[derive(Debug)]
struct Unit {
    compare: u8,
    on_match: Level,
    pin: Level,
    interrupt: bool,
    edges: Vec<(u32, Level)>,
}

impl Unit {
    fn new() -> Self {
        Self {
            compare: 0,
            on_match: Level::Inactive,
            pin: Level::Inactive,
            interrupt: false,
            edges: Vec::new(),
        }
    }

    fn drive(&mut self, now: u32, level: Level) {
        if self.pin != level {
            self.pin = level;
            self.edges.push((now, level));
        }
    }
}

#[derive(Debug)]
struct State {
    now: u32,
    count: u8,
    running: bool,
    restarts: u32,
    units: [Unit; 2],
}

/// Simulated timer with two compare units.
#[derive(Clone, Debug)]
pub struct Hardware(Rc<RefCell<State>>);

impl Hardware {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(State {
            now: 0,
            count: 0,
            running: false,
            restarts: 0,
            units: [Unit::new(), Unit::new()],
        })))
    }

    /// Advance one tick. Returns which units request an interrupt.
    pub fn tick(&self) -> [bool; 2] {
        let mut s = self.0.borrow_mut();
        let mut fired = [false; 2];
        if !s.running {
            return fired;
        }
        s.now += 1;
        s.count = s.count.wrapping_add(1);
        let (now, count) = (s.now, s.count);
        for (i, unit) in s.units.iter_mut().enumerate() {
            if unit.compare == count {
                let level = unit.on_match;
                unit.drive(now, level);
                fired[i] = unit.interrupt;
            }
        }
        fired
    }

    /// Tick until `channel` gets one interrupt, and run its handler.
    pub fn step(&self, channel: &mut PulseChannel<SimCompare>, timer: &mut SimTimer) {
        let unit = channel.output().unit;
        for _ in 0..TICK_LIMIT {
            if self.tick()[unit] {
                channel.on_compare_match(timer);
                return;
            }
        }
        panic!("unit {} never matched", unit);
    }

    /// Step `channel` until finished. Returns the finishing tick.
    pub fn run(
        &self,
        channel: &mut PulseChannel<SimCompare>,
        timer: &mut SimTimer,
        limit: u32,
    ) -> u32 {
        while !channel.is_finished() {
            self.step(channel, timer);
            assert!(self.now() <= limit, "pulse did not finish");
        }
        self.now()
    }

    pub fn now(&self) -> u32 {
        self.0.borrow().now
    }

    pub fn running(&self) -> bool {
        self.0.borrow().running
    }

    pub fn restarts(&self) -> u32 {
        self.0.borrow().restarts
    }

    pub fn compare(&self, unit: usize) -> u8 {
        self.0.borrow().units[unit].compare
    }

    pub fn level(&self, unit: usize) -> Level {
        self.0.borrow().units[unit].pin
    }

    pub fn set_level(&self, unit: usize, level: Level) {
        self.0.borrow_mut().units[unit].pin = level;
    }

    pub fn interrupt_enabled(&self, unit: usize) -> bool {
        self.0.borrow().units[unit].interrupt
    }

    pub fn edges(&self, unit: usize) -> Vec<(u32, Level)> {
        self.0.borrow().units[unit].edges.clone()
    }
}

/// Compare unit of the [Hardware].
#[derive(Debug)]
pub struct SimCompare {
    hw: Hardware,
    unit: usize,
}

impl SimCompare {
    pub fn new(hw: &Hardware, unit: usize) -> Self {
        Self {
            hw: hw.clone(),
            unit,
        }
    }
}

impl CompareOutput for SimCompare {
    fn write_compare(&mut self, value: u8) {
        self.hw.0.borrow_mut().units[self.unit].compare = value;
    }

    fn output_on_match(&mut self, level: Level) {
        self.hw.0.borrow_mut().units[self.unit].on_match = level;
    }

    fn force_output(&mut self, level: Level) {
        let mut s = self.hw.0.borrow_mut();
        let now = s.now;
        s.units[self.unit].drive(now, level);
    }

    fn enable_match_interrupt(&mut self, enable: bool) {
        self.hw.0.borrow_mut().units[self.unit].interrupt = enable;
    }
}

/// Counter control of the [Hardware].
#[derive(Debug)]
pub struct SimTimer {
    hw: Hardware,
}

impl SimTimer {
    pub fn new(hw: &Hardware) -> Self {
        Self { hw: hw.clone() }
    }
}

impl PulseTimer for SimTimer {
    fn restart(&mut self) {
        let mut s = self.hw.0.borrow_mut();
        s.count = u8::MAX;
        s.running = true;
        s.restarts += 1;
    }

    fn halt(&mut self) {
        self.hw.0.borrow_mut().running = false;
    }
}

/// A pulse measured on the [Bench].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measured {
    pub channel: ChannelId,
    pub active: u32,
    pub inactive: u32,
}

/// Both channels on the simulated timer, driven like the firmware drives them.
pub struct Bench {
    hw: Hardware,
    timer: SimTimer,
    channels: [PulseChannel<SimCompare>; 2],
    pulses: Vec<Measured>,
    interleave: Option<fn()>,
}

fn unit(channel: ChannelId) -> usize {
    match channel {
        ChannelId::A => 0,
        ChannelId::B => 1,
    }
}

impl Bench {
    pub fn new() -> Self {
        let hw = Hardware::new();
        let mut channels = [
            PulseChannel::new(SimCompare::new(&hw, 0)),
            PulseChannel::new(SimCompare::new(&hw, 1)),
        ];
        channels.iter_mut().for_each(|c| c.init());
        Self {
            timer: SimTimer::new(&hw),
            hw,
            channels,
            pulses: Vec::new(),
            interleave: None,
        }
    }

    /// Run `f` once while each pulse is in flight, like an interrupt would.
    pub fn interleave(&mut self, f: fn()) {
        self.interleave = Some(f);
    }

    pub fn pulses(&self) -> &[Measured] {
        &self.pulses
    }

    pub fn edges(&self, channel: ChannelId) -> Vec<(u32, Level)> {
        self.hw.edges(unit(channel))
    }

    pub fn interrupt_enabled(&self, channel: ChannelId) -> bool {
        self.hw.interrupt_enabled(unit(channel))
    }

    pub fn is_finished(&self, channel: ChannelId) -> bool {
        self.channels[unit(channel)].is_finished()
    }

    pub fn running(&self) -> bool {
        self.hw.running()
    }
}

impl PulseOutput for Bench {
    fn start(&mut self, channel: ChannelId, pulse: Pulse) {
        self.channels[unit(channel)].arm(pulse);
        self.timer.restart();
    }

    fn wait(&mut self, channel: ChannelId) {
        let i = unit(channel);
        let first_edge = self.hw.edges(i).len();
        if let Some(f) = self.interleave {
            f();
        }
        let mut ticks = 0;
        while !self.channels[i].is_finished() {
            let fired = self.hw.tick();
            for (u, &f) in fired.iter().enumerate() {
                if f {
                    self.channels[u].on_compare_match(&mut self.timer);
                }
            }
            ticks += 1;
            assert!(ticks < TICK_LIMIT, "pulse did not finish");
        }

        let edges = self.hw.edges(i);
        let edges = &edges[first_edge..];
        assert_eq!(edges.len(), 2, "edges: {:?}", edges);
        self.pulses.push(Measured {
            channel,
            active: edges[1].0 - edges[0].0,
            inactive: self.hw.now() - edges[1].0,
        });
    }
}
