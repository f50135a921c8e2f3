//! Quadrature decoder.
//!
//! Fed with both encoder line levels on every edge of either line. A click is
//! reported once four consistent quadrature steps have been seen in the same
//! direction. Contact bounce maps to zero steps in the transition table, and
//! half-finished rotations are dropped once the encoder rests at a detent.

/// Rotation event handler.
pub type Callback = fn();

/// Rotation direction of one click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Step for each `previous << 2 | current` pair of 2-bit samples.
///
/// Clockwise is `00 -> 01 -> 11 -> 10 -> 00`: line A leads.
#[rustfmt::skip]
const TRANSITIONS: [i8; 16] = [
     0,  1, -1,  0,
    -1,  0,  0,  1,
     1,  0,  0, -1,
     0, -1,  1,  0,
];

/// Steps needed before a click is reported.
const STEPS_PER_CLICK: i8 = 4;

/// Quadrature decoder state.
///
/// Lives in interrupt context: call [on_pin_sample][Decoder::on_pin_sample()] from
/// the pin-change interrupt of both encoder lines.
#[derive(Debug)]
pub struct Decoder {
    /// Last two logical samples, `previous << 2 | current`.
    history: u8,
    /// Net steps since the last click or detent.
    accumulator: i8,
    clockwise: Option<Callback>,
    counter_clockwise: Option<Callback>,
}

impl Decoder {
    pub const fn new(clockwise: Option<Callback>, counter_clockwise: Option<Callback>) -> Self {
        Self {
            history: 0,
            accumulator: 0,
            clockwise,
            counter_clockwise,
        }
    }

    pub fn set_clockwise_callback(&mut self, callback: Option<Callback>) {
        self.clockwise = callback;
    }

    pub fn set_counter_clockwise_callback(&mut self, callback: Option<Callback>) {
        self.counter_clockwise = callback;
    }

    /// Feed the raw electrical levels of both lines.
    ///
    /// Lines are active low: `true` means the contact is open.
    ///
    /// Returns the direction of a completed click, after running its callback.
    pub fn on_pin_sample(&mut self, line_a: bool, line_b: bool) -> Option<Direction> {
        let bits = (!line_b as u8) << 1 | (!line_a as u8);
        self.history = ((self.history << 2) | bits) & 0xf;
        self.accumulator += TRANSITIONS[self.history as usize];

        let click = if self.accumulator >= STEPS_PER_CLICK {
            self.accumulator = 0;
            if let Some(callback) = self.clockwise {
                callback();
            }
            Some(Direction::Clockwise)
        } else if self.accumulator <= -STEPS_PER_CLICK {
            self.accumulator = 0;
            if let Some(callback) = self.counter_clockwise {
                callback();
            }
            Some(Direction::CounterClockwise)
        } else {
            None
        };

        // Both lines rested over two samples: at a detent.
        if self.history == 0 {
            self.accumulator = 0;
        }
        click
    }

    #[inline]
    pub fn accumulator(&self) -> i8 {
        self.accumulator
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(None, None)
    }
}
