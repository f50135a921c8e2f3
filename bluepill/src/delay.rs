//! Busy wait delays.

use crate::clock::SPEED;

/// Core cycles per millisecond at the [system clock][crate::clock::init()] speed.
const MILLIS_COUNT: u32 = SPEED / 1_000;

pub use cortex_m::asm::delay;

/// Blocks program for *atleast* `count` milliseconds.
#[inline]
pub fn millis(count: u32) {
    delay(MILLIS_COUNT * count);
}
