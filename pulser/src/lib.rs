//! Rotary encoder to pulse train core.
//!
//! Hardware independent part of the knob pulser firmware:
//!
//! - [decoder]: quadrature decoder, fed from the pin-change interrupts.
//! - [channel]: one-shot pulse engine, stepped by the timer compare interrupts.
//! - [counter]: bounded pulse counter shared between interrupts and the main loop.
//! - [scheduler]: main loop that turns the counter into pulses.
//!
//! The hardware is reached through the [CompareOutput], [PulseTimer] and
//! [PulseOutput] traits.

#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod counter;
pub mod decoder;
pub mod scheduler;
pub mod ticks;

#[cfg(test)]
mod sim;

pub use channel::{CompareOutput, Level, Phase, PulseChannel, PulsePair, PulseSlot, PulseTimer};
pub use counter::PulseCounter;
pub use decoder::{Callback, Decoder, Direction};
pub use scheduler::{ChannelId, PulseOutput, Scheduler};
pub use ticks::{Pulse, Ticks, CYCLE};
