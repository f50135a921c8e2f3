#![no_main]
#![no_std]

mod knob;
mod outputs;

extern crate panic_halt;

use bluepill::{clock, delay, gpio};
use core::cell::RefCell;
use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use critical_section::Mutex;
use outputs::Output;
use pulser::{Decoder, Pulse, PulseChannel, PulseCounter, PulsePair, PulseSlot, Scheduler, Ticks};
use stm32f1xx_hal::pac::interrupt;
use stm32f1xx_hal::pac::Interrupt;

/// Pulse timing, identical for both channels:
const PULSE_ON_MS: u32 = 250;
const PULSE_OFF_MS: u32 = 250;

/// Clicks beyond this many pending pulses are dropped.
const PULSES_MAX: i8 = 5;

/// Pending pulses: positive for channel A, negative for channel B.
static PULSES: PulseCounter = PulseCounter::new(PULSES_MAX);

/// Encoder decoder, stepped by the pin change interrupts.
static KNOB: Mutex<RefCell<Decoder>> = Mutex::new(RefCell::new(Decoder::new(None, None)));

/// Pulse channels, stepped by the timer interrupt.
static CHANNEL_A: PulseSlot<Output> =
    PulseSlot::new(PulseChannel::new(Output::new(outputs::CHANNEL_A)));
static CHANNEL_B: PulseSlot<Output> =
    PulseSlot::new(PulseChannel::new(Output::new(outputs::CHANNEL_B)));

fn clockwise() {
    PULSES.increment();
}

fn counter_clockwise() {
    PULSES.decrement();
}

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        let _ = hprintln!("Hello knob!");
    }

    // Clock and gpio setup.
    unsafe {
        clock::init();
    }
    gpio::enable();
    gpio::free_jtag();

    // Wait for peripherals to enable.
    delay::millis(1);

    // Outputs idle before the encoder can request pulses.
    let timebase = outputs::init(&CHANNEL_A, &CHANNEL_B);
    let pulse = Pulse::new(
        Ticks::from_millis(PULSE_ON_MS, timebase.clock_speed(), timebase.prescaler()),
        Ticks::from_millis(PULSE_OFF_MS, timebase.clock_speed(), timebase.prescaler()),
    );
    if cfg!(debug_assertions) {
        let _ = hprintln!(
            "Pulse: {} ticks on, {} ticks off",
            pulse.active.get(),
            pulse.inactive.get()
        );
    }

    // Encoder:
    let knob_interrupts = knob::init();
    critical_section::with(|cs| {
        let mut knob = KNOB.borrow(cs).borrow_mut();
        knob.set_clockwise_callback(Some(clockwise));
        knob.set_counter_clockwise_callback(Some(counter_clockwise));
    });

    // Enable interrupts.
    unsafe {
        NVIC::unmask(Interrupt::TIM3);
        for &i in knob_interrupts.iter() {
            NVIC::unmask(i);
        }
    }

    if cfg!(debug_assertions) {
        let _ = hprintln!("Running.");
    }

    Scheduler::new(&PULSES, PulsePair::new(&CHANNEL_A, &CHANNEL_B, timebase), pulse).run()
}

/// EXTI3 interrupt: encoder line A.
#[interrupt]
fn EXTI3() {
    knob::on_edge(&KNOB);
}

/// EXTI4 interrupt: encoder line B.
#[interrupt]
fn EXTI4() {
    knob::on_edge(&KNOB);
}

/// TIMER3 interrupt: compare matches of both pulse channels.
#[interrupt]
fn TIM3() {
    outputs::on_timer_interrupt(&CHANNEL_A, &CHANNEL_B);
}
