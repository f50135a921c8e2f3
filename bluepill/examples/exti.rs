#![no_main]
#![no_std]

extern crate panic_halt;

use bluepill::{clock, exti, gpio};
use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use stm32f1xx_hal::pac::interrupt;

// LED on PC13.
const LED_PIN: gpio::Gpio = gpio::PC13;

// Input pin on PA0, pulled up: connect to ground to switch the LED on.
const INPUT_PIN: gpio::Gpio = gpio::PA0;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        let _ = hprintln!("Hello! This is the EXTI example.");
    }

    // System setup.
    unsafe {
        clock::init();
    }
    gpio::enable();

    // Configure GPIO modes.
    gpio::configure(LED_PIN, gpio::OutputMode::PushPull(gpio::Speed::Max2MHz).into());
    gpio::configure(INPUT_PIN, gpio::InputMode::InputPullUp.into());

    // Interrupt on both edges of the input.
    exti::configure(INPUT_PIN, exti::Edge::Both);
    unsafe { NVIC::unmask(exti::interrupt(INPUT_PIN)) };

    loop {
        cortex_m::asm::wfi();
    }
}

/// EXTI0 interrupt: mirror the input on the LED.
#[interrupt]
fn EXTI0() {
    exti::clear_pending(INPUT_PIN);
    // LED is on when its pin is low, the input is low when pressed.
    gpio::write(LED_PIN, gpio::read(INPUT_PIN));
}
