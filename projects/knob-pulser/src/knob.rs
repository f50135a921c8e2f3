//! Rotary encoder inputs.
//!
//! Both lines are on the same port, so one port read samples them together.
//! Contacts close to ground: lines are pulled up and active low.

use bluepill::{exti, gpio};
use core::cell::RefCell;
use critical_section::Mutex;
use pulser::Decoder;
use stm32f1xx_hal::pac::Interrupt;

/// Encoder line A (JTAG pin, must be freed):
const LINE_A: gpio::Gpio = gpio::PB3;

/// Encoder line B (JTAG pin, must be freed):
const LINE_B: gpio::Gpio = gpio::PB4;

/// Configure both lines to interrupt on every edge.
///
/// Returns the interrupts to unmask.
pub fn init() -> [Interrupt; 2] {
    for &line in [LINE_A, LINE_B].iter() {
        gpio::configure(line, gpio::InputMode::InputPullUp.into());
        exti::configure(line, exti::Edge::Both);
    }
    [exti::interrupt(LINE_A), exti::interrupt(LINE_B)]
}

/// Pin change interrupt: feed both line levels to the decoder.
pub fn on_edge(decoder: &Mutex<RefCell<Decoder>>) {
    for &line in [LINE_A, LINE_B].iter() {
        if exti::is_pending(line) {
            exti::clear_pending(line);
        }
    }
    let levels = gpio::read_port(LINE_A.0);
    critical_section::with(|cs| {
        decoder
            .borrow(cs)
            .borrow_mut()
            .on_pin_sample(LINE_A.is_set(levels), LINE_B.is_set(levels));
    });
}
