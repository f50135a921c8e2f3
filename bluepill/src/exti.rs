//! External interrupts on GPIO pins.
//!
//! Each line `0..=15` can watch the pin with the same number on one port.
//!
//! Example usage:
//!
//! ```
//! gpio::enable();
//! gpio::configure(PB3, gpio::Mode::InputPullUp);
//!
//! exti::configure(PB3, exti::Edge::Both);
//! unsafe { NVIC::unmask(exti::interrupt(PB3)) };
//!
//! // In the interrupt handler:
//! if exti::is_pending(PB3) {
//!     exti::clear_pending(PB3);
//! }
//! ```

use crate::gpio::Gpio;
use stm32f1xx_hal::pac::{Interrupt, Peripherals as DevicePeripherals};

/// Pin edges triggering the interrupt.
#[derive(Clone, Copy, Debug)]
pub enum Edge {
    Rising,
    Falling,
    Both,
}

/// Route the pin to its line, select the edges, and unmask the line.
///
/// Assumes the alternate function IO peripheral is [enabled][crate::gpio::enable()].
pub fn configure(pin: Gpio, edge: Edge) {
    let line = pin.1 as u32;
    let mask = 1 << line;
    // Four lines per AFIO_EXTICR register, four bits per line.
    let shift = (line % 4) * 4;
    let code = pin.0.code() << shift;
    let clear = !(15 << shift);
    let (rising, falling) = match edge {
        Edge::Rising => (true, false),
        Edge::Falling => (false, true),
        Edge::Both => (true, true),
    };
    unsafe {
        let dp = DevicePeripherals::steal();
        match line / 4 {
            0 => dp.AFIO.exticr1.modify(|r, w| w.bits((r.bits() & clear) | code)),
            1 => dp.AFIO.exticr2.modify(|r, w| w.bits((r.bits() & clear) | code)),
            2 => dp.AFIO.exticr3.modify(|r, w| w.bits((r.bits() & clear) | code)),
            _ => dp.AFIO.exticr4.modify(|r, w| w.bits((r.bits() & clear) | code)),
        }
        dp.EXTI.rtsr.modify(|r, w| w.bits(set_bit(r.bits(), mask, rising)));
        dp.EXTI.ftsr.modify(|r, w| w.bits(set_bit(r.bits(), mask, falling)));
        // Drop an edge seen before configuration.
        dp.EXTI.pr.write(|w| w.bits(mask));
        dp.EXTI.imr.modify(|r, w| w.bits(r.bits() | mask));
    }
}

/// Mask the line of the pin.
pub fn disable(pin: Gpio) {
    let mask = 1 << pin.1 as u32;
    unsafe {
        let dp = DevicePeripherals::steal();
        dp.EXTI.imr.modify(|r, w| w.bits(r.bits() & !mask));
    }
}

/// Whether the line of the pin saw a selected edge.
#[inline]
pub fn is_pending(pin: Gpio) -> bool {
    let mask = 1 << pin.1 as u32;
    unsafe {
        let dp = DevicePeripherals::steal();
        (dp.EXTI.pr.read().bits() & mask) > 0
    }
}

/// Clear the pending edge. Must be done in the interrupt handler.
#[inline]
pub fn clear_pending(pin: Gpio) {
    let mask = 1 << pin.1 as u32;
    unsafe {
        let dp = DevicePeripherals::steal();
        dp.EXTI.pr.write(|w| w.bits(mask));
    }
}

/// NVIC interrupt serving the line of the pin.
///
/// Lines `5..=9` and `10..=15` share one interrupt each.
pub fn interrupt(pin: Gpio) -> Interrupt {
    match pin.1 as u8 {
        0 => Interrupt::EXTI0,
        1 => Interrupt::EXTI1,
        2 => Interrupt::EXTI2,
        3 => Interrupt::EXTI3,
        4 => Interrupt::EXTI4,
        5..=9 => Interrupt::EXTI9_5,
        _ => Interrupt::EXTI15_10,
    }
}

#[inline]
fn set_bit(bits: u32, mask: u32, value: bool) -> u32 {
    if value {
        bits | mask
    } else {
        bits & !mask
    }
}
