//! GPIO peripheral.
//!
//! Example usage:
//!
//! ```
//! clock::init();
//! gpio::enable();
//!
//! gpio::configure(PB3, gpio::Mode::InputPullUp);
//! gpio::configure(PB4, gpio::Mode::InputPullUp);
//!
//! // Both encoder lines from a single port read.
//! let levels = gpio::read_port(Port::B);
//! let (a, b) = (PB3.is_set(levels), PB4.is_set(levels));
//! ```

mod pac;
mod pinout;
mod mode;

pub use pac::{Pin, Port};
pub use pinout::*;
pub use mode::*;

use stm32f1xx_hal::pac::Peripherals as DevicePeripherals;

/// Enable GPIO ports.
///
/// Enables ports A, B and C, and enables the alternate function IO peripheral,
/// which is needed for [free_jtag()] and for [external interrupts][crate::exti].
#[inline]
pub fn enable() {
    Port::A.enable();
    Port::B.enable();
    Port::C.enable();
    enable_alternate_function_io();
}

/// GPIO pin tuple struct.
///
/// Can be used to [configure][configure()], [read][read()] from or
/// [write][write()] to a pin.
#[derive(Clone, Copy, Debug)]
pub struct Gpio(pub Port, pub Pin);

impl Gpio {
    /// Bit of this pin in a [port read][read_port()].
    #[inline]
    pub const fn mask(self) -> u16 {
        1 << self.1 as u8
    }

    /// Level of this pin in a [port read][read_port()].
    #[inline]
    pub const fn is_set(self, levels: u16) -> bool {
        (levels & self.mask()) > 0
    }
}

/// Configure the given GPIO pin mode.
#[inline]
pub fn configure(pin: Gpio, mode: Mode) {
    pac::configure(pin.0, pin.1, mode);
}

/// Set the GPIO pin value.
///
/// Assumes pin was [configured][configure] as [output][OutputMode] before calling this.
#[inline]
pub fn write(pin: Gpio, value: bool) {
    pac::write(pin.0, pin.1, value)
}

/// Read the GPIO pin value.
#[inline]
pub fn read(pin: Gpio) -> bool {
    pac::read(pin.0, pin.1)
}

/// Read all pins of a port at once.
///
/// Use [Gpio::is_set()] to pick out the pins. Pins read together are sampled
/// at the same instant.
#[inline]
pub fn read_port(port: Port) -> u16 {
    pac::read_port(port)
}

/// Enable the alternate function IO peripheral.
#[inline]
pub fn enable_alternate_function_io() {
    unsafe {
        let dp = DevicePeripherals::steal();
        dp.RCC.apb2enr.modify(|_, w| w.afioen().enabled());
    }
}

/// Remaps the JTAG pins as regular GPIO.
///
/// Frees PA15, PB3 and PB4, serial wire debug stays available.
#[inline]
pub fn free_jtag() {
    unsafe {
        let dp = DevicePeripherals::steal();
        dp.AFIO.mapr.modify(|_, w| w.swj_cfg().bits(2));
    }
}
