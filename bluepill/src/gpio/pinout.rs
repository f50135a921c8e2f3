//! Blue pill pin names.

use super::{Gpio, Pin, Port};

pub const PA0: Gpio = Gpio(Port::A, Pin::P0);
pub const PA1: Gpio = Gpio(Port::A, Pin::P1);
pub const PA2: Gpio = Gpio(Port::A, Pin::P2);
pub const PA3: Gpio = Gpio(Port::A, Pin::P3);
pub const PA4: Gpio = Gpio(Port::A, Pin::P4);
pub const PA5: Gpio = Gpio(Port::A, Pin::P5);
pub const PA6: Gpio = Gpio(Port::A, Pin::P6);
pub const PA7: Gpio = Gpio(Port::A, Pin::P7);
pub const PA8: Gpio = Gpio(Port::A, Pin::P8);
pub const PA9: Gpio = Gpio(Port::A, Pin::P9);
pub const PA10: Gpio = Gpio(Port::A, Pin::P10);
pub const PA11: Gpio = Gpio(Port::A, Pin::P11);
pub const PA12: Gpio = Gpio(Port::A, Pin::P12);
pub const PA13: Gpio = Gpio(Port::A, Pin::P13);
pub const PA14: Gpio = Gpio(Port::A, Pin::P14);
pub const PA15: Gpio = Gpio(Port::A, Pin::P15);

pub const PB0: Gpio = Gpio(Port::B, Pin::P0);
pub const PB1: Gpio = Gpio(Port::B, Pin::P1);
pub const PB2: Gpio = Gpio(Port::B, Pin::P2);
pub const PB3: Gpio = Gpio(Port::B, Pin::P3);
pub const PB4: Gpio = Gpio(Port::B, Pin::P4);
pub const PB5: Gpio = Gpio(Port::B, Pin::P5);
pub const PB6: Gpio = Gpio(Port::B, Pin::P6);
pub const PB7: Gpio = Gpio(Port::B, Pin::P7);
pub const PB8: Gpio = Gpio(Port::B, Pin::P8);
pub const PB9: Gpio = Gpio(Port::B, Pin::P9);
pub const PB10: Gpio = Gpio(Port::B, Pin::P10);
pub const PB11: Gpio = Gpio(Port::B, Pin::P11);
pub const PB12: Gpio = Gpio(Port::B, Pin::P12);
pub const PB13: Gpio = Gpio(Port::B, Pin::P13);
pub const PB14: Gpio = Gpio(Port::B, Pin::P14);
pub const PB15: Gpio = Gpio(Port::B, Pin::P15);

pub const PC13: Gpio = Gpio(Port::C, Pin::P13);
pub const PC14: Gpio = Gpio(Port::C, Pin::P14);
pub const PC15: Gpio = Gpio(Port::C, Pin::P15);
