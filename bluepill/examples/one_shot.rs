#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use bluepill::{
    clock, delay, gpio,
    timer::{self, one_shot, TIM3},
};

#[entry]
fn main() -> ! {
    unsafe {
        clock::init();
    }
    gpio::enable();

    // 72MHz / 7200 = 10kHz ticks.
    let config = one_shot::Config { psc: 7199 };
    let mut timebase = config.make(TIM3);

    // Output idles high on PA6.
    let mut channel = timebase.channel(timer::Channel::C1);
    channel.configure(
        one_shot::Polarity::ActiveLow,
        gpio::AlternateFunctionOutputMode::PushPull(gpio::Speed::Max2MHz),
    );

    // The timer interrupt stays masked in the NVIC, its flag is polled.
    channel.match_interrupt_enable(true);

    loop {
        // Low from count 0 until count 200: a 20ms pulse every 500ms.
        channel.write_ccr(0);
        channel.on_match(one_shot::Level::Active);
        channel.clear_match();
        timebase.restart();

        while !channel.match_pending() {}
        channel.clear_match();
        channel.on_match(one_shot::Level::Inactive);
        channel.write_ccr(200);
        while !channel.match_pending() {}
        timebase.halt();

        delay::millis(500);
    }
}
