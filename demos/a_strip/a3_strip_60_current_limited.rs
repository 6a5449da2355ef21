#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use pico_sk6812::{
    Result,
    pio_channel::Sk6812Pios,
    pixel_strip::{Current, PixelStrip},
};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let mut sk6812_pios = Sk6812Pios::new(p.PIO0, p.PIO1);

    let channel = sk6812_pios.bind(p.PIN_4, None)?;
    // Full white on 60 LEDs is ~4.8A; stay within 1A from USB.
    let mut strip: PixelStrip<_, 60> =
        PixelStrip::with_max_current(60, channel, Current::Milliamps(1000));
    info!("max brightness = {}", strip.max_brightness());

    let mut dot_index = 0;
    loop {
        strip.fill(0, 0, 32, 0);
        strip.set_color(dot_index, 255, 255, 255, 255);
        strip.show();
        Timer::after(Duration::from_millis(50)).await;
        dot_index = (dot_index + 1) % strip.len();
    }
}
