#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use pico_sk6812::{Result, pio_channel::Sk6812Pios, pixel_strip::PixelStrip};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let mut sk6812_pios = Sk6812Pios::new(p.PIO0, p.PIO1);

    // Let the driver pick a state machine (PIO0 first).
    let channel = sk6812_pios.bind(p.PIN_0, None)?;
    let mut strip: PixelStrip<_, 10> = PixelStrip::new(10, channel);

    strip.set_color(0, 255, 0, 0, 0);
    strip.set_packed(9, 0x0000_00FF);
    info!("first = {:#x}, last = {:#x}", strip.packed(0), strip.packed(9));

    loop {
        strip.show();
        Timer::after(Duration::from_millis(500)).await;
        // Rotate the colors one step along the strip.
        let last = strip.packed(strip.len() - 1);
        for pixel_index in (1..strip.len()).rev() {
            let previous = strip.packed(pixel_index - 1);
            strip.set_packed(pixel_index, previous);
        }
        strip.set_packed(0, last);
    }
}
