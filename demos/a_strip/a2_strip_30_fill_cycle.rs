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
    pixel_strip::PixelStrip,
    signal_channel::{PioIndex, StateMachineSlot},
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

    // Ask for a specific state machine instead of the first free one.
    let channel = sk6812_pios.bind(p.PIN_3, Some(StateMachineSlot::new(PioIndex::Pio1, 2)))?;
    let mut strip: PixelStrip<_, 30> = PixelStrip::new(30, channel);

    let fills = [(64, 0, 0, 0), (0, 64, 0, 0), (0, 0, 64, 0), (0, 0, 0, 64)];
    loop {
        for (red, green, blue, white) in fills {
            strip.fill(red, green, blue, white);
            strip.show();
            Timer::after(Duration::from_millis(400)).await;
        }

        // Shrinking the strip clears it; only the first 15 LEDs light up on the next pass.
        let len = if strip.len() == 30 { 15 } else { 30 };
        strip.update_len(len);
        strip.clear();
        strip.show();
        info!("strip length is now {}", strip.len());
    }
}
