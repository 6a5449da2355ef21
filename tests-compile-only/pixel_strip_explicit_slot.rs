//! Compile-only check: `PixelStrip` built on an explicitly chosen PIO slot.
#![cfg(not(feature = "host"))]
#![no_std]
#![no_main]
#![allow(dead_code, reason = "Compile-time verification only")]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use panic_probe as _;
use pico_sk6812::Result;
use pico_sk6812::pio_channel::{PioChannel, Sk6812Pios};
use pico_sk6812::pixel_strip::{Current, PixelStrip, rgbw};
use pico_sk6812::signal_channel::{PioIndex, StateMachineSlot};
use smart_leds::SmartLedsWrite;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    if let Err(err) = inner_main() {
        panic!("Initialization failed: {:?}", err);
    }
}

fn inner_main() -> Result<()> {
    let p = embassy_rp::init(Default::default());
    let mut sk6812_pios = Sk6812Pios::new(p.PIO0, p.PIO1);

    let slot = StateMachineSlot::new(PioIndex::Pio1, 3);
    let channel: PioChannel<'_> = sk6812_pios.bind(p.PIN_16, Some(slot))?;
    info!("bound {}", channel.slot());
    assert!(sk6812_pios.is_bound(slot));

    let mut strip: PixelStrip<_, 144> =
        PixelStrip::with_max_current(144, channel, Current::Milliamps(2000));

    // Drive the strip through the smart-leds trait.
    let colors = (0..144_u8).map(|index| rgbw(index, 0, 0, 0));
    let Ok(()) = strip.write(colors);
    Ok(())
}
