//! Compile-only check: `PixelStrip` built through the fallback state-machine path.
#![cfg(not(feature = "host"))]
#![no_std]
#![no_main]
#![allow(dead_code, reason = "Compile-time verification only")]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use panic_probe as _;
use pico_sk6812::pio_channel::Sk6812Pios;
use pico_sk6812::pixel_strip::PixelStrip;
use pico_sk6812::{Error, Result};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    if let Err(err) = inner_main() {
        panic!("Initialization failed: {:?}", err);
    }
}

fn inner_main() -> Result<()> {
    let p = embassy_rp::init(Default::default());
    let mut sk6812_pios = Sk6812Pios::new(p.PIO0, p.PIO1);

    // Four strips fill PIO0; the fifth lands on PIO1.
    let mut strip0: PixelStrip<_, 8> = PixelStrip::new(8, sk6812_pios.bind(p.PIN_0, None)?);
    let mut strip1: PixelStrip<_, 8> = PixelStrip::new(8, sk6812_pios.bind(p.PIN_1, None)?);
    let mut strip2: PixelStrip<_, 8> = PixelStrip::new(8, sk6812_pios.bind(p.PIN_2, None)?);
    let mut strip3: PixelStrip<_, 8> = PixelStrip::new(8, sk6812_pios.bind(p.PIN_3, None)?);
    let mut strip4: PixelStrip<_, 8> = PixelStrip::new(8, sk6812_pios.bind(p.PIN_4, None)?);
    info!("fifth strip on {}", strip4.channel().slot());

    for strip in [&mut strip0, &mut strip1, &mut strip2, &mut strip3, &mut strip4] {
        strip.fill(0, 0, 0, 16);
        strip.show();
    }

    // Claim the rest of PIO1, then one more fails with NoFreeStateMachine.
    let _strip5 = sk6812_pios.bind(p.PIN_5, None)?;
    let _strip6 = sk6812_pios.bind(p.PIN_6, None)?;
    let _strip7 = sk6812_pios.bind(p.PIN_7, None)?;
    match sk6812_pios.bind(p.PIN_8, None) {
        Err(Error::NoFreeStateMachine) => info!("no state machine left, as expected"),
        Err(err) => return Err(err),
        Ok(channel) => info!("unexpected channel on {}", channel.slot()),
    }
    Ok(())
}
