//! Blocking driver for SK6812 RGBW LED strips on the Pico 1 and 2.
//!
//! A [`PixelStrip`](pixel_strip::PixelStrip) holds one red/green/blue/white color per LED and
//! sends them, one 32-bit word per LED, through a [`SignalChannel`](signal_channel::SignalChannel).
//! On hardware the channel is a PIO state machine bound with
//! [`Sk6812Pios::bind`](pio_channel::Sk6812Pios::bind).
//!
//! # Glossary
//!
//! Resources available on the Pico 1 and Pico 2:
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):** Pico 1 has 2. Pico 2 has 3.
//!   Each PIO block has 4 state machines; this crate uses PIO0 and PIO1.
//! - **Packed RGBW:** a `u32` color in `0xRRGGBBWW` order, the form colors are read and written in.
//! - **Wire word:** the `u32` actually pushed to the state machine, in the strip's
//!   `0xGGRRBBWW` order.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: an architecture must be selected (unless testing with host feature)
#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the architecture feature: 'arm'");

mod error;
// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod pio_channel;
#[cfg(not(feature = "host"))]
#[doc(hidden)]
pub mod pio_irqs;
pub mod pixel_strip;
pub mod signal_channel;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
