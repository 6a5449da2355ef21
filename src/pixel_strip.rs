//! A pixel buffer for SK6812 RGBW LED strips and the encoding that puts it on the wire.
//!
//! [`PixelStrip`] owns one color record per LED and a [`SignalChannel`] to send them through.
//! Colors are written and read in index order, which is the physical order along the strip.
//! Nothing is sent until [`PixelStrip::show`].
//!
//! # Example
//!
//! ```
//! use pico_sk6812::pixel_strip::PixelStrip;
//! use pico_sk6812::signal_channel::SignalChannel;
//!
//! struct Discard;
//!
//! impl SignalChannel for Discard {
//!     fn submit_blocking(&mut self, _word: u32) {}
//! }
//!
//! // Room for up to 64 LEDs, 10 of them in use.
//! let mut strip: PixelStrip<_, 64> = PixelStrip::new(10, Discard);
//! strip.set_color(0, 255, 0, 0, 0);
//! strip.set_packed(9, 0x1122_3344);
//! assert_eq!(strip.packed(0), 0xFF00_0000);
//! assert_eq!(strip.packed(9), 0x1122_3344);
//! assert_eq!(strip.packed(10), 0); // past the end reads as off
//! strip.show();
//! ```
//!
//! # Out-of-range indexes
//!
//! Writes past the end of the strip are ignored and reads past the end return `0`. Nothing in
//! this module panics or returns an error, so a control loop never has to handle a fault from it.

use core::convert::Infallible;

use heapless::Vec;
use smart_leds::{RGBW, SmartLedsWrite, White};

use crate::signal_channel::SignalChannel;

/// One LED's red, green, blue and white intensities, re-exported from the `smart_leds` crate.
pub type Rgbw = RGBW<u8>;

/// All four channels off.
pub const BLACK: Rgbw = rgbw(0, 0, 0, 0);

/// Builds an [`Rgbw`] from its four channels.
#[must_use]
pub const fn rgbw(red: u8, green: u8, blue: u8, white: u8) -> Rgbw {
    Rgbw {
        r: red,
        g: green,
        b: blue,
        a: White(white),
    }
}

/// Packs a color as `0xRRGGBBWW`, the public color representation.
#[must_use]
pub const fn pack_rgbw(color: Rgbw) -> u32 {
    u32::from_be_bytes([color.r, color.g, color.b, color.a.0])
}

/// Unpacks a `0xRRGGBBWW` value.
#[must_use]
pub const fn unpack_rgbw(packed: u32) -> Rgbw {
    let [red, green, blue, white] = packed.to_be_bytes();
    rgbw(red, green, blue, white)
}

/// The word the PIO program shifts out for one LED.
///
/// The state machine shifts left, most significant bit first, pulling a new word every 32 bits.
/// The SK6812 latches green, red, blue, then white, so the word is `0xGGRRBBWW`.
#[must_use]
pub const fn wire_word(color: Rgbw) -> u32 {
    u32::from_be_bytes([color.g, color.r, color.b, color.a.0])
}

// ============================================================================
// Current Limiting
// ============================================================================

/// Worst-case draw of one fully-lit color channel (red, green, blue or white).
pub const MILLIAMPS_PER_CHANNEL: u32 = 20;

/// Worst-case draw of one LED with all four channels at full intensity.
pub const MILLIAMPS_PER_PIXEL: u32 = MILLIAMPS_PER_CHANNEL * 4;

/// Default current budget for strips (`Current::Unlimited`).
pub const MAX_CURRENT_DEFAULT: Current = Current::Unlimited;

/// Power budget for a strip.
///
/// A budget caps the brightness of what [`PixelStrip::show`] sends so that every LED at full
/// white stays inside the limit. Stored colors are never changed; only the wire words are scaled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Current {
    /// Limit brightness to stay within a specific milliamp budget.
    ///
    /// For example, a 30-LED strip draws 2400 mA with every channel at full intensity
    /// (80 mA per LED); with `Milliamps(1200)`, brightness is capped at 50%.
    Milliamps(u16),
    /// No limit. Colors go out exactly as stored.
    #[default]
    Unlimited,
}

impl Current {
    /// Calculate maximum brightness based on current budget and worst-case current draw.
    ///
    /// Returns 255 (full brightness) for `Unlimited` or when nothing draws current
    /// (`worst_case_ma == 0`), otherwise a scaled value for `Milliamps`.
    #[must_use]
    pub const fn max_brightness(self, worst_case_ma: u32) -> u8 {
        match self {
            _ if worst_case_ma == 0 => u8::MAX,
            Self::Milliamps(ma) => {
                let scale = (ma as u32 * 255) / worst_case_ma;
                if scale > 255 { 255 } else { scale as u8 }
            }
            Self::Unlimited => 255,
        }
    }

    /// Maximum brightness for a strip of `len` LEDs.
    ///
    /// An empty strip draws nothing, so it gets full brightness.
    #[must_use]
    pub fn max_brightness_for_len(self, len: usize) -> u8 {
        let pixel_count = u32::try_from(len).unwrap_or(u32::MAX);
        self.max_brightness(pixel_count.saturating_mul(MILLIAMPS_PER_PIXEL))
    }
}

/// Scale one channel by `brightness / 255`.
const fn scale(value: u8, brightness: u8) -> u8 {
    ((value as u16 * brightness as u16) / 255) as u8
}

const fn scale_rgbw(color: Rgbw, brightness: u8) -> Rgbw {
    rgbw(
        scale(color.r, brightness),
        scale(color.g, brightness),
        scale(color.b, brightness),
        scale(color.a.0, brightness),
    )
}

// ============================================================================
// Pixel Strip
// ============================================================================

/// A string of SK6812 RGBW LEDs and the channel that drives them.
///
/// `MAX_LEN` is the storage the strip owns. The in-use length ([`len`](Self::len)) is set at
/// construction and by [`update_len`](Self::update_len), and may be anything up to `MAX_LEN`.
/// Asking for more than `MAX_LEN` leaves the strip empty rather than partly sized.
///
/// The channel is bound once, at construction, and stays with the strip until it is dropped or
/// [`released`](Self::release).
///
/// See the [module documentation](mod@crate::pixel_strip) for an example.
pub struct PixelStrip<C, const MAX_LEN: usize> {
    pixels: Vec<Rgbw, MAX_LEN>,
    channel: C,
    max_current: Current,
    max_brightness: u8,
}

impl<C: SignalChannel, const MAX_LEN: usize> PixelStrip<C, MAX_LEN> {
    /// Most LEDs this strip type can hold.
    pub const STORAGE_LEN: usize = MAX_LEN;

    /// Creates a strip of `len` LEDs, all off, bound to `channel`.
    ///
    /// If `len` exceeds `MAX_LEN` the strip is created empty.
    pub fn new(len: usize, channel: C) -> Self {
        Self::with_max_current(len, channel, MAX_CURRENT_DEFAULT)
    }

    /// Like [`new`](Self::new), with a power budget applied at [`show`](Self::show).
    pub fn with_max_current(len: usize, channel: C, max_current: Current) -> Self {
        let mut pixel_strip = Self {
            pixels: Vec::new(),
            channel,
            max_current,
            max_brightness: u8::MAX,
        };
        pixel_strip.allocate(len);
        pixel_strip
    }

    /// Replaces the buffer with `len` zeroed records, or with nothing if `len` does not fit.
    fn allocate(&mut self, len: usize) {
        self.pixels.clear();
        if self.pixels.resize(len, BLACK).is_err() {
            #[cfg(not(feature = "host"))]
            defmt::warn!(
                "PixelStrip: {} LEDs requested but storage holds {}; strip is now empty",
                len,
                MAX_LEN
            );
            self.pixels.clear();
        }
        self.max_brightness = self.max_current.max_brightness_for_len(self.pixels.len());
    }

    /// Changes the number of LEDs. Every LED is turned off, including ones that were in range
    /// before; re-populate colors after calling this.
    ///
    /// If `len` exceeds `MAX_LEN` the strip becomes empty.
    pub fn update_len(&mut self, len: usize) {
        self.allocate(len);
    }

    /// Number of LEDs in the strip.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the strip has no LEDs, either by request or because allocation did not fit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Sets one LED from separate channels. Ignored if `index` is past the end.
    pub fn set_color(&mut self, index: usize, red: u8, green: u8, blue: u8, white: u8) {
        self.set_rgbw(index, rgbw(red, green, blue, white));
    }

    /// Sets one LED from a packed `0xRRGGBBWW` value. Ignored if `index` is past the end.
    pub fn set_packed(&mut self, index: usize, packed: u32) {
        self.set_rgbw(index, unpack_rgbw(packed));
    }

    /// Sets one LED. Ignored if `index` is past the end.
    pub fn set_rgbw(&mut self, index: usize, color: Rgbw) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// The color of one LED as `0xRRGGBBWW`, or `0` if `index` is past the end.
    ///
    /// An out-of-range read is indistinguishable from an LED that is off.
    #[must_use]
    pub fn packed(&self, index: usize) -> u32 {
        pack_rgbw(self.rgbw(index))
    }

    /// The color of one LED, or [`BLACK`] if `index` is past the end.
    #[must_use]
    pub fn rgbw(&self, index: usize) -> Rgbw {
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    /// Sets every LED to the same color.
    pub fn fill(&mut self, red: u8, green: u8, blue: u8, white: u8) {
        self.pixels.fill(rgbw(red, green, blue, white));
    }

    /// Turns every LED off.
    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    /// The stored colors, in strip order.
    #[must_use]
    pub fn pixels(&self) -> &[Rgbw] {
        &self.pixels
    }

    /// The power budget given at construction.
    #[must_use]
    pub const fn max_current(&self) -> Current {
        self.max_current
    }

    /// Brightness cap applied by [`show`](Self::show) for the current length (255 = none).
    #[must_use]
    pub const fn max_brightness(&self) -> u8 {
        self.max_brightness
    }

    /// The bound channel.
    #[must_use]
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// Sends every LED's color to the strip, first to last.
    ///
    /// Each word waits for room in the channel, so this returns only after the last word has
    /// been accepted. It always sends the whole buffer and cannot be cancelled.
    pub fn show(&mut self) {
        let max_brightness = self.max_brightness;
        for pixel in &self.pixels {
            self.channel
                .submit_blocking(wire_word(scale_rgbw(*pixel, max_brightness)));
        }
    }

    /// Drops the buffer and hands back the channel.
    pub fn release(self) -> C {
        self.channel
    }
}

impl<C: SignalChannel, const MAX_LEN: usize> SmartLedsWrite for PixelStrip<C, MAX_LEN> {
    type Error = Infallible;
    type Color = Rgbw;

    /// Copies colors into the strip starting at LED 0, then [`show`](PixelStrip::show)s it.
    ///
    /// Colors past the end of the strip are dropped; LEDs past the end of `iterator` keep
    /// their stored colors.
    fn write<T, I>(&mut self, iterator: T) -> core::result::Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        for (pixel, color) in self.pixels.iter_mut().zip(iterator) {
            *pixel = color.into();
        }
        self.show();
        Ok(())
    }
}
