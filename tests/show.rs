#![allow(missing_docs)]
//! Host-level tests for what `show` puts on the wire.

use pico_sk6812::pixel_strip::{
    Current, MILLIAMPS_PER_PIXEL, PixelStrip, Rgbw, rgbw, wire_word,
};
use pico_sk6812::signal_channel::SignalChannel;
use smart_leds::SmartLedsWrite;

#[derive(Debug, Default)]
struct RecordingChannel {
    words: Vec<u32>,
}

impl SignalChannel for RecordingChannel {
    fn submit_blocking(&mut self, word: u32) {
        self.words.push(word);
    }
}

#[test]
fn wire_word_is_green_red_blue_white() {
    assert_eq!(wire_word(rgbw(0x11, 0x22, 0x33, 0x44)), 0x2211_3344);
    assert_eq!(wire_word(rgbw(0xFF, 0, 0, 0)), 0x00FF_0000);
    assert_eq!(wire_word(rgbw(0, 0xFF, 0, 0)), 0xFF00_0000);
    assert_eq!(wire_word(rgbw(0, 0, 0xFF, 0)), 0x0000_FF00);
    assert_eq!(wire_word(rgbw(0, 0, 0, 0xFF)), 0x0000_00FF);
}

#[test]
fn show_sends_one_word_per_pixel_in_order() {
    let mut strip: PixelStrip<_, 8> = PixelStrip::new(4, RecordingChannel::default());
    strip.set_color(0, 0x11, 0x22, 0x33, 0x44);
    strip.set_packed(1, 0xFF00_0000);
    strip.set_packed(3, 0x0000_00FF);
    strip.show();

    assert_eq!(
        strip.channel().words,
        [0x2211_3344, 0x00FF_0000, 0x0000_0000, 0x0000_00FF]
    );
}

#[test]
fn show_sends_the_whole_buffer_every_time() {
    let mut strip: PixelStrip<_, 8> = PixelStrip::new(3, RecordingChannel::default());
    strip.fill(1, 2, 3, 4);
    strip.show();
    strip.show();

    let words = &strip.channel().words;
    assert_eq!(words.len(), 6);
    assert!(words.iter().all(|word| *word == 0x0201_0304));
}

#[test]
fn show_on_empty_strip_sends_nothing() {
    let mut strip: PixelStrip<_, 4> = PixelStrip::new(5, RecordingChannel::default());
    assert!(strip.is_empty());
    strip.show();
    assert!(strip.channel().words.is_empty());
}

#[test]
fn show_after_shrink_sends_only_new_length() {
    let mut channel = RecordingChannel::default();
    {
        // Borrow the channel so it can be inspected after the strip is gone.
        let mut strip: PixelStrip<_, 10> = PixelStrip::new(10, &mut channel);
        strip.fill(0, 0, 0, 9);
        strip.update_len(2);
        strip.show();
    }
    assert_eq!(channel.words, [0, 0]);
}

#[test]
fn release_returns_the_channel() {
    let mut strip: PixelStrip<_, 2> = PixelStrip::new(2, RecordingChannel::default());
    strip.fill(0, 0, 0, 1);
    strip.show();
    let channel = strip.release();
    assert_eq!(channel.words, [1, 1]);
}

#[test]
fn unlimited_current_sends_colors_unchanged() {
    let mut strip: PixelStrip<_, 4> =
        PixelStrip::with_max_current(4, RecordingChannel::default(), Current::Unlimited);
    assert_eq!(strip.max_brightness(), 255);
    strip.fill(255, 255, 255, 255);
    strip.show();
    assert!(strip.channel().words.iter().all(|word| *word == u32::MAX));
}

#[test]
fn current_budget_scales_wire_but_not_stored_colors() {
    // 10 LEDs at 80 mA is 800 mA worst case; 400 mA allows half brightness.
    let mut strip: PixelStrip<_, 10> =
        PixelStrip::with_max_current(10, RecordingChannel::default(), Current::Milliamps(400));
    assert_eq!(strip.max_brightness(), 127);

    strip.fill(255, 255, 255, 255);
    strip.set_color(1, 200, 100, 0, 2);
    strip.show();

    assert_eq!(strip.packed(0), 0xFFFF_FFFF);
    assert_eq!(strip.packed(1), 0xC864_0002);
    let words = &strip.channel().words;
    assert_eq!(words[0], 0x7F7F_7F7F);
    // 200 * 127 / 255 = 99, 100 * 127 / 255 = 49, 2 * 127 / 255 = 0
    assert_eq!(words[1], wire_word(rgbw(99, 49, 0, 0)));
}

#[test]
fn current_budget_is_recomputed_on_resize() {
    let mut strip: PixelStrip<_, 20> =
        PixelStrip::with_max_current(20, RecordingChannel::default(), Current::Milliamps(800));
    // 20 LEDs: 1600 mA worst case.
    assert_eq!(strip.max_brightness(), 127);
    strip.update_len(10);
    // 10 LEDs: 800 mA worst case fits exactly.
    assert_eq!(strip.max_brightness(), 255);
    strip.update_len(0);
    assert_eq!(strip.max_brightness(), 255);
}

#[test]
fn max_brightness_matches_budget() {
    assert_eq!(Current::Unlimited.max_brightness(MILLIAMPS_PER_PIXEL), 255);
    assert_eq!(Current::Milliamps(40).max_brightness(MILLIAMPS_PER_PIXEL), 127);
    assert_eq!(Current::Milliamps(1000).max_brightness(MILLIAMPS_PER_PIXEL), 255);
    assert_eq!(Current::Milliamps(0).max_brightness_for_len(3), 0);
    assert_eq!(Current::Milliamps(0).max_brightness_for_len(0), 255);
    assert_eq!(Current::default(), Current::Unlimited);
}

#[test]
fn max_brightness_with_no_draw_is_full() {
    assert_eq!(Current::Unlimited.max_brightness(0), 255);
    assert_eq!(Current::Milliamps(0).max_brightness(0), 255);
    assert_eq!(Current::Milliamps(500).max_brightness(0), 255);
}

#[test]
fn smart_leds_write_fills_from_the_start_then_shows() {
    let mut strip: PixelStrip<_, 8> = PixelStrip::new(4, RecordingChannel::default());
    strip.set_packed(3, 0x0000_0005);

    let colors: [Rgbw; 2] = [rgbw(1, 0, 0, 0), rgbw(0, 2, 0, 0)];
    let Ok(()) = strip.write(colors);

    assert_eq!(strip.packed(0), 0x0100_0000);
    assert_eq!(strip.packed(1), 0x0002_0000);
    assert_eq!(strip.packed(2), 0);
    assert_eq!(strip.packed(3), 0x0000_0005);
    assert_eq!(
        strip.channel().words,
        [0x0001_0000, 0x0200_0000, 0x0000_0000, 0x0000_0005]
    );
}

#[test]
fn smart_leds_write_drops_colors_past_the_end() {
    let mut strip: PixelStrip<_, 8> = PixelStrip::new(2, RecordingChannel::default());
    let colors = (0..5_u8).map(|index| rgbw(index, index, index, index));
    let Ok(()) = strip.write(colors);
    assert_eq!(strip.len(), 2);
    assert_eq!(strip.channel().words.len(), 2);
    assert_eq!(strip.packed(1), 0x0101_0101);
}
