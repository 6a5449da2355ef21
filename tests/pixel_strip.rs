#![allow(missing_docs)]
//! Host-level tests for the pixel buffer: lifecycle, color access, and the out-of-range policy.

use pico_sk6812::pixel_strip::{BLACK, PixelStrip, pack_rgbw, rgbw, unpack_rgbw};
use pico_sk6812::signal_channel::SignalChannel;

struct NullChannel;

impl SignalChannel for NullChannel {
    fn submit_blocking(&mut self, _word: u32) {}
}

fn strip<const MAX_LEN: usize>(len: usize) -> PixelStrip<NullChannel, MAX_LEN> {
    PixelStrip::new(len, NullChannel)
}

#[test]
fn new_strip_is_all_off() {
    let strip = strip::<16>(10);
    assert_eq!(strip.len(), 10);
    assert!(!strip.is_empty());
    for pixel_index in 0..strip.len() {
        assert_eq!(strip.packed(pixel_index), 0);
    }
}

#[test]
fn set_color_reads_back_packed() {
    let mut strip = strip::<10>(10);
    strip.set_color(0, 255, 0, 0, 0);
    assert_eq!(strip.packed(0), 0xFF00_0000);

    strip.set_color(3, 0x12, 0x34, 0x56, 0x78);
    assert_eq!(strip.packed(3), 0x1234_5678);
    assert_eq!(strip.rgbw(3), rgbw(0x12, 0x34, 0x56, 0x78));
}

#[test]
fn set_packed_reads_back_unchanged() {
    let mut strip = strip::<10>(10);
    strip.set_packed(9, 0x1122_3344);
    assert_eq!(strip.packed(9), 0x1122_3344);
    assert_eq!(strip.rgbw(9), rgbw(0x11, 0x22, 0x33, 0x44));
}

#[test]
fn every_channel_value_round_trips_on_each_channel() {
    let mut strip = strip::<4>(4);
    for value in 0..=u8::MAX {
        strip.set_color(0, value, 0, 0, 0);
        strip.set_color(1, 0, value, 0, 0);
        strip.set_color(2, 0, 0, value, 0);
        strip.set_color(3, 0, 0, 0, value);
        let value = u32::from(value);
        assert_eq!(strip.packed(0), value << 24);
        assert_eq!(strip.packed(1), value << 16);
        assert_eq!(strip.packed(2), value << 8);
        assert_eq!(strip.packed(3), value);
    }
}

#[test]
fn out_of_range_writes_are_ignored_and_reads_are_zero() {
    let mut strip = strip::<16>(10);
    strip.fill(1, 2, 3, 4);
    let before: Vec<u32> = (0..strip.len()).map(|index| strip.packed(index)).collect();

    strip.set_color(10, 255, 255, 255, 255);
    strip.set_packed(11, 0xFFFF_FFFF);
    strip.set_rgbw(usize::MAX, rgbw(9, 9, 9, 9));

    let after: Vec<u32> = (0..strip.len()).map(|index| strip.packed(index)).collect();
    assert_eq!(before, after);
    assert_eq!(strip.len(), 10);
    assert_eq!(strip.packed(10), 0);
    assert_eq!(strip.packed(15), 0);
    assert_eq!(strip.packed(usize::MAX), 0);
    assert_eq!(strip.rgbw(10), BLACK);
}

#[test]
fn fill_sets_every_pixel() {
    let mut strip = strip::<32>(32);
    strip.fill(0xAA, 0xBB, 0xCC, 0xDD);
    for pixel_index in 0..strip.len() {
        assert_eq!(strip.packed(pixel_index), 0xAABB_CCDD);
    }
}

#[test]
fn clear_turns_every_pixel_off() {
    let mut strip = strip::<8>(8);
    strip.fill(10, 20, 30, 40);
    strip.set_packed(7, 0xFFFF_FFFF);
    strip.clear();
    assert_eq!(strip.len(), 8);
    assert!(strip.pixels().iter().all(|pixel| *pixel == BLACK));
    for pixel_index in 0..strip.len() {
        assert_eq!(strip.packed(pixel_index), 0);
    }
}

#[test]
fn shrinking_discards_colors() {
    let mut strip = strip::<10>(10);
    strip.set_color(0, 255, 0, 0, 0);
    strip.update_len(5);
    assert_eq!(strip.len(), 5);
    assert_eq!(strip.packed(0), 0);
}

#[test]
fn growing_and_same_size_resize_also_clear() {
    let mut strip = strip::<20>(10);
    strip.fill(1, 1, 1, 1);
    strip.update_len(20);
    assert_eq!(strip.len(), 20);
    assert!(strip.pixels().iter().all(|pixel| *pixel == BLACK));

    strip.fill(2, 2, 2, 2);
    strip.update_len(20);
    assert_eq!(strip.len(), 20);
    assert_eq!(strip.packed(19), 0);
}

#[test]
fn allocation_that_does_not_fit_leaves_strip_empty() {
    let mut strip = strip::<8>(9);
    assert_eq!(strip.len(), 0);
    assert!(strip.is_empty());
    assert_eq!(PixelStrip::<NullChannel, 8>::STORAGE_LEN, 8);

    strip.set_color(0, 255, 255, 255, 255);
    assert_eq!(strip.packed(0), 0);
    strip.fill(1, 2, 3, 4);
    strip.clear();
    assert!(strip.pixels().is_empty());
}

#[test]
fn failed_resize_empties_a_populated_strip() {
    let mut strip = strip::<8>(8);
    strip.fill(255, 0, 0, 0);
    strip.update_len(100);
    assert_eq!(strip.len(), 0);
    assert_eq!(strip.packed(0), 0);

    // A later resize that fits works again.
    strip.update_len(4);
    assert_eq!(strip.len(), 4);
    assert_eq!(strip.packed(3), 0);
}

#[test]
fn zero_length_strip_is_valid() {
    let mut strip = strip::<8>(0);
    assert!(strip.is_empty());
    strip.set_packed(0, 0x0102_0304);
    assert_eq!(strip.packed(0), 0);
}

#[test]
fn pack_and_unpack_use_rrggbbww_order() {
    let color = rgbw(0x01, 0x02, 0x03, 0x04);
    assert_eq!(pack_rgbw(color), 0x0102_0304);
    assert_eq!(unpack_rgbw(0x0102_0304), color);
    assert_eq!(color.a.0, 0x04);
}
