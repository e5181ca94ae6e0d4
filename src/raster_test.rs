#![allow(clippy::float_cmp)]

use super::*;

const BLUE: [u8; 4] = [0, 0, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

// =============================================================
// parse_color
// =============================================================

#[test]
fn parse_short_hex() {
    assert_eq!(parse_color("#f0a"), Some(Rgba::opaque(255, 0, 170)));
}

#[test]
fn parse_long_hex_any_case() {
    assert_eq!(parse_color("#1E90FF"), Some(Rgba::opaque(30, 144, 255)));
}

#[test]
fn parse_rgb_function() {
    assert_eq!(parse_color("rgb(247, 247, 247)"), Some(Rgba::opaque(247, 247, 247)));
    assert_eq!(parse_color("rgb(1,2,3)"), Some(Rgba::opaque(1, 2, 3)));
}

#[test]
fn parse_rgba_function() {
    assert_eq!(parse_color("rgba(10, 20, 30, 0.5)"), Some(Rgba { r: 10, g: 20, b: 30, a: 0.5 }));
}

#[test]
fn parse_clamps_out_of_range_channels() {
    assert_eq!(parse_color("rgb(300, -4, 12.6)"), Some(Rgba::opaque(255, 0, 13)));
}

#[test]
fn parse_named_colors() {
    assert_eq!(parse_color("blue"), Some(Rgba::opaque(0, 0, 255)));
    assert_eq!(parse_color(" White "), Some(Rgba::opaque(255, 255, 255)));
}

#[test]
fn parse_rejects_garbage() {
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("#12"), None);
    assert_eq!(parse_color("#zzzzzz"), None);
    assert_eq!(parse_color("#éé"), None);
    assert_eq!(parse_color("rgb(1, 2)"), None);
    assert_eq!(parse_color("rgb(a, b, c)"), None);
    assert_eq!(parse_color("chartreuse-ish"), None);
}

// =============================================================
// PixelRaster
// =============================================================

#[test]
fn new_raster_is_transparent() {
    let r = PixelRaster::new(4, 3);
    assert_eq!(r.size(), (4, 3));
    assert_eq!(r.data().len(), 4 * 3 * 4);
    assert!(r.data().iter().all(|&b| b == 0));
}

#[test]
fn pixel_off_raster_is_none() {
    let r = PixelRaster::new(4, 3);
    assert!(r.pixel(4, 0).is_none());
    assert!(r.pixel(0, 3).is_none());
}

#[test]
fn set_size_reallocates() {
    let mut r = PixelRaster::new(2, 2);
    r.set_size(10, 5);
    assert_eq!(r.size(), (10, 5));
    assert_eq!(r.data().len(), 10 * 5 * 4);
}

#[test]
fn fill_rect_covers_half_open_span() {
    let mut r = PixelRaster::new(10, 10);
    r.fill_rect(2.0, 3.0, 4.0, 2.0, "blue").unwrap();
    assert_eq!(r.pixel(2, 3), Some(BLUE));
    assert_eq!(r.pixel(5, 4), Some(BLUE));
    assert_eq!(r.pixel(6, 4), Some(CLEAR));
    assert_eq!(r.pixel(5, 5), Some(CLEAR));
    assert_eq!(r.pixel(1, 3), Some(CLEAR));
}

#[test]
fn fill_rect_clips_to_raster() {
    let mut r = PixelRaster::new(4, 4);
    r.fill_rect(-10.0, -10.0, 100.0, 100.0, "#fff").unwrap();
    assert!(r.data().iter().all(|&b| b == 255));
}

#[test]
fn fill_rect_with_empty_size_draws_nothing() {
    let mut r = PixelRaster::new(4, 4);
    r.fill_rect(1.0, 1.0, 0.0, 3.0, "blue").unwrap();
    r.fill_rect(1.0, 1.0, 3.0, -1.0, "blue").unwrap();
    assert!(r.data().iter().all(|&b| b == 0));
}

#[test]
fn later_fill_overwrites() {
    let mut r = PixelRaster::new(4, 4);
    r.fill_rect(0.0, 0.0, 4.0, 4.0, "red").unwrap();
    r.fill_rect(0.0, 0.0, 2.0, 2.0, "blue").unwrap();
    assert_eq!(r.pixel(0, 0), Some(BLUE));
    assert_eq!(r.pixel(3, 3), Some([255, 0, 0, 255]));
}

#[test]
fn translucent_fill_blends() {
    let mut r = PixelRaster::new(1, 1);
    r.fill_rect(0.0, 0.0, 1.0, 1.0, "#ffffff").unwrap();
    r.fill_rect(0.0, 0.0, 1.0, 1.0, "rgba(0, 0, 0, 0.5)").unwrap();
    assert_eq!(r.pixel(0, 0), Some([128, 128, 128, 255]));
}

#[test]
fn unknown_color_paints_black() {
    let mut r = PixelRaster::new(1, 1);
    r.fill_rect(0.0, 0.0, 1.0, 1.0, "not-a-colour").unwrap();
    assert_eq!(r.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn solid_stroke_draws_border_only() {
    let mut r = PixelRaster::new(10, 10);
    // One-pixel line centred half a pixel inside a 2..8 box.
    r.stroke_rect((2.5, 2.5, 5.0, 5.0), "blue", 1.0, None).unwrap();
    assert_eq!(r.pixel(2, 2), Some(BLUE));
    assert_eq!(r.pixel(7, 2), Some(BLUE));
    assert_eq!(r.pixel(2, 7), Some(BLUE));
    assert_eq!(r.pixel(7, 7), Some(BLUE));
    assert_eq!(r.pixel(5, 2), Some(BLUE));
    assert_eq!(r.pixel(2, 5), Some(BLUE));
    assert_eq!(r.pixel(5, 5), Some(CLEAR));
    assert_eq!(r.pixel(8, 8), Some(CLEAR));
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let mut r = PixelRaster::new(20, 5);
    r.stroke_rect((0.5, 0.5, 19.0, 4.0), "blue", 1.0, Some(4.0)).unwrap();
    // Top edge runs from x = 0: on 0..4, off 4..8, on 8..12.
    assert_eq!(r.pixel(1, 0), Some(BLUE));
    assert_eq!(r.pixel(5, 0), Some(CLEAR));
    assert_eq!(r.pixel(9, 0), Some(BLUE));
}

#[test]
fn dash_segments_cover_run() {
    assert_eq!(dash_segments(10.0, None), vec![(0.0, 10.0)]);
    assert_eq!(dash_segments(10.0, Some(4.0)), vec![(0.0, 4.0), (8.0, 2.0)]);
    assert_eq!(dash_segments(10.0, Some(0.0)), vec![(0.0, 10.0)]);
}
