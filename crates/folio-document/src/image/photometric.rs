// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photometric primitives — luma statistics, the piecewise linear adjustment
// map, and the per-pixel brightness and contrast passes.
//
// Both passes work on luma and rescale R, G and B by the same ratio, so the
// hue of a pixel is kept while its brightness moves. Pure black pixels have
// no ratio to keep and are shifted directly.

use image::RgbaImage;
use serde::Serialize;

/// Rec. 601 luma weights.
pub const LUMA_RED: f64 = 0.299;
pub const LUMA_GREEN: f64 = 0.587;
pub const LUMA_BLUE: f64 = 0.114;

/// Brightness reachable at input -100 / +100, as a fraction of the initial value.
pub const MIN_BRIGHTNESS_FACTOR: f64 = 0.25;
pub const MAX_BRIGHTNESS_FACTOR: f64 = 1.15;

/// Contrast reachable at input -100 / +100, as a fraction of the initial value.
pub const MIN_CONTRAST_FACTOR: f64 = 0.5;
pub const MAX_CONTRAST_FACTOR: f64 = 3.0;

/// Adjustment inputs are clamped to `-ADJUSTMENT_RANGE..=ADJUSTMENT_RANGE`.
pub const ADJUSTMENT_RANGE: i32 = 100;

/// Brightness (mean luma) and contrast (population standard deviation of
/// luma) of a page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Photometrics {
    pub brightness: f64,
    pub contrast: f64,
}

pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_RED * f64::from(r) + LUMA_GREEN * f64::from(g) + LUMA_BLUE * f64::from(b)
}

/// Luma times 1000, exact in integers.
const LUMA_SCALE: u128 = 1000;

fn scaled_luma(r: u8, g: u8, b: u8) -> u128 {
    299 * u128::from(r) + 587 * u128::from(g) + 114 * u128::from(b)
}

/// Measure brightness and contrast in a single pass over the pixels.
///
/// Sums are kept in integers so flat pages measure exactly zero contrast.
/// An image without pixels measures as zero for both.
pub fn measure(image: &RgbaImage) -> Photometrics {
    let count = u128::from(image.width()) * u128::from(image.height());
    if count == 0 {
        return Photometrics::default();
    }

    let (sum, sum_sq) = image.pixels().fold((0u128, 0u128), |(sum, sum_sq), pixel| {
        let [r, g, b, _] = pixel.0;
        let y = scaled_luma(r, g, b);
        (sum + y, sum_sq + y * y)
    });

    // n²·Var(Y) = n·ΣY² − (ΣY)², never negative.
    let spread = count * sum_sq - sum * sum;
    let scale = LUMA_SCALE as f64;
    let variance = spread as f64 / (count * count) as f64 / (scale * scale);
    Photometrics {
        brightness: sum as f64 / count as f64 / scale,
        contrast: variance.sqrt(),
    }
}

/// Map a user input in `-100..=100` to an absolute target.
///
/// Negative inputs interpolate between `min_factor * initial` and `initial`,
/// non-negative inputs between `initial` and `max_factor * initial`. Input 0
/// returns `initial` exactly. The slope changes at 0.
pub fn map_adjustment(input: i32, initial: f64, min_factor: f64, max_factor: f64) -> f64 {
    let range = f64::from(ADJUSTMENT_RANGE);
    let input = f64::from(input.clamp(-ADJUSTMENT_RANGE, ADJUSTMENT_RANGE));
    if input < 0.0 {
        let low = min_factor * initial;
        low + (input + range) / range * (initial - low)
    } else {
        initial + input / range * (max_factor * initial - initial)
    }
}

/// Deviation scale turning `current` contrast into `target`. Flat pages
/// (`current == 0`) scale by 0.
pub fn contrast_factor(target: f64, current: f64) -> f64 {
    if current == 0.0 { 0.0 } else { target / current }
}

fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Channel offset moving brightness from `current` to `target`, rounded with
/// halves going up (`-2.5` becomes `-2`).
pub fn brightness_offset(target: f64, current: f64) -> i32 {
    (target - current + 0.5).floor() as i32
}

/// Shift the luma of every pixel by `offset`. Alpha is left alone.
pub fn shift_brightness(image: &mut RgbaImage, offset: i32) {
    if offset == 0 {
        return;
    }
    let delta = f64::from(offset);

    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let y = luma(r, g, b);
        if y == 0.0 {
            for channel in &mut pixel.0[..3] {
                *channel = to_channel(f64::from(*channel) + delta);
            }
        } else {
            let ratio = (y + delta) / y;
            for channel in &mut pixel.0[..3] {
                *channel = to_channel(f64::from(*channel) * ratio);
            }
        }
    }
}

/// Scale every pixel's luma deviation from `mean` by `factor`. Alpha is left
/// alone.
pub fn scale_contrast(image: &mut RgbaImage, factor: f64, mean: f64) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let y = luma(r, g, b);
        let new_y = mean + factor * (y - mean);
        if y == 0.0 {
            for channel in &mut pixel.0[..3] {
                *channel = to_channel(new_y);
            }
        } else {
            let ratio = new_y / y;
            for channel in &mut pixel.0[..3] {
                *channel = to_channel(f64::from(*channel) * ratio);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn flat(value: u8) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([value, value, value, 255]))
    }

    #[test]
    fn luma_weights_sum_to_one() {
        assert!((luma(255, 255, 255) - 255.0).abs() < 1e-9);
        assert_eq!(luma(0, 0, 0), 0.0);
    }

    #[test]
    fn flat_image_has_no_contrast() {
        let stats = measure(&flat(200));
        assert_eq!(stats.brightness, 200.0);
        assert_eq!(stats.contrast, 0.0);
    }

    #[test]
    fn half_black_half_white_contrast() {
        let image = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([0, 0, 0, 255]) } else { Rgba([255, 255, 255, 255]) }
        });
        let stats = measure(&image);
        assert!((stats.brightness - 127.5).abs() < 1e-6);
        assert!((stats.contrast - 127.5).abs() < 1e-6);
    }

    #[test]
    fn empty_image_measures_zero() {
        assert_eq!(measure(&RgbaImage::new(0, 0)), Photometrics::default());
    }

    #[test]
    fn zero_input_is_identity() {
        for initial in [0.0, 0.3, 57.25, 254.9] {
            assert_eq!(map_adjustment(0, initial, MIN_BRIGHTNESS_FACTOR, MAX_BRIGHTNESS_FACTOR), initial);
            assert_eq!(map_adjustment(0, initial, MIN_CONTRAST_FACTOR, MAX_CONTRAST_FACTOR), initial);
        }
    }

    #[test]
    fn extremes_hit_the_factors() {
        let low = map_adjustment(-100, 200.0, MIN_BRIGHTNESS_FACTOR, MAX_BRIGHTNESS_FACTOR);
        let high = map_adjustment(100, 200.0, MIN_BRIGHTNESS_FACTOR, MAX_BRIGHTNESS_FACTOR);
        assert!((low - 50.0).abs() < 1e-9);
        assert!((high - 230.0).abs() < 1e-9);
    }

    #[test]
    fn input_is_clamped() {
        let at_max = map_adjustment(100, 40.0, MIN_CONTRAST_FACTOR, MAX_CONTRAST_FACTOR);
        assert_eq!(map_adjustment(250, 40.0, MIN_CONTRAST_FACTOR, MAX_CONTRAST_FACTOR), at_max);
        let at_min = map_adjustment(-100, 40.0, MIN_CONTRAST_FACTOR, MAX_CONTRAST_FACTOR);
        assert_eq!(map_adjustment(-999, 40.0, MIN_CONTRAST_FACTOR, MAX_CONTRAST_FACTOR), at_min);
    }

    #[test]
    fn mapping_is_monotonic() {
        let factors = [
            (MIN_BRIGHTNESS_FACTOR, MAX_BRIGHTNESS_FACTOR),
            (MIN_CONTRAST_FACTOR, MAX_CONTRAST_FACTOR),
        ];
        for (min_factor, max_factor) in factors {
            for initial in [0.0, 12.5, 40.0, 128.0, 255.0] {
                let mut previous = f64::NEG_INFINITY;
                for input in -100..=100 {
                    let mapped = map_adjustment(input, initial, min_factor, max_factor);
                    assert!(
                        mapped >= previous,
                        "input {input} initial {initial} factors {min_factor}..{max_factor}"
                    );
                    previous = mapped;
                }
            }
        }
    }

    #[test]
    fn brightness_offset_rounds_halves_up() {
        assert_eq!(brightness_offset(10.0, 12.5), -2);
        assert_eq!(brightness_offset(12.5, 10.0), 3);
        assert_eq!(brightness_offset(10.0, 10.4), 0);
        assert_eq!(brightness_offset(10.0, 10.6), -1);
    }

    #[test]
    fn flat_page_contrast_factor_is_zero() {
        assert_eq!(contrast_factor(30.0, 0.0), 0.0);
        assert_eq!(contrast_factor(30.0, 15.0), 2.0);
    }

    #[test]
    fn white_page_stays_white() {
        let mut image = flat(255);
        shift_brightness(&mut image, 38);
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn black_pixels_shift_directly() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 40]));
        shift_brightness(&mut image, 17);
        assert_eq!(image.get_pixel(0, 0).0, [17, 17, 17, 40]);
    }

    #[test]
    fn darkening_clamps_at_zero_and_keeps_alpha() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 128]));
        shift_brightness(&mut image, -200);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 128]);
    }

    #[test]
    fn brightening_keeps_channel_ratios() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([100, 50, 0, 255]));
        let y = luma(100, 50, 0);
        shift_brightness(&mut image, y.round() as i32);
        // Luma roughly doubles, so every channel roughly doubles.
        let [r, g, b, a] = image.get_pixel(0, 0).0;
        assert!((198..=201).contains(&r), "{r}");
        assert!((98..=101).contains(&g), "{g}");
        assert_eq!((b, a), (0, 255));
    }

    #[test]
    fn zero_offset_is_a_no_op() {
        let mut image = RgbaImage::from_fn(3, 3, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 7, 255]));
        let before = image.clone();
        shift_brightness(&mut image, 0);
        assert_eq!(image, before);
    }

    #[test]
    fn unit_contrast_factor_keeps_pixels() {
        let mut image = RgbaImage::from_fn(3, 3, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 7, 255]));
        let before = image.clone();
        let mean = measure(&image).brightness;
        scale_contrast(&mut image, 1.0, mean);
        // Truncation may lose one step to float noise, never more.
        for (after, before) in image.pixels().zip(before.pixels()) {
            for (a, b) in after.0.iter().zip(before.0.iter()) {
                assert!(a.abs_diff(*b) <= 1, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn zero_contrast_factor_flattens_to_mean() {
        let mut image = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([0, 0, 0, 255]) } else { Rgba([200, 200, 200, 255]) }
        });
        scale_contrast(&mut image, 0.0, 100.0);
        for pixel in image.pixels() {
            for &channel in &pixel.0[..3] {
                assert!((99..=100).contains(&channel), "{channel}");
            }
        }
    }

    #[test]
    fn raising_contrast_spreads_luma() {
        let mut image = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([80, 80, 80, 255]) } else { Rgba([160, 160, 160, 255]) }
        });
        let before = measure(&image);
        scale_contrast(&mut image, 2.0, before.brightness);
        let after = measure(&image);
        assert!(after.contrast > before.contrast * 1.9);
        assert!((after.brightness - before.brightness).abs() < 1.5);
    }
}
