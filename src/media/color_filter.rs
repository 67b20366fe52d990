// SPDX-License-Identifier: MPL-2.0
//! Per-pixel color filters using the W3C Filter Effects definitions.
//!
//! Each filter operates on normalized RGB in `[0, 1]`; alpha is untouched.
//! Filters in a chain are applied left to right, like a CSS `filter` list.

use image_rs::{Rgba, RgbaImage};

/// A single CSS-style color filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorFilter {
    /// `contrast(amount)`: `c * amount + (0.5 - 0.5 * amount)`.
    Contrast(f32),
    /// `saturate(amount)`: saturation matrix, `1.0` is identity.
    Saturate(f32),
    /// `grayscale(amount)`: `0.0` is identity, `1.0` fully gray.
    Grayscale(f32),
    /// `brightness(amount)`: linear multiplier.
    Brightness(f32),
}

type Matrix = [[f32; 3]; 3];

impl ColorFilter {
    fn apply(self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            ColorFilter::Contrast(amount) => {
                let intercept = 0.5 - 0.5 * amount;
                rgb.map(|c| c * amount + intercept)
            }
            ColorFilter::Brightness(amount) => rgb.map(|c| c * amount),
            ColorFilter::Saturate(amount) => multiply(&saturate_matrix(amount), rgb),
            ColorFilter::Grayscale(amount) => multiply(&grayscale_matrix(amount), rgb),
        }
    }
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

fn multiply(m: &Matrix, [r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * r + m[0][1] * g + m[0][2] * b,
        m[1][0] * r + m[1][1] * g + m[1][2] * b,
        m[2][0] * r + m[2][1] * g + m[2][2] * b,
    ]
}

/// Applies a filter chain to a single pixel.
///
/// Intermediate values are clamped after every step, as browsers do.
#[must_use]
pub fn apply_to_pixel(filters: &[ColorFilter], pixel: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    let mut rgb = [r, g, b].map(|c| f32::from(c) / 255.0);
    for filter in filters {
        rgb = filter.apply(rgb).map(|c| c.clamp(0.0, 1.0));
    }
    let [r, g, b] = rgb.map(|c| (c * 255.0).round() as u8);
    Rgba([r, g, b, a])
}

/// Applies a filter chain to every pixel of `image` in place.
pub fn apply(filters: &[ColorFilter], image: &mut RgbaImage) {
    if filters.is_empty() {
        return;
    }
    for pixel in image.pixels_mut() {
        *pixel = apply_to_pixel(filters, *pixel);
    }
}

/// Source-over blends a solid color across the whole image.
///
/// `color` is non-premultiplied RGB; `alpha` is its coverage in `[0, 1]`.
pub fn fill_over(image: &mut RgbaImage, color: [u8; 3], alpha: f32) {
    let src_a = alpha.clamp(0.0, 1.0);
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let dst_a = f32::from(a) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= f32::EPSILON {
            continue;
        }
        let blend = |src: u8, dst: u8| {
            let value =
                (f32::from(src) * src_a + f32::from(dst) * dst_a * (1.0 - src_a)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };
        *pixel = Rgba([
            blend(color[0], r),
            blend(color[1], g),
            blend(color[2], b),
            (out_a * 255.0).round() as u8,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MID_RED: Rgba<u8> = Rgba([200, 60, 40, 255]);

    #[test]
    fn identity_amounts_leave_pixels_unchanged() {
        let filters = [
            ColorFilter::Contrast(1.0),
            ColorFilter::Saturate(1.0),
            ColorFilter::Grayscale(0.0),
            ColorFilter::Brightness(1.0),
        ];
        let out = apply_to_pixel(&filters, MID_RED);
        for (a, b) in out.0.iter().zip(MID_RED.0.iter()) {
            assert!(a.abs_diff(*b) <= 1, "{out:?} vs {MID_RED:?}");
        }
    }

    #[test]
    fn full_grayscale_equalizes_channels() {
        let out = apply_to_pixel(&[ColorFilter::Grayscale(1.0)], MID_RED);
        assert!(out.0[0].abs_diff(out.0[1]) <= 1);
        assert!(out.0[1].abs_diff(out.0[2]) <= 1);
    }

    #[test]
    fn contrast_pushes_values_away_from_middle() {
        let out = apply_to_pixel(&[ColorFilter::Contrast(1.2)], Rgba([200, 50, 128, 255]));
        assert!(out.0[0] > 200);
        assert!(out.0[1] < 50);
        assert!(out.0[2].abs_diff(128) <= 1);
    }

    #[test]
    fn brightness_clamps_at_white() {
        let out = apply_to_pixel(&[ColorFilter::Brightness(2.0)], Rgba([250, 10, 0, 255]));
        assert_eq!(out.0[0], 255);
        assert_eq!(out.0[1], 20);
    }

    #[test]
    fn alpha_is_preserved() {
        let out = apply_to_pixel(&[ColorFilter::Saturate(1.3)], Rgba([10, 20, 30, 77]));
        assert_eq!(out.0[3], 77);
    }

    #[test]
    fn fill_over_opaque_pixel_mixes_by_alpha() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        fill_over(&mut image, [100, 200, 50], 0.5);
        assert_eq!(image.get_pixel(0, 0).0, [50, 100, 25, 255]);
    }

    #[test]
    fn fill_over_transparent_pixel_takes_fill_color() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        fill_over(&mut image, [112, 66, 20], 0.3);
        let [r, g, b, a] = image.get_pixel(0, 0).0;
        assert_eq!([r, g, b], [112, 66, 20]);
        assert_eq!(a, 77);
    }
}
