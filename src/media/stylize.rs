// SPDX-License-Identifier: MPL-2.0
//! Style renderer: letterboxes a source image into a fixed square and applies
//! the preset's visual effect.

use super::color_filter::{self, ColorFilter};
use super::data_url;
use crate::domain::generation::Style;
use crate::error::Result;
use image_rs::{imageops, imageops::FilterType, DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Edge length of every rendered output, in pixels.
pub const OUTPUT_SIZE: u32 = 512;

/// JPEG quality of the rendered output (0-100).
pub const OUTPUT_JPEG_QUALITY: u8 = 90;

/// Warm sepia overlay used by the vintage preset.
const VINTAGE_OVERLAY: [u8; 3] = [112, 66, 20];
const VINTAGE_OVERLAY_ALPHA: f32 = 0.3;

const ARTISTIC_FILTERS: [ColorFilter; 2] =
    [ColorFilter::Contrast(1.2), ColorFilter::Saturate(1.3)];
const MINIMALIST_FILTERS: [ColorFilter; 2] =
    [ColorFilter::Grayscale(0.7), ColorFilter::Brightness(1.1)];

/// Filters applied while drawing the source onto the canvas.
fn draw_filters(style: Option<Style>) -> &'static [ColorFilter] {
    match style {
        Some(Style::Artistic) => &ARTISTIC_FILTERS,
        Some(Style::Minimalist) => &MINIMALIST_FILTERS,
        _ => &[],
    }
}

/// Size of the source once scaled by `min(size / w, size / h)`.
#[must_use]
pub fn fitted_dimensions(width: u32, height: u32, size: u32) -> (u32, u32) {
    let width = width.max(1);
    let height = height.max(1);
    let scale = (f64::from(size) / f64::from(width)).min(f64::from(size) / f64::from(height));
    let fit = |edge: u32| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = (f64::from(edge) * scale).round().clamp(1.0, f64::from(size)) as u32;
        scaled
    };
    (fit(width), fit(height))
}

/// Composes the styled canvas: scaled, centered, letterboxed, filtered.
///
/// An unrecognized style (`None`) produces the plain centered composite.
#[must_use]
pub fn compose(source: &DynamicImage, style: Option<Style>) -> RgbaImage {
    let (src_w, src_h) = source.dimensions();
    let (width, height) = fitted_dimensions(src_w, src_h, OUTPUT_SIZE);

    let mut scaled = imageops::resize(&source.to_rgba8(), width, height, FilterType::Triangle);
    color_filter::apply(draw_filters(style), &mut scaled);

    let mut canvas = RgbaImage::from_pixel(OUTPUT_SIZE, OUTPUT_SIZE, Rgba([0, 0, 0, 0]));
    let x = i64::from((OUTPUT_SIZE - width) / 2);
    let y = i64::from((OUTPUT_SIZE - height) / 2);
    imageops::overlay(&mut canvas, &scaled, x, y);

    if style == Some(Style::Vintage) {
        color_filter::fill_over(&mut canvas, VINTAGE_OVERLAY, VINTAGE_OVERLAY_ALPHA);
    }

    canvas
}

/// Renders `source_url` with `style` and returns the JPEG data URL.
///
/// The only failure path is a source that cannot be decoded (or, in theory,
/// encoded).
pub fn render(source_url: &str, style: Option<Style>) -> Result<String> {
    let source = data_url::decode(source_url)?;
    let canvas = compose(&source, style);
    data_url::encode_jpeg(&canvas, OUTPUT_JPEG_QUALITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
                255,
            ])
        }))
    }

    fn mean_rgb(image: &RgbaImage) -> [f64; 3] {
        let mut sum = [0.0; 3];
        for pixel in image.pixels() {
            for (acc, c) in sum.iter_mut().zip(pixel.0.iter()) {
                *acc += f64::from(*c);
            }
        }
        let n = f64::from(image.width() * image.height());
        sum.map(|s| s / n)
    }

    #[test]
    fn wide_source_is_letterboxed_vertically() {
        assert_eq!(fitted_dimensions(1024, 512, OUTPUT_SIZE), (512, 256));
    }

    #[test]
    fn tall_source_is_letterboxed_horizontally() {
        assert_eq!(fitted_dimensions(300, 600, OUTPUT_SIZE), (256, 512));
    }

    #[test]
    fn small_source_is_scaled_up() {
        assert_eq!(fitted_dimensions(64, 64, OUTPUT_SIZE), (512, 512));
    }

    #[test]
    fn output_is_always_square() {
        for style in Style::ALL {
            let canvas = compose(&gradient(90, 40), Some(style));
            assert_eq!(canvas.dimensions(), (OUTPUT_SIZE, OUTPUT_SIZE));
        }
    }

    #[test]
    fn letterbox_bands_stay_transparent_without_overlay() {
        let canvas = compose(&gradient(200, 100), Some(Style::Editorial));
        assert_eq!(canvas.get_pixel(256, 0).0[3], 0);
        assert_eq!(canvas.get_pixel(256, 256).0[3], 255);
    }

    #[test]
    fn editorial_and_streetwear_are_unmodified() {
        let source = gradient(64, 64);
        assert_eq!(
            compose(&source, Some(Style::Editorial)),
            compose(&source, Some(Style::Streetwear))
        );
        assert_eq!(compose(&source, Some(Style::Editorial)), compose(&source, None));
    }

    #[test]
    fn vintage_adds_a_warm_cast() {
        let source = gradient(64, 64);
        let plain = mean_rgb(&compose(&source, Some(Style::Editorial)));
        let vintage = mean_rgb(&compose(&source, Some(Style::Vintage)));

        assert_ne!(plain, vintage);
        // Warm: red gains relative to blue.
        assert!(vintage[0] - vintage[2] > plain[0] - plain[2]);
    }

    #[test]
    fn vintage_tints_letterbox_bands() {
        let canvas = compose(&gradient(200, 100), Some(Style::Vintage));
        let band = canvas.get_pixel(256, 0).0;
        assert_eq!(&band[..3], &VINTAGE_OVERLAY);
        assert!(band[3] > 0);
    }

    #[test]
    fn minimalist_reduces_saturation() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([220, 40, 40, 255])));
        let canvas = compose(&source, Some(Style::Minimalist));
        let [r, g, _, _] = canvas.get_pixel(256, 256).0;
        assert!(i32::from(r) - i32::from(g) < 180);
    }

    #[test]
    fn artistic_increases_contrast() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([40, 40, 40, 255])));
        let canvas = compose(&source, Some(Style::Artistic));
        assert!(canvas.get_pixel(256, 256).0[0] < 40);
    }

    #[test]
    fn render_produces_512_square_jpeg() {
        let source = data_url::encode_jpeg(&gradient(300, 200).to_rgba8(), 80).expect("encode");
        let rendered = render(&source, Some(Style::Vintage)).expect("render");
        let decoded = data_url::decode(&rendered).expect("decode");
        assert_eq!(decoded.dimensions(), (OUTPUT_SIZE, OUTPUT_SIZE));
    }

    #[test]
    fn render_propagates_decode_errors() {
        assert!(render("data:image/jpeg;base64,AAAA", Some(Style::Editorial)).is_err());
    }
}
