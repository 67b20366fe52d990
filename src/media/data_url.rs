// SPDX-License-Identifier: MPL-2.0
//! Self-contained `data:` URL encoding for rendered images.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, RgbImage, RgbaImage};

const JPEG_PREFIX: &str = "data:image/jpeg;base64,";

/// Encodes an RGBA image as a JPEG data URL.
///
/// JPEG has no alpha channel: pixels are composited onto black first, matching
/// what a canvas export does for transparent regions.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<String> {
    let flattened = flatten_onto_black(image);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .encode_image(&flattened)
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(format!("{JPEG_PREFIX}{}", STANDARD.encode(&bytes)))
}

/// Decodes any base64 `data:<mime>;base64,<payload>` URL into an image.
pub fn decode(data_url: &str) -> Result<DynamicImage> {
    let bytes = decode_bytes(data_url)?;
    Ok(image_rs::load_from_memory(&bytes)?)
}

/// Returns the raw payload bytes of a base64 data URL.
pub fn decode_bytes(data_url: &str) -> Result<Vec<u8>> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| Error::Decode("not a data URL".to_string()))?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(Error::Decode("unsupported data URL header".to_string()));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| Error::Decode(e.to_string()))
}

fn flatten_onto_black(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        let scale = |c: u8| (f32::from(c) * alpha).round() as u8;
        image_rs::Rgb([scale(r), scale(g), scale(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{GenericImageView, Rgba};

    #[test]
    fn encoded_url_has_jpeg_header() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let url = encode_jpeg(&image, 80).expect("encode");
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn decode_restores_dimensions() {
        let image = RgbaImage::from_pixel(12, 7, Rgba([200, 100, 50, 255]));
        let url = encode_jpeg(&image, 90).expect("encode");
        let decoded = decode(&url).expect("decode");
        assert_eq!(decoded.dimensions(), (12, 7));
    }

    #[test]
    fn transparent_pixels_become_black() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0]));
        assert_eq!(flatten_onto_black(&image).get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn decode_rejects_plain_strings() {
        assert!(matches!(decode("hello"), Err(Error::Decode(_))));
    }

    #[test]
    fn decode_rejects_non_base64_header() {
        assert!(matches!(
            decode("data:image/png,rawbytes"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn decode_rejects_garbage_payload() {
        assert!(decode("data:image/png;base64,!!!!").is_err());
    }
}
