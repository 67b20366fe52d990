// SPDX-License-Identifier: MPL-2.0
//! Upload validation and preview downscaling.
//!
//! A picked file is first validated from its metadata alone (media type and
//! size). Only accepted files are read, decoded and downscaled so that the
//! longer edge is at most [`MAX_PREVIEW_DIMENSION`], then re-encoded as a JPEG
//! data URL.

use super::data_url;
use crate::error::{Error, Result, ValidationError};
use image_rs::{imageops::FilterType, GenericImageView};
use std::fs;
use std::path::{Path, PathBuf};

/// Longest edge of a preview, in pixels.
pub const MAX_PREVIEW_DIMENSION: u32 = 1920;

/// Upload ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// JPEG quality of the preview (0-100).
pub const PREVIEW_JPEG_QUALITY: u8 = 80;

const ACCEPTED_MEDIA_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// Metadata of a picked file that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub media_type: &'static str,
}

impl SourceFile {
    /// Validates a file from its metadata, without reading its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for unsupported types or oversize files
    /// and [`Error::Io`] if the metadata cannot be read.
    pub fn inspect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = media_type_for_path(path);
        // Type first: a wrong type is reported even if the file is missing.
        if media_type.is_none() {
            return Err(ValidationError::UnsupportedFileType.into());
        }
        let size_bytes = fs::metadata(path)?.len();
        validate_upload(media_type, size_bytes)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size_bytes,
            media_type: media_type.unwrap_or_default(),
        })
    }
}

/// Downscaled, self-contained preview of a source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

/// Maps a file extension to the media type the upload check understands.
#[must_use]
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Checks the upload contract: PNG/JPEG only and at most [`MAX_UPLOAD_BYTES`].
///
/// # Errors
///
/// Returns the first violated rule, type before size.
pub fn validate_upload(
    media_type: Option<&str>,
    size_bytes: u64,
) -> std::result::Result<(), ValidationError> {
    let accepted = media_type.is_some_and(|mime| ACCEPTED_MEDIA_TYPES.contains(&mime));
    if !accepted {
        return Err(ValidationError::UnsupportedFileType);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(())
}

/// Computes preview dimensions so that the longer edge is at most `max`.
///
/// Fractional results are truncated, as a raster surface of that size would
/// be. Images already within bounds are returned unchanged.
#[must_use]
pub fn target_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let (w, h, m) = (u64::from(width), u64::from(height), u64::from(max));
    #[allow(clippy::cast_possible_truncation)]
    if width > height {
        (max, ((h * m) / w).max(1) as u32)
    } else {
        (((w * m) / h).max(1) as u32, max)
    }
}

/// Decodes `bytes`, downscales and re-encodes them as a preview.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the bytes are not a decodable image.
pub fn preprocess_bytes(bytes: &[u8]) -> Result<Preview> {
    let image = image_rs::load_from_memory(bytes)?;
    let (src_w, src_h) = image.dimensions();
    let (width, height) = target_dimensions(src_w, src_h, MAX_PREVIEW_DIMENSION);

    let scaled = if (width, height) == (src_w, src_h) {
        image.to_rgba8()
    } else {
        image
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgba8()
    };

    Ok(Preview {
        data_url: data_url::encode_jpeg(&scaled, PREVIEW_JPEG_QUALITY)?,
        width,
        height,
    })
}

/// Reads and preprocesses a validated source on the blocking pool.
pub async fn preprocess(source: SourceFile) -> Result<Preview> {
    tokio::task::spawn_blocking(move || {
        let bytes = fs::read(&source.path)?;
        preprocess_bytes(&bytes)
    })
    .await
    .map_err(|e| Error::Decode(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 120, 150])));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).expect("encode test image");
        buffer.into_inner()
    }

    #[test]
    fn landscape_is_capped_on_width() {
        assert_eq!(target_dimensions(3000, 2000, 1920), (1920, 1280));
    }

    #[test]
    fn portrait_is_capped_on_height() {
        assert_eq!(target_dimensions(1000, 4000, 1920), (480, 1920));
    }

    #[test]
    fn square_above_limit_becomes_limit() {
        assert_eq!(target_dimensions(4000, 4000, 1920), (1920, 1920));
    }

    #[test]
    fn small_images_are_untouched() {
        assert_eq!(target_dimensions(800, 600, 1920), (800, 600));
        assert_eq!(target_dimensions(1920, 1080, 1920), (1920, 1080));
    }

    #[test]
    fn png_and_jpeg_are_accepted() {
        assert!(validate_upload(Some("image/png"), 10).is_ok());
        assert!(validate_upload(Some("image/jpeg"), 10).is_ok());
        assert!(validate_upload(Some("image/jpg"), 10).is_ok());
    }

    #[test]
    fn other_types_are_rejected() {
        assert_eq!(
            validate_upload(Some("image/gif"), 10),
            Err(ValidationError::UnsupportedFileType)
        );
        assert_eq!(
            validate_upload(None, 10),
            Err(ValidationError::UnsupportedFileType)
        );
    }

    #[test]
    fn exactly_ten_mebibytes_is_accepted() {
        assert!(validate_upload(Some("image/png"), MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn eleven_mebibytes_is_rejected() {
        assert_eq!(
            validate_upload(Some("image/jpeg"), 11 * 1024 * 1024),
            Err(ValidationError::FileTooLarge)
        );
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert_eq!(media_type_for_path(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(media_type_for_path(Path::new("a.Png")), Some("image/png"));
        assert_eq!(media_type_for_path(Path::new("a.webp")), None);
        assert_eq!(media_type_for_path(Path::new("noext")), None);
    }

    #[test]
    fn inspect_rejects_oversize_file_without_reading_it() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("huge.jpg");
        // Sparse file: declared size only, contents are not an image.
        let file = fs::File::create(&path).expect("create");
        file.set_len(11 * 1024 * 1024).expect("set len");

        assert_eq!(
            SourceFile::inspect(&path),
            Err(Error::Validation(ValidationError::FileTooLarge))
        );
    }

    #[test]
    fn inspect_reports_name_and_size() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("photo.png");
        let bytes = encoded(4, 4, ImageFormat::Png);
        fs::write(&path, &bytes).expect("write");

        let source = SourceFile::inspect(&path).expect("inspect");
        assert_eq!(source.name, "photo.png");
        assert_eq!(source.size_bytes, bytes.len() as u64);
        assert_eq!(source.media_type, "image/png");
    }

    #[test]
    fn inspect_rejects_wrong_extension_first() {
        assert_eq!(
            SourceFile::inspect("/does/not/exist.gif"),
            Err(Error::Validation(ValidationError::UnsupportedFileType))
        );
    }

    #[test]
    fn large_jpeg_preview_preserves_aspect_ratio() {
        let preview = preprocess_bytes(&encoded(3000, 2000, ImageFormat::Jpeg)).expect("preview");
        assert_eq!((preview.width, preview.height), (1920, 1280));

        let decoded = data_url::decode(&preview.data_url).expect("decode");
        assert_eq!(decoded.dimensions(), (1920, 1280));
    }

    #[test]
    fn small_png_keeps_its_size() {
        let preview = preprocess_bytes(&encoded(320, 200, ImageFormat::Png)).expect("preview");
        assert_eq!((preview.width, preview.height), (320, 200));
        assert!(preview.data_url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn undecodable_bytes_fail() {
        assert!(preprocess_bytes(b"not an image").is_err());
    }

    #[tokio::test]
    async fn preprocess_reads_from_disk() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("in.png");
        fs::write(&path, encoded(2400, 600, ImageFormat::Png)).expect("write");

        let source = SourceFile::inspect(&path).expect("inspect");
        let preview = preprocess(source).await.expect("preview");
        assert_eq!((preview.width, preview.height), (1920, 480));
    }
}
