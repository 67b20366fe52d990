// SPDX-License-Identifier: MPL-2.0
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Decode Error: {0}")]
    Decode(String),
    #[error("Encode Error: {0}")]
    Encode(String),
    #[error("Validation Error: {0}")]
    Validation(ValidationError),
}

impl Error {
    /// Returns the i18n message key used when this error reaches the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Validation(err) => err.i18n_key(),
            Error::Io(_) | Error::Decode(_) | Error::Encode(_) => "error-process-image",
            Error::Config(_) => "error-config",
        }
    }
}

/// User-correctable input problems. Reported synchronously, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    /// The picked file is not a PNG or JPEG image.
    #[error("unsupported file type")]
    UnsupportedFileType,

    /// The picked file is larger than the upload ceiling.
    #[error("file too large")]
    FileTooLarge,

    /// Generate was requested without an image or without a prompt.
    #[error("missing image or prompt")]
    MissingInput,
}

impl ValidationError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedFileType => "error-invalid-file-type",
            ValidationError::FileTooLarge => "error-file-too-large",
            ValidationError::MissingInput => "error-missing-input",
        }
    }
}

/// Terminal failure of a generate request, shown in the error banner.
///
/// Cancellation is deliberately absent: a cancelled request ends silently.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum GenerationError {
    /// The backend stayed overloaded through every retry.
    #[error("Model overloaded")]
    Overloaded,

    /// The preview could not be decoded or the result could not be encoded.
    #[error("{0}")]
    Decode(String),

    /// Generic error with raw message.
    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    /// Returns the i18n message key for the banner.
    pub fn i18n_key(&self) -> &'static str {
        "error-generation-failed"
    }

    /// Human-readable reason interpolated into the banner as `$reason`.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            image_rs::ImageError::Encoding(e) => Error::Encode(e.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn validation_errors_map_to_their_own_keys() {
        assert_eq!(
            ValidationError::UnsupportedFileType.i18n_key(),
            "error-invalid-file-type"
        );
        assert_eq!(ValidationError::FileTooLarge.i18n_key(), "error-file-too-large");
        assert_eq!(ValidationError::MissingInput.i18n_key(), "error-missing-input");
    }

    #[test]
    fn wrapped_validation_error_keeps_its_key() {
        let err: Error = ValidationError::FileTooLarge.into();
        assert_eq!(err.i18n_key(), "error-file-too-large");
    }

    #[test]
    fn decode_error_uses_generic_processing_key() {
        assert_eq!(
            Error::Decode("truncated".into()).i18n_key(),
            "error-process-image"
        );
    }

    #[test]
    fn overloaded_reason_matches_banner_text() {
        assert_eq!(GenerationError::Overloaded.reason(), "Model overloaded");
    }

    #[test]
    fn decode_reason_is_raw_message() {
        let err = GenerationError::Decode("bad header".into());
        assert_eq!(err.reason(), "bad header");
        assert_eq!(err.i18n_key(), "error-generation-failed");
    }
}
