//! Conversion of uploaded file bytes into [`ImageData`].
//!
//! The browser's read-as-data-URL takes the MIME type from the file
//! metadata. Here the type is sniffed from the magic bytes instead,
//! with the filename extension as a fallback, so a mislabelled file is
//! still sent with its real type.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as Base64;
use image::ImageFormat;

use crate::types::{ImageData, LoadError};

/// Value for the file input's `accept` attribute.
pub const ACCEPTED_TYPES: &str = "image/png, image/jpeg, image/webp";

/// Determine the image MIME type of a file.
///
/// Returns `None` when neither the contents nor the extension of
/// `filename` identify an image format.
#[must_use]
pub fn sniff_mime_type(bytes: &[u8], filename: &str) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .or_else(|| {
            Path::new(filename)
                .extension()
                .and_then(ImageFormat::from_extension)
        })
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with("image/"))
}

impl ImageData {
    /// Build an image from the raw bytes of an uploaded file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Empty`] if `bytes` is empty and
    /// [`LoadError::NotAnImage`] if the file is not recognised as an
    /// image.
    pub fn from_file_bytes(bytes: &[u8], filename: &str) -> Result<Self, LoadError> {
        if bytes.is_empty() {
            return Err(LoadError::Empty);
        }
        let mime_type = sniff_mime_type(bytes, filename).ok_or(LoadError::NotAnImage)?;
        tracing::debug!(filename, mime_type, size = bytes.len(), "encoded upload");
        Ok(Self::new(mime_type, Base64.encode(bytes)))
    }
}
