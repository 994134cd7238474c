//! Shared types for hugfuse.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as Base64;
use serde::{Deserialize, Serialize};

/// Extension used for downloads when the MIME type is not a known
/// image format.
const FALLBACK_EXTENSION: &str = "png";

/// An image held in memory: its MIME type and base64-encoded payload.
///
/// Serializes with camelCase keys so it doubles as the `inlineData`
/// object of the generation service's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// MIME type, e.g. `image/png`.
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// Standard (padded) base64 payload.
    pub data: String,
}

impl ImageData {
    /// Create a new image from a MIME type and a base64 payload.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Format as a `data:<mime-type>;base64,<payload>` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the base64 payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`base64::DecodeError`] if the payload is not valid
    /// standard base64.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        Base64.decode(&self.data)
    }

    /// Preferred file extension for this image's MIME type.
    ///
    /// Falls back to `png` for MIME types the `image` crate does not
    /// recognise.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        image::ImageFormat::from_mime_type(&self.mime_type)
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or(FALLBACK_EXTENSION)
    }
}

/// Reasons a string is not an acceptable data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DataUrlError {
    /// The string does not start with `data:`.
    #[error("data URL must start with `data:`")]
    MissingScheme,

    /// No `;base64,` separator was found.
    #[error("data URL has no `;base64,` separator")]
    MissingSeparator,

    /// Nothing between `data:` and `;base64,`.
    #[error("data URL has an empty MIME type")]
    EmptyMimeType,

    /// Nothing after the last usable `;base64,`.
    #[error("data URL has an empty payload")]
    EmptyPayload,

    /// The string contains a line terminator.
    #[error("data URL contains a line break")]
    LineBreak,
}

/// Errors that can occur when turning an uploaded file into [`ImageData`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The file contained no bytes.
    #[error("File is empty.")]
    Empty,

    /// Neither the file contents nor its name identify an image format.
    #[error("File is not an image.")]
    NotAnImage,

    /// The browser could not read the file.
    #[error("Failed to read file: {0}")]
    Read(String),
}
