//! Saving the generated image via Blob URLs.
//!
//! Dioxus has no built-in file download API.  This module decodes the
//! image payload into a `Blob`, generates an object URL, and
//! programmatically clicks a temporary `<a>` element.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use hugfuse_core::ImageData;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when triggering a download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The image payload is not valid base64.
    #[error("image data is corrupt: {0}")]
    Decode(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Download `image` as `<basename>.<ext>`, the extension following its
/// MIME type.
///
/// # Errors
///
/// Returns [`DownloadError::Decode`] if the payload is not base64, or
/// [`DownloadError::JsError`] if any browser API call fails.
pub fn download_image(image: &ImageData, basename: &str) -> Result<(), DownloadError> {
    let bytes = image
        .decode_bytes()
        .map_err(|e| DownloadError::Decode(e.to_string()))?;
    trigger_download(&bytes, &download_filename(image, basename), &image.mime_type)
}

/// `<basename>.<ext>` with the extension following the image's MIME type.
#[must_use]
pub fn download_filename(image: &ImageData, basename: &str) -> String {
    format!("{basename}.{}", image.extension())
}

/// Trigger a file download in the browser.
///
/// Creates a `Blob` from `data`, generates an object URL, and
/// programmatically clicks a temporary `<a download="filename">` element.
/// The object URL is revoked after the click.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails
/// (e.g., `Blob` creation, `URL.createObjectURL`, element creation).
pub fn trigger_download(data: &[u8], filename: &str, mime_type: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(data));

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download has already started; cleanup failures are not download failures.
    let _ = body.remove_child(&anchor);
    let _ = web_sys::Url::revoke_object_url(&url);

    tracing::info!(filename, size = data.len(), "downloaded generated image");
    Ok(())
}
