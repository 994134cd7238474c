//! HTTP round trip to the image generation service.
//!
//! Uses `reqwest`, which is backed by `fetch` on `wasm32`. Request
//! bodies and response interpretation come from
//! [`hugfuse_core::generate`].

use hugfuse_core::generate::{self, API_KEY_HEADER, GenerateContentRequest};
use hugfuse_core::{GenerateError, GeneratorConfig, ImageData};

/// Ask the service for an image of the two people hugging.
///
/// Returns the generated image as a data URL. No retries, no timeout:
/// the future resolves when the service answers or the request fails.
///
/// # Errors
///
/// Returns [`GenerateError::MissingApiKey`] before sending anything if
/// no key is configured, [`GenerateError::Transport`] if the request
/// fails, and the errors of [`generate::parse_response`] otherwise.
#[allow(clippy::future_not_send)] // reqwest futures are !Send on wasm32
pub async fn generate_hug_image(
    config: &GeneratorConfig,
    first: &ImageData,
    second: &ImageData,
) -> Result<String, GenerateError> {
    let api_key = config.api_key()?;
    let body = GenerateContentRequest::hug(first, second, &config.prompt);

    tracing::info!(
        model = %config.model,
        first = %first.mime_type,
        second = %second.mime_type,
        "requesting hug image"
    );

    let response = reqwest::Client::new()
        .post(config.endpoint())
        .header(API_KEY_HEADER, api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| GenerateError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| GenerateError::Transport(e.to_string()))?;
    tracing::debug!(status, body_len = text.len(), "generation service answered");

    let image = generate::parse_response(status, &text)?;
    tracing::info!(
        mime_type = %image.mime_type,
        payload_len = image.data.len(),
        "hug image generated"
    );
    Ok(image.to_data_url())
}
