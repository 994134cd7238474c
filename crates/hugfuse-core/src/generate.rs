//! Request/response contract of the image generation service.
//!
//! The service is Gemini's `generateContent` REST endpoint. This module
//! builds the request body and interprets the response; the HTTP round
//! trip itself lives in `hugfuse-io`.

use serde::{Deserialize, Serialize};

use crate::types::ImageData;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Prompt sent after the two input images.
pub const HUG_PROMPT: &str = "Create a single, photorealistic image of the person in the first \
image and the person in the second image sharing a warm, friendly hug. Preserve each person's \
face, hair, skin tone, and clothing so both remain clearly recognisable. Use natural lighting \
and a simple, softly blurred background. Return only the image.";

/// Errors from the generation round trip.
///
/// The `Display` text is shown to the user after "Generation failed: ".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// No API key was configured at build time.
    #[error("no API key configured (set HUGFUSE_API_KEY when building)")]
    MissingApiKey,

    /// The request could not be sent or the response body not read.
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the service's error body, or the raw body.
        message: String,
    },

    /// The prompt was blocked by the service's safety filters.
    #[error("the request was blocked ({0})")]
    Blocked(String),

    /// The service answered without an image.
    #[error("{}", describe_no_image(.0.as_deref()))]
    NoImage(Option<String>),

    /// The response body was not the expected JSON.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

fn describe_no_image(detail: Option<&str>) -> String {
    detail.map_or_else(
        || "the model did not return an image".to_owned(),
        |detail| format!("the model did not return an image: {detail}"),
    )
}

/// Body of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; a single user turn here.
    pub contents: Vec<Content>,
    /// Output settings.
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Build the request for a hug image: both images, then the prompt.
    #[must_use]
    pub fn hug(first: &ImageData, second: &ImageData, prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts: vec![
                    Part::image(first.clone()),
                    Part::image(second.clone()),
                    Part::text(prompt),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_owned(), "TEXT".to_owned()],
            },
        }
    }
}

/// Output settings of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Modalities the model may answer with.
    pub response_modalities: Vec<String>,
}

/// One turn of content, in a request or a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A piece of content: text or an inline image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<ImageData>,
}

impl Part {
    fn image(image: ImageData) -> Self {
        Self {
            inline_data: Some(image),
            ..Self::default()
        }
    }

    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_owned()),
            ..Self::default()
        }
    }
}

/// Body of a successful `generateContent` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// `{"error": {...}}` body the service sends with failure statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Pick the generated image out of a response.
///
/// The first candidate part carrying a non-empty `image/*` payload wins.
/// Other inline data is skipped. Text parts are only used to explain a
/// missing image.
///
/// # Errors
///
/// Returns [`GenerateError::Blocked`] if the prompt was blocked and
/// [`GenerateError::NoImage`] if no candidate contains an image.
pub fn extract_image(response: GenerateContentResponse) -> Result<ImageData, GenerateError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(GenerateError::Blocked(reason));
    }

    let mut texts = Vec::new();
    let mut finish_reason = None;
    for candidate in response.candidates {
        if finish_reason.is_none() {
            finish_reason = candidate.finish_reason;
        }
        for part in candidate.content.into_iter().flat_map(|c| c.parts) {
            if let Some(image) = part.inline_data.filter(is_usable_image) {
                return Ok(image);
            }
            if let Some(text) = part.text.filter(|t| !t.trim().is_empty()) {
                texts.push(text.trim().to_owned());
            }
        }
    }

    let detail = if texts.is_empty() {
        finish_reason.map(|reason| format!("finish reason {reason}"))
    } else {
        Some(texts.join(" "))
    };
    Err(GenerateError::NoImage(detail))
}

/// Inline data worth showing: an `image/*` type with a non-empty payload.
fn is_usable_image(image: &ImageData) -> bool {
    image.mime_type.starts_with("image/") && !image.data.is_empty()
}

/// Interpret an HTTP status and body from the service.
///
/// # Errors
///
/// Returns [`GenerateError::Api`] for non-2xx statuses,
/// [`GenerateError::InvalidResponse`] for bodies that are not the
/// expected JSON, and whatever [`extract_image`] returns otherwise.
pub fn parse_response(status: u16, body: &str) -> Result<ImageData, GenerateError> {
    if !(200..300).contains(&status) {
        return Err(GenerateError::Api {
            status,
            message: api_error_message(body),
        });
    }
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;
    extract_image(response)
}

/// Message from an error body, or the trimmed raw body if it is not JSON.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body).map_or_else(
        |_| body.trim().to_owned(),
        |parsed| parsed.error.message,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn first() -> ImageData {
        ImageData::new("image/png", "Zmlyc3Q=")
    }

    fn second() -> ImageData {
        ImageData::new("image/jpeg", "c2Vjb25k")
    }

    #[test]
    fn request_carries_images_then_prompt() {
        let request = GenerateContentRequest::hug(&first(), &second(), "hug please");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "c2Vjb25k" } },
                        { "text": "hug please" },
                    ],
                }],
                "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] },
            })
        );
    }

    #[test]
    fn image_part_is_extracted() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here you go!" },
                        { "inlineData": { "mimeType": "image/png", "data": "cmVzdWx0" } },
                    ],
                },
                "finishReason": "STOP",
            }],
        })
        .to_string();
        let image = parse_response(200, &body).unwrap();
        assert_eq!(image, ImageData::new("image/png", "cmVzdWx0"));
    }

    #[test]
    fn snake_case_inline_data_is_accepted() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "inline_data": { "mime_type": "image/webp", "data": "d2VicA==" } },
                ] },
            }],
        })
        .to_string();
        assert_eq!(parse_response(200, &body).unwrap().mime_type, "image/webp");
    }

    #[test]
    fn empty_image_payload_is_no_image() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "" } },
                ] },
                "finishReason": "STOP",
            }],
        })
        .to_string();
        assert_eq!(
            parse_response(200, &body),
            Err(GenerateError::NoImage(Some("finish reason STOP".into())))
        );
    }

    #[test]
    fn non_image_inline_data_is_skipped() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "inlineData": { "mimeType": "application/pdf", "data": "JVBERg==" } },
                ] },
            }],
        })
        .to_string();
        assert_eq!(
            parse_response(200, &body),
            Err(GenerateError::NoImage(None))
        );
    }

    #[test]
    fn usable_image_after_unusable_part_is_returned() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "" } },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "anBn" } },
                ] },
            }],
        })
        .to_string();
        assert_eq!(
            parse_response(200, &body).unwrap(),
            ImageData::new("image/jpeg", "anBn")
        );
    }

    #[test]
    fn text_only_answer_explains_missing_image() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "  I can't help with that.  " }] },
                "finishReason": "STOP",
            }],
        })
        .to_string();
        let err = parse_response(200, &body).unwrap_err();
        assert_eq!(
            err,
            GenerateError::NoImage(Some("I can't help with that.".into()))
        );
        assert_eq!(
            err.to_string(),
            "the model did not return an image: I can't help with that."
        );
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let body = json!({ "candidates": [{ "finishReason": "IMAGE_SAFETY" }] }).to_string();
        assert_eq!(
            parse_response(200, &body),
            Err(GenerateError::NoImage(Some(
                "finish reason IMAGE_SAFETY".into()
            )))
        );
    }

    #[test]
    fn no_candidates_is_no_image() {
        let err = parse_response(200, "{}").unwrap_err();
        assert_eq!(err, GenerateError::NoImage(None));
        assert_eq!(err.to_string(), "the model did not return an image");
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
        assert_eq!(
            parse_response(200, &body),
            Err(GenerateError::Blocked("SAFETY".into()))
        );
    }

    #[test]
    fn api_error_message_is_surfaced() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
            },
        })
        .to_string();
        let err = parse_response(400, &body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "service returned status 400: API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn non_json_error_body_is_kept_verbatim() {
        assert_eq!(
            parse_response(502, " Bad Gateway\n"),
            Err(GenerateError::Api {
                status: 502,
                message: "Bad Gateway".into(),
            })
        );
    }

    #[test]
    fn malformed_success_body_is_invalid() {
        assert!(matches!(
            parse_response(200, "<html>"),
            Err(GenerateError::InvalidResponse(_))
        ));
    }
}
