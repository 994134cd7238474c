//! Configuration of the image generation client.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::generate::{GenerateError, HUG_PROMPT};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// API root used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Where and how to call the generation service.
///
/// The API key is skipped during serialization and redacted from
/// `Debug` output so the config can be logged safely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Key sent in the `x-goog-api-key` header.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-2.5-flash-image-preview`.
    pub model: String,
    /// API root without a trailing `/models`.
    pub base_url: String,
    /// Text sent after the two images.
    pub prompt: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            prompt: HUG_PROMPT.to_owned(),
        }
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("prompt", &self.prompt)
            .finish()
    }
}

impl GeneratorConfig {
    /// Build a config from optional overrides, typically the values of
    /// `HUGFUSE_API_KEY`, `HUGFUSE_MODEL`, and `HUGFUSE_BASE_URL`.
    ///
    /// Empty or whitespace-only values count as absent.
    #[must_use]
    pub fn from_values(
        api_key: Option<&str>,
        model: Option<&str>,
        base_url: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_key: non_blank(api_key).map(str::to_owned),
            model: non_blank(model).map_or(defaults.model, str::to_owned),
            base_url: non_blank(base_url).map_or(defaults.base_url, str::to_owned),
            prompt: defaults.prompt,
        }
    }

    /// Full URL of the `generateContent` call for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// The API key, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingApiKey`] when no key is set.
    pub fn api_key(&self) -> Result<&str, GenerateError> {
        self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
