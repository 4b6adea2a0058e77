//! Capability interface for remote content generation.
//!
//! The AI strategy talks to providers only through [`GenerativeProvider`], so
//! the fallback logic can be exercised with in-memory fakes.

use async_trait::async_trait;

use crate::error::ProviderError;

/// Aspect ratio of a physical card (portrait).
pub const CARD_ASPECT_RATIO: &str = "3:4";

/// Declared shape of a structured text response: an object whose properties
/// are all strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    properties: Vec<String>,
    required: Vec<String>,
}

impl ObjectSchema {
    /// Add a required string property.
    pub fn required_string(mut self, name: &str) -> Self {
        self.properties.push(name.to_string());
        self.required.push(name.to_string());
        self
    }

    /// Schema of the card prompt: `{quote, imagePrompt}`, both required.
    pub fn card_prompt() -> Self {
        Self::default()
            .required_string("quote")
            .required_string("imagePrompt")
    }

    /// Property names in declaration order.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Names of required properties.
    pub fn required(&self) -> &[String] {
        &self.required
    }
}

/// Options for an image generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    /// Target aspect ratio, e.g. `3:4`.
    pub aspect_ratio: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: CARD_ASPECT_RATIO.to_string(),
        }
    }
}

/// A remote text + image generation backend.
///
/// An `Err` from either method is a hard failure of the whole draw. A
/// successful call that carries nothing usable is reported as `Ok(None)`.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Request structured JSON text constrained by `schema`.
    ///
    /// Returns the raw response text, unparsed.
    async fn generate_text(
        &self,
        prompt: &str,
        schema: &ObjectSchema,
    ) -> Result<Option<String>, ProviderError>;

    /// Request an illustration and return the first inline image payload.
    async fn generate_image(
        &self,
        prompt: &str,
        config: &ImageConfig,
    ) -> Result<Option<Vec<u8>>, ProviderError>;
}
