//! HTTP client for `models/{model}:generateContent`.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use oh_core::{GenerativeProvider, ImageConfig, ObjectSchema, ProviderError};
use tracing::{debug, warn};

use crate::config::GeminiConfig;
use crate::wire::{GenerateContentRequest, GenerateContentResponse, error_message};

/// [`GenerativeProvider`] backed by the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client. Fails only if the HTTP stack cannot be initialised.
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("oh-card/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        Ok(Self { http, config })
    }

    /// Create a client configured from the process environment.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(GeminiConfig::from_env())
    }

    /// The active configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;

        debug!(model, "sending generateContent request");
        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", key)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    async fn generate_text(
        &self,
        prompt: &str,
        schema: &ObjectSchema,
    ) -> Result<Option<String>, ProviderError> {
        let request = GenerateContentRequest::structured(prompt, schema);
        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;
        Ok(response.text())
    }

    async fn generate_image(
        &self,
        prompt: &str,
        config: &ImageConfig,
    ) -> Result<Option<Vec<u8>>, ProviderError> {
        let request = GenerateContentRequest::image(prompt, &config.aspect_ratio);
        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;

        let Some(inline) = response.first_inline_data() else {
            debug!("image response carried no inline data");
            return Ok(None);
        };
        debug!(mime_type = ?inline.mime_type, "received inline image");
        match STANDARD.decode(inline.data.as_bytes()) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) => {
                warn!(error = %e, "inline image payload is not valid base64");
                Ok(None)
            }
        }
    }
}

fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport(err.to_string())
}
