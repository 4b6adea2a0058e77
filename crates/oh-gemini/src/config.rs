//! Provider configuration, read from the process environment.

/// Default text model.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted by [`GeminiConfig::from_env`], in order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` makes every call fail with `MissingApiKey`.
    pub api_key: Option<String>,
    /// Model used for the structured quote request.
    pub text_model: String,
    /// Model used for the illustration request.
    pub image_model: String,
    /// API root, without a trailing slash.
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Read the configuration from the process environment.
    ///
    /// The key comes from `GEMINI_API_KEY`, then `API_KEY`. `OH_TEXT_MODEL`,
    /// `OH_IMAGE_MODEL` and `OH_GEMINI_BASE_URL` override the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: API_KEY_VARS.iter().find_map(|name| get(*name)),
            text_model: get("OH_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: get("OH_IMAGE_MODEL").unwrap_or(defaults.image_model),
            base_url: get("OH_GEMINI_BASE_URL").unwrap_or(defaults.base_url),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the text model.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Set the image model.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }
}
