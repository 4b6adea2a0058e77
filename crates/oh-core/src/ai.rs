//! AI draw strategy: a two-stage text + image generation pipeline.
//!
//! Stage 1 asks the provider for `{quote, imagePrompt}` as structured JSON.
//! Stage 2 turns `imagePrompt` into a 3:4 illustration. Failures degrade in
//! two tiers:
//!
//! - **soft**: the provider answered but the payload was unusable (bad JSON,
//!   missing fields, no image part). Each missing piece is replaced by its
//!   default and the card is still labeled `ai`.
//! - **hard**: a provider call itself failed. The whole card is replaced by
//!   the fallback card and labeled `classic`, since nothing was generated.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::card::{Card, CardId, CardSource};
use crate::coordinator::CardStrategy;
use crate::error::{CoreResult, ProviderError};
use crate::provider::{GenerativeProvider, ImageConfig, ObjectSchema};

/// Quote used when the generated payload carries none.
pub const DEFAULT_QUOTE: &str = "顺境滋养，逆境成长，一切都是体验的礼物";

/// Image prompt used when the generated payload carries none.
pub const DEFAULT_IMAGE_PROMPT: &str =
    "Abstract healing art, soft watercolor strokes, ethereal light, organic shapes, comforting colors";

/// Image used when the image response carries no inline payload.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://brave.wzznft.com/i/2025/12/27/s8kc8p.png";

/// Quote of the card substituted after a failed provider call.
pub const FALLBACK_QUOTE: &str = "凡是发生，必有利于我";

/// Image of the card substituted after a failed provider call.
pub const FALLBACK_IMAGE_URL: &str = "https://brave.wzznft.com/i/2025/12/27/s8khg4.png";

/// Instruction sent to the text model.
pub const CARD_PROMPT: &str = r#"Create content for a "Positive Psychology OH Card" (Insight Card).

Return a JSON object with:
1. 'quote': A single, profound, healing Chinese sentence (10-20 words). Examples: "顺境滋养，逆境成长", "凡是发生，必有利于我".
2. 'imagePrompt': An English image generation prompt describing a complete abstract art picture.
   Style requirements: "Abstract art, watercolor and ink fusion, fluid organic shapes, soft healing gradients, ethereal atmosphere, high quality, artistic, minimal textures".
   The image should visually represent the emotion of the quote."#;

/// Prompt and default literals used by [`AiDraw`].
#[derive(Debug, Clone)]
pub struct AiPrompts {
    /// Instruction for the text model.
    pub card_prompt: String,
    /// Soft default for a missing quote.
    pub default_quote: String,
    /// Soft default for a missing image prompt.
    pub default_image_prompt: String,
    /// Soft default for a missing image.
    pub placeholder_image_url: String,
    /// Quote of the hard fallback card.
    pub fallback_quote: String,
    /// Image of the hard fallback card.
    pub fallback_image_url: String,
}

impl Default for AiPrompts {
    fn default() -> Self {
        Self {
            card_prompt: CARD_PROMPT.to_string(),
            default_quote: DEFAULT_QUOTE.to_string(),
            default_image_prompt: DEFAULT_IMAGE_PROMPT.to_string(),
            placeholder_image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            fallback_quote: FALLBACK_QUOTE.to_string(),
            fallback_image_url: FALLBACK_IMAGE_URL.to_string(),
        }
    }
}

/// A part of a generated card that was replaced by its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedField {
    /// The quote was missing or unparsable.
    Quote,
    /// The image prompt was missing or unparsable.
    ImagePrompt,
    /// The image response carried no inline image.
    Image,
}

/// Result of one AI generation attempt.
#[derive(Debug, Clone)]
pub enum AiOutcome {
    /// Both provider calls succeeded. The card is labeled `ai`, with any
    /// unusable fields replaced by defaults.
    Generated {
        /// The generated card.
        card: Card,
        /// Fields that fell back to their defaults.
        degraded: Vec<DegradedField>,
    },
    /// A provider call failed; the card is the fallback card, labeled
    /// `classic`.
    Fallback {
        /// The substituted card.
        card: Card,
        /// Why generation was abandoned.
        reason: ProviderError,
    },
}

impl AiOutcome {
    /// Consume the outcome, keeping the card.
    pub fn into_card(self) -> Card {
        match self {
            Self::Generated { card, .. } | Self::Fallback { card, .. } => card,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardPrompt {
    quote: Option<String>,
    image_prompt: Option<String>,
}

impl CardPrompt {
    /// Parse the text response; anything unusable yields an empty prompt.
    fn parse(text: Option<&str>) -> Self {
        text.and_then(|t| serde_json::from_str(t).ok())
            .unwrap_or_default()
    }
}

/// Encode raw PNG bytes as a displayable `data:` URI.
pub fn png_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

/// Draws cards through a [`GenerativeProvider`].
pub struct AiDraw<P> {
    provider: P,
    prompts: AiPrompts,
    schema: ObjectSchema,
    image_config: ImageConfig,
}

impl<P: GenerativeProvider> AiDraw<P> {
    /// Create a strategy with the default prompts and a 3:4 image config.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            prompts: AiPrompts::default(),
            schema: ObjectSchema::card_prompt(),
            image_config: ImageConfig::default(),
        }
    }

    /// Replace the prompts and default literals.
    pub fn with_prompts(mut self, prompts: AiPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run both stages and reconcile failures into an [`AiOutcome`].
    pub async fn generate(&self) -> AiOutcome {
        match self.try_generate().await {
            Ok((card, degraded)) => {
                if degraded.is_empty() {
                    debug!(id = %card.id(), "generated ai card");
                } else {
                    warn!(id = %card.id(), ?degraded, "ai card generated with defaults");
                }
                AiOutcome::Generated { card, degraded }
            }
            Err(reason) => {
                error!(error = %reason, "card generation failed, using fallback card");
                let card = Card::new(
                    CardId::fresh("fallback"),
                    self.prompts.fallback_quote.clone(),
                    self.prompts.fallback_image_url.clone(),
                    CardSource::Classic,
                );
                AiOutcome::Fallback { card, reason }
            }
        }
    }

    async fn try_generate(&self) -> Result<(Card, Vec<DegradedField>), ProviderError> {
        let text = self
            .provider
            .generate_text(&self.prompts.card_prompt, &self.schema)
            .await?;
        let parsed = CardPrompt::parse(text.as_deref());

        let mut degraded = Vec::new();
        let quote = non_blank(parsed.quote).unwrap_or_else(|| {
            degraded.push(DegradedField::Quote);
            self.prompts.default_quote.clone()
        });
        let image_prompt = non_blank(parsed.image_prompt).unwrap_or_else(|| {
            degraded.push(DegradedField::ImagePrompt);
            self.prompts.default_image_prompt.clone()
        });

        let image_url = match self
            .provider
            .generate_image(&image_prompt, &self.image_config)
            .await?
        {
            Some(bytes) if !bytes.is_empty() => png_data_uri(&bytes),
            _ => {
                degraded.push(DegradedField::Image);
                self.prompts.placeholder_image_url.clone()
            }
        };

        let card = Card::new(CardId::fresh("ai"), quote, image_url, CardSource::Ai);
        Ok((card, degraded))
    }
}

#[async_trait]
impl<P: GenerativeProvider> CardStrategy for AiDraw<P> {
    async fn draw_card(&self) -> CoreResult<Card> {
        Ok(self.generate().await.into_card())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    const NO_BYTES: &[u8] = &[];

    /// Scripted provider that records the prompts it receives.
    struct FakeProvider {
        text: Result<Option<String>, ProviderError>,
        image: Result<Option<Vec<u8>>, ProviderError>,
        image_prompts: Mutex<Vec<String>>,
        aspect_ratios: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn new(
            text: Result<Option<&str>, ProviderError>,
            image: Result<Option<&[u8]>, ProviderError>,
        ) -> Self {
            Self {
                text: text.map(|t| t.map(str::to_string)),
                image: image.map(|i| i.map(<[u8]>::to_vec)),
                image_prompts: Mutex::new(Vec::new()),
                aspect_ratios: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeProvider for FakeProvider {
        async fn generate_text(
            &self,
            _prompt: &str,
            schema: &ObjectSchema,
        ) -> Result<Option<String>, ProviderError> {
            assert_eq!(schema, &ObjectSchema::card_prompt());
            self.text.clone()
        }

        async fn generate_image(
            &self,
            prompt: &str,
            config: &ImageConfig,
        ) -> Result<Option<Vec<u8>>, ProviderError> {
            self.image_prompts.lock().unwrap().push(prompt.to_string());
            self.aspect_ratios
                .lock()
                .unwrap()
                .push(config.aspect_ratio.clone());
            self.image.clone()
        }
    }

    #[tokio::test]
    async fn well_formed_responses_yield_ai_card() {
        let provider = FakeProvider::new(
            Ok(Some(r#"{"quote":"静待花开","imagePrompt":"soft blue watercolor"}"#)),
            Ok(Some(PNG_BYTES)),
        );
        let ai = AiDraw::new(provider);
        let outcome = ai.generate().await;

        let AiOutcome::Generated { card, degraded } = outcome else {
            panic!("expected a generated card");
        };
        assert!(degraded.is_empty());
        assert_eq!(card.text(), "静待花开");
        assert_eq!(card.source(), CardSource::Ai);
        assert!(card.image_url().starts_with("data:image/png;base64,"));
        assert_eq!(card.image_url(), png_data_uri(PNG_BYTES));
        assert!(card.id().as_str().starts_with("ai-"));

        assert_eq!(
            *ai.provider().image_prompts.lock().unwrap(),
            ["soft blue watercolor"]
        );
        assert_eq!(*ai.provider().aspect_ratios.lock().unwrap(), ["3:4"]);
    }

    #[tokio::test]
    async fn unparsable_json_keeps_ai_label_with_defaults() {
        let provider = FakeProvider::new(Ok(Some("not json at all")), Ok(None));
        let ai = AiDraw::new(provider);
        let outcome = ai.generate().await;

        let AiOutcome::Generated { card, degraded } = outcome else {
            panic!("expected a generated card");
        };
        assert_eq!(card.source(), CardSource::Ai);
        assert_eq!(card.text(), DEFAULT_QUOTE);
        assert_eq!(card.image_url(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            degraded,
            [
                DegradedField::Quote,
                DegradedField::ImagePrompt,
                DegradedField::Image
            ]
        );
        assert_eq!(
            *ai.provider().image_prompts.lock().unwrap(),
            [DEFAULT_IMAGE_PROMPT]
        );
    }

    #[tokio::test]
    async fn missing_text_is_treated_as_empty_object() {
        let provider = FakeProvider::new(Ok(None), Ok(Some(PNG_BYTES)));
        let card = AiDraw::new(provider).generate().await.into_card();
        assert_eq!(card.source(), CardSource::Ai);
        assert_eq!(card.text(), DEFAULT_QUOTE);
        assert!(card.has_inline_image());
    }

    #[tokio::test]
    async fn partial_payload_defaults_only_missing_fields() {
        let provider = FakeProvider::new(
            Ok(Some(r#"{"quote":"此刻即是礼物","imagePrompt":""}"#)),
            Ok(Some(PNG_BYTES)),
        );
        let ai = AiDraw::new(provider);
        let AiOutcome::Generated { card, degraded } = ai.generate().await else {
            panic!("expected a generated card");
        };
        assert_eq!(card.text(), "此刻即是礼物");
        assert_eq!(degraded, [DegradedField::ImagePrompt]);
    }

    #[tokio::test]
    async fn missing_image_part_uses_placeholder() {
        let provider = FakeProvider::new(
            Ok(Some(r#"{"quote":"静待花开","imagePrompt":"ink"}"#)),
            Ok(Some(NO_BYTES)),
        );
        let AiOutcome::Generated { card, degraded } = AiDraw::new(provider).generate().await
        else {
            panic!("expected a generated card");
        };
        assert_eq!(card.image_url(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(card.source(), CardSource::Ai);
        assert_eq!(degraded, [DegradedField::Image]);
    }

    #[tokio::test]
    async fn text_call_failure_relabels_as_classic() {
        let provider = FakeProvider::new(
            Err(ProviderError::Transport("connection refused".into())),
            Ok(Some(PNG_BYTES)),
        );
        let ai = AiDraw::new(provider);
        let outcome = ai.generate().await;

        let AiOutcome::Fallback { card, reason } = outcome else {
            panic!("expected the fallback card");
        };
        assert_eq!(reason, ProviderError::Transport("connection refused".into()));
        assert_eq!(card.source(), CardSource::Classic);
        assert_eq!(card.text(), FALLBACK_QUOTE);
        assert_eq!(card.image_url(), FALLBACK_IMAGE_URL);
        assert!(card.id().as_str().starts_with("fallback-"));
        assert!(ai.provider().image_prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn image_call_failure_relabels_as_classic() {
        let provider = FakeProvider::new(
            Ok(Some(r#"{"quote":"静待花开","imagePrompt":"ink"}"#)),
            Err(ProviderError::Status {
                status: 429,
                message: "quota".into(),
            }),
        );
        let card = AiDraw::new(provider).generate().await.into_card();
        assert_eq!(card.source(), CardSource::Classic);
        assert_eq!(card.text(), FALLBACK_QUOTE);
    }

    #[test]
    fn soft_and_hard_defaults_differ() {
        assert_ne!(DEFAULT_QUOTE, FALLBACK_QUOTE);
        assert_ne!(PLACEHOLDER_IMAGE_URL, FALLBACK_IMAGE_URL);
    }

    #[tokio::test]
    async fn strategy_never_errors() {
        let provider = FakeProvider::new(Err(ProviderError::MissingApiKey), Ok(None));
        let card = AiDraw::new(provider).draw_card().await.unwrap();
        assert_eq!(card.source(), CardSource::Classic);
    }

    #[tokio::test]
    async fn custom_prompts_are_used() {
        let prompts = AiPrompts {
            fallback_quote: "备用".into(),
            ..AiPrompts::default()
        };
        let provider = FakeProvider::new(Err(ProviderError::MissingApiKey), Ok(None));
        let card = AiDraw::new(provider)
            .with_prompts(prompts)
            .generate()
            .await
            .into_card();
        assert_eq!(card.text(), "备用");
    }
}
