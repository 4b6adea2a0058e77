//! The card model shared by every draw strategy.
//!
//! A [`Card`] is built fresh for every draw and handed to the caller; the
//! core keeps no reference to it afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::{FALLBACK_IMAGE_URL, FALLBACK_QUOTE};
use crate::error::CoreError;

/// Which strategy produced a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSource {
    /// Drawn from the static deck, or substituted after a failed AI call.
    Classic,
    /// Generated by the AI provider.
    Ai,
}

impl fmt::Display for CardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// How the caller wants the next card acquired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Draw from the static deck.
    #[default]
    Classic,
    /// Generate a card through the AI provider.
    Ai,
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

impl FromStr for DrawMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "ai" => Ok(Self::Ai),
            other => Err(CoreError::InvalidMode(other.to_string())),
        }
    }
}

/// Opaque identifier, unique per draw.
///
/// Callers use it to tell a new card from the previous one even when the same
/// quote comes up twice in a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Mint a new id of the form `<prefix>-<unix millis>-<uuid>`.
    pub fn fresh(prefix: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        Self(format!("{prefix}-{millis}-{}", Uuid::new_v4().simple()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A drawn card: insight text, illustration, and provenance.
///
/// Text and image are never empty; [`Card::new`] substitutes defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    text: String,
    image_url: String,
    source: CardSource,
}

impl Card {
    /// Build a card, replacing blank text or image with the default ones.
    pub fn new(
        id: CardId,
        text: impl Into<String>,
        image_url: impl Into<String>,
        source: CardSource,
    ) -> Self {
        Self {
            id,
            text: non_blank_or(text.into(), FALLBACK_QUOTE),
            image_url: non_blank_or(image_url.into(), FALLBACK_IMAGE_URL),
            source,
        }
    }

    /// Unique id of this draw.
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// The insight sentence.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Remote URL or `data:` URI of the illustration.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Strategy that actually produced the card.
    pub fn source(&self) -> CardSource {
        self.source
    }

    /// Whether the image is carried inline as a `data:` URI.
    pub fn has_inline_image(&self) -> bool {
        self.image_url.starts_with("data:")
    }
}

fn non_blank_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}
