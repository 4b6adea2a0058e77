//! Error types for card acquisition.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the deck, the draw strategies, and mode parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A draw mode string did not name a known mode.
    #[error("invalid draw mode: {0} (expected `classic` or `ai`)")]
    InvalidMode(String),

    /// A deck was built without any quotes.
    #[error("deck has no quotes")]
    EmptyDeck,

    /// A deck file could not be read.
    #[error("failed to read deck file {path}: {source}")]
    DeckIo {
        /// Path of the deck file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A deck file was not valid deck JSON.
    #[error("invalid deck file: {0}")]
    DeckFormat(#[from] serde_json::Error),

    /// A generative provider call failed.
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

/// Failures reported by a [`GenerativeProvider`](crate::provider::GenerativeProvider).
///
/// Any of these during an AI draw counts as a hard failure: the whole card is
/// replaced by the fallback card and relabeled `classic`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No API key was configured for the provider.
    #[error("no API key configured")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the provider's error envelope.
        message: String,
    },

    /// The provider's response envelope could not be decoded.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}
