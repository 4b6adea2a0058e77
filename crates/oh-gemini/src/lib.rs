//! Gemini provider for the OH card oracle.
//!
//! Implements [`oh_core::GenerativeProvider`] over the `generateContent` REST
//! endpoint: a structured JSON request for the quote and image prompt, and an
//! image request whose first inline payload becomes the card illustration.

pub mod client;
pub mod config;
mod wire;

pub use client::GeminiClient;
pub use config::GeminiConfig;
