//! Card acquisition core for the OH card oracle.
//!
//! Produces exactly one fully populated [`Card`] per draw, either from the
//! static [`Deck`] or through a [`GenerativeProvider`], and reconciles
//! provider failures into a consistent card shape: soft per-field defaults
//! when a response is unusable, a hard whole-card fallback (relabeled
//! `classic`) when a call fails, and a classic draw as the coordinator's last
//! resort.

pub mod ai;
pub mod card;
pub mod config;
pub mod coordinator;
pub mod deck;
pub mod error;
pub mod provider;

pub use ai::{AiDraw, AiOutcome, AiPrompts, DegradedField};
pub use card::{Card, CardId, CardSource, DrawMode};
pub use config::DrawConfig;
pub use coordinator::{CardStrategy, DrawCoordinator};
pub use deck::{Deck, ImageSet};
pub use error::{CoreError, CoreResult, ProviderError};
pub use provider::{GenerativeProvider, ImageConfig, ObjectSchema};
