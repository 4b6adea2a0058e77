//! Mode coordinator: the single `draw(mode)` entry point callers use.
//!
//! Classic draws go to the deck. AI draws go to a [`CardStrategy`]; if that
//! strategy returns an error anyway, the coordinator draws a classic card in
//! its place. At most one draw runs at a time; overlapping requests are
//! ignored rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::card::{Card, DrawMode};
use crate::config::DrawConfig;
use crate::deck::Deck;
use crate::error::CoreResult;

/// A way of producing one card asynchronously.
#[async_trait]
pub trait CardStrategy: Send + Sync {
    /// Produce a card.
    async fn draw_card(&self) -> CoreResult<Card>;
}

/// Releases the in-flight flag when dropped, including when the draw future
/// is dropped before completion.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Resolves a [`DrawMode`] into exactly one [`Card`].
pub struct DrawCoordinator<S> {
    deck: Deck,
    ai: S,
    rng: Mutex<StdRng>,
    in_flight: AtomicBool,
}

impl<S: CardStrategy> DrawCoordinator<S> {
    /// Create a coordinator over a classic deck and an AI strategy.
    pub fn new(deck: Deck, ai: S, config: &DrawConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            deck,
            ai,
            rng: Mutex::new(rng),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The classic deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The AI strategy.
    pub fn ai(&self) -> &S {
        &self.ai
    }

    /// Whether a draw is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Draw one card in the given mode.
    ///
    /// Returns `None` only when another draw is still pending. Otherwise a
    /// card is always produced: a failing AI strategy is replaced by a
    /// classic draw.
    pub async fn draw(&self, mode: DrawMode) -> Option<Card> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            debug!(%mode, "draw already in flight, ignoring request");
            return None;
        };

        let card = match mode {
            DrawMode::Classic => self.draw_classic(),
            DrawMode::Ai => match self.ai.draw_card().await {
                Ok(card) => card,
                Err(e) => {
                    warn!(error = %e, "ai strategy failed, drawing a classic card instead");
                    self.draw_classic()
                }
            },
        };
        Some(card)
    }

    fn draw_classic(&self) -> Card {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.deck.draw(&mut *rng)
    }
}
