pub mod deck;
pub mod draw;
pub mod session;

use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;
use oh_core::{AiDraw, Card, CardSource, Deck, DrawConfig, DrawCoordinator, DrawMode};
use oh_gemini::GeminiClient;
use tracing::debug;

/// The coordinator type every command drives.
pub type Coordinator = DrawCoordinator<AiDraw<GeminiClient>>;

/// Options shared by the drawing commands.
pub struct DrawOptions {
    pub config: DrawConfig,
    pub deck: Option<PathBuf>,
}

impl DrawOptions {
    pub fn new(seed: Option<u64>, no_delay: bool, deck: Option<PathBuf>) -> Self {
        let mut config = DrawConfig::default();
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        if no_delay {
            config = config.with_ritual_delay(Duration::ZERO);
        }
        Self { config, deck }
    }
}

/// Load a custom deck, or the built-in one.
fn load_deck(path: Option<&Path>) -> Result<Deck, String> {
    match path {
        Some(path) => Deck::from_json_file(path).map_err(|e| e.to_string()),
        None => Ok(Deck::classic()),
    }
}

/// Build a coordinator over the deck and the environment-configured provider.
fn build_coordinator(opts: &DrawOptions) -> Result<Coordinator, String> {
    let deck = load_deck(opts.deck.as_deref())?;
    let client =
        GeminiClient::from_env().map_err(|e| format!("failed to set up AI provider: {e}"))?;
    Ok(DrawCoordinator::new(deck, AiDraw::new(client), &opts.config))
}

/// Draw one card, pausing first for classic draws.
async fn draw_card(coordinator: &Coordinator, mode: DrawMode, delay: Duration) -> Option<Card> {
    if mode == DrawMode::Classic && !delay.is_zero() {
        debug!(?delay, "pausing before reveal");
        tokio::time::sleep(delay).await;
    }
    coordinator.draw(mode).await
}

/// Render a card for the terminal.
fn render_card(card: &Card) -> String {
    let badge = match card.source() {
        CardSource::Ai => "AI Generated".magenta().bold(),
        CardSource::Classic => "Classic".cyan().bold(),
    };
    format!(
        "  “{}”\n\n  {}  {}\n  {}  {}\n  {}  {}",
        card.text().bold(),
        "source:".dimmed(),
        badge,
        "image: ".dimmed(),
        display_image(card.image_url()),
        "id:    ".dimmed(),
        card.id(),
    )
}

/// Shorten inline `data:` URIs, which can run to megabytes.
fn display_image(url: &str) -> String {
    const PREVIEW: usize = 40;
    if !url.starts_with("data:") {
        return url.to_string();
    }
    match url.char_indices().nth(PREVIEW) {
        Some((end, _)) => format!("{}… ({} bytes inline)", &url[..end], url.len()),
        None => url.to_string(),
    }
}
