//! Configuration for drawing cards.

use std::time::Duration;

/// Pause the shell inserts before revealing a classic card.
pub const DEFAULT_RITUAL_DELAY: Duration = Duration::from_millis(800);

/// Configuration for a [`DrawCoordinator`](crate::coordinator::DrawCoordinator)
/// and the shell driving it.
#[derive(Debug, Clone)]
pub struct DrawConfig {
    /// RNG seed for reproducible classic draws; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Minimum perceived duration of a classic draw. Applied by the shell,
    /// never by the core.
    pub ritual_delay: Duration,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ritual_delay: DEFAULT_RITUAL_DELAY,
        }
    }
}

impl DrawConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the ritual delay.
    pub fn with_ritual_delay(mut self, delay: Duration) -> Self {
        self.ritual_delay = delay;
        self
    }
}
