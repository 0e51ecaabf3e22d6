//! Game configuration types.
//!
//! - `Difficulty` / `DifficultyProfile`: the fixed round presets
//! - `HazardPolicy`, `InventoryPolicy`: garden rules with more than one
//!   plausible reading
//! - `GameConfig`: everything the application state needs at startup
//!
//! `GameConfig` follows the builder style: start from `Default` and
//! override with `with_*` setters.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GameError;

/// Round difficulty selected by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The immutable profile for this difficulty.
    #[must_use]
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::new(6, 60),
            Difficulty::Medium => DifficultyProfile::new(8, 45),
            Difficulty::Hard => DifficultyProfile::new(12, 30),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Pair count and time limit for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyProfile {
    /// Number of pairs dealt.
    pub pairs: usize,
    /// Countdown length in whole seconds.
    pub time_limit_seconds: u32,
}

impl DifficultyProfile {
    #[must_use]
    pub const fn new(pairs: usize, time_limit_seconds: u32) -> Self {
        Self { pairs, time_limit_seconds }
    }

    /// Number of cards in a deck built from this profile.
    #[must_use]
    pub const fn deck_size(self) -> usize {
        self.pairs * 2
    }
}

/// What happens when a seed is planted on a plot carrying a hazard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardPolicy {
    /// The seed is destroyed and the hazard stays. Hazard plots can never
    /// be planted.
    #[default]
    DestroySeed,
    /// The seed is destroyed and the hazard is removed, so the next
    /// attempt on that plot succeeds.
    ClearAfterDestroy,
    /// Hazards never block planting.
    Ignore,
}

/// Which inventory item a plant request consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryPolicy {
    /// Always the oldest item, whatever the player picked.
    #[default]
    Fifo,
    /// The item the player picked, falling back to the oldest one when the
    /// request names nothing in the inventory.
    Requested,
}

/// Complete runtime configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// RNG seed. `None` seeds from entropy at load time.
    pub seed: Option<u64>,

    /// How long two face-up cards stay visible before resolving.
    pub resolution_delay_ms: u64,

    /// Session clock period.
    pub tick_interval_ms: u64,

    /// Probability that a fresh plot carries a hazard.
    pub hazard_probability: f64,

    /// Time from planting to full bloom.
    pub growth_span_ms: u64,

    /// Number of garden plots.
    pub plot_count: usize,

    /// Plots per garden row (used for item positions).
    pub grid_columns: usize,

    pub hazard_policy: HazardPolicy,

    pub inventory_policy: InventoryPolicy,

    /// Wall-clock milliseconds at which virtual time starts. `None` reads
    /// the system clock at load time.
    pub epoch_ms: Option<i64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            resolution_delay_ms: 1_000,
            tick_interval_ms: 1_000,
            hazard_probability: 0.3,
            growth_span_ms: 60_000,
            plot_count: 36,
            grid_columns: 6,
            hazard_policy: HazardPolicy::default(),
            inventory_policy: InventoryPolicy::default(),
            epoch_ms: None,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_resolution_delay_ms(mut self, delay: u64) -> Self {
        self.resolution_delay_ms = delay;
        self
    }

    #[must_use]
    pub fn with_hazard_probability(mut self, probability: f64) -> Self {
        self.hazard_probability = probability;
        self
    }

    #[must_use]
    pub fn with_growth_span_ms(mut self, span: u64) -> Self {
        self.growth_span_ms = span;
        self
    }

    #[must_use]
    pub fn with_hazard_policy(mut self, policy: HazardPolicy) -> Self {
        self.hazard_policy = policy;
        self
    }

    #[must_use]
    pub fn with_inventory_policy(mut self, policy: InventoryPolicy) -> Self {
        self.inventory_policy = policy;
        self
    }

    #[must_use]
    pub fn with_epoch_ms(mut self, epoch: i64) -> Self {
        self.epoch_ms = Some(epoch);
        self
    }
}
