//! Signals for the presentation layer.
//!
//! Every state change the player should see (a flip, a match, a seed
//! eaten by pests) is recorded as a `GameEvent`. The host drains them
//! after each handler call or `advance` and plays whatever effect it
//! likes.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::Difficulty;
use crate::garden::{GardenItem, GrowthStage, Hazard};
use crate::services::Setting;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    RoundStarted {
        difficulty: Difficulty,
        pairs: usize,
        time_limit_seconds: u32,
    },
    CardFlipped {
        card: CardId,
    },
    PairMatched {
        first: CardId,
        second: CardId,
        item: GardenItem,
    },
    PairMismatched {
        first: CardId,
        second: CardId,
    },
    ClockTicked {
        time_remaining: u32,
    },
    RoundOver {
        won: bool,
        score: usize,
        new_best: bool,
    },
    SeedPlanted {
        plot_index: usize,
        item: GardenItem,
    },
    SeedDestroyed {
        plot_index: usize,
        item: GardenItem,
        hazard: Hazard,
    },
    GrowthAdvanced {
        plot_index: usize,
        stage: GrowthStage,
    },
    SettingChanged {
        setting: Setting,
        enabled: bool,
    },
    DataReset,
}
