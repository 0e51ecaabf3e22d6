//! Aggregate progress and settings, and their persistence.
//!
//! `ProgressStore` wraps a [`KeyValueStore`] with typed loads and saves.
//! Every storage failure is logged and absorbed here: loads fall back to
//! defaults, saves are dropped.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::store::{keys, load_json, save_json, KeyValueStore};
use crate::garden::{Garden, GardenItem, Position};

/// Progress that outlives a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    pub best_score: usize,
    pub total_matches: usize,
    /// Every item ever earned, oldest first.
    pub garden_items: Vec<GardenItem>,
}

impl GameStats {
    /// Count a match and keep its item.
    pub fn record_match(&mut self, item: GardenItem) {
        self.total_matches += 1;
        self.garden_items.push(item);
    }

    /// Fold a finished round's score in. Returns true on a new best.
    pub fn record_round(&mut self, score: usize) -> bool {
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Mark an item as planted at `position`. Returns false if unknown.
    pub fn mark_planted(&mut self, item_id: &str, position: Position) -> bool {
        match self.garden_items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.is_planted = true;
                item.position = Some(position);
                true
            }
            None => false,
        }
    }

    /// Forget an item that will never be planted. Returns false if unknown.
    pub fn discard(&mut self, item_id: &str) -> bool {
        let before = self.garden_items.len();
        self.garden_items.retain(|item| item.id != item_id);
        self.garden_items.len() != before
    }

    /// Items not planted yet.
    pub fn unplanted(&self) -> impl Iterator<Item = &GardenItem> {
        self.garden_items.iter().filter(|item| !item.is_planted)
    }
}

/// A toggleable preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Setting {
    Sound,
    Haptic,
}

impl Setting {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Setting::Sound => keys::SOUND_ENABLED,
            Setting::Haptic => keys::HAPTIC_ENABLED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub haptic_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            haptic_enabled: true,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::Sound => self.sound_enabled,
            Setting::Haptic => self.haptic_enabled,
        }
    }

    /// Flip a setting and return its new value.
    pub fn toggle(&mut self, setting: Setting) -> bool {
        let slot = match setting {
            Setting::Sound => &mut self.sound_enabled,
            Setting::Haptic => &mut self.haptic_enabled,
        };
        *slot = !*slot;
        *slot
    }
}

/// Typed, failure-tolerant access to the persisted progress.
#[derive(Clone, Debug, Default)]
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stored stats, or zeroed stats if absent or unreadable.
    #[must_use]
    pub fn load_stats(&self) -> GameStats {
        self.load_or_default(keys::GAME_STATS)
    }

    pub fn save_stats(&mut self, stats: &GameStats) {
        self.save(keys::GAME_STATS, stats);
    }

    /// Stored settings; each missing or unreadable value defaults to on.
    #[must_use]
    pub fn load_settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            sound_enabled: self.load_or(Setting::Sound.key(), defaults.sound_enabled),
            haptic_enabled: self.load_or(Setting::Haptic.key(), defaults.haptic_enabled),
        }
    }

    pub fn save_setting(&mut self, setting: Setting, value: bool) {
        self.save(setting.key(), &value);
    }

    /// Stored garden, if there is a readable one with `plot_count`
    /// well-formed plots. Anything else counts as a failed read.
    #[must_use]
    pub fn load_garden(&self, plot_count: usize) -> Option<Garden> {
        let garden: Garden = match load_json(&self.store, keys::GARDEN_DATA) {
            Ok(garden) => garden?,
            Err(err) => {
                warn!("could not load {}: {err}", keys::GARDEN_DATA);
                return None;
            }
        };
        match garden.validate(plot_count) {
            Ok(()) => Some(garden),
            Err(err) => {
                warn!("discarding stored {}: {err}", keys::GARDEN_DATA);
                None
            }
        }
    }

    pub fn save_garden(&mut self, garden: &Garden) {
        self.save(keys::GARDEN_DATA, garden);
    }

    /// Forget stats and garden. Settings are kept.
    pub fn reset(&mut self) {
        match self.store.remove_many(&[keys::GAME_STATS, keys::GARDEN_DATA]) {
            Ok(()) => info!("game data reset"),
            Err(err) => warn!("could not reset game data: {err}"),
        }
    }

    fn load_or_default<T>(&self, key: &str) -> T
    where
        T: Default + serde::de::DeserializeOwned,
    {
        self.load_or(key, T::default())
    }

    fn load_or<T>(&self, key: &str, fallback: T) -> T
    where
        T: serde::de::DeserializeOwned,
    {
        match load_json(&self.store, key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                warn!("could not load {key}, using defaults: {err}");
                fallback
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Err(err) = save_json(&mut self.store, key, value) {
            warn!("could not save {key}: {err}");
        }
    }
}
