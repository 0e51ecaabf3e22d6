//! # garden-match
//!
//! Core of a memory-matching card game with a small garden on the side.
//!
//! Players flip cards two at a time looking for pairs before a countdown
//! runs out. Every pair found becomes a seed that can be planted in a
//! grid of plots, some of which hide pests.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: No rendering, no real timers, no real storage.
//!    Hosts plug in a [`KeyValueStore`] and an [`AudioService`] and drive
//!    time through [`App::advance`].
//!
//! 2. **Deterministic**: All randomness flows from one seed through
//!    [`GameRng`], and all delays run on a virtual clock. The same seed
//!    and the same inputs always produce the same game.
//!
//! 3. **Configuration Over Convention**: Delays, hazard odds, garden size
//!    and the ambiguous rules are all [`GameConfig`] fields.
//!
//! ## Modules
//!
//! - `core`: configuration, RNG, timer queue
//! - `cards`: catalog, cards, deck generation
//! - `rules`: match engine and session clock
//! - `garden`: plots, inventory, planting, growth
//! - `services`: persistence and audio seams
//! - `app`: the application state and its events

pub mod app;
pub mod cards;
pub mod core;
pub mod error;
pub mod garden;
pub mod rules;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    Difficulty, DifficultyProfile, GameConfig, GameRng, HazardPolicy,
    InventoryPolicy, Scheduler, TimerId,
};

pub use crate::cards::{generate_deck, Card, CardId, CatalogEntry, Category, Deck, CATALOG};

pub use crate::rules::{
    ClockTick, IgnoreReason, MatchPhase, PressOutcome, Resolution, Session, SessionClock,
};

pub use crate::garden::{
    Garden, GardenItem, GrowthStage, Hazard, PlantIgnoreReason, PlantOutcome, Plot, Position,
    SoilState,
};

pub use crate::services::{
    AudioService, GameStats, KeyValueStore, MemoryStore, Setting, Settings, SilentAudio,
    SoundCue,
};

pub use crate::app::{App, GameEvent, Snapshot};

pub use crate::error::{AudioError, GameError, GardenError, StoreError};
