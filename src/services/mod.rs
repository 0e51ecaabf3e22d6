//! Host-facing services: persistence and audio.
//!
//! The core talks to storage and sound through the [`KeyValueStore`] and
//! [`AudioService`] traits. Neither may block or fail a game transition;
//! errors are logged and absorbed at this boundary.

pub mod audio;
pub mod stats;
pub mod store;

pub use audio::{AudioService, SilentAudio, SoundCue};
pub use stats::{GameStats, ProgressStore, Setting, Settings};
pub use store::{keys, load_json, save_json, KeyValueStore, MemoryStore};
