//! Core engine types: configuration, RNG, and the timer queue.
//!
//! Everything here is game-agnostic plumbing the rest of the crate builds
//! on.

pub mod config;
pub mod rng;
pub mod scheduler;

pub use config::{Difficulty, DifficultyProfile, GameConfig, HazardPolicy, InventoryPolicy};
pub use rng::GameRng;
pub use scheduler::{Fired, Scheduler, TimerId};
