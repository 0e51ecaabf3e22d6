//! The garden: a fixed grid of plots that collected items are planted in.
//!
//! - `Garden`: plots, inventory, tools, and the planting rules
//! - `Plot`, `GardenItem`: the persisted records
//! - `GrowthStage`: seedling → sprout → bloom over a fixed span
//!
//! Hazards are rolled once when a garden is created. What they do to a
//! seed is decided by `HazardPolicy`.

pub mod growth;
pub mod manager;
pub mod plot;

pub use growth::GrowthStage;
pub use manager::{Garden, PlantIgnoreReason, PlantOutcome, PlantingPolicy, Tools};
pub use plot::{GardenItem, Hazard, Plot, Position, SoilState};
