//! Garden plots and collected items.

use serde::{Deserialize, Serialize};

use super::growth::GrowthStage;

/// Grid coordinate of a plot: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Coordinate of plot `index` in a grid `columns` wide.
    #[must_use]
    pub fn of_plot(index: usize, columns: usize) -> Self {
        let columns = columns.max(1);
        Self { x: index % columns, y: index / columns }
    }
}

/// A collectible earned by matching a pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenItem {
    /// Unique, derived from the time it was earned.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub emoji: String,
    pub is_planted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl GardenItem {
    /// A fresh, unplanted item.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            emoji: emoji.into(),
            is_planted: false,
            position: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilState {
    #[default]
    Empty,
    Tilled,
    Watered,
    Planted,
}

/// Something wrong with a plot that destroys seeds planted there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hazard {
    Pests,
}

impl std::fmt::Display for Hazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hazard::Pests => f.write_str("pests"),
        }
    }
}

/// One garden cell.
///
/// `planted_seed_id` is set exactly when `soil_state` is `Planted`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub id: String,
    pub soil_state: SoilState,
    pub planted_seed_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_stage: Option<GrowthStage>,
    /// Wall-clock milliseconds at planting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_time: Option<i64>,
    #[serde(default)]
    pub hazard: Option<Hazard>,
}

impl Plot {
    /// The plot id for grid index `index`.
    #[must_use]
    pub fn id_for(index: usize) -> String {
        format!("plot-{index}")
    }

    /// An empty plot.
    #[must_use]
    pub fn new(index: usize, hazard: Option<Hazard>) -> Self {
        Self {
            id: Self::id_for(index),
            soil_state: SoilState::Empty,
            planted_seed_id: None,
            planted_emoji: None,
            growth_stage: None,
            planted_time: None,
            hazard,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.soil_state == SoilState::Empty
    }

    #[must_use]
    pub fn is_planted(&self) -> bool {
        self.soil_state == SoilState::Planted
    }

    /// Put `item` in the ground at `now_ms`.
    pub(crate) fn plant(&mut self, item: &GardenItem, now_ms: i64) {
        self.soil_state = SoilState::Planted;
        self.planted_seed_id = Some(item.id.clone());
        self.planted_emoji = Some(item.emoji.clone());
        self.growth_stage = Some(GrowthStage::Seedling);
        self.planted_time = Some(now_ms);
    }

    /// Milliseconds since planting, if planted.
    #[must_use]
    pub fn age_ms(&self, now_ms: i64) -> Option<u64> {
        let planted = self.planted_time?;
        Some(u64::try_from(now_ms.saturating_sub(planted)).unwrap_or(0))
    }

    /// The stage a planted plot should show at `now_ms`.
    #[must_use]
    pub fn stage_at(&self, now_ms: i64, span_ms: u64) -> Option<GrowthStage> {
        self.age_ms(now_ms).map(|age| GrowthStage::at(age, span_ms))
    }
}
