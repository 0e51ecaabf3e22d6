//! Garden state: the plot grid, the seed inventory, and planting rules.
//!
//! Plots and inventory are `im` vectors so snapshots handed to the
//! presentation layer are O(1) clones.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use super::growth::GrowthStage;
use super::plot::{GardenItem, Hazard, Plot};
use crate::core::{GameConfig, GameRng, HazardPolicy, InventoryPolicy};
use crate::error::GardenError;

/// Tools the player owns. Both are always available for now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tools {
    pub watering_can: bool,
    pub trowel: bool,
}

impl Default for Tools {
    fn default() -> Self {
        Self { watering_can: true, trowel: true }
    }
}

/// The rules `plant_seed` applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlantingPolicy {
    pub hazard: HazardPolicy,
    pub inventory: InventoryPolicy,
}

impl From<&GameConfig> for PlantingPolicy {
    fn from(config: &GameConfig) -> Self {
        Self {
            hazard: config.hazard_policy,
            inventory: config.inventory_policy,
        }
    }
}

/// Why a plant request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantIgnoreReason {
    UnknownPlot,
    PlotNotEmpty,
    EmptyInventory,
}

/// What a plant request did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantOutcome {
    /// The item is in the ground.
    Planted { plot_index: usize, item: GardenItem },
    /// A hazard ate the item; the plot is still empty.
    Destroyed {
        plot_index: usize,
        item: GardenItem,
        hazard: Hazard,
    },
    /// Nothing changed.
    Ignored(PlantIgnoreReason),
}

/// Plots, inventory and tools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garden {
    plots: Vector<Plot>,
    inventory: Vector<GardenItem>,
    #[serde(default)]
    tools: Tools,
}

impl Garden {
    /// A garden of `plot_count` empty plots, each carrying a hazard with
    /// probability `hazard_probability`. Hazards are rolled once, here.
    #[must_use]
    pub fn new(plot_count: usize, hazard_probability: f64, rng: &mut GameRng) -> Self {
        let plots = (0..plot_count)
            .map(|index| {
                let hazard = rng.gen_bool(hazard_probability).then_some(Hazard::Pests);
                Plot::new(index, hazard)
            })
            .collect();

        Self {
            plots,
            inventory: Vector::new(),
            tools: Tools::default(),
        }
    }

    // === Queries ===

    /// All plots in grid order.
    #[must_use]
    pub fn plots(&self) -> &Vector<Plot> {
        &self.plots
    }

    /// The plot at grid index `index`.
    #[must_use]
    pub fn plot(&self, index: usize) -> Option<&Plot> {
        self.plots.get(index)
    }

    /// Index of the plot with id `plot_id`.
    #[must_use]
    pub fn plot_index(&self, plot_id: &str) -> Option<usize> {
        self.plots.iter().position(|plot| plot.id == plot_id)
    }

    /// Unplanted items, oldest first.
    #[must_use]
    pub fn inventory(&self) -> &Vector<GardenItem> {
        &self.inventory
    }

    /// Tools the player owns.
    #[must_use]
    pub fn tools(&self) -> Tools {
        self.tools
    }

    /// Number of plots carrying a hazard.
    #[must_use]
    pub fn hazard_count(&self) -> usize {
        self.plots.iter().filter(|plot| plot.hazard.is_some()).count()
    }

    /// Number of plots with something growing.
    #[must_use]
    pub fn planted_count(&self) -> usize {
        self.plots.iter().filter(|plot| plot.is_planted()).count()
    }

    /// Check that this is a grid of `plot_count` plots named `plot-<i>`
    /// in order, each holding a seed id exactly when it is planted.
    pub fn validate(&self, plot_count: usize) -> Result<(), GardenError> {
        if self.plots.len() != plot_count {
            return Err(GardenError::PlotCount { expected: plot_count, found: self.plots.len() });
        }
        for (index, plot) in self.plots.iter().enumerate() {
            if plot.id != Plot::id_for(index) {
                return Err(GardenError::PlotId { index, id: plot.id.clone() });
            }
            if plot.is_planted() != plot.planted_seed_id.is_some() {
                return Err(GardenError::SeedMismatch { index });
            }
        }
        Ok(())
    }

    // === Mutations ===

    /// Add a freshly earned item to the back of the inventory.
    pub fn add_item(&mut self, item: GardenItem) {
        self.inventory.push_back(item);
    }

    /// Try to plant on `plot_id`.
    ///
    /// Only empty plots accept seeds, and only while the inventory has
    /// something in it. Which item is used depends on
    /// `policy.inventory`; what a hazard does depends on `policy.hazard`.
    /// The chosen item leaves the inventory whether it grows or not.
    pub fn plant_seed(
        &mut self,
        plot_id: &str,
        requested_item: Option<&str>,
        now_ms: i64,
        policy: PlantingPolicy,
    ) -> PlantOutcome {
        let Some(plot_index) = self.plot_index(plot_id) else {
            return PlantOutcome::Ignored(PlantIgnoreReason::UnknownPlot);
        };
        if !self.plots[plot_index].is_empty() {
            return PlantOutcome::Ignored(PlantIgnoreReason::PlotNotEmpty);
        }
        let Some(item) = self.take_item(requested_item, policy.inventory) else {
            return PlantOutcome::Ignored(PlantIgnoreReason::EmptyInventory);
        };

        let plot = &mut self.plots[plot_index];
        match (plot.hazard, policy.hazard) {
            (Some(hazard), HazardPolicy::DestroySeed) => {
                debug!("{hazard} on {} destroyed {}", plot.id, item.id);
                PlantOutcome::Destroyed { plot_index, item, hazard }
            }
            (Some(hazard), HazardPolicy::ClearAfterDestroy) => {
                debug!("{hazard} on {} destroyed {} and moved on", plot.id, item.id);
                plot.hazard = None;
                PlantOutcome::Destroyed { plot_index, item, hazard }
            }
            _ => {
                plot.plant(&item, now_ms);
                debug!("planted {} ({}) on {}", item.id, item.kind, plot.id);
                PlantOutcome::Planted { plot_index, item }
            }
        }
    }

    fn take_item(&mut self, requested: Option<&str>, policy: InventoryPolicy) -> Option<GardenItem> {
        let index = match (policy, requested) {
            (InventoryPolicy::Requested, Some(id)) => {
                self.inventory.iter().position(|item| item.id == id).unwrap_or(0)
            }
            _ => 0,
        };
        (index < self.inventory.len()).then(|| self.inventory.remove(index))
    }

    /// Move a planted plot forward to `stage`. Never moves backwards.
    /// Returns true if the stage changed.
    pub fn set_growth_stage(&mut self, plot_index: usize, stage: GrowthStage) -> bool {
        let Some(plot) = self.plots.get_mut(plot_index) else {
            return false;
        };
        if !plot.is_planted() || plot.growth_stage.is_some_and(|current| current >= stage) {
            return false;
        }
        plot.growth_stage = Some(stage);
        true
    }

    /// Bring every planted plot up to the stage it should show at
    /// `now_ms`. Returns the plots that changed.
    pub fn catch_up_growth(&mut self, now_ms: i64, span_ms: u64) -> Vec<(usize, GrowthStage)> {
        let due: Vec<_> = self
            .plots
            .iter()
            .enumerate()
            .filter_map(|(index, plot)| plot.stage_at(now_ms, span_ms).map(|stage| (index, stage)))
            .collect();

        due.into_iter()
            .filter(|&(index, stage)| self.set_growth_stage(index, stage))
            .collect()
    }

    /// Stage changes still ahead at `now_ms`, as (plot, stage, delay).
    #[must_use]
    pub fn upcoming_growth(&self, now_ms: i64, span_ms: u64) -> Vec<(usize, GrowthStage, u64)> {
        let mut upcoming = Vec::new();
        for (index, plot) in self.plots.iter().enumerate() {
            let (Some(age), Some(stage)) = (plot.age_ms(now_ms), plot.growth_stage) else {
                continue;
            };
            for next in stage.later() {
                let starts = next.starts_after(span_ms);
                if starts > age {
                    upcoming.push((index, next, starts - age));
                }
            }
        }
        upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_garden() -> Garden {
        Garden::new(36, 0.0, &mut GameRng::new(1))
    }

    fn item(n: u32) -> GardenItem {
        GardenItem::new(format!("item-{n}"), "rose", "🌹")
    }

    fn pest_plot(garden: &mut Garden, index: usize) {
        garden.plots[index].hazard = Some(Hazard::Pests);
    }

    #[test]
    fn test_new_garden() {
        let garden = clear_garden();
        assert_eq!(garden.plots().len(), 36);
        assert!(garden.plots().iter().all(Plot::is_empty));
        assert_eq!(garden.hazard_count(), 0);
        assert!(garden.inventory().is_empty());
        assert_eq!(garden.tools(), Tools { watering_can: true, trowel: true });
        assert_eq!(garden.plot_index("plot-35"), Some(35));
    }

    #[test]
    fn test_all_hazards() {
        let garden = Garden::new(36, 1.0, &mut GameRng::new(1));
        assert_eq!(garden.hazard_count(), 36);
    }

    #[test]
    fn test_nan_hazard_probability_rolls_nothing() {
        let garden = Garden::new(36, f64::NAN, &mut GameRng::new(1));
        assert_eq!(garden.hazard_count(), 0);
    }

    #[test]
    fn test_validate() {
        let mut garden = clear_garden();
        garden.add_item(item(1));
        garden.plant_seed("plot-4", None, 0, PlantingPolicy::default());
        assert_eq!(garden.validate(36), Ok(()));
        assert_eq!(
            garden.validate(25),
            Err(GardenError::PlotCount { expected: 25, found: 36 })
        );

        let mut renamed = garden.clone();
        renamed.plots[2].id = "plot-9".into();
        assert_eq!(
            renamed.validate(36),
            Err(GardenError::PlotId { index: 2, id: "plot-9".into() })
        );

        let mut seedless = garden.clone();
        seedless.plots[4].planted_seed_id = None;
        assert_eq!(seedless.validate(36), Err(GardenError::SeedMismatch { index: 4 }));

        let mut ghost = garden;
        ghost.plots[0].planted_seed_id = Some("item-1".into());
        assert_eq!(ghost.validate(36), Err(GardenError::SeedMismatch { index: 0 }));
    }

    #[test]
    fn test_plant_uses_first_item() {
        let mut garden = clear_garden();
        garden.add_item(item(1));
        garden.add_item(item(2));

        let outcome = garden.plant_seed("plot-4", Some("item-2"), 500, PlantingPolicy::default());
        assert_eq!(outcome, PlantOutcome::Planted { plot_index: 4, item: item(1) });
        assert_eq!(garden.inventory().len(), 1);
        assert_eq!(garden.inventory()[0].id, "item-2");
        assert_eq!(garden.plot(4).unwrap().planted_seed_id.as_deref(), Some("item-1"));
    }

    #[test]
    fn test_requested_policy() {
        let mut garden = clear_garden();
        garden.add_item(item(1));
        garden.add_item(item(2));
        let policy = PlantingPolicy { inventory: InventoryPolicy::Requested, ..Default::default() };

        let outcome = garden.plant_seed("plot-0", Some("item-2"), 0, policy);
        assert!(matches!(outcome, PlantOutcome::Planted { ref item, .. } if item.id == "item-2"));

        // Unknown request falls back to the oldest item.
        let outcome = garden.plant_seed("plot-1", Some("nope"), 0, policy);
        assert!(matches!(outcome, PlantOutcome::Planted { ref item, .. } if item.id == "item-1"));
    }

    #[test]
    fn test_ignored_cases() {
        let mut garden = clear_garden();
        let policy = PlantingPolicy::default();
        assert_eq!(
            garden.plant_seed("plot-0", None, 0, policy),
            PlantOutcome::Ignored(PlantIgnoreReason::EmptyInventory)
        );

        garden.add_item(item(1));
        assert_eq!(
            garden.plant_seed("plot-99", None, 0, policy),
            PlantOutcome::Ignored(PlantIgnoreReason::UnknownPlot)
        );

        garden.add_item(item(2));
        garden.plant_seed("plot-0", None, 0, policy);
        let before = garden.clone();
        assert_eq!(
            garden.plant_seed("plot-0", None, 0, policy),
            PlantOutcome::Ignored(PlantIgnoreReason::PlotNotEmpty)
        );
        assert_eq!(garden, before);
    }

    #[test]
    fn test_hazard_destroys_seed() {
        let mut garden = clear_garden();
        pest_plot(&mut garden, 2);
        garden.add_item(item(1));

        let outcome = garden.plant_seed("plot-2", None, 0, PlantingPolicy::default());
        assert_eq!(
            outcome,
            PlantOutcome::Destroyed { plot_index: 2, item: item(1), hazard: Hazard::Pests }
        );
        assert!(garden.inventory().is_empty());
        assert!(garden.plot(2).unwrap().is_empty());
        assert_eq!(garden.plot(2).unwrap().hazard, Some(Hazard::Pests));
    }

    #[test]
    fn test_clear_after_destroy() {
        let mut garden = clear_garden();
        pest_plot(&mut garden, 2);
        garden.add_item(item(1));
        garden.add_item(item(2));
        let policy = PlantingPolicy { hazard: HazardPolicy::ClearAfterDestroy, ..Default::default() };

        assert!(matches!(garden.plant_seed("plot-2", None, 0, policy), PlantOutcome::Destroyed { .. }));
        assert!(garden.plot(2).unwrap().hazard.is_none());
        assert!(matches!(garden.plant_seed("plot-2", None, 0, policy), PlantOutcome::Planted { .. }));
    }

    #[test]
    fn test_ignore_hazard_policy() {
        let mut garden = clear_garden();
        pest_plot(&mut garden, 2);
        garden.add_item(item(1));
        let policy = PlantingPolicy { hazard: HazardPolicy::Ignore, ..Default::default() };

        assert!(matches!(garden.plant_seed("plot-2", None, 0, policy), PlantOutcome::Planted { .. }));
        assert_eq!(garden.plot(2).unwrap().hazard, Some(Hazard::Pests));
    }

    #[test]
    fn test_growth_stage_only_moves_forward() {
        let mut garden = clear_garden();
        assert!(!garden.set_growth_stage(0, GrowthStage::Sprout));

        garden.add_item(item(1));
        garden.plant_seed("plot-0", None, 0, PlantingPolicy::default());
        assert!(garden.set_growth_stage(0, GrowthStage::Bloom));
        assert!(!garden.set_growth_stage(0, GrowthStage::Sprout));
        assert_eq!(garden.plot(0).unwrap().growth_stage, Some(GrowthStage::Bloom));
    }

    #[test]
    fn test_catch_up_and_upcoming_growth() {
        let mut garden = clear_garden();
        garden.add_item(item(1));
        garden.add_item(item(2));
        garden.plant_seed("plot-0", None, 0, PlantingPolicy::default());
        garden.plant_seed("plot-1", None, 25_000, PlantingPolicy::default());

        let changed = garden.catch_up_growth(30_000, 60_000);
        assert_eq!(changed, vec![(0, GrowthStage::Sprout)]);

        let upcoming = garden.upcoming_growth(30_000, 60_000);
        assert_eq!(
            upcoming,
            vec![
                (0, GrowthStage::Bloom, 10_000),
                (1, GrowthStage::Sprout, 15_000),
                (1, GrowthStage::Bloom, 35_000),
            ]
        );
    }

    #[test]
    fn test_serde_roundtrip_keeps_hazards() {
        let garden = Garden::new(36, 0.3, &mut GameRng::new(11));
        let json = serde_json::to_string(&garden).unwrap();
        let back: Garden = serde_json::from_str(&json).unwrap();
        assert_eq!(back, garden);
        assert_eq!(back.hazard_count(), garden.hazard_count());
    }
}
