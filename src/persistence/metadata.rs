//! Save summaries
//!
//! Metadata is a small JSON file written next to each full snapshot so a
//! slot list can be shown without loading the whole ecosystem.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::Tick;
use crate::ecosystem::Ecosystem;
use crate::persistence::snapshot::SIM_VERSION;

/// Below this many live plants the ecosystem is short of food
pub const LOW_VEGETATION_PLANTS: usize = 20;
/// Fraction of the global cap above which the ecosystem is crowded
pub const HIGH_DENSITY_FRACTION: f32 = 0.8;

/// Coarse qualitative label for a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcosystemHealth {
    Balanced,
    LowVegetation,
    HighDensity,
}

impl EcosystemHealth {
    /// Crowding is checked last and wins over low vegetation
    pub fn assess(live_animals: usize, live_plants: usize, max_animals: usize) -> Self {
        let mut health = EcosystemHealth::Balanced;
        if live_plants < LOW_VEGETATION_PLANTS {
            health = EcosystemHealth::LowVegetation;
        }
        if live_animals as f32 > max_animals as f32 * HIGH_DENSITY_FRACTION {
            health = EcosystemHealth::HighDensity;
        }
        health
    }
}

impl fmt::Display for EcosystemHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EcosystemHealth::Balanced => "Balanced",
            EcosystemHealth::LowVegetation => "Low vegetation",
            EcosystemHealth::HighDensity => "High density",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub timestamp: DateTime<Utc>,
    pub tick: Tick,
    pub animals: usize,
    pub plants: usize,
    pub health: EcosystemHealth,
    pub version: String,
    pub autosave: bool,
    /// Autosave interval in ticks at the time of the save (0 = off)
    pub autosave_interval: u64,
}

impl SaveMetadata {
    pub fn describe(world: &Ecosystem, autosave: bool, autosave_interval: u64) -> Self {
        let animals = world.live_animal_count();
        let plants = world.live_plant_count();
        Self {
            timestamp: Utc::now(),
            tick: world.current_tick,
            animals,
            plants,
            health: EcosystemHealth::assess(animals, plants, world.max_animals),
            version: SIM_VERSION.to_string(),
            autosave,
            autosave_interval,
        }
    }

    /// One-line summary for slot listings
    pub fn summary(&self) -> String {
        format!(
            "{} | tick {} | {} animals, {} plants | {}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.tick,
            self.animals,
            self.plants,
            self.health,
            if self.autosave { " | autosave" } else { "" }
        )
    }
}
