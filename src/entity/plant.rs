//! Static plants and their growth stages

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Tick, Vec2};
use crate::entity::Living;

/// Growth stage, ordered so that a stage only ever moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Sprout,
    Adult,
    Withered,
}

/// Age thresholds for the stage progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthThresholds {
    pub adult: Tick,
    pub wither: Tick,
    pub despawn: Tick,
}

impl GrowthThresholds {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            adult: config.plant_adult_age,
            wither: config.plant_wither_age,
            despawn: config.plant_despawn_age,
        }
    }

    pub fn stage_for_age(&self, age: Tick) -> GrowthStage {
        if age >= self.wither {
            GrowthStage::Withered
        } else if age >= self.adult {
            GrowthStage::Adult
        } else {
            GrowthStage::Sprout
        }
    }
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self { adult: 300, wither: 1800, despawn: 2400 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: EntityId,
    pub health: i32,
    /// Energy transferred to a herbivore that eats this plant
    pub nutrition: f32,
    pub position: Vec2,
    pub age: Tick,
    pub stage: GrowthStage,
}

impl Plant {
    pub fn sprout(position: Vec2, health: i32, nutrition: f32) -> Self {
        Self {
            id: EntityId::new(),
            health,
            nutrition,
            position,
            age: 0,
            stage: GrowthStage::Sprout,
        }
    }

    /// A plant that has already lived `age` ticks
    pub fn aged(
        position: Vec2,
        health: i32,
        nutrition: f32,
        age: Tick,
        thresholds: &GrowthThresholds,
    ) -> Self {
        let mut plant = Self::sprout(position, health, nutrition);
        plant.age = age;
        plant.stage = thresholds.stage_for_age(age);
        plant
    }

    /// Advance one tick. Returns true once the plant has aged out.
    pub fn grow(&mut self, thresholds: &GrowthThresholds) -> bool {
        self.age += 1;
        let next = thresholds.stage_for_age(self.age);
        if next > self.stage {
            self.stage = next;
        }
        self.is_expired(thresholds)
    }

    pub fn is_expired(&self, thresholds: &GrowthThresholds) -> bool {
        self.stage == GrowthStage::Withered && self.age >= thresholds.despawn
    }

    pub fn can_seed(&self) -> bool {
        self.stage == GrowthStage::Adult && self.is_alive()
    }

    /// Eaten or aged out
    pub fn destroy(&mut self) {
        self.health = 0;
    }
}

impl Living for Plant {
    fn is_alive(&self) -> bool {
        self.health > 0
    }
}
