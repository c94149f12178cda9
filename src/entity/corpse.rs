//! Corpses left behind by cross-species kills

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick, Vec2};
use crate::entity::species::Species;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpse {
    pub id: EntityId,
    /// Species of the animal that died
    pub species: Species,
    pub position: Vec2,
    pub age: Tick,
    pub max_age: Tick,
    /// 0.0 = untouched, 1.0 = fully eaten
    pub consumed: f32,
    /// Feeding ticks taken so far
    #[serde(default)]
    pub bites: u32,
    /// Ticks the skull marker remains visible
    pub skull_timer: u32,
}

impl Corpse {
    pub fn new(species: Species, position: Vec2, max_age: Tick, skull_timer: u32) -> Self {
        Self {
            id: EntityId::new(),
            species,
            position,
            age: 0,
            max_age,
            consumed: 0.0,
            bites: 0,
            skull_timer,
        }
    }

    /// Still has meat left
    pub fn is_available(&self) -> bool {
        self.consumed < 1.0 && self.age < self.max_age
    }

    /// Ready to be despawned
    pub fn is_spent(&self) -> bool {
        self.consumed >= 1.0 || self.age >= self.max_age
    }

    /// Take one of `total_bites` bites. The last bite jumps the corpse to
    /// its max age so it despawns at the next flush.
    pub fn take_bite(&mut self, total_bites: u32) {
        let total = total_bites.max(1);
        // Snapshots without a bite count only carry the fraction
        let implied = (self.consumed * total as f32).round() as u32;
        self.bites = (self.bites.max(implied) + 1).min(total);
        self.consumed = self.bites as f32 / total as f32;
        if self.bites == total {
            self.consumed = 1.0;
            self.age = self.max_age;
        }
    }

    pub fn advance_age(&mut self) {
        self.age += 1;
        self.skull_timer = self.skull_timer.saturating_sub(1);
    }
}
