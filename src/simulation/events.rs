//! Presentation events
//!
//! Returned by `run_simulation_tick` so a front end can animate hits,
//! feeding and corpses. The core only records that something happened;
//! timing and drawing of effects belong to the caller.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick, Vec2};
use crate::entity::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Plant,
    Corpse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Killed,
    Starvation,
    OldAge,
    Culled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// An attack landed
    Hit {
        tick: Tick,
        attacker: EntityId,
        attacker_species: Species,
        victim: EntityId,
        damage: i32,
        position: Vec2,
    },
    /// Something was eaten (a whole plant, or one bite of a corpse)
    Ate {
        tick: Tick,
        eater: EntityId,
        species: Species,
        food: FoodKind,
        position: Vec2,
    },
    /// A kill left a corpse behind
    CorpseSpawned {
        tick: Tick,
        species: Species,
        position: Vec2,
    },
    Born {
        tick: Tick,
        id: EntityId,
        species: Species,
        position: Vec2,
    },
    Died {
        tick: Tick,
        id: EntityId,
        species: Species,
        cause: DeathCause,
        position: Vec2,
    },
}

impl SimulationEvent {
    /// Short kind label, used for tallies and logs
    pub fn kind(&self) -> &'static str {
        match self {
            SimulationEvent::Hit { .. } => "hit",
            SimulationEvent::Ate { .. } => "eat",
            SimulationEvent::CorpseSpawned { .. } => "corpse_spawn",
            SimulationEvent::Born { .. } => "born",
            SimulationEvent::Died { .. } => "died",
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            SimulationEvent::Hit { position, .. }
            | SimulationEvent::Ate { position, .. }
            | SimulationEvent::CorpseSpawned { position, .. }
            | SimulationEvent::Born { position, .. }
            | SimulationEvent::Died { position, .. } => *position,
        }
    }
}
