//! Player-controlled T-Rex
//!
//! The driver hands in one [`PlayerInput`] per tick. Screen convention:
//! north is toward y = 0.

use std::f32::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::ecosystem::Ecosystem;
use crate::simulation::combat::{feed_on_corpse, try_attack, AttackOutcome};
use crate::simulation::events::SimulationEvent;

/// One of the eight compass directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit step; diagonals are scaled by 1/√2 on each axis
    pub fn unit(&self) -> Vec2 {
        let d = FRAC_1_SQRT_2;
        match self {
            Direction::North => Vec2::new(0.0, -1.0),
            Direction::NorthEast => Vec2::new(d, -d),
            Direction::East => Vec2::new(1.0, 0.0),
            Direction::SouthEast => Vec2::new(d, d),
            Direction::South => Vec2::new(0.0, 1.0),
            Direction::SouthWest => Vec2::new(-d, d),
            Direction::West => Vec2::new(-1.0, 0.0),
            Direction::NorthWest => Vec2::new(-d, -d),
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::East => "e",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::West => "w",
            Direction::NorthWest => "nw",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.short_name() == lower)
            .ok_or_else(|| format!("unknown direction '{}' (use n, ne, e, se, s, sw, w, nw)", s))
    }
}

/// Intent for the player for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub direction: Option<Direction>,
    pub attack: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(direction: Direction) -> Self {
        Self { direction: Some(direction), attack: false }
    }

    pub fn attacking() -> Self {
        Self { direction: None, attack: true }
    }
}

/// Apply movement, attack and automatic feeding for the player
///
/// Returns the attack outcome when an attack was requested.
pub fn apply_player_input(
    world: &mut Ecosystem,
    input: &PlayerInput,
    events: &mut Vec<SimulationEvent>,
) -> Option<AttackOutcome> {
    let idx = world.player_index()?;

    if let Some(direction) = input.direction {
        let step = direction.unit() * world.config.player_move_speed;
        let player = &mut world.animals[idx];
        player.position = world.bounds.clamp(player.position + step);
    }

    let outcome = if input.attack {
        Some(match nearest_target(world, idx) {
            Some(target) => {
                let cooldown = world.config.player_attack_cooldown;
                try_attack(world, idx, target, cooldown, events)
            }
            None => AttackOutcome::Ignored,
        })
    } else {
        None
    };

    feed_on_corpse(world, idx, events);
    world.animals[idx].clamp_vitals();

    outcome
}

/// Nearest live non-player animal within attack range
fn nearest_target(world: &Ecosystem, idx: usize) -> Option<usize> {
    let position = world.animals[idx].position;
    let range_sq = world.config.player_attack_range * world.config.player_attack_range;
    world
        .iter_living()
        .filter(|&i| i != idx && !world.animals[i].removal_immune)
        .map(|i| (i, world.animals[i].position.distance_squared(&position)))
        .filter(|&(_, d)| d <= range_sq)
        .min_by_key(|&(_, d)| OrderedFloat(d))
        .map(|(i, _)| i)
}
