//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every field can be overridden from
//! a TOML file; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EcoError, Result};
use crate::entity::species::Species;

/// Configuration for the simulation systems
///
/// Distances are world units, speeds are world units per tick and
/// durations are ticks unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === WORLD ===
    /// Width of the world plane
    pub world_width: f32,

    /// Height of the world plane
    pub world_height: f32,

    /// Simulated seconds per tick (fixed timestep)
    ///
    /// At 0.04 the simulation runs 25 ticks per simulated second,
    /// independent of presentation frame rate.
    pub tick_seconds: f32,

    /// Upper bound on ticks executed by one driver `advance` call
    ///
    /// Stops a long stall from queueing an unbounded catch-up burst.
    pub max_steps_per_frame: u32,

    // === MOVEMENT ===
    /// Herbivore speed when running from the player
    pub speed_flee: f32,

    /// Carnivore speed when pursuing prey
    pub speed_chase: f32,

    /// Speed when walking to the nearest plant
    pub speed_seek_plant: f32,

    /// Speed when walking to the nearest corpse
    pub speed_seek_corpse: f32,

    /// Half-width of the random patrol jitter on each axis
    pub speed_patrol: f32,

    /// Speed of the nudge toward the species centroid
    ///
    /// Deliberately slower than every other behavior so flocking never
    /// overrides fleeing or hunting.
    pub speed_cohesion: f32,

    /// Player step length for a cardinal move (diagonals are scaled by 1/√2)
    pub player_move_speed: f32,

    // === PERCEPTION ===
    /// Herbivores flee when the player is closer than this
    pub flee_radius: f32,

    /// Animals farther than this from their species centroid drift back
    pub cohesion_radius: f32,

    /// Distance at which a plant is eaten
    pub plant_contact_radius: f32,

    /// Distance at which a corpse can be fed on
    pub corpse_contact_radius: f32,

    /// Distance at which an AI predator strikes its prey
    pub attack_contact_radius: f32,

    /// Maximum distance of a player attack target
    pub player_attack_range: f32,

    // === METABOLISM ===
    /// Fraction of species maximum energy below which an animal is hungry
    pub hunger_fraction: f32,

    /// Every this many ticks of age an animal loses 1 energy
    pub energy_decay_interval: u64,

    /// Every this many ticks of age an animal loses 1 health
    ///
    /// Health decay acts as natural ageing: a 120-health animal that never
    /// gets hurt dies of old age after 2400 ticks.
    pub health_decay_interval: u64,

    // === COMBAT ===
    /// Smallest damage roll (inclusive)
    pub attack_damage_min: i32,

    /// Largest damage roll (inclusive)
    pub attack_damage_max: i32,

    /// Energy the attacker spends per attack
    pub attack_energy_cost: f32,

    /// Ticks an AI attacker waits between attacks
    pub attack_cooldown: u32,

    /// Ticks the player waits between attacks
    pub player_attack_cooldown: u32,

    // === CORPSES ===
    /// Lifetime of a corpse before it despawns uneaten
    pub corpse_max_age: u64,

    /// Ticks the skull marker stays visible after a kill
    pub corpse_skull_ticks: u32,

    /// Ticks of feeding needed to fully consume one corpse
    pub corpse_consumption_ticks: u32,

    /// Total energy one corpse yields when fully consumed
    ///
    /// Spread evenly over `corpse_consumption_ticks`, so each feeding tick
    /// transfers `corpse_energy / corpse_consumption_ticks`.
    pub corpse_energy: f32,

    // === PLANTS ===
    /// Age at which a sprout becomes an adult
    pub plant_adult_age: u64,

    /// Age at which an adult withers
    pub plant_wither_age: u64,

    /// Age at which a withered plant is removed
    pub plant_despawn_age: u64,

    /// Energy a herbivore gains from one plant
    pub plant_nutrition: f32,

    /// Structural health of a new plant
    pub plant_health: i32,

    /// Per-tick chance that an adult plant drops a seed
    pub plant_seed_chance: f32,

    /// Seeding stops once this many plants are alive
    pub plant_density_cap: usize,

    /// Plants are topped up to this count every tick
    pub plant_min: usize,

    /// Surplus plants beyond this count are removed every tick
    pub plant_max: usize,

    /// Minimum gap between plants for scattered placement
    pub plant_min_spacing: f32,

    /// Samples tried before scattered placement falls back to pure random
    pub placement_attempts: u32,

    /// Distance from the world edge kept clear when placing plants
    pub placement_margin: f32,

    // === REPRODUCTION ===
    /// Energy an animal needs before it may reproduce
    pub reproduction_energy_threshold: f32,

    /// Per-tick chance an eligible animal reproduces
    pub reproduction_chance: f32,

    /// Energy deducted from the parent per offspring
    pub reproduction_cost: f32,

    /// Offspring spawn within this offset of the parent on each axis
    pub offspring_offset: f32,

    // === POPULATION ===
    /// Global ceiling on live animals (the player included)
    pub max_animals: usize,

    /// Per-species ceilings on live animals
    pub species_caps: SpeciesCaps,

    // === COLLISION ===
    /// Minimum centre-to-centre distance between two animals
    pub min_separation: f32,

    /// Upper bound on pairwise relaxation passes per tick
    pub collision_passes: u32,

    // === INITIAL POPULATION ===
    pub initial: InitialPopulation,
}

/// Per-species population ceilings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesCaps {
    pub triceratops: usize,
    pub stegosaurus: usize,
    pub velociraptor: usize,
    pub dilophosaurus: usize,
    pub moshops: usize,
}

impl SpeciesCaps {
    /// Ceiling for a species; the player species is always capped at one
    pub fn cap(&self, species: Species) -> usize {
        match species {
            Species::Triceratops => self.triceratops,
            Species::Stegosaurus => self.stegosaurus,
            Species::Velociraptor => self.velociraptor,
            Species::Dilophosaurus => self.dilophosaurus,
            Species::Moshops => self.moshops,
            Species::TRex => 1,
        }
    }
}

impl Default for SpeciesCaps {
    fn default() -> Self {
        Self {
            triceratops: 10,
            stegosaurus: 8,
            velociraptor: 6,
            dilophosaurus: 4,
            moshops: 6,
        }
    }
}

/// Population seeded by [`crate::ecosystem::populate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialPopulation {
    pub triceratops: usize,
    pub stegosaurus: usize,
    pub velociraptor: usize,
    pub dilophosaurus: usize,
    pub moshops: usize,
    pub plants: usize,
    pub spawn_player: bool,
    /// Width of the empty band between the herbivore and carnivore halves
    pub separation_buffer: f32,
}

impl InitialPopulation {
    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Triceratops => self.triceratops,
            Species::Stegosaurus => self.stegosaurus,
            Species::Velociraptor => self.velociraptor,
            Species::Dilophosaurus => self.dilophosaurus,
            Species::Moshops => self.moshops,
            Species::TRex => usize::from(self.spawn_player),
        }
    }
}

impl Default for InitialPopulation {
    fn default() -> Self {
        Self {
            triceratops: 4,
            stegosaurus: 3,
            velociraptor: 2,
            dilophosaurus: 1,
            moshops: 1,
            plants: 45,
            spawn_player: true,
            separation_buffer: 80.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // World
            world_width: 960.0,
            world_height: 600.0,
            tick_seconds: 0.04,
            max_steps_per_frame: 8,

            // Movement (flee > chase > corpse > plant > patrol > cohesion)
            speed_flee: 2.4,
            speed_chase: 2.2,
            speed_seek_plant: 1.5,
            speed_seek_corpse: 1.8,
            speed_patrol: 1.0,
            speed_cohesion: 0.6,
            player_move_speed: 4.0,

            // Perception
            flee_radius: 120.0,
            cohesion_radius: 25.0,
            plant_contact_radius: 16.0,
            corpse_contact_radius: 36.0,
            attack_contact_radius: 22.0,
            player_attack_range: 24.0,

            // Metabolism
            hunger_fraction: 0.5,
            energy_decay_interval: 13,
            health_decay_interval: 20,

            // Combat
            attack_damage_min: 6,
            attack_damage_max: 18,
            attack_energy_cost: 2.0,
            attack_cooldown: 30,
            player_attack_cooldown: 15,

            // Corpses
            corpse_max_age: 3000,
            corpse_skull_ticks: 180,
            corpse_consumption_ticks: 400,
            corpse_energy: 40.0,

            // Plants
            plant_adult_age: 300,
            plant_wither_age: 1800,
            plant_despawn_age: 2400,
            plant_nutrition: 30.0,
            plant_health: 10,
            plant_seed_chance: 0.02,
            plant_density_cap: 60,
            plant_min: 40,
            plant_max: 60,
            plant_min_spacing: 18.0,
            placement_attempts: 30,
            placement_margin: 20.0,

            // Reproduction
            reproduction_energy_threshold: 35.0,
            reproduction_chance: 0.02,
            reproduction_cost: 15.0,
            offspring_offset: 12.0,

            // Population
            max_animals: 32,
            species_caps: SpeciesCaps::default(),

            // Collision (2 × 12 unit body radius)
            min_separation: 24.0,
            collision_passes: 32,

            initial: InitialPopulation::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; absent fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate().map_err(EcoError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Energy per feeding tick on a corpse
    pub fn corpse_energy_per_tick(&self) -> f32 {
        self.corpse_energy / self.corpse_consumption_ticks as f32
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err("World dimensions must be positive".into());
        }

        if self.tick_seconds <= 0.0 {
            return Err(format!("tick_seconds ({}) must be positive", self.tick_seconds));
        }

        if self.attack_damage_min > self.attack_damage_max {
            return Err(format!(
                "attack_damage_min ({}) should be <= attack_damage_max ({})",
                self.attack_damage_min, self.attack_damage_max
            ));
        }

        // Growth stages only ever move forward
        if !(self.plant_adult_age < self.plant_wither_age
            && self.plant_wither_age < self.plant_despawn_age)
        {
            return Err(format!(
                "plant ages must be ordered: adult ({}) < wither ({}) < despawn ({})",
                self.plant_adult_age, self.plant_wither_age, self.plant_despawn_age
            ));
        }

        if self.plant_min > self.plant_max {
            return Err(format!(
                "plant_min ({}) should be <= plant_max ({})",
                self.plant_min, self.plant_max
            ));
        }

        if self.energy_decay_interval == 0 || self.health_decay_interval == 0 {
            return Err("Decay intervals must be positive".into());
        }

        if self.corpse_consumption_ticks == 0 {
            return Err("corpse_consumption_ticks must be positive".into());
        }

        for (name, chance) in [
            ("plant_seed_chance", self.plant_seed_chance),
            ("reproduction_chance", self.reproduction_chance),
            ("hunger_fraction", self.hunger_fraction),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(format!("{} ({}) must be within [0, 1]", name, chance));
            }
        }

        if self.max_animals == 0 {
            return Err("max_animals must be at least 1".into());
        }

        if self.min_separation < 0.0 {
            return Err("min_separation must not be negative".into());
        }

        if self.placement_margin * 2.0 >= self.world_width.min(self.world_height) {
            return Err(format!(
                "placement_margin ({}) leaves no room inside the world",
                self.placement_margin
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_thresholds() {
        let config = SimulationConfig::default();
        assert_eq!(config.attack_damage_min, 6);
        assert_eq!(config.attack_damage_max, 18);
        assert_eq!(config.min_separation, 24.0);
        assert_eq!(config.max_animals, 32);
        assert_eq!(config.plant_min, 40);
        assert_eq!(config.plant_max, 60);
    }

    #[test]
    fn test_corpse_energy_rate() {
        let config = SimulationConfig::default();
        assert!((config.corpse_energy_per_tick() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            max_animals = 20
            speed_flee = 3.0

            [species_caps]
            velociraptor = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.max_animals, 20);
        assert_eq!(config.speed_flee, 3.0);
        assert_eq!(config.species_caps.velociraptor, 2);
        assert_eq!(config.species_caps.triceratops, 10);
        assert_eq!(config.plant_nutrition, 30.0);
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let result =
            SimulationConfig::from_toml_str("attack_damage_min = 20\nattack_damage_max = 5");
        assert!(matches!(result, Err(EcoError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = SimulationConfig::from_toml_str("max_animals = \"many\"");
        assert!(matches!(result, Err(EcoError::TomlError(_))));
    }

    #[test]
    fn test_unordered_plant_ages_rejected() {
        let mut config = SimulationConfig::default();
        config.plant_wither_age = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_player_species_capped_at_one() {
        let caps = SpeciesCaps::default();
        assert_eq!(caps.cap(Species::TRex), 1);
        assert_eq!(caps.cap(Species::Triceratops), 10);
    }
}
