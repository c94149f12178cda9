//! Animal records

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick, Vec2};
use crate::entity::species::{Diet, Species};
use crate::entity::Living;

/// A moving agent
///
/// Capability flags are explicit fields fixed at construction: the player
/// species is external-controlled and immune to attacks and removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: EntityId,
    pub name: String,
    pub species: Species,
    pub diet: Diet,
    pub health: i32,
    pub energy: f32,
    pub position: Vec2,
    pub age: Tick,
    /// Ticks until the next attack is allowed (0 = ready)
    pub attack_cooldown: u32,
    /// Driven by input instead of AI; exempt from ageing and reproduction
    pub player_controlled: bool,
    /// Never attacked, culled or removed
    pub removal_immune: bool,
}

impl Animal {
    pub fn new(species: Species, position: Vec2) -> Self {
        let descriptor = species.descriptor();
        let is_player = species.is_player();

        Self {
            id: EntityId::new(),
            name: descriptor.name.to_string(),
            species,
            diet: descriptor.diet,
            health: descriptor.base_health,
            energy: descriptor.base_energy,
            position,
            age: 0,
            attack_cooldown: 0,
            player_controlled: is_player,
            removal_immune: is_player,
        }
    }

    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = energy;
        self
    }

    pub fn max_health(&self) -> i32 {
        self.species.descriptor().base_health
    }

    pub fn max_energy(&self) -> f32 {
        self.species.descriptor().base_energy
    }

    /// Energy level below which this animal looks for food
    pub fn hunger_threshold(&self, fraction: f32) -> f32 {
        self.max_energy() * fraction
    }

    /// Mark dead; removal is scheduled separately
    pub fn die(&mut self) {
        self.health = 0;
        self.energy = 0.0;
    }

    pub fn ready_to_attack(&self) -> bool {
        self.attack_cooldown == 0
    }

    pub fn tick_cooldown(&mut self) {
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
    }

    /// Add energy; removal-immune animals are capped at their maximum
    pub fn gain_energy(&mut self, amount: f32) {
        self.energy += amount;
        if self.removal_immune {
            self.energy = self.energy.min(self.max_energy());
        }
    }

    /// Keep an immortal animal's vitals inside `[1, max]`
    pub fn clamp_vitals(&mut self) {
        if !self.removal_immune {
            return;
        }
        self.health = self.health.clamp(1, self.max_health());
        self.energy = self.energy.clamp(1.0, self.max_energy());
    }
}

impl Living for Animal {
    fn is_alive(&self) -> bool {
        self.health > 0 && self.energy > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_animal_uses_descriptor_stats() {
        let raptor = Animal::new(Species::Velociraptor, Vec2::new(5.0, 5.0));
        assert_eq!(raptor.health, 70);
        assert_eq!(raptor.energy, 100.0);
        assert_eq!(raptor.diet, Diet::Carnivore);
        assert_eq!(raptor.attack_cooldown, 0);
        assert!(!raptor.player_controlled);
        assert!(raptor.is_alive());
    }

    #[test]
    fn test_player_flags() {
        let trex = Animal::new(Species::TRex, Vec2::ZERO);
        assert!(trex.player_controlled);
        assert!(trex.removal_immune);
    }

    #[test]
    fn test_zero_energy_is_dead() {
        let animal = Animal::new(Species::Moshops, Vec2::ZERO).with_energy(0.0);
        assert!(!animal.is_alive());
    }

    #[test]
    fn test_die_zeroes_vitals() {
        let mut animal = Animal::new(Species::Triceratops, Vec2::ZERO);
        animal.die();
        assert_eq!(animal.health, 0);
        assert_eq!(animal.energy, 0.0);
    }

    #[test]
    fn test_player_energy_capped() {
        let mut trex = Animal::new(Species::TRex, Vec2::ZERO);
        trex.gain_energy(500.0);
        assert_eq!(trex.energy, 160.0);

        // AI animals are not capped
        let mut raptor = Animal::new(Species::Velociraptor, Vec2::ZERO);
        raptor.gain_energy(50.0);
        assert_eq!(raptor.energy, 150.0);
    }

    #[test]
    fn test_clamp_vitals_only_affects_immune() {
        let mut trex = Animal::new(Species::TRex, Vec2::ZERO);
        trex.health = -40;
        trex.energy = -3.0;
        trex.clamp_vitals();
        assert_eq!(trex.health, 1);
        assert_eq!(trex.energy, 1.0);

        let mut steg = Animal::new(Species::Stegosaurus, Vec2::ZERO);
        steg.health = -4;
        steg.clamp_vitals();
        assert_eq!(steg.health, -4);
    }

    #[test]
    fn test_hunger_threshold() {
        let tri = Animal::new(Species::Triceratops, Vec2::ZERO);
        assert_eq!(tri.hunger_threshold(0.5), 50.0);
    }
}
