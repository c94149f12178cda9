//! Species descriptor table
//!
//! Every species is described by a fixed record: base stats, diet and the AI
//! strategy that drives it. Behavior code dispatches on [`AiStrategy`].

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Triceratops,
    Stegosaurus,
    Velociraptor,
    Dilophosaurus,
    Moshops,
    TRex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    Herbivore,
    Carnivore,
    Omnivore,
}

impl Diet {
    /// Diets that may scavenge corpses
    pub fn eats_meat(&self) -> bool {
        matches!(self, Diet::Carnivore | Diet::Omnivore)
    }

    pub fn eats_plants(&self) -> bool {
        matches!(self, Diet::Herbivore | Diet::Omnivore)
    }
}

/// Which behavior routine drives the species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiStrategy {
    /// Flee the player, graze when hungry, wander when sated
    Grazer,
    /// Scavenge first, hunt when hungry, patrol when sated
    Hunter,
    /// Scavenge first, forage plants when hungry, patrol when sated
    Forager,
    /// Driven by external input
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesDescriptor {
    pub name: &'static str,
    pub diet: Diet,
    pub base_health: i32,
    pub base_energy: f32,
    pub strategy: AiStrategy,
}

const TRICERATOPS: SpeciesDescriptor = SpeciesDescriptor {
    name: "Triceratops",
    diet: Diet::Herbivore,
    base_health: 120,
    base_energy: 100.0,
    strategy: AiStrategy::Grazer,
};

const STEGOSAURUS: SpeciesDescriptor = SpeciesDescriptor {
    name: "Stegosaurus",
    diet: Diet::Herbivore,
    base_health: 110,
    base_energy: 100.0,
    strategy: AiStrategy::Grazer,
};

const VELOCIRAPTOR: SpeciesDescriptor = SpeciesDescriptor {
    name: "Velociraptor",
    diet: Diet::Carnivore,
    base_health: 70,
    base_energy: 100.0,
    strategy: AiStrategy::Hunter,
};

const DILOPHOSAURUS: SpeciesDescriptor = SpeciesDescriptor {
    name: "Dilophosaurus",
    diet: Diet::Carnivore,
    base_health: 90,
    base_energy: 100.0,
    strategy: AiStrategy::Hunter,
};

const MOSHOPS: SpeciesDescriptor = SpeciesDescriptor {
    name: "Moshops",
    diet: Diet::Omnivore,
    base_health: 80,
    base_energy: 90.0,
    strategy: AiStrategy::Forager,
};

const TREX: SpeciesDescriptor = SpeciesDescriptor {
    name: "T-Rex",
    diet: Diet::Carnivore,
    base_health: 250,
    base_energy: 160.0,
    strategy: AiStrategy::Player,
};

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Triceratops,
        Species::Stegosaurus,
        Species::Velociraptor,
        Species::Dilophosaurus,
        Species::Moshops,
        Species::TRex,
    ];

    pub fn descriptor(&self) -> &'static SpeciesDescriptor {
        match self {
            Species::Triceratops => &TRICERATOPS,
            Species::Stegosaurus => &STEGOSAURUS,
            Species::Velociraptor => &VELOCIRAPTOR,
            Species::Dilophosaurus => &DILOPHOSAURUS,
            Species::Moshops => &MOSHOPS,
            Species::TRex => &TREX,
        }
    }

    pub fn diet(&self) -> Diet {
        self.descriptor().diet
    }

    pub fn strategy(&self) -> AiStrategy {
        self.descriptor().strategy
    }

    pub fn is_player(&self) -> bool {
        self.strategy() == AiStrategy::Player
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diet_classes() {
        assert_eq!(Species::Triceratops.diet(), Diet::Herbivore);
        assert_eq!(Species::Stegosaurus.diet(), Diet::Herbivore);
        assert_eq!(Species::Velociraptor.diet(), Diet::Carnivore);
        assert_eq!(Species::Dilophosaurus.diet(), Diet::Carnivore);
        assert_eq!(Species::Moshops.diet(), Diet::Omnivore);
    }

    #[test]
    fn test_only_trex_is_player() {
        let players: Vec<_> = Species::ALL.iter().filter(|s| s.is_player()).collect();
        assert_eq!(players, vec![&Species::TRex]);
    }

    #[test]
    fn test_meat_and_plant_eaters() {
        assert!(Diet::Omnivore.eats_meat() && Diet::Omnivore.eats_plants());
        assert!(!Diet::Herbivore.eats_meat());
        assert!(!Diet::Carnivore.eats_plants());
    }

    #[test]
    fn test_display_uses_descriptor_name() {
        assert_eq!(Species::TRex.to_string(), "T-Rex");
    }
}
