pub mod animal;
pub mod corpse;
pub mod plant;
pub mod species;

pub use animal::Animal;
pub use corpse::Corpse;
pub use plant::{GrowthStage, GrowthThresholds, Plant};
pub use species::{AiStrategy, Diet, Species, SpeciesDescriptor};

/// Structural aliveness shared by plants and animals
pub trait Living {
    fn is_alive(&self) -> bool;
}
