//! Ecosystem - the authoritative simulation state
//!
//! Owns every live entity, the corpse registry and the pending-removal sets.
//! Structural removal is deferred to [`Ecosystem::flush_removals`] so that
//! indices into the live lists stay valid for the whole tick.

use ahash::AHashSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::{SimulationConfig, SpeciesCaps};
use crate::core::types::{EntityId, Tick, Vec2};
use crate::entity::{Animal, Corpse, GrowthThresholds, Living, Plant, Species};
use crate::spatial::WorldBounds;

/// Counts of entities removed by one flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub animals: usize,
    pub plants: usize,
    pub corpses: usize,
}

pub struct Ecosystem {
    pub config: SimulationConfig,
    pub bounds: WorldBounds,
    pub animals: Vec<Animal>,
    pub plants: Vec<Plant>,
    pub corpses: Vec<Corpse>,
    pub current_tick: Tick,
    /// Global ceiling on live animals
    pub max_animals: usize,
    pub species_caps: SpeciesCaps,
    /// Seed the RNG was created from (stored in snapshots)
    pub seed: u64,
    /// Single shared random source for the whole simulation
    pub rng: ChaCha8Rng,
    pending_animal_removals: AHashSet<EntityId>,
    pending_plant_removals: AHashSet<EntityId>,
}

impl Ecosystem {
    /// An empty ecosystem
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self {
            bounds: WorldBounds::new(config.world_width, config.world_height),
            max_animals: config.max_animals,
            species_caps: config.species_caps.clone(),
            config,
            animals: Vec::new(),
            plants: Vec::new(),
            corpses: Vec::new(),
            current_tick: 0,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            pending_animal_removals: AHashSet::new(),
            pending_plant_removals: AHashSet::new(),
        }
    }

    /// An ecosystem seeded with the configured starting population
    pub fn with_initial_population(config: SimulationConfig, seed: u64) -> Self {
        let mut world = Self::new(config, seed);
        crate::ecosystem::populate::populate_initial(&mut world);
        world
    }

    pub fn add_animal(&mut self, mut animal: Animal) -> EntityId {
        animal.position = self.bounds.clamp(animal.position);
        let id = animal.id;
        self.animals.push(animal);
        id
    }

    pub fn add_plant(&mut self, mut plant: Plant) -> EntityId {
        plant.position = self.bounds.clamp(plant.position);
        let id = plant.id;
        self.plants.push(plant);
        id
    }

    pub fn add_corpse(&mut self, corpse: Corpse) {
        self.corpses.push(corpse);
    }

    /// A fresh sprout using the configured plant stats
    pub fn new_sprout(&self, position: Vec2) -> Plant {
        Plant::sprout(position, self.config.plant_health, self.config.plant_nutrition)
    }

    pub fn growth_thresholds(&self) -> GrowthThresholds {
        GrowthThresholds::from_config(&self.config)
    }

    pub fn player_index(&self) -> Option<usize> {
        self.animals.iter().position(|a| a.player_controlled)
    }

    pub fn player(&self) -> Option<&Animal> {
        self.animals.iter().find(|a| a.player_controlled)
    }

    pub fn animal(&self, id: EntityId) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    /// Indices of animals that are alive and not awaiting removal
    pub fn iter_living(&self) -> impl Iterator<Item = usize> + '_ {
        self.animals
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_alive() && !self.pending_animal_removals.contains(&a.id))
            .map(|(i, _)| i)
    }

    /// Indices of plants that are alive and not awaiting removal
    pub fn iter_living_plants(&self) -> impl Iterator<Item = usize> + '_ {
        self.plants
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive() && !self.pending_plant_removals.contains(&p.id))
            .map(|(i, _)| i)
    }

    pub fn live_animal_count(&self) -> usize {
        self.iter_living().count()
    }

    pub fn live_plant_count(&self) -> usize {
        self.iter_living_plants().count()
    }

    pub fn species_count(&self, species: Species) -> usize {
        self.iter_living()
            .filter(|&i| self.animals[i].species == species)
            .count()
    }

    pub fn live_plant_positions(&self) -> Vec<Vec2> {
        self.iter_living_plants().map(|i| self.plants[i].position).collect()
    }

    pub fn schedule_animal_removal(&mut self, id: EntityId) {
        self.pending_animal_removals.insert(id);
    }

    pub fn schedule_plant_removal(&mut self, id: EntityId) {
        self.pending_plant_removals.insert(id);
    }

    pub fn is_animal_scheduled(&self, id: EntityId) -> bool {
        self.pending_animal_removals.contains(&id)
    }

    pub fn is_plant_scheduled(&self, id: EntityId) -> bool {
        self.pending_plant_removals.contains(&id)
    }

    /// Drop every dead or scheduled entity and every spent corpse
    ///
    /// Removal-immune animals are never dropped; their vitals are clamped
    /// back into range instead.
    pub fn flush_removals(&mut self) -> FlushReport {
        let pending_animals = std::mem::take(&mut self.pending_animal_removals);
        let pending_plants = std::mem::take(&mut self.pending_plant_removals);

        let before = (self.animals.len(), self.plants.len(), self.corpses.len());

        for animal in self.animals.iter_mut().filter(|a| a.removal_immune) {
            animal.clamp_vitals();
        }
        self.animals
            .retain(|a| a.removal_immune || (a.is_alive() && !pending_animals.contains(&a.id)));
        self.plants
            .retain(|p| p.is_alive() && !pending_plants.contains(&p.id));
        self.corpses.retain(|c| !c.is_spent());

        FlushReport {
            animals: before.0 - self.animals.len(),
            plants: before.1 - self.plants.len(),
            corpses: before.2 - self.corpses.len(),
        }
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }
}
