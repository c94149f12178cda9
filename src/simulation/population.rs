//! Population dynamics
//!
//! Well-fed animals reproduce while their species and the ecosystem have
//! room. The global ceiling is enforced afterwards by culling the weakest.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::Rng;

use crate::core::types::Vec2;
use crate::ecosystem::Ecosystem;
use crate::entity::{Animal, Species};
use crate::simulation::events::{DeathCause, SimulationEvent};

/// Whether one more `species` fits under both population caps
pub fn has_room_for(world: &Ecosystem, species: Species) -> bool {
    world.live_animal_count() < world.max_animals
        && world.species_count(species) < world.species_caps.cap(species)
}

/// Give every eligible animal its chance to reproduce
///
/// Returns the number of births.
pub fn reproduce(world: &mut Ecosystem, events: &mut Vec<SimulationEvent>) -> usize {
    let snapshot: Vec<usize> = world.iter_living().collect();
    let threshold = world.config.reproduction_energy_threshold;
    let offset = world.config.offspring_offset;
    let mut births = 0;

    for idx in snapshot {
        let parent = &world.animals[idx];
        if parent.removal_immune || parent.player_controlled || parent.energy <= threshold {
            continue;
        }
        if world.rng.gen::<f32>() >= world.config.reproduction_chance {
            continue;
        }

        let species = parent.species;
        if !has_room_for(world, species) {
            continue;
        }

        let jitter = Vec2::new(
            world.rng.gen_range(-offset..=offset),
            world.rng.gen_range(-offset..=offset),
        );
        let position = world.animals[idx].position + jitter;
        world.animals[idx].energy -= world.config.reproduction_cost;

        let id = world.add_animal(Animal::new(species, position));
        let position = world.animals.last().map(|a| a.position).unwrap_or(position);

        tracing::debug!("{} born at ({:.0}, {:.0})", species, position.x, position.y);
        events.push(SimulationEvent::Born {
            tick: world.current_tick,
            id,
            species,
            position,
        });
        births += 1;
    }

    births
}

/// Cull the weakest animals until the global ceiling holds
///
/// Lowest energy goes first, ties broken by age (oldest first). The player
/// is never culled.
pub fn cull_to_cap(world: &mut Ecosystem, events: &mut Vec<SimulationEvent>) -> usize {
    let living: Vec<usize> = world.iter_living().collect();
    if living.len() <= world.max_animals {
        return 0;
    }
    let surplus = living.len() - world.max_animals;

    let mut candidates: Vec<usize> = living
        .into_iter()
        .filter(|&i| !world.animals[i].removal_immune)
        .collect();
    candidates.sort_by_key(|&i| {
        let a = &world.animals[i];
        (OrderedFloat(a.energy), Reverse(a.age))
    });

    let mut culled = 0;
    for idx in candidates.into_iter().take(surplus) {
        let animal = &mut world.animals[idx];
        animal.die();
        let (id, species, position) = (animal.id, animal.species, animal.position);
        world.schedule_animal_removal(id);

        events.push(SimulationEvent::Died {
            tick: world.current_tick,
            id,
            species,
            cause: DeathCause::Culled,
            position,
        });
        culled += 1;
    }

    if culled > 0 {
        tracing::debug!("Culled {} animals to respect cap of {}", culled, world.max_animals);
    }
    culled
}
