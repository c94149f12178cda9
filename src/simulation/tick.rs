//! Tick system - orchestrates simulation updates
//!
//! This is the core loop that ties together:
//! player intent -> AI and aging -> plants -> corpses -> population -> collisions
//!
//! Each tick advances the simulation one fixed step. Every subsystem works
//! on index snapshots; structural removal happens once, at the end.

use crate::ecosystem::Ecosystem;
use crate::entity::Living;
use crate::simulation::behavior::{run_behavior, species_centroids};
use crate::simulation::collision::resolve_overlaps;
use crate::simulation::events::SimulationEvent;
use crate::simulation::lifecycle::{age_animal, age_corpses};
use crate::simulation::plants::{enforce_plant_bounds, grow_plants};
use crate::simulation::player::{apply_player_input, PlayerInput};
use crate::simulation::population::{cull_to_cap, reproduce};

/// Run a single simulation tick
///
/// Returns the events produced during the tick for the presentation layer.
pub fn run_simulation_tick(world: &mut Ecosystem, input: PlayerInput) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    // 1. Player intent
    apply_player_input(world, &input, &mut events);

    // 2. Herd centroids, fixed for the whole tick
    let centroids = species_centroids(world);

    // 3. AI and aging over a snapshot; animals killed earlier in the tick are skipped
    let snapshot: Vec<usize> = world.iter_living().collect();
    for idx in snapshot {
        if world.animals[idx].player_controlled {
            world.animals[idx].tick_cooldown();
            continue;
        }
        let animal = &world.animals[idx];
        if !animal.is_alive() || world.is_animal_scheduled(animal.id) {
            continue;
        }

        world.animals[idx].tick_cooldown();
        run_behavior(world, idx, &centroids, &mut events);
        age_animal(world, idx, &mut events);
    }

    // 4. Plants grow, seed and expire
    grow_plants(world);

    // 5. Corpses
    age_corpses(world);

    // 6-7. Births, then the global ceiling
    reproduce(world, &mut events);
    cull_to_cap(world, &mut events);

    // 8. Plant bounds
    enforce_plant_bounds(world);

    // 9. Bodies
    resolve_overlaps(world);

    // 10. Flush and advance
    let report = world.flush_removals();
    if report.animals > 0 || report.corpses > 0 {
        tracing::trace!(
            "Tick {}: removed {} animals, {} plants, {} corpses",
            world.current_tick,
            report.animals,
            report.plants,
            report.corpses
        );
    }
    world.tick();

    events
}

/// Run `n` ticks with no player input, returning every event
pub fn run_ticks(world: &mut Ecosystem, n: u64) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(run_simulation_tick(world, PlayerInput::idle()));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Vec2;
    use crate::entity::{Animal, Species};

    #[test]
    fn test_tick_advances_counter() {
        let mut world = Ecosystem::with_initial_population(SimulationConfig::default(), 42);
        run_simulation_tick(&mut world, PlayerInput::idle());
        assert_eq!(world.current_tick, 1);
        run_ticks(&mut world, 9);
        assert_eq!(world.current_tick, 10);
    }

    #[test]
    fn test_live_lists_clean_after_tick() {
        let mut world = Ecosystem::with_initial_population(SimulationConfig::default(), 8);
        for _ in 0..200 {
            run_simulation_tick(&mut world, PlayerInput::idle());
            assert!(world.animals.iter().all(|a| a.is_alive()));
            assert!(world.plants.iter().all(|p| p.is_alive()));
        }
    }

    #[test]
    fn test_plant_bounds_hold_after_tick() {
        let mut world = Ecosystem::new(SimulationConfig::default(), 2);
        run_simulation_tick(&mut world, PlayerInput::idle());
        assert!(world.plants.len() >= 40 && world.plants.len() <= 60);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Ecosystem::with_initial_population(SimulationConfig::default(), 99);
        let mut b = Ecosystem::with_initial_population(SimulationConfig::default(), 99);
        run_ticks(&mut a, 100);
        run_ticks(&mut b, 100);

        let pa: Vec<Vec2> = a.animals.iter().map(|x| x.position).collect();
        let pb: Vec<Vec2> = b.animals.iter().map(|x| x.position).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.plants.len(), b.plants.len());
    }

    #[test]
    fn test_player_cooldown_decrements() {
        let mut world = Ecosystem::new(SimulationConfig::default(), 4);
        world.add_animal(Animal::new(Species::TRex, Vec2::new(480.0, 300.0)));
        world.animals[0].attack_cooldown = 5;
        run_simulation_tick(&mut world, PlayerInput::idle());
        assert_eq!(world.animals[0].attack_cooldown, 4);
    }
}
