//! Per-animal AI
//!
//! Each live non-player animal gets one decision per tick: an optional
//! cohesion nudge toward its species centroid, then the routine for its
//! [`AiStrategy`].

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use rand::Rng;

use crate::core::types::Vec2;
use crate::ecosystem::Ecosystem;
use crate::entity::{AiStrategy, Diet, Living, Species};
use crate::simulation::combat::{eat, feed_on_corpse, try_attack, FoodTarget};
use crate::simulation::events::SimulationEvent;

/// Mean position of each species' live non-player members
pub type Centroids = AHashMap<Species, Vec2>;

pub fn species_centroids(world: &Ecosystem) -> Centroids {
    let mut sums: AHashMap<Species, (Vec2, u32)> = AHashMap::new();
    for i in world.iter_living() {
        let animal = &world.animals[i];
        if animal.player_controlled {
            continue;
        }
        let entry = sums.entry(animal.species).or_insert((Vec2::ZERO, 0));
        entry.0 += animal.position;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(species, (sum, n))| (species, sum / n as f32))
        .collect()
}

/// Run one AI decision for the animal at `idx`
pub fn run_behavior(
    world: &mut Ecosystem,
    idx: usize,
    centroids: &Centroids,
    events: &mut Vec<SimulationEvent>,
) {
    let animal = &world.animals[idx];
    if animal.player_controlled || !animal.is_alive() || world.is_animal_scheduled(animal.id) {
        return;
    }

    apply_cohesion(world, idx, centroids);

    match world.animals[idx].species.strategy() {
        AiStrategy::Grazer => graze(world, idx, events),
        AiStrategy::Hunter => hunt(world, idx, events),
        AiStrategy::Forager => forage(world, idx, events),
        AiStrategy::Player => {}
    }
}

fn apply_cohesion(world: &mut Ecosystem, idx: usize, centroids: &Centroids) {
    let animal = &world.animals[idx];
    let Some(&centroid) = centroids.get(&animal.species) else {
        return;
    };
    if animal.position.distance(&centroid) > world.config.cohesion_radius {
        let dir = animal.position.direction_to(&centroid);
        let speed = world.config.speed_cohesion;
        step(world, idx, dir, speed);
    }
}

/// Herbivore: flee the player, otherwise graze when hungry
fn graze(world: &mut Ecosystem, idx: usize, events: &mut Vec<SimulationEvent>) {
    let position = world.animals[idx].position;

    if let Some(threat) = world.player().map(|p| p.position) {
        if position.distance(&threat) < world.config.flee_radius {
            let speed = world.config.speed_flee;
            step(world, idx, threat.direction_to(&position), speed);
            return;
        }
    }

    let hungry = {
        let animal = &world.animals[idx];
        animal.energy < animal.hunger_threshold(world.config.hunger_fraction)
    };
    if hungry && seek_plant(world, idx, events) {
        return;
    }
    patrol(world, idx);
}

/// Carnivore: corpses first, then hunt when hungry
fn hunt(world: &mut Ecosystem, idx: usize, events: &mut Vec<SimulationEvent>) {
    if scavenge(world, idx, events) {
        return;
    }

    let hungry = {
        let animal = &world.animals[idx];
        animal.energy <= animal.hunger_threshold(world.config.hunger_fraction)
    };
    if hungry {
        if let Some(prey) = nearest_prey(world, idx) {
            let target = world.animals[prey].position;
            let dir = world.animals[idx].position.direction_to(&target);
            let speed = world.config.speed_chase;
            step(world, idx, dir, speed);

            if world.animals[idx].position.distance(&target) < world.config.attack_contact_radius {
                let cooldown = world.config.attack_cooldown;
                try_attack(world, idx, prey, cooldown, events);
            }
            return;
        }
    }

    patrol(world, idx);
}

/// Omnivore: corpses first, then plants when hungry
fn forage(world: &mut Ecosystem, idx: usize, events: &mut Vec<SimulationEvent>) {
    if scavenge(world, idx, events) {
        return;
    }

    let hungry = {
        let animal = &world.animals[idx];
        animal.energy <= animal.hunger_threshold(world.config.hunger_fraction)
    };
    if hungry && seek_plant(world, idx, events) {
        return;
    }

    patrol(world, idx);
}

/// Feed on a corpse in reach, or walk to the nearest one
///
/// Returns true while any corpse target exists so hunting is skipped.
fn scavenge(world: &mut Ecosystem, idx: usize, events: &mut Vec<SimulationEvent>) -> bool {
    if feed_on_corpse(world, idx, events) {
        return true;
    }

    let position = world.animals[idx].position;
    let nearest = world
        .corpses
        .iter()
        .filter(|c| c.is_available())
        .min_by_key(|c| OrderedFloat(c.position.distance_squared(&position)))
        .map(|c| c.position);

    let Some(target) = nearest else {
        return false;
    };
    let speed = world.config.speed_seek_corpse;
    step(world, idx, position.direction_to(&target), speed);
    feed_on_corpse(world, idx, events);
    true
}

/// Walk to the nearest live plant and eat it on contact
///
/// Returns false when there is no plant to go for.
fn seek_plant(world: &mut Ecosystem, idx: usize, events: &mut Vec<SimulationEvent>) -> bool {
    let position = world.animals[idx].position;
    let Some(plant_idx) = world
        .iter_living_plants()
        .min_by_key(|&p| OrderedFloat(world.plants[p].position.distance_squared(&position)))
    else {
        return false;
    };

    let target = world.plants[plant_idx].position;
    let speed = world.config.speed_seek_plant;
    step(world, idx, position.direction_to(&target), speed);

    if world.animals[idx].position.distance(&target) < world.config.plant_contact_radius {
        eat(world, idx, FoodTarget::Plant(plant_idx), events);
    }
    true
}

/// Nearest live herbivore or omnivore that can be attacked
fn nearest_prey(world: &Ecosystem, idx: usize) -> Option<usize> {
    let position = world.animals[idx].position;
    world
        .iter_living()
        .filter(|&i| i != idx)
        .filter(|&i| {
            let a = &world.animals[i];
            !a.removal_immune && matches!(a.diet, Diet::Herbivore | Diet::Omnivore)
        })
        .min_by_key(|&i| OrderedFloat(world.animals[i].position.distance_squared(&position)))
}

/// Random jitter on each axis
fn patrol(world: &mut Ecosystem, idx: usize) {
    let speed = world.config.speed_patrol;
    if speed <= 0.0 {
        return;
    }
    let jitter = Vec2::new(
        world.rng.gen_range(-speed..=speed),
        world.rng.gen_range(-speed..=speed),
    );
    let animal = &mut world.animals[idx];
    animal.position = world.bounds.clamp(animal.position + jitter);
}

fn step(world: &mut Ecosystem, idx: usize, dir: Vec2, speed: f32) {
    let animal = &mut world.animals[idx];
    animal.position = world.bounds.clamp(animal.position + dir.normalize() * speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::{Animal, Corpse};

    fn world() -> Ecosystem {
        Ecosystem::new(SimulationConfig::default(), 21)
    }

    fn tick_ai(world: &mut Ecosystem, idx: usize) -> Vec<SimulationEvent> {
        let centroids = species_centroids(world);
        let mut events = Vec::new();
        run_behavior(world, idx, &centroids, &mut events);
        events
    }

    #[test]
    fn test_centroids_skip_player() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(100.0, 100.0)));
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(200.0, 300.0)));
        world.add_animal(Animal::new(Species::TRex, Vec2::new(480.0, 300.0)));

        let centroids = species_centroids(&world);
        assert_eq!(centroids.get(&Species::Triceratops), Some(&Vec2::new(150.0, 200.0)));
        assert!(!centroids.contains_key(&Species::TRex));
    }

    #[test]
    fn test_herbivore_flees_player() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Stegosaurus, Vec2::new(400.0, 300.0)));
        world.add_animal(Animal::new(Species::TRex, Vec2::new(450.0, 300.0)));

        tick_ai(&mut world, 0);
        assert!((world.animals[0].position.x - 397.6).abs() < 1e-3);
        assert_eq!(world.animals[0].position.y, 300.0);
    }

    #[test]
    fn test_hungry_herbivore_walks_to_plant() {
        let mut world = world();
        world.add_animal(
            Animal::new(Species::Triceratops, Vec2::new(100.0, 100.0)).with_energy(30.0),
        );
        let plant = world.new_sprout(Vec2::new(200.0, 100.0));
        world.add_plant(plant);

        tick_ai(&mut world, 0);
        assert!((world.animals[0].position.x - 101.5).abs() < 1e-3);
        assert!(world.plants[0].is_alive());
    }

    #[test]
    fn test_herbivore_eats_plant_in_contact() {
        let mut world = world();
        world.add_animal(
            Animal::new(Species::Triceratops, Vec2::new(100.0, 100.0)).with_energy(30.0),
        );
        let plant = world.new_sprout(Vec2::new(110.0, 100.0));
        world.add_plant(plant);

        let events = tick_ai(&mut world, 0);
        assert_eq!(world.animals[0].energy, 60.0);
        assert!(!world.plants[0].is_alive());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_sated_herbivore_patrols() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(100.0, 100.0)));
        let plant = world.new_sprout(Vec2::new(105.0, 100.0));
        world.add_plant(plant);

        tick_ai(&mut world, 0);
        let moved = world.animals[0].position - Vec2::new(100.0, 100.0);
        assert!(moved.x.abs() <= 1.0 && moved.y.abs() <= 1.0);
        assert!(world.plants[0].is_alive());
    }

    #[test]
    fn test_carnivore_prefers_corpse_over_prey() {
        let mut world = world();
        world.add_animal(
            Animal::new(Species::Velociraptor, Vec2::new(500.0, 300.0)).with_energy(20.0),
        );
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(510.0, 300.0)));
        world.add_corpse(Corpse::new(Species::Moshops, Vec2::new(700.0, 300.0), 3000, 180));

        let events = tick_ai(&mut world, 0);
        assert!(events.is_empty());
        assert_eq!(world.animals[1].health, 120);
        assert!((world.animals[0].position.x - 501.8).abs() < 1e-3);
    }

    #[test]
    fn test_hungry_carnivore_attacks_prey_in_range() {
        let mut world = world();
        world.add_animal(
            Animal::new(Species::Dilophosaurus, Vec2::new(500.0, 300.0)).with_energy(40.0),
        );
        world.add_animal(Animal::new(Species::Stegosaurus, Vec2::new(515.0, 300.0)));

        let events = tick_ai(&mut world, 0);
        assert!(matches!(events[0], SimulationEvent::Hit { .. }));
        assert!(world.animals[1].health < 110);
        assert_eq!(world.animals[0].attack_cooldown, 30);
    }

    #[test]
    fn test_carnivore_never_targets_player() {
        let mut world = world();
        world.add_animal(
            Animal::new(Species::Velociraptor, Vec2::new(500.0, 300.0)).with_energy(10.0),
        );
        world.add_animal(Animal::new(Species::TRex, Vec2::new(505.0, 300.0)));

        assert_eq!(nearest_prey(&world, 0), None);
        let events = tick_ai(&mut world, 0);
        assert!(events.is_empty());
        assert_eq!(world.animals[1].health, 250);
    }

    #[test]
    fn test_omnivore_forages_plants_without_gain() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Moshops, Vec2::new(300.0, 300.0)).with_energy(20.0));
        let plant = world.new_sprout(Vec2::new(305.0, 300.0));
        world.add_plant(plant);

        tick_ai(&mut world, 0);
        assert!(!world.plants[0].is_alive());
        assert_eq!(world.animals[0].energy, 20.0);
    }

    #[test]
    fn test_omnivore_prefers_corpse_over_plant() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Moshops, Vec2::new(300.0, 300.0)).with_energy(20.0));
        let plant = world.new_sprout(Vec2::new(320.0, 300.0));
        world.add_plant(plant);
        world.add_corpse(Corpse::new(Species::Triceratops, Vec2::new(500.0, 300.0), 3000, 180));

        let events = tick_ai(&mut world, 0);
        assert!(events.is_empty());
        assert!(world.plants[0].is_alive());
        assert!((world.animals[0].position.x - 301.8).abs() < 1e-3);
        assert_eq!(world.animals[0].position.y, 300.0);
    }

    #[test]
    fn test_omnivore_feeds_on_corpse_in_contact() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Moshops, Vec2::new(300.0, 300.0)).with_energy(20.0));
        world.add_corpse(Corpse::new(Species::Triceratops, Vec2::new(310.0, 300.0), 3000, 180));

        let events = tick_ai(&mut world, 0);
        assert!(matches!(events[..], [SimulationEvent::Ate { .. }]));
        assert_eq!(world.animals[0].position, Vec2::new(300.0, 300.0));
        assert!((world.animals[0].energy - 20.1).abs() < 1e-4);
        assert_eq!(world.corpses[0].bites, 1);
    }

    #[test]
    fn test_straggler_drifts_toward_herd() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(100.0, 300.0)));
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(300.0, 300.0)));
        world.config.speed_patrol = 0.0;

        tick_ai(&mut world, 0);
        assert!((world.animals[0].position.x - 100.6).abs() < 1e-3);
    }
}
