//! Combat and feeding resolution
//!
//! Every entry point is safe to call on any candidate: dead, immune or
//! diet-mismatched targets produce a no-op outcome, never an error.

use rand::Rng;

use crate::ecosystem::Ecosystem;
use crate::entity::{Corpse, Diet, Living};
use crate::simulation::events::{DeathCause, FoodKind, SimulationEvent};

/// Result of an attack attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Invalid pairing (dead, immune, or self)
    Ignored,
    /// Attacker still cooling down
    OnCooldown,
    Hit { damage: i32 },
    Killed { damage: i32, corpse_spawned: bool },
}

impl AttackOutcome {
    pub fn landed(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. } | AttackOutcome::Killed { .. })
    }
}

/// What an animal is trying to eat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodTarget {
    Plant(usize),
    Animal(usize),
}

fn is_active(world: &Ecosystem, idx: usize) -> bool {
    world
        .animals
        .get(idx)
        .map(|a| a.is_alive() && !world.is_animal_scheduled(a.id))
        .unwrap_or(false)
}

/// Resolve one melee attack, ignoring cooldowns
pub fn attack(
    world: &mut Ecosystem,
    attacker: usize,
    victim: usize,
    events: &mut Vec<SimulationEvent>,
) -> AttackOutcome {
    if attacker == victim || !is_active(world, attacker) || !is_active(world, victim) {
        return AttackOutcome::Ignored;
    }
    if world.animals[victim].removal_immune {
        return AttackOutcome::Ignored;
    }

    let damage = world
        .rng
        .gen_range(world.config.attack_damage_min..=world.config.attack_damage_max);
    let tick = world.current_tick;

    let attacker_species = world.animals[attacker].species;
    let attacker_id = world.animals[attacker].id;
    {
        let a = &mut world.animals[attacker];
        a.energy -= world.config.attack_energy_cost;
        a.clamp_vitals();
    }

    let v = &mut world.animals[victim];
    v.health -= damage;
    let victim_id = v.id;
    let victim_species = v.species;
    let position = v.position;

    events.push(SimulationEvent::Hit {
        tick,
        attacker: attacker_id,
        attacker_species,
        victim: victim_id,
        damage,
        position,
    });

    if v.health > 0 {
        return AttackOutcome::Hit { damage };
    }

    v.die();
    world.schedule_animal_removal(victim_id);

    // Same-species kills leave nothing to scavenge
    let corpse_spawned = attacker_species != victim_species;
    if corpse_spawned {
        world.add_corpse(Corpse::new(
            victim_species,
            position,
            world.config.corpse_max_age,
            world.config.corpse_skull_ticks,
        ));
        events.push(SimulationEvent::CorpseSpawned {
            tick,
            species: victim_species,
            position,
        });
    }

    tracing::debug!(
        "{} killed {} at ({:.0}, {:.0}), corpse: {}",
        attacker_species,
        victim_species,
        position.x,
        position.y,
        corpse_spawned
    );
    events.push(SimulationEvent::Died {
        tick,
        id: victim_id,
        species: victim_species,
        cause: DeathCause::Killed,
        position,
    });

    AttackOutcome::Killed { damage, corpse_spawned }
}

/// Attack if the attacker's cooldown allows, then restart the cooldown
pub fn try_attack(
    world: &mut Ecosystem,
    attacker: usize,
    victim: usize,
    cooldown: u32,
    events: &mut Vec<SimulationEvent>,
) -> AttackOutcome {
    match world.animals.get(attacker) {
        Some(a) if !a.ready_to_attack() => return AttackOutcome::OnCooldown,
        None => return AttackOutcome::Ignored,
        _ => {}
    }

    let outcome = attack(world, attacker, victim, events);
    if outcome.landed() {
        world.animals[attacker].attack_cooldown = cooldown;
    }
    outcome
}

/// Take one bite of the first available corpse in reach
///
/// Returns whether feeding happened so the AI can skip movement.
pub fn feed_on_corpse(
    world: &mut Ecosystem,
    idx: usize,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    if !is_active(world, idx) || !world.animals[idx].diet.eats_meat() {
        return false;
    }

    let position = world.animals[idx].position;
    let reach_sq = world.config.corpse_contact_radius * world.config.corpse_contact_radius;
    let Some(corpse_idx) = world
        .corpses
        .iter()
        .position(|c| c.is_available() && c.position.distance_squared(&position) < reach_sq)
    else {
        return false;
    };

    let total_bites = world.config.corpse_consumption_ticks;
    let energy = world.config.corpse_energy_per_tick();

    let corpse = &mut world.corpses[corpse_idx];
    corpse.take_bite(total_bites);
    let corpse_position = corpse.position;

    let animal = &mut world.animals[idx];
    animal.gain_energy(energy);

    events.push(SimulationEvent::Ate {
        tick: world.current_tick,
        eater: animal.id,
        species: animal.species,
        food: FoodKind::Corpse,
        position: corpse_position,
    });
    true
}

/// Diet-gated eating
///
/// Herbivores gain the plant's nutrition. Omnivores destroy the plant but
/// gain nothing from it. Meat eaters attack animal targets instead.
pub fn eat(
    world: &mut Ecosystem,
    eater: usize,
    target: FoodTarget,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    if !is_active(world, eater) {
        return false;
    }
    let diet = world.animals[eater].diet;

    match target {
        FoodTarget::Plant(plant_idx) => {
            if !diet.eats_plants() {
                return false;
            }
            let Some(plant) = world.plants.get_mut(plant_idx) else {
                return false;
            };
            if !plant.is_alive() {
                return false;
            }

            let nutrition = plant.nutrition;
            let plant_id = plant.id;
            let position = plant.position;
            plant.destroy();
            world.schedule_plant_removal(plant_id);

            let animal = &mut world.animals[eater];
            if diet == Diet::Herbivore {
                animal.energy = (animal.energy + nutrition).min(animal.max_energy());
            }

            events.push(SimulationEvent::Ate {
                tick: world.current_tick,
                eater: animal.id,
                species: animal.species,
                food: FoodKind::Plant,
                position,
            });
            true
        }
        FoodTarget::Animal(victim) => {
            if !diet.eats_meat() {
                return false;
            }
            let cooldown = world.config.attack_cooldown;
            try_attack(world, eater, victim, cooldown, events).landed()
        }
    }
}
