//! Aging and vital decay
//!
//! Animals lose 1 energy every `energy_decay_interval` ticks of age and
//! 1 health every `health_decay_interval`. Removal-immune animals are exempt.

use crate::ecosystem::Ecosystem;
use crate::simulation::events::{DeathCause, SimulationEvent};

/// Age one animal, killing it when its vitals run out
///
/// Returns the cause if the animal died this call.
pub fn age_animal(
    world: &mut Ecosystem,
    idx: usize,
    events: &mut Vec<SimulationEvent>,
) -> Option<DeathCause> {
    let energy_interval = world.config.energy_decay_interval.max(1);
    let health_interval = world.config.health_decay_interval.max(1);

    let id = world.animals.get(idx)?.id;
    if world.is_animal_scheduled(id) {
        return None;
    }
    let animal = &mut world.animals[idx];
    if animal.removal_immune {
        return None;
    }

    animal.age += 1;
    if animal.age % energy_interval == 0 {
        animal.energy -= 1.0;
    }
    if animal.age % health_interval == 0 {
        animal.health -= 1;
    }

    let cause = if animal.energy <= 0.0 {
        DeathCause::Starvation
    } else if animal.health <= 0 {
        DeathCause::OldAge
    } else {
        return None;
    };

    animal.die();
    let (id, species, position) = (animal.id, animal.species, animal.position);
    world.schedule_animal_removal(id);

    tracing::debug!("{} died of {:?} at tick {}", species, cause, world.current_tick);
    events.push(SimulationEvent::Died {
        tick: world.current_tick,
        id,
        species,
        cause,
        position,
    });
    Some(cause)
}

/// Age every corpse and count down skull markers
pub fn age_corpses(world: &mut Ecosystem) {
    for corpse in &mut world.corpses {
        corpse.advance_age();
    }
}
