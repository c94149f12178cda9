//! Plant growth, seeding and population bounds

use std::cmp::Reverse;

use rand::Rng;

use crate::ecosystem::Ecosystem;
use crate::entity::{GrowthStage, Plant};
use crate::spatial::{scatter, Placement, ScatterParams};

fn scatter_params(world: &Ecosystem) -> ScatterParams {
    ScatterParams {
        min_spacing: world.config.plant_min_spacing,
        attempts: world.config.placement_attempts,
        margin: world.config.placement_margin,
    }
}

/// Place one sprout away from existing plants
fn place_sprout(world: &mut Ecosystem) -> Placement {
    let occupied = world.live_plant_positions();
    let params = scatter_params(world);
    let placement = scatter(&mut world.rng, &world.bounds, &occupied, params);
    let sprout = world.new_sprout(placement.position());
    world.add_plant(sprout);
    placement
}

/// Age every live plant and let adults seed
///
/// Returns the number of new sprouts.
pub fn grow_plants(world: &mut Ecosystem) -> usize {
    let thresholds = world.growth_thresholds();
    let snapshot: Vec<usize> = world.iter_living_plants().collect();
    let mut live = snapshot.len();
    let mut seeded = 0;

    for idx in snapshot {
        let plant = &mut world.plants[idx];
        if plant.grow(&thresholds) {
            plant.destroy();
            let id = plant.id;
            world.schedule_plant_removal(id);
            live -= 1;
            continue;
        }

        if !plant.can_seed() || live >= world.config.plant_density_cap {
            continue;
        }
        if world.rng.gen::<f32>() < world.config.plant_seed_chance {
            place_sprout(world);
            live += 1;
            seeded += 1;
        }
    }

    seeded
}

/// Keep the live plant count within `[plant_min, plant_max]`
///
/// Shortfalls are topped up with sprouts. Surplus plants are removed
/// withered first, oldest first within a stage.
pub fn enforce_plant_bounds(world: &mut Ecosystem) -> (usize, usize) {
    let live: Vec<usize> = world.iter_living_plants().collect();
    let (min, max) = (world.config.plant_min, world.config.plant_max);

    if live.len() < min {
        let missing = min - live.len();
        let mut fallbacks = 0;
        for _ in 0..missing {
            if !place_sprout(world).is_scattered() {
                fallbacks += 1;
            }
        }
        if fallbacks > 0 {
            tracing::debug!("Plant top-up used {} fallback placements", fallbacks);
        }
        return (missing, 0);
    }

    if live.len() > max {
        let surplus = live.len() - max;
        let mut ranked = live;
        ranked.sort_by_key(|&i| {
            let p: &Plant = &world.plants[i];
            (p.stage != GrowthStage::Withered, Reverse(p.age))
        });
        for &idx in ranked.iter().take(surplus) {
            world.plants[idx].destroy();
            let id = world.plants[idx].id;
            world.schedule_plant_removal(id);
        }
        return (0, surplus);
    }

    (0, 0)
}
