//! Starting population
//!
//! Herbivores start on the left half, carnivores on the right, with an empty
//! band between them so nobody is eaten in the first second. Omnivores spawn
//! just outside the band on a random side; the player starts in the centre.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::core::types::Vec2;
use crate::ecosystem::state::Ecosystem;
use crate::entity::{Animal, Diet, Plant, Species};
use crate::spatial::{scatter, ScatterParams};

const EDGE_PADDING: f32 = 50.0;
const TOP_PADDING: f32 = 80.0;
const OMNIVORE_BAND_OFFSET: f32 = 40.0;

/// Inclusive range that never inverts on small worlds
fn span(lo: f32, hi: f32) -> RangeInclusive<f32> {
    lo..=hi.max(lo)
}

pub fn populate_initial(world: &mut Ecosystem) {
    let initial = world.config.initial.clone();
    let w = world.bounds.width;
    let h = world.bounds.height;
    let half = w * 0.5;
    let buffer = initial.separation_buffer;

    let left = span(EDGE_PADDING, (half - buffer).max(EDGE_PADDING));
    let right = span((half + buffer).min(w - EDGE_PADDING), w - EDGE_PADDING);
    let rows = span(TOP_PADDING, h - EDGE_PADDING);

    let omni_left = span(*left.start(), left.end().min(half - buffer - OMNIVORE_BAND_OFFSET));
    let omni_right = span(
        (half + buffer + OMNIVORE_BAND_OFFSET).max(*right.start()),
        *right.end(),
    );

    for species in Species::ALL {
        for _ in 0..initial.count(species) {
            let position = if species.is_player() {
                world.bounds.center()
            } else {
                let x = match species.diet() {
                    Diet::Herbivore => world.rng.gen_range(left.clone()),
                    Diet::Carnivore => world.rng.gen_range(right.clone()),
                    Diet::Omnivore => {
                        if world.rng.gen_bool(0.5) {
                            world.rng.gen_range(omni_left.clone())
                        } else {
                            world.rng.gen_range(omni_right.clone())
                        }
                    }
                };
                Vec2::new(x, world.rng.gen_range(rows.clone()))
            };
            world.add_animal(Animal::new(species, position));
        }
    }

    seed_plants(world, initial.plants);

    tracing::info!(
        "Populated ecosystem: {} animals, {} plants",
        world.animals.len(),
        world.plants.len()
    );
}

/// Scatter `count` plants of mixed ages so seeding starts immediately
fn seed_plants(world: &mut Ecosystem, count: usize) {
    let params = ScatterParams {
        min_spacing: world.config.plant_min_spacing,
        attempts: world.config.placement_attempts,
        margin: world.config.placement_margin,
    };
    let thresholds = world.growth_thresholds();

    for _ in 0..count {
        let occupied = world.live_plant_positions();
        let position = scatter(&mut world.rng, &world.bounds, &occupied, params).position();
        let age = world.rng.gen_range(0..thresholds.wither);
        let plant = Plant::aged(
            position,
            world.config.plant_health,
            world.config.plant_nutrition,
            age,
            &thresholds,
        );
        world.add_plant(plant);
    }
}
