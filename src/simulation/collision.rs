//! Pairwise body separation
//!
//! O(n²) over live animals; the population ceiling keeps n small. Passes
//! repeat until no pair overlaps or `collision_passes` is reached, so tight
//! clusters and bodies pinned against an edge may stay slightly overlapped.

use std::f32::consts::TAU;

use rand::Rng;

use crate::core::types::Vec2;
use crate::ecosystem::Ecosystem;

const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Overlap small enough to count as separated
const SEPARATION_TOLERANCE: f32 = 1e-4;

/// Push overlapping animals apart, returning how many pairs were separated
pub fn resolve_overlaps(world: &mut Ecosystem) -> usize {
    let min_d = world.config.min_separation;
    let mut resolved = 0;

    let living: Vec<usize> = world.iter_living().collect();

    for _ in 0..world.config.collision_passes.max(1) {
        let mut pass_resolved = 0;

        for (n, &i) in living.iter().enumerate() {
            for &j in &living[n + 1..] {
                let a = world.animals[i].position;
                let b = world.animals[j].position;
                let d = a.distance(&b);
                if d >= min_d - SEPARATION_TOLERANCE {
                    continue;
                }

                let dir = if d < DEGENERATE_DISTANCE {
                    Vec2::from_angle(world.rng.gen_range(0.0..TAU))
                } else {
                    (b - a) / d
                };
                let push = dir * ((min_d - d) * 0.5);

                world.animals[i].position = world.bounds.clamp(a - push);
                world.animals[j].position = world.bounds.clamp(b + push);
                pass_resolved += 1;
            }
        }

        resolved += pass_resolved;
        if pass_resolved == 0 {
            break;
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::{Animal, Species};

    fn world() -> Ecosystem {
        Ecosystem::new(SimulationConfig::default(), 13)
    }

    #[test]
    fn test_overlapping_pair_separated() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(100.0, 100.0)));
        world.add_animal(Animal::new(Species::Stegosaurus, Vec2::new(110.0, 100.0)));

        assert_eq!(resolve_overlaps(&mut world), 1);
        let d = world.animals[0].position.distance(&world.animals[1].position);
        assert!((d - 24.0).abs() < 1e-3);
        // Symmetric push
        assert!((world.animals[0].position.x - 93.0).abs() < 1e-3);
        assert!((world.animals[1].position.x - 117.0).abs() < 1e-3);
    }

    #[test]
    fn test_coincident_pair_pushed_apart() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Moshops, Vec2::new(300.0, 300.0)));
        world.add_animal(Animal::new(Species::Moshops, Vec2::new(300.0, 300.0)));

        resolve_overlaps(&mut world);
        let d = world.animals[0].position.distance(&world.animals[1].position);
        assert!((d - 24.0).abs() < 1e-3);
        assert!(world.animals.iter().all(|a| a.position.x.is_finite()));
    }

    #[test]
    fn test_row_of_three_fully_separated() {
        let mut world = world();
        for x in [100.0, 110.0, 120.0] {
            world.add_animal(Animal::new(Species::Triceratops, Vec2::new(x, 300.0)));
        }

        resolve_overlaps(&mut world);
        for i in 0..3 {
            for j in i + 1..3 {
                let d = world.animals[i].position.distance(&world.animals[j].position);
                assert!(d >= 24.0 - 1e-3, "pair ({}, {}) only {} apart", i, j, d);
            }
        }
    }

    #[test]
    fn test_single_pass_leaves_chain_overlap() {
        let mut world = world();
        world.config.collision_passes = 1;
        for x in [100.0, 110.0, 120.0] {
            world.add_animal(Animal::new(Species::Triceratops, Vec2::new(x, 300.0)));
        }

        resolve_overlaps(&mut world);
        let d = world.animals[0].position.distance(&world.animals[1].position);
        assert!(d < 24.0);
    }

    #[test]
    fn test_distant_pair_untouched() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(100.0, 100.0)));
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(200.0, 100.0)));

        assert_eq!(resolve_overlaps(&mut world), 0);
        assert_eq!(world.animals[0].position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_push_clamped_to_bounds() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(0.0, 50.0)));
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(4.0, 50.0)));

        resolve_overlaps(&mut world);
        assert!(world.animals.iter().all(|a| world.bounds.contains(a.position)));
    }

    #[test]
    fn test_dead_animals_ignored() {
        let mut world = world();
        world.add_animal(Animal::new(Species::Triceratops, Vec2::new(100.0, 100.0)));
        world.add_animal(
            Animal::new(Species::Triceratops, Vec2::new(101.0, 100.0)).with_energy(0.0),
        );

        assert_eq!(resolve_overlaps(&mut world), 0);
    }
}
