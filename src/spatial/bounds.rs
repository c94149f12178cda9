//! Rectangular world bounds

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// The playable plane, `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Uniform random point at least `margin` from every edge
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R, margin: f32) -> Vec2 {
        let margin = margin.min(self.width * 0.5).min(self.height * 0.5);
        Vec2::new(
            rng.gen_range(margin..=self.width - margin),
            rng.gen_range(margin..=self.height - margin),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_clamp_keeps_points_inside() {
        let bounds = WorldBounds::new(100.0, 50.0);
        assert_eq!(bounds.clamp(Vec2::new(-5.0, 70.0)), Vec2::new(0.0, 50.0));
        assert_eq!(bounds.clamp(Vec2::new(20.0, 10.0)), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_random_point_respects_margin() {
        let bounds = WorldBounds::new(200.0, 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let p = bounds.random_point(&mut rng, 20.0);
            assert!(p.x >= 20.0 && p.x <= 180.0);
            assert!(p.y >= 20.0 && p.y <= 80.0);
        }
    }

    #[test]
    fn test_contains_edges() {
        let bounds = WorldBounds::new(10.0, 10.0);
        assert!(bounds.contains(Vec2::new(0.0, 10.0)));
        assert!(!bounds.contains(Vec2::new(10.1, 5.0)));
    }
}
