//! Scattered placement of static entities
//!
//! Candidates are sampled uniformly and rejected when they land too close to
//! an existing position. After the retry budget runs out the last sample is
//! accepted unconditionally so placement never fails a tick.

use rand::Rng;

use crate::core::types::Vec2;
use crate::spatial::bounds::WorldBounds;

/// Parameters for one placement request
#[derive(Debug, Clone, Copy)]
pub struct ScatterParams {
    pub min_spacing: f32,
    pub attempts: u32,
    pub margin: f32,
}

/// Where a placement request landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Respects the minimum spacing
    Scattered(Vec2),
    /// Spacing could not be met within the retry budget
    Fallback(Vec2),
}

impl Placement {
    pub fn position(&self) -> Vec2 {
        match *self {
            Placement::Scattered(p) | Placement::Fallback(p) => p,
        }
    }

    pub fn is_scattered(&self) -> bool {
        matches!(self, Placement::Scattered(_))
    }
}

/// Find a position at least `min_spacing` from every point in `occupied`
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &WorldBounds,
    occupied: &[Vec2],
    params: ScatterParams,
) -> Placement {
    let spacing_sq = params.min_spacing * params.min_spacing;

    for _ in 0..params.attempts {
        let candidate = bounds.random_point(rng, params.margin);
        let clear = occupied
            .iter()
            .all(|p| p.distance_squared(&candidate) >= spacing_sq);
        if clear {
            return Placement::Scattered(candidate);
        }
    }

    Placement::Fallback(bounds.random_point(rng, params.margin))
}
