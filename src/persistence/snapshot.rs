//! Versioned ecosystem snapshots
//!
//! A snapshot is the whole ecosystem, taken between ticks. The document
//! on disk wraps it with the simulator version:
//!
//! ```json
//! { "version": "0.1.0", "ecosystem": { ... } }
//! ```
//!
//! Bare ecosystem documents without the wrapper are still accepted and
//! reported as [`Compatibility::Legacy`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{SimulationConfig, SpeciesCaps};
use crate::core::error::{EcoError, Result};
use crate::core::types::Tick;
use crate::ecosystem::Ecosystem;
use crate::entity::{Animal, Corpse, Plant};

/// Version tag written into every snapshot and metadata file
pub const SIM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Serializable image of an [`Ecosystem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcosystemSnapshot {
    pub tick: Tick,
    pub seed: u64,
    pub max_animals: usize,
    pub species_caps: SpeciesCaps,
    #[serde(default)]
    pub config: SimulationConfig,
    pub animals: Vec<Animal>,
    pub plants: Vec<Plant>,
    #[serde(default)]
    pub corpses: Vec<Corpse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VersionedDocument {
    version: String,
    ecosystem: EcosystemSnapshot,
}

/// How a loaded document was recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    Current,
    /// Bare ecosystem without a version wrapper
    Legacy,
}

impl EcosystemSnapshot {
    pub fn capture(world: &Ecosystem) -> Self {
        Self {
            tick: world.current_tick,
            seed: world.seed,
            max_animals: world.max_animals,
            species_caps: world.species_caps.clone(),
            config: world.config.clone(),
            animals: world.animals.clone(),
            plants: world.plants.clone(),
            corpses: world.corpses.clone(),
        }
    }

    /// Serialize wrapped with [`SIM_VERSION`]
    pub fn to_json(&self) -> Result<String> {
        let doc = VersionedDocument {
            version: SIM_VERSION.to_string(),
            ecosystem: self.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Parse a snapshot document, rejecting any other simulator version
    pub fn from_json(json: &str) -> Result<(Self, Compatibility)> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let Some(object) = value.as_object() else {
            return Err(EcoError::UnrecognizedFormat("document is not an object".into()));
        };

        if let Some(version) = object.get("version") {
            let found = version.as_str().unwrap_or("??").to_string();
            if found != SIM_VERSION {
                return Err(EcoError::VersionMismatch {
                    expected: SIM_VERSION.to_string(),
                    found,
                });
            }
            let doc: VersionedDocument = serde_json::from_value(value)?;
            return Ok((doc.ecosystem, Compatibility::Current));
        }

        if object.contains_key("animals") && object.contains_key("plants") {
            tracing::warn!("Loading legacy snapshot without version tag");
            let snapshot: EcosystemSnapshot = serde_json::from_value(value)?;
            return Ok((snapshot, Compatibility::Legacy));
        }

        Err(EcoError::UnrecognizedFormat(
            "expected a versioned document or a bare ecosystem".into(),
        ))
    }

    /// Rebuild a live ecosystem
    ///
    /// The RNG is reseeded from the stored seed and tick, so a restored run
    /// is reproducible but does not continue the original random stream.
    pub fn restore(self) -> Ecosystem {
        let mut world = Ecosystem::new(self.config, self.seed);
        world.current_tick = self.tick;
        world.max_animals = self.max_animals;
        world.species_caps = self.species_caps;
        world.animals = self.animals;
        world.plants = self.plants;
        world.corpses = self.corpses;
        world.rng = ChaCha8Rng::seed_from_u64(restored_stream(self.seed, self.tick));
        world
    }
}

fn restored_stream(seed: u64, tick: Tick) -> u64 {
    seed ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl Ecosystem {
    pub fn snapshot(&self) -> EcosystemSnapshot {
        EcosystemSnapshot::capture(self)
    }

    pub fn from_snapshot(snapshot: EcosystemSnapshot) -> Self {
        snapshot.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::run_ticks;

    fn running_world() -> Ecosystem {
        let mut world = Ecosystem::with_initial_population(SimulationConfig::default(), 12);
        run_ticks(&mut world, 50);
        world
    }

    #[test]
    fn test_round_trip() {
        let world = running_world();
        let json = world.snapshot().to_json().unwrap();
        let (snapshot, compat) = EcosystemSnapshot::from_json(&json).unwrap();
        assert_eq!(compat, Compatibility::Current);

        let restored = Ecosystem::from_snapshot(snapshot);
        assert_eq!(restored.current_tick, 50);
        assert_eq!(restored.seed, 12);
        assert_eq!(restored.animals.len(), world.animals.len());
        assert_eq!(restored.plants.len(), world.plants.len());
        for (a, b) in restored.animals.iter().zip(&world.animals) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.species, b.species);
            assert_eq!(a.health, b.health);
            assert!((a.energy - b.energy).abs() < 1e-4);
            assert!(a.position.distance(&b.position) < 1e-4);
        }
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let json = running_world().snapshot().to_json().unwrap();
        let tampered = json.replacen(SIM_VERSION, "0.0.0-old", 1);

        match EcosystemSnapshot::from_json(&tampered) {
            Err(EcoError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SIM_VERSION);
                assert_eq!(found, "0.0.0-old");
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|(_, c)| c)),
        }
    }

    #[test]
    fn test_legacy_document_accepted() {
        let snapshot = running_world().snapshot();
        let bare = serde_json::to_string(&snapshot).unwrap();

        let (loaded, compat) = EcosystemSnapshot::from_json(&bare).unwrap();
        assert_eq!(compat, Compatibility::Legacy);
        assert_eq!(loaded.tick, snapshot.tick);
    }

    #[test]
    fn test_unrecognized_document() {
        assert!(matches!(
            EcosystemSnapshot::from_json("[1, 2, 3]"),
            Err(EcoError::UnrecognizedFormat(_))
        ));
        assert!(matches!(
            EcosystemSnapshot::from_json(r#"{"hello": "world"}"#),
            Err(EcoError::UnrecognizedFormat(_))
        ));
    }

    #[test]
    fn test_restored_run_is_reproducible() {
        let snapshot = running_world().snapshot();
        let mut a = snapshot.clone().restore();
        let mut b = snapshot.restore();
        run_ticks(&mut a, 20);
        run_ticks(&mut b, 20);
        assert_eq!(a.live_animal_count(), b.live_animal_count());
        assert_eq!(a.plants.len(), b.plants.len());
    }
}
