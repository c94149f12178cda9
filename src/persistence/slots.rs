//! Named save slots on disk
//!
//! Each slot is a pair of files in the save directory:
//! `<slot>.state.json` (versioned snapshot) and `<slot>.meta.json`
//! (summary). Existing files are copied to `<file>.bak` before being
//! overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{EcoError, Result};
use crate::ecosystem::Ecosystem;
use crate::persistence::metadata::SaveMetadata;
use crate::persistence::snapshot::{Compatibility, EcosystemSnapshot, SIM_VERSION};

pub const DEFAULT_SAVE_DIR: &str = "saves";

const STATE_SUFFIX: &str = ".state.json";
const META_SUFFIX: &str = ".meta.json";

pub struct SaveSlots {
    root: PathBuf,
}

impl SaveSlots {
    /// Open a slot store, creating the directory on demand
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn paths(&self, slot: &str) -> Result<(PathBuf, PathBuf)> {
        let valid = !slot.is_empty()
            && slot.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EcoError::InvalidSlot(slot.to_string()));
        }
        Ok((
            self.root.join(format!("{slot}{STATE_SUFFIX}")),
            self.root.join(format!("{slot}{META_SUFFIX}")),
        ))
    }

    fn backup(path: &Path) -> Result<()> {
        if path.exists() {
            let mut bak = path.as_os_str().to_owned();
            bak.push(".bak");
            fs::copy(path, PathBuf::from(bak))?;
        }
        Ok(())
    }

    /// Write a full snapshot and its summary
    pub fn save(
        &self,
        slot: &str,
        world: &Ecosystem,
        autosave: bool,
        autosave_interval: u64,
    ) -> Result<SaveMetadata> {
        let (state_path, meta_path) = self.paths(slot)?;
        Self::backup(&state_path)?;
        Self::backup(&meta_path)?;

        let state = world.snapshot().to_json()?;
        fs::write(&state_path, state)?;

        let metadata = SaveMetadata::describe(world, autosave, autosave_interval);
        fs::write(&meta_path, serde_json::to_string_pretty(&metadata)?)?;

        tracing::info!(
            "Saved slot '{}' at tick {} ({} animals, {} plants)",
            slot,
            metadata.tick,
            metadata.animals,
            metadata.plants
        );
        Ok(metadata)
    }

    /// Read only the summary of a slot
    pub fn load_metadata(&self, slot: &str) -> Result<SaveMetadata> {
        let (_, meta_path) = self.paths(slot)?;
        if !meta_path.exists() {
            return Err(EcoError::EmptySlot(slot.to_string()));
        }
        let content = fs::read_to_string(&meta_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a slot into a new ecosystem
    ///
    /// The metadata version is checked before the snapshot is parsed. The
    /// caller's current ecosystem is untouched on any error.
    pub fn load(&self, slot: &str) -> Result<(Ecosystem, Compatibility)> {
        let (state_path, meta_path) = self.paths(slot)?;
        if !state_path.exists() || !meta_path.exists() {
            return Err(EcoError::EmptySlot(slot.to_string()));
        }

        let metadata = self.load_metadata(slot)?;
        if metadata.version != SIM_VERSION {
            tracing::warn!(
                "Rejected slot '{}': saved by {} (running {})",
                slot,
                metadata.version,
                SIM_VERSION
            );
            return Err(EcoError::VersionMismatch {
                expected: SIM_VERSION.to_string(),
                found: metadata.version,
            });
        }

        let content = fs::read_to_string(&state_path)?;
        let (snapshot, compatibility) = EcosystemSnapshot::from_json(&content)?;
        let world = snapshot.restore();

        tracing::info!(
            "Loaded slot '{}' at tick {} ({:?})",
            slot,
            world.current_tick,
            compatibility
        );
        Ok((world, compatibility))
    }

    /// Every slot with readable metadata, sorted by name
    pub fn list(&self) -> Result<Vec<(String, SaveMetadata)>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(slot) = file_name.to_str().and_then(|n| n.strip_suffix(META_SUFFIX)) else {
                continue;
            };
            match self.load_metadata(slot) {
                Ok(meta) => slots.push((slot.to_string(), meta)),
                Err(e) => tracing::warn!("Skipping unreadable slot '{}': {}", slot, e),
            }
        }
        slots.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(slots)
    }
}
