//! Snapshots, save metadata and slot storage

pub mod metadata;
pub mod slots;
pub mod snapshot;

pub use metadata::{EcosystemHealth, SaveMetadata};
pub use slots::{SaveSlots, DEFAULT_SAVE_DIR};
pub use snapshot::{Compatibility, EcosystemSnapshot, SIM_VERSION};
