pub mod bounds;
pub mod placement;

pub use bounds::WorldBounds;
pub use placement::{scatter, Placement, ScatterParams};
