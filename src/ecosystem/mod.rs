//! Ecosystem state and its starting population

pub mod populate;
pub mod state;

pub use populate::populate_initial;
pub use state::{Ecosystem, FlushReport};
