//! Saurian - real-time 2D dinosaur ecosystem simulation

pub mod core;
pub mod driver;
pub mod ecosystem;
pub mod entity;
pub mod persistence;
pub mod simulation;
pub mod spatial;
