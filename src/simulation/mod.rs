pub mod behavior;
pub mod collision;
pub mod combat;
pub mod events;
pub mod lifecycle;
pub mod plants;
pub mod player;
pub mod population;
pub mod tick;

pub use behavior::{run_behavior, species_centroids, Centroids};
pub use collision::resolve_overlaps;
pub use combat::{attack, eat, feed_on_corpse, try_attack, AttackOutcome, FoodTarget};
pub use events::{DeathCause, FoodKind, SimulationEvent};
pub use player::{apply_player_input, Direction, PlayerInput};
pub use population::{cull_to_cap, reproduce};
pub use tick::{run_simulation_tick, run_ticks};
