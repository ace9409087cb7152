//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{Aabb, check_collision};
pub use difficulty::DifficultyController;
pub use obstacle::{Obstacle, ObstacleField, ObstacleId, ObstacleKind, ObstacleSpec, Sweep};
pub use spawner::{ObstacleSpawner, spawn_due};
pub use state::{Car, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, TickResult, tick};
pub use track::LaneTrack;
