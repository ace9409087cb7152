//! Lane Dodge - An endless lane-dodge driving arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `config`: Data-driven game tuning, validated once at construction
//! - `highscores`: Best-score tracking (LocalStorage on web)
//! - `web`: Browser bindings for the rendering host (wasm32 only)

pub mod config;
pub mod error;
pub mod highscores;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{GameConfig, Placement};
pub use error::ConfigError;
pub use highscores::BestScore;

/// Game configuration constants
pub mod consts {
    /// Frame rate the base speeds are tuned against (units per reference frame)
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Fixed timestep used by headless drivers
    pub const SIM_DT: f32 = 1.0 / REFERENCE_FPS;
    /// Largest dt a host should feed in one tick (tab switches, hitches)
    pub const MAX_DT: f32 = 0.1;

    /// Car bounding half-extents (lateral, height, longitudinal)
    pub const CAR_HALF_WIDTH: f32 = 0.5;
    pub const CAR_HALF_HEIGHT: f32 = 0.5;
    pub const CAR_HALF_LENGTH: f32 = 1.0;

    /// Obstacle centre height above the road
    pub const OBSTACLE_ELEVATION: f32 = 0.75;

    /// Obstacle colour palette (0xRRGGBB)
    pub const OBSTACLE_COLORS: [u32; 5] = [0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff];
}

/// Convert a time delta in seconds to reference frames
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}
