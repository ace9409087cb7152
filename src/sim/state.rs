//! Game state and core simulation types
//!
//! One `GameState` is one run. It is owned by a single driver and only
//! changes through [`super::tick`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::DifficultyController;
use super::obstacle::{ObstacleField, ObstacleId, ObstacleKind};
use super::spawner::ObstacleSpawner;
use super::track::LaneTrack;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    /// x is lateral, z is the fixed reference plane
    pub pos: Vec3,
}

impl Car {
    /// Car centred on the road at reference plane `car_z`
    pub fn new(car_z: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, CAR_HALF_HEIGHT, car_z),
        }
    }

    #[inline]
    pub fn lateral(&self) -> f32 {
        self.pos.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(
            self.pos,
            Vec3::new(CAR_HALF_WIDTH, CAR_HALF_HEIGHT, CAR_HALF_LENGTH),
        )
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Materialize a visual for a new obstacle
    ObstacleSpawned {
        id: ObstacleId,
        x: f32,
        z: f32,
        kind: ObstacleKind,
        color: u32,
    },
    /// Obstacle crossed the car's plane untouched
    ObstaclePassed { id: ObstacleId, score: u64 },
    /// Obstacle fell far enough behind to be dropped
    ObstacleRemoved { id: ObstacleId },
    /// Difficulty step reached
    SpeedIncreased { speed_multiplier: f32 },
    /// Car hit an obstacle
    Collision { id: ObstacleId },
    /// Run ended
    GameOver { final_score: u64 },
}

/// Complete game state (deterministic for a fixed seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub track: LaneTrack,
    pub car: Car,
    /// Live obstacles, in spawn order
    pub obstacles: ObstacleField,
    pub spawner: ObstacleSpawner,
    pub difficulty: DifficultyController,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulated time since the run started
    pub elapsed_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Start a fresh run
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let spawner = ObstacleSpawner::from_config(&config);
        log::info!(
            "New game: {} lane(s), {:?} placement, seed {}",
            config.lane_count,
            config.placement,
            spawner.seed
        );

        Ok(Self {
            track: LaneTrack::from_config(&config),
            car: Car::new(config.car_z),
            obstacles: ObstacleField::new(
                config.base_obstacle_speed,
                config.pass_margin,
                config.removal_distance,
            ),
            spawner,
            difficulty: DifficultyController::new(
                config.speed_increase_threshold,
                config.speed_increase_amount,
            ),
            phase: GamePhase::Playing,
            score: 0,
            elapsed_ms: 0.0,
            time_ticks: 0,
            config,
        })
    }

    /// Fresh run with the same configuration and seed
    pub fn restart(&self) -> Result<Self, ConfigError> {
        let mut config = self.config.clone();
        config.seed = Some(self.spawner.seed);
        Self::new(config)
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Final score, once the run has ended
    pub fn final_score(&self) -> Option<u64> {
        self.is_game_over().then_some(self.score)
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.difficulty.speed_multiplier
    }

    #[inline]
    pub fn dodge_count(&self) -> u32 {
        self.difficulty.dodge_count
    }
}
