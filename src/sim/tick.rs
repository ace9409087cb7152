//! Simulation step
//!
//! Advances one run by a single discrete step and reports what changed so
//! the presentation layer can update visuals and audio.

use serde::Serialize;

use super::autopilot;
use super::collision::check_collision;
use super::obstacle::{Obstacle, ObstacleId};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MAX_DT;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Steer left held
    pub move_left: bool,
    /// Steer right held
    pub move_right: bool,
    /// Idle/demo mode - the autopilot drives
    pub idle_mode: bool,
}

impl TickInput {
    pub fn new(move_left: bool, move_right: bool) -> Self {
        Self {
            move_left,
            move_right,
            idle_mode: false,
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickResult {
    pub score: u64,
    pub speed_multiplier: f32,
    pub game_over: bool,
    /// Obstacles created this tick, as placed
    pub spawn_events: Vec<Obstacle>,
    /// Obstacles dropped from the registry this tick
    pub remove_events: Vec<ObstacleId>,
    /// Obstacles dodged (and scored) this tick
    pub passed_events: Vec<ObstacleId>,
    /// Obstacle that ended the run
    pub collision: Option<ObstacleId>,
    /// Everything above, in the order it happened
    pub events: Vec<GameEvent>,
}

impl TickResult {
    fn snapshot(state: &GameState) -> Self {
        Self {
            score: state.score,
            speed_multiplier: state.speed_multiplier(),
            game_over: state.is_game_over(),
            ..Default::default()
        }
    }
}

/// Advance the game by `dt` seconds.
///
/// Once the run is over this is a no-op that reports the frozen score.
/// Obstacles that cross the car's plane on the tick of a collision are not
/// scored, and stay unpassed.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickResult {
    if state.is_game_over() {
        return TickResult::snapshot(state);
    }

    // Non-finite and negative deltas are treated as no time passing; hitches
    // longer than MAX_DT are cut short
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };
    let input = if input.idle_mode {
        autopilot::steer(state)
    } else {
        input.clone()
    };

    let mut result = TickResult::default();
    state.time_ticks += 1;
    state.elapsed_ms += dt as f64 * 1000.0;
    let speed_multiplier = state.speed_multiplier();

    // Steer
    state.car.pos.x = state.track.advance_car(
        state.car.pos.x,
        input.move_left,
        input.move_right,
        state.config.base_car_speed,
        speed_multiplier,
        dt,
    );

    // Spawn
    if let Some(spec) = state
        .spawner
        .maybe_spawn(state.elapsed_ms, speed_multiplier, &state.track)
    {
        let id = state.obstacles.insert(spec);
        log::debug!(
            "Spawned {:?} {:?} in lane {} at x={:.2} (t={:.0}ms)",
            id,
            spec.kind,
            state.track.lane_of(spec.pos.x),
            spec.pos.x,
            state.elapsed_ms
        );
        if let Some(obstacle) = state.obstacles.get(id) {
            result.spawn_events.push(obstacle.clone());
        }
        result.events.push(GameEvent::ObstacleSpawned {
            id,
            x: spec.pos.x,
            z: spec.pos.z,
            kind: spec.kind,
            color: spec.color,
        });
    }

    // Advance and prune
    let sweep = state
        .obstacles
        .tick(dt, speed_multiplier, state.car.pos.z);
    for &id in &sweep.removed {
        result.events.push(GameEvent::ObstacleRemoved { id });
    }
    result.remove_events = sweep.removed;

    // Collide
    if let Some(id) = check_collision(&state.car, state.obstacles.iter()) {
        state.phase = GamePhase::GameOver;
        state.obstacles.revert_passed(&sweep.passed_now);
        log::info!(
            "Collision with {:?}! Game over, final score {} ({} dodges)",
            id,
            state.score,
            state.dodge_count()
        );
        result.collision = Some(id);
        result.events.push(GameEvent::Collision { id });
        result.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        return TickResult {
            score: state.score,
            speed_multiplier: state.speed_multiplier(),
            game_over: true,
            ..result
        };
    }

    // Score dodges
    for id in sweep.passed_now {
        state.score += state.config.score_per_dodge;
        let before = state.speed_multiplier();
        let after = state.difficulty.on_dodge();
        log::debug!(
            "Dodged {:?}: score {}, dodges {}",
            id,
            state.score,
            state.dodge_count()
        );
        result.passed_events.push(id);
        result.events.push(GameEvent::ObstaclePassed {
            id,
            score: state.score,
        });
        if after > before {
            log::info!(
                "Speed increased to level {}! Multiplier now {:.2}",
                state.difficulty.level(),
                after
            );
            result.events.push(GameEvent::SpeedIncreased {
                speed_multiplier: after,
            });
        }
    }

    TickResult {
        score: state.score,
        speed_multiplier: state.speed_multiplier(),
        game_over: false,
        ..result
    }
}
