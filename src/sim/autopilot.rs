//! Idle/demo mode driver
//!
//! Picks a lateral target that clears every obstacle inside a lookahead
//! window and steers toward it. Good enough for attract screens and
//! headless soak runs, not meant to be optimal.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::{CAR_HALF_LENGTH, CAR_HALF_WIDTH};

/// How far ahead of the car obstacles are considered
const LOOKAHEAD: f32 = 45.0;
/// Extra lateral clearance kept beyond touching distance
const CLEARANCE: f32 = 0.3;

/// Lateral gap between the car at `x` and the nearest threat (negative = overlap)
fn worst_gap(x: f32, threats: &[(f32, f32)]) -> f32 {
    threats
        .iter()
        .map(|&(ox, half)| (x - ox).abs() - (CAR_HALF_WIDTH + half))
        .fold(f32::INFINITY, f32::min)
}

/// Choose this tick's steering for the car
pub fn steer(state: &GameState) -> TickInput {
    let car_x = state.car.lateral();
    let car_z = state.car.pos.z;

    // (lateral centre, lateral half-extent) of every obstacle still ahead
    let threats: Vec<(f32, f32)> = state
        .obstacles
        .iter()
        .filter(|o| !o.passed)
        .filter(|o| {
            let half = o.kind.half_extents();
            o.pos.z - half.z <= car_z + CAR_HALF_LENGTH && car_z - o.pos.z <= LOOKAHEAD
        })
        .map(|o| (o.pos.x, o.kind.half_extents().x))
        .collect();

    if worst_gap(car_x, &threats) > CLEARANCE {
        return TickInput::default();
    }

    let limit = state.track.limit();
    let mut candidates: Vec<f32> = state.track.lane_centers().map(|c| state.track.clamp_lateral(c)).collect();
    candidates.extend([-limit, limit]);

    // Nearest safe spot, else the one with the most room
    let target = candidates
        .iter()
        .copied()
        .filter(|&x| worst_gap(x, &threats) > CLEARANCE)
        .min_by(|a, b| (a - car_x).abs().total_cmp(&(b - car_x).abs()))
        .or_else(|| {
            candidates
                .iter()
                .copied()
                .max_by(|a, b| worst_gap(*a, &threats).total_cmp(&worst_gap(*b, &threats)))
        })
        .unwrap_or(car_x);

    let dead_band = state.config.base_car_speed * state.speed_multiplier() / 2.0;
    let delta = target - car_x;
    TickInput {
        move_left: delta < -dead_band,
        move_right: delta > dead_band,
        idle_mode: true,
    }
}
