//! Road geometry and the lateral movement rule
//!
//! The road is centred on x = 0 and split into equal-width lanes.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::frames;

/// Abstract road: width, lanes and the car's drivable band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneTrack {
    pub half_width: f32,
    pub lane_count: u32,
    /// Gap between the car's centre and the road edge
    pub margin: f32,
}

impl LaneTrack {
    pub fn new(half_width: f32, lane_count: u32, margin: f32) -> Self {
        Self {
            half_width,
            lane_count: lane_count.max(1),
            margin,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.half_width(), config.lane_count, config.car_margin)
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        2.0 * self.half_width / self.lane_count as f32
    }

    /// Largest |x| the car centre may reach
    #[inline]
    pub fn limit(&self) -> f32 {
        (self.half_width - self.margin).max(0.0)
    }

    /// Lateral centre of lane `lane` (0 = leftmost)
    pub fn lane_center(&self, lane: u32) -> f32 {
        let lane = lane.min(self.lane_count - 1);
        -self.half_width + self.lane_width() * (lane as f32 + 0.5)
    }

    pub fn lane_centers(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.lane_count).map(|lane| self.lane_center(lane))
    }

    /// Lane containing lateral position `x` (positions off the road snap to the edge lane)
    pub fn lane_of(&self, x: f32) -> u32 {
        let lane = ((x + self.half_width) / self.lane_width()).floor();
        (lane.max(0.0) as u32).min(self.lane_count - 1)
    }

    /// Restrict a proposed lateral position to the drivable band
    #[inline]
    pub fn clamp_lateral(&self, x: f32) -> f32 {
        let limit = self.limit();
        x.clamp(-limit, limit)
    }

    /// Apply one tick of steering.
    ///
    /// Holding both directions cancels out: the car stays put.
    pub fn advance_car(
        &self,
        x: f32,
        left: bool,
        right: bool,
        base_speed: f32,
        speed_multiplier: f32,
        dt: f32,
    ) -> f32 {
        let direction = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => return self.clamp_lateral(x),
        };
        let step = base_speed * speed_multiplier * frames(dt);
        if !step.is_finite() {
            return self.clamp_lateral(x);
        }
        self.clamp_lateral(x + direction * step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn track() -> LaneTrack {
        LaneTrack::new(5.0, 3, 1.0)
    }

    #[test]
    fn test_lane_centers() {
        let track = track();
        let centers: Vec<f32> = track.lane_centers().collect();
        assert_eq!(centers.len(), 3);
        assert!((centers[0] + 10.0 / 3.0).abs() < 1e-5);
        assert!(centers[1].abs() < 1e-5);
        assert!((centers[2] - 10.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_single_lane_is_centred() {
        let track = LaneTrack::new(5.0, 1, 1.0);
        assert_eq!(track.lane_center(0), 0.0);
        assert_eq!(track.lane_of(-4.9), 0);
        assert_eq!(track.lane_of(4.9), 0);
    }

    #[test]
    fn test_lane_of() {
        let track = track();
        assert_eq!(track.lane_of(-4.0), 0);
        assert_eq!(track.lane_of(0.0), 1);
        assert_eq!(track.lane_of(4.0), 2);
        assert_eq!(track.lane_of(-50.0), 0);
        assert_eq!(track.lane_of(50.0), 2);
    }

    #[test]
    fn test_clamp_lateral() {
        let track = track();
        assert_eq!(track.clamp_lateral(10.0), 4.0);
        assert_eq!(track.clamp_lateral(-10.0), -4.0);
        assert_eq!(track.clamp_lateral(1.5), 1.5);
    }

    #[test]
    fn test_advance_car_moves_one_reference_step() {
        let track = track();
        let x = track.advance_car(0.0, true, false, 0.15, 1.0, SIM_DT);
        assert!((x + 0.15).abs() < 1e-5);
        let x = track.advance_car(0.0, false, true, 0.15, 2.0, SIM_DT);
        assert!((x - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_advance_car_both_held_is_still() {
        let track = track();
        assert_eq!(track.advance_car(1.0, true, true, 0.15, 1.0, SIM_DT), 1.0);
        assert_eq!(track.advance_car(1.0, false, false, 0.15, 1.0, SIM_DT), 1.0);
    }

    #[test]
    fn test_advance_car_ignores_infinite_step() {
        let track = track();
        assert_eq!(track.advance_car(1.0, false, true, 0.15, 1.0, f32::INFINITY), 1.0);
        assert_eq!(track.advance_car(1.0, true, true, 0.15, 1.0, f32::INFINITY), 1.0);
        assert_eq!(track.advance_car(1.0, false, false, 0.15, f32::MAX, f32::MAX), 1.0);
    }

    #[test]
    fn test_advance_car_stops_at_edge() {
        let track = track();
        let x = track.advance_car(3.95, false, true, 0.15, 1.0, SIM_DT);
        assert_eq!(x, 4.0);
    }
}
