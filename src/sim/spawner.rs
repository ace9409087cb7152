//! Obstacle spawning policy
//!
//! Spawns are paced by elapsed time, and the interval shrinks as the speed
//! multiplier grows (interval / multiplier).

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::obstacle::{ObstacleKind, ObstacleSpec};
use super::track::LaneTrack;
use crate::config::{GameConfig, Placement};
use crate::consts::{OBSTACLE_COLORS, OBSTACLE_ELEVATION};

/// True when enough time has passed since the last spawn
#[inline]
pub fn spawn_due(elapsed_ms: f64, last_spawn_ms: f64, interval_ms: f64, speed_multiplier: f32) -> bool {
    elapsed_ms - last_spawn_ms > interval_ms / speed_multiplier as f64
}

/// Decides when and where new obstacles appear
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    rng: Pcg32,
    /// Seed the RNG was created from (for reproducing a run)
    pub seed: u64,
    pub interval_ms: f64,
    pub last_spawn_ms: f64,
    pub spawn_z: f32,
    pub placement: Placement,
}

impl ObstacleSpawner {
    pub fn new(seed: u64, interval_ms: f64, spawn_z: f32, placement: Placement) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            interval_ms,
            last_spawn_ms: 0.0,
            spawn_z,
            placement,
        }
    }

    /// Build from config, drawing a seed from OS entropy when none is set
    pub fn from_config(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::new(seed, config.spawn_interval_ms, config.spawn_z, config.placement)
    }

    /// Spawn an obstacle if one is due at `elapsed_ms`.
    ///
    /// On a spawn the pacing clock restarts from `elapsed_ms`.
    pub fn maybe_spawn(
        &mut self,
        elapsed_ms: f64,
        speed_multiplier: f32,
        track: &LaneTrack,
    ) -> Option<ObstacleSpec> {
        if !spawn_due(elapsed_ms, self.last_spawn_ms, self.interval_ms, speed_multiplier) {
            return None;
        }
        self.last_spawn_ms = elapsed_ms;
        Some(self.roll(track))
    }

    /// Pick placement, shape and colour for a new obstacle
    pub fn roll(&mut self, track: &LaneTrack) -> ObstacleSpec {
        let x = match self.placement {
            Placement::Lanes => {
                let lane = self.rng.random_range(0..track.lane_count);
                track.lane_center(lane)
            }
            Placement::Continuous => {
                let limit = track.limit();
                self.rng.random_range(-limit..=limit)
            }
        };
        let kind = ObstacleKind::ALL[self.rng.random_range(0..ObstacleKind::ALL.len())];
        let color = OBSTACLE_COLORS[self.rng.random_range(0..OBSTACLE_COLORS.len())];

        ObstacleSpec {
            pos: Vec3::new(x, OBSTACLE_ELEVATION, self.spawn_z),
            kind,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> LaneTrack {
        LaneTrack::new(5.0, 3, 1.0)
    }

    #[test]
    fn test_spawn_due_is_strict() {
        assert!(!spawn_due(1000.0, 0.0, 1000.0, 1.0));
        assert!(spawn_due(1000.5, 0.0, 1000.0, 1.0));
    }

    #[test]
    fn test_spawn_interval_shrinks_with_multiplier() {
        // 1000ms at 2x is a 500ms cadence
        assert!(!spawn_due(499.0, 0.0, 1000.0, 2.0));
        assert!(spawn_due(501.0, 0.0, 1000.0, 2.0));
        assert!(spawn_due(1501.0, 1000.0, 1000.0, 2.0));
        assert!(!spawn_due(1499.0, 1000.0, 1000.0, 2.0));
    }

    #[test]
    fn test_cadence_at_double_speed() {
        let track = track();
        let mut spawner = ObstacleSpawner::new(1, 1000.0, -150.0, Placement::Lanes);
        let mut spawn_times = Vec::new();
        // 1ms resolution over 5 seconds
        for ms in 1..=5000 {
            if spawner.maybe_spawn(ms as f64, 2.0, &track).is_some() {
                spawn_times.push(ms);
            }
        }
        assert_eq!(spawn_times, vec![501, 1002, 1503, 2004, 2505, 3006, 3507, 4008, 4509]);

        let mut spawner = ObstacleSpawner::new(1, 1000.0, -150.0, Placement::Lanes);
        let slow = (1..=5000)
            .filter(|&ms| spawner.maybe_spawn(ms as f64, 1.0, &track).is_some())
            .count();
        assert_eq!(slow, 4);
    }

    #[test]
    fn test_lane_placement_uses_lane_centres() {
        let track = track();
        let centers: Vec<f32> = track.lane_centers().collect();
        let mut spawner = ObstacleSpawner::new(42, 1000.0, -150.0, Placement::Lanes);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let spec = spawner.roll(&track);
            let lane = centers
                .iter()
                .position(|&c| c == spec.pos.x)
                .expect("spawned off a lane centre");
            seen[lane] = true;
            assert_eq!(spec.pos.z, -150.0);
            assert_eq!(spec.pos.y, OBSTACLE_ELEVATION);
            assert!(OBSTACLE_COLORS.contains(&spec.color));
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_continuous_placement_stays_drivable() {
        let track = LaneTrack::new(5.0, 3, 1.0);
        let mut spawner = ObstacleSpawner::new(7, 1000.0, -150.0, Placement::Continuous);
        for _ in 0..500 {
            let x = spawner.roll(&track).pos.x;
            assert!((-4.0..=4.0).contains(&x));
        }
    }

    #[test]
    fn test_classic_placement_spans_drivable_band() {
        let config = GameConfig::classic().with_seed(3);
        let track = LaneTrack::from_config(&config);
        let mut spawner = ObstacleSpawner::from_config(&config);
        assert_eq!(track.limit(), 4.5);
        let xs: Vec<f32> = (0..500).map(|_| spawner.roll(&track).pos.x).collect();
        assert!(xs.iter().all(|x| (-4.5..=4.5).contains(x)));
        assert!(xs.iter().any(|x| x.abs() > 4.0));
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let track = track();
        let mut a = ObstacleSpawner::new(99, 1000.0, -150.0, Placement::Lanes);
        let mut b = ObstacleSpawner::new(99, 1000.0, -150.0, Placement::Lanes);
        for _ in 0..50 {
            assert_eq!(a.roll(&track), b.roll(&track));
        }
    }

    #[test]
    fn test_single_lane_always_centre() {
        let track = LaneTrack::new(5.0, 1, 1.0);
        let mut spawner = ObstacleSpawner::new(3, 1000.0, -150.0, Placement::Lanes);
        for _ in 0..20 {
            assert_eq!(spawner.roll(&track).pos.x, 0.0);
        }
    }
}
