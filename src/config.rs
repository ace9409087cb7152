//! Game tuning
//!
//! Every number the simulation runs on lives here so hosts can load a
//! variant from JSON. Validated once by [`GameConfig::validate`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where new obstacles are placed laterally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Placement {
    /// Centre of a uniformly chosen lane
    #[default]
    Lanes,
    /// Uniformly anywhere across the drivable width
    Continuous,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Lanes => "Lanes",
            Placement::Continuous => "Continuous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lanes" | "lane" => Some(Placement::Lanes),
            "continuous" | "free" => Some(Placement::Continuous),
            _ => None,
        }
    }
}

/// Game configuration
///
/// Speeds are in world units per reference frame (see [`crate::frames`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Road ===
    /// Full road width
    pub road_width: f32,
    /// Number of equal-width lanes
    pub lane_count: u32,
    /// Gap kept between the car's centre and the road edge
    pub car_margin: f32,

    // === Speeds ===
    /// Lateral car speed at multiplier 1.0
    pub base_car_speed: f32,
    /// Obstacle approach speed at multiplier 1.0
    pub base_obstacle_speed: f32,

    // === Spawning ===
    /// Milliseconds between spawns at multiplier 1.0
    pub spawn_interval_ms: f64,
    /// Longitudinal position new obstacles appear at
    pub spawn_z: f32,
    pub placement: Placement,
    /// RNG seed; `None` draws one from OS entropy
    pub seed: Option<u64>,

    // === Car plane ===
    /// Longitudinal reference plane of the car
    pub car_z: f32,
    /// Distance past the car plane at which an obstacle counts as dodged
    pub pass_margin: f32,
    /// Distance past the car plane at which an obstacle is dropped
    pub removal_distance: f32,

    // === Difficulty and scoring ===
    /// Dodges between speed increases
    pub speed_increase_threshold: u32,
    /// Added to the speed multiplier at each threshold
    pub speed_increase_amount: f32,
    pub score_per_dodge: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            road_width: 10.0,
            lane_count: 3,
            car_margin: 1.0,

            base_car_speed: 0.15,
            base_obstacle_speed: 0.5,

            spawn_interval_ms: 1500.0,
            spawn_z: -150.0,
            placement: Placement::Lanes,
            seed: None,

            car_z: 5.0,
            pass_margin: 1.0,
            removal_distance: 20.0,

            speed_increase_threshold: 5,
            speed_increase_amount: 0.1,
            score_per_dodge: 10,
        }
    }
}

impl GameConfig {
    /// Single-script variant: free placement, narrower margin, faster spawns
    pub fn classic() -> Self {
        Self {
            car_margin: 0.5,
            base_car_speed: 0.1,
            spawn_interval_ms: 1000.0,
            placement: Placement::Continuous,
            removal_distance: 10.0,
            ..Self::default()
        }
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.road_width / 2.0
    }

    /// Largest |x| the car centre may reach
    #[inline]
    pub fn lateral_limit(&self) -> f32 {
        self.half_width() - self.car_margin
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.road_width.is_finite() && self.road_width > 0.0) {
            return Err(ConfigError::invalid(
                "road_width",
                format!("must be positive, got {}", self.road_width),
            ));
        }
        if self.lane_count < 1 {
            return Err(ConfigError::invalid("lane_count", "must be at least 1"));
        }
        if !(self.car_margin.is_finite() && self.car_margin >= 0.0) || self.lateral_limit() < 0.0 {
            return Err(ConfigError::invalid(
                "car_margin",
                format!(
                    "must be in [0, {}], got {}",
                    self.half_width(),
                    self.car_margin
                ),
            ));
        }
        for (field, speed) in [
            ("base_car_speed", self.base_car_speed),
            ("base_obstacle_speed", self.base_obstacle_speed),
        ] {
            if !(speed.is_finite() && speed >= 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be non-negative, got {speed}"),
                ));
            }
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::invalid(
                "spawn_interval_ms",
                format!("must be positive, got {}", self.spawn_interval_ms),
            ));
        }
        if !(self.spawn_z.is_finite() && self.car_z.is_finite() && self.spawn_z < self.car_z) {
            return Err(ConfigError::invalid(
                "spawn_z",
                format!("must lie before car_z {}, got {}", self.car_z, self.spawn_z),
            ));
        }
        if !(self.pass_margin.is_finite() && self.pass_margin >= 0.0) {
            return Err(ConfigError::invalid(
                "pass_margin",
                format!("must be non-negative, got {}", self.pass_margin),
            ));
        }
        if !(self.removal_distance.is_finite() && self.removal_distance > self.pass_margin) {
            return Err(ConfigError::invalid(
                "removal_distance",
                format!(
                    "must exceed pass_margin {}, got {}",
                    self.pass_margin, self.removal_distance
                ),
            ));
        }
        if self.speed_increase_threshold == 0 {
            return Err(ConfigError::invalid(
                "speed_increase_threshold",
                "must be at least 1",
            ));
        }
        if !(self.speed_increase_amount.is_finite() && self.speed_increase_amount >= 0.0) {
            return Err(ConfigError::invalid(
                "speed_increase_amount",
                format!("must be non-negative, got {}", self.speed_increase_amount),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::classic().validate().is_ok());
        assert_eq!(GameConfig::default().lateral_limit(), 4.0);
        assert_eq!(GameConfig::classic().lateral_limit(), 4.5);
    }

    #[test]
    fn test_rejects_non_positive_road_width() {
        for width in [0.0, -10.0, f32::NAN] {
            let config = GameConfig {
                road_width: width,
                ..Default::default()
            };
            assert_eq!(config.validate().unwrap_err().field(), Some("road_width"));
        }
    }

    #[test]
    fn test_rejects_zero_lanes() {
        let config = GameConfig {
            lane_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), Some("lane_count"));
    }

    #[test]
    fn test_rejects_margin_wider_than_road() {
        let config = GameConfig {
            car_margin: 6.0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), Some("car_margin"));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let config = GameConfig {
            speed_increase_threshold: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().field(),
            Some("speed_increase_threshold")
        );
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{"lane_count": 4, "seed": 7}"#).unwrap();
        assert_eq!(config.lane_count, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.road_width, 10.0);
        assert_eq!(config.placement, Placement::Lanes);
    }

    #[test]
    fn test_from_json_validates() {
        let err = GameConfig::from_json(r#"{"road_width": -1.0}"#).unwrap_err();
        assert_eq!(err.field(), Some("road_width"));

        let err = GameConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_placement() {
        let json = GameConfig::classic().with_seed(3).to_json().unwrap();
        let back = GameConfig::from_json(&json).unwrap();
        assert_eq!(back, GameConfig::classic().with_seed(3));
    }

    #[test]
    fn test_placement_from_str() {
        assert_eq!(Placement::from_str("LANES"), Some(Placement::Lanes));
        assert_eq!(Placement::from_str("free"), Some(Placement::Continuous));
        assert_eq!(Placement::from_str("diagonal"), None);
        assert_eq!(Placement::Continuous.as_str(), "Continuous");
    }
}
