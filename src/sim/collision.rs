//! Collision detection between the car and obstacles
//!
//! Everything on the road is treated as an axis-aligned box. Touching
//! faces count as a hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleId};
use super::state::Car;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Intervals overlap on all three axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// First obstacle overlapping the car, if any
pub fn check_collision<'a, I>(car: &Car, obstacles: I) -> Option<ObstacleId>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    let car_box = car.bounds();
    obstacles
        .into_iter()
        .find(|obstacle| car_box.intersects(&obstacle.bounds()))
        .map(|obstacle| obstacle.id)
}
