//! Live obstacles and the per-tick advance step

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::frames;

/// Opaque obstacle handle, unique within one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// Obstacle shape (cosmetic apart from its bounding size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Cube,
    Cylinder,
    Cone,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Cube, ObstacleKind::Cylinder, ObstacleKind::Cone];

    /// Half-extents of the shape's bounding box
    pub fn half_extents(&self) -> Vec3 {
        match self {
            // 1.5 cube, or radius 0.75 by height 1.5 for the round shapes
            ObstacleKind::Cube | ObstacleKind::Cylinder | ObstacleKind::Cone => Vec3::splat(0.75),
        }
    }
}

/// Everything needed to place a new obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub pos: Vec3,
    pub kind: ObstacleKind,
    pub color: u32,
}

/// An obstacle on the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub pos: Vec3,
    pub kind: ObstacleKind,
    pub color: u32,
    /// Set once the obstacle has crossed the car's plane
    pub passed: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.kind.half_extents())
    }
}

/// Obstacles that changed state during one advance step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sweep {
    pub passed_now: Vec<ObstacleId>,
    pub removed: Vec<ObstacleId>,
}

/// Registry of live obstacles, kept in spawn (id) order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Approach speed at multiplier 1.0, per reference frame
    pub base_speed: f32,
    /// Distance past the car plane that counts as dodged
    pub pass_margin: f32,
    /// Distance past the car plane at which obstacles are dropped
    pub removal_distance: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(base_speed: f32, pass_margin: f32, removal_distance: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            base_speed,
            pass_margin,
            removal_distance,
            next_id: 1,
        }
    }

    /// Add an obstacle and hand back its id
    pub fn insert(&mut self, spec: ObstacleSpec) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            pos: spec.pos,
            kind: spec.kind,
            color: spec.color,
            passed: false,
        });
        id
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Clear `passed` on obstacles whose dodge was not scored
    pub fn revert_passed(&mut self, ids: &[ObstacleId]) {
        for obstacle in self.obstacles.iter_mut().filter(|o| ids.contains(&o.id)) {
            obstacle.passed = false;
        }
    }

    /// Move every obstacle toward (and past) the car plane at `car_z`.
    ///
    /// An obstacle is reported in `passed_now` on the tick it first gets more
    /// than `pass_margin` beyond the plane, and in `removed` once it is more
    /// than `removal_distance` beyond it. Both can happen on the same tick.
    pub fn tick(&mut self, dt: f32, speed_multiplier: f32, car_z: f32) -> Sweep {
        let step = self.base_speed * speed_multiplier * frames(dt);
        let pass_z = car_z + self.pass_margin;
        let removal_z = car_z + self.removal_distance;
        let mut sweep = Sweep::default();

        for obstacle in &mut self.obstacles {
            obstacle.pos.z += step;

            if !obstacle.passed && obstacle.pos.z > pass_z {
                obstacle.passed = true;
                sweep.passed_now.push(obstacle.id);
            }
            if obstacle.pos.z > removal_z {
                sweep.removed.push(obstacle.id);
            }
        }

        if !sweep.removed.is_empty() {
            self.obstacles.retain(|o| o.pos.z <= removal_z);
        }

        sweep
    }
}
