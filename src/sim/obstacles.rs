//! Obstacle spawning, scrolling and pruning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::FIELD_WIDTH;
use crate::tuning::{ObstacleTemplate, Tuning};

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Glowing road barrier
    #[default]
    NeonBarrier,
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully past the left edge of the field
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Live obstacles in spawn order
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
    /// Obstacles that scrolled off the left edge this run
    pub cleared: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
            cleared: 0,
        }
    }
}

impl ObstacleField {
    /// Place an obstacle built from `template` with its left edge at `x`
    pub fn spawn(&mut self, template: &ObstacleTemplate, x: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            kind: template.kind,
            pos: Vec2::new(x, template.top()),
            size: Vec2::new(template.width, template.height),
        });
        id
    }

    /// Roll for a spawn at the right edge. Returns the new obstacle's id.
    /// Chances outside [0, 1] are clamped; NaN never spawns.
    pub fn try_spawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) -> Option<u32> {
        let chance = if tuning.spawn_chance.is_nan() {
            0.0
        } else {
            tuning.spawn_chance.clamp(0.0, 1.0)
        };
        if tuning.obstacle_types.is_empty() || !rng.random_bool(chance) {
            return None;
        }
        let index = rng.random_range(0..tuning.obstacle_types.len());
        let template = tuning.obstacle_types[index];
        Some(self.spawn(&template, FIELD_WIDTH))
    }

    /// Scroll everything left by `speed` and drop what left the field.
    /// Returns how many were dropped.
    pub fn advance(&mut self, speed: f32) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= speed;
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        let removed = before - self.obstacles.len();
        self.cleared += removed as u32;
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
