//! Data-driven game balance
//!
//! Every gameplay number lives here. Values are per simulation tick at
//! `consts::SIM_HZ`; the defaults are tuned for a 60 Hz display.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GROUND_Y;
use crate::sim::ObstacleKind;

/// Inward margins applied to a sprite rectangle to build its hitbox
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Shape of an obstacle type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    /// Distance from the ground line up to the obstacle's top edge
    pub elevation: f32,
}

impl ObstacleTemplate {
    /// Top edge in field coordinates
    pub fn top(&self) -> f32 {
        GROUND_Y - self.elevation
    }
}

/// Gameplay constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_x: f32,
    pub player_size: Vec2,
    pub hitbox_insets: Insets,
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    pub landing_cooldown_ticks: u32,
    /// Per-tick decay of tilt and squash while grounded
    pub pose_decay: f32,

    // === Scrolling & scoring ===
    pub initial_speed: f32,
    pub speed_increase: f32,
    pub background_scroll_factor: f32,

    // === Obstacles ===
    /// Probability of a spawn on each eligible tick
    pub spawn_chance: f64,
    pub obstacle_types: Vec<ObstacleTemplate>,

    // === Particles ===
    pub particle_gravity: f32,
    pub jump_burst: u32,
    pub jump_particle_life: u32,
    pub landing_burst: u32,
    pub landing_particle_life: u32,

    // === Crash ===
    pub crash_duration_ticks: u32,
    pub crash_gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: 100.0,
            player_size: Vec2::new(60.0, 40.0),
            hitbox_insets: Insets {
                left: 10.0,
                top: 5.0,
                right: 10.0,
                bottom: 5.0,
            },
            gravity: 0.7,
            jump_impulse: -16.0,
            landing_cooldown_ticks: 10,
            pose_decay: 0.9,

            initial_speed: 5.0,
            speed_increase: 0.001,
            background_scroll_factor: 0.5,

            spawn_chance: 0.002,
            obstacle_types: vec![ObstacleTemplate {
                kind: ObstacleKind::NeonBarrier,
                width: 25.0,
                height: 50.0,
                elevation: 50.0,
            }],

            particle_gravity: 0.2,
            jump_burst: 8,
            jump_particle_life: 30,
            landing_burst: 12,
            landing_particle_life: 40,

            crash_duration_ticks: 60,
            crash_gravity: 0.3,
        }
    }
}

impl Tuning {
    /// Resting y of the player's top edge
    pub fn player_rest_y(&self) -> f32 {
        GROUND_Y - self.player_size.y
    }

    /// Parse tuning overrides; missing fields keep their defaults.
    /// Rejects a `spawn_chance` outside [0, 1].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        if !(0.0..=1.0).contains(&tuning.spawn_chance) {
            return Err(serde::de::Error::custom(format!(
                "spawn_chance must be within [0, 1], got {}",
                tuning.spawn_chance
            )));
        }
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_player_rests_on_ground() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_rest_y() + tuning.player_size.y, GROUND_Y);
    }

    #[test]
    fn test_barrier_stands_on_ground() {
        let tuning = Tuning::default();
        let barrier = tuning.obstacle_types[0];
        assert_eq!(barrier.top() + barrier.height, GROUND_Y);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1.0, "crash_duration_ticks": 30 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.0);
        assert_eq!(tuning.crash_duration_ticks, 30);
        assert_eq!(tuning.jump_impulse, -16.0);
        assert_eq!(tuning.obstacle_types.len(), 1);
    }

    #[test]
    fn test_spawn_chance_out_of_range_is_rejected() {
        assert!(Tuning::from_json(r#"{ "spawn_chance": 1.5 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "spawn_chance": -0.1 }"#).is_err());
        let tuning = Tuning::from_json(r#"{ "spawn_chance": 1.0 }"#).unwrap();
        assert_eq!(tuning.spawn_chance, 1.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }
}
