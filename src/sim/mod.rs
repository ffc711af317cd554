//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick integration only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod crash;
pub mod obstacles;
pub mod particles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collisions, obstacle_hitbox, player_hitbox};
pub use crash::{CrashPiece, CrashSequence, PieceKind, PieceTint};
pub use obstacles::{Obstacle, ObstacleField, ObstacleKind};
pub use particles::{Particle, ParticleSystem};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
