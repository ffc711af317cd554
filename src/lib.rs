//! Dog Skate - a neon endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, crash sequence)
//! - `game`: Lifecycle state machine wrapping the simulation
//! - `clock`: Tick sources that turn display frames into simulation ticks
//! - `renderer`: Draw pass and WebGPU pipeline
//! - `platform`: Host notifications, Telegram bridge, audio, frame loop
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game balance

pub mod clock;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, RunSummary};
pub use settings::{Settings, Timestep};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate; all per-tick constants in `Tuning` assume this rate
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical play field size
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = FIELD_HEIGHT - 60.0;

    /// Game identifier used in host-platform messages
    pub const GAME_ID: &str = "dog_skate";
}
