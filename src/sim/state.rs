//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; only `best_score` survives
//! `reset_run`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::crash::CrashSequence;
use super::obstacles::ObstacleField;
use super::particles::ParticleSystem;
use super::player::Player;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not started, or returned here by a restart
    Idle,
    /// Active gameplay (includes the crash animation)
    Running,
    /// Ticks suspended
    Paused,
    /// Run ended after a completed crash sequence
    Over,
}

/// Things that happened during a tick, drained by the host for sound and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Landed,
    ObstacleSpawned { id: u32 },
    /// Player hit an obstacle; the crash sequence started
    Crashed { obstacle_id: u32 },
    /// Crash sequence ran its full duration
    CrashFinished,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score across runs
    pub best_score: u64,
    /// Scroll speed in px/tick, grows every non-crashing tick
    pub speed: f32,
    /// Lane-marking scroll offset
    pub background_offset: f32,
    /// Ticks simulated this run
    pub ticks: u64,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub particles: ParticleSystem,
    pub crash: CrashSequence,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh idle board
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            best_score: 0,
            speed: tuning.initial_speed,
            background_offset: 0.0,
            ticks: 0,
            player: Player::new(tuning),
            obstacles: ObstacleField::default(),
            particles: ParticleSystem::default(),
            crash: CrashSequence::new(tuning.crash_duration_ticks),
            events: Vec::new(),
        }
    }

    /// Reset everything except the best score and the particle cap
    pub fn reset_run(&mut self, seed: u64, tuning: &Tuning) {
        let best_score = self.best_score;
        let particle_cap = self.particles.cap;
        *self = Self::new(seed, tuning);
        self.best_score = best_score;
        self.particles.cap = particle_cap;
    }

    /// Running with the crash animation in progress
    pub fn is_crashing(&self) -> bool {
        self.phase == GamePhase::Running && self.crash.active
    }

    /// Try to start a jump. Ignored outside Running and while crashing.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.phase != GamePhase::Running || self.crash.active {
            return false;
        }
        if !self.player.jump(tuning.jump_impulse) {
            return false;
        }

        self.particles.emit(
            &mut self.rng,
            self.player.feet(),
            &super::particles::JUMP_DUST,
            tuning.jump_burst,
            tuning.jump_particle_life,
        );
        self.events.push(GameEvent::Jumped);
        true
    }
}
