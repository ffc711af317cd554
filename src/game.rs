//! The game context
//!
//! `Game` owns the simulation state together with everything the state
//! machine talks to: the tick source, the best-score store and the notifier.
//! Hosts hold one `Game` and call the lifecycle controls, `jump` and `frame`.
//!
//! Phases: Idle -> Running <-> Paused, Running -> Over once the crash
//! sequence completes, and any phase -> Idle on restart.

use crate::clock::{self, TickSource};
use crate::persistence::BestScoreStore;
use crate::platform::{self, GameNotifier, NoopNotifier};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Undrained events kept for the host; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// What the host learns about a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    /// Best score after this run
    pub best_score: u64,
    /// This run set the best score
    pub new_record: bool,
    pub ticks: u64,
    pub obstacles_cleared: u32,
    pub seed: u64,
}

pub struct Game {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    clock: Box<dyn TickSource>,
    notifier: Box<dyn GameNotifier>,
    store: Box<dyn BestScoreStore>,
    seed_source: Box<dyn FnMut() -> u64>,
    last_summary: Option<RunSummary>,
    /// Simulation events not yet taken by the host
    events: Vec<GameEvent>,
}

impl Game {
    /// Idle board with the stored best score loaded
    pub fn new(tuning: Tuning, settings: Settings, store: Box<dyn BestScoreStore>) -> Self {
        let mut state = GameState::new(platform::entropy_seed(), &tuning);
        state.best_score = store.load();
        state.particles.cap = settings.particle_cap();

        Self {
            state,
            clock: clock::for_timestep(settings.timestep),
            tuning,
            settings,
            notifier: Box::new(NoopNotifier),
            store,
            seed_source: Box::new(platform::entropy_seed),
            last_summary: None,
            events: Vec::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn GameNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Seeds for future runs come from `source`
    pub fn with_seed_source(mut self, source: impl FnMut() -> u64 + 'static) -> Self {
        self.seed_source = Box::new(source);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.state.best_score
    }

    /// Summary of the most recent finished run
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    /// Apply new preferences. Takes effect immediately.
    pub fn set_settings(&mut self, settings: Settings) {
        if settings.timestep != self.settings.timestep {
            self.clock = clock::for_timestep(settings.timestep);
        }
        self.state.particles.cap = settings.particle_cap();
        self.settings = settings;
    }

    /// Begin a run. Only accepted from Idle.
    pub fn start_game(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }

        let seed = (self.seed_source)();
        self.state.reset_run(seed, &self.tuning);
        self.state.phase = GamePhase::Running;
        self.clock.reset();
        self.events.clear();
        self.last_summary = None;

        log::info!("Run started (seed {})", seed);
        self.notifier.on_game_start();
        self.notifier.on_score_update(0, self.state.best_score);
        true
    }

    /// Running <-> Paused; ignored in other phases. Returns the new phase.
    pub fn toggle_pause(&mut self) -> GamePhase {
        match self.state.phase {
            GamePhase::Running => {
                self.state.phase = GamePhase::Paused;
                log::info!("Paused at score {}", self.state.score);
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Running;
                // The paused interval must not be replayed
                self.clock.reset();
                log::info!("Resumed");
            }
            GamePhase::Idle | GamePhase::Over => {}
        }
        self.state.phase
    }

    /// Back to a fresh Idle board from any phase; the best score survives
    pub fn restart_game(&mut self) {
        let seed = (self.seed_source)();
        self.state.reset_run(seed, &self.tuning);
        self.clock.reset();
        self.events.clear();
        log::info!("Board reset");
        self.notifier.on_score_update(0, self.state.best_score);
    }

    /// Player input. Ignored unless running and not crashing.
    pub fn jump(&mut self) -> bool {
        let jumped = self.state.jump(&self.tuning);
        if jumped {
            self.queue_events();
        }
        jumped
    }

    /// Finish the run. Only valid once the crash sequence has completed;
    /// any other call is ignored and returns false.
    pub fn game_over(&mut self) -> bool {
        if self.state.phase != GamePhase::Running || !self.state.crash.is_complete() {
            return false;
        }
        self.state.phase = GamePhase::Over;

        let new_record = self.state.score > self.state.best_score;
        if new_record {
            self.state.best_score = self.state.score;
            self.store.save(self.state.best_score);
        }

        let summary = RunSummary {
            score: self.state.score,
            best_score: self.state.best_score,
            new_record,
            ticks: self.state.ticks,
            obstacles_cleared: self.state.obstacles.cleared,
            seed: self.state.seed,
        };
        log::info!(
            "Game over: score {} (best {}{})",
            summary.score,
            summary.best_score,
            if new_record { ", new record" } else { "" }
        );

        self.notifier.on_score_update(summary.score, summary.best_score);
        self.notifier.on_game_over(&summary);
        self.last_summary = Some(summary);
        true
    }

    /// Advance one simulation tick
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }

        sim::tick(&mut self.state, &self.tuning);

        let finished = self.state.events.contains(&GameEvent::CrashFinished);
        self.queue_events();

        if finished {
            self.game_over();
        } else {
            self.notifier
                .on_score_update(self.state.score, self.state.best_score);
        }
    }

    /// Run up to `n` ticks, stopping early if the run ends
    pub fn advance(&mut self, n: u32) {
        for _ in 0..n {
            if self.state.phase != GamePhase::Running {
                break;
            }
            self.tick();
        }
    }

    /// Animation-frame entry point. Returns whether another frame is wanted.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.state.phase == GamePhase::Running {
            let ticks = self.clock.ticks_for_frame(now_ms);
            self.advance(ticks);
        }
        self.wants_frames()
    }

    /// Only a running game needs animation frames
    pub fn wants_frames(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    fn queue_events(&mut self) {
        self.events.append(&mut self.state.events);
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
    }

    /// Take the events produced since the last call (at most
    /// `MAX_PENDING_EVENTS`, newest kept)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ask the host platform to share the last result. False if no run
    /// has finished yet.
    pub fn share_result(&mut self) -> bool {
        match self.last_summary {
            Some(summary) if self.state.phase == GamePhase::Over => {
                self.notifier.on_share_requested(&summary);
                true
            }
            _ => false,
        }
    }

    pub fn show_leaderboard(&mut self) {
        self.notifier.on_leaderboard_requested();
    }
}
