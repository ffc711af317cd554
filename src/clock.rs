//! Tick sources: how many simulation ticks a display frame is worth
//!
//! The host calls `ticks_for_frame` once per animation frame with the frame
//! timestamp. Tests skip this entirely and call `Game::advance`.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_HZ};
use crate::settings::Timestep;

/// Tolerance when comparing accumulated time against the step
const EPSILON: f64 = 1e-9;

/// Decides how many ticks to run for a frame
pub trait TickSource {
    /// Ticks to simulate for a frame displayed at `now_ms`
    fn ticks_for_frame(&mut self, now_ms: f64) -> u32;
    /// Forget frame history (after a pause or restart)
    fn reset(&mut self);
}

/// Fixed-rate accumulator: frame-rate independent
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
    last_ms: Option<f64>,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(1.0 / SIM_HZ as f64, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f64, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
            last_ms: None,
        }
    }
}

impl TickSource for FixedStep {
    fn ticks_for_frame(&mut self, now_ms: f64) -> u32 {
        // First frame after a reset counts as exactly one step
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT as f64),
            None => self.step,
        };
        self.last_ms = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator + EPSILON >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_ms = None;
    }
}

/// One tick per displayed frame, whatever the refresh rate
#[derive(Debug, Clone, Default)]
pub struct PerFrame;

impl TickSource for PerFrame {
    fn ticks_for_frame(&mut self, _now_ms: f64) -> u32 {
        1
    }

    fn reset(&mut self) {}
}

/// Build the tick source selected in settings
pub fn for_timestep(timestep: Timestep) -> Box<dyn TickSource> {
    match timestep {
        Timestep::Fixed => Box::new(FixedStep::default()),
        Timestep::PerFrame => Box::new(PerFrame),
    }
}
