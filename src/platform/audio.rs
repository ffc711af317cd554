//! Sound effects using the Web Audio API
//!
//! Each effect is a single oscillator sweep, generated on the fly.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    Land,
    Crash,
}

/// Exponential frequency and gain sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f64,
    /// Gain at the start, before master volume
    pub peak_gain: f32,
}

impl SoundEffect {
    /// The sound a simulation event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Landed => Some(SoundEffect::Land),
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::ObstacleSpawned { .. } | GameEvent::CrashFinished => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::Jump => Tone {
                start_hz: 800.0,
                end_hz: 400.0,
                duration: 0.1,
                peak_gain: 0.3,
            },
            SoundEffect::Land => Tone {
                start_hz: 200.0,
                end_hz: 100.0,
                duration: 0.2,
                peak_gain: 0.2,
            },
            SoundEffect::Crash => Tone {
                start_hz: 150.0,
                end_hz: 50.0,
                duration: 0.5,
                peak_gain: 0.4,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone};

    /// Plays effects through a shared `AudioContext`
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// 0 mutes
        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            self.play_tone(ctx, &effect.tone());
        }

        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.start_hz) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + tone.duration;

            gain.gain().set_value_at_time(tone.peak_gain * self.volume, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            osc.frequency().set_value_at_time(tone.start_hz, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.end_hz, end)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(end).ok();
        }
    }
}
