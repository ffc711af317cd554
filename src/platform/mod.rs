//! Platform abstraction layer
//!
//! Everything the game needs from its host, behind small capabilities:
//! - Notifications to the embedding page (`notify`, `telegram`)
//! - Sound effects (`audio`)
//! - Animation-frame scheduling and DOM glue (`web`, wasm only)
//! - Run seeds

pub mod audio;
pub mod notify;
pub mod telegram;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{SoundEffect, Tone};
pub use notify::{GameNotifier, NoopNotifier};
pub use telegram::{TelegramMessage, TelegramNotifier, Theme, WebAppSink};

/// Seed for a new run
#[cfg(target_arch = "wasm32")]
pub fn entropy_seed() -> u64 {
    // Date.now() mixed with Math.random() so two runs started in the same
    // millisecond still differ
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 32)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Wall-clock milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
