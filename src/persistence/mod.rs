//! Best-score persistence
//!
//! The game only needs one number to survive reloads. It reaches storage
//! through the `BestScoreStore` capability:
//! - `MemoryStore` for tests and the native build
//! - `LocalStorageStore` on the web (key `dogSkateHighScore`)
//!
//! Storage failures never reach the game: a missing or corrupt value loads as 0.

use std::cell::Cell;
use std::rc::Rc;

/// LocalStorage key shared with earlier builds of the game
pub const BEST_SCORE_KEY: &str = "dogSkateHighScore";

/// Where the best score lives between sessions
pub trait BestScoreStore {
    /// Stored best, 0 when nothing usable is stored
    fn load(&self) -> u64;
    fn save(&mut self, best: u64);
}

/// In-memory store. Clones share the same slot so tests can inspect
/// what the game saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<Cell<u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        Self {
            slot: Rc::new(Cell::new(best)),
        }
    }

    pub fn get(&self) -> u64 {
        self.slot.get()
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.slot.get()
    }

    fn save(&mut self, best: u64) {
        self.slot.set(best);
    }
}

/// Parse a stored best score. Older builds stored the number as a string
/// and sometimes as a float.
pub fn parse_best_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Some(f as u64),
        _ => None,
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score starts at 0");
            return 0;
        };

        match storage.get_item(BEST_SCORE_KEY) {
            Ok(Some(raw)) => match parse_best_score(&raw) {
                Some(best) => {
                    log::info!("Loaded best score {}", best);
                    best
                }
                None => {
                    log::warn!("Ignoring corrupt best score {:?}", raw);
                    0
                }
            },
            _ => 0,
        }
    }

    fn save(&mut self, best: u64) {
        let saved = Self::storage()
            .map(|s| s.set_item(BEST_SCORE_KEY, &best.to_string()).is_ok())
            .unwrap_or(false);
        if saved {
            log::info!("Best score saved: {}", best);
        } else {
            log::warn!("Failed to save best score");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_slot() {
        let observer = MemoryStore::with_best(300);
        let mut store: Box<dyn BestScoreStore> = Box::new(observer.clone());
        assert_eq!(store.load(), 300);

        store.save(500);
        assert_eq!(observer.get(), 500);
    }

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_best_score("1234"), Some(1234));
        assert_eq!(parse_best_score(" 42\n"), Some(42));
    }

    #[test]
    fn test_parse_float_truncates() {
        assert_eq!(parse_best_score("99.7"), Some(99));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_best_score(""), None);
        assert_eq!(parse_best_score("lots"), None);
        assert_eq!(parse_best_score("-5"), None);
        assert_eq!(parse_best_score("NaN"), None);
    }
}
