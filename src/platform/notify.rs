//! Notifications from the game to whoever embeds it

use crate::game::RunSummary;

/// Receives lifecycle and score notifications. Every method has a no-op
/// default so hosts implement only what they care about. Implementations
/// must return quickly: they run inside the frame callback.
pub trait GameNotifier {
    /// A run started
    fn on_game_start(&mut self) {}

    /// Score changed. Called every running tick and once more at game over.
    fn on_score_update(&mut self, _score: u64, _best: u64) {}

    /// The crash sequence finished; called exactly once per run
    fn on_game_over(&mut self, _summary: &RunSummary) {}

    /// The player asked to share their last result
    fn on_share_requested(&mut self, _summary: &RunSummary) {}

    /// The player asked for the leaderboard
    fn on_leaderboard_requested(&mut self) {}
}

/// Ignores everything (plain web page, native build)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl GameNotifier for NoopNotifier {}
