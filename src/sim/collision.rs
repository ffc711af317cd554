//! Axis-aligned bounding box collision between the player and obstacles

use glam::Vec2;

use super::obstacles::Obstacle;
use super::player::Player;
use super::state::{GameEvent, GameState};
use crate::tuning::{Insets, Tuning};

/// Axis-aligned rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink each side by the given margin
    pub fn inset(&self, insets: &Insets) -> Self {
        Self {
            min: self.min + Vec2::new(insets.left, insets.top),
            max: self.max - Vec2::new(insets.right, insets.bottom),
        }
    }

    /// Strict overlap on both axes; touching edges do not collide
    pub fn intersects(&self, other: &Rect) -> bool {
        let horizontal = self.min.x < other.max.x && self.max.x > other.min.x;
        let vertical = self.min.y < other.max.y && self.max.y > other.min.y;
        horizontal && vertical
    }
}

/// The forgiving hitbox: sprite bounds shrunk by the tuning insets
pub fn player_hitbox(player: &Player, insets: &Insets) -> Rect {
    Rect::new(player.pos, player.size).inset(insets)
}

pub fn obstacle_hitbox(obstacle: &Obstacle) -> Rect {
    Rect::new(obstacle.pos, obstacle.size)
}

/// First obstacle (in spawn order) overlapping the hitbox
pub fn first_hit(hitbox: &Rect, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| hitbox.intersects(&obstacle_hitbox(o)))
        .map(|o| o.id)
}

/// Scan for a hit and start the crash sequence on the first one.
/// Does nothing while a crash is already playing.
pub fn check_collisions(state: &mut GameState, tuning: &Tuning) -> Option<u32> {
    if state.crash.active {
        return None;
    }

    let hitbox = player_hitbox(&state.player, &tuning.hitbox_insets);
    let obstacle_id = first_hit(&hitbox, state.obstacles.as_slice())?;

    state.crash.start(state.player.center(), &mut state.rng);
    state.events.push(GameEvent::Crashed { obstacle_id });
    log::debug!(
        "Crash into obstacle {} at score {}",
        obstacle_id,
        state.score
    );
    Some(obstacle_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_detected() {
        assert!(rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_single_axis_overlap_is_a_miss() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&rect(5.0, 20.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(20.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_player_hitbox_is_inset() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let hitbox = player_hitbox(&player, &tuning.hitbox_insets);
        assert_eq!(hitbox.min, player.pos + Vec2::new(10.0, 5.0));
        assert_eq!(hitbox.max, player.pos + Vec2::new(50.0, 35.0));
    }

    #[test]
    fn test_near_miss_inside_sprite_margin_is_forgiven() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Running;
        // Overlaps the sprite's last 5 px but not the hitbox
        let x = state.player.pos.x + 55.0;
        state.obstacles.spawn(&tuning.obstacle_types[0], x);

        assert_eq!(check_collisions(&mut state, &tuning), None);
        assert!(!state.crash.active);
    }

    #[test]
    fn test_hit_starts_crash_once() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Running;
        let first = state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x);
        state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x + 5.0);

        assert_eq!(check_collisions(&mut state, &tuning), Some(first));
        assert!(state.crash.active);
        assert_eq!(state.crash.pieces.len(), 7);

        // Mid-animation scans are ignored
        assert_eq!(check_collisions(&mut state, &tuning), None);
        let crashes = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .count();
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_airborne_player_clears_barrier() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Running;
        state.player.pos.y -= 120.0;
        state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x + 10.0);
        assert_eq!(check_collisions(&mut state, &tuning), None);
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, aw in 0.0f32..80.0, ah in 0.0f32..80.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, bw in 0.0f32..80.0, bh in 0.0f32..80.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
