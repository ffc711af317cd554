//! Simulation tick
//!
//! Advances a running game by exactly one step in a fixed order: player,
//! particles, crash debris, then (unless crashing) obstacles, collisions,
//! speed and score. The background scroll moves every tick.

use super::collision::check_collisions;
use super::particles::LANDING_DUST;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Advance the game state by one tick. No-op unless Running.
pub fn tick(state: &mut GameState, tuning: &Tuning) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.ticks += 1;

    if state.player.update(tuning) {
        state.particles.emit(
            &mut state.rng,
            state.player.feet(),
            &LANDING_DUST,
            tuning.landing_burst,
            tuning.landing_particle_life,
        );
        state.events.push(GameEvent::Landed);
    }

    state.particles.update(tuning.particle_gravity);

    // On completion the owner performs the game-over transition
    let finished = state.crash.update(tuning.crash_gravity);

    if !finished && !state.crash.active {
        if let Some(id) = state.obstacles.try_spawn(&mut state.rng, tuning) {
            state.events.push(GameEvent::ObstacleSpawned { id });
        }
        state.obstacles.advance(state.speed);
        check_collisions(state, tuning);

        state.speed += tuning.speed_increase;
        state.score += 1;
    }

    state.background_offset += state.speed * tuning.background_scroll_factor;

    if finished {
        state.events.push(GameEvent::CrashFinished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning);
        state.phase = GamePhase::Running;
        state
    }

    fn quiet() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let tuning = quiet();
        for phase in [GamePhase::Idle, GamePhase::Paused, GamePhase::Over] {
            let mut state = GameState::new(1, &tuning);
            state.phase = phase;
            tick(&mut state, &tuning);
            assert_eq!(state.score, 0);
            assert_eq!(state.ticks, 0);
            assert_eq!(state.background_offset, 0.0);
        }
    }

    #[test]
    fn test_score_counts_ticks() {
        let tuning = quiet();
        let mut state = running(&tuning);
        for _ in 0..250 {
            tick(&mut state, &tuning);
        }
        assert_eq!(state.score, 250);
        assert!((state.speed - (tuning.initial_speed + 250.0 * tuning.speed_increase)).abs() < 1e-3);
    }

    #[test]
    fn test_speed_never_decreases() {
        let tuning = quiet();
        let mut state = running(&tuning);
        let mut last = state.speed;
        for _ in 0..100 {
            tick(&mut state, &tuning);
            assert!(state.speed >= last);
            last = state.speed;
        }
    }

    #[test]
    fn test_background_scrolls_during_crash() {
        let tuning = quiet();
        let mut state = running(&tuning);
        state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x + 20.0);
        tick(&mut state, &tuning);
        assert!(state.crash.active);

        let score = state.score;
        let speed = state.speed;
        let offset = state.background_offset;
        tick(&mut state, &tuning);

        assert_eq!(state.score, score);
        assert_eq!(state.speed, speed);
        assert!(state.background_offset > offset);
    }

    #[test]
    fn test_overlapping_obstacle_crashes_within_one_tick() {
        let tuning = quiet();
        let mut state = running(&tuning);
        // Obstacle will sit right under the player after this tick's scroll
        let x = state.player.pos.x + state.speed;
        state.obstacles.spawn(&tuning.obstacle_types[0], x);

        tick(&mut state, &tuning);

        assert!(state.crash.active);
        assert_eq!(state.crash.pieces.len(), 7);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::Crashed { .. })));
    }

    #[test]
    fn test_crash_finishes_after_duration() {
        let tuning = quiet();
        let mut state = running(&tuning);
        state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x + 20.0);
        tick(&mut state, &tuning);
        assert!(state.crash.active);
        state.events.clear();

        for _ in 0..tuning.crash_duration_ticks {
            tick(&mut state, &tuning);
        }

        assert!(!state.crash.active);
        assert!(state.crash.is_complete());
        let finished = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::CrashFinished)
            .count();
        assert_eq!(finished, 1);
    }

    #[test]
    fn test_background_scrolls_on_crash_completion_tick() {
        let tuning = quiet();
        let mut state = running(&tuning);
        state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x + 20.0);
        tick(&mut state, &tuning);
        for _ in 1..tuning.crash_duration_ticks {
            tick(&mut state, &tuning);
        }
        assert!(state.crash.active);

        let score = state.score;
        let offset = state.background_offset;
        let obstacles = state.obstacles.as_slice().to_vec();
        tick(&mut state, &tuning);

        assert!(state.events.contains(&GameEvent::CrashFinished));
        assert!(state.background_offset > offset);
        assert_eq!(state.score, score);
        assert_eq!(state.obstacles.as_slice(), obstacles.as_slice());
    }

    #[test]
    fn test_player_keeps_falling_during_crash() {
        let tuning = quiet();
        let mut state = running(&tuning);
        state.jump(&tuning);
        tick(&mut state, &tuning);
        state.crash.start(state.player.center(), &mut state.rng);

        let y = state.player.pos.y;
        tick(&mut state, &tuning);
        assert_ne!(state.player.pos.y, y);
    }

    #[test]
    fn test_offscreen_obstacles_pruned_same_tick() {
        let tuning = quiet();
        let mut state = running(&tuning);
        // right edge at 2, scrolled by 5 this tick
        state.obstacles.spawn(&tuning.obstacle_types[0], -23.0);
        tick(&mut state, &tuning);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.obstacles.cleared, 1);
    }

    #[test]
    fn test_landing_emits_dust() {
        let tuning = quiet();
        let mut state = running(&tuning);
        state.jump(&tuning);
        state.events.clear();

        let mut landed = false;
        for _ in 0..120 {
            tick(&mut state, &tuning);
            if state.events.contains(&GameEvent::Landed) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(state.particles.len() >= tuning.landing_burst as usize);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning {
            spawn_chance: 0.05,
            ..Tuning::default()
        };
        let mut a = running(&tuning);
        let mut b = running(&tuning);

        for i in 0..600 {
            if i % 37 == 0 {
                a.jump(&tuning);
                b.jump(&tuning);
            }
            tick(&mut a, &tuning);
            tick(&mut b, &tuning);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles.as_slice(), b.obstacles.as_slice());
        assert_eq!(a.crash.pieces, b.crash.pieces);
        assert_eq!(a.player, b.player);
    }
}
