//! Scene draw pass
//!
//! Paints one frame of the game onto any `DrawSurface`, back to front:
//! background, particles, the player or its crash debris, then obstacles.
//! Reads the state only.

use glam::Vec2;

use super::surface::{Color, DrawSurface};
use super::vertex::colors::{self, NEON, SHADOW, SKY_BOTTOM, SKY_TOP};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, GROUND_Y};
use crate::sim::{CrashPiece, GameState, Obstacle, ObstacleKind, PieceTint, Player};

const SKY_BANDS: usize = 8;
const STAR_COUNT: u32 = 50;
const LANE_DASH: f32 = 20.0;
const LANE_GAP: f32 = 20.0;

pub fn draw_scene<S: DrawSurface + ?Sized>(surface: &mut S, state: &GameState) {
    draw_background(surface, state);
    draw_particles(surface, state);

    if state.crash.active {
        for piece in &state.crash.pieces {
            draw_crash_piece(surface, piece);
        }
    } else {
        draw_player(surface, &state.player);
    }

    for obstacle in state.obstacles.iter() {
        draw_obstacle(surface, obstacle);
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

fn draw_background<S: DrawSurface + ?Sized>(surface: &mut S, state: &GameState) {
    // Vertical gradient as flat bands
    let band = FIELD_HEIGHT / SKY_BANDS as f32;
    for i in 0..SKY_BANDS {
        let t = i as f32 / (SKY_BANDS - 1) as f32;
        surface.fill_rect(
            Vec2::new(0.0, i as f32 * band),
            Vec2::new(FIELD_WIDTH, band),
            lerp_color(SKY_TOP, SKY_BOTTOM, t),
        );
    }

    // Stars grow with speed
    let size = 1.0 + state.speed * 0.1;
    for i in 0..STAR_COUNT {
        let x = ((i * 37) % FIELD_WIDTH as u32) as f32;
        let y = ((i * 73) % (FIELD_HEIGHT as u32 - 100)) as f32;
        surface.fill_rect(Vec2::new(x, y), Vec2::splat(size), NEON);
    }

    surface.fill_rect(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT - GROUND_Y),
        NEON,
    );

    // Dashed lane marking scrolling with the background
    let lane_y = GROUND_Y + 10.0;
    let width = 3.0 + state.speed * 0.2;
    let period = LANE_DASH + LANE_GAP;
    let mut x = -state.background_offset.rem_euclid(period);
    while x < FIELD_WIDTH {
        let start = x.max(0.0);
        let end = (x + LANE_DASH).min(FIELD_WIDTH);
        if end > start {
            surface.line(Vec2::new(start, lane_y), Vec2::new(end, lane_y), width, SHADOW);
        }
        x += period;
    }
}

fn draw_particles<S: DrawSurface + ?Sized>(surface: &mut S, state: &GameState) {
    for particle in state.particles.iter() {
        surface.fill_circle(
            particle.pos,
            particle.size,
            colors::with_alpha(NEON, particle.alpha()),
        );
    }
}

fn draw_player<S: DrawSurface + ?Sized>(surface: &mut S, player: &Player) {
    let center = player.center();
    surface.save();
    surface.translate(center);
    surface.rotate(player.tilt);
    surface.scale(Vec2::new(player.squash, 1.0));
    surface.translate(-center);

    draw_skateboard(surface, player.pos);
    draw_dog(surface, player.pos);

    surface.restore();
}

fn draw_skateboard<S: DrawSurface + ?Sized>(surface: &mut S, origin: Vec2) {
    let deck = origin + Vec2::new(-10.0, 35.0);
    let deck_size = Vec2::new(80.0, 8.0);
    surface.fill_rect(deck, deck_size, NEON);
    surface.stroke_rect(deck, deck_size, 1.0, NEON);

    for wheel in [deck + Vec2::new(-5.0, 4.0), deck + Vec2::new(85.0, 4.0)] {
        surface.fill_circle(wheel, 8.0, SHADOW);
        surface.stroke_circle(wheel, 4.0, 2.0, NEON);
    }

    // Trucks
    surface.fill_rect(deck + Vec2::new(-2.0, -2.0), Vec2::new(4.0, 12.0), NEON);
    surface.fill_rect(deck + Vec2::new(78.0, -2.0), Vec2::new(4.0, 12.0), NEON);
}

fn draw_dog<S: DrawSurface + ?Sized>(surface: &mut S, origin: Vec2) {
    let at = |x: f32, y: f32| origin + Vec2::new(x, y);

    let body = (at(10.0, 5.0), Vec2::new(40.0, 30.0));
    let head = (at(45.0, 0.0), Vec2::new(25.0, 20.0));
    surface.fill_rect(body.0, body.1, NEON);
    surface.fill_rect(head.0, head.1, NEON);

    // Ears
    surface.fill_polygon(&[at(47.0, -5.0), at(51.0, -8.0), at(55.0, -5.0)], SHADOW);
    surface.fill_polygon(&[at(57.0, -5.0), at(61.0, -8.0), at(65.0, -5.0)], SHADOW);

    // Eyes with highlights
    surface.fill_circle(at(52.0, 6.0), 3.0, SHADOW);
    surface.fill_circle(at(60.0, 6.0), 3.0, SHADOW);
    surface.fill_circle(at(51.0, 5.0), 1.0, NEON);
    surface.fill_circle(at(59.0, 5.0), 1.0, NEON);

    // Nose
    surface.fill_circle(at(65.0, 9.0), 2.0, SHADOW);

    // Paws
    surface.fill_rect(at(15.0, 30.0), Vec2::new(8.0, 10.0), SHADOW);
    surface.fill_rect(at(35.0, 30.0), Vec2::new(8.0, 10.0), SHADOW);

    // Tail: quadratic curve (0,12) -> (-15,12) bending through (-10,8)
    let (p0, c, p1) = (at(0.0, 12.0), at(-10.0, 8.0), at(-15.0, 12.0));
    let curve = |t: f32| p0 * (1.0 - t) * (1.0 - t) + c * 2.0 * t * (1.0 - t) + p1 * t * t;
    const TAIL_STEPS: usize = 4;
    for i in 0..TAIL_STEPS {
        let a = curve(i as f32 / TAIL_STEPS as f32);
        let b = curve((i + 1) as f32 / TAIL_STEPS as f32);
        surface.line(a, b, 4.0, SHADOW);
    }

    // Glow outline
    surface.stroke_rect(body.0, body.1, 1.0, NEON);
    surface.stroke_rect(head.0, head.1, 1.0, NEON);
}

fn draw_crash_piece<S: DrawSurface + ?Sized>(surface: &mut S, piece: &CrashPiece) {
    let color = match piece.tint {
        PieceTint::Neon => NEON,
        PieceTint::Shadow => SHADOW,
    };
    surface.save();
    surface.translate(piece.center());
    surface.rotate(piece.rotation);
    surface.fill_rect(-piece.size / 2.0, piece.size, color);
    surface.restore();
}

fn draw_obstacle<S: DrawSurface + ?Sized>(surface: &mut S, obstacle: &Obstacle) {
    match obstacle.kind {
        ObstacleKind::NeonBarrier => draw_neon_barrier(surface, obstacle.pos, obstacle.size),
    }
}

fn draw_neon_barrier<S: DrawSurface + ?Sized>(surface: &mut S, pos: Vec2, size: Vec2) {
    let (w, h) = (size.x, size.y);

    // Post
    let post = (pos + Vec2::new(w * 0.3, 0.0), Vec2::new(w * 0.4, h));
    surface.fill_rect(post.0, post.1, NEON);
    surface.stroke_rect(post.0, post.1, 2.0, NEON);

    // Crossbars
    for y in [0.2, 0.6] {
        let bar = (pos + Vec2::new(0.0, h * y), Vec2::new(w, h * 0.1));
        surface.fill_rect(bar.0, bar.1, NEON);
        surface.stroke_rect(bar.0, bar.1, 1.0, NEON);
    }

    surface.line(
        pos + Vec2::new(w * 0.5, h * 0.1),
        pos + Vec2::new(w * 0.5, h * 0.9),
        3.0,
        SHADOW,
    );

    // Side accents
    surface.fill_rect(pos + Vec2::new(w * 0.1, h * 0.3), Vec2::new(w * 0.1, h * 0.4), SHADOW);
    surface.fill_rect(pos + Vec2::new(w * 0.8, h * 0.3), Vec2::new(w * 0.1, h * 0.4), SHADOW);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, tick};
    use crate::tuning::Tuning;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Save,
        Restore,
        Translate(Vec2),
        Rotate(f32),
        Scale(Vec2),
        FillRect(Vec2, Vec2, Color),
        StrokeRect(Vec2, Vec2, f32),
        FillCircle(Vec2, f32, Color),
        StrokeCircle(Vec2, f32),
        Line(Vec2, Vec2, f32),
        Polygon(usize),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl DrawSurface for Recorder {
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn translate(&mut self, offset: Vec2) {
            self.ops.push(Op::Translate(offset));
        }
        fn rotate(&mut self, radians: f32) {
            self.ops.push(Op::Rotate(radians));
        }
        fn scale(&mut self, factor: Vec2) {
            self.ops.push(Op::Scale(factor));
        }
        fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
            self.ops.push(Op::FillRect(pos, size, color));
        }
        fn stroke_rect(&mut self, pos: Vec2, size: Vec2, width: f32, _color: Color) {
            self.ops.push(Op::StrokeRect(pos, size, width));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ops.push(Op::FillCircle(center, radius, color));
        }
        fn stroke_circle(&mut self, center: Vec2, radius: f32, _width: f32, _color: Color) {
            self.ops.push(Op::StrokeCircle(center, radius));
        }
        fn line(&mut self, from: Vec2, to: Vec2, width: f32, _color: Color) {
            self.ops.push(Op::Line(from, to, width));
        }
        fn fill_polygon(&mut self, points: &[Vec2], _color: Color) {
            self.ops.push(Op::Polygon(points.len()));
        }
    }

    impl Recorder {
        fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }

        fn barriers(&self) -> usize {
            // Only the barrier post uses a 2px outline
            self.count(|op| matches!(op, Op::StrokeRect(_, _, w) if *w == 2.0))
        }

        fn players(&self) -> usize {
            self.count(|op| matches!(op, Op::Scale(_)))
        }
    }

    fn running() -> (GameState, Tuning) {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(3, &tuning);
        state.phase = GamePhase::Running;
        (state, tuning)
    }

    fn draw(state: &GameState) -> Recorder {
        let mut surface = Recorder::default();
        draw_scene(&mut surface, state);
        surface
    }

    #[test]
    fn test_idle_board_draws_player_and_ground() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        let surface = draw(&state);

        assert_eq!(surface.players(), 1);
        assert_eq!(surface.barriers(), 0);
        assert!(surface.ops.contains(&Op::FillRect(
            Vec2::new(0.0, GROUND_Y),
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT - GROUND_Y),
            NEON,
        )));
    }

    #[test]
    fn test_transforms_are_balanced() {
        let (mut state, tuning) = running();
        state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x + 20.0);
        tick(&mut state, &tuning);
        let surface = draw(&state);

        let saves = surface.count(|op| *op == Op::Save);
        let restores = surface.count(|op| *op == Op::Restore);
        assert!(saves > 0);
        assert_eq!(saves, restores);
    }

    #[test]
    fn test_crash_replaces_player_with_pieces() {
        let (mut state, tuning) = running();
        state.obstacles.spawn(&tuning.obstacle_types[0], state.player.pos.x + 20.0);
        tick(&mut state, &tuning);
        assert!(state.crash.active);

        let surface = draw(&state);
        assert_eq!(surface.players(), 0);
        assert_eq!(surface.count(|op| matches!(op, Op::Rotate(_))), 7);
        assert_eq!(surface.barriers(), 1);
    }

    #[test]
    fn test_each_obstacle_drawn_once() {
        let (mut state, tuning) = running();
        for x in [300.0, 450.0, 600.0] {
            state.obstacles.spawn(&tuning.obstacle_types[0], x);
        }
        assert_eq!(draw(&state).barriers(), 3);
    }

    #[test]
    fn test_pruned_obstacles_not_drawn() {
        let (mut state, tuning) = running();
        state.obstacles.spawn(&tuning.obstacle_types[0], -23.0);
        assert_eq!(draw(&state).barriers(), 1);

        tick(&mut state, &tuning);
        assert_eq!(draw(&state).barriers(), 0);
    }

    #[test]
    fn test_particles_drawn_and_fade() {
        let (mut state, tuning) = running();
        let circles = |surface: &Recorder| surface.count(|op| matches!(op, Op::FillCircle(..)));
        let base = circles(&draw(&state));

        state.jump(&tuning);
        assert_eq!(circles(&draw(&state)), base + state.particles.len());

        tick(&mut state, &tuning);
        let surface = draw(&state);
        let faded = surface.count(|op| matches!(op, Op::FillCircle(_, _, c) if c[3] < 1.0));
        assert_eq!(faded, state.particles.len());
    }

    #[test]
    fn test_lane_scrolls_with_background() {
        let (mut state, _) = running();
        let first_dash = |surface: &Recorder| {
            surface
                .ops
                .iter()
                .find_map(|op| match op {
                    Op::Line(from, to, _) if from.y == GROUND_Y + 10.0 => Some((from.x, to.x)),
                    _ => None,
                })
                .unwrap()
        };

        let before = first_dash(&draw(&state));
        assert_eq!(before, (0.0, LANE_DASH));

        state.background_offset = 5.0;
        let after = first_dash(&draw(&state));
        assert_eq!(after, (0.0, LANE_DASH - 5.0));
    }

    #[test]
    fn test_star_layout_is_stable() {
        let (state, _) = running();
        let a = draw(&state);
        let b = draw(&state);
        assert_eq!(a.ops, b.ops);
    }
}
