//! Crash sequence: the dog shatters into pieces before the run ends
//!
//! Idle -> Active on a confirmed hit, Active -> Idle after `duration` ticks.
//! `was_started` stays set until the next run so the game-over transition can
//! verify it follows a real crash.

use glam::Vec2;
use rand::Rng;

/// Which part of the sprite a piece came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Head,
    Body,
    Limb,
    Board,
}

/// Palette slot for a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceTint {
    Neon,
    Shadow,
}

/// A flying fragment
#[derive(Debug, Clone, PartialEq)]
pub struct CrashPiece {
    pub kind: PieceKind,
    /// Top-left corner before rotation
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Radians
    pub rotation: f32,
    pub rotation_speed: f32,
    pub tint: PieceTint,
}

impl CrashPiece {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Launch envelope for one piece, relative to the player's centre
struct PieceSpec {
    kind: PieceKind,
    offset: Vec2,
    size: Vec2,
    spread_vx: f32,
    lift_min: f32,
    lift_range: f32,
    spin: f32,
    tint: PieceTint,
}

impl PieceSpec {
    fn launch<R: Rng>(&self, center: Vec2, rng: &mut R) -> CrashPiece {
        CrashPiece {
            kind: self.kind,
            pos: center + self.offset,
            size: self.size,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * self.spread_vx,
                -rng.random::<f32>() * self.lift_range - self.lift_min,
            ),
            rotation: 0.0,
            rotation_speed: (rng.random::<f32>() - 0.5) * self.spin,
            tint: self.tint,
        }
    }
}

fn piece_specs() -> Vec<PieceSpec> {
    let mut specs = vec![
        PieceSpec {
            kind: PieceKind::Head,
            offset: Vec2::new(-10.0, -15.0),
            size: Vec2::new(20.0, 15.0),
            spread_vx: 8.0,
            lift_min: 2.0,
            lift_range: 6.0,
            spin: 0.3,
            tint: PieceTint::Neon,
        },
        PieceSpec {
            kind: PieceKind::Body,
            offset: Vec2::new(-15.0, -5.0),
            size: Vec2::new(30.0, 20.0),
            spread_vx: 6.0,
            lift_min: 1.0,
            lift_range: 4.0,
            spin: 0.2,
            tint: PieceTint::Neon,
        },
    ];
    // Paws in a 2x2 grid under the body
    specs.extend((0..4).map(|i| PieceSpec {
        kind: PieceKind::Limb,
        offset: Vec2::new(-5.0 + (i % 2) as f32 * 10.0, 5.0 + (i / 2) as f32 * 10.0),
        size: Vec2::new(8.0, 8.0),
        spread_vx: 10.0,
        lift_min: 1.0,
        lift_range: 8.0,
        spin: 0.4,
        tint: PieceTint::Shadow,
    }));
    specs.push(PieceSpec {
        kind: PieceKind::Board,
        offset: Vec2::new(-20.0, 15.0),
        size: Vec2::new(40.0, 6.0),
        spread_vx: 4.0,
        lift_min: 0.0,
        lift_range: 3.0,
        spin: 0.1,
        tint: PieceTint::Neon,
    });
    specs
}

/// State of the crash animation
#[derive(Debug, Clone)]
pub struct CrashSequence {
    pub active: bool,
    /// Ticks since the crash started
    pub elapsed: u32,
    pub duration: u32,
    pub was_started: bool,
    pub pieces: Vec<CrashPiece>,
}

impl CrashSequence {
    pub fn new(duration: u32) -> Self {
        Self {
            active: false,
            elapsed: 0,
            duration,
            was_started: false,
            pieces: Vec::new(),
        }
    }

    /// Shatter the player around `center`
    pub fn start<R: Rng>(&mut self, center: Vec2, rng: &mut R) {
        self.pieces = piece_specs()
            .iter()
            .map(|spec| spec.launch(center, rng))
            .collect();
        self.elapsed = 0;
        self.active = true;
        self.was_started = true;
    }

    /// Advance the debris. Returns true on the tick the sequence completes.
    pub fn update(&mut self, gravity: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += 1;
        for piece in &mut self.pieces {
            piece.pos += piece.vel;
            piece.vel.y += gravity;
            piece.rotation += piece.rotation_speed;
        }

        if self.elapsed >= self.duration {
            self.active = false;
            self.pieces.clear();
            return true;
        }
        false
    }

    /// A crash ran to completion this run
    pub fn is_complete(&self) -> bool {
        self.was_started && !self.active && self.elapsed >= self.duration
    }
}
