//! Decorative dust particles kicked up by jumps and landings

use glam::Vec2;
use rand::Rng;

/// Hard ceiling on live particles
pub const MAX_PARTICLES: usize = 256;

/// Randomisation envelope for a burst
#[derive(Debug, Clone, Copy)]
pub struct BurstShape {
    /// Horizontal spread of spawn positions around the origin
    pub jitter_x: f32,
    /// Horizontal velocity spread (symmetric around 0)
    pub spread_vx: f32,
    pub min_vy: f32,
    pub range_vy: f32,
    pub min_size: f32,
    pub range_size: f32,
}

/// Small puff when leaving the ground
pub const JUMP_DUST: BurstShape = BurstShape {
    jitter_x: 0.0,
    spread_vx: 4.0,
    min_vy: 1.0,
    range_vy: 3.0,
    min_size: 1.0,
    range_size: 3.0,
};

/// Wider splash on touchdown
pub const LANDING_DUST: BurstShape = BurstShape {
    jitter_x: 40.0,
    spread_vx: 6.0,
    min_vy: 2.0,
    range_vy: 4.0,
    min_size: 2.0,
    range_size: 4.0,
};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    /// Fade-out alpha in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

/// Live particles plus the cap from user settings
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub cap: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self {
            particles: Vec::new(),
            cap: MAX_PARTICLES,
        }
    }
}

impl ParticleSystem {
    /// Spawn up to `count` particles around `origin`, stopping at the cap
    pub fn emit<R: Rng>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        shape: &BurstShape,
        count: u32,
        life: u32,
    ) {
        let room = self.cap.saturating_sub(self.particles.len());
        for _ in 0..(count as usize).min(room) {
            let x = origin.x + (rng.random::<f32>() - 0.5) * shape.jitter_x;
            self.particles.push(Particle {
                pos: Vec2::new(x, origin.y),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * shape.spread_vx,
                    rng.random::<f32>() * shape.range_vy + shape.min_vy,
                ),
                life,
                max_life: life,
                size: rng.random::<f32>() * shape.range_size + shape.min_size,
            });
        }
    }

    /// Integrate and age every particle, dropping the dead
    pub fn update(&mut self, gravity: f32) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += gravity;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_emit_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem {
            particles: Vec::new(),
            cap: 10,
        };
        system.emit(&mut rng, Vec2::ZERO, &LANDING_DUST, 12, 40);
        assert_eq!(system.len(), 10);
        system.emit(&mut rng, Vec2::ZERO, &JUMP_DUST, 8, 30);
        assert_eq!(system.len(), 10);
    }

    #[test]
    fn test_landing_dust_spawns_within_envelope() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut system = ParticleSystem::default();
        let origin = Vec2::new(130.0, 340.0);
        system.emit(&mut rng, origin, &LANDING_DUST, 12, 40);

        for p in system.iter() {
            assert!((p.pos.x - origin.x).abs() <= 20.0);
            assert_eq!(p.pos.y, origin.y);
            assert!(p.vel.x.abs() <= 3.0);
            assert!(p.vel.y >= 2.0 && p.vel.y < 6.0);
            assert!(p.size >= 2.0 && p.size < 6.0);
            assert_eq!(p.alpha(), 1.0);
        }
    }

    #[test]
    fn test_particles_expire_after_life() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut system = ParticleSystem::default();
        system.emit(&mut rng, Vec2::ZERO, &JUMP_DUST, 8, 30);

        for _ in 0..29 {
            system.update(0.2);
        }
        assert_eq!(system.len(), 8);
        assert!((system.particles[0].alpha() - 1.0 / 30.0).abs() < 1e-6);

        system.update(0.2);
        assert!(system.is_empty());
    }

    #[test]
    fn test_gravity_pulls_particles_down() {
        let mut system = ParticleSystem::default();
        system.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life: 10,
            max_life: 10,
            size: 2.0,
        });
        system.update(0.2);
        system.update(0.2);
        let p = &system.particles[0];
        assert_eq!(p.pos, Vec2::new(2.0, 0.2));
        assert!((p.vel.y - 0.4).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_life_strictly_decreases(life in 1u32..100, ticks in 1usize..120) {
            let mut system = ParticleSystem::default();
            system.particles.push(Particle {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                life,
                max_life: life,
                size: 1.0,
            });
            let mut last = life;
            for _ in 0..ticks {
                system.update(0.2);
                match system.particles.first() {
                    Some(p) => {
                        prop_assert!(p.life < last);
                        last = p.life;
                    }
                    None => break,
                }
            }
            prop_assert_eq!(system.is_empty(), ticks >= life as usize);
        }
    }
}
