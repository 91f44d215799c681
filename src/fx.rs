//! Cosmetic effects: starfield and crash particles
//!
//! Purely visual. `CosmeticRng` is a separate type from `sim::SeededRng` and
//! never drives obstacle geometry.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::Viewport;

/// Number of background stars
pub const STAR_COUNT: usize = 50;
/// Particles per crash explosion
pub const EXPLOSION_PARTICLES: usize = 20;
/// Life lost per frame
const PARTICLE_DECAY: f64 = 0.02;

/// Entropy-seeded RNG for visuals only
#[derive(Debug, Clone)]
pub struct CosmeticRng(Pcg32);

impl CosmeticRng {
    pub fn from_entropy() -> Self {
        Self(Pcg32::from_rng(&mut rand::rng()))
    }

    /// Fixed seed, for tests and screenshots
    pub fn seeded(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    fn unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Background star
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: DVec2,
    pub size: f64,
    pub speed: f64,
}

/// Which palette slot a particle uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Body,
    Accent,
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// 1.0 at birth, removed at 0
    pub life: f64,
    pub color: ParticleColor,
}

/// All cosmetic state a renderer animates alongside the simulation
#[derive(Debug, Clone)]
pub struct Effects {
    rng: CosmeticRng,
    pub stars: Vec<Star>,
    pub particles: Vec<Particle>,
}

impl Effects {
    pub fn new(mut rng: CosmeticRng, viewport: Viewport) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: DVec2::new(
                    rng.unit() * viewport.width,
                    rng.unit() * viewport.height,
                ),
                size: rng.unit() * 2.0 + 0.5,
                speed: rng.unit() * 0.5 + 0.1,
            })
            .collect();
        Self {
            rng,
            stars,
            particles: Vec::new(),
        }
    }

    /// Burst of particles at the crash point
    pub fn explode(&mut self, at: DVec2) {
        for i in 0..EXPLOSION_PARTICLES {
            let angle = self.rng.unit() * std::f64::consts::TAU;
            let speed = self.rng.unit() * 5.0 + 2.0;
            self.particles.push(Particle {
                pos: at,
                vel: DVec2::from_angle(angle) * speed,
                life: 1.0,
                color: if i % 2 == 0 {
                    ParticleColor::Body
                } else {
                    ParticleColor::Accent
                },
            });
        }
    }

    /// Advance one frame; stars only scroll while a run is active
    pub fn update(&mut self, scrolling: bool, viewport: Viewport) {
        if scrolling {
            for star in &mut self.stars {
                star.pos.x -= star.speed;
                if star.pos.x < 0.0 {
                    star.pos.x = viewport.width;
                }
            }
        }

        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= PARTICLE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
