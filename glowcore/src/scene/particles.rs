//! particles — fixed-size fields of Euler-integrated particles
//!
//! The field never grows or shrinks. What happens at the edge of the
//! drawable area is a per-field [`Boundary`] policy: wrap around, bounce
//! off an inset margin, or reset the particle in place from the field's
//! spawn function.

use crate::rng::SceneRng;
use egui::{Pos2, Vec2};

/// One simulated particle. `phase` and `size` are per-particle constants
/// used by derivations; `life` is free for fading effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Pos2,
    pub vel: Vec2,
    pub size: f32,
    pub phase: f32,
    pub life: f32,
}

impl Particle {
    pub fn new(pos: Pos2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: 1.0,
            phase: 0.0,
            life: 1.0,
        }
    }
}

/// Edge behaviour of a [`ParticleField`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
    /// Leave one edge, come back at the opposite one.
    Wrap,
    /// Reflect the velocity at `margin` pixels inside each edge.
    Bounce { margin: f32 },
    /// Reset from the spawn function once outside the area grown by
    /// `margin` on every side.
    Respawn { margin: f32 },
}

/// Builds a fresh particle for a field of the given size.
pub type Spawner = fn(&mut SceneRng, Vec2) -> Particle;

pub struct ParticleField {
    particles: Vec<Particle>,
    boundary: Boundary,
    spawn: Spawner,
}

impl ParticleField {
    pub fn new(count: usize, size: Vec2, boundary: Boundary, spawn: Spawner, rng: &mut SceneRng) -> Self {
        let particles = (0..count).map(|_| spawn(rng, size)).collect();
        Self {
            particles,
            boundary,
            spawn,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Integrate one step and apply the boundary policy.
    pub fn tick(&mut self, size: Vec2, rng: &mut SceneRng) {
        for p in &mut self.particles {
            p.pos += p.vel;
            match self.boundary {
                Boundary::Wrap => {
                    if size.x > 0.0 {
                        p.pos.x = p.pos.x.rem_euclid(size.x);
                    }
                    if size.y > 0.0 {
                        p.pos.y = p.pos.y.rem_euclid(size.y);
                    }
                }
                Boundary::Bounce { margin } => {
                    let (lo, hi) = (margin, size - Vec2::splat(margin));
                    if p.pos.x < lo || p.pos.x > hi.x {
                        p.vel.x = -p.vel.x;
                        p.pos.x = p.pos.x.clamp(lo, hi.x.max(lo));
                    }
                    if p.pos.y < lo || p.pos.y > hi.y {
                        p.vel.y = -p.vel.y;
                        p.pos.y = p.pos.y.clamp(lo, hi.y.max(lo));
                    }
                }
                Boundary::Respawn { margin } => {
                    let outside = p.pos.x < -margin
                        || p.pos.y < -margin
                        || p.pos.x > size.x + margin
                        || p.pos.y > size.y + margin
                        || !p.pos.x.is_finite()
                        || !p.pos.y.is_finite();
                    if outside {
                        *p = (self.spawn)(rng, size);
                        tracing::trace!(pos = ?p.pos, "particle respawned");
                    }
                }
            }
        }
    }

    /// Re-seed every particle, e.g. after a resize.
    pub fn reseed(&mut self, size: Vec2, rng: &mut SceneRng) {
        for p in &mut self.particles {
            *p = (self.spawn)(rng, size);
        }
    }

    /// Pairs `(i, j)` with `i < j` closer than `threshold`.
    pub fn neighbours(&self, threshold: f32) -> Vec<(usize, usize, f32)> {
        let points: Vec<Pos2> = self.particles.iter().map(|p| p.pos).collect();
        super::network::pairs_within(&points, threshold)
    }
}
