//! ghost — a spectral voice visualiser that rises into view, then hovers
//! and breathes
//!
//! The whole scene is drawn about a floating centre, scaled and faded as a
//! unit. On start-up it fades in from nothing while rising 30 px and
//! growing from 80% to full size; afterwards its opacity swings between
//! 180 and 255 and it bobs gently.

use crate::motifs::{voice_energy, wave_circle, VoiceWaves};
use egui::{vec2, Pos2, Vec2};
use glowcore::derive::approach;
use glowcore::rng::uniform;
use glowcore::scene::particles::{Boundary, Particle, ParticleField};
use glowcore::surface::{GradientStop, Paint};
use glowcore::{Canvas, Clock, Frame, GlowColors, Rgba, Scene, SceneRng};
use std::f32::consts::TAU;

const PARTICLES: usize = 30;
const RISE_FADE: f32 = 3.0;
const BREATH_IN: f32 = 5.0;
const BREATH_OUT: f32 = 3.0;
const BREATH_FLOOR: f32 = 180.0;
const WISP: Rgba = Rgba::rgb(200, 255, 255);

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("wave", 0.1, Clock::TAU)
        .with_phase("pulse", 0.03, Clock::TAU)
        .with_phase("drift", 0.02, Clock::TAU)
        .with_accumulator("appear", 0.02)
}

/// How the ghost is currently shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Presence {
    /// First appearance: fading in, rising and growing.
    Rising,
    /// Hovering with opacity swinging up (`inhaling`) or down.
    Breathing { inhaling: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Apparition {
    pub presence: Presence,
    /// 0..=255
    pub opacity: f32,
    pub y_offset: f32,
    pub scale: f32,
}

impl Default for Apparition {
    fn default() -> Self {
        Self {
            presence: Presence::Rising,
            opacity: 0.0,
            y_offset: 0.0,
            scale: 0.8,
        }
    }
}

impl Apparition {
    /// Advance one tick; `appear` is the time since start, `drift` the
    /// hovering phase.
    pub fn step(&mut self, appear: f32, drift: f32) {
        match self.presence {
            Presence::Rising => {
                self.opacity = (self.opacity + RISE_FADE).min(255.0);
                let settled = approach(appear);
                self.y_offset = -30.0 * settled;
                self.scale = 0.8 + 0.2 * settled;
                if self.opacity >= 255.0 {
                    tracing::debug!("ghost fully materialised");
                    self.presence = Presence::Breathing { inhaling: true };
                }
            }
            Presence::Breathing { inhaling } => {
                let inhaling = if inhaling {
                    self.opacity = (self.opacity + BREATH_IN).min(255.0);
                    self.opacity < 255.0
                } else {
                    self.opacity = (self.opacity - BREATH_OUT).max(BREATH_FLOOR);
                    self.opacity <= BREATH_FLOOR
                };
                self.presence = Presence::Breathing { inhaling };
                self.y_offset = -10.0 + 5.0 * drift.sin();
            }
        }
    }
}

fn spawn_wisp(rng: &mut SceneRng, size: Vec2) -> Particle {
    let pos = Pos2::new(uniform(rng, 0.0, size.x), uniform(rng, 0.0, size.y));
    let heading = uniform(rng, 0.0, TAU);
    let speed = uniform(rng, 0.2, 1.0);
    Particle {
        size: uniform(rng, 5.0, 15.0),
        life: uniform(rng, 50.0, 150.0) / 255.0,
        ..Particle::new(pos, vec2(heading.cos(), heading.sin()) * speed)
    }
}

pub struct Ghost {
    apparition: Apparition,
    wisps: ParticleField,
    listening: bool,
}

impl Ghost {
    pub fn new(_label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        Self {
            apparition: Apparition::default(),
            wisps: ParticleField::new(PARTICLES, size, Boundary::Wrap, spawn_wisp, rng),
            listening: false,
        }
    }

    pub fn apparition(&self) -> Apparition {
        self.apparition
    }

    /// Scale and fade the canvas about the floating centre, which is
    /// returned.
    fn haunt(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) -> Pos2 {
        let c = frame.center() + vec2(0.0, self.apparition.y_offset);
        let s = self.apparition.scale;
        canvas.translate(c.to_vec2());
        canvas.scale(s, s);
        canvas.translate(-c.to_vec2());
        canvas.set_opacity(self.apparition.opacity / 255.0);
        c
    }
}

impl Scene for Ghost {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        self.apparition.step(frame.phase("appear"), frame.phase("drift"));
        self.wisps.tick(frame.size, rng);
    }

    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = self.haunt(canvas, frame);
        let drift = frame.phase("drift");
        let fog = Rgba::rgba(20, 30, 50, 0).with_alpha_f(20.0 * (1.0 + drift.sin()));
        canvas.fill_background(&Paint::radial2(c, 500.0, fog, Rgba::rgba(0, 0, 20, 0)));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = self.haunt(canvas, frame);
        let pulse = frame.phase("pulse");
        let drift = frame.phase("drift");

        for wisp in self.wisps.particles() {
            let glow = Paint::radial2(wisp.pos, wisp.size, WISP.with_alpha_f(wisp.life * 255.0), WISP.with_alpha(0));
            canvas.fill_circle(wisp.pos, wisp.size, glow);
        }

        let aura_radius = 200.0 + 30.0 * drift.sin();
        let swell = 1.0 + pulse.sin();
        let aura = Paint::radial(
            c,
            aura_radius,
            vec![
                GradientStop::new(0.0, GlowColors::CYAN.with_alpha_f(30.0 * swell)),
                GradientStop::new(0.5, GlowColors::MATRIX.with_alpha_f(20.0 * swell)),
                GradientStop::new(1.0, Rgba::rgba(0, 0, 150, 0)),
            ],
        );
        canvas.fill_circle(c, aura_radius, aura);
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = self.haunt(canvas, frame);
        let wave = frame.phase("wave");
        let drift = frame.phase("drift");
        let energy = voice_energy(frame.phase("pulse"), self.listening);

        for i in 0..3 {
            let radius = 150.0 + i as f32 * 60.0 + 20.0 * (drift + i as f32).sin();
            let stops = vec![
                GradientStop::new(0.0, GlowColors::CYAN.with_alpha(100)),
                GradientStop::new(0.5, GlowColors::MATRIX.with_alpha(100)),
                GradientStop::new(1.0, Rgba::rgba(0, 0, 150, 0)),
            ];
            wave_circle(canvas, c, radius, wave, energy, stops, GlowColors::CYAN.with_alpha(100));
        }

        if !self.listening {
            let (w, h) = (frame.width(), frame.height());
            VoiceWaves {
                points: (w * 0.15) as usize,
                width: (w * 0.9).min(1200.0),
                amplitude: (h * 0.1).min(100.0) * energy,
                harmonics: (1.5, 2.0),
                thickness: (w * 0.003).max(3.0),
                offset: h * 0.25,
                colors: [GlowColors::CYAN, Rgba::rgb(100, 200, 255), GlowColors::MATRIX],
                dots: Some(GlowColors::CYAN),
            }
            .paint(canvas, c, wave);
        }
    }

    fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }

    fn resize(&mut self, size: Vec2, rng: &mut SceneRng) {
        self.wisps.reseed(size, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::rng::seeded;

    #[test]
    fn test_rises_then_breathes() {
        let mut a = Apparition::default();
        let mut appear = 0.0;
        for _ in 0..85 {
            appear += 0.02;
            a.step(appear, 0.0);
        }
        assert_eq!(a.presence, Presence::Breathing { inhaling: true });
        assert_eq!(a.opacity, 255.0);
        assert!(a.y_offset < -20.0 && a.y_offset > -30.0);
        assert!(a.scale > 0.95 && a.scale < 1.0);

        // breathing swings between the floor and full opacity
        let mut low = 255.0f32;
        for _ in 0..200 {
            a.step(appear, 0.0);
            low = low.min(a.opacity);
            assert!((BREATH_FLOOR..=255.0).contains(&a.opacity));
            assert_eq!(a.y_offset, -10.0);
        }
        assert_eq!(low, BREATH_FLOOR);
    }

    #[test]
    fn test_invisible_before_first_tick() {
        let ghost = Ghost::new("", vec2(1000.0, 800.0), &mut seeded(0));
        assert_eq!(ghost.apparition().opacity, 0.0);
        assert_eq!(ghost.apparition().scale, 0.8);
        assert_eq!(ghost.wisps.len(), PARTICLES);
    }

    #[test]
    fn test_wisps_stay_on_screen() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: vec2(1000.0, 800.0),
        };
        let mut rng = seeded(1);
        let mut ghost = Ghost::new("", frame.size, &mut rng);
        for _ in 0..500 {
            ghost.tick(&frame, &mut rng);
        }
        for wisp in ghost.wisps.particles() {
            assert!((0.0..1000.0).contains(&wisp.pos.x));
            assert!((0.0..800.0).contains(&wisp.pos.y));
            assert!((50.0 / 255.0..150.0 / 255.0).contains(&wisp.life));
        }
    }
}
