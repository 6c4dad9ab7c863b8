//! quantum — cyan/magenta voice visualiser with drifting quantum particles
//! and a 25-pass gradient caption

use crate::motifs::{centered_rect, voice_energy, wave_circle, EnergyRing, VoiceWaves};
use egui::{pos2, vec2, Align2, Pos2, Vec2};
use glowcore::rng::uniform;
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowColors, Rgba, Scene, SceneRng};
use std::f32::consts::{PI, TAU};

const PARTICLES: usize = 50;
const GLOW_PASSES: usize = 25;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("wave", 0.1, Clock::TAU)
        .with_phase("ring", 2.0, 360.0)
        .with_phase("pulse", 0.05, Clock::TAU)
}

pub fn status_text(listening: bool) -> &'static str {
    if listening {
        "Analyzing quantum data..."
    } else {
        "Processing reality..."
    }
}

/// A particle moving in a straight line that mirrors its heading when it
/// crosses an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantumParticle {
    pub pos: Pos2,
    pub size: f32,
    pub speed: f32,
    pub heading: f32,
}

impl QuantumParticle {
    fn spawn(rng: &mut SceneRng, size: Vec2) -> Self {
        Self {
            pos: pos2(uniform(rng, 0.0, size.x), uniform(rng, 0.0, size.y)),
            size: uniform(rng, 2.0, 6.0),
            speed: uniform(rng, 0.5, 2.0),
            heading: uniform(rng, 0.0, TAU),
        }
    }

    pub fn step(&mut self, bounds: Vec2) {
        self.pos += vec2(self.heading.cos(), self.heading.sin()) * self.speed;
        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.heading = PI - self.heading;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.heading = -self.heading;
        }
    }
}

/// Per-pass horizontal gradient of the caption glow.
fn glow_paint(center: Pos2, pulse: f32, wave: f32, pass: usize, alpha: u8) -> Paint {
    let hue_shift = 30.0 * (wave + pass as f32 * 0.1).sin();
    Paint::linear(
        center - vec2(300.0, 0.0),
        center + vec2(300.0, 0.0),
        vec![
            GradientStop::new(0.0, Rgba::rgba(0, glowcore::derive::alpha(200.0 + 55.0 * (pulse + hue_shift).sin()), 255, alpha)),
            GradientStop::new(0.3, GlowColors::AZURE.with_alpha(alpha)),
            GradientStop::new(0.5, Rgba::WHITE.with_alpha(alpha)),
            GradientStop::new(0.7, Rgba::rgba(100, 0, 255, alpha)),
            GradientStop::new(1.0, Rgba::rgba(glowcore::derive::alpha(200.0 + 55.0 * pulse.cos()), 0, 255, alpha)),
        ],
    )
}

pub struct Quantum {
    label: String,
    particles: Vec<QuantumParticle>,
    listening: bool,
}

impl Quantum {
    pub fn new(label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            particles: (0..PARTICLES).map(|_| QuantumParticle::spawn(rng, size)).collect(),
            listening: false,
        }
    }

    pub fn particles(&self) -> &[QuantumParticle] {
        &self.particles
    }

    /// Pass alphas of the caption glow for a pulse phase, first pass first.
    pub fn glow_alphas(pulse: f32) -> Vec<u8> {
        let strength = 0.9 + 0.1 * (pulse * 3.0).sin();
        (0..GLOW_PASSES)
            .map(|i| glowcore::derive::alpha((GLOW_PASSES - i) as f32 * 8.0 * strength))
            .collect()
    }
}

impl Scene for Quantum {
    fn tick(&mut self, frame: &Frame<'_>, _rng: &mut SceneRng) {
        for p in &mut self.particles {
            p.step(frame.size);
        }
    }

    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.fill_background(&Paint::radial2(frame.center(), 500.0, Rgba::rgba(0, 20, 40, 30), Rgba::TRANSPARENT));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let pulse = frame.phase("pulse");
        for p in &self.particles {
            let opacity = 100.0 + 100.0 * (pulse + p.pos.x * 0.01).sin().abs();
            canvas.fill_circle(p.pos, p.size, Rgba::WHITE.with_alpha_f(opacity));
        }

        let c = frame.center();
        let energy = voice_energy(pulse, self.listening);
        for i in 0..3 {
            let stops = vec![
                GradientStop::new(0.0, GlowColors::CYAN.with_alpha(100)),
                GradientStop::new(0.5, GlowColors::MAGENTA.with_alpha(100)),
                GradientStop::new(1.0, Rgba::rgba(0, 0, 150, 0)),
            ];
            wave_circle(canvas, c, 150.0 + i as f32 * 60.0, frame.phase("wave"), energy, stops, GlowColors::CYAN.with_alpha(100));
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        for i in 0..2 {
            EnergyRing {
                radius: 250.0 + i as f32 * 80.0,
                count: 48 + i * 16,
                color: GlowColors::CYAN,
                link_to: Some(GlowColors::MAGENTA),
            }
            .paint(canvas, c, frame.phase("ring"), pulse);
        }

        if !self.listening {
            let (w, h) = (frame.width(), frame.height());
            VoiceWaves {
                points: (w * 0.15) as usize,
                width: (w * 0.9).min(1200.0),
                amplitude: (h * 0.1).min(100.0) * voice_energy(pulse, false),
                harmonics: (1.5, 2.0),
                thickness: (w * 0.003).max(3.0),
                offset: h * 0.25,
                colors: [GlowColors::CYAN, Rgba::rgb(100, 200, 255), GlowColors::MAGENTA],
                dots: Some(Rgba::WHITE),
            }
            .paint(canvas, c, frame.phase("wave"));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let wave = frame.phase("wave");
        let pulse = frame.phase("pulse");
        let font = FontSpec::sans(60.0).bold();

        for (i, alpha) in Self::glow_alphas(pulse).into_iter().enumerate() {
            let offset = vec2(
                10.0 * (wave * 2.0 + i as f32 * 0.3).sin(),
                5.0 * (wave * 3.0 + i as f32 * 0.2).cos() - i as f32 * 0.8,
            );
            canvas.text_at(c + offset, Align2::CENTER_CENTER, &self.label, font, glow_paint(c, pulse, wave, i, alpha));
        }

        let glow_center = c - vec2(0.0, 20.0);
        let glow_radius = 50.0 + 20.0 * (pulse * 2.0).sin();
        let glow = Paint::radial(
            glow_center,
            glow_radius,
            vec![
                GradientStop::new(0.0, Rgba::WHITE.with_alpha(180)),
                GradientStop::new(0.2, Rgba::rgba(100, 200, 255, 150)),
                GradientStop::new(0.5, Rgba::rgba(0, 100, 255, 100)),
                GradientStop::new(1.0, Rgba::rgba(0, 0, 200, 0)),
            ],
        );
        canvas.fill_circle(glow_center, glow_radius, glow);

        let energy_pulse = (wave * 2.0).sin();
        let core = Paint::linear(
            c - vec2(200.0, 0.0),
            c + vec2(200.0, 0.0),
            vec![
                GradientStop::new(0.0, Rgba::rgb(glowcore::derive::alpha(150.0 + 105.0 * energy_pulse), 200, 255)),
                GradientStop::new(0.5, Rgba::WHITE),
                GradientStop::new(1.0, Rgba::rgb(200, glowcore::derive::alpha(100.0 + 155.0 * energy_pulse), 255)),
            ],
        );
        canvas.text_at(c, Align2::CENTER_CENTER, &self.label, font, core.clone());

        for i in 0..5 {
            let y = c.y - 20.0 + i as f32 * 10.0;
            let alpha = glowcore::derive::alpha(100.0 + 100.0 * (wave * 2.0 + i as f32).sin());
            let reach = 150.0 + 50.0 * (wave + i as f32).sin();
            let line = Paint::linear(
                c - vec2(200.0, 0.0),
                c + vec2(200.0, 0.0),
                vec![
                    GradientStop::new(0.0, GlowColors::SKY.with_alpha(0)),
                    GradientStop::new(0.2, GlowColors::SKY.with_alpha(alpha)),
                    GradientStop::new(0.5, Rgba::WHITE.with_alpha(alpha)),
                    GradientStop::new(0.8, Rgba::rgba(100, 0, 255, alpha)),
                    GradientStop::new(1.0, Rgba::rgba(100, 0, 255, 0)),
                ],
            );
            canvas.line(pos2(c.x - reach, y), pos2(c.x + reach, y), &Pen::new(2.0, line));
        }

        canvas.text_in(
            centered_rect(c + vec2(0.0, 80.0), 500.0, 40.0),
            status_text(self.listening),
            FontSpec::sans(16.0).bold(),
            core,
        );
    }

    fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::rng::seeded;

    #[test]
    fn test_glow_alphas_non_increasing() {
        for step in 0..40 {
            let alphas = Quantum::glow_alphas(step as f32 * 0.157);
            assert_eq!(alphas.len(), GLOW_PASSES);
            assert!(alphas.windows(2).all(|w| w[0] >= w[1]));
            assert!(alphas[0] <= 200);
        }
    }

    #[test]
    fn test_particles_turn_back_at_edges() {
        let mut p = QuantumParticle {
            pos: pos2(99.5, 50.0),
            size: 3.0,
            speed: 1.0,
            heading: 0.0,
        };
        p.step(vec2(100.0, 100.0));
        assert!((p.heading - PI).abs() < 1e-6);
        p.step(vec2(100.0, 100.0));
        assert!(p.pos.x < 100.0);

        let mut p = QuantumParticle {
            heading: std::f32::consts::FRAC_PI_2,
            pos: pos2(50.0, 99.5),
            ..p
        };
        p.step(vec2(100.0, 100.0));
        assert!((p.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_particles_seeded() {
        let a = Quantum::new("Q", vec2(1000.0, 800.0), &mut seeded(3));
        let b = Quantum::new("Q", vec2(1000.0, 800.0), &mut seeded(3));
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.particles().len(), PARTICLES);
    }

    #[test]
    fn test_listening_switches_status() {
        let mut q = Quantum::new("Q", vec2(1000.0, 800.0), &mut seeded(3));
        assert_eq!(status_text(q.listening), "Processing reality...");
        q.set_listening(true);
        assert_eq!(status_text(q.listening), "Analyzing quantum data...");
    }
}
