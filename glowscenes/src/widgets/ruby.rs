//! ruby — a slowly turning blood-red crystal with a drop shadow, a dark
//! breathing aura and a swarm of glowing motes

use egui::{vec2, Pos2, Vec2};
use glowcore::derive::{orbit, ring_angle, rotate};
use glowcore::surface::{GradientStop, Paint};
use glowcore::{Canvas, Clock, Frame, Rgba, Scene, SceneRng};

const VERTICES: usize = 8;
const MOTES: usize = 50;
const SHADOW_OFFSET: f32 = 10.0;
/// Mote energy while speaking; listening dims them.
const SPEAKING_ENERGY: f32 = 0.5;
const LISTENING_ENERGY: f32 = 0.3;

pub fn clock() -> Clock {
    Clock::new()
        .with_accumulator("time", 0.05)
        .with_accumulator("spin", 0.01)
        .with_phase("inner", 0.03, Clock::TAU)
}

/// Irregular outline of the crystal, relative to its centre.
pub fn crystal_outline() -> Vec<Vec2> {
    (0..VERTICES)
        .map(|i| {
            let angle = ring_angle(i, VERTICES, 0.0);
            let radius = 100.0 + 20.0 * (i as f32 * 1.5).sin();
            vec2(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Aura darkness, swinging between 0.4 and 1.0.
pub fn shadow_intensity(time: f32) -> f32 {
    0.7 + 0.3 * (time * 0.5).sin()
}

pub struct Ruby {
    outline: Vec<Vec2>,
    energy: f32,
}

impl Ruby {
    pub fn new(_label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self {
            outline: crystal_outline(),
            energy: SPEAKING_ENERGY,
        }
    }

    fn crystal(&self, center: Pos2, spin: f32) -> Vec<Pos2> {
        self.outline.iter().map(|v| center + rotate(*v, spin)).collect()
    }
}

impl Scene for Ruby {
    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        canvas.fill_background(&Paint::radial2(c, 400.0, Rgba::rgba(20, 0, 0, 200), Rgba::BLACK));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let intensity = shadow_intensity(frame.phase("time"));
        for i in 0..3 {
            let radius = 200.0 + i as f32 * 30.0;
            let opacity = 100.0 * (1.0 - i as f32 / 3.0) * intensity;
            let aura = Paint::radial2(c, radius, Rgba::rgba(100, 0, 0, 0).with_alpha_f(opacity), Rgba::TRANSPARENT);
            canvas.fill_background(&aura);
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let crystal = self.crystal(c, frame.phase("spin"));

        let shadow: Vec<Pos2> = crystal.iter().map(|p| *p + Vec2::splat(SHADOW_OFFSET)).collect();
        canvas.fill_polygon(&shadow, &Paint::Solid(Rgba::rgba(0, 0, 0, 100)));

        let body = Paint::linear(
            c - Vec2::splat(100.0),
            c + Vec2::splat(100.0),
            vec![
                GradientStop::new(0.0, Rgba::rgb(180, 0, 0)),
                GradientStop::new(0.5, Rgba::rgba(120, 0, 0, 200)),
                GradientStop::new(1.0, Rgba::rgb(80, 0, 0)),
            ],
        );
        canvas.fill_polygon(&crystal, &body);

        let glow = Rgba::rgba(255, 0, 0, 0).with_alpha_f(100.0 + 50.0 * frame.phase("inner").sin());
        canvas.fill_polygon(&crystal, &Paint::radial2(c, 150.0, glow, Rgba::rgba(100, 0, 0, 0)));

        let time = frame.phase("time");
        let dim = self.energy / SPEAKING_ENERGY;
        for i in 0..MOTES {
            let fi = i as f32;
            let radius = 150.0 + 30.0 * (time * 3.0 + fi).sin();
            let p = orbit(c, radius, ring_angle(i, MOTES, time * 2.0));
            let size = 3.0 + 2.0 * (time + fi).sin();
            let opacity = 200.0 * (0.5 + 0.5 * (time * 2.0 + fi).sin()) * dim;
            let mote = Paint::radial2(p, size * 2.0, Rgba::rgba(255, 0, 0, 0).with_alpha_f(opacity), Rgba::rgba(100, 0, 0, 0));
            canvas.fill_circle(p, size, mote);
        }
    }

    fn set_listening(&mut self, listening: bool) {
        self.energy = if listening { LISTENING_ENERGY } else { SPEAKING_ENERGY };
    }
}
