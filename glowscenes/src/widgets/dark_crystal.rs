//! dark-crystal — a rotating red diamond with a watching eye at its heart,
//! circled by pulsing energy orbs
//!
//! Everything scales with `min(w, h) / 800`. The caption below the crystal
//! fades in and out with the slow half-rate pulse.

use egui::{pos2, vec2, Pos2, Vec2};
use glowcore::derive::{orbit, radians, rotate};
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, Rgba, Scene, SceneRng};

const ORBS: usize = 12;
const CRYSTAL: Rgba = Rgba::rgb(150, 0, 0);
const SHADOW: Rgba = Rgba::rgb(20, 0, 0);
const GLOW: Rgba = Rgba::rgb(255, 0, 0);
/// Diamond corners before rotation: top, right, bottom, left.
const DIAMOND: [Vec2; 4] = [
    Vec2::new(0.0, -200.0),
    Vec2::new(100.0, 0.0),
    Vec2::new(0.0, 200.0),
    Vec2::new(-100.0, 0.0),
];

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 0.5, 360.0)
        .with_phase("pulse", 0.05, Clock::TAU)
        .with_phase("eye", 0.03, Clock::TAU)
        .with_phase("rotation", -0.02, Clock::TAU)
}

pub fn scale(size: Vec2) -> f32 {
    size.x.min(size.y) / 800.0
}

pub fn crystal_glow(pulse: f32) -> f32 {
    pulse.sin().abs() * 0.8
}

/// Caption visibility in 0..=1.
pub fn darkness(pulse: f32) -> f32 {
    ((pulse * 0.5).sin() + 1.0) * 0.5
}

pub fn diamond(center: Pos2, rotation: f32, scale: f32) -> [Pos2; 4] {
    DIAMOND.map(|v| center + rotate(v, rotation) * scale)
}

pub struct DarkCrystal {
    label: String,
}

impl DarkCrystal {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }

    fn eye(&self, canvas: &mut Canvas<'_>, c: Pos2, scale: f32, eye_phase: f32) {
        let eye = 40.0 * scale;
        let iris = Paint::radial(
            c,
            eye,
            vec![
                GradientStop::new(0.0, GLOW.with_alpha_f(200.0 + 55.0 * eye_phase.sin())),
                GradientStop::new(0.5, Rgba::rgb(100, 0, 0)),
                GradientStop::new(1.0, Rgba::rgb(50, 0, 0)),
            ],
        );
        canvas.fill_circle(c, eye, iris);

        let pupil = eye * 0.4;
        canvas.fill_circle(c, pupil, Paint::radial2(c, pupil, Rgba::BLACK, SHADOW));

        let highlight = c - Vec2::splat(pupil * 0.3);
        canvas.fill_circle(highlight, pupil * 0.3, Rgba::rgba(255, 255, 255, 150));
    }
}

impl Scene for DarkCrystal {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let s = scale(frame.size);
        let radius = 250.0 * s;
        let glow = GLOW.with_alpha_f(100.0 * crystal_glow(frame.phase("pulse")));
        canvas.fill_circle(c, radius, Paint::radial2(c, radius, glow, GLOW.with_alpha(0)));
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let s = scale(frame.size);
        let pulse = frame.phase("pulse");

        let [top, right, bottom, left] = diamond(c, frame.phase("rotation"), s);
        let body = Paint::linear(
            pos2(left.x, top.y),
            pos2(right.x, bottom.y),
            vec![
                GradientStop::new(0.0, CRYSTAL),
                GradientStop::new(0.5, SHADOW),
                GradientStop::new(1.0, CRYSTAL),
            ],
        );
        let outline = [top, right, bottom, left];
        canvas.fill_polygon(&outline, &body);
        canvas.polyline(&outline, true, &Pen::new(2.0 * s, Rgba::rgb(100, 0, 0)));

        self.eye(canvas, c, s, frame.phase("eye"));

        let angle = frame.phase("angle");
        for i in 0..ORBS {
            let p = orbit(c, 150.0 * s, radians(angle + i as f32 * 30.0));
            let strength = GLOW.with_alpha_f(200.0 * (pulse + i as f32).sin().abs());
            let r = 20.0 * s;
            canvas.fill_circle(p, r, Paint::radial2(p, r, strength, GLOW.with_alpha(0)));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let s = scale(frame.size);
        let c = frame.center();
        let color = CRYSTAL.with_alpha_f(255.0 * darkness(frame.phase("pulse")));
        canvas.text_in(
            egui::Rect::from_min_size(pos2(0.0, c.y + 250.0 * s), vec2(frame.width(), 40.0 * s)),
            &self.label,
            FontSpec::sans(20.0 * s).bold(),
            color,
        );
    }
}
