//! crystal — orbiting hexagonal crystals around a pulsing core

use egui::{vec2, Pos2, Vec2};
use glowcore::derive::{self, orbit, radians};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowText, Rgba, Scene, SceneRng};

const ORBITERS: usize = 6;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 1.0, 360.0)
        .with_phase("crystal", 0.08, Clock::TAU)
        .with_phase("magic", 0.05, Clock::TAU)
}

/// Gradient-filled hexagon with a lilac outline. `rotation_deg` turns the
/// first vertex.
fn crystal(canvas: &mut Canvas<'_>, center: Pos2, size: f32, rotation_deg: f32, glow: f32) {
    let points = derive::polygon(center, size, 6, radians(rotation_deg));
    let fill = Paint::radial2(
        center,
        size,
        Rgba::rgb(200, 100, 255).with_alpha_f(200.0 * glow),
        Rgba::rgb(100, 0, 150).with_alpha_f(100.0 * glow),
    );
    canvas.fill_polygon(&points, &fill);
    canvas.polyline(&points, true, &Pen::new(2.0, Rgba::rgba(220, 180, 255, 150)));
}

pub struct Crystal {
    label: String,
}

impl Crystal {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for Crystal {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        canvas.fill_circle(c, 300.0, Paint::radial2(c, 300.0, Rgba::rgba(60, 0, 100, 30), Rgba::TRANSPARENT));
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = frame.phase("crystal");
        let magic = frame.phase("magic");
        let glow = derive::abs_pulse(pulse);
        let step = 360.0 / ORBITERS as f32;

        for i in 0..ORBITERS {
            let a = angle + i as f32 * step;
            let wobble = (pulse + i as f32).sin();
            let radius = 150.0 + wobble * 20.0;
            let p = orbit(c, radius, radians(a));
            crystal(canvas, p, 30.0 + wobble * 5.0, a, glow);
            if i > 0 {
                let prev = orbit(c, radius, radians(a - step));
                canvas.line(prev, p, &Pen::new(2.0, Rgba::rgba(180, 100, 255, 100)));
            }
        }

        crystal(canvas, c, 50.0 + pulse.sin() * 10.0, angle * 2.0, glow);

        for i in 0..20 {
            let fi = i as f32;
            let p = orbit(c, 100.0 + 50.0 * (magic + fi).sin(), radians(angle * 3.0 + fi * 18.0));
            canvas.fill_circle(p, 3.0 + (pulse + fi).sin() * 2.0, Rgba::rgba(220, 180, 255, 150));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        GlowText::new(&self.label, frame.center(), FontSpec::sans(35.0).bold(), Rgba::rgb(180, 0, 255))
            .drift(vec2(0.0, -0.5))
            .core(Rgba::WHITE)
            .paint(canvas);
    }
}
