//! virtual — a clean sky-blue node ring around a white core, with
//! radiating beams and a shadowed caption
//!
//! All radii follow `min(w, h) * 0.35`, so the widget fits whatever share
//! of the screen the host gives it.

use crate::motifs::{centered_rect, spokes};
use egui::{vec2, Pos2, Vec2};
use glowcore::derive::{orbit, ring_angle};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, Rgba, Scene, SceneRng};

const NODES: usize = 12;
const BEAMS: usize = 8;
const SHADOW_OFFSET: f32 = 2.0;
const LINK: Rgba = Rgba::rgba(0, 190, 255, 200);
const BEAM: Rgba = Rgba::rgba(0, 255, 255, 180);

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 2.0, 360.0)
        .with_phase("pulse", 0.1, Clock::TAU)
        .with_accumulator("phase", 0.02)
}

pub fn base_radius(size: Vec2) -> f32 {
    size.x.min(size.y) * 0.35
}

/// Ring nodes, each breathing in and out by up to 12 px.
pub fn nodes(center: Pos2, base: f32, angle_deg: f32, pulse: f32) -> Vec<Pos2> {
    (0..NODES)
        .map(|i| {
            let r = base + 12.0 * (pulse + i as f32).sin();
            orbit(center, r, ring_angle(i, NODES, angle_deg.to_radians()))
        })
        .collect()
}

pub struct VirtualAssistant {
    label: String,
}

impl VirtualAssistant {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for VirtualAssistant {
    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let base = base_radius(frame.size);
        let pulse = frame.phase("pulse");

        let ring = nodes(c, base, frame.phase("angle"), pulse);
        for (i, p) in ring.iter().enumerate() {
            let glow = Paint::radial2(*p, 10.0, Rgba::rgba(0, 210, 255, 240), Rgba::rgba(0, 150, 230, 0));
            canvas.fill_circle(*p, 6.0 + (pulse + i as f32).sin(), glow);
        }
        canvas.polyline(&ring, true, &Pen::new(1.0, LINK));

        let core = 20.0 + 5.0 * (pulse * 2.0).sin();
        canvas.fill_circle(c, core, Paint::radial2(c, core, Rgba::rgba(255, 255, 255, 250), Rgba::rgba(180, 180, 180, 0)));
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let font = FontSpec::sans(24.0).bold();
        canvas.text_in(
            centered_rect(c + Vec2::splat(SHADOW_OFFSET), 400.0, 80.0),
            &self.label,
            font,
            Rgba::rgba(0, 0, 0, 120),
        );
        canvas.text_in(centered_rect(c, 400.0, 80.0), &self.label, font, Rgba::rgba(0, 190, 255, 230));

        let base = base_radius(frame.size);
        let half = base * 0.5;
        let ring = half + half * (frame.phase("pulse") * 3.0).sin().abs();
        canvas.stroke_circle(c, ring, &Pen::new(2.0, Rgba::rgba(0, 255, 255, 150)));

        let phase = frame.phase("phase");
        spokes(
            canvas,
            c,
            BEAMS,
            phase,
            0.0,
            |i| half + half * (phase * 2.0 + i as f32).sin().abs(),
            &Pen::new(2.0, BEAM),
        );
    }
}
