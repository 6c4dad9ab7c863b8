//! pulse-network — indigo network rings over a drifting grid, with a
//! digital pulse expanding from the centre

use crate::motifs::centered_rect;
use egui::{pos2, vec2, Pos2, Vec2};
use glowcore::derive::{radians, ring_position};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowText, Rgba, Scene, SceneRng};

const INDIGO: Rgba = Rgba::rgb(75, 0, 130);
const GRID_SPACING: f32 = 20.0;
/// Frames of one pulse expansion.
const PULSE_SPAN: f32 = 300.0;
const PULSE_RADIUS: f32 = 250.0;
const WAVE_POINTS: usize = 120;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("wave", 0.07, Clock::TAU)
        .with_phase("ring", 1.5, 360.0)
        .with_phase("pulse", 0.04, Clock::TAU)
        .with_phase("expansion", 2.0, PULSE_SPAN)
        .with_phase("grid", 0.5, GRID_SPACING)
}

pub fn status_text(listening: bool) -> &'static str {
    if listening {
        "Listening..."
    } else {
        "Responding..."
    }
}

/// Radius and opacity of the expanding pulse.
pub fn digital_pulse(expansion: f32) -> (f32, f32) {
    let progress = expansion / PULSE_SPAN;
    (progress * PULSE_RADIUS, (150.0 - progress * 150.0).max(0.0))
}

/// Nodes of one network ring; each node links to the one opposite it.
pub fn ring_nodes(center: Pos2, radius: f32, count: usize, rotation_deg: f32) -> Vec<Pos2> {
    (0..count)
        .map(|i| ring_position(center, radius, i, count, radians(rotation_deg)))
        .collect()
}

pub struct PulseNetwork {
    label: String,
    listening: bool,
    energy: f32,
}

impl PulseNetwork {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            listening: false,
            energy: 0.7,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }
}

impl Scene for PulseNetwork {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let offset = frame.phase("grid");
        let pen = Pen::new(1.0, INDIGO.with_alpha(25));
        let (w, h) = (frame.width(), frame.height());
        let mut x = offset;
        while x <= w {
            canvas.line(pos2(x, 0.0), pos2(x, h), &pen);
            x += GRID_SPACING;
        }
        let mut y = offset;
        while y <= h {
            canvas.line(pos2(0.0, y), pos2(w, y), &pen);
            y += GRID_SPACING;
        }

        let c = frame.center();
        let (radius, opacity) = digital_pulse(frame.phase("expansion"));
        if radius > 0.0 {
            let glow = Paint::radial2(c, radius, INDIGO.with_alpha_f(opacity), INDIGO.with_alpha(0));
            canvas.fill_circle(c, radius, glow);
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let rotation = frame.phase("ring");
        let link = Pen::new(2.0, INDIGO.with_alpha(150));
        for i in 1..4 {
            let count = 24 + i * 4;
            let nodes = ring_nodes(c, 80.0 + i as f32 * 40.0, count, rotation);
            for node in &nodes {
                canvas.fill_circle(*node, 4.0, INDIGO.with_alpha(200));
            }
            for (j, node) in nodes.iter().enumerate() {
                canvas.line(*node, nodes[(j + count / 2) % count], &link);
            }
        }

        if !self.listening {
            let wave = frame.phase("wave");
            let width = frame.width() * 0.7;
            let height = 40.0 * self.energy;
            let pen = Pen::new(3.0, INDIGO.with_alpha(180));
            let sample = |i: usize| {
                let x = c.x - width / 2.0 + i as f32 * (width / WAVE_POINTS as f32);
                (x, height * (wave * 2.0 + i as f32 * 0.3).sin())
            };
            let mut prev = sample(0);
            for i in 1..WAVE_POINTS {
                let (x, dy) = sample(i);
                canvas.line(pos2(prev.0, c.y - 120.0 + prev.1), pos2(x, c.y - 120.0 + dy), &pen);
                canvas.line(pos2(prev.0, c.y + 120.0 - prev.1), pos2(x, c.y + 120.0 - dy), &pen);
                prev = (x, dy);
            }
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        GlowText::new(&self.label, c - vec2(0.0, 15.0), FontSpec::mono(36.0).bold(), INDIGO)
            .passes(8)
            .drift(vec2(0.0, -1.5))
            .core(Rgba::WHITE)
            .paint(canvas);
        canvas.text_in(
            centered_rect(c + vec2(0.0, 45.0), 200.0, 30.0),
            status_text(self.listening),
            FontSpec::mono(12.0).bold(),
            Rgba::WHITE,
        );
    }

    fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
        self.energy = if listening { 0.3 } else { 0.8 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::rng::seeded;

    #[test]
    fn test_pulse_fades_as_it_grows() {
        assert_eq!(digital_pulse(0.0), (0.0, 150.0));
        let (r, a) = digital_pulse(150.0);
        assert_eq!(r, 125.0);
        assert_eq!(a, 75.0);
        let (r, a) = digital_pulse(PULSE_SPAN);
        assert_eq!(r, PULSE_RADIUS);
        assert_eq!(a, 0.0);
    }

    #[test]
    fn test_ring_nodes_evenly_spaced() {
        let nodes = ring_nodes(pos2(0.0, 0.0), 100.0, 28, 0.0);
        assert_eq!(nodes.len(), 28);
        assert!((nodes[0] - pos2(100.0, 0.0)).length() < 1e-3);
        // the link partner sits across the ring
        assert!((nodes[14] - pos2(-100.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_listening_lowers_energy() {
        let mut scene = PulseNetwork::new("Deck", vec2(1920.0, 1080.0), &mut seeded(0));
        assert_eq!(scene.energy(), 0.7);
        scene.set_listening(true);
        assert_eq!(scene.energy(), 0.3);
        scene.set_listening(false);
        assert_eq!(scene.energy(), 0.8);
    }

    #[test]
    fn test_glow_passes() {
        let glow = GlowText::new("x", pos2(0.0, 0.0), FontSpec::mono(36.0), INDIGO).passes(8);
        assert_eq!(glow.pass_alphas(), vec![120, 105, 90, 75, 60, 45, 30, 15]);
    }
}
