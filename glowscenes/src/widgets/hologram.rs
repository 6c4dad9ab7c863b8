//! hologram — a spinning wireframe globe inside a shimmering grid, swept
//! by a horizontal scan line

use crate::motifs::{centered_rect, wavy_grid};
use egui::{pos2, vec2, Rect, Vec2};
use glowcore::derive::{alpha, radians, ring_position};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlitchText, GlowColors, Rgba, Scene, SceneRng};
use std::f32::consts::PI;

const SLICES: usize = 20;
const DATA_POINTS: usize = 36;
const GRID_LINES: usize = 20;
const HOLO_HALF: f32 = 200.0;
const SCAN_SPEED: f32 = 2.0;
const CAPTION_PASSES: usize = 5;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("rotation", 1.0, 360.0)
        .with_phase("wave", 0.1, Clock::TAU)
}

pub fn status_text(listening: bool) -> &'static str {
    if listening {
        "SCANNING..."
    } else {
        "ANALYZING..."
    }
}

/// Horizontal squash and vertical offset of globe slice `i`.
pub fn slice(rotation_deg: f32, i: usize) -> (f32, f32) {
    let angle = radians(rotation_deg) + i as f32 * PI / SLICES as f32;
    (angle.cos().abs(), 15.0 * angle.sin())
}

/// Caption distortion passes: opacity and vertical jitter follow the wave.
pub fn caption_layers(wave: f32) -> Vec<(Rgba, Vec2)> {
    (0..CAPTION_PASSES)
        .map(|i| {
            let s = (wave + i as f32).sin();
            (GlowColors::SKY.with_alpha(alpha(150.0 + 100.0 * s)), vec2(0.0, 2.0 * s))
        })
        .collect()
}

pub struct Hologram {
    label: String,
    scan: f32,
    listening: bool,
}

impl Hologram {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            scan: 0.0,
            listening: false,
        }
    }

    pub fn scan_line(&self) -> f32 {
        self.scan
    }
}

impl Scene for Hologram {
    fn tick(&mut self, frame: &Frame<'_>, _rng: &mut SceneRng) {
        let height = frame.height().max(1.0);
        self.scan = (self.scan + SCAN_SPEED) % height;
    }

    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.fill_background(&Paint::radial2(frame.center(), 400.0, Rgba::rgba(0, 40, 60, 30), Rgba::TRANSPARENT));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let rotation = frame.phase("rotation");
        for i in 0..SLICES {
            let (squash, dy) = slice(rotation, i);
            let pen = Pen::new(2.0, GlowColors::SKY.with_alpha_f(100.0 * squash));
            canvas.ellipse(c + vec2(0.0, dy), 150.0 * squash, 150.0, None, Some(&pen));
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let wave = frame.phase("wave");
        let rotation = radians(frame.phase("rotation"));
        let mut prev = None;
        for i in 0..DATA_POINTS {
            let p = ring_position(c, 120.0, i, DATA_POINTS, rotation);
            let s = (wave + i as f32).sin();
            let opacity = alpha(100.0 + 100.0 * s.abs());
            canvas.fill_circle(p, 3.0 + 2.0 * s, GlowColors::SKY.with_alpha(opacity));
            if let Some(from) = prev {
                canvas.line(from, p, &Pen::new(1.0, GlowColors::SKY.with_alpha(opacity / 2)));
            }
            prev = Some(p);
        }

        let holo = Rect::from_center_size(c, Vec2::splat(HOLO_HALF * 2.0));
        let sweep = Paint::radial2(holo.center(), HOLO_HALF, GlowColors::SKY.with_alpha(50), GlowColors::SKY.with_alpha(0));
        canvas.fill_rect(Rect::from_min_size(pos2(holo.left(), self.scan - 2.0), vec2(holo.width(), 4.0)), &sweep);

        wavy_grid(canvas, holo, GRID_LINES, wave, 5.0, &Pen::new(1.0, GlowColors::SKY.with_alpha(30)));
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let wave = frame.phase("wave");
        GlitchText {
            text: &self.label,
            anchor: c,
            font: FontSpec::sans(40.0).bold(),
            layers: caption_layers(wave),
        }
        .paint(canvas);

        let bob = 5.0 * (wave * 2.0).sin();
        canvas.text_in(
            centered_rect(c + vec2(0.0, 55.0 + bob), 200.0, 30.0),
            status_text(self.listening),
            FontSpec::sans(12.0).bold(),
            GlowColors::SKY.with_alpha(200),
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
    fn test_slices_face_the_viewer_in_turn() {
        let (squash, dy) = slice(0.0, 0);
        assert_eq!(squash, 1.0);
        assert_eq!(dy, 0.0);
        // halfway round the globe the slice is seen edge-on
        let (squash, dy) = slice(0.0, SLICES / 2);
        assert!(squash < 1e-5);
        assert!((dy - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_scan_line_wraps_at_height() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: vec2(800.0, 600.0),
        };
        let mut rng = seeded(0);
        let mut holo = Hologram::new("H", frame.size, &mut rng);
        for _ in 0..299 {
            holo.tick(&frame, &mut rng);
        }
        assert_eq!(holo.scan_line(), 598.0);
        holo.tick(&frame, &mut rng);
        assert_eq!(holo.scan_line(), 0.0);
    }

    #[test]
    fn test_caption_layers() {
        let layers = caption_layers(0.0);
        assert_eq!(layers.len(), CAPTION_PASSES);
        assert_eq!(layers[0], (GlowColors::SKY.with_alpha(150), vec2(0.0, 0.0)));
        assert!(layers.iter().all(|(_, offset)| offset.y.abs() <= 2.0));
    }

    #[test]
    fn test_status_follows_listening() {
        let mut holo = Hologram::new("H", vec2(800.0, 600.0), &mut seeded(0));
        assert_eq!(status_text(holo.listening), "ANALYZING...");
        holo.set_listening(true);
        assert_eq!(status_text(holo.listening), "SCANNING...");
    }
}
