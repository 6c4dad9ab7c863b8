//! matrix-hex — sparse terminal rain around nested hexagons and a fan of
//! faint rays

use crate::motifs::{hexagon, spokes, terminal_glyph, CaptionGlitch};
use egui::{pos2, Vec2};
use glowcore::scene::glyphs::{self, ScrambledText};
use glowcore::scene::rain::{RainConfig, RainField, Trail};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlitchText, GlowColors, Rgba, Scene, SceneRng};
use std::f32::consts::FRAC_PI_3;

const COLUMNS: usize = 30;
const RAYS: usize = 360;
const RAY_LENGTH: f32 = 300.0;

pub fn clock() -> Clock {
    Clock::new()
        .with_accumulator("time", 0.1)
        .with_phase("pulse", 0.05, Clock::TAU)
}

fn rain_config() -> RainConfig {
    RainConfig {
        charset: glyphs::alphanumeric(),
        line_height: 20.0,
        speed: (2.0, 5.0),
        length: (20, 20),
        spawn_y: (-500.0, 0.0),
        respawn_y: (-500.0, 0.0),
        brightness: (100.0 / 255.0, 1.0),
        mutation: 0.0,
        flash: 0.0,
        trail: Trail::Below,
    }
}

pub struct MatrixHex {
    label: String,
    rain: RainField,
    caption: CaptionGlitch,
    status: ScrambledText,
}

impl MatrixHex {
    pub fn new(label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            rain: RainField::scattered(COLUMNS, size.x, rain_config(), rng),
            caption: CaptionGlitch::new(5, 1.0, 0.0),
            status: ScrambledText::new(super::lightning::status_text(false), glyphs::upper_digits(), 0.1),
        }
    }
}

impl Scene for MatrixHex {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        self.rain.tick(frame.height(), rng);
        self.caption.tick(rng);
        self.status.tick(rng);
    }

    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.fill_background(&Paint::radial2(frame.center(), 400.0, Rgba::rgba(0, 20, 0, 30), Rgba::TRANSPARENT));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        self.rain.paint(canvas, FontSpec::mono(14.0), |column, i| terminal_glyph(column, i, 10.0));
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let time = frame.phase("time");
        let pen = Pen::new(2.0, GlowColors::MATRIX.with_alpha(100));
        for i in 0..3 {
            hexagon(canvas, c, 100.0 + i as f32 * 30.0, time + i as f32 * FRAC_PI_3, &pen, Some(3.0));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");

        let mut layers = self.caption.layers(pulse, GlowColors::MATRIX, GlowColors::MATRIX);
        layers.push((GlowColors::MINT, Vec2::ZERO));
        GlitchText {
            text: &self.label,
            anchor: c,
            font: FontSpec::mono(40.0).bold(),
            layers,
        }
        .paint(canvas);

        self.status.paint(canvas, pos2(c.x, c.y + 50.0), 10.0, FontSpec::mono(12.0), |_| {
            GlowColors::MATRIX.with_alpha(200)
        });

        let ray = Pen::new(1.0, GlowColors::MATRIX.with_alpha(20));
        spokes(canvas, c, RAYS, 0.0, 0.0, |_| RAY_LENGTH, &ray);
    }

    fn set_listening(&mut self, listening: bool) {
        self.status.set_text(super::lightning::status_text(listening));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use glowcore::record::{DrawCommand, RecordingSurface};
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_rain_columns() {
        let scene = MatrixHex::new("M", vec2(800.0, 600.0), &mut seeded(2));
        assert_eq!(scene.rain.columns().len(), COLUMNS);
        for column in scene.rain.columns() {
            assert_eq!(column.glyphs.len(), 20);
            assert!((0.0..=800.0).contains(&column.x));
        }
    }

    #[test]
    fn test_frame_has_rays_and_caption_core() {
        let mut rng = seeded(2);
        let scene = MatrixHex::new("Hex", vec2(800.0, 600.0), &mut rng);
        let mut state = AnimationState::new(clock(), Box::new(scene), rng, vec2(800.0, 600.0));
        state.tick();
        let mut surface = RecordingSurface::new(vec2(800.0, 600.0));
        state.paint_frame(&mut surface);

        let rays = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolyline { points, pen, .. }
                if points.len() == 2 && pen.width == 1.0))
            .count();
        assert_eq!(rays, RAYS);

        let captions: Vec<_> = surface.texts().into_iter().filter(|(t, _)| *t == "Hex").collect();
        assert_eq!(captions.len(), 6);
        assert_eq!(*captions[5].1, Paint::Solid(GlowColors::MINT));
    }
}
