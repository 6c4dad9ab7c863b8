//! matrix — full-screen digital rain behind a glitching caption

use egui::{pos2, Vec2};
use glowcore::glow::GlitchText;
use glowcore::scene::glyphs::{self, jitter, ScrambledText};
use glowcore::scene::rain::{RainColumn, RainConfig, RainField, Trail};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowColors, Rgba, Scene, SceneRng};

const SPACING: f32 = 25.0;
const CAPTION_PASSES: usize = 5;

pub fn clock() -> Clock {
    Clock::new()
        .with_accumulator("time", 0.1)
        .with_phase("pulse", 0.05, Clock::TAU)
}

fn rain_config() -> RainConfig {
    RainConfig {
        charset: glyphs::matrix(),
        line_height: 20.0,
        speed: (3.0, 10.0),
        length: (15, 30),
        spawn_y: (-1000.0, 0.0),
        respawn_y: (-500.0, 0.0),
        brightness: (0.5, 1.0),
        mutation: 0.05,
        flash: 0.01,
        trail: Trail::Above,
    }
}

/// Head and flashing glyphs are pale, the tail fades to dark green.
pub fn glyph_color(column: &RainColumn, index: usize) -> Rgba {
    let b = column.brightness;
    if index == 0 || column.flash == Some(index) {
        return GlowColors::MINT.with_alpha_f(255.0 * b);
    }
    let fade = 1.0 - index as f32 / column.glyphs.len() as f32;
    Rgba::rgb(0, glowcore::derive::alpha(180.0 * fade * b), 0).with_alpha_f(255.0 * fade * b)
}

pub fn status_text(listening: bool) -> &'static str {
    if listening {
        "SCANNING..."
    } else {
        "ANALYZING..."
    }
}

pub struct Matrix {
    label: String,
    rain: RainField,
    status: ScrambledText,
    caption_jitter: Vec<egui::Vec2>,
}

impl Matrix {
    pub fn new(label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            rain: RainField::evenly_spaced(size.x, SPACING, rain_config(), rng),
            status: ScrambledText::new(status_text(false), glyphs::matrix(), 0.05),
            caption_jitter: vec![egui::Vec2::ZERO; CAPTION_PASSES],
        }
    }
}

impl Scene for Matrix {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        self.rain.tick(frame.height(), rng);
        self.status.tick(rng);
        self.caption_jitter = jitter(rng, CAPTION_PASSES, 0.1, 2.0);
    }

    fn background(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        canvas.fill_background(&Paint::Solid(Rgba::rgba(0, 0, 0, 200)));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        self.rain.paint(canvas, FontSpec::mono(14.0), glyph_color);
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let radius = 150.0 + frame.phase("pulse").sin() * 10.0;
        for i in 0..3u8 {
            let pen = Pen::new(2.0, GlowColors::MATRIX.with_alpha(100 - i * 30));
            canvas.stroke_circle(c, radius + i as f32 * 20.0, &pen);
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        let layers = self
            .caption_jitter
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let alpha = 200.0 + 55.0 * (pulse + i as f32).sin();
                (GlowColors::MATRIX.with_alpha_f(alpha), *offset)
            })
            .collect();
        GlitchText {
            text: &self.label,
            anchor: c,
            font: FontSpec::mono(40.0).bold(),
            layers,
        }
        .paint(canvas);

        self.status.paint(canvas, pos2(c.x, c.y + 50.0), 10.0, FontSpec::mono(12.0).bold(), |i| {
            GlowColors::MATRIX.with_alpha_f(200.0 + 55.0 * (pulse + i as f32 * 0.5).sin())
        });
    }

    fn set_listening(&mut self, listening: bool) {
        self.status.set_text(status_text(listening));
    }

    fn resize(&mut self, size: Vec2, rng: &mut SceneRng) {
        self.rain.respread(size.x, SPACING, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use glowcore::rng::seeded;

    #[test]
    fn test_columns_cover_width() {
        let m = Matrix::new("M", vec2(1000.0, 800.0), &mut seeded(1));
        assert_eq!(m.rain.columns().len(), 40);
        assert_eq!(m.rain.columns()[1].x, 25.0);
    }

    #[test]
    fn test_glyph_colors() {
        let column = RainColumn {
            x: 0.0,
            y: 0.0,
            speed: 1.0,
            glyphs: vec!['a'; 10],
            brightness: 1.0,
            flash: Some(5),
        };
        assert_eq!(glyph_color(&column, 0), GlowColors::MINT);
        assert_eq!(glyph_color(&column, 5), GlowColors::MINT);
        let tail = glyph_color(&column, 9);
        assert_eq!(tail, Rgba::rgba(0, 18, 0, 25));
    }

    #[test]
    fn test_listening_changes_status() {
        let mut m = Matrix::new("M", vec2(400.0, 400.0), &mut seeded(1));
        assert_eq!(m.status.shown(), "ANALYZING...");
        m.set_listening(true);
        assert_eq!(m.status.shown(), "SCANNING...");
    }

    #[test]
    fn test_resize_respreads_columns() {
        let mut rng = seeded(1);
        let mut m = Matrix::new("M", vec2(400.0, 400.0), &mut rng);
        m.resize(vec2(1000.0, 400.0), &mut rng);
        assert_eq!(m.rain.columns().len(), 40);
    }
}
