//! matrix-storm — dense terminal rain under a standing storm of full
//! height lightning bolts

use crate::motifs::{hexagon, terminal_glyph, CaptionGlitch};
use egui::{pos2, Vec2};
use glowcore::rng::uniform_int;
use glowcore::scene::bolts::{bolt_path, Bolt};
use glowcore::scene::glyphs::{self, ScrambledText};
use glowcore::scene::rain::{RainConfig, RainField, Trail};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlitchText, GlowColors, Rgba, Scene, SceneRng};
use std::f32::consts::FRAC_PI_3;

const COLUMNS: usize = 50;
const BOLTS: usize = 5;
/// Bolt opacity lost per tick; a bolt also dies when it fades out.
const FADE_PER_TICK: f32 = 10.0;
const BOLT_COLOR: Rgba = Rgba::rgb(200, 255, 255);

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
        length: (30, 30),
        spawn_y: (-500.0, 0.0),
        respawn_y: (-500.0, 0.0),
        brightness: (100.0 / 255.0, 1.0),
        mutation: 0.0,
        flash: 0.0,
        trail: Trail::Below,
    }
}

/// Opacity of a storm bolt, fading with its age in ticks.
pub fn bolt_alpha(bolt: &Bolt) -> f32 {
    let age = bolt.max_life - bolt.life;
    (255.0 - age * FADE_PER_TICK).max(0.0)
}

fn storm_bolt(rng: &mut SceneRng, size: Vec2) -> Bolt {
    let (w, h) = (size.x as i32, size.y);
    let start = pos2(uniform_int(rng, 0, w) as f32, 0.0);
    let end = pos2(uniform_int(rng, 0, w) as f32, h);
    let path = bolt_path(rng, start, end, 50.0, (20.0, 60.0));
    Bolt::new(path, uniform_int(rng, 10, 30) as f32)
}

pub struct MatrixStorm {
    label: String,
    rain: RainField,
    bolts: Vec<Bolt>,
    caption: CaptionGlitch,
    status: ScrambledText,
}

impl MatrixStorm {
    pub fn new(label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            rain: RainField::scattered(COLUMNS, size.x, rain_config(), rng),
            bolts: (0..BOLTS).map(|_| storm_bolt(rng, size)).collect(),
            caption: CaptionGlitch::new(5, 2.0, 0.0),
            status: ScrambledText::new(super::lightning::status_text(false), glyphs::upper_digits(), 0.1),
        }
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }
}

impl Scene for MatrixStorm {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        self.rain.tick(frame.height(), rng);
        for bolt in &mut self.bolts {
            bolt.life -= 1.0;
            if bolt.is_dead() || bolt_alpha(bolt) <= 0.0 {
                *bolt = storm_bolt(rng, frame.size);
            }
        }
        self.caption.tick(rng);
        self.status.tick(rng);
    }

    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.fill_background(&Paint::radial2(frame.center(), 500.0, Rgba::rgba(0, 20, 0, 30), Rgba::TRANSPARENT));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        self.rain.paint(canvas, FontSpec::mono(14.0), |column, i| terminal_glyph(column, i, 8.0));
        for bolt in &self.bolts {
            let alpha = bolt_alpha(bolt);
            canvas.polyline(&bolt.points, false, &Pen::new(2.0, BOLT_COLOR.with_alpha_f(alpha)));
            if let Some(tip) = bolt.tip() {
                canvas.fill_circle(tip, 20.0, Paint::radial2(tip, 20.0, BOLT_COLOR.with_alpha_f(alpha), BOLT_COLOR.with_alpha(0)));
            }
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let time = frame.phase("time");
        let pen = Pen::new(2.0, GlowColors::MATRIX.with_alpha(100));
        for i in 0..5 {
            hexagon(canvas, c, 100.0 + i as f32 * 30.0, time + i as f32 * FRAC_PI_3, &pen, Some(3.0));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let mut layers = self.caption.layers(frame.phase("pulse"), GlowColors::MATRIX, GlowColors::MATRIX);
        layers.push((GlowColors::MINT, Vec2::ZERO));
        GlitchText {
            text: &self.label,
            anchor: c,
            font: FontSpec::mono(50.0).bold(),
            layers,
        }
        .paint(canvas);

        self.status.paint(canvas, pos2(c.x, c.y + 80.0), 14.0, FontSpec::mono(16.0), |_| {
            GlowColors::MATRIX.with_alpha(200)
        });
    }

    fn set_listening(&mut self, listening: bool) {
        self.status.set_text(super::lightning::status_text(listening));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use glowcore::rng::seeded;

    #[test]
    fn test_bolt_alpha_fades() {
        let mut bolt = Bolt::new(vec![pos2(0.0, 0.0)], 30.0);
        assert_eq!(bolt_alpha(&bolt), 255.0);
        bolt.life -= 5.0;
        assert_eq!(bolt_alpha(&bolt), 205.0);
        bolt.life -= 25.0;
        assert_eq!(bolt_alpha(&bolt), 0.0);
    }

    #[test]
    fn test_storm_keeps_five_live_bolts() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: vec2(1000.0, 800.0),
        };
        let mut rng = seeded(9);
        let mut storm = MatrixStorm::new("S", frame.size, &mut rng);
        for _ in 0..300 {
            storm.tick(&frame, &mut rng);
            assert_eq!(storm.bolts().len(), BOLTS);
            for bolt in storm.bolts() {
                assert!(!bolt.is_dead());
                assert!(bolt_alpha(bolt) > 0.0);
                assert!((10.0..=30.0).contains(&bolt.max_life));
                // every bolt spans the full height
                assert_eq!(bolt.points[0].y, 0.0);
                assert_eq!(bolt.tip().unwrap().y, 800.0);
            }
        }
    }
}
