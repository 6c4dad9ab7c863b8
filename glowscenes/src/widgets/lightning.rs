//! lightning — terminal rain with short-lived bolts striking the centre
//! and an energy gauge under the caption

use crate::motifs::{centered_rect, hexagon, terminal_glyph, CaptionGlitch};
use egui::{pos2, vec2, Rect, Vec2};
use glowcore::rng::{chance, uniform_int};
use glowcore::scene::bolts::{bolt_path, decay, Bolt};
use glowcore::scene::glyphs::{self, ScrambledText};
use glowcore::scene::rain::{RainConfig, RainField, Trail};
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlitchText, GlowColors, Rgba, Scene, SceneRng};
use std::f32::consts::FRAC_PI_3;

const COLUMNS: usize = 40;
const MAX_BOLTS: usize = 3;
const BOLT_CHANCE: f32 = 0.1;
const BOLT_LIFE: f32 = 5.0;
const BOLT_DECAY: f32 = 0.2;

pub fn clock() -> Clock {
    Clock::new()
        .with_accumulator("time", 0.1)
        .with_phase("pulse", 0.05, Clock::TAU)
}

fn rain_config() -> RainConfig {
    RainConfig {
        charset: glyphs::alphanumeric(),
        line_height: 20.0,
        speed: (2.0, 6.0),
        length: (25, 25),
        spawn_y: (-500.0, 0.0),
        respawn_y: (-500.0, 0.0),
        brightness: (100.0 / 255.0, 1.0),
        mutation: 0.0,
        flash: 0.0,
        trail: Trail::Below,
    }
}

/// Gauge fill in `0..=1`, a slow breath over the accumulated time.
pub fn energy(time: f32) -> f32 {
    ((time * 0.5).sin() + 1.0) / 2.0
}

pub fn status_text(listening: bool) -> &'static str {
    if listening {
        "SCANNING..."
    } else {
        "PROCESSING..."
    }
}

pub struct Lightning {
    label: String,
    rain: RainField,
    bolts: Vec<Bolt>,
    caption: CaptionGlitch,
    status: ScrambledText,
}

impl Lightning {
    pub fn new(label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            rain: RainField::scattered(COLUMNS, size.x, rain_config(), rng),
            bolts: Vec::new(),
            caption: CaptionGlitch::new(5, 2.0, 0.1),
            status: ScrambledText::new(status_text(false), glyphs::upper_digits(), 0.1),
        }
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    fn strike(&mut self, size: Vec2, rng: &mut SceneRng) {
        let (w, h) = (size.x as i32, size.y as i32);
        let start = pos2(uniform_int(rng, 0, w) as f32, 0.0);
        let end = pos2(
            (w / 2 + uniform_int(rng, -100, 100)) as f32,
            (h / 2 + uniform_int(rng, -100, 100)) as f32,
        );
        let path = bolt_path(rng, start, end, 30.0, (20.0, 40.0));
        tracing::trace!(segments = path.len(), "bolt struck");
        self.bolts.push(Bolt::new(path, BOLT_LIFE));
    }
}

impl Scene for Lightning {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        self.rain.tick(frame.height(), rng);
        if self.bolts.len() < MAX_BOLTS && chance(rng, BOLT_CHANCE) {
            self.strike(frame.size, rng);
        }
        decay(&mut self.bolts, BOLT_DECAY);
        self.caption.tick(rng);
        self.status.tick(rng);
    }

    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let glow = Paint::radial(
            frame.center(),
            400.0,
            vec![
                GradientStop::new(0.0, Rgba::rgba(0, 30, 30, 40)),
                GradientStop::new(0.5, Rgba::rgba(0, 20, 20, 30)),
                GradientStop::new(1.0, Rgba::rgba(0, 0, 0, 20)),
            ],
        );
        canvas.fill_background(&glow);
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        self.rain.paint(canvas, FontSpec::mono(14.0), |column, i| terminal_glyph(column, i, 10.0));
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let time = frame.phase("time");
        let pulse = frame.phase("pulse");

        for i in 0..3 {
            let radius = 150.0 + i as f32 * 30.0 + (pulse + i as f32).sin() * 10.0;
            let halo = Paint::radial(
                c,
                radius,
                vec![
                    GradientStop::new(0.0, GlowColors::MATRIX.with_alpha(0)),
                    GradientStop::new(0.8, GlowColors::MATRIX.with_alpha(30)),
                    GradientStop::new(1.0, GlowColors::MATRIX.with_alpha(0)),
                ],
            );
            canvas.fill_circle(c, radius, halo);
        }

        let pen = Pen::new(2.0, GlowColors::MATRIX.with_alpha(100));
        for i in 0..3 {
            hexagon(canvas, c, 100.0 + i as f32 * 30.0, time + i as f32 * FRAC_PI_3, &pen, Some(3.0));
        }

        for bolt in &self.bolts {
            let opacity = bolt.strength() * 255.0;
            canvas.polyline(&bolt.points, false, &Pen::new(3.0, GlowColors::CYAN.with_alpha_f(opacity)));
            canvas.polyline(&bolt.points, false, &Pen::new(6.0, GlowColors::CYAN.with_alpha_f(opacity / 3.0)));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");

        GlitchText {
            text: &self.label,
            anchor: c,
            font: FontSpec::mono(40.0).bold(),
            layers: self.caption.layers(pulse, GlowColors::MATRIX, GlowColors::CYAN),
        }
        .paint(canvas);

        self.status.paint(canvas, pos2(c.x, c.y + 50.0), 10.0, FontSpec::mono(12.0), |_| {
            GlowColors::MATRIX.with_alpha(200)
        });

        let gauge = centered_rect(c + vec2(0.0, 75.0), 200.0, 10.0);
        canvas.fill_rect(gauge, &Paint::Solid(GlowColors::MATRIX.with_alpha(50)));
        let filled = Rect::from_min_size(gauge.min, vec2(gauge.width() * energy(frame.phase("time")), gauge.height()));
        canvas.fill_rect(filled, &Paint::Solid(GlowColors::MATRIX.with_alpha(150)));
    }

    fn set_listening(&mut self, listening: bool) {
        self.status.set_text(status_text(listening));
    }
}
