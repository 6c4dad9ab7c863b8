//! interface — neural interface console: audio waves, a ring of curved
//! synapses and a typewriter feed of boot messages

use egui::{pos2, vec2, Align2, Pos2, Vec2};
use glowcore::derive::{center_falloff, orbit, ring_angle};
use glowcore::path::Path;
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowText, Rgba, Scene, SceneRng};

const WAVE_SAMPLES: usize = 50;
const WAVE_HEIGHT: f32 = 40.0;
const SYNAPSES: usize = 8;
/// Links weaker than this are not drawn.
const MIN_INTENSITY: f32 = 0.3;
/// Fraction of a message typed per tick.
const TYPING_SPEED: f32 = 0.02;
/// Approximate glyph advance of the console font.
const CONSOLE_ADVANCE: f32 = 7.0;

const VIOLET: Rgba = Rgba::rgb(180, 0, 255);
const LILAC: Rgba = Rgba::rgb(200, 100, 255);

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("wave", 0.1, Clock::TAU)
        .with_phase("pulse", 0.05, Clock::TAU)
        .with_accumulator("neural", 0.02)
        .with_phase("conversation", 0.03, Clock::TAU)
}

/// The boot sequence typed into the console, in order.
pub fn messages(label: &str) -> Vec<String> {
    vec![
        "Starting neural interface...".to_string(),
        format!("Connecting to {label}..."),
        "Processing data...".to_string(),
        "Analyzing patterns...".to_string(),
        "System online".to_string(),
    ]
}

/// The first `progress` fraction of `message`, cut on a char boundary.
pub fn typed(message: &str, progress: f32) -> &str {
    let count = (message.chars().count() as f32 * progress) as usize;
    match message.char_indices().nth(count) {
        Some((idx, _)) => &message[..idx],
        None => message,
    }
}

pub fn cursor_visible(conversation: f32) -> bool {
    (conversation * 5.0).sin() > 0.0
}

/// A cubic synapse from `a` to `b` whose control points circle the
/// midpoint as `time` advances.
pub fn synapse(a: Pos2, b: Pos2, time: f32, intensity: f32) -> Path {
    let mid = pos2((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let t = time + intensity;
    let c1 = mid + vec2(30.0 * t.sin(), 30.0 * t.cos());
    let c2 = mid - vec2(30.0 * t.cos(), 30.0 * t.sin());
    let mut path = Path::new();
    path.move_to(a).cubic_to(c1, c2, b);
    path
}

pub struct Interface {
    label: String,
    messages: Vec<String>,
    current: usize,
    progress: f32,
}

impl Interface {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            messages: messages(label),
            current: 0,
            progress: 0.0,
        }
    }

    /// The part of the current message typed so far.
    pub fn console_line(&self) -> &str {
        self.messages
            .get(self.current)
            .map(|m| typed(m, self.progress))
            .unwrap_or_default()
    }
}

impl Scene for Interface {
    fn tick(&mut self, _frame: &Frame<'_>, _rng: &mut SceneRng) {
        self.progress += TYPING_SPEED;
        if self.progress >= 1.0 {
            self.progress = 0.0;
            self.current = (self.current + 1) % self.messages.len().max(1);
        }
    }

    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.fill_background(&Paint::radial2(frame.center(), 400.0, Rgba::rgba(40, 0, 60, 30), Rgba::TRANSPARENT));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let wave = frame.phase("wave");
        let pulse = frame.phase("pulse");

        canvas.stroke_circle(c, 150.0 + pulse.sin() * 10.0, &Pen::new(3.0, VIOLET.with_alpha(100)));

        let step = frame.width() / WAVE_SAMPLES as f32;
        let mut prev: Option<(Pos2, Pos2)> = None;
        for i in 0..WAVE_SAMPLES {
            let x = i as f32 * step;
            let falloff = center_falloff(x - c.x, 300.0);
            let upper = pos2(x, c.y - 180.0 + WAVE_HEIGHT * (wave + i as f32 * 0.2).sin() * falloff);
            let lower = pos2(x, c.y + 180.0 + WAVE_HEIGHT * (wave * 1.5 + i as f32 * 0.1).cos() * falloff);
            if let Some((pu, pl)) = prev {
                let pen = Pen::new(2.0, LILAC.with_alpha_f(150.0 * falloff));
                canvas.line(pu, upper, &pen);
                canvas.line(pl, lower, &pen);
            }
            prev = Some((upper, lower));
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        let neural = frame.phase("neural");

        let points: Vec<Pos2> = (0..SYNAPSES)
            .map(|i| {
                let radius = 100.0 + 20.0 * (pulse + i as f32).sin();
                orbit(c, radius, ring_angle(i, SYNAPSES, neural))
            })
            .collect();
        for p in &points {
            canvas.fill_circle(*p, 5.0, LILAC.with_alpha(150));
        }
        for i in 0..SYNAPSES {
            for j in (i + 1)..SYNAPSES {
                let intensity = (neural + (i + j) as f32).sin().abs();
                if intensity > MIN_INTENSITY {
                    let pen = Pen::new(2.0, VIOLET.with_alpha_f(100.0 * intensity));
                    canvas.stroke_path(&synapse(points[i], points[j], neural, intensity), &pen);
                }
            }
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let line = self.console_line();
        let baseline = frame.height() - 85.0;
        let font = FontSpec::sans(12.0).bold();
        canvas.text_at(pos2(50.0, baseline), Align2::LEFT_CENTER, line, font, Rgba::WHITE);
        if cursor_visible(frame.phase("conversation")) {
            let x = 50.0 + line.chars().count() as f32 * CONSOLE_ADVANCE;
            canvas.text_at(pos2(x, baseline), Align2::LEFT_CENTER, "_", font, Rgba::WHITE);
        }

        GlowText::new(&self.label, frame.center(), FontSpec::sans(35.0).bold(), VIOLET)
            .drift(vec2(0.0, -0.5))
            .core(Rgba::WHITE)
            .paint(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::rng::seeded;

    #[test]
    fn test_typed_prefix() {
        assert_eq!(typed("System online", 0.0), "");
        assert_eq!(typed("System online", 0.5), "System");
        assert_eq!(typed("System online", 1.0), "System online");
        // multi-byte glyphs are never split
        assert_eq!(typed("ÀÉÎ", 0.7), "ÀÉ");
    }

    #[test]
    fn test_messages_cycle() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: vec2(800.0, 600.0),
        };
        let mut rng = seeded(0);
        let mut ui = Interface::new("Deck", frame.size, &mut rng);
        assert_eq!(ui.console_line(), "");
        for _ in 0..60 {
            ui.tick(&frame, &mut rng);
        }
        assert_eq!(ui.current, 1);
        assert!("Connecting to Deck...".starts_with(ui.console_line()));
        assert!(!ui.console_line().is_empty());

        let mut seen = vec![false; ui.messages.len()];
        for _ in 0..300 {
            ui.tick(&frame, &mut rng);
            seen[ui.current] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_synapse_endpoints() {
        let a = pos2(0.0, 0.0);
        let b = pos2(100.0, 0.0);
        let path = synapse(a, b, 0.3, 0.5);
        let points = &path.subpaths()[0].points;
        assert_eq!(points[0], a);
        assert!((*points.last().unwrap() - b).length() < 1e-3);
    }

    #[test]
    fn test_cursor_blinks() {
        assert!(cursor_visible(0.1));
        assert!(!cursor_visible(0.7));
    }
}
