//! reactor — glowing core, three rings with a travelling energy pulse and
//! a ring of percentage meters

use egui::{vec2, Align2, Vec2};
use glowcore::derive::{self, orbit, radians};
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowColors, GlowText, Rgba, Scene, SceneRng};
use std::f32::consts::{PI, TAU};

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 3.0, 360.0)
        .with_phase("energy", 0.05, Clock::TAU)
        .with_phase("pulse", 0.1, Clock::TAU)
}

/// Brightness of the ring segment starting at `angle` radians: full right
/// where the pulse is, fading out over the next 30°.
pub fn segment_glow(angle: f32, pulse: f32) -> Option<f32> {
    let pos = (angle + pulse).rem_euclid(TAU);
    (pos < PI / 6.0).then(|| 255.0 * (1.0 - pos / (PI / 6.0)))
}

/// Meter label `Eii:pp%` for meter `index`.
pub fn meter_label(index: usize, energy: f32) -> String {
    let level = (energy + index as f32).sin().abs();
    format!("E{index:02}:{:02}%", (level * 100.0) as u32)
}

pub struct Reactor {
    label: String,
}

impl Reactor {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for Reactor {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let e = derive::abs_pulse(frame.phase("energy"));
        let core = Paint::radial(
            c,
            100.0,
            vec![
                GradientStop::new(0.0, GlowColors::CYAN.with_alpha_f(200.0 * e)),
                GradientStop::new(0.5, GlowColors::AZURE.with_alpha_f(100.0 * e)),
                GradientStop::new(1.0, Rgba::rgba(0, 50, 255, 0)),
            ],
        );
        canvas.fill_circle(c, 100.0, core);
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = frame.phase("pulse");

        for i in 0..3u8 {
            let radius = 120.0 + i as f32 * 30.0;
            canvas.stroke_circle(c, radius, &Pen::new(2.0, GlowColors::CYAN.with_alpha(100 - i * 20)));
            for j in 0..12 {
                let a = radians(j as f32 * 30.0 + angle);
                if let Some(glow) = segment_glow(a, pulse) {
                    let b = radians((j + 1) as f32 * 30.0 + angle);
                    let pen = Pen::new(2.0, GlowColors::CYAN.with_alpha_f(glow));
                    canvas.line(orbit(c, radius, a), orbit(c, radius, b), &pen);
                }
            }
        }

        for i in 0..20 {
            let fi = i as f32;
            let wobble = (pulse + fi).sin();
            let p = orbit(c, 80.0 + 20.0 * wobble, radians(angle * 2.0 + fi * 18.0));
            canvas.fill_circle(p, 3.0 + 2.0 * wobble, GlowColors::CYAN.with_alpha(150));
        }

        let energy = frame.phase("energy");
        for i in 0..8 {
            let p = orbit(c, 200.0, radians(i as f32 * 45.0));
            canvas.text_at(
                p + vec2(-30.0, 0.0),
                Align2::LEFT_BOTTOM,
                &meter_label(i, energy),
                FontSpec::sans(8.0),
                GlowColors::CYAN.with_alpha(150),
            );
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let pulse = frame.phase("pulse");
        GlowText::new(&self.label, frame.center(), FontSpec::sans(30.0).bold(), GlowColors::CYAN)
            .alpha_step(25.5)
            .intensity(derive::abs_pulse(pulse))
            .shift(vec2(0.0, pulse.sin() * 3.0))
            .paint(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_glow_window() {
        assert_eq!(segment_glow(0.0, 0.0), Some(255.0));
        assert!(segment_glow(PI / 12.0, 0.0).is_some_and(|g| (g - 127.5).abs() < 1e-2));
        assert_eq!(segment_glow(PI / 6.0, 0.0), None);
        // wraps past a full turn
        assert_eq!(segment_glow(TAU, 0.0), Some(255.0));
        assert_eq!(segment_glow(TAU - 0.1, 0.0), None);
    }

    #[test]
    fn test_meter_label() {
        assert_eq!(meter_label(0, 0.0), "E00:00%");
        assert_eq!(meter_label(7, 0.0), format!("E07:{:02}%", (7f32.sin().abs() * 100.0) as u32));
    }
}
