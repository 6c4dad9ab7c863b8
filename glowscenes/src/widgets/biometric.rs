//! biometric — fingerprint scanner with a sweeping scan line

use crate::motifs::{centered_rect, dashed_ring};
use egui::{pos2, vec2, Align2, Rect, Vec2};
use glowcore::derive::{orbit, radians};
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowText, Rgba, Scene, SceneRng};

const TEAL: Rgba = Rgba::rgb(0, 255, 200);

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 2.0, 360.0)
        .with_phase("pulse", 0.1, Clock::TAU)
        .with_phase("scan", 3.0, 200.0)
}

pub struct Biometric {
    label: String,
}

impl Biometric {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for Biometric {
    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.fill_background(&Paint::radial2(
            frame.center(),
            300.0,
            Rgba::rgba(0, 40, 30, 30),
            Rgba::TRANSPARENT,
        ));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = frame.phase("pulse");
        dashed_ring(canvas, c, 200.0, 36, -angle, &Pen::new(2.0, TEAL.with_alpha(100)));

        // fingerprint: eight wavy rings of 20° chords
        for i in 0..8 {
            let radius = 50.0 + i as f32 * 15.0;
            let pen = Pen::new(2.0, TEAL.with_alpha(100 - i * 10));
            for j in (0..360).step_by(20) {
                let a = radians(j as f32 + angle + i as f32 * 10.0);
                let b = radians(j as f32 + 20.0 + angle + i as f32 * 10.0);
                let wave = vec2(0.0, (a * 3.0 + pulse).sin() * 5.0);
                canvas.line(orbit(c, radius, a) + wave, orbit(c, radius, b) + wave, &pen);
            }
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = frame.phase("pulse");

        let top = c.y - 100.0 + frame.phase("scan");
        let scan = Paint::linear(
            pos2(0.0, top),
            pos2(0.0, top + 2.0),
            vec![
                GradientStop::new(0.0, TEAL.with_alpha(0)),
                GradientStop::new(0.5, TEAL.with_alpha(150)),
                GradientStop::new(1.0, TEAL.with_alpha(0)),
            ],
        );
        canvas.fill_rect(Rect::from_min_size(pos2(c.x - 150.0, top), vec2(300.0, 2.0)), &scan);

        for i in 0..8u8 {
            let wobble = (pulse + i as f32).sin();
            let p = orbit(c, 150.0 + wobble * 10.0, radians(angle + i as f32 * 45.0));
            canvas.fill_circle(p, 5.0 + wobble * 2.0, TEAL.with_alpha(150));
            canvas.text_at(
                p + vec2(10.0, 0.0),
                Align2::LEFT_BOTTOM,
                &format!("BIO_{i:02X}"),
                FontSpec::mono(8.0),
                TEAL.with_alpha(150),
            );
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        GlowText::new(&self.label, c, FontSpec::sans(30.0).bold(), TEAL)
            .passes(10)
            .alpha_step(15.0)
            .shift(vec2(0.0, frame.phase("pulse").sin() * 3.0))
            .drift(vec2(0.0, -0.5))
            .paint(canvas);
        canvas.text_in(
            centered_rect(c + vec2(0.0, 65.0), 300.0, 30.0),
            "SCANNING BIOMETRICS...",
            FontSpec::sans(12.0).bold(),
            TEAL.with_alpha(200),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::RecordingSurface;
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    fn state() -> AnimationState {
        let mut rng = seeded(1);
        let scene = Biometric::new("Scan", vec2(600.0, 600.0), &mut rng);
        AnimationState::new(clock(), Box::new(scene), rng, vec2(600.0, 600.0))
    }

    #[test]
    fn test_scan_line_wraps() {
        let mut state = state();
        for _ in 0..67 {
            state.tick();
        }
        assert_eq!(state.clock().get("scan"), 1.0);
    }

    #[test]
    fn test_labels_and_status() {
        let state = state();
        let mut surface = RecordingSurface::new(vec2(600.0, 600.0));
        state.paint_frame(&mut surface);
        let texts: Vec<&str> = surface.texts().into_iter().map(|(t, _)| t).collect();
        assert!(texts.contains(&"BIO_00"));
        assert!(texts.contains(&"BIO_07"));
        assert_eq!(texts.iter().filter(|t| **t == "Scan").count(), 10);
        assert_eq!(texts.last(), Some(&"SCANNING BIOMETRICS..."));
    }
}
