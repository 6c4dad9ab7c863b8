//! jarvis — compact HUD: notched rings, rotating arcs and data beams

use crate::motifs::{label_ring, spokes, TechRing};
use egui::{vec2, Vec2};
use glowcore::derive::{self, radians};
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowColors, GlowText, Rgba, Scene, SceneRng};

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 3.0, 360.0)
        .with_phase("pulse", 5.0, 360.0)
}

pub struct Jarvis {
    label: String,
}

impl Jarvis {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for Jarvis {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let halo = Paint::radial(
            c,
            250.0,
            vec![
                GradientStop::new(0.0, Rgba::TRANSPARENT),
                GradientStop::new(1.0, GlowColors::CYAN.with_alpha(80)),
            ],
        );
        canvas.fill_circle(c, 250.0, halo);
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = radians(frame.phase("pulse"));

        for (radius, segments) in [(200.0, 32), (180.0, 24), (160.0, 16)] {
            TechRing::new(radius, segments).paint(canvas, c, angle, pulse, GlowColors::CYAN);
        }

        let ring_width = 10.0 + pulse.sin() * 5.0;
        canvas.stroke_circle(c, 220.0, &Pen::new(ring_width, GlowColors::SKY.with_alpha(100)));

        for i in 0..4u8 {
            let pen = Pen::new(8.0 - i as f32, GlowColors::CYAN.with_alpha(255 - i * 40));
            canvas.arc(c, 220.0, 220.0, angle + i as f32 * 30.0, 45.0, &pen);
        }

        let beam = Pen::new(1.0, GlowColors::CYAN.with_alpha(100));
        let length = 150.0 + pulse.sin() * 20.0;
        for tip in spokes(canvas, c, 8, radians(angle / 2.0), 0.0, |_| length, &beam) {
            canvas.stroke_circle(tip, 3.0, &beam);
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = radians(frame.phase("pulse"));

        GlowText::new(&self.label, c, FontSpec::sans(30.0).bold(), GlowColors::CYAN)
            .passes(15)
            .alpha_step(8.0)
            .shift(vec2(0.0, -pulse.sin() * 3.0))
            .drift(vec2(0.0, -0.5))
            .core(Rgba::WHITE.with_alpha_f(155.0 + derive::abs_pulse(pulse) * 100.0))
            .paint(canvas);

        label_ring(canvas, c, 240.0, 8, angle, -20.0, FontSpec::sans(8.0), GlowColors::CYAN.with_alpha(100), |i| {
            format!("SEC.{i:02}")
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::{DrawCommand, RecordingSurface};
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_frame_contents() {
        let mut rng = seeded(0);
        let scene = Jarvis::new("Jarvis", vec2(600.0, 600.0), &mut rng);
        let mut state = AnimationState::new(clock(), Box::new(scene), rng, vec2(600.0, 600.0));
        state.tick();
        let mut surface = RecordingSurface::new(vec2(600.0, 600.0));
        state.paint_frame(&mut surface);

        let notches = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolyline { points, .. } if points.len() == 4))
            .count();
        assert_eq!(notches, 32 + 24 + 16);

        let texts = surface.texts();
        assert_eq!(texts.iter().filter(|(t, _)| *t == "Jarvis").count(), 16);
        assert_eq!(texts.iter().filter(|(t, _)| t.starts_with("SEC.")).count(), 8);
    }
}
