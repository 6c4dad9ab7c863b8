//! portal — violet energy portal with dashed rings and radiating beams

use crate::motifs::{dashed_ring, spokes};
use egui::{vec2, Vec2};
use glowcore::derive::{self, radians};
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowText, Rgba, Scene, SceneRng};

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 2.0, 360.0)
        .with_phase("pulse", 0.1, Clock::TAU)
        .with_phase("wave", 0.05, Clock::TAU)
}

pub struct Portal {
    label: String,
}

impl Portal {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for Portal {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        let size = 200.0 + pulse.sin() * 10.0;
        let glow = derive::abs_pulse(pulse);
        let paint = Paint::radial(
            c,
            size,
            vec![
                GradientStop::new(0.0, Rgba::rgb(180, 0, 255).with_alpha_f(150.0 * glow)),
                GradientStop::new(0.5, Rgba::rgb(120, 0, 180).with_alpha_f(100.0 * glow)),
                GradientStop::new(1.0, Rgba::rgba(60, 0, 100, 0)),
            ],
        );
        canvas.fill_circle(c, size, paint);
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = frame.phase("pulse");
        let wave = frame.phase("wave");

        for i in 0..5u8 {
            let pen = Pen::new(3.0, Rgba::rgb(180, 0, 255).with_alpha(150 - i * 20));
            dashed_ring(canvas, c, 100.0 + i as f32 * 30.0, 36, -angle, &pen);
        }

        let beam = Pen::new(2.0, Rgba::rgba(200, 100, 255, 100));
        let tips = spokes(canvas, c, 8, radians(angle), 50.0, |i| 250.0 + (wave + i as f32).sin() * 20.0, &beam);
        for (i, tip) in tips.into_iter().enumerate() {
            canvas.fill_circle(tip, 4.0 + (pulse + i as f32).sin() * 2.0, Rgba::rgba(200, 100, 255, 150));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        GlowText::new(&self.label, frame.center(), FontSpec::sans(35.0).bold(), Rgba::rgb(180, 0, 255))
            .alpha_step(10.0)
            .drift(vec2(0.0, -0.5))
            .core(Rgba::WHITE)
            .paint(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::{DrawCommand, RecordingSurface};
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_rings_beams_and_caption() {
        let mut rng = seeded(0);
        let scene = Portal::new("Portal", vec2(600.0, 600.0), &mut rng);
        let mut state = AnimationState::new(clock(), Box::new(scene), rng, vec2(600.0, 600.0));
        state.tick();
        let mut surface = RecordingSurface::new(vec2(600.0, 600.0));
        state.paint_frame(&mut surface);

        let arcs = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolyline { pen, .. } if pen.width == 3.0))
            .count();
        assert_eq!(arcs, 5 * 18);
        let beams = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolyline { pen, .. } if pen.width == 2.0))
            .count();
        assert_eq!(beams, 8);

        let alphas: Vec<u8> = surface.texts().iter().map(|(_, p)| p.sample(egui::Pos2::ZERO).a).collect();
        assert_eq!(alphas[0], 100);
        assert_eq!(alphas[9], 10);
        assert_eq!(alphas[10], 255);
    }
}
