//! tech-hud — rotating heads-up display with notched rings, sweeping arcs
//! and a constellation of linked data points

use crate::motifs::{centered_rect, label_ring, TechRing};
use egui::{vec2, Pos2, Vec2};
use glowcore::derive::{self, orbit, radians};
use glowcore::rng::uniform;
use glowcore::scene::network::link_alpha;
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowColors, GlowText, Rgba, Scene, SceneRng};
use std::f32::consts::TAU;

const DATA_POINTS: usize = 50;
/// Each point links to at most this many successors.
const LINK_SPAN: usize = 4;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 2.0, 360.0)
        .with_phase("pulse", 3.0, 360.0)
}

/// Status line, alternating every half turn.
pub fn status_for(angle: f32) -> &'static str {
    if angle.rem_euclid(180.0) < 90.0 {
        "ANALYZING..."
    } else {
        "PROCESSING..."
    }
}

pub struct TechHud {
    label: String,
    /// `(angle, radius)` of every data point relative to the rotation.
    points: Vec<(f32, f32)>,
}

impl TechHud {
    pub fn new(label: &str, _size: Vec2, rng: &mut SceneRng) -> Self {
        let points = (0..DATA_POINTS)
            .map(|_| (uniform(rng, 0.0, TAU), uniform(rng, 100.0, 280.0)))
            .collect();
        Self {
            label: label.to_string(),
            points,
        }
    }

    fn positions(&self, center: Pos2, rotation: f32) -> Vec<Pos2> {
        self.points
            .iter()
            .map(|&(a, r)| orbit(center, r, a + rotation))
            .collect()
    }
}

impl Scene for TechHud {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        canvas.fill_circle(c, 350.0, Paint::radial2(c, 350.0, Rgba::rgba(0, 50, 100, 30), Rgba::TRANSPARENT));
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = radians(frame.phase("pulse"));

        for (radius, segments) in [(300.0, 48), (260.0, 36), (220.0, 24)] {
            TechRing::new(radius, segments).paint(canvas, c, angle, pulse, GlowColors::CYAN);
        }

        let ring_width = 10.0 + pulse.sin() * 5.0;
        canvas.stroke_circle(c, 320.0, &Pen::new(ring_width, GlowColors::SKY.with_alpha(100)));

        for i in 0..6u8 {
            let pen = Pen::new(8.0 - i as f32, GlowColors::CYAN.with_alpha(255 - i * 30));
            canvas.arc(c, 320.0, 320.0, angle + i as f32 * 20.0, 30.0, &pen);
        }

        let positions = self.positions(c, radians(angle));
        for (p, &(a, _)) in positions.iter().zip(&self.points) {
            let opacity = 100.0 + (a + pulse).sin().abs() * 155.0;
            canvas.fill_circle(*p, 1.0, GlowColors::CYAN.with_alpha_f(opacity));
        }
        for i in 0..positions.len() {
            for j in (i + 1)..(i + 1 + LINK_SPAN).min(positions.len()) {
                let d = positions[i].distance(positions[j]);
                if d < 100.0 {
                    let pen = Pen::new(1.0, GlowColors::CYAN.with_alpha_f(link_alpha(d, 100.0, 100.0)));
                    canvas.line(positions[i], positions[j], &pen);
                }
            }
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = radians(frame.phase("pulse"));
        let core_alpha = 155.0 + derive::abs_pulse(pulse) * 100.0;

        GlowText::new(&self.label, c, FontSpec::sans(40.0).bold(), GlowColors::CYAN)
            .passes(20)
            .alpha_step(8.0)
            .shift(vec2(0.0, -pulse.sin() * 4.0))
            .drift(vec2(0.0, -0.5))
            .core(Rgba::WHITE.with_alpha_f(core_alpha))
            .paint(canvas);

        label_ring(canvas, c, 340.0, 12, angle, -30.0, FontSpec::sans(10.0), GlowColors::CYAN.with_alpha(150), |i| {
            format!("NODE.{i:02}")
        });

        canvas.text_in(
            centered_rect(c + vec2(0.0, 335.0), 200.0, 30.0),
            status_for(angle),
            FontSpec::sans(14.0),
            GlowColors::CYAN.with_alpha(200),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::RecordingSurface;
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_data_points_seeded_in_range() {
        let a = TechHud::new("HUD", vec2(800.0, 800.0), &mut seeded(5));
        let b = TechHud::new("HUD", vec2(800.0, 800.0), &mut seeded(5));
        assert_eq!(a.points, b.points);
        assert_eq!(a.points.len(), DATA_POINTS);
        assert!(a.points.iter().all(|&(ang, r)| (0.0..TAU).contains(&ang) && (100.0..280.0).contains(&r)));
    }

    #[test]
    fn test_status_alternates() {
        assert_eq!(status_for(0.0), "ANALYZING...");
        assert_eq!(status_for(100.0), "PROCESSING...");
        assert_eq!(status_for(200.0), "ANALYZING...");
        assert_eq!(status_for(300.0), "PROCESSING...");
    }

    #[test]
    fn test_status_follows_clock() {
        let mut rng = seeded(2);
        let scene = TechHud::new("HUD", vec2(800.0, 800.0), &mut rng);
        let mut state = AnimationState::new(clock(), Box::new(scene), rng, vec2(800.0, 800.0));
        for _ in 0..50 {
            state.tick();
        }
        let mut surface = RecordingSurface::new(vec2(800.0, 800.0));
        state.paint_frame(&mut surface);
        let texts = surface.texts();
        assert_eq!(texts.last().map(|(t, _)| *t), Some("PROCESSING..."));
        assert_eq!(texts.iter().filter(|(t, _)| t.starts_with("NODE.")).count(), 12);
        assert_eq!(texts.iter().filter(|(t, _)| *t == "HUD").count(), 21);
    }
}
