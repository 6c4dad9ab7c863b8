//! digital-face — a friendly HUD face whose eyes follow the pointer and
//! blink now and then

use crate::motifs::{label_ring, spokes, TechRing};
use egui::{pos2, vec2, Pos2, Vec2};
use glowcore::derive::radians;
use glowcore::rng::chance;
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowColors, Rgba, Scene, SceneRng};

/// How far the irises may leave their rest position.
const MAX_EYE_MOVE: f32 = 15.0;
const BLINK_CHANCE: f32 = 0.01;
const BLINK_TICKS: u32 = 10;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 2.0, 360.0)
        .with_phase("pulse", 3.0, 360.0)
}

/// Iris offset looking from `center` towards `pointer`.
pub fn gaze(center: Pos2, pointer: Pos2) -> Vec2 {
    let d = pointer - center;
    let angle = d.y.atan2(d.x);
    vec2(angle.cos(), angle.sin()) * MAX_EYE_MOVE
}

pub struct DigitalFace {
    pointer: Option<Pos2>,
    gaze: Vec2,
    /// Ticks into the current blink, `None` while the eyes are open.
    blink: Option<u32>,
}

impl DigitalFace {
    pub fn new(_label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self {
            pointer: None,
            gaze: vec2(MAX_EYE_MOVE, 0.0),
            blink: None,
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    fn eye(&self, canvas: &mut Canvas<'_>, at: Pos2) {
        let outline = Pen::new(2.0, GlowColors::CYAN.with_alpha(200));
        canvas.ellipse(at, 30.0, 25.0, None, Some(&outline));
        if self.is_blinking() {
            canvas.line(at - vec2(30.0, 0.0), at + vec2(30.0, 0.0), &outline);
            return;
        }
        let iris = at + self.gaze / 2.0;
        let paint = Paint::radial(
            iris,
            15.0,
            vec![
                GradientStop::new(0.0, GlowColors::CYAN),
                GradientStop::new(0.5, GlowColors::AZURE.with_alpha(200)),
                GradientStop::new(1.0, Rgba::rgba(0, 50, 255, 150)),
            ],
        );
        canvas.ellipse(iris, 15.0, 15.0, Some(&paint), Some(&outline));
        canvas.ellipse(iris, 5.0, 5.0, Some(&Paint::Solid(Rgba::BLACK)), Some(&outline));
        canvas.fill_circle(iris - vec2(3.0, 3.0), 2.0, Rgba::WHITE.with_alpha(200));
    }
}

impl Scene for DigitalFace {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        let center = frame.center();
        self.gaze = gaze(center, self.pointer.unwrap_or(center));
        self.blink = match self.blink {
            None if chance(rng, BLINK_CHANCE) => Some(0),
            None => None,
            Some(t) if t + 1 > BLINK_TICKS => None,
            Some(t) => Some(t + 1),
        };
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = radians(frame.phase("pulse"));
        for (radius, segments) in [(200.0, 32), (180.0, 24)] {
            TechRing::new(radius, segments)
                .insets(5.0, 2.0)
                .paint(canvas, c, angle, pulse, GlowColors::CYAN);
        }
        canvas.fill_circle(c, 150.0, Paint::radial2(c, 150.0, Rgba::rgba(0, 50, 100, 30), Rgba::TRANSPARENT));
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let angle = frame.phase("angle");
        let pulse = radians(frame.phase("pulse"));
        let eye_row = c + vec2(0.0, self.gaze.y);
        self.eye(canvas, eye_row + vec2(-50.0 + self.gaze.x, 0.0));
        self.eye(canvas, eye_row + vec2(50.0 + self.gaze.x, 0.0));

        let circuit = Pen::new(1.0, GlowColors::CYAN.with_alpha(100));
        let length = 120.0 + pulse.sin() * 10.0;
        for tip in spokes(canvas, c, 8, radians(angle / 2.0), 0.0, |_| length, &circuit) {
            canvas.stroke_circle(tip, 3.0, &circuit);
        }

        let width = 80.0 + pulse.sin() * 10.0;
        let mouth: Vec<Pos2> = (0..10)
            .map(|i| {
                let x = -width / 2.0 + width * i as f32 / 9.0;
                let y = 50.0 + (i as f32 * std::f32::consts::FRAC_PI_2 + pulse).sin() * 5.0;
                pos2(c.x + x, c.y + y)
            })
            .collect();
        canvas.polyline(&mouth, false, &Pen::new(2.0, GlowColors::CYAN.with_alpha(200)));
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        label_ring(
            canvas,
            frame.center(),
            220.0,
            8,
            frame.phase("angle"),
            -20.0,
            FontSpec::sans(8.0),
            GlowColors::CYAN.with_alpha(100),
            |i| format!("SYS.{i:02}"),
        );
    }

    fn set_pointer(&mut self, pos: Option<Pos2>) {
        self.pointer = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::rng::seeded;

    #[test]
    fn test_gaze_points_at_pointer() {
        let g = gaze(pos2(300.0, 300.0), pos2(300.0, 500.0));
        assert!((g - vec2(0.0, MAX_EYE_MOVE)).length() < 1e-4);
        let g = gaze(pos2(300.0, 300.0), pos2(0.0, 300.0));
        assert!((g - vec2(-MAX_EYE_MOVE, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_pointer_drives_gaze_on_tick() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: vec2(600.0, 600.0),
        };
        let mut rng = seeded(0);
        let mut face = DigitalFace::new("", frame.size, &mut rng);
        face.set_pointer(Some(pos2(300.0, 0.0)));
        face.tick(&frame, &mut rng);
        assert!((face.gaze - vec2(0.0, -MAX_EYE_MOVE)).length() < 1e-4);
        // leaving the window recentres the pointer
        face.set_pointer(None);
        face.tick(&frame, &mut rng);
        assert!((face.gaze - vec2(MAX_EYE_MOVE, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_blink_ends() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: vec2(600.0, 600.0),
        };
        let mut rng = seeded(0);
        let mut face = DigitalFace::new("", frame.size, &mut rng);
        face.blink = Some(0);
        for _ in 0..BLINK_TICKS {
            face.tick(&frame, &mut rng);
            assert!(face.is_blinking());
        }
        face.tick(&frame, &mut rng);
        assert!(!face.is_blinking());
    }
}
