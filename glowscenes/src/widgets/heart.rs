//! heart — a still, solid red parametric heart

use egui::Vec2;
use glowcore::derive::{heart_point, radians};
use glowcore::path::Path;
use glowcore::surface::Paint;
use glowcore::{Canvas, Clock, Frame, Rgba, Scene, SceneRng};

/// Samples along the outline, one per degree.
const SAMPLES: usize = 360;
const SIZE: f32 = 100.0;
const RED: Rgba = Rgba::rgb(255, 0, 0);

/// The heart never animates; its clock has no phases.
pub fn clock() -> Clock {
    Clock::new()
}

pub fn outline(size: f32) -> Path {
    let mut path = Path::new();
    path.move_to(heart_point(0.0, size));
    for t in 1..SAMPLES {
        path.line_to(heart_point(radians(t as f32), size));
    }
    path
}

pub struct Heart {
    outline: Path,
}

impl Heart {
    pub fn new(_label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { outline: outline(SIZE) }
    }
}

impl Scene for Heart {
    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.translate(frame.center().to_vec2());
        canvas.fill_path(&self.outline, &Paint::Solid(RED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};
    use glowcore::record::{DrawCommand, RecordingSurface};
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_outline_samples() {
        let path = outline(SIZE);
        let points = &path.subpaths()[0].points;
        assert_eq!(points.len(), SAMPLES);
        // the dip between the lobes sits above the centre
        assert!((points[0] - pos2(0.0, -31.25)).length() < 1e-3);
    }

    #[test]
    fn test_painted_centred_in_one_fill() {
        let mut rng = seeded(0);
        let scene = Heart::new("", vec2(400.0, 400.0), &mut rng);
        let state = AnimationState::new(clock(), Box::new(scene), rng, vec2(400.0, 400.0));
        let mut surface = RecordingSurface::new(vec2(400.0, 400.0));
        state.paint_frame(&mut surface);

        let [DrawCommand::FillPolygon { points, paint }] = surface.commands() else {
            panic!("expected a single fill, got {:?}", surface.commands());
        };
        assert_eq!(*paint, Paint::Solid(RED));
        assert!((points[0] - pos2(200.0, 168.75)).length() < 1e-3);
    }
}
