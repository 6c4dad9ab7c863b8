//! grid-face — an oval mesh of softly wobbling points linked to their
//! near neighbours

use egui::{pos2, vec2, Pos2, Vec2};
use glowcore::rng::uniform;
use glowcore::scene::network::{link_alpha, pairs_within};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, Frame, Scene, SceneRng};
use std::f32::consts::TAU;

const RESOLUTION: usize = 30;
const LINK_DISTANCE: f32 = 30.0;
const FACE_WIDTH: f32 = 400.0;
const FACE_HEIGHT: f32 = 500.0;
const BLUE: glowcore::Rgba = glowcore::Rgba::rgb(0, 150, 255);

pub fn clock() -> Clock {
    Clock::new().with_accumulator("time", 0.05)
}

/// Map grid coordinates `u, v` in `0..=1` onto the face oval, or `None`
/// when the point falls outside it. The face narrows slightly towards the
/// chin and forehead.
pub fn oval_point(u: f32, v: f32) -> Option<Pos2> {
    let nx = u * 2.0 - 1.0;
    let ny = v * 2.0 - 1.0;
    let oval = (nx * nx / 1.2 + ny * ny / 1.8).sqrt();
    (oval <= 1.0).then(|| pos2(nx * FACE_WIDTH * (1.0 - 0.1 * ny.abs()), ny * FACE_HEIGHT))
}

struct GridPoint {
    rest: Pos2,
    phase: f32,
}

pub struct GridFace {
    points: Vec<GridPoint>,
}

impl GridFace {
    pub fn new(_label: &str, _size: Vec2, rng: &mut SceneRng) -> Self {
        let step = 1.0 / (RESOLUTION - 1) as f32;
        let mut points = Vec::new();
        for i in 0..RESOLUTION {
            for j in 0..RESOLUTION {
                if let Some(rest) = oval_point(i as f32 * step, j as f32 * step) {
                    points.push(GridPoint {
                        rest,
                        phase: uniform(rng, 0.0, TAU),
                    });
                }
            }
        }
        tracing::debug!(points = points.len(), "face grid laid out");
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Current positions relative to the face centre.
    fn positions(&self, time: f32) -> Vec<Pos2> {
        self.points
            .iter()
            .map(|p| p.rest + vec2((time + p.phase).cos(), (time + p.phase).sin()))
            .collect()
    }
}

impl Scene for GridFace {
    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.translate(frame.center().to_vec2());
        let positions = self.positions(frame.phase("time"));

        for (i, j, d) in pairs_within(&positions, LINK_DISTANCE) {
            let pen = Pen::new(1.0, BLUE.with_alpha_f(link_alpha(d, LINK_DISTANCE, 255.0)));
            canvas.line(positions[i], positions[j], &pen);
        }
        for p in &positions {
            canvas.fill_circle(*p, 2.0, Paint::radial2(*p, 4.0, BLUE.with_alpha(200), BLUE.with_alpha(0)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::rng::seeded;

    #[test]
    fn test_oval_filter() {
        assert_eq!(oval_point(0.5, 0.5), Some(pos2(0.0, 0.0)));
        // corners are outside the face
        assert_eq!(oval_point(0.0, 0.0), None);
        assert_eq!(oval_point(1.0, 1.0), None);
        // the top of the forehead is still inside
        assert_eq!(oval_point(0.5, 0.0), Some(pos2(0.0, -FACE_HEIGHT)));
    }

    #[test]
    fn test_grid_keeps_only_oval_points() {
        let face = GridFace::new("", vec2(1920.0, 1080.0), &mut seeded(4));
        assert!(!face.is_empty());
        assert!(face.len() < RESOLUTION * RESOLUTION);
        for p in &face.points {
            assert!(p.rest.x.abs() <= FACE_WIDTH && p.rest.y.abs() <= FACE_HEIGHT);
        }
    }

    #[test]
    fn test_points_wobble_one_pixel() {
        let face = GridFace::new("", vec2(1920.0, 1080.0), &mut seeded(4));
        for (p, pos) in face.points.iter().zip(face.positions(3.7)) {
            assert!((pos.distance(p.rest) - 1.0).abs() < 1e-3);
        }
    }
}
