//! path — move/line/quad/cubic path builder flattened into polylines

use egui::{pos2, Pos2};

/// Segments used to flatten a single curve.
const CURVE_STEPS: usize = 16;

/// A path made of one or more subpaths, already flattened.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<Subpath>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subpath {
    pub points: Vec<Pos2>,
    pub closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: impl IntoIterator<Item = Pos2>) -> Self {
        let mut path = Self::new();
        path.subpaths.push(Subpath {
            points: points.into_iter().collect(),
            closed: true,
        });
        path
    }

    /// Axis-aligned ellipse approximated by a closed polygon whose segment
    /// count grows with the radius.
    pub fn ellipse(center: Pos2, rx: f32, ry: f32) -> Self {
        let rx = crate::safety::non_negative(rx);
        let ry = crate::safety::non_negative(ry);
        let steps = ellipse_steps(rx.max(ry));
        Self::polygon((0..steps).map(|i| {
            let t = i as f32 * std::f32::consts::TAU / steps as f32;
            pos2(center.x + rx * t.cos(), center.y + ry * t.sin())
        }))
    }

    pub fn circle(center: Pos2, radius: f32) -> Self {
        Self::ellipse(center, radius, radius)
    }

    pub fn move_to(&mut self, p: Pos2) -> &mut Self {
        self.subpaths.push(Subpath {
            points: vec![p],
            closed: false,
        });
        self
    }

    pub fn line_to(&mut self, p: Pos2) -> &mut Self {
        self.current().points.push(p);
        self
    }

    /// Quadratic bezier from the current point through `ctrl` to `to`.
    pub fn quad_to(&mut self, ctrl: Pos2, to: Pos2) -> &mut Self {
        let from = self.last_point();
        let sub = self.current();
        for i in 1..=CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            sub.points.push(pos2(
                u * u * from.x + 2.0 * u * t * ctrl.x + t * t * to.x,
                u * u * from.y + 2.0 * u * t * ctrl.y + t * t * to.y,
            ));
        }
        self
    }

    /// Cubic bezier from the current point.
    pub fn cubic_to(&mut self, c1: Pos2, c2: Pos2, to: Pos2) -> &mut Self {
        let from = self.last_point();
        let sub = self.current();
        for i in 1..=CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            sub.points.push(pos2(
                a * from.x + b * c1.x + c * c2.x + d * to.x,
                a * from.y + b * c1.y + c * c2.y + d * to.y,
            ));
        }
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if let Some(sub) = self.subpaths.last_mut() {
            sub.closed = true;
        }
        self
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.points.is_empty())
    }

    fn current(&mut self) -> &mut Subpath {
        if self.subpaths.is_empty() {
            self.subpaths.push(Subpath::default());
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    fn last_point(&self) -> Pos2 {
        self.subpaths
            .last()
            .and_then(|s| s.points.last())
            .copied()
            .unwrap_or(Pos2::ZERO)
    }
}

fn ellipse_steps(radius: f32) -> usize {
    ((radius * 0.75) as usize).clamp(12, 96)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_endpoints() {
        let mut path = Path::new();
        path.move_to(pos2(0.0, 0.0))
            .quad_to(pos2(50.0, 100.0), pos2(100.0, 0.0))
            .cubic_to(pos2(120.0, 10.0), pos2(130.0, 10.0), pos2(150.0, 0.0));
        let sub = &path.subpaths()[0];
        assert_eq!(sub.points.len(), 1 + 2 * CURVE_STEPS);
        assert_eq!(sub.points[CURVE_STEPS], pos2(100.0, 0.0));
        assert_eq!(*sub.points.last().unwrap(), pos2(150.0, 0.0));
        // quad midpoint sits halfway to the control point
        assert_eq!(sub.points[CURVE_STEPS / 2], pos2(50.0, 50.0));
    }

    #[test]
    fn test_ellipse_points_on_curve() {
        let path = Path::ellipse(pos2(10.0, 10.0), 40.0, 20.0);
        let sub = &path.subpaths()[0];
        assert!(sub.closed);
        for p in &sub.points {
            let nx = (p.x - 10.0) / 40.0;
            let ny = (p.y - 10.0) / 20.0;
            assert!((nx * nx + ny * ny - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_negative_radius_collapses() {
        let path = Path::circle(pos2(1.0, 1.0), -5.0);
        assert!(path.subpaths()[0].points.iter().all(|p| *p == pos2(1.0, 1.0)));
    }

    #[test]
    fn test_line_without_move_starts_subpath() {
        let mut path = Path::new();
        path.line_to(pos2(1.0, 2.0)).close();
        assert_eq!(path.subpaths().len(), 1);
        assert!(path.subpaths()[0].closed);
    }
}
