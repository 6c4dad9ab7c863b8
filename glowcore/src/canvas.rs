//! canvas — transformed, opacity-aware drawing on top of a [`Surface`]
//!
//! Widgets draw in their own local coordinates (usually translated to the
//! window center and sometimes rotated or scaled). The canvas keeps a
//! save/restore stack of affine transforms and a global opacity, flattens
//! ellipses, arcs and curves into polygons, maps everything into device
//! pixels and hands plain primitives to the surface.

use crate::palette::Rgba;
use crate::path::Path;
use crate::surface::{FontSpec, Paint, Pen, Surface};
use egui::{pos2, vec2, Align2, Pos2, Rect, Vec2};

/// 2×3 affine matrix: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn apply(&self, p: Pos2) -> Pos2 {
        pos2(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// `self` followed by nothing, with `other` applied first in local space.
    fn then_local(&self, other: Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Geometric mean of the axis scales, used for widths and radii.
    pub fn scale_factor(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    opacity: f32,
}

/// Immediate-mode painter over any [`Surface`].
pub struct Canvas<'s> {
    surface: &'s mut dyn Surface,
    state: State,
    stack: Vec<State>,
}

impl<'s> Canvas<'s> {
    pub fn new(surface: &'s mut dyn Surface) -> Self {
        Self {
            surface,
            state: State {
                transform: Affine::IDENTITY,
                opacity: 1.0,
            },
            stack: Vec::new(),
        }
    }

    /// Surface extent in device pixels.
    pub fn size(&self) -> Vec2 {
        self.surface.size()
    }

    pub fn center(&self) -> Pos2 {
        (self.size() / 2.0).to_pos2()
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    /// Pop the last saved state; unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    /// Run `f` between a save and a restore.
    pub fn scoped(&mut self, f: impl FnOnce(&mut Canvas<'s>)) {
        self.save();
        f(self);
        self.restore();
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.concat(Affine {
            e: offset.x,
            f: offset.y,
            ..Affine::IDENTITY
        });
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(Affine {
            a: crate::safety::finite_or(sx, 1.0),
            d: crate::safety::finite_or(sy, 1.0),
            ..Affine::IDENTITY
        });
    }

    /// Rotate by `angle` radians (clockwise on screen).
    pub fn rotate(&mut self, angle: f32) {
        let (s, c) = crate::safety::finite_or(angle, 0.0).sin_cos();
        self.concat(Affine {
            a: c,
            b: s,
            c: -s,
            d: c,
            ..Affine::IDENTITY
        });
    }

    fn concat(&mut self, local: Affine) {
        self.state.transform = self.state.transform.then_local(local);
    }

    /// Multiply the current opacity by `opacity`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.state.opacity *= crate::safety::clamp_unit(opacity);
    }

    pub fn opacity(&self) -> f32 {
        self.state.opacity
    }

    fn device_paint(&self, paint: &Paint) -> Paint {
        let t = self.state.transform;
        paint
            .mapped(|p| t.apply(p), t.scale_factor())
            .with_opacity(self.state.opacity)
    }

    fn device_points(&self, points: &[Pos2]) -> Vec<Pos2> {
        points.iter().map(|p| self.state.transform.apply(*p)).collect()
    }

    /// Fill the whole surface in device space, ignoring the transform.
    pub fn fill_background(&mut self, paint: &Paint) {
        let paint = paint.with_opacity(self.state.opacity);
        if paint.is_invisible() {
            return;
        }
        let rect = Rect::from_min_size(Pos2::ZERO, self.surface.size());
        self.surface.fill_rect(rect, &paint);
    }

    pub fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let t = self.state.transform;
        if t.b == 0.0 && t.c == 0.0 {
            let paint = self.device_paint(paint);
            if paint.is_invisible() {
                return;
            }
            let device = Rect::from_two_pos(t.apply(rect.min), t.apply(rect.max));
            self.surface.fill_rect(device, &paint);
        } else {
            let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
            self.fill_polygon(&corners, paint);
        }
    }

    pub fn fill_polygon(&mut self, points: &[Pos2], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        let paint = self.device_paint(paint);
        if paint.is_invisible() {
            return;
        }
        let device = self.device_points(points);
        self.surface.fill_polygon(&device, &paint);
    }

    pub fn polyline(&mut self, points: &[Pos2], closed: bool, pen: &Pen) {
        if points.len() < 2 || pen.width <= 0.0 {
            return;
        }
        let paint = self.device_paint(&pen.paint);
        if paint.is_invisible() {
            return;
        }
        let pen = Pen {
            width: pen.width * self.state.transform.scale_factor(),
            paint,
        };
        let device = self.device_points(points);
        self.surface.stroke_polyline(&device, closed, &pen);
    }

    pub fn line(&mut self, from: Pos2, to: Pos2, pen: &Pen) {
        self.polyline(&[from, to], false, pen);
    }

    pub fn fill_path(&mut self, path: &Path, paint: &Paint) {
        for sub in path.subpaths() {
            self.fill_polygon(&sub.points, paint);
        }
    }

    pub fn stroke_path(&mut self, path: &Path, pen: &Pen) {
        for sub in path.subpaths() {
            self.polyline(&sub.points, sub.closed, pen);
        }
    }

    /// Fill and/or stroke an axis-aligned ellipse in local coordinates.
    pub fn ellipse(&mut self, center: Pos2, rx: f32, ry: f32, fill: Option<&Paint>, pen: Option<&Pen>) {
        let path = Path::ellipse(center, rx, ry);
        if let Some(paint) = fill {
            self.fill_path(&path, paint);
        }
        if let Some(pen) = pen {
            self.stroke_path(&path, pen);
        }
    }

    pub fn fill_circle(&mut self, center: Pos2, radius: f32, paint: impl Into<Paint>) {
        self.ellipse(center, radius, radius, Some(&paint.into()), None);
    }

    pub fn stroke_circle(&mut self, center: Pos2, radius: f32, pen: &Pen) {
        self.ellipse(center, radius, radius, None, Some(pen));
    }

    /// Elliptical arc. Angles are in degrees, measured counter-clockwise
    /// from three o'clock as seen on screen.
    pub fn arc(&mut self, center: Pos2, rx: f32, ry: f32, start_deg: f32, span_deg: f32, pen: &Pen) {
        let rx = crate::safety::non_negative(rx);
        let ry = crate::safety::non_negative(ry);
        let span = crate::safety::finite_or(span_deg, 0.0);
        let steps = ((span.abs() / 4.0) as usize).clamp(2, 90);
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| {
                let deg = start_deg + span * i as f32 / steps as f32;
                let t = deg.to_radians();
                pos2(center.x + rx * t.cos(), center.y - ry * t.sin())
            })
            .collect();
        self.polyline(&points, false, pen);
    }

    /// A single-pixel dot.
    pub fn point(&mut self, p: Pos2, color: Rgba) {
        let rect = Rect::from_center_size(p, vec2(1.5, 1.5));
        self.fill_rect(rect, &Paint::Solid(color));
    }

    /// Text centred in `rect` (local coordinates).
    pub fn text_in(&mut self, rect: Rect, text: &str, font: FontSpec, paint: impl Into<Paint>) {
        self.text_at(rect.center(), Align2::CENTER_CENTER, text, font, paint);
    }

    /// Text anchored at `pos` with `align`.
    pub fn text_at(&mut self, pos: Pos2, align: Align2, text: &str, font: FontSpec, paint: impl Into<Paint>) {
        if text.is_empty() {
            return;
        }
        let paint = self.device_paint(&paint.into());
        if paint.is_invisible() {
            return;
        }
        let t = self.state.transform;
        let font = font.scaled(t.scale_factor());
        self.surface.text(t.apply(pos), align, text, &font, &paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DrawCommand, RecordingSurface};

    #[test]
    fn test_transform_stack() {
        let mut surface = RecordingSurface::new(vec2(200.0, 100.0));
        let mut canvas = Canvas::new(&mut surface);
        canvas.save();
        canvas.translate(vec2(100.0, 50.0));
        canvas.line(Pos2::ZERO, pos2(10.0, 0.0), &Pen::new(1.0, Rgba::WHITE));
        canvas.restore();
        canvas.line(Pos2::ZERO, pos2(10.0, 0.0), &Pen::new(1.0, Rgba::WHITE));

        let lines: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokePolyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(lines[0], vec![pos2(100.0, 50.0), pos2(110.0, 50.0)]);
        assert_eq!(lines[1], vec![pos2(0.0, 0.0), pos2(10.0, 0.0)]);
    }

    #[test]
    fn test_rotate_then_scale() {
        let mut surface = RecordingSurface::new(vec2(100.0, 100.0));
        let mut canvas = Canvas::new(&mut surface);
        canvas.translate(vec2(50.0, 50.0));
        canvas.rotate(std::f32::consts::FRAC_PI_2);
        canvas.scale(2.0, 2.0);
        let p = canvas.transform().apply(pos2(10.0, 0.0));
        assert!((p - pos2(50.0, 70.0)).length() < 1e-4);
        assert!((canvas.transform().scale_factor() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_opacity_multiplies_and_skips_invisible() {
        let mut surface = RecordingSurface::new(vec2(10.0, 10.0));
        let mut canvas = Canvas::new(&mut surface);
        canvas.set_opacity(0.5);
        canvas.fill_circle(pos2(5.0, 5.0), 2.0, Rgba::rgba(255, 0, 0, 200));
        canvas.set_opacity(0.0);
        canvas.fill_circle(pos2(5.0, 5.0), 2.0, Rgba::WHITE);
        assert_eq!(surface.commands().len(), 1);
        match &surface.commands()[0] {
            DrawCommand::FillPolygon { paint, .. } => {
                assert_eq!(*paint, Paint::Solid(Rgba::rgba(255, 0, 0, 100)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_arc_goes_counter_clockwise_on_screen() {
        let mut surface = RecordingSurface::new(vec2(100.0, 100.0));
        let mut canvas = Canvas::new(&mut surface);
        canvas.arc(Pos2::ZERO, 10.0, 10.0, 0.0, 90.0, &Pen::new(1.0, Rgba::WHITE));
        let DrawCommand::StrokePolyline { points, .. } = &surface.commands()[0] else {
            panic!("expected polyline");
        };
        assert!((points[0] - pos2(10.0, 0.0)).length() < 1e-4);
        assert!((*points.last().unwrap() - pos2(0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut surface = RecordingSurface::new(vec2(10.0, 10.0));
        let mut canvas = Canvas::new(&mut surface);
        canvas.restore();
        assert_eq!(canvas.transform(), Affine::IDENTITY);
    }
}
