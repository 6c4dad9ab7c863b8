//! painter — egui backend for [`Surface`]
//!
//! Solid convex shapes go through egui's anti-aliased shape tessellator.
//! Everything else becomes a vertex-colored mesh: polygons are fanned from
//! their centroid and split into concentric bands so gradients can be
//! sampled per vertex. Gradient strokes are drawn segment by segment with
//! the color at each segment's midpoint.

use crate::surface::{FontFamily, FontSpec, Paint, Pen, Surface};
use egui::epaint::Mesh;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// Concentric bands used to sample a gradient across a polygon fan.
const GRADIENT_BANDS: usize = 8;
/// Grid resolution used to sample a gradient across a rectangle.
const GRADIENT_GRID: usize = 16;

/// Draws into an egui [`Painter`], with device coordinates relative to
/// `rect.min`.
pub struct EguiSurface<'p> {
    painter: &'p Painter,
    rect: Rect,
}

impl<'p> EguiSurface<'p> {
    pub fn new(painter: &'p Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        p + self.rect.min.to_vec2()
    }

    fn color_at(paint: &Paint, p: Pos2) -> Color32 {
        paint.sample(p).to_color32()
    }

    fn fan_mesh(&self, points: &[Pos2], paint: &Paint, bands: usize) -> Mesh {
        let mut mesh = Mesh::default();
        let n = points.len();
        let centroid = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2()) / n as f32;
        let centroid = centroid.to_pos2();

        mesh.colored_vertex(self.to_screen(centroid), Self::color_at(paint, centroid));
        for band in 1..=bands {
            let t = band as f32 / bands as f32;
            for p in points {
                let v = centroid + (*p - centroid) * t;
                mesh.colored_vertex(self.to_screen(v), Self::color_at(paint, v));
            }
        }

        let ring = |band: usize, i: usize| (1 + (band - 1) * n + i % n) as u32;
        for i in 0..n {
            mesh.add_triangle(0, ring(1, i), ring(1, i + 1));
        }
        for band in 2..=bands {
            for i in 0..n {
                let (a, b) = (ring(band - 1, i), ring(band - 1, i + 1));
                let (c, d) = (ring(band, i), ring(band, i + 1));
                mesh.add_triangle(a, c, d);
                mesh.add_triangle(a, d, b);
            }
        }
        mesh
    }
}

fn is_convex(points: &[Pos2]) -> bool {
    let n = points.len();
    let mut sign = 0.0_f32;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b - a).x * (c - b).y - (b - a).y * (c - b).x;
        if cross.abs() <= f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

fn font_id(font: &FontSpec) -> FontId {
    let px = font.pixels().max(1.0);
    match font.family {
        FontFamily::Sans => FontId::proportional(px),
        FontFamily::Mono => FontId::monospace(px),
    }
}

impl Surface for EguiSurface<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size()
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let screen = rect.translate(self.rect.min.to_vec2());
        if let Paint::Solid(c) = paint {
            self.painter.rect_filled(screen, 0.0, c.to_color32());
            return;
        }
        let mut mesh = Mesh::default();
        let cols = GRADIENT_GRID + 1;
        for row in 0..=GRADIENT_GRID {
            for col in 0..=GRADIENT_GRID {
                let p = rect.min
                    + rect.size() * Vec2::new(col as f32, row as f32) / GRADIENT_GRID as f32;
                mesh.colored_vertex(self.to_screen(p), Self::color_at(paint, p));
            }
        }
        for row in 0..GRADIENT_GRID {
            for col in 0..GRADIENT_GRID {
                let i = (row * cols + col) as u32;
                let below = i + cols as u32;
                mesh.add_triangle(i, i + 1, below + 1);
                mesh.add_triangle(i, below + 1, below);
            }
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn fill_polygon(&mut self, points: &[Pos2], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        match paint {
            Paint::Solid(c) if is_convex(points) => {
                let screen = points.iter().map(|p| self.to_screen(*p)).collect();
                self.painter
                    .add(Shape::convex_polygon(screen, c.to_color32(), Stroke::NONE));
            }
            Paint::Solid(_) => {
                let mesh = self.fan_mesh(points, paint, 1);
                self.painter.add(Shape::mesh(mesh));
            }
            _ => {
                let mesh = self.fan_mesh(points, paint, GRADIENT_BANDS);
                self.painter.add(Shape::mesh(mesh));
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Pos2], closed: bool, pen: &Pen) {
        if points.len() < 2 {
            return;
        }
        if let Paint::Solid(c) = &pen.paint {
            let stroke = Stroke::new(pen.width, c.to_color32());
            let screen: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
            let shape = if closed {
                Shape::closed_line(screen, stroke)
            } else {
                Shape::line(screen, stroke)
            };
            self.painter.add(shape);
            return;
        }
        let segment = |a: Pos2, b: Pos2| {
            let mid = a + (b - a) * 0.5;
            let stroke = Stroke::new(pen.width, Self::color_at(&pen.paint, mid));
            self.painter
                .line_segment([self.to_screen(a), self.to_screen(b)], stroke);
        };
        for pair in points.windows(2) {
            segment(pair[0], pair[1]);
        }
        if closed {
            if let (Some(last), Some(first)) = (points.last(), points.first()) {
                segment(*last, *first);
            }
        }
    }

    fn text(&mut self, pos: Pos2, align: Align2, text: &str, font: &FontSpec, paint: &Paint) {
        self.painter.text(
            self.to_screen(pos),
            align,
            text,
            font_id(font),
            Self::color_at(paint, pos),
        );
    }
}
