//! raster — headless tiny-skia backend for [`Surface`]
//!
//! Used for PNG snapshots and pixel-level tests. tiny-skia has no text
//! shaping, so text commands are counted and skipped.

use crate::palette::Rgba;
use crate::surface::{FontSpec, GradientStop, Paint, Pen, Surface};
use egui::{vec2, Align2, Pos2, Rect, Vec2};
use std::path::Path;
use thiserror::Error;
use tiny_skia::{
    FillRule, LineCap, LineJoin, PathBuilder, Pixmap, Point, Shader, SpreadMode, Stroke, Transform,
};

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("invalid surface size {0}x{1}")]
    InvalidSize(u32, u32),

    #[error("png encoding failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;

/// An RGBA pixel buffer that widgets can paint into without a window.
pub struct RasterSurface {
    pixmap: Pixmap,
    skipped_text: usize,
}

impl RasterSurface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize(width, height))?;
        Ok(Self {
            pixmap,
            skipped_text: 0,
        })
    }

    /// Fill with an opaque backdrop, for snapshots of translucent widgets.
    pub fn clear(&mut self, color: Rgba) {
        self.pixmap.fill(color.to_skia());
    }

    /// Premultiplied alpha of the pixel at `(x, y)`, 0 when out of bounds.
    pub fn pixel_alpha(&self, x: u32, y: u32) -> u8 {
        self.pixmap.pixel(x, y).map_or(0, |p| p.alpha())
    }

    /// Number of pixels with any coverage.
    pub fn covered_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    /// Text commands received and not rasterised.
    pub fn skipped_text(&self) -> usize {
        self.skipped_text
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RasterError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), "wrote snapshot");
        Ok(())
    }
}

fn skia_stops(stops: &[GradientStop]) -> Vec<tiny_skia::GradientStop> {
    stops
        .iter()
        .map(|s| tiny_skia::GradientStop::new(s.offset, s.color.to_skia()))
        .collect()
}

/// Convert a paint into a tiny-skia paint. Degenerate gradients (which
/// tiny-skia refuses to build) fall back to their first color.
fn skia_paint(paint: &Paint) -> tiny_skia::Paint<'static> {
    let mut out = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    let fallback = paint.sample(Pos2::ZERO);
    let shader = match paint {
        Paint::Solid(c) => Some(Shader::SolidColor(c.to_skia())),
        Paint::Linear { start, end, stops } => tiny_skia::LinearGradient::new(
            Point::from_xy(start.x, start.y),
            Point::from_xy(end.x, end.y),
            skia_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        ),
        Paint::Radial {
            center,
            radius,
            stops,
        } => tiny_skia::RadialGradient::new(
            Point::from_xy(center.x, center.y),
            Point::from_xy(center.x, center.y),
            *radius,
            skia_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        ),
    };
    out.shader = shader.unwrap_or(Shader::SolidColor(fallback.to_skia()));
    out
}

fn polygon_path(points: &[Pos2], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        vec2(self.pixmap.width() as f32, self.pixmap.height() as f32)
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(r) = tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y) else {
            return;
        };
        self.pixmap
            .fill_rect(r, &skia_paint(paint), Transform::identity(), None);
    }

    fn fill_polygon(&mut self, points: &[Pos2], paint: &Paint) {
        if let Some(path) = polygon_path(points, true) {
            self.pixmap.fill_path(
                &path,
                &skia_paint(paint),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_polyline(&mut self, points: &[Pos2], closed: bool, pen: &Pen) {
        let Some(path) = polygon_path(points, closed) else {
            return;
        };
        let stroke = Stroke {
            width: pen.width.max(0.1),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &skia_paint(&pen.paint),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn text(&mut self, _pos: Pos2, _align: Align2, text: &str, _font: &FontSpec, _paint: &Paint) {
        self.skipped_text += 1;
        tracing::trace!(text, "raster backend skips text");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use egui::pos2;

    #[test]
    fn test_invalid_size() {
        assert!(matches!(RasterSurface::new(0, 10), Err(RasterError::InvalidSize(0, 10))));
    }

    #[test]
    fn test_circle_covers_center_only() {
        let mut surface = RasterSurface::new(64, 64).unwrap();
        {
            let mut canvas = Canvas::new(&mut surface);
            canvas.fill_circle(pos2(32.0, 32.0), 10.0, Rgba::rgb(255, 0, 0));
        }
        assert_eq!(surface.pixel_alpha(32, 32), 255);
        assert_eq!(surface.pixel_alpha(2, 2), 0);
        assert!(surface.covered_pixels() > 250);
    }

    #[test]
    fn test_radial_gradient_fades() {
        let mut surface = RasterSurface::new(64, 64).unwrap();
        {
            let mut canvas = Canvas::new(&mut surface);
            let paint = Paint::radial2(pos2(32.0, 32.0), 30.0, Rgba::WHITE, Rgba::TRANSPARENT);
            canvas.fill_background(&paint);
        }
        assert!(surface.pixel_alpha(32, 32) > surface.pixel_alpha(32, 55));
        assert_eq!(surface.pixel_alpha(0, 0), 0);
    }

    #[test]
    fn test_text_is_counted_and_png_encodes() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        {
            let mut canvas = Canvas::new(&mut surface);
            canvas.text_at(pos2(1.0, 1.0), Align2::LEFT_TOP, "hi", FontSpec::sans(10.0), Rgba::WHITE);
        }
        assert_eq!(surface.skipped_text(), 1);
        let png = surface.encode_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
