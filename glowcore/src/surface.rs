//! surface — the device-space drawing contract every backend implements
//!
//! A `Surface` only knows four primitives in pixel coordinates: filled
//! rectangles, filled polygons, stroked polylines and text. Curves,
//! ellipses, transforms and opacity are resolved by [`crate::canvas::Canvas`]
//! before anything reaches a backend.

use crate::palette::Rgba;
use egui::{Align2, Pos2, Rect, Vec2};

/// A color stop of a gradient, `offset` in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// How a shape is filled or a line is colored.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        start: Pos2,
        end: Pos2,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Pos2,
        radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl From<Rgba> for Paint {
    fn from(c: Rgba) -> Self {
        Paint::Solid(c)
    }
}

impl Paint {
    pub fn linear(start: Pos2, end: Pos2, stops: Vec<GradientStop>) -> Self {
        Paint::Linear { start, end, stops }
    }

    pub fn radial(center: Pos2, radius: f32, stops: Vec<GradientStop>) -> Self {
        Paint::Radial {
            center,
            radius,
            stops,
        }
    }

    /// Two-stop radial gradient, `inner` at the center fading to `outer`.
    pub fn radial2(center: Pos2, radius: f32, inner: Rgba, outer: Rgba) -> Self {
        Self::radial(
            center,
            radius,
            vec![GradientStop::new(0.0, inner), GradientStop::new(1.0, outer)],
        )
    }

    /// Gradient position of `p` in `0..=1` (always 0 for solid paint).
    fn offset_at(&self, p: Pos2) -> f32 {
        match self {
            Paint::Solid(_) => 0.0,
            Paint::Linear { start, end, .. } => {
                let axis = *end - *start;
                let len2 = axis.length_sq();
                if len2 <= f32::EPSILON {
                    return 0.0;
                }
                crate::safety::clamp_unit((p - *start).dot(axis) / len2)
            }
            Paint::Radial { center, radius, .. } => {
                if *radius <= f32::EPSILON {
                    return 1.0;
                }
                crate::safety::clamp_unit((p - *center).length() / radius)
            }
        }
    }

    /// Color of the paint at device position `p`.
    pub fn sample(&self, p: Pos2) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => {
                sample_stops(stops, self.offset_at(p))
            }
        }
    }

    /// The paint with every stop's alpha multiplied by `opacity`.
    pub fn with_opacity(&self, opacity: f32) -> Paint {
        if opacity >= 1.0 {
            return self.clone();
        }
        self.map_colors(|c| c.scale_alpha(opacity))
    }

    /// The paint with its gradient geometry passed through `map` and its
    /// radius multiplied by `scale`.
    pub fn mapped(&self, map: impl Fn(Pos2) -> Pos2, scale: f32) -> Paint {
        match self {
            Paint::Solid(c) => Paint::Solid(*c),
            Paint::Linear { start, end, stops } => Paint::Linear {
                start: map(*start),
                end: map(*end),
                stops: stops.clone(),
            },
            Paint::Radial {
                center,
                radius,
                stops,
            } => Paint::Radial {
                center: map(*center),
                radius: radius * scale,
                stops: stops.clone(),
            },
        }
    }

    fn map_colors(&self, f: impl Fn(Rgba) -> Rgba) -> Paint {
        let stops_map = |stops: &[GradientStop]| {
            stops
                .iter()
                .map(|s| GradientStop::new(s.offset, f(s.color)))
                .collect()
        };
        match self {
            Paint::Solid(c) => Paint::Solid(f(*c)),
            Paint::Linear { start, end, stops } => Paint::Linear {
                start: *start,
                end: *end,
                stops: stops_map(stops),
            },
            Paint::Radial {
                center,
                radius,
                stops,
            } => Paint::Radial {
                center: *center,
                radius: *radius,
                stops: stops_map(stops),
            },
        }
    }

    /// True when nothing this paint draws could be visible.
    pub fn is_invisible(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a == 0,
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => {
                stops.iter().all(|s| s.color.a == 0)
            }
        }
    }
}

/// Interpolate a sorted stop list at `t`.
fn sample_stops(stops: &[GradientStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    stops.last().map_or(Rgba::TRANSPARENT, |s| s.color)
}

/// A stroke: width in pixels plus paint.
#[derive(Clone, Debug, PartialEq)]
pub struct Pen {
    pub width: f32,
    pub paint: Paint,
}

impl Pen {
    pub fn new(width: f32, paint: impl Into<Paint>) -> Self {
        Self {
            width: crate::safety::non_negative(width),
            paint: paint.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFamily {
    Sans,
    Mono,
}

/// Font request. `size` is in points (1/72 inch); backends convert to
/// pixels at 96 dpi.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn sans(size: f32) -> Self {
        Self {
            family: FontFamily::Sans,
            size,
            bold: false,
        }
    }

    pub fn mono(size: f32) -> Self {
        Self {
            family: FontFamily::Mono,
            size,
            bold: false,
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            size: self.size * factor,
            ..self
        }
    }

    pub fn pixels(&self) -> f32 {
        self.size * 96.0 / 72.0
    }
}

/// A device-space drawing target.
pub trait Surface {
    /// Drawable extent in pixels.
    fn size(&self) -> Vec2;

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fill a simple polygon. Backends may assume it is star-shaped
    /// around its centroid.
    fn fill_polygon(&mut self, points: &[Pos2], paint: &Paint);

    fn stroke_polyline(&mut self, points: &[Pos2], closed: bool, pen: &Pen);

    /// Draw `text` anchored at `pos` with `align`.
    fn text(&mut self, pos: Pos2, align: Align2, text: &str, font: &FontSpec, paint: &Paint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_linear_sampling() {
        let paint = Paint::linear(
            pos2(0.0, 0.0),
            pos2(100.0, 0.0),
            vec![
                GradientStop::new(0.0, Rgba::rgba(0, 0, 0, 0)),
                GradientStop::new(0.5, Rgba::rgba(200, 0, 0, 200)),
                GradientStop::new(1.0, Rgba::rgba(0, 0, 0, 0)),
            ],
        );
        assert_eq!(paint.sample(pos2(0.0, 50.0)), Rgba::TRANSPARENT);
        assert_eq!(paint.sample(pos2(50.0, 0.0)), Rgba::rgba(200, 0, 0, 200));
        assert_eq!(paint.sample(pos2(25.0, 0.0)), Rgba::rgba(100, 0, 0, 100));
        // beyond the end clamps to the last stop
        assert_eq!(paint.sample(pos2(500.0, 0.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_radial_sampling() {
        let paint = Paint::radial2(pos2(10.0, 10.0), 10.0, Rgba::WHITE, Rgba::BLACK);
        assert_eq!(paint.sample(pos2(10.0, 10.0)), Rgba::WHITE);
        assert_eq!(paint.sample(pos2(30.0, 10.0)), Rgba::BLACK);
    }

    #[test]
    fn test_degenerate_gradients() {
        let zero = Paint::linear(pos2(1.0, 1.0), pos2(1.0, 1.0), vec![GradientStop::new(0.0, Rgba::WHITE)]);
        assert_eq!(zero.sample(pos2(9.0, 9.0)), Rgba::WHITE);
        let empty = Paint::radial(Pos2::ZERO, 5.0, Vec::new());
        assert_eq!(empty.sample(Pos2::ZERO), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_with_opacity() {
        let paint = Paint::Solid(Rgba::rgba(1, 2, 3, 200)).with_opacity(0.5);
        assert_eq!(paint, Paint::Solid(Rgba::rgba(1, 2, 3, 100)));
        assert!(Paint::Solid(Rgba::WHITE).with_opacity(0.0).is_invisible());
    }

    #[test]
    fn test_font_pixels() {
        assert_eq!(FontSpec::sans(12.0).pixels(), 16.0);
        assert!(FontSpec::mono(10.0).bold().bold);
    }
}
