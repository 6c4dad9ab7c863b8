//! palette — straight-alpha RGBA colors shared by every backend

use egui::Color32;

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a new alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha taken from a float channel value.
    /// Out-of-range and NaN values are clamped instead of wrapping.
    pub fn with_alpha_f(self, a: f32) -> Self {
        self.with_alpha(crate::derive::alpha(a))
    }

    /// Multiply the alpha channel by `factor` (clamped to `0..=1`).
    pub fn scale_alpha(self, factor: f32) -> Self {
        let f = crate::safety::clamp_unit(factor);
        self.with_alpha((self.a as f32 * f).round() as u8)
    }

    /// Channel-wise linear interpolation, alpha included.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = crate::safety::clamp_unit(t);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Build a color from hue (degrees), saturation and lightness in `0..=1`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32, a: u8) -> Self {
        let h = crate::safety::finite_or(hue, 0.0).rem_euclid(360.0) / 60.0;
        let s = crate::safety::clamp_unit(saturation);
        let l = crate::safety::clamp_unit(lightness);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgba(channel(r), channel(g), channel(b), a)
    }

    /// Brighten by scaling every channel, e.g. `lighter(1.5)`.
    pub fn lighter(self, factor: f32) -> Self {
        self.scale_channels(factor.max(1.0))
    }

    /// Darken by dividing every channel, e.g. `darker(2.0)` halves them.
    pub fn darker(self, factor: f32) -> Self {
        self.scale_channels(1.0 / factor.max(1.0))
    }

    fn scale_channels(self, factor: f32) -> Self {
        let scale = |v: u8| (v as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba> for Color32 {
    fn from(c: Rgba) -> Self {
        c.to_color32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Rgba::from_hsl(0.0, 1.0, 0.5, 255), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_hsl(120.0, 1.0, 0.5, 255), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::from_hsl(240.0, 1.0, 0.5, 255), Rgba::rgb(0, 0, 255));
        // hue wraps
        assert_eq!(Rgba::from_hsl(480.0, 1.0, 0.5, 9), Rgba::rgba(0, 255, 0, 9));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::rgba(0, 0, 0, 0);
        let b = Rgba::rgba(200, 100, 50, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgba::rgba(100, 50, 25, 128));
    }

    #[test]
    fn test_alpha_helpers_clamp() {
        let c = Rgba::rgb(10, 20, 30);
        assert_eq!(c.with_alpha_f(300.0).a, 255);
        assert_eq!(c.with_alpha_f(-5.0).a, 0);
        assert_eq!(c.with_alpha_f(f32::NAN).a, 0);
        assert_eq!(c.scale_alpha(0.5).a, 128);
    }

    #[test]
    fn test_lighter_darker() {
        let c = Rgba::rgb(100, 200, 40);
        assert_eq!(c.lighter(1.5), Rgba::rgb(150, 255, 60));
        assert_eq!(c.darker(2.0), Rgba::rgb(50, 100, 20));
    }
}
