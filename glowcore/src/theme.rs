//! Overlay theme — transparent egui visuals and the shared glow palette
//!
//! Widgets paint straight onto a transparent, undecorated window, so the
//! egui theme only has to get out of the way: no panel fill, no window
//! shadow, no selection tint.

use crate::palette::Rgba;
use egui::{Color32, Visuals};

/// Colors shared by most widgets.
pub struct GlowColors;

impl GlowColors {
    pub const CYAN: Rgba = Rgba::rgb(0, 255, 255);
    pub const SKY: Rgba = Rgba::rgb(0, 200, 255);
    pub const AZURE: Rgba = Rgba::rgb(0, 150, 255);
    pub const MATRIX: Rgba = Rgba::rgb(0, 255, 0);
    pub const MINT: Rgba = Rgba::rgb(200, 255, 200);
    pub const VIOLET: Rgba = Rgba::rgb(147, 112, 219);
    pub const MAGENTA: Rgba = Rgba::rgb(255, 0, 255);
    pub const RUBY: Rgba = Rgba::rgb(255, 0, 80);
    pub const ORANGE: Rgba = Rgba::rgb(255, 140, 0);
}

/// Theme configuration for overlay windows.
pub struct OverlayTheme {
    /// Color egui uses for its own text (tooltips, debug overlays).
    pub text_color: Color32,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            text_color: GlowColors::CYAN.to_color32(),
        }
    }
}

impl OverlayTheme {
    pub fn visuals(&self) -> Visuals {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = Color32::TRANSPARENT;
        visuals.extreme_bg_color = Color32::TRANSPARENT;
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;
        visuals.override_text_color = Some(self.text_color);
        visuals
    }

    /// Apply the overlay theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_are_transparent() {
        let visuals = OverlayTheme::default().visuals();
        assert_eq!(visuals.panel_fill, Color32::TRANSPARENT);
        assert_eq!(visuals.window_fill, Color32::TRANSPARENT);
        assert_eq!(visuals.override_text_color, Some(GlowColors::CYAN.to_color32()));
    }
}
