//! glowcore — animation clock, scene model and immediate-mode renderer
//! for decorative glow overlays

pub mod canvas;
pub mod clock;
pub mod derive;
pub mod glow;
pub mod painter;
pub mod palette;
pub mod path;
pub mod raster;
pub mod record;
pub mod rng;
pub mod safety;
pub mod scene;
pub mod surface;
pub mod theme;
pub mod timer;

pub use canvas::Canvas;
pub use clock::Clock;
pub use glow::{GlitchText, GlowText};
pub use palette::Rgba;
pub use rng::SceneRng;
pub use scene::{AnimationState, Frame, Scene};
pub use surface::{FontSpec, GradientStop, Paint, Pen, Surface};
pub use theme::{GlowColors, OverlayTheme};

/// Window position offset for the n-th overlay instance, read from the
/// `GLOWDECK_CASCADE` environment variable so several widgets can be
/// launched without stacking exactly on top of each other.
pub fn cascade_position() -> Option<egui::Pos2> {
    std::env::var("GLOWDECK_CASCADE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| {
            let offset = (n as f32) * 30.0;
            egui::Pos2::new(100.0 + offset, 100.0 + offset)
        })
}
