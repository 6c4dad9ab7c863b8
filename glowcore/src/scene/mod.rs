//! scene — the per-widget animation state and the layered frame renderer
//!
//! A widget is a [`Scene`]: a bounded set of decorative elements plus the
//! drawing routines for its four layers. [`AnimationState`] owns the clock,
//! the scene and the seeded random source; the host drives it with exactly
//! one [`AnimationState::tick`] per timer interval and paints with
//! [`AnimationState::paint_frame`] as often as it likes. Painting never
//! mutates anything, so repeated paints of the same tick are identical.

pub mod bolts;
pub mod glyphs;
pub mod network;
pub mod particles;
pub mod rain;

use crate::canvas::Canvas;
use crate::clock::Clock;
use crate::rng::SceneRng;
use crate::surface::Surface;
use egui::{Pos2, Vec2};

/// Read-only view of the animation handed to every scene callback.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub clock: &'a Clock,
    /// Drawable extent in pixels.
    pub size: Vec2,
}

impl Frame<'_> {
    pub fn center(&self) -> Pos2 {
        (self.size / 2.0).to_pos2()
    }

    /// Shorthand for `clock.get(name)`.
    pub fn phase(&self, name: &str) -> f32 {
        self.clock.get(name)
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// One decorative widget.
///
/// Layers are painted back to front: `background` (full-surface clear),
/// `backdrop` (grids, links, fog), `elements` (rings, nodes, particles)
/// and `overlay` (caption and status text). Each layer runs inside its own
/// canvas save/restore, so transforms never leak between layers.
pub trait Scene {
    /// Update simulated elements. Called after the clock advanced.
    fn tick(&mut self, _frame: &Frame<'_>, _rng: &mut SceneRng) {}

    fn background(&self, _canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {}

    fn backdrop(&self, _canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {}

    fn elements(&self, _canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {}

    fn overlay(&self, _canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {}

    /// External listening/speaking flag. Most widgets ignore it.
    fn set_listening(&mut self, _listening: bool) {}

    /// Pointer position in surface coordinates, `None` when outside.
    fn set_pointer(&mut self, _pos: Option<Pos2>) {}

    /// The drawable extent changed; re-seed anything laid out from it.
    fn resize(&mut self, _size: Vec2, _rng: &mut SceneRng) {}
}

/// Everything a running widget owns, passed by `&mut` into the tick and by
/// `&` into painting.
pub struct AnimationState {
    clock: Clock,
    scene: Box<dyn Scene>,
    rng: SceneRng,
    size: Vec2,
    listening: bool,
}

impl AnimationState {
    pub fn new(clock: Clock, scene: Box<dyn Scene>, rng: SceneRng, size: Vec2) -> Self {
        tracing::debug!(?size, phases = clock.phases().len(), "animation state created");
        Self {
            clock,
            scene,
            rng,
            size,
            listening: false,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Advance the clock by one tick, then let the scene integrate motion.
    pub fn tick(&mut self) {
        self.clock.advance();
        let frame = Frame {
            clock: &self.clock,
            size: self.size,
        };
        self.scene.tick(&frame, &mut self.rng);
    }

    /// Paint one frame: background, backdrop, elements, overlay.
    pub fn paint_frame(&self, surface: &mut dyn Surface) {
        let mut canvas = Canvas::new(surface);
        let frame = Frame {
            clock: &self.clock,
            size: canvas.size(),
        };
        let scene = self.scene.as_ref();
        canvas.scoped(|c| scene.background(c, &frame));
        canvas.scoped(|c| scene.backdrop(c, &frame));
        canvas.scoped(|c| scene.elements(c, &frame));
        canvas.scoped(|c| scene.overlay(c, &frame));
    }

    pub fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
        self.scene.set_listening(listening);
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn toggle_listening(&mut self) {
        self.set_listening(!self.listening);
    }

    pub fn set_pointer(&mut self, pos: Option<Pos2>) {
        self.scene.set_pointer(pos);
    }

    /// Adopt a new drawable size. No-op when unchanged or degenerate.
    pub fn resize(&mut self, size: Vec2) {
        if size == self.size || !(size.x > 0.0 && size.y > 0.0) {
            return;
        }
        tracing::debug!(from = ?self.size, to = ?size, "resizing scene");
        self.size = size;
        self.scene.resize(size, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgba;
    use crate::record::{DrawCommand, RecordingSurface};
    use crate::rng::seeded;
    use crate::surface::{FontSpec, Paint};
    use egui::{pos2, vec2, Rect};

    /// Draws one marker per layer, rotating the elements layer.
    struct Layers {
        listening: bool,
    }

    impl Scene for Layers {
        fn background(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
            canvas.fill_background(&Paint::Solid(Rgba::BLACK));
        }

        fn backdrop(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
            canvas.fill_rect(Rect::from_min_size(Pos2::ZERO, vec2(1.0, 1.0)), &Paint::Solid(Rgba::WHITE));
        }

        fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
            canvas.translate(frame.center().to_vec2());
            canvas.rotate(1.0);
            canvas.fill_circle(Pos2::ZERO, 5.0, Rgba::WHITE);
        }

        fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
            let label = if self.listening { "on" } else { "off" };
            canvas.text_at(frame.center(), egui::Align2::CENTER_CENTER, label, FontSpec::sans(10.0), Rgba::WHITE);
        }

        fn set_listening(&mut self, listening: bool) {
            self.listening = listening;
        }
    }

    fn state() -> AnimationState {
        let clock = Clock::new().with_phase("angle", 2.0, 360.0);
        let scene = Layers { listening: false };
        AnimationState::new(clock, Box::new(scene), seeded(3), vec2(100.0, 80.0))
    }

    #[test]
    fn test_layer_order_and_isolation() {
        let state = state();
        let mut surface = RecordingSurface::new(vec2(100.0, 80.0));
        state.paint_frame(&mut surface);
        let cmds = surface.commands();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(cmds[0], DrawCommand::FillRect { .. }));
        assert!(matches!(cmds[1], DrawCommand::FillRect { .. }));
        assert!(matches!(cmds[2], DrawCommand::FillPolygon { .. }));
        // overlay is not affected by the rotation of the elements layer
        match &cmds[3] {
            DrawCommand::Text { pos, text, .. } => {
                assert_eq!(*pos, pos2(50.0, 40.0));
                assert_eq!(text, "off");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_tick_advances_clock_once() {
        let mut state = state();
        state.tick();
        state.tick();
        assert_eq!(state.clock().get("angle"), 4.0);
        assert_eq!(state.clock().ticks(), 2);
    }

    #[test]
    fn test_painting_is_repeatable() {
        let mut state = state();
        state.tick();
        let mut a = RecordingSurface::new(vec2(100.0, 80.0));
        let mut b = RecordingSurface::new(vec2(100.0, 80.0));
        state.paint_frame(&mut a);
        state.paint_frame(&mut b);
        assert_eq!(a.commands(), b.commands());
    }

    #[test]
    fn test_listening_is_forwarded() {
        let mut state = state();
        state.toggle_listening();
        assert!(state.is_listening());
        let mut surface = RecordingSurface::new(vec2(100.0, 80.0));
        state.paint_frame(&mut surface);
        assert_eq!(surface.texts()[0].0, "on");
    }

    #[test]
    fn test_resize_ignores_degenerate() {
        let mut state = state();
        state.resize(vec2(0.0, 10.0));
        assert_eq!(state.size(), vec2(100.0, 80.0));
        state.resize(vec2(300.0, 200.0));
        assert_eq!(state.size(), vec2(300.0, 200.0));
    }
}
