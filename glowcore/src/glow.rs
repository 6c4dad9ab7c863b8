//! glow — multi-pass text bloom without a blur pass
//!
//! The same caption is drawn `passes` times. Pass `i` uses opacity
//! `(passes - i) * alpha_step * intensity` and is nudged by `drift * i`, so
//! the opacity sequence never increases from the first pass to the last.
//! An optional solid core is drawn after every pass at the unshifted
//! position.

use crate::canvas::Canvas;
use crate::derive;
use crate::palette::Rgba;
use crate::surface::{FontSpec, Paint};
use egui::{Align2, Pos2, Vec2};

/// Builder for a glowing caption.
#[derive(Clone, Debug)]
pub struct GlowText<'a> {
    text: &'a str,
    anchor: Pos2,
    align: Align2,
    font: FontSpec,
    color: Rgba,
    passes: usize,
    alpha_step: f32,
    intensity: f32,
    drift: Vec2,
    shift: Vec2,
    core: Option<Rgba>,
}

impl<'a> GlowText<'a> {
    /// Centered at `anchor`, 10 passes of step 15, no drift, no core.
    pub fn new(text: &'a str, anchor: Pos2, font: FontSpec, color: Rgba) -> Self {
        Self {
            text,
            anchor,
            align: Align2::CENTER_CENTER,
            font,
            color,
            passes: 10,
            alpha_step: 15.0,
            intensity: 1.0,
            drift: Vec2::ZERO,
            shift: Vec2::ZERO,
            core: None,
        }
    }

    pub fn align(mut self, align: Align2) -> Self {
        self.align = align;
        self
    }

    pub fn passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    /// Opacity added per remaining pass.
    pub fn alpha_step(mut self, step: f32) -> Self {
        self.alpha_step = crate::safety::non_negative(step);
        self
    }

    /// Global multiplier on every pass, e.g. a pulsing `|sin|`.
    pub fn intensity(mut self, intensity: f32) -> Self {
        self.intensity = crate::safety::non_negative(intensity);
        self
    }

    /// Offset added per pass index.
    pub fn drift(mut self, drift: Vec2) -> Self {
        self.drift = drift;
        self
    }

    /// Offset shared by all glow passes (not the core).
    pub fn shift(mut self, shift: Vec2) -> Self {
        self.shift = shift;
        self
    }

    /// Solid foreground drawn last.
    pub fn core(mut self, color: Rgba) -> Self {
        self.core = Some(color);
        self
    }

    pub fn pass_alpha(&self, index: usize) -> u8 {
        let remaining = self.passes.saturating_sub(index) as f32;
        derive::alpha(remaining * self.alpha_step * self.intensity)
    }

    /// Alpha of every pass in draw order.
    pub fn pass_alphas(&self) -> Vec<u8> {
        (0..self.passes).map(|i| self.pass_alpha(i)).collect()
    }

    pub fn paint(&self, canvas: &mut Canvas<'_>) {
        for i in 0..self.passes {
            let pos = self.anchor + self.shift + self.drift * i as f32;
            let color = self.color.with_alpha(self.pass_alpha(i));
            canvas.text_at(pos, self.align, self.text, self.font, color);
        }
        if let Some(core) = self.core {
            canvas.text_at(self.anchor, self.align, self.text, self.font, core);
        }
    }
}

/// Glitching caption: a few passes in different colors, each with its own
/// jitter offset and opacity.
#[derive(Clone, Debug)]
pub struct GlitchText<'a> {
    pub text: &'a str,
    pub anchor: Pos2,
    pub font: FontSpec,
    /// `(color, offset)` per pass, drawn in order.
    pub layers: Vec<(Rgba, Vec2)>,
}

impl GlitchText<'_> {
    pub fn paint(&self, canvas: &mut Canvas<'_>) {
        for (color, offset) in &self.layers {
            canvas.text_at(
                self.anchor + *offset,
                Align2::CENTER_CENTER,
                self.text,
                self.font,
                Paint::Solid(*color),
            );
        }
    }
}
