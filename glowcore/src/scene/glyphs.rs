//! glyphs — character sets and per-character scrambled status lines

use crate::canvas::Canvas;
use crate::palette::Rgba;
use crate::rng::{chance, pick, SceneRng};
use crate::surface::FontSpec;
use egui::{Align2, Pos2, Vec2};

/// ASCII letters and digits.
pub fn alphanumeric() -> Vec<char> {
    ('a'..='z').chain('A'..='Z').chain('0'..='9').collect()
}

/// Upper-case letters and digits.
pub fn upper_digits() -> Vec<char> {
    ('A'..='Z').chain('0'..='9').collect()
}

/// Katakana block (U+30A0..=U+30FF) followed by letters and digits.
pub fn matrix() -> Vec<char> {
    ('\u{30A0}'..='\u{30FF}').chain(alphanumeric()).collect()
}

/// A status line whose characters are independently swapped for random
/// glyphs on every tick.
#[derive(Clone, Debug)]
pub struct ScrambledText {
    text: Vec<char>,
    shown: Vec<char>,
    charset: Vec<char>,
    chance: f32,
}

impl ScrambledText {
    pub fn new(text: &str, charset: Vec<char>, chance: f32) -> Self {
        let text: Vec<char> = text.chars().collect();
        Self {
            shown: text.clone(),
            text,
            charset,
            chance,
        }
    }

    /// Replace the underlying text, keeping the charset.
    pub fn set_text(&mut self, text: &str) {
        if self.text.iter().copied().eq(text.chars()) {
            return;
        }
        self.text = text.chars().collect();
        self.shown = self.text.clone();
    }

    pub fn tick(&mut self, rng: &mut SceneRng) {
        for (shown, original) in self.shown.iter_mut().zip(&self.text) {
            *shown = if chance(rng, self.chance) {
                pick(rng, &self.charset).unwrap_or(*original)
            } else {
                *original
            };
        }
    }

    pub fn shown(&self) -> String {
        self.shown.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    /// Draw one glyph per `advance`, centred horizontally on `center`.
    /// `color` receives the character index.
    pub fn paint(
        &self,
        canvas: &mut Canvas<'_>,
        center: Pos2,
        advance: f32,
        font: FontSpec,
        color: impl Fn(usize) -> Rgba,
    ) {
        let start = center.x - self.shown.len() as f32 * advance / 2.0;
        let mut buf = [0u8; 4];
        for (i, c) in self.shown.iter().enumerate() {
            let pos = Pos2::new(start + i as f32 * advance, center.y);
            canvas.text_at(pos, Align2::LEFT_BOTTOM, c.encode_utf8(&mut buf), font, color(i));
        }
    }
}

/// Random jitter offsets for glitching captions, one per pass.
pub fn jitter(rng: &mut SceneRng, passes: usize, probability: f32, amount: f32) -> Vec<Vec2> {
    (0..passes)
        .map(|_| {
            if chance(rng, probability) {
                Vec2::new(
                    crate::rng::uniform(rng, -amount, amount),
                    crate::rng::uniform(rng, -amount, amount),
                )
            } else {
                Vec2::ZERO
            }
        })
        .collect()
}
