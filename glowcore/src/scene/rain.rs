//! rain — "digital rain" glyph columns scrolling down the surface
//!
//! Each column keeps its slot for the lifetime of the field. When it has
//! scrolled past the bottom it is reset in place with a new start height,
//! speed, brightness and glyph string.

use crate::canvas::Canvas;
use crate::palette::Rgba;
use crate::rng::{chance, pick, uniform, uniform_int, SceneRng};
use crate::surface::FontSpec;
use egui::{Align2, Pos2};

/// Which way a column's glyphs extend from its head position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trail {
    /// Head at `y`, tail drawn above it (`y - i * line_height`).
    Above,
    /// Head at `y`, tail drawn below it (`y + i * line_height`).
    Below,
}

#[derive(Clone, Debug)]
pub struct RainConfig {
    pub charset: Vec<char>,
    pub line_height: f32,
    pub speed: (f32, f32),
    /// Inclusive glyph count range.
    pub length: (usize, usize),
    pub spawn_y: (f32, f32),
    pub respawn_y: (f32, f32),
    pub brightness: (f32, f32),
    /// Per tick, per column probability that one glyph changes.
    pub mutation: f32,
    /// Per tick, per column probability that one glyph flashes.
    pub flash: f32,
    pub trail: Trail,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RainColumn {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub glyphs: Vec<char>,
    /// 0..=1, scales the column's opacity.
    pub brightness: f32,
    /// Glyph index drawn highlighted this tick.
    pub flash: Option<usize>,
}

impl RainColumn {
    /// Position of glyph `index`.
    pub fn glyph_pos(&self, index: usize, line_height: f32, trail: Trail) -> Pos2 {
        let dy = index as f32 * line_height;
        match trail {
            Trail::Above => Pos2::new(self.x, self.y - dy),
            Trail::Below => Pos2::new(self.x, self.y + dy),
        }
    }
}

pub struct RainField {
    columns: Vec<RainColumn>,
    config: RainConfig,
}

impl RainField {
    /// One column every `spacing` pixels across `width`.
    pub fn evenly_spaced(width: f32, spacing: f32, config: RainConfig, rng: &mut SceneRng) -> Self {
        let count = if spacing > 0.0 {
            (crate::safety::non_negative(width) / spacing) as usize
        } else {
            0
        };
        let xs: Vec<f32> = (0..count).map(|i| i as f32 * spacing).collect();
        Self::with_columns(xs, config, rng)
    }

    /// `count` columns at random x positions within `width`.
    pub fn scattered(count: usize, width: f32, config: RainConfig, rng: &mut SceneRng) -> Self {
        let xs: Vec<f32> = (0..count)
            .map(|_| uniform_int(rng, 0, width as i32) as f32)
            .collect();
        Self::with_columns(xs, config, rng)
    }

    fn with_columns(xs: Vec<f32>, config: RainConfig, rng: &mut SceneRng) -> Self {
        let columns = xs
            .into_iter()
            .map(|x| {
                let len = uniform_int(rng, config.length.0 as i32, config.length.1 as i32) as usize;
                RainColumn {
                    x,
                    y: uniform_int(rng, config.spawn_y.0 as i32, config.spawn_y.1 as i32) as f32,
                    speed: uniform(rng, config.speed.0, config.speed.1),
                    glyphs: random_glyphs(rng, &config.charset, len),
                    brightness: uniform(rng, config.brightness.0, config.brightness.1),
                    flash: None,
                }
            })
            .collect();
        Self { columns, config }
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    fn has_left(&self, column: &RainColumn, height: f32) -> bool {
        match self.config.trail {
            Trail::Above => column.y - column.glyphs.len() as f32 * self.config.line_height > height,
            Trail::Below => column.y > height,
        }
    }

    pub fn tick(&mut self, height: f32, rng: &mut SceneRng) {
        for i in 0..self.columns.len() {
            self.columns[i].y += self.columns[i].speed;

            if self.has_left(&self.columns[i], height) {
                let cfg = &self.config;
                let column = &mut self.columns[i];
                column.y = uniform_int(rng, cfg.respawn_y.0 as i32, cfg.respawn_y.1 as i32) as f32;
                column.glyphs = random_glyphs(rng, &cfg.charset, column.glyphs.len());
                column.speed = uniform(rng, cfg.speed.0, cfg.speed.1);
                column.brightness = uniform(rng, cfg.brightness.0, cfg.brightness.1);
                tracing::trace!(x = column.x, "rain column respawned");
            }

            let cfg = &self.config;
            let column = &mut self.columns[i];
            let len = column.glyphs.len();
            if len > 0 && chance(rng, cfg.mutation) {
                let idx = uniform_int(rng, 0, len as i32 - 1) as usize;
                if let Some(c) = pick(rng, &cfg.charset) {
                    column.glyphs[idx] = c;
                }
            }
            column.flash = if len > 0 && chance(rng, cfg.flash) {
                Some(uniform_int(rng, 0, len as i32 - 1) as usize)
            } else {
                None
            };
        }
    }

    /// Reposition columns for a new width, keeping their state.
    pub fn respread(&mut self, width: f32, spacing: f32, rng: &mut SceneRng) {
        let config = self.config.clone();
        *self = Self::evenly_spaced(width, spacing, config, rng);
    }

    /// Draw every glyph; `color(column, index)` decides its color.
    pub fn paint(&self, canvas: &mut Canvas<'_>, font: FontSpec, color: impl Fn(&RainColumn, usize) -> Rgba) {
        let mut buf = [0u8; 4];
        let height = canvas.size().y;
        for column in &self.columns {
            for (i, c) in column.glyphs.iter().enumerate() {
                let pos = column.glyph_pos(i, self.config.line_height, self.config.trail);
                if pos.y < -self.config.line_height || pos.y > height + self.config.line_height {
                    continue;
                }
                canvas.text_at(pos, Align2::LEFT_BOTTOM, c.encode_utf8(&mut buf), font, color(column, i));
            }
        }
    }
}

fn random_glyphs(rng: &mut SceneRng, charset: &[char], len: usize) -> Vec<char> {
    (0..len).filter_map(|_| pick(rng, charset)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    fn config(trail: Trail) -> RainConfig {
        RainConfig {
            charset: crate::scene::glyphs::alphanumeric(),
            line_height: 20.0,
            speed: (3.0, 10.0),
            length: (15, 30),
            spawn_y: (-1000.0, 0.0),
            respawn_y: (-500.0, 0.0),
            brightness: (0.5, 1.0),
            mutation: 0.05,
            flash: 0.1,
            trail,
        }
    }

    #[test]
    fn test_evenly_spaced_columns() {
        let mut rng = seeded(11);
        let field = RainField::evenly_spaced(260.0, 25.0, config(Trail::Above), &mut rng);
        assert_eq!(field.columns().len(), 10);
        assert_eq!(field.columns()[3].x, 75.0);
        for c in field.columns() {
            assert!((15..=30).contains(&c.glyphs.len()));
            assert!((-1000.0..=0.0).contains(&c.y));
            assert!((0.5..1.0).contains(&c.brightness));
        }
    }

    #[test]
    fn test_columns_respawn_in_place() {
        let mut rng = seeded(12);
        let mut field = RainField::scattered(40, 800.0, config(Trail::Below), &mut rng);
        let xs: Vec<f32> = field.columns().iter().map(|c| c.x).collect();
        let lens: Vec<usize> = field.columns().iter().map(|c| c.glyphs.len()).collect();
        for _ in 0..2000 {
            field.tick(600.0, &mut rng);
            assert_eq!(field.columns().len(), 40);
            for c in field.columns() {
                assert!(c.y <= 600.0 + 10.0);
            }
        }
        let xs_after: Vec<f32> = field.columns().iter().map(|c| c.x).collect();
        let lens_after: Vec<usize> = field.columns().iter().map(|c| c.glyphs.len()).collect();
        assert_eq!(xs, xs_after);
        assert_eq!(lens, lens_after);
    }

    #[test]
    fn test_trail_direction() {
        let column = RainColumn {
            x: 5.0,
            y: 100.0,
            speed: 1.0,
            glyphs: vec!['a'; 3],
            brightness: 1.0,
            flash: None,
        };
        assert_eq!(column.glyph_pos(2, 20.0, Trail::Above), Pos2::new(5.0, 60.0));
        assert_eq!(column.glyph_pos(2, 20.0, Trail::Below), Pos2::new(5.0, 140.0));
    }
}
