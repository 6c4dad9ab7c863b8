//! scanner — radar sweep over a rippling grid, with concentric range rings,
//! a ring of data points and a scan bar running through the caption
//!
//! Drawn in centre-relative coordinates: each layer translates the canvas
//! to the middle of the window first.

use crate::motifs::centered_rect;
use egui::{pos2, vec2, Pos2, Rect, Vec2};
use glowcore::derive::{orbit, radians};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowColors, Scene, SceneRng};

const GRID_EXTENT: i32 = 300;
const GRID_SPACING: usize = 30;
const RIPPLE_STEP: i32 = 5;
const SWEEP_RADIUS: f32 = 200.0;
const TRAIL: usize = 5;
const RINGS: usize = 4;
const POINTS: usize = 12;
/// Height of the band the caption scan bar runs through.
const CAPTION_BAND: f32 = 40.0;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("sweep", 4.0, 360.0)
        .with_phase("wave", 0.2, Clock::TAU)
        .with_phase("scan", 2.0, 200.0)
}

/// One horizontal grid line at height `y`, rippling with `wave`.
pub fn ripple(y: f32, wave: f32) -> Vec<Pos2> {
    (-GRID_EXTENT..=GRID_EXTENT)
        .step_by(RIPPLE_STEP as usize)
        .map(|x| {
            let x = x as f32;
            pos2(x, y + (x / 30.0 + wave).sin() * 5.0)
        })
        .collect()
}

/// Angle (degrees) and pen width of sweep trail pass `i`.
pub fn trail(sweep_deg: f32, i: usize) -> (f32, f32) {
    (sweep_deg - i as f32 * 5.0, 3.0 - i as f32 * 0.5)
}

pub struct Scanner {
    label: String,
}

impl Scanner {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for Scanner {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.translate(frame.center().to_vec2());
        let wave = frame.phase("wave");
        let pen = Pen::new(1.0, GlowColors::CYAN.with_alpha(30));
        let extent = GRID_EXTENT as f32;
        for i in (-GRID_EXTENT..=GRID_EXTENT).step_by(GRID_SPACING) {
            let i = i as f32;
            canvas.polyline(&ripple(i, wave), false, &pen);
            canvas.line(pos2(i, -extent), pos2(i, extent), &pen);
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.translate(frame.center().to_vec2());
        let origin = Pos2::ZERO;

        let sweep = frame.phase("sweep");
        for i in 0..TRAIL {
            let (angle, width) = trail(sweep, i);
            let fade = (150.0 - i as f32 * 30.0) / 150.0;
            let beam = Paint::radial2(
                origin,
                SWEEP_RADIUS,
                GlowColors::CYAN.with_alpha(100).scale_alpha(fade),
                GlowColors::CYAN.with_alpha(0),
            );
            canvas.line(origin, orbit(origin, SWEEP_RADIUS, radians(angle)), &Pen::new(width, beam));
        }

        for i in 0..RINGS {
            let pen = Pen::new(2.0, GlowColors::CYAN.with_alpha(100 - i as u8 * 20));
            canvas.stroke_circle(origin, 50.0 + i as f32 * 50.0, &pen);
        }

        let wave = frame.phase("wave");
        let points: Vec<Pos2> = (0..POINTS)
            .map(|i| orbit(origin, 150.0 + (wave + i as f32).sin() * 20.0, radians(i as f32 * 30.0)))
            .collect();
        canvas.polyline(&points, false, &Pen::new(1.0, GlowColors::CYAN.with_alpha(100)));
        for p in &points {
            canvas.fill_circle(*p, 4.0, GlowColors::CYAN.with_alpha(150));
        }

        let bar_y = frame.phase("scan") - 100.0;
        let bar = Paint::radial2(pos2(0.0, bar_y), 300.0, GlowColors::CYAN.with_alpha(50), GlowColors::CYAN.with_alpha(0));
        canvas.fill_rect(Rect::from_min_size(pos2(-300.0, bar_y), vec2(600.0, 5.0)), &bar);
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.translate(frame.center().to_vec2());
        let band = centered_rect(Pos2::ZERO, 200.0, CAPTION_BAND);
        let scan_y = band.top() + frame.phase("scan") % CAPTION_BAND;
        let paint = Paint::radial2(pos2(0.0, scan_y), 100.0, GlowColors::CYAN, GlowColors::CYAN.with_alpha(100));
        canvas.text_in(band, &self.label, FontSpec::sans(30.0).bold(), paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::{DrawCommand, RecordingSurface};
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_ripple_spans_grid() {
        let line = ripple(30.0, 0.0);
        assert_eq!(line.len(), 121);
        assert_eq!(line[0].x, -300.0);
        assert_eq!(line[120].x, 300.0);
        assert!(line.iter().all(|p| (p.y - 30.0).abs() <= 5.0 + 1e-4));
    }

    #[test]
    fn test_trail_thins_behind_sweep() {
        assert_eq!(trail(90.0, 0), (90.0, 3.0));
        assert_eq!(trail(90.0, 4), (70.0, 1.0));
    }

    #[test]
    fn test_drawn_about_window_centre() {
        let mut rng = seeded(0);
        let scene = Scanner::new("Scan", vec2(600.0, 600.0), &mut rng);
        let mut state = AnimationState::new(clock(), Box::new(scene), rng, vec2(600.0, 600.0));
        state.tick();
        let mut surface = RecordingSurface::new(vec2(600.0, 600.0));
        state.paint_frame(&mut surface);
        let text = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Text { pos, text, .. } => Some((*pos, text.clone())),
            _ => None,
        });
        assert_eq!(text, Some((pos2(300.0, 300.0), "Scan".to_string())));
    }
}
