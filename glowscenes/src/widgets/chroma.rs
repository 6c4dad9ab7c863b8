//! chroma — slowly hue-cycling discs wobbling around the centre under a
//! white halo caption

use crate::motifs::centered_rect;
use egui::{vec2, Vec2};
use glowcore::derive::radians;
use glowcore::surface::{GradientStop, Paint};
use glowcore::{Canvas, Clock, FontSpec, Frame, Rgba, Scene, SceneRng};

const CIRCLES: usize = 4;
const GLOW_PASSES: usize = 8;
/// Energy above which the status reads active.
const ACTIVE_ENERGY: f32 = 0.7;

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 2.0, 360.0)
        .with_accumulator("pulse", 0.1)
        .with_phase("hue", 1.0, 360.0)
}

pub fn energy(pulse: f32) -> f32 {
    0.5 + 0.3 * pulse.sin()
}

pub fn status_text(energy: f32) -> &'static str {
    if energy > ACTIVE_ENERGY {
        "Active"
    } else {
        "Inactive"
    }
}

/// Base color of disc `index` at the current hue.
pub fn disc_color(hue: f32, index: usize) -> Rgba {
    Rgba::from_hsl(hue + index as f32 * 30.0, 200.0 / 255.0, 150.0 / 255.0, 255)
}

/// Halo passes in draw order: the widest and faintest first, each as
/// (alpha, diagonal offset).
pub fn halo_passes() -> Vec<(u8, f32)> {
    (1..=GLOW_PASSES)
        .rev()
        .map(|i| ((255 - 30 * i as i32).max(20) as u8, 0.5 * i as f32))
        .collect()
}

pub struct Chroma {
    label: String,
}

impl Chroma {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for Chroma {
    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let tint = Rgba::from_hsl(frame.phase("hue"), 150.0 / 255.0, 50.0 / 255.0, 150);
        let radius = frame.width().max(frame.height()) / 2.0;
        canvas.fill_background(&Paint::radial2(frame.center(), radius, tint, Rgba::TRANSPARENT));
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let hue = frame.phase("hue");
        let angle = frame.phase("angle");
        for i in 0..CIRCLES {
            let radius = 50.0 + i as f32 * 40.0;
            let color = disc_color(hue, i);
            let wobble = 10.0 * radians(angle + i as f32 * 40.0).sin();
            let fill = Paint::radial(
                c,
                radius,
                vec![
                    GradientStop::new(0.0, color.lighter(1.5)),
                    GradientStop::new(1.0, color.darker(1.5)),
                ],
            );
            canvas.fill_circle(c + vec2(wobble, wobble), radius, fill);
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let font = FontSpec::sans(32.0).bold();
        for (alpha, offset) in halo_passes() {
            let rect = centered_rect(c + Vec2::splat(offset), 400.0, 80.0);
            canvas.text_in(rect, &self.label, font, Rgba::WHITE.with_alpha(alpha));
        }
        canvas.text_in(centered_rect(c, 400.0, 80.0), &self.label, font, Rgba::WHITE);

        canvas.text_in(
            centered_rect(c + vec2(0.0, 65.0), 100.0, 30.0),
            status_text(energy(frame.phase("pulse"))),
            FontSpec::sans(14.0),
            Rgba::rgb(200, 200, 200),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::{DrawCommand, RecordingSurface};
    use glowcore::surface::Paint;
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_status_threshold() {
        assert_eq!(status_text(energy(0.0)), "Inactive");
        assert_eq!(status_text(energy(std::f32::consts::FRAC_PI_2)), "Active");
    }

    #[test]
    fn test_discs_step_through_hues() {
        assert_ne!(disc_color(0.0, 0), disc_color(0.0, 1));
        assert_eq!(disc_color(30.0, 0), disc_color(0.0, 1));
        assert_eq!(disc_color(360.0, 2), disc_color(0.0, 2));
    }

    #[test]
    fn test_status_follows_pulse() {
        let mut rng = seeded(0);
        let scene = Chroma::new("Chroma", vec2(800.0, 600.0), &mut rng);
        let mut state = AnimationState::new(clock(), Box::new(scene), rng, vec2(800.0, 600.0));
        // pulse 1.5 is near the crest of the energy curve
        for _ in 0..15 {
            state.tick();
        }
        let mut surface = RecordingSurface::new(vec2(800.0, 600.0));
        state.paint_frame(&mut surface);
        let texts = surface.texts();
        assert_eq!(texts.last().map(|(t, _)| *t), Some("Active"));
        assert_eq!(texts.iter().filter(|(t, _)| *t == "Chroma").count(), 9);
    }

    #[test]
    fn test_halo_rises_towards_the_core() {
        let passes = halo_passes();
        let alphas: Vec<u8> = passes.iter().map(|(a, _)| *a).collect();
        assert_eq!(alphas, vec![20, 45, 75, 105, 135, 165, 195, 225]);
        assert_eq!(passes[0].1, 4.0);
        assert_eq!(passes[7].1, 0.5);
    }

    #[test]
    fn test_caption_drawn_faint_to_solid() {
        let mut rng = seeded(0);
        let scene = Chroma::new("Chroma", vec2(800.0, 600.0), &mut rng);
        let state = AnimationState::new(clock(), Box::new(scene), rng, vec2(800.0, 600.0));
        let mut surface = RecordingSurface::new(vec2(800.0, 600.0));
        state.paint_frame(&mut surface);

        let caption: Vec<(u8, f32)> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { pos, text, paint: Paint::Solid(color), .. } if text == "Chroma" => {
                    Some((color.a, pos.x))
                }
                _ => None,
            })
            .collect();
        let expected: Vec<(u8, f32)> = halo_passes()
            .into_iter()
            .map(|(a, offset)| (a, 400.0 + offset))
            .chain([(255, 400.0)])
            .collect();
        assert_eq!(caption, expected);
    }
}
