//! neural-scanner — a small feed-forward net with data pulses on its edges
//!
//! Everything scales with `min(width, height) / 800`, so the widget can be
//! resized freely.

use crate::motifs::{centered_rect, dashed_ring};
use egui::{pos2, Pos2, Vec2};
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowText, Rgba, Scene, SceneRng};

const LAYERS: [usize; 4] = [4, 6, 6, 4];
const HOT: Rgba = Rgba::rgb(255, 0, 100);
const COLD: Rgba = Rgba::rgb(150, 0, 255);

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("angle", 1.0, 360.0)
        .with_phase("pulse", 0.1, Clock::TAU)
        .with_phase("flow", 2.0, 100.0)
}

fn scale_of(size: Vec2) -> f32 {
    size.x.min(size.y) / 800.0
}

/// Position of `node` in `layer`, bobbing with the pulse.
fn node_pos(center: Pos2, scale: f32, layer: usize, node: usize, pulse: f32) -> Pos2 {
    let count = LAYERS[layer];
    let oscillation = 0.5 * (pulse + (node % 20) as f32 / 2.0).sin();
    pos2(
        center.x + (layer as f32 - 1.5) * 150.0 * scale,
        center.y + (node as f32 - (count - 1) as f32 / 2.0) * 60.0 * scale + oscillation * 10.0,
    )
}

/// Where along an edge the bright data pulse currently sits, in `0..100`.
fn flow_offset(flow: f32, layer: usize, node: usize, next: usize) -> f32 {
    (flow + (layer * 25 + node * 10 + next * 5) as f32).rem_euclid(100.0)
}

pub struct NeuralScanner {
    label: String,
}

impl NeuralScanner {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self { label: label.to_string() }
    }
}

impl Scene for NeuralScanner {
    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let scale = scale_of(frame.size);
        let pulse = frame.phase("pulse");
        let flow = frame.phase("flow");

        for layer in 0..LAYERS.len() - 1 {
            for node in 0..LAYERS[layer] {
                let from = node_pos(c, scale, layer, node, pulse);
                for next in 0..LAYERS[layer + 1] {
                    let to = node_pos(c, scale, layer + 1, next, pulse);
                    let t = flow_offset(flow, layer, node, next) / 100.0;
                    let paint = Paint::linear(
                        from,
                        to,
                        vec![
                            GradientStop::new(0.0, COLD.with_alpha(50)),
                            GradientStop::new(t, HOT.with_alpha(200)),
                            GradientStop::new((t + 0.2).min(1.0), COLD.with_alpha(50)),
                        ],
                    );
                    canvas.line(from, to, &Pen::new(2.0 * scale, paint));
                }
            }
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let scale = scale_of(frame.size);
        let pulse = frame.phase("pulse");
        let radius = 10.0 * scale;
        for (layer, &count) in LAYERS.iter().enumerate() {
            for node in 0..count {
                let p = node_pos(c, scale, layer, node, pulse);
                let reach = radius + (pulse * 2.0).sin() * 3.0;
                canvas.fill_circle(p, radius, Paint::radial2(p, reach, HOT, Rgba::rgb(100, 0, 255)));
            }
        }
        dashed_ring(canvas, c, 250.0 * scale, 36, -frame.phase("angle"), &Pen::new(2.0 * scale, HOT.with_alpha(100)));
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let scale = scale_of(frame.size);
        GlowText::new(&self.label, c + egui::vec2(0.0, -20.0 * scale), FontSpec::sans(30.0 * scale).bold(), HOT)
            .passes(5)
            .alpha_step(50.0)
            .paint(canvas);
        canvas.text_in(
            centered_rect(c + egui::vec2(0.0, 65.0 * scale), 300.0 * scale, 30.0 * scale),
            "PROCESSING DATA...",
            FontSpec::sans(12.0 * scale).bold(),
            HOT.with_alpha(200),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use glowcore::record::{DrawCommand, RecordingSurface};
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    #[test]
    fn test_layers_are_symmetric() {
        let c = pos2(400.0, 300.0);
        let top = node_pos(c, 1.0, 1, 0, 0.0);
        let bottom = node_pos(c, 1.0, 1, 5, 0.0);
        assert_eq!(top.x, 325.0);
        // both ends sit 150 px from the centre before oscillation
        let osc_top = 0.5 * 0f32.sin() * 10.0;
        let osc_bottom = 0.5 * 2.5f32.sin() * 10.0;
        assert!((c.y - (top.y - osc_top) - 150.0).abs() < 1e-3);
        assert!(((bottom.y - osc_bottom) - c.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_flow_offset_wraps() {
        assert_eq!(flow_offset(98.0, 0, 0, 0), 98.0);
        assert_eq!(flow_offset(98.0, 0, 0, 1), 3.0);
        assert_eq!(flow_offset(0.0, 2, 3, 3), 95.0);
    }

    #[test]
    fn test_edge_and_node_counts() {
        let mut rng = seeded(3);
        let scene = NeuralScanner::new("AI Assistant", vec2(800.0, 600.0), &mut rng);
        let state = AnimationState::new(clock(), Box::new(scene), rng, vec2(800.0, 600.0));
        let mut surface = RecordingSurface::new(vec2(800.0, 600.0));
        state.paint_frame(&mut surface);
        let gradient_lines = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolyline { pen, .. } if matches!(pen.paint, Paint::Linear { .. })))
            .count();
        assert_eq!(gradient_lines, 4 * 6 + 6 * 6 + 6 * 4);
        assert_eq!(surface.texts().len(), 6);
    }
}
