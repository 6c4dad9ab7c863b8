//! neural-network — a full-screen layered net whose sparse links flicker on
//! and off, carrying sparks, while thoughts float up from the bottom edge

use egui::{pos2, vec2, Pos2, Vec2};
use glowcore::derive::lerp_pos;
use glowcore::rng::{chance, pick, uniform, uniform_int};
use glowcore::scene::glyphs::jitter;
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlitchText, Rgba, Scene, SceneRng};
use std::f32::consts::TAU;

pub const LAYERS: [usize; 5] = [8, 12, 15, 12, 8];

const PALETTE: [Rgba; 4] = [
    Rgba::rgb(0, 255, 255),
    Rgba::rgb(255, 0, 255),
    Rgba::rgb(0, 255, 150),
    Rgba::rgb(150, 0, 255),
];

const LINK_CHANCE: f32 = 0.2;
const TOGGLE_CHANCE: f32 = 0.05;
const SPARK_SPEED: f32 = 0.05;
const THOUGHT_CHANCE: f32 = 0.02;
const THINKING_THOUGHT_CHANCE: f32 = 0.06;
const THOUGHT_FADE: f32 = 5.0;

const THOUGHTS: [&str; 7] = [
    "Analyzing patterns...",
    "Processing data...",
    "Learning...",
    "Optimizing...",
    "Neural mapping...",
    "Generating response...",
    "Training model...",
];

pub fn clock() -> Clock {
    Clock::new()
        .with_accumulator("time", 0.1)
        .with_phase("pulse", 0.05, Clock::TAU)
}

/// Position of node `node` of layer `layer`: layers are spread evenly
/// top to bottom, nodes evenly left to right.
pub fn node_pos(size: Vec2, layer: usize, node: usize) -> Pos2 {
    let dy = size.y / (LAYERS.len() + 1) as f32;
    let count = LAYERS.get(layer).copied().unwrap_or(1);
    let dx = size.x / (count + 1) as f32;
    pos2(dx * (node + 1) as f32, dy * (layer + 1) as f32)
}

struct Node {
    layer: usize,
    index: usize,
    size: f32,
    phase: f32,
    color: Rgba,
}

struct Link {
    from: usize,
    to: usize,
    active: bool,
    spark: f32,
}

struct Thought {
    x: f32,
    y: f32,
    speed: f32,
    text: &'static str,
    opacity: f32,
    color: Rgba,
}

pub struct NeuralNetwork {
    label: String,
    nodes: Vec<Node>,
    links: Vec<Link>,
    thoughts: Vec<Thought>,
    caption_jitter: Vec<Vec2>,
    thinking: bool,
}

impl NeuralNetwork {
    pub fn new(label: &str, _size: Vec2, rng: &mut SceneRng) -> Self {
        let mut nodes = Vec::new();
        for (layer, &count) in LAYERS.iter().enumerate() {
            for index in 0..count {
                nodes.push(Node {
                    layer,
                    index,
                    size: uniform(rng, 5.0, 15.0),
                    phase: uniform(rng, 0.0, TAU),
                    color: pick(rng, &PALETTE).unwrap_or(PALETTE[0]),
                });
            }
        }

        let mut links = Vec::new();
        for from in 0..nodes.len() {
            for to in (from + 1)..nodes.len() {
                if chance(rng, LINK_CHANCE) {
                    links.push(Link {
                        from,
                        to,
                        active: false,
                        spark: 0.0,
                    });
                }
            }
        }
        tracing::debug!(nodes = nodes.len(), links = links.len(), "neural net wired");

        Self {
            label: label.to_string(),
            nodes,
            links,
            thoughts: Vec::new(),
            caption_jitter: vec![Vec2::ZERO; 3],
            thinking: false,
        }
    }

    /// While thinking, thoughts surface three times as often.
    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn active_links(&self) -> usize {
        self.links.iter().filter(|l| l.active).count()
    }

    fn pos(&self, node: usize, size: Vec2) -> Pos2 {
        let n = &self.nodes[node];
        node_pos(size, n.layer, n.index)
    }

    fn think(&mut self, size: Vec2, rng: &mut SceneRng) {
        let text = pick(rng, &THOUGHTS).unwrap_or(THOUGHTS[0]);
        self.thoughts.push(Thought {
            x: uniform(rng, 0.0, size.x),
            y: size.y,
            speed: uniform(rng, 2.0, 5.0),
            text,
            opacity: 255.0,
            color: PALETTE[0],
        });
    }
}

impl Scene for NeuralNetwork {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        for link in &mut self.links {
            if chance(rng, TOGGLE_CHANCE) {
                link.active = !link.active;
            }
            if link.active {
                link.spark = (link.spark + SPARK_SPEED).rem_euclid(1.0);
            }
        }

        let rate = if self.thinking { THINKING_THOUGHT_CHANCE } else { THOUGHT_CHANCE };
        if chance(rng, rate) {
            self.think(frame.size, rng);
        }
        self.thoughts.retain(|t| t.opacity > 0.0);
        let half = frame.height() / 2.0;
        for thought in &mut self.thoughts {
            thought.y -= thought.speed;
            if thought.y < half {
                thought.opacity = (thought.opacity - THOUGHT_FADE).max(0.0);
            }
            // thoughts shimmer through the palette
            thought.color = PALETTE[uniform_int(rng, 0, PALETTE.len() as i32 - 1) as usize];
        }

        self.caption_jitter = jitter(rng, 3, 0.1, 2.0);
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let size = frame.size;
        for link in &self.links {
            let (a, b) = (self.pos(link.from, size), self.pos(link.to, size));
            if link.active {
                let color = self.nodes[link.from].color;
                canvas.line(a, b, &Pen::new(2.0, color.with_alpha(100)));
                let spark = lerp_pos(a, b, link.spark);
                canvas.fill_circle(spark, 10.0, Paint::radial2(spark, 10.0, color.with_alpha(150), Rgba::TRANSPARENT));
            } else {
                canvas.line(a, b, &Pen::new(1.0, Rgba::rgba(100, 100, 100, 50)));
            }
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let pulse = frame.phase("pulse");
        for (i, node) in self.nodes.iter().enumerate() {
            let p = self.pos(i, frame.size);
            let glow = (node.phase + pulse).sin().abs();
            canvas.fill_circle(p, node.size * 2.0, Paint::radial2(p, node.size * 2.0, node.color.with_alpha_f(200.0 * glow), Rgba::TRANSPARENT));
            canvas.fill_circle(p, node.size, node.color);
        }

        for thought in &self.thoughts {
            canvas.text_at(
                pos2(thought.x, thought.y),
                egui::Align2::CENTER_CENTER,
                thought.text,
                FontSpec::sans(10.0),
                thought.color.with_alpha_f(thought.opacity),
            );
        }

        let c = frame.center();
        for (i, color) in PALETTE.iter().take(3).enumerate() {
            let radius = 100.0 + (pulse + i as f32 * 0.5).sin() * 10.0 + i as f32 * 20.0;
            canvas.stroke_circle(c, radius, &Pen::new(2.0, *color));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let layers = self
            .caption_jitter
            .iter()
            .zip(PALETTE)
            .map(|(offset, color)| (color.with_alpha(150), *offset))
            .collect();
        GlitchText {
            text: &self.label,
            anchor: frame.center(),
            font: FontSpec::sans(40.0).bold(),
            layers,
        }
        .paint(canvas);
    }
    /// The network thinks harder while the host is listening.
    fn set_listening(&mut self, listening: bool) {
        self.set_thinking(listening);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::RecordingSurface;
    use glowcore::rng::seeded;
    use glowcore::AnimationState;

    fn size() -> Vec2 {
        vec2(1200.0, 600.0)
    }

    #[test]
    fn test_layer_layout() {
        assert_eq!(node_pos(size(), 0, 0), pos2(1200.0 / 9.0, 100.0));
        assert_eq!(node_pos(size(), 2, 14), pos2(1125.0, 300.0));
        assert_eq!(node_pos(size(), 4, 7), pos2(1200.0 / 9.0 * 8.0, 500.0));
    }

    #[test]
    fn test_network_shape() {
        let net = NeuralNetwork::new("N", size(), &mut seeded(3));
        assert_eq!(net.nodes.len(), LAYERS.iter().sum::<usize>());
        let pairs = net.nodes.len() * (net.nodes.len() - 1) / 2;
        // roughly a fifth of all pairs are linked
        assert!(net.links.len() > pairs / 10 && net.links.len() < pairs * 3 / 10);
        assert_eq!(net.active_links(), 0);
        assert!(net.links.iter().all(|l| l.from < l.to));
    }

    #[test]
    fn test_links_toggle_and_sparks_wrap() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: size(),
        };
        let mut rng = seeded(4);
        let mut net = NeuralNetwork::new("N", frame.size, &mut rng);
        for _ in 0..100 {
            net.tick(&frame, &mut rng);
            assert!(net.links.iter().all(|l| (0.0..1.0).contains(&l.spark)));
        }
        assert!(net.active_links() > 0);
    }

    #[test]
    fn test_thoughts_rise_and_fade() {
        let clock = clock();
        let frame = Frame {
            clock: &clock,
            size: size(),
        };
        let mut rng = seeded(5);
        let mut net = NeuralNetwork::new("N", frame.size, &mut rng);
        net.think(frame.size, &mut rng);
        let speed = net.thoughts[0].speed;
        net.tick(&frame, &mut rng);
        assert_eq!(net.thoughts[0].y, 600.0 - speed);
        assert_eq!(net.thoughts[0].opacity, 255.0);
        for _ in 0..1000 {
            net.tick(&frame, &mut rng);
            for t in &net.thoughts {
                assert!(t.opacity >= 0.0 && t.y <= 600.0);
            }
        }
        // a thought is gone within ~150 + 51 ticks of surfacing
        assert!(net.thoughts.len() < 20);
    }

    #[test]
    fn test_thinking_flag() {
        let mut net = NeuralNetwork::new("N", size(), &mut seeded(1));
        assert!(!net.is_thinking());
        net.set_thinking(true);
        assert!(net.is_thinking());
        net.set_listening(false);
        assert!(!net.is_thinking());
    }

    #[test]
    fn test_listening_speeds_up_thoughts() {
        let count = |listening: bool| {
            let mut rng = seeded(8);
            let scene = NeuralNetwork::new("N", size(), &mut rng);
            let mut state = AnimationState::new(clock(), Box::new(scene), rng, size());
            state.set_listening(listening);
            let mut shown = 0;
            for _ in 0..400 {
                state.tick();
                let mut surface = RecordingSurface::new(size());
                state.paint_frame(&mut surface);
                shown += surface.texts().iter().filter(|(t, _)| *t != "N").count();
            }
            shown
        };
        // three times the rate: far more thought bubbles on screen over time
        assert!(count(true) > count(false) * 3 / 2);
    }
}
