//! cyber-network — drifting nodes joined by the links they had at start-up,
//! with data packets hopping between them

use egui::{pos2, vec2, Pos2, Vec2};
use glowcore::rng::{chance, uniform, uniform_int};
use glowcore::scene::glyphs::{jitter, ScrambledText};
use glowcore::scene::network::{link_alpha, Packet};
use glowcore::scene::particles::{Boundary, Particle, ParticleField};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlitchText, Rgba, Scene, SceneRng};
use std::f32::consts::TAU;

const NODES: usize = 30;
const MARGIN: f32 = 100.0;
/// Nodes closer than this at start-up stay linked for good.
const LINK_DISTANCE: f32 = 200.0;
/// Links fade out completely at this length.
const LINK_FADE: f32 = 300.0;
const PACKET_CHANCE: f32 = 0.1;
const PACKET_SPEED: f32 = 0.02;
const CYBER: Rgba = Rgba::rgb(0, 200, 255);

pub fn clock() -> Clock {
    Clock::new()
        .with_accumulator("time", 0.1)
        .with_phase("pulse", 0.05, Clock::TAU)
}

fn spawn_node(rng: &mut SceneRng, size: Vec2) -> Particle {
    let pos = pos2(
        uniform(rng, MARGIN, size.x - MARGIN),
        uniform(rng, MARGIN, size.y - MARGIN),
    );
    let vel = vec2(uniform(rng, -0.5, 0.5), uniform(rng, -0.5, 0.5));
    Particle {
        size: uniform(rng, 5.0, 15.0),
        phase: uniform(rng, 0.0, TAU),
        ..Particle::new(pos, vel)
    }
}

pub fn status_text(listening: bool) -> &'static str {
    if listening {
        "NETWORK SCAN..."
    } else {
        "ANALYZING DATA..."
    }
}

pub struct CyberNetwork {
    label: String,
    nodes: ParticleField,
    links: Vec<(usize, usize)>,
    packets: Vec<(Packet, Rgba)>,
    caption_jitter: Vec<Vec2>,
    status: ScrambledText,
}

impl CyberNetwork {
    pub fn new(label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        let nodes = ParticleField::new(NODES, size, Boundary::Bounce { margin: MARGIN }, spawn_node, rng);
        let links = initial_links(&nodes);
        tracing::debug!(links = links.len(), "network linked");
        Self {
            label: label.to_string(),
            nodes,
            links,
            packets: Vec::new(),
            caption_jitter: vec![Vec2::ZERO; 5],
            status: ScrambledText::new(status_text(false), Vec::new(), 0.0),
        }
    }

    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    fn endpoints(&self, link: usize) -> Option<(Pos2, Pos2)> {
        let &(i, j) = self.links.get(link)?;
        let nodes = self.nodes.particles();
        Some((nodes[i].pos, nodes[j].pos))
    }
}

fn initial_links(nodes: &ParticleField) -> Vec<(usize, usize)> {
    nodes
        .neighbours(LINK_DISTANCE)
        .into_iter()
        .map(|(i, j, _)| (i, j))
        .collect()
}

impl Scene for CyberNetwork {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        self.nodes.tick(frame.size, rng);

        if !self.links.is_empty() && chance(rng, PACKET_CHANCE) {
            let link = uniform_int(rng, 0, self.links.len() as i32 - 1) as usize;
            let color = Rgba::rgba(0, uniform_int(rng, 150, 255) as u8, uniform_int(rng, 150, 255) as u8, 200);
            self.packets.push((Packet::new(link, PACKET_SPEED), color));
        }
        for (packet, _) in &mut self.packets {
            packet.progress += packet.speed;
        }
        self.packets.retain(|(p, _)| p.progress < 1.0);

        self.caption_jitter = jitter(rng, 5, 0.1, 2.0);
    }

    fn background(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        canvas.fill_background(&Paint::Solid(Rgba::rgba(0, 0, 20, 230)));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        let nodes = self.nodes.particles();
        for &(i, j) in &self.links {
            let (a, b) = (nodes[i].pos, nodes[j].pos);
            let alpha = link_alpha(a.distance(b), LINK_FADE, 255.0);
            canvas.line(a, b, &Pen::new(1.0, Rgba::rgb(0, 150, 255).with_alpha_f(alpha)));
        }
        for (packet, color) in &self.packets {
            if let Some((from, to)) = self.endpoints(packet.link) {
                canvas.fill_circle(packet.position(from, to), 4.0, *color);
            }
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let time = frame.phase("time");
        for node in self.nodes.particles() {
            let glow = (node.phase + time).sin().abs();
            let size = node.size * (1.0 + 0.2 * glow);
            let halo = Paint::radial2(node.pos, size * 2.0, CYBER.with_alpha(150), Rgba::rgba(0, 100, 255, 0));
            canvas.fill_circle(node.pos, size * 2.0, halo);
            canvas.fill_circle(node.pos, size, Rgba::rgb(0, 220, 255));
        }

        let c = frame.center();
        let pulse = frame.phase("pulse");
        for i in 0..3 {
            let radius = 150.0 + (pulse + i as f32 * 0.5).sin() * 10.0;
            canvas.fill_circle(c, radius, Paint::radial2(c, radius, Rgba::rgba(0, 150, 255, 30), Rgba::rgba(0, 100, 255, 0)));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        let layers = self
            .caption_jitter
            .iter()
            .enumerate()
            .map(|(i, offset)| (CYBER.with_alpha_f(200.0 + 55.0 * (pulse + i as f32).sin()), *offset))
            .collect();
        GlitchText {
            text: &self.label,
            anchor: c,
            font: FontSpec::mono(40.0).bold(),
            layers,
        }
        .paint(canvas);

        self.status.paint(canvas, c + vec2(0.0, 50.0), 10.0, FontSpec::mono(12.0).bold(), |i| {
            CYBER.with_alpha_f(200.0 + 55.0 * (pulse + i as f32 * 0.3).sin())
        });
    }

    fn set_listening(&mut self, listening: bool) {
        self.status.set_text(status_text(listening));
    }

    fn resize(&mut self, size: Vec2, rng: &mut SceneRng) {
        self.nodes.reseed(size, rng);
        self.links = initial_links(&self.nodes);
        self.packets.clear();
    }
}
