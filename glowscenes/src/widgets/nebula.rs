//! nebula — twinkling stars, breathing nebula clouds and motes spiralling
//! out of the centre
//!
//! Each mote keeps its own age, so it restarts from the centre once its
//! spiral reaches past the window diagonal.

use crate::motifs::centered_rect;
use egui::{pos2, vec2, Pos2, Vec2};
use glowcore::derive::{alpha, orbit, radians};
use glowcore::path::Path;
use glowcore::rng::{pick, uniform};
use glowcore::surface::{Paint, Pen};
use glowcore::{Canvas, Clock, FontSpec, Frame, Rgba, Scene, SceneRng};
use std::f32::consts::TAU;

const STARS: usize = 100;
const MOTES: usize = 50;
const CLOUDS: usize = 5;
/// Seconds added per tick.
const TIME_STEP: f32 = 0.016;
const LILAC: Rgba = Rgba::rgb(180, 100, 255);
const TINTS: [Rgba; 3] = [LILAC, Rgba::rgb(100, 150, 255), Rgba::rgb(255, 100, 200)];
/// Cloud gradient (inner, outer) per tint.
const CLOUD_STOPS: [(Rgba, Rgba); 3] = [
    (Rgba::rgba(180, 100, 255, 30), Rgba::rgba(100, 0, 150, 0)),
    (Rgba::rgba(100, 150, 255, 30), Rgba::rgba(50, 0, 200, 0)),
    (Rgba::rgba(255, 100, 200, 30), Rgba::rgba(150, 0, 100, 0)),
];

pub fn clock() -> Clock {
    Clock::new()
        .with_accumulator("time", TIME_STEP)
        .with_phase("pulse", 0.02, Clock::TAU)
}

pub fn status_text(active: bool) -> &'static str {
    if active {
        "EXPLORING THE COSMOS..."
    } else {
        "NEBULA STABLE"
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub pos: Pos2,
    pub brightness: f32,
    pub offset: f32,
}

impl Star {
    fn spawn(rng: &mut SceneRng, size: Vec2) -> Self {
        Self {
            pos: pos2(uniform(rng, 0.0, size.x), uniform(rng, 0.0, size.y)),
            brightness: uniform(rng, 0.0, 1.0),
            offset: uniform(rng, 0.0, TAU),
        }
    }

    pub fn alpha(&self, time: f32) -> u8 {
        let twinkle = (time * 2.0 + self.offset).sin().abs() * self.brightness;
        alpha(100.0 + 155.0 * twinkle)
    }
}

/// A mote on an outward spiral from the centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mote {
    pub heading: f32,
    pub speed: f32,
    pub size: f32,
    pub tint: Rgba,
    pub age: f32,
}

impl Mote {
    fn spawn(rng: &mut SceneRng) -> Self {
        Self {
            heading: uniform(rng, 0.0, TAU),
            speed: uniform(rng, 0.5, 2.0),
            size: uniform(rng, 2.0, 6.0),
            tint: pick(rng, &TINTS).unwrap_or(LILAC),
            age: 0.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.age * self.speed * 20.0
    }

    pub fn position(&self, center: Pos2) -> Pos2 {
        orbit(center, self.radius(), self.heading + self.age * self.speed)
    }

    /// Age by one tick; back to the centre with a new heading once past
    /// `reach`.
    pub fn step(&mut self, reach: f32, rng: &mut SceneRng) {
        self.age += TIME_STEP;
        if self.radius() > reach {
            self.age = 0.0;
            self.heading = uniform(rng, 0.0, TAU);
        }
    }
}

/// Organic closed outline of cloud `index`.
pub fn cloud(center: Pos2, index: usize, pulse: f32) -> Path {
    let base = 200.0 + index as f32 * 30.0;
    let points: Vec<Pos2> = (0..36)
        .map(|k| {
            let rad = radians(k as f32 * 10.0);
            orbit(center, base + 50.0 * (pulse + index as f32 + rad * 2.0).sin(), rad)
        })
        .collect();
    let mut path = Path::new();
    path.move_to(points[0]);
    for (j, p) in points.iter().enumerate() {
        path.quad_to(*p, points[(j + 1) % points.len()]);
    }
    path.close();
    path
}

pub struct Nebula {
    label: String,
    stars: Vec<Star>,
    motes: Vec<Mote>,
    active: bool,
}

impl Nebula {
    pub fn new(label: &str, size: Vec2, rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            stars: (0..STARS).map(|_| Star::spawn(rng, size)).collect(),
            motes: (0..MOTES).map(|_| Mote::spawn(rng)).collect(),
            active: true,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }
}

impl Scene for Nebula {
    fn tick(&mut self, frame: &Frame<'_>, rng: &mut SceneRng) {
        let reach = frame.size.length();
        for mote in &mut self.motes {
            mote.step(reach, rng);
        }
    }

    fn background(&self, canvas: &mut Canvas<'_>, _frame: &Frame<'_>) {
        canvas.fill_background(&Paint::Solid(Rgba::rgb(0, 0, 20)));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let time = frame.phase("time");
        for star in &self.stars {
            canvas.point(star.pos, Rgba::WHITE.with_alpha(star.alpha(time)));
        }

        let c = frame.center();
        let pulse = frame.phase("pulse");
        for i in 0..CLOUDS {
            let (inner, outer) = CLOUD_STOPS[i % 3];
            let radius = 200.0 + i as f32 * 30.0;
            canvas.fill_path(&cloud(c, i, pulse), &Paint::radial2(c, radius, inner, outer));
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        let swell = 1.0 + 0.3 * pulse.sin();
        for mote in &self.motes {
            canvas.fill_circle(mote.position(c), mote.size * swell, mote.tint.with_alpha(150));
        }

        for i in 0..3 {
            let radius = 100.0 + i as f32 * 40.0 + 20.0 * (pulse + i as f32).sin();
            canvas.stroke_circle(c, radius, &Pen::new(2.0, LILAC.with_alpha(50 - i * 10)));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        let font = FontSpec::sans(40.0).bold();
        let shine = 0.5 + 0.5 * pulse.sin();
        for i in 0..10 {
            let lift = 3.0 * (pulse + i as f32 * 0.5).sin();
            let color = Rgba::rgb(200, 150, 255).with_alpha_f((10 - i) as f32 * 20.0 * shine);
            canvas.text_in(centered_rect(c - vec2(0.0, lift), 300.0, 50.0), &self.label, font, color);
        }
        canvas.text_in(centered_rect(c, 300.0, 50.0), &self.label, font, Rgba::WHITE);

        let bob = 5.0 * (pulse * 2.0).sin();
        canvas.text_in(
            centered_rect(c + vec2(0.0, 55.0 + bob), 400.0, 30.0),
            status_text(self.active),
            FontSpec::sans(12.0).bold(),
            LILAC.with_alpha(200),
        );
    }

    fn resize(&mut self, size: Vec2, rng: &mut SceneRng) {
        self.stars = (0..STARS).map(|_| Star::spawn(rng, size)).collect();
    }

    /// Exploring while speaking, stable while listening.
    fn set_listening(&mut self, listening: bool) {
        self.set_active(!listening);
    }
}
