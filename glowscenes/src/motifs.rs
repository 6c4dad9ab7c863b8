//! motifs — drawing routines shared by several widgets
//!
//! Everything here is a pure function of its arguments: pass in the phases,
//! get primitives on the canvas.

use glowcore::derive::{self, orbit, radians};
use glowcore::rng::{chance, uniform};
use glowcore::scene::rain::RainColumn;
use glowcore::surface::{GradientStop, Paint, Pen};
use glowcore::{Canvas, FontSpec, GlowColors, Rgba, SceneRng};
use egui::{pos2, vec2, Align2, Pos2, Rect, Vec2};
use std::f32::consts::TAU;

/// A `w`×`h` rectangle centred on `center`.
pub fn centered_rect(center: Pos2, w: f32, h: f32) -> Rect {
    Rect::from_center_size(center, vec2(w, h))
}

/// Ring cut into `segments` equal arcs of which only the even ones are
/// drawn. `rotation_deg` turns the whole ring.
pub fn dashed_ring(canvas: &mut Canvas<'_>, center: Pos2, radius: f32, segments: usize, rotation_deg: f32, pen: &Pen) {
    if segments == 0 {
        return;
    }
    let span = 360.0 / segments as f32;
    for i in (0..segments).step_by(2) {
        canvas.arc(center, radius, radius, rotation_deg + i as f32 * span, span, pen);
    }
}

/// Notched "tech" ring: each segment is a short radial tick, an outer arc
/// chord and a tick back in. Even segments reach deeper than odd ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TechRing {
    pub radius: f32,
    pub segments: usize,
    pub inset_even: f32,
    pub inset_odd: f32,
}

impl TechRing {
    pub fn new(radius: f32, segments: usize) -> Self {
        Self {
            radius,
            segments,
            inset_even: 10.0,
            inset_odd: 5.0,
        }
    }

    pub fn insets(mut self, even: f32, odd: f32) -> Self {
        self.inset_even = even;
        self.inset_odd = odd;
        self
    }

    /// Segment opacity shimmers with `|sin(angle + pulse)|`.
    pub fn paint(&self, canvas: &mut Canvas<'_>, center: Pos2, rotation_deg: f32, pulse: f32, color: Rgba) {
        if self.segments == 0 {
            return;
        }
        let step = 360.0 / self.segments as f32;
        for i in 0..self.segments {
            let a = radians(i as f32 * step + rotation_deg);
            let b = radians((i + 1) as f32 * step + rotation_deg);
            let inset = if i % 2 == 0 { self.inset_even } else { self.inset_odd };
            let inner = self.radius - inset;
            let points = [
                orbit(center, inner, a),
                orbit(center, self.radius, a),
                orbit(center, self.radius, b),
                orbit(center, inner, b),
            ];
            let opacity = 100.0 + (a + pulse).sin().abs() * 155.0;
            canvas.polyline(&points, false, &Pen::new(1.0, color.with_alpha(derive::alpha(opacity))));
        }
    }
}

/// Closed outline whose radius breathes with [`derive::wave_radius`],
/// sampled at 180 points.
pub fn wave_outline(center: Pos2, base: f32, wave_time: f32, energy: f32) -> Vec<Pos2> {
    const POINTS: usize = 180;
    (0..POINTS)
        .map(|i| {
            let angle = i as f32 * TAU / POINTS as f32;
            orbit(center, derive::wave_radius(angle, base, wave_time, energy), angle)
        })
        .collect()
}

/// Energy of the voice-driven variants: a breath around 0.5 that drops
/// while the widget is listening instead of speaking.
pub fn voice_energy(pulse: f32, listening: bool) -> f32 {
    let energy = 0.5 + 0.3 * pulse.sin();
    if listening {
        energy * 0.6
    } else {
        energy
    }
}

/// Wave circle filled with a radial gradient reaching out to `2 * base`.
pub fn wave_circle(
    canvas: &mut Canvas<'_>,
    center: Pos2,
    base: f32,
    wave_time: f32,
    energy: f32,
    stops: Vec<GradientStop>,
    outline: Rgba,
) {
    let points = wave_outline(center, base, wave_time, energy);
    canvas.fill_polygon(&points, &Paint::radial(center, base * 2.0, stops));
    canvas.polyline(&points, true, &Pen::new(2.0, outline));
}

/// Dots orbiting on a ring, each linked to its predecessor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyRing {
    pub radius: f32,
    pub count: usize,
    pub color: Rgba,
    /// Links fade from `color` to this color; `None` fades them out
    /// radially around each dot instead.
    pub link_to: Option<Rgba>,
}

impl EnergyRing {
    pub fn paint(&self, canvas: &mut Canvas<'_>, center: Pos2, rotation_deg: f32, pulse: f32) {
        let rotation = radians(rotation_deg);
        let mut prev: Option<Pos2> = None;
        for i in 0..self.count {
            let p = derive::ring_position(center, self.radius, i, self.count, rotation);
            let size = 4.0 + 2.0 * (pulse + i as f32 * 0.2).sin();
            let opacity = derive::alpha(100.0 + 100.0 * (pulse + i as f32 * 0.1).sin().abs());
            let color = self.color.with_alpha(opacity);
            canvas.fill_circle(p, size, color);
            if let Some(from) = prev {
                let paint = match self.link_to {
                    Some(end) => Paint::linear(
                        from,
                        p,
                        vec![GradientStop::new(0.0, color), GradientStop::new(1.0, end.with_alpha(opacity))],
                    ),
                    None => Paint::radial2(p, 20.0, color, color.with_alpha(0)),
                };
                canvas.line(from, p, &Pen::new(2.0, paint));
            }
            prev = Some(p);
        }
    }
}

/// Two mirrored "voice" traces above and below the centre, built from
/// three stacked sines and faded towards the sides.
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceWaves {
    pub points: usize,
    pub width: f32,
    pub amplitude: f32,
    /// Divisors of the second and third harmonic amplitudes.
    pub harmonics: (f32, f32),
    pub thickness: f32,
    pub offset: f32,
    /// Stroke colors along each segment: start, middle, end.
    pub colors: [Rgba; 3],
    /// Glow dots on every sample point.
    pub dots: Option<Rgba>,
}

impl VoiceWaves {
    fn sample(&self, center: Pos2, wave_time: f32, i: usize) -> (f32, f32) {
        let fi = i as f32;
        let x = center.x - self.width / 2.0 + fi * (self.width / self.points as f32);
        let wave = self.amplitude * (wave_time * 2.0 + fi * 0.2).sin()
            + self.amplitude / self.harmonics.0 * (wave_time * 3.0 + fi * 0.3).sin()
            + self.amplitude / self.harmonics.1 * (wave_time * 5.0 + fi * 0.5).sin();
        (x, wave)
    }

    pub fn paint(&self, canvas: &mut Canvas<'_>, center: Pos2, wave_time: f32) {
        if self.points < 2 || self.width <= 0.0 {
            return;
        }
        let mut prev = self.sample(center, wave_time, 0);
        for i in 1..self.points {
            let (x, wave) = self.sample(center, wave_time, i);
            let opacity = derive::alpha(200.0 * derive::center_falloff(x - center.x, self.width / 3.0));
            for sign in [-1.0, 1.0] {
                let from = pos2(prev.0, center.y + sign * self.offset + prev.1);
                let to = pos2(x, center.y + sign * self.offset + wave);
                let [a, b, c] = self.colors;
                let paint = if a == b && b == c {
                    Paint::Solid(a.with_alpha(opacity))
                } else {
                    Paint::linear(
                        from,
                        to,
                        vec![
                            GradientStop::new(0.0, a.with_alpha(opacity)),
                            GradientStop::new(0.5, b.with_alpha(opacity)),
                            GradientStop::new(1.0, c.with_alpha(opacity)),
                        ],
                    )
                };
                canvas.line(from, to, &Pen::new(self.thickness, paint));
                if let Some(dot) = self.dots {
                    canvas.fill_circle(to, self.thickness * 0.75, dot.with_alpha(opacity));
                }
            }
            prev = (x, wave);
        }
    }
}

/// Hexagon outline with optional dots on the vertices. `rotation` in
/// radians.
pub fn hexagon(canvas: &mut Canvas<'_>, center: Pos2, size: f32, rotation: f32, pen: &Pen, dot: Option<f32>) {
    let points = derive::polygon(center, size, 6, rotation);
    canvas.polyline(&points, true, pen);
    if let Some(r) = dot {
        for p in &points {
            canvas.fill_circle(*p, r, pen.paint.clone());
        }
    }
}

/// Small labels orbiting at `radius`, one every `360 / count` degrees,
/// drawn left-anchored at `dx` from their orbit point.
#[allow(clippy::too_many_arguments)]
pub fn label_ring(
    canvas: &mut Canvas<'_>,
    center: Pos2,
    radius: f32,
    count: usize,
    rotation_deg: f32,
    dx: f32,
    font: FontSpec,
    color: Rgba,
    label: impl Fn(usize) -> String,
) {
    for i in 0..count {
        let angle = radians(i as f32 * 360.0 / count as f32 + rotation_deg);
        let p = orbit(center, radius, angle) + vec2(dx, 0.0);
        canvas.text_at(p, Align2::LEFT_BOTTOM, &label(i), font, color);
    }
}

/// `lines + 1` horizontal and vertical lines across `rect`. Line `i` of
/// each axis is shifted by `amplitude * sin(phase + 0.2 i)`.
pub fn wavy_grid(canvas: &mut Canvas<'_>, rect: Rect, lines: usize, phase: f32, amplitude: f32, pen: &Pen) {
    if lines == 0 {
        return;
    }
    let step = rect.size() / lines as f32;
    for i in 0..=lines {
        let shift = amplitude * (phase + i as f32 * 0.2).sin();
        let y = rect.top() + i as f32 * step.y + shift;
        canvas.line(pos2(rect.left(), y), pos2(rect.right(), y), pen);
        let x = rect.left() + i as f32 * step.x + shift;
        canvas.line(pos2(x, rect.top()), pos2(x, rect.bottom()), pen);
    }
}

/// `count` spokes from `inner` to `outer` radius, evenly spaced from
/// `rotation` radians. Returns the outer tips.
pub fn spokes(
    canvas: &mut Canvas<'_>,
    center: Pos2,
    count: usize,
    rotation: f32,
    inner: f32,
    outer: impl Fn(usize) -> f32,
    pen: &Pen,
) -> Vec<Pos2> {
    (0..count)
        .map(|i| {
            let angle = derive::ring_angle(i, count, rotation);
            let tip = orbit(center, outer(i), angle);
            canvas.line(orbit(center, inner, angle), tip, pen);
            tip
        })
        .collect()
}

/// Green terminal glyph fading by `fade` per index down the column; the
/// head glyph is pale.
pub fn terminal_glyph(column: &RainColumn, index: usize, fade: f32) -> Rgba {
    let opacity = column.brightness * 255.0 - fade * index as f32;
    let color = if index == 0 { GlowColors::MINT } else { GlowColors::MATRIX };
    color.with_alpha_f(opacity)
}

/// Per-pass vertical jitter of a glitching caption, rerolled every tick.
/// Some passes are tinted for a tick at a time.
#[derive(Clone, Debug)]
pub struct CaptionGlitch {
    spread: f32,
    tint_chance: f32,
    passes: Vec<(f32, bool)>,
}

impl CaptionGlitch {
    pub fn new(passes: usize, spread: f32, tint_chance: f32) -> Self {
        Self {
            spread,
            tint_chance,
            passes: vec![(0.0, false); passes],
        }
    }

    pub fn tick(&mut self, rng: &mut SceneRng) {
        for pass in &mut self.passes {
            *pass = (uniform(rng, -self.spread, self.spread), chance(rng, self.tint_chance));
        }
    }

    /// Layers for [`glowcore::GlitchText`]: pass `i` has alpha
    /// `200 + 55 sin(pulse + i)` and is offset by its jitter times `sin(pulse)`.
    pub fn layers(&self, pulse: f32, base: Rgba, tint: Rgba) -> Vec<(Rgba, Vec2)> {
        self.passes
            .iter()
            .enumerate()
            .map(|(i, &(offset, tinted))| {
                let alpha = 200.0 + 55.0 * (pulse + i as f32).sin();
                let color = if tinted { tint } else { base };
                (color.with_alpha_f(alpha), vec2(0.0, offset * pulse.sin()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::{DrawCommand, RecordingSurface};

    fn record(f: impl FnOnce(&mut Canvas<'_>)) -> Vec<DrawCommand> {
        let mut surface = RecordingSurface::new(vec2(400.0, 400.0));
        {
            let mut canvas = Canvas::new(&mut surface);
            f(&mut canvas);
        }
        surface.commands().to_vec()
    }

    #[test]
    fn test_dashed_ring_draws_even_segments() {
        let commands = record(|c| dashed_ring(c, pos2(200.0, 200.0), 100.0, 36, 0.0, &Pen::new(2.0, Rgba::WHITE)));
        assert_eq!(commands.len(), 18);
    }

    #[test]
    fn test_tech_ring_one_polyline_per_segment() {
        let commands = record(|c| TechRing::new(150.0, 24).paint(c, pos2(200.0, 200.0), 0.0, 0.0, Rgba::WHITE));
        assert_eq!(commands.len(), 24);
        for cmd in &commands {
            match cmd {
                DrawCommand::StrokePolyline { points, closed, pen } => {
                    assert_eq!(points.len(), 4);
                    assert!(!closed);
                    // opacity stays within 100..=255
                    let a = pen.paint.sample(points[0]).a;
                    assert!(a >= 100);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_wave_outline_without_energy_is_circle() {
        let center = pos2(0.0, 0.0);
        for p in wave_outline(center, 80.0, 1.3, 0.0) {
            assert!((p.distance(center) - 80.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_energy_ring_links_all_but_first() {
        let ring = EnergyRing {
            radius: 100.0,
            count: 8,
            color: Rgba::rgb(0, 255, 255),
            link_to: Some(Rgba::rgb(255, 0, 255)),
        };
        let commands = record(|c| ring.paint(c, pos2(200.0, 200.0), 0.0, 0.0));
        let fills = commands.iter().filter(|c| matches!(c, DrawCommand::FillPolygon { .. })).count();
        let lines = commands.iter().filter(|c| matches!(c, DrawCommand::StrokePolyline { .. })).count();
        assert_eq!(fills, 8);
        assert_eq!(lines, 7);
    }

    #[test]
    fn test_voice_waves_fade_towards_edges() {
        let waves = VoiceWaves {
            points: 40,
            width: 300.0,
            amplitude: 0.0,
            harmonics: (2.0, 3.0),
            thickness: 2.0,
            offset: 100.0,
            colors: [Rgba::WHITE; 3],
            dots: None,
        };
        let commands = record(|c| waves.paint(c, pos2(200.0, 200.0), 0.0));
        assert_eq!(commands.len(), 39 * 2);
        let alpha_at = |cmd: &DrawCommand| match cmd {
            DrawCommand::StrokePolyline { pen, .. } => pen.paint.sample(Pos2::ZERO).a,
            _ => 0,
        };
        let edge = alpha_at(&commands[0]);
        let middle = alpha_at(&commands[38]);
        assert!(middle > edge);
    }

    #[test]
    fn test_wavy_grid_line_count() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 400.0));
        let commands = record(|c| wavy_grid(c, rect, 20, 0.0, 5.0, &Pen::new(1.0, GlowColors::SKY)));
        assert_eq!(commands.len(), 42);
        assert_eq!(record(|c| wavy_grid(c, rect, 0, 0.0, 5.0, &Pen::new(1.0, GlowColors::SKY))).len(), 0);
    }

    #[test]
    fn test_spokes_return_tips() {
        let mut tips = Vec::new();
        record(|c| {
            tips = spokes(c, pos2(0.0, 0.0), 4, 0.0, 10.0, |_| 50.0, &Pen::new(1.0, Rgba::WHITE));
        });
        assert_eq!(tips.len(), 4);
        assert!((tips[0] - pos2(50.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_terminal_glyph_fades_down_the_column() {
        let column = RainColumn {
            x: 0.0,
            y: 0.0,
            speed: 1.0,
            glyphs: vec!['x'; 30],
            brightness: 1.0,
            flash: None,
        };
        assert_eq!(terminal_glyph(&column, 0, 10.0), GlowColors::MINT);
        assert_eq!(terminal_glyph(&column, 5, 10.0), GlowColors::MATRIX.with_alpha(205));
        assert_eq!(terminal_glyph(&column, 26, 10.0).a, 0);
    }

    #[test]
    fn test_caption_glitch_layers() {
        let mut glitch = CaptionGlitch::new(5, 2.0, 0.0);
        // before the first tick every pass is centred
        let layers = glitch.layers(1.0, GlowColors::MATRIX, GlowColors::CYAN);
        assert_eq!(layers.len(), 5);
        assert!(layers.iter().all(|(_, off)| *off == Vec2::ZERO));

        glitch.tick(&mut glowcore::rng::seeded(3));
        for (color, off) in glitch.layers(1.0, GlowColors::MATRIX, GlowColors::CYAN) {
            assert_eq!(color.g, 255);
            assert_eq!(color.r, 0);
            assert!(off.y.abs() <= 2.0);
        }
        // no jitter at the zero crossing of the pulse
        assert!(glitch.layers(0.0, GlowColors::MATRIX, GlowColors::CYAN).iter().all(|(_, off)| off.y == 0.0));
    }

    #[test]
    fn test_voice_energy_drops_while_listening() {
        assert_eq!(voice_energy(0.0, false), 0.5);
        assert!((voice_energy(0.0, true) - 0.3).abs() < 1e-6);
        for i in 0..64 {
            let p = i as f32 * 0.1;
            assert!(voice_energy(p, true) < voice_energy(p, false));
            assert!((0.2..=0.8).contains(&voice_energy(p, false)));
        }
    }
}
