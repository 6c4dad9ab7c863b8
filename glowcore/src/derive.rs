//! derive — pure functions from phases and element indices to drawing parameters
//!
//! Nothing in here keeps state or touches randomness: the same inputs
//! always produce the same outputs, which is what lets a widget recompute
//! every element's pose from the clock on each frame.

use egui::{pos2, vec2, Pos2, Vec2};
use std::f32::consts::TAU;

/// Degrees to radians.
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Point on a circle of `radius` around `center` at `angle` radians.
pub fn orbit(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + vec2(angle.cos(), angle.sin()) * radius
}

/// Base angle of element `index` among `count` evenly spaced ones, plus a
/// rotation phase. All angles in radians.
pub fn ring_angle(index: usize, count: usize, rotation: f32) -> f32 {
    if count == 0 {
        return rotation;
    }
    index as f32 * TAU / count as f32 + rotation
}

/// Position of element `index` of an evenly spaced ring.
pub fn ring_position(center: Pos2, radius: f32, index: usize, count: usize, rotation: f32) -> Pos2 {
    orbit(center, radius, ring_angle(index, count, rotation))
}

/// `base + amplitude * sin(phase)`.
pub fn pulse(phase: f32, base: f32, amplitude: f32) -> f32 {
    base + amplitude * phase.sin()
}

/// `sin(phase)` remapped to `0..=1`.
pub fn unit_pulse(phase: f32) -> f32 {
    (phase.sin() + 1.0) / 2.0
}

/// `|sin(phase)|`.
pub fn abs_pulse(phase: f32) -> f32 {
    phase.sin().abs()
}

/// Exponential falloff `e^(-|distance| / scale)`; 1 at the center.
pub fn center_falloff(distance: f32, scale: f32) -> f32 {
    if scale <= 0.0 || !scale.is_finite() {
        return if distance == 0.0 { 1.0 } else { 0.0 };
    }
    (-distance.abs() / scale).exp()
}

/// Float to alpha channel: truncates like an integer cast, clamps to
/// `0..=255`, NaN becomes transparent.
pub fn alpha(value: f32) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, 255.0) as u8
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp_pos(a: Pos2, b: Pos2, t: f32) -> Pos2 {
    a + (b - a) * t
}

pub fn ease_out_quad(t: f32) -> f32 {
    let t = crate::safety::clamp_unit(t);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// `1 - e^(-t)`: rises from 0 towards 1, used for settle-in animations.
pub fn approach(t: f32) -> f32 {
    1.0 - (-crate::safety::non_negative(t)).exp()
}

/// Rotate a vector by `angle` radians.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    vec2(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Vertices of a regular polygon (`sides` points, first at `rotation`).
pub fn polygon(center: Pos2, radius: f32, sides: usize, rotation: f32) -> Vec<Pos2> {
    (0..sides)
        .map(|i| ring_position(center, radius, i, sides, rotation))
        .collect()
}

/// Radius of a "breathing" wave circle at `angle`: two harmonics (4 and 8
/// lobes) travelling in opposite directions, scaled by `energy`.
pub fn wave_radius(angle: f32, base: f32, wave_time: f32, energy: f32) -> f32 {
    base + 20.0 * (4.0 * angle + wave_time).sin() * energy
        + 10.0 * (8.0 * angle - wave_time * 2.0).cos() * energy
}

/// Point of the classic parametric heart at `t` radians, `size` = half
/// height, centred on the origin with screen y pointing down.
pub fn heart_point(t: f32, size: f32) -> Pos2 {
    let x = size * t.sin().powi(3);
    let y = -size
        * (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos())
        / 16.0;
    pos2(x, y)
}
