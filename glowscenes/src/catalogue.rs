//! catalogue — stable ids, window descriptors and scene construction
//!
//! The host only deals in [`Variant`]s: it looks up the [`Descriptor`] to
//! size and title its window, then calls [`build`] for the running state.

use crate::widgets::*;
use egui::{vec2, Vec2};
use glowcore::rng::seeded;
use glowcore::{AnimationState, Clock, Scene};
use serde::{Deserialize, Serialize};

/// Caption used when a widget's own default does not apply.
pub const DEFAULT_CAPTION: &str = "Glowdeck";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Biometric,
    NeuralScanner,
    Crystal,
    Portal,
    Reactor,
    TechHud,
    Jarvis,
    DigitalFace,
    GridFace,
    Matrix,
    CyberNetwork,
    NeuralNetwork,
    Interface,
    Chroma,
    Wave,
    Quantum,
    PulseNetwork,
    Ruby,
    DarkCrystal,
    Virtual,
    Nebula,
    Heart,
    Hologram,
    Scanner,
    Lightning,
    MatrixHex,
    MatrixStorm,
    Ghost,
}

/// How big the host window should be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowSize {
    Fixed(Vec2),
    /// Cover the whole screen.
    Fullscreen,
    /// This share of the screen in both directions.
    ScreenFraction(f32),
}

impl WindowSize {
    /// Concrete window size on a screen of `screen` pixels.
    pub fn resolve(self, screen: Vec2) -> Vec2 {
        match self {
            WindowSize::Fixed(size) => size,
            WindowSize::Fullscreen => screen,
            WindowSize::ScreenFraction(f) => (screen * f).floor(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Descriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub size: WindowSize,
    /// Tick interval; `None` for static widgets that never animate.
    pub interval_ms: Option<u64>,
    /// Default caption text.
    pub caption: &'static str,
    /// A secondary click closes the window.
    pub closes_on_secondary: bool,
}

impl Descriptor {
    pub fn is_fullscreen(&self) -> bool {
        self.size == WindowSize::Fullscreen
    }
}

const SQUARE: WindowSize = WindowSize::Fixed(vec2(600.0, 600.0));
const WIDE: WindowSize = WindowSize::Fixed(vec2(800.0, 600.0));
const LARGE: WindowSize = WindowSize::Fixed(vec2(1000.0, 800.0));

const fn windowed(id: &'static str, title: &'static str, size: WindowSize, interval_ms: u64) -> Descriptor {
    Descriptor {
        id,
        title,
        size,
        interval_ms: Some(interval_ms),
        caption: DEFAULT_CAPTION,
        closes_on_secondary: false,
    }
}

const fn fullscreen(id: &'static str, title: &'static str, interval_ms: u64) -> Descriptor {
    Descriptor {
        id,
        title,
        size: WindowSize::Fullscreen,
        interval_ms: Some(interval_ms),
        caption: DEFAULT_CAPTION,
        closes_on_secondary: true,
    }
}

impl Variant {
    pub fn all() -> &'static [Variant] {
        use Variant::*;
        &[
            Biometric,
            NeuralScanner,
            Crystal,
            Portal,
            Reactor,
            TechHud,
            Jarvis,
            DigitalFace,
            GridFace,
            Matrix,
            CyberNetwork,
            NeuralNetwork,
            Interface,
            Chroma,
            Wave,
            Quantum,
            PulseNetwork,
            Ruby,
            DarkCrystal,
            Virtual,
            Nebula,
            Heart,
            Hologram,
            Scanner,
            Lightning,
            MatrixHex,
            MatrixStorm,
            Ghost,
        ]
    }

    pub fn from_id(id: &str) -> Option<Variant> {
        Self::all().iter().copied().find(|v| v.id() == id)
    }

    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn descriptor(self) -> Descriptor {
        match self {
            Variant::Biometric => windowed("biometric", "Biometric Scanner", SQUARE, 30),
            Variant::NeuralScanner => Descriptor {
                caption: "AI Assistant",
                ..windowed("neural-scanner", "Neural Scanner", WIDE, 30)
            },
            Variant::Crystal => windowed("crystal", "Energy Crystal", SQUARE, 30),
            Variant::Portal => windowed("portal", "Dimensional Portal", SQUARE, 30),
            Variant::Reactor => windowed("reactor", "Arc Reactor", SQUARE, 30),
            Variant::TechHud => windowed("tech-hud", "Advanced Assistant", WindowSize::Fixed(vec2(800.0, 800.0)), 20),
            Variant::Jarvis => windowed("jarvis", "Jarvis", SQUARE, 30),
            Variant::DigitalFace => Descriptor {
                closes_on_secondary: true,
                ..windowed("digital-face", "Digital Face", SQUARE, 30)
            },
            Variant::GridFace => fullscreen("grid-face", "Particle Face", 50),
            Variant::Matrix => fullscreen("matrix", "Matrix", 50),
            Variant::CyberNetwork => fullscreen("cyber-network", "Cyber Network", 30),
            Variant::NeuralNetwork => fullscreen("neural-network", "Neural Network", 30),
            Variant::Interface => windowed("interface", "Neural Interface", WIDE, 30),
            Variant::Chroma => windowed("chroma", "Chroma Assistant", WIDE, 16),
            Variant::Wave => windowed("wave", "Voice Wave", WIDE, 16),
            Variant::Quantum => windowed("quantum", "Quantum Assistant", LARGE, 16),
            Variant::PulseNetwork => fullscreen("pulse-network", "Pulse Network", 16),
            Variant::Ruby => windowed("ruby", "Ruby Crystal", WIDE, 16),
            Variant::DarkCrystal => Descriptor {
                caption: "SYSTEM ACTIVE",
                ..windowed("dark-crystal", "Dark Crystal", WIDE, 16)
            },
            Variant::Virtual => windowed("virtual", "Virtual Assistant", WindowSize::ScreenFraction(0.6), 30),
            Variant::Nebula => windowed("nebula", "Cosmic Nebula", WIDE, 16),
            Variant::Heart => Descriptor {
                interval_ms: None,
                ..windowed("heart", "Heart", WindowSize::Fixed(vec2(400.0, 400.0)), 30)
            },
            Variant::Hologram => windowed("hologram", "Hologram Interface", WIDE, 16),
            Variant::Scanner => windowed("scanner", "Holographic Scanner", SQUARE, 30),
            Variant::Lightning => windowed("lightning", "Matrix Lightning", WIDE, 30),
            Variant::MatrixHex => windowed("matrix-hex", "Matrix Hex", WIDE, 30),
            Variant::MatrixStorm => windowed("matrix-storm", "Matrix Storm", LARGE, 30),
            Variant::Ghost => windowed("ghost", "Ghost Voice", LARGE, 16),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn boxed(clock: Clock, scene: impl Scene + 'static) -> (Clock, Box<dyn Scene>) {
    (clock, Box::new(scene))
}

/// A ready-to-run widget of `size` pixels, captioned `label`, with every
/// random choice drawn from `seed`.
pub fn build(variant: Variant, label: &str, seed: u64, size: Vec2) -> AnimationState {
    let mut rng = seeded(seed);
    let rng_ref = &mut rng;
    let (clock, scene) = match variant {
        Variant::Biometric => boxed(biometric::clock(), biometric::Biometric::new(label, size, rng_ref)),
        Variant::NeuralScanner => boxed(neural_scanner::clock(), neural_scanner::NeuralScanner::new(label, size, rng_ref)),
        Variant::Crystal => boxed(crystal::clock(), crystal::Crystal::new(label, size, rng_ref)),
        Variant::Portal => boxed(portal::clock(), portal::Portal::new(label, size, rng_ref)),
        Variant::Reactor => boxed(reactor::clock(), reactor::Reactor::new(label, size, rng_ref)),
        Variant::TechHud => boxed(tech_hud::clock(), tech_hud::TechHud::new(label, size, rng_ref)),
        Variant::Jarvis => boxed(jarvis::clock(), jarvis::Jarvis::new(label, size, rng_ref)),
        Variant::DigitalFace => boxed(digital_face::clock(), digital_face::DigitalFace::new(label, size, rng_ref)),
        Variant::GridFace => boxed(grid_face::clock(), grid_face::GridFace::new(label, size, rng_ref)),
        Variant::Matrix => boxed(matrix::clock(), matrix::Matrix::new(label, size, rng_ref)),
        Variant::CyberNetwork => boxed(cyber_network::clock(), cyber_network::CyberNetwork::new(label, size, rng_ref)),
        Variant::NeuralNetwork => boxed(neural_network::clock(), neural_network::NeuralNetwork::new(label, size, rng_ref)),
        Variant::Interface => boxed(interface::clock(), interface::Interface::new(label, size, rng_ref)),
        Variant::Chroma => boxed(chroma::clock(), chroma::Chroma::new(label, size, rng_ref)),
        Variant::Wave => boxed(wave::clock(), wave::Wave::new(label, size, rng_ref)),
        Variant::Quantum => boxed(quantum::clock(), quantum::Quantum::new(label, size, rng_ref)),
        Variant::PulseNetwork => boxed(pulse_network::clock(), pulse_network::PulseNetwork::new(label, size, rng_ref)),
        Variant::Ruby => boxed(ruby::clock(), ruby::Ruby::new(label, size, rng_ref)),
        Variant::DarkCrystal => boxed(dark_crystal::clock(), dark_crystal::DarkCrystal::new(label, size, rng_ref)),
        Variant::Virtual => boxed(virtual_assistant::clock(), virtual_assistant::VirtualAssistant::new(label, size, rng_ref)),
        Variant::Nebula => boxed(nebula::clock(), nebula::Nebula::new(label, size, rng_ref)),
        Variant::Heart => boxed(heart::clock(), heart::Heart::new(label, size, rng_ref)),
        Variant::Hologram => boxed(hologram::clock(), hologram::Hologram::new(label, size, rng_ref)),
        Variant::Scanner => boxed(scanner::clock(), scanner::Scanner::new(label, size, rng_ref)),
        Variant::Lightning => boxed(lightning::clock(), lightning::Lightning::new(label, size, rng_ref)),
        Variant::MatrixHex => boxed(matrix_hex::clock(), matrix_hex::MatrixHex::new(label, size, rng_ref)),
        Variant::MatrixStorm => boxed(matrix_storm::clock(), matrix_storm::MatrixStorm::new(label, size, rng_ref)),
        Variant::Ghost => boxed(ghost::clock(), ghost::Ghost::new(label, size, rng_ref)),
    };
    tracing::debug!(%variant, seed, ?size, "built scene");
    AnimationState::new(clock, scene, rng, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcore::record::RecordingSurface;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_and_resolvable() {
        let ids: HashSet<&str> = Variant::all().iter().map(|v| v.id()).collect();
        assert_eq!(ids.len(), Variant::all().len());
        assert_eq!(Variant::all().len(), 28);
        for v in Variant::all() {
            assert_eq!(Variant::from_id(v.id()), Some(*v));
        }
        assert_eq!(Variant::from_id("nope"), None);
    }

    #[test]
    fn test_serde_matches_ids() {
        for v in Variant::all() {
            let json = serde_json::to_string(v).unwrap();
            assert_eq!(json, format!("\"{}\"", v.id()));
            let back: Variant = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *v);
        }
    }

    #[test]
    fn test_window_sizes() {
        let screen = vec2(1920.0, 1080.0);
        assert_eq!(Variant::Virtual.descriptor().size.resolve(screen), vec2(1152.0, 648.0));
        assert_eq!(Variant::Matrix.descriptor().size.resolve(screen), screen);
        assert_eq!(Variant::Heart.descriptor().size.resolve(screen), vec2(400.0, 400.0));
        assert!(Variant::Heart.descriptor().interval_ms.is_none());
        assert!(Variant::DigitalFace.descriptor().closes_on_secondary);
        assert!(Variant::Matrix.descriptor().closes_on_secondary);
        assert!(!Variant::Wave.descriptor().closes_on_secondary);
    }

    #[test]
    fn test_every_variant_ticks_and_paints_deterministically() {
        for v in Variant::all() {
            let d = v.descriptor();
            let size = d.size.resolve(vec2(1280.0, 720.0));
            let mut state = build(*v, d.caption, 11, size);
            for _ in 0..5 {
                state.tick();
            }
            state.set_listening(true);
            state.set_pointer(Some((size / 3.0).to_pos2()));
            state.tick();

            let mut first = RecordingSurface::new(size);
            state.paint_frame(&mut first);
            let mut second = RecordingSurface::new(size);
            state.paint_frame(&mut second);
            assert!(!first.commands().is_empty(), "{v} painted nothing");
            assert_eq!(first.commands(), second.commands(), "{v} paint is not pure");
        }
    }

    #[test]
    fn test_same_seed_same_frames() {
        let size = vec2(800.0, 600.0);
        let paint = |seed| {
            let mut state = build(Variant::Lightning, "L", seed, size);
            for _ in 0..20 {
                state.tick();
            }
            let mut surface = RecordingSurface::new(size);
            state.paint_frame(&mut surface);
            surface.commands().to_vec()
        };
        assert_eq!(paint(5), paint(5));
    }

    #[test]
    fn test_resize_survives_every_variant() {
        for v in Variant::all() {
            let mut state = build(*v, DEFAULT_CAPTION, 2, vec2(800.0, 600.0));
            state.tick();
            state.resize(vec2(640.0, 480.0));
            state.tick();
            let mut surface = RecordingSurface::new(vec2(640.0, 480.0));
            state.paint_frame(&mut surface);
        }
    }
}
