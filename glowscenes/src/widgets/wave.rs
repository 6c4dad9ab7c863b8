//! wave — violet voice visualiser: breathing wave circles, orbiting energy
//! rings and mirrored voice traces while speaking

use crate::motifs::{centered_rect, voice_energy, wave_circle, EnergyRing, VoiceWaves};
use egui::{vec2, Vec2};
use glowcore::surface::{GradientStop, Paint};
use glowcore::{Canvas, Clock, FontSpec, Frame, GlowText, Rgba, Scene, SceneRng};

const VIOLET: Rgba = Rgba::rgb(180, 0, 255);

pub fn clock() -> Clock {
    Clock::new()
        .with_phase("wave", 0.1, Clock::TAU)
        .with_phase("ring", 2.0, 360.0)
        .with_accumulator("pulse", 0.05)
}

pub fn status_text(listening: bool) -> &'static str {
    if listening {
        "Listening..."
    } else {
        "Responding..."
    }
}

pub struct Wave {
    label: String,
    listening: bool,
}

impl Wave {
    pub fn new(label: &str, _size: Vec2, _rng: &mut SceneRng) -> Self {
        Self {
            label: label.to_string(),
            listening: false,
        }
    }

    fn voice(&self, width: f32, energy: f32) -> VoiceWaves {
        VoiceWaves {
            points: 100,
            width: width * 0.8,
            amplitude: 50.0 * energy,
            harmonics: (2.0, 3.0),
            thickness: 2.0,
            offset: 150.0,
            colors: [VIOLET; 3],
            dots: None,
        }
    }
}

impl Scene for Wave {
    fn background(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        canvas.fill_background(&Paint::radial2(frame.center(), 400.0, Rgba::TRANSPARENT, Rgba::rgba(0, 255, 255, 80)));
    }

    fn backdrop(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let wave = frame.phase("wave");
        let energy = voice_energy(frame.phase("pulse"), self.listening);
        for i in 0..3 {
            let stops = vec![
                GradientStop::new(0.0, VIOLET.with_alpha(100)),
                GradientStop::new(1.0, Rgba::rgba(100, 0, 150, 0)),
            ];
            wave_circle(canvas, c, 100.0 + i as f32 * 40.0, wave, energy, stops, VIOLET.with_alpha(100));
        }
    }

    fn elements(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        for i in 0..2 {
            EnergyRing {
                radius: 180.0 + i as f32 * 60.0,
                count: 32 + i * 16,
                color: VIOLET,
                link_to: None,
            }
            .paint(canvas, c, frame.phase("ring"), pulse);
        }

        if !self.listening {
            let energy = voice_energy(pulse, false);
            self.voice(frame.width(), energy).paint(canvas, c, frame.phase("wave"));
        }
    }

    fn overlay(&self, canvas: &mut Canvas<'_>, frame: &Frame<'_>) {
        let c = frame.center();
        let pulse = frame.phase("pulse");
        GlowText::new(&self.label, c, FontSpec::sans(40.0).bold(), VIOLET)
            .intensity(0.7 + 0.3 * pulse.sin())
            .drift(vec2(0.0, -0.5))
            .core(Rgba::WHITE)
            .paint(canvas);

        canvas.text_in(
            centered_rect(c + vec2(0.0, 45.0), 200.0, 30.0),
            status_text(self.listening),
            FontSpec::sans(12.0).bold(),
            Rgba::WHITE,
        );
    }

    fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }
}
