//! DeckApp — hosts one widget in a frameless, transparent eframe window

use crate::config::DeckConfig;
use egui::{CentralPanel, Context, Key, Vec2, ViewportCommand};
use glowcore::painter::EguiSurface;
use glowcore::rng::entropy_seed;
use glowcore::safety::catch_or;
use glowcore::timer::FrameTimer;
use glowcore::AnimationState;
use glowscenes::{Descriptor, WindowSize};
use std::time::Instant;

/// Screen size assumed until the real monitor size is known.
pub const FALLBACK_SCREEN: Vec2 = Vec2::new(1920.0, 1080.0);

pub struct DeckApp {
    descriptor: Descriptor,
    state: AnimationState,
    /// `None` for static widgets.
    timer: Option<FrameTimer>,
    /// Screen-relative windows still waiting for the monitor size.
    sized: bool,
}

impl DeckApp {
    pub fn new(config: &DeckConfig) -> Self {
        let descriptor = config.variant.descriptor();
        let seed = config.seed.unwrap_or_else(entropy_seed);
        let size = descriptor.size.resolve(FALLBACK_SCREEN);
        let mut state = glowscenes::build(config.variant, &config.caption(), seed, size);
        state.set_listening(config.listening);
        tracing::info!(variant = %config.variant, seed, "starting overlay");
        Self {
            descriptor,
            state,
            timer: config.interval().map(FrameTimer::from_millis),
            sized: !matches!(descriptor.size, WindowSize::ScreenFraction(_)),
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    fn handle_input(&mut self, ctx: &Context) {
        let (escape, toggle, drag, secondary) = ctx.input(|i| {
            (
                i.key_pressed(Key::Escape),
                i.key_pressed(Key::L),
                i.pointer.primary_pressed(),
                i.pointer.secondary_clicked(),
            )
        });

        if escape || (secondary && self.descriptor.closes_on_secondary) {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
        if toggle {
            self.state.toggle_listening();
            tracing::debug!(listening = self.state.is_listening(), "listening toggled");
        }
        if drag && !self.descriptor.is_fullscreen() {
            ctx.send_viewport_cmd(ViewportCommand::StartDrag);
        }
    }

    /// Resize screen-relative windows once the monitor is known.
    fn fit_to_monitor(&mut self, ctx: &Context) {
        if self.sized {
            return;
        }
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let size = self.descriptor.size.resolve(monitor);
            ctx.send_viewport_cmd(ViewportCommand::InnerSize(size));
            self.sized = true;
        }
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.fit_to_monitor(ctx);
        self.handle_input(ctx);

        if let Some(timer) = &mut self.timer {
            if timer.poll(Instant::now()) {
                let state = &mut self.state;
                catch_or((), || state.tick());
            }
        }

        CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            let rect = ui.max_rect();
            let pointer = ctx.input(|i| i.pointer.hover_pos());
            self.state.resize(rect.size());
            self.state
                .set_pointer(pointer.filter(|p| rect.contains(*p)).map(|p| (p - rect.min).to_pos2()));

            let painter = ui.painter_at(rect);
            let state = &self.state;
            catch_or((), || {
                let mut surface = EguiSurface::new(&painter, rect);
                state.paint_frame(&mut surface);
            });
        });

        if let Some(timer) = &self.timer {
            timer.schedule(ctx);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}
