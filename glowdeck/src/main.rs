//! glowdeck — run one decorative glow widget as a frameless, translucent
//! desktop overlay
//!
//! Primary-drag moves the window, Escape closes it and `L` toggles the
//! listening state. `--snapshot` renders headlessly to a PNG instead.

mod app;
mod config;

use app::{DeckApp, FALLBACK_SCREEN};
use config::{Args, DeckConfig, DEFAULT_SNAPSHOT_FRAMES, USAGE};
use eframe::NativeOptions;
use glowcore::raster::RasterSurface;
use glowcore::rng::entropy_seed;
use glowcore::OverlayTheme;
use glowscenes::{Variant, WindowSize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn list() {
    for variant in Variant::all() {
        let d = variant.descriptor();
        let size = match d.size {
            WindowSize::Fixed(s) => format!("{}x{}", s.x, s.y),
            WindowSize::Fullscreen => "fullscreen".to_string(),
            WindowSize::ScreenFraction(f) => format!("{:.0}% of screen", f * 100.0),
        };
        println!("{:<16} {:<24} {}", d.id, d.title, size);
    }
}

/// Tick `frames` times and write the last frame to `path`.
fn snapshot(config: &DeckConfig, path: &Path, frames: u32) -> glowcore::raster::Result<()> {
    let size = config.variant.descriptor().size.resolve(FALLBACK_SCREEN);
    let seed = config.seed.unwrap_or_else(entropy_seed);
    let mut state = glowscenes::build(config.variant, &config.caption(), seed, size);
    state.set_listening(config.listening);
    for _ in 0..frames {
        state.tick();
    }

    let mut surface = RasterSurface::new(size.x as u32, size.y as u32)?;
    state.paint_frame(&mut surface);
    surface.save_png(path)?;
    tracing::info!(
        path = %path.display(),
        frames,
        seed,
        skipped_text = surface.skipped_text(),
        "snapshot written"
    );
    Ok(())
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("glowdeck: {e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    if args.list {
        list();
        return Ok(());
    }

    let path = config::config_path();
    if !path.exists() {
        if let Err(e) = DeckConfig::default().save(&path) {
            tracing::warn!(path = %path.display(), "could not write default config: {e}");
        }
    }
    let config = config::resolve(&path, |key| std::env::var(key).ok(), &args);

    if let Some(out) = &args.snapshot {
        let frames = args.frames.unwrap_or(DEFAULT_SNAPSHOT_FRAMES);
        if let Err(e) = snapshot(&config, out, frames) {
            eprintln!("glowdeck: snapshot failed: {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    let descriptor = config.variant.descriptor();
    let title = config.caption();
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(descriptor.size.resolve(FALLBACK_SCREEN))
        .with_title(title.as_str())
        .with_decorations(false)
        .with_transparent(true)
        .with_fullscreen(descriptor.is_fullscreen());

    if config.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(pos) = glowcore::cascade_position() {
        viewport = viewport.with_position(pos);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            OverlayTheme::default().apply(&cc.egui_ctx);
            Box::new(DeckApp::new(&config))
        }),
    )
}
