//! Configuration for the overlay host
//!
//! Settings are layered: built-in defaults, then `config.json` in the
//! platform config directory, then `GLOWDECK_*` environment variables, then
//! command-line arguments.

use glowcore::timer::{MAX_INTERVAL, MIN_INTERVAL};
use glowscenes::Variant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub const USAGE: &str = "usage: glowdeck [VARIANT] [--seed N] [--label TEXT] [--interval MS] [--list] [--snapshot FILE.png --frames N]";

/// Frames ticked before a snapshot when `--frames` is not given.
pub const DEFAULT_SNAPSHOT_FRAMES: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub variant: Variant,
    /// Overrides the widget's caption.
    pub label: Option<String>,
    /// Seed for every random choice; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Overrides the widget's tick interval.
    pub interval_ms: Option<u64>,
    pub always_on_top: bool,
    /// Initial value of the listening flag.
    pub listening: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Biometric,
            label: None,
            seed: None,
            interval_ms: None,
            always_on_top: true,
            listening: false,
        }
    }
}

/// Directory holding `config.json`.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("co", "glowdeck", "glowdeck")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

impl DeckConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The stored config, or defaults when the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring config file: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `GLOWDECK_VARIANT` and `GLOWDECK_SEED` from `lookup`. Bad
    /// values are logged and skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup("GLOWDECK_VARIANT") {
            match parse_variant(&id) {
                Ok(variant) => self.variant = variant,
                Err(e) => tracing::warn!("GLOWDECK_VARIANT: {e}"),
            }
        }
        if let Some(seed) = lookup("GLOWDECK_SEED") {
            match seed.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!(%seed, "GLOWDECK_SEED is not a number"),
            }
        }
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(variant) = args.variant {
            self.variant = variant;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(label) = &args.label {
            self.label = Some(label.clone());
        }
        if let Some(ms) = args.interval_ms {
            self.interval_ms = Some(ms);
        }
    }

    /// Caption to show: the override, else the widget's default.
    pub fn caption(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.variant.descriptor().caption.to_string())
    }

    /// Tick interval in ms, clamped to the timer's accepted range. `None`
    /// for static widgets unless overridden.
    pub fn interval(&self) -> Option<u64> {
        let min = MIN_INTERVAL.as_millis() as u64;
        let max = MAX_INTERVAL.as_millis() as u64;
        self.interval_ms
            .or(self.variant.descriptor().interval_ms)
            .map(|ms| ms.clamp(min, max))
    }
}

fn parse_variant(id: &str) -> Result<Variant> {
    let id = id.trim().to_ascii_lowercase();
    Variant::from_id(&id).ok_or(ConfigError::UnknownVariant(id))
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub variant: Option<Variant>,
    pub seed: Option<u64>,
    pub label: Option<String>,
    pub interval_ms: Option<u64>,
    pub list: bool,
    pub snapshot: Option<PathBuf>,
    pub frames: Option<u32>,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| ConfigError::InvalidArgument(format!("{flag} needs a value")))
            };
            match arg.as_str() {
                "--list" => parsed.list = true,
                "--seed" => parsed.seed = Some(number(&value("--seed")?, "--seed")?),
                "--label" => parsed.label = Some(value("--label")?),
                "--interval" => parsed.interval_ms = Some(number(&value("--interval")?, "--interval")?),
                "--snapshot" => parsed.snapshot = Some(PathBuf::from(value("--snapshot")?)),
                "--frames" => parsed.frames = Some(number(&value("--frames")?, "--frames")?),
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::InvalidArgument(flag.to_string()));
                }
                id if parsed.variant.is_none() => parsed.variant = Some(parse_variant(id)?),
                extra => return Err(ConfigError::InvalidArgument(extra.to_string())),
            }
        }
        if parsed.frames.is_some() && parsed.snapshot.is_none() {
            return Err(ConfigError::InvalidArgument("--frames needs --snapshot".into()));
        }
        Ok(parsed)
    }
}

fn number<T: std::str::FromStr>(text: &str, flag: &str) -> Result<T> {
    text.parse()
        .map_err(|_| ConfigError::InvalidArgument(format!("{flag} {text}")))
}

/// Layer defaults, the config file, the environment and `args`.
pub fn resolve(path: &Path, env: impl Fn(&str) -> Option<String>, args: &Args) -> DeckConfig {
    let mut config = DeckConfig::load_or_default(path);
    config.apply_env(env);
    config.apply_args(args);
    tracing::info!(variant = %config.variant, seed = ?config.seed, "configuration resolved");
    config
}
