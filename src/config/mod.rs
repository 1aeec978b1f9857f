//! Configuration file support for pixelcanvas.
//!
//! Settings are read from `~/.config/pixelcanvas/config.toml` (respecting
//! `XDG_CONFIG_HOME`). If no config file exists, defaults are used.

pub mod enums;
pub mod types;

pub use enums::{GridDensity, SnapshotCompression};
pub use types::{CanvasConfig, ColorConfig, StorageConfig};

use crate::draw::{HexColor, Rgb};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// surface_size = 512
/// default_density = "32x32"
/// background = "#ffffff"
///
/// [colors]
/// initial = "#000000"
/// swatches = ["#ff0000", "#0000ff"]
///
/// [storage]
/// compress = "auto"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing surface settings
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Color panel settings
    #[serde(default)]
    pub colors: ColorConfig,

    /// Snapshot persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates values, repairing anything out of range.
    ///
    /// - `surface_size`: 32 - 4096
    /// - colors must be `#rgb` or `#rrggbb`; invalid ones fall back to defaults
    /// - `storage.key` must be non-empty
    /// - size limits must be at least 1
    fn validate_and_clamp(&mut self) {
        if !(32..=4096).contains(&self.canvas.surface_size) {
            warn!(
                "Invalid surface_size {}, clamping to 32-4096 range",
                self.canvas.surface_size
            );
            self.canvas.surface_size = self.canvas.surface_size.clamp(32, 4096);
        }

        if HexColor::parse(&self.canvas.background).is_err() {
            warn!(
                "Invalid canvas background '{}', falling back to white",
                self.canvas.background
            );
            self.canvas.background = types::default_background();
        }

        if HexColor::parse(&self.colors.initial).is_err() {
            warn!(
                "Invalid initial color '{}', falling back to black",
                self.colors.initial
            );
            self.colors.initial = types::default_initial_color();
        }

        let before = self.colors.swatches.len();
        self.colors.swatches.retain(|swatch| {
            let valid = HexColor::parse(swatch).is_ok();
            if !valid {
                warn!("Ignoring invalid swatch color '{}'", swatch);
            }
            valid
        });
        if before > 0 && self.colors.swatches.is_empty() {
            self.colors.swatches = types::default_swatches();
        }

        if self.storage.key.trim().is_empty() {
            warn!("Empty storage key, falling back to 'canvasData'");
            self.storage.key = types::default_key();
        }

        if self.storage.max_file_size_mb == 0 {
            warn!("Invalid max_file_size_mb 0, using 1");
            self.storage.max_file_size_mb = 1;
        }

        if self.storage.auto_compress_threshold_kb == 0 {
            warn!("Invalid auto_compress_threshold_kb 0, using 1");
            self.storage.auto_compress_threshold_kb = 1;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pixelcanvas");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Background color as RGB. Values are validated on load.
    pub fn background_rgb(&self) -> Rgb {
        parse_or(&self.canvas.background, crate::draw::WHITE)
    }

    /// Initial drawing color as RGB.
    pub fn initial_rgb(&self) -> Rgb {
        parse_or(&self.colors.initial, crate::draw::BLACK)
    }

    /// Swatch colors as RGB, skipping anything unparsable.
    pub fn swatch_rgbs(&self) -> Vec<Rgb> {
        self.colors
            .swatches
            .iter()
            .filter_map(|swatch| HexColor::parse(swatch).and_then(|hex| hex.to_rgb()).ok())
            .collect()
    }
}

fn parse_or(text: &str, fallback: Rgb) -> Rgb {
    HexColor::parse(text)
        .and_then(|hex| hex.to_rgb())
        .unwrap_or(fallback)
}
