//! Configuration type definitions.

use super::enums::{GridDensity, SnapshotCompression};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing surface settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Side length of the square drawing surface in pixels (valid range: 32 - 4096)
    #[serde(default = "default_surface_size")]
    pub surface_size: u32,

    /// Grid density used when no drawing is restored ("4x4" or "32x32")
    #[serde(default)]
    pub default_density: GridDensity,

    /// Color the surface is cleared to, as `#rrggbb`
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            surface_size: default_surface_size(),
            default_density: GridDensity::default(),
            background: default_background(),
        }
    }
}

/// Color panel settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ColorConfig {
    /// Current and previous color at startup, as `#rrggbb`
    #[serde(default = "default_initial_color")]
    pub initial: String,

    /// Preset swatch colors shown next to the picker
    #[serde(default = "default_swatches")]
    pub swatches: Vec<String>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            initial: default_initial_color(),
            swatches: default_swatches(),
        }
    }
}

/// Where and how the drawing is persisted between runs.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Directory holding the snapshot file (`~/` is expanded).
    /// Defaults to `$XDG_DATA_HOME/pixelcanvas`
    #[serde(default)]
    pub directory: Option<String>,

    /// Key the snapshot is stored under (also the file stem).
    /// Characters other than ASCII letters and digits become `_` in the file
    /// name, so keys like "my drawing" and "my_drawing" share one file
    #[serde(default = "default_key")]
    pub key: String,

    /// Gzip the stored snapshot: "auto", "on", or "off"
    #[serde(default)]
    pub compress: SnapshotCompression,

    /// Payload size in KiB at which "auto" compression kicks in
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Snapshots larger than this are neither written nor loaded
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            key: default_key(),
            compress: SnapshotCompression::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub(crate) fn default_surface_size() -> u32 {
    512
}

pub(crate) fn default_background() -> String {
    "#ffffff".to_string()
}

pub(crate) fn default_initial_color() -> String {
    "#000000".to_string()
}

pub(crate) fn default_swatches() -> Vec<String> {
    vec!["#ff0000".to_string(), "#0000ff".to_string()]
}

pub(crate) fn default_key() -> String {
    "canvasData".to_string()
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}
