//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two supported grid densities.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
pub enum GridDensity {
    /// 4 cells per side
    #[default]
    #[serde(rename = "4x4")]
    Coarse,
    /// 32 cells per side
    #[serde(rename = "32x32")]
    Fine,
}

impl GridDensity {
    pub const ALL: [GridDensity; 2] = [GridDensity::Coarse, GridDensity::Fine];

    /// Number of cells per side.
    pub fn dimension(self) -> u32 {
        match self {
            Self::Coarse => 4,
            Self::Fine => 32,
        }
    }

    /// Maps a stored dimension back to a density, if it is a supported one.
    pub fn from_dimension(dimension: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|density| density.dimension() == dimension)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Coarse => "4x4",
            Self::Fine => "32x32",
        }
    }
}

impl fmt::Display for GridDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GridDensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "4x4" | "4" | "coarse" => Ok(Self::Coarse),
            "32x32" | "32" | "fine" => Ok(Self::Fine),
            other => Err(format!("unsupported grid density '{other}' (expected 4x4 or 32x32)")),
        }
    }
}

/// Compression preference for the stored snapshot file.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotCompression {
    /// Compress once the payload reaches `auto_compress_threshold_kb`
    Auto,
    /// Always gzip
    On,
    /// Always plain JSON
    #[default]
    Off,
}
