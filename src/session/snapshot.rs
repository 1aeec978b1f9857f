use crate::draw::{HexColor, PixelCanvas, Surface};
use crate::error::{CanvasError, CanvasResult};
use anyhow::{Context, Result};
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

const CURRENT_VERSION: u32 = 1;

/// Full coloring of the grid, one hex color per cell.
///
/// Rows are indexed top to bottom and each row left to right, the same order
/// [`capture`] reads the surface in. Always square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pixels: Vec<Vec<HexColor>>,
}

impl Snapshot {
    /// Builds a snapshot from scan-ordered rows, checking that it is square and non-empty.
    pub fn from_rows(pixels: Vec<Vec<HexColor>>) -> CanvasResult<Self> {
        let dimension = pixels.len();
        if dimension == 0 {
            return Err(CanvasError::CorruptPersistedSnapshot(
                "snapshot has no rows".to_string(),
            ));
        }
        if let Some((index, row)) = pixels
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != dimension)
        {
            return Err(CanvasError::CorruptPersistedSnapshot(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                dimension
            )));
        }
        Ok(Self { pixels })
    }

    /// Cells per side.
    pub fn dimension(&self) -> u32 {
        self.pixels.len() as u32
    }

    pub fn rows(&self) -> &[Vec<HexColor>] {
        &self.pixels
    }

    /// Color stored for the cell at scan position `(y_index, x_index)`.
    pub fn get(&self, y_index: usize, x_index: usize) -> Option<&HexColor> {
        self.pixels.get(y_index).and_then(|row| row.get(x_index))
    }
}

/// On-disk schema with an explicit dimension.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    dimension: u32,
    #[serde(default)]
    last_modified: Option<String>,
    pixels: Vec<Vec<String>>,
}

/// Accepted stored shapes: the versioned object, or a bare nested array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Versioned(SnapshotFile),
    Legacy(Vec<Vec<String>>),
}

/// Reads the color of every cell at its top-left pixel.
pub fn capture<S: Surface>(canvas: &mut PixelCanvas<S>) -> CanvasResult<Snapshot> {
    let grid = *canvas.grid();
    let dimension = grid.dimension() as usize;
    let mut pixels = vec![Vec::with_capacity(dimension); dimension];

    for (y_index, _, x, y) in grid.cells() {
        pixels[y_index].push(canvas.read_color_at(x, y)?);
    }

    Ok(Snapshot { pixels })
}

/// Paints every stored color into its cell, the inverse of [`capture`].
///
/// # Errors
/// [`CanvasError::DimensionMismatch`] when the snapshot was taken on a grid of
/// another size; nothing is painted in that case.
pub fn apply<S: Surface>(canvas: &mut PixelCanvas<S>, snapshot: &Snapshot) -> CanvasResult<()> {
    let expected = canvas.grid().dimension();
    if snapshot.dimension() != expected {
        return Err(CanvasError::DimensionMismatch {
            expected,
            found: snapshot.dimension(),
        });
    }

    // Every entry must be paintable before the first cell is touched.
    let colors = snapshot
        .pixels
        .iter()
        .map(|row| row.iter().map(HexColor::to_rgb).collect::<CanvasResult<Vec<_>>>())
        .collect::<CanvasResult<Vec<_>>>()?;

    for (y_index, row) in colors.into_iter().enumerate() {
        for (x_index, color) in row.into_iter().enumerate() {
            canvas.paint_scan_cell(y_index as u32, x_index as u32, color);
        }
    }
    Ok(())
}

/// Serialises a snapshot into its stored JSON form.
pub fn encode(snapshot: &Snapshot) -> Result<String> {
    let file = SnapshotFile {
        version: CURRENT_VERSION,
        dimension: snapshot.dimension(),
        last_modified: Some(Utc::now().to_rfc3339()),
        pixels: snapshot
            .pixels
            .iter()
            .map(|row| row.iter().map(|color| color.as_str().to_string()).collect())
            .collect(),
    };
    serde_json::to_string(&file).context("failed to serialise canvas snapshot")
}

/// Shape the stored JSON was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredFormat {
    /// Versioned object carrying an explicit `dimension`.
    Versioned,
    /// Bare nested array; the dimension is only implied by its length.
    Legacy,
}

/// Parses stored JSON back into a [`Snapshot`].
///
/// # Errors
/// [`CanvasError::CorruptPersistedSnapshot`] for malformed JSON, an unknown
/// version, a non-square shape, a dimension field that disagrees with the
/// rows, or any entry that is not a hex color.
pub fn decode(text: &str) -> CanvasResult<Snapshot> {
    decode_with_format(text).map(|(snapshot, _)| snapshot)
}

/// Like [`decode`], also reporting which stored shape was found.
pub fn decode_with_format(text: &str) -> CanvasResult<(Snapshot, StoredFormat)> {
    let corrupt = |detail: String| CanvasError::CorruptPersistedSnapshot(detail);

    let stored: StoredSnapshot =
        serde_json::from_str(text).map_err(|err| corrupt(err.to_string()))?;

    let (rows, format) = match stored {
        StoredSnapshot::Versioned(file) => {
            if file.version > CURRENT_VERSION {
                return Err(corrupt(format!("unsupported version {}", file.version)));
            }
            if file.dimension as usize != file.pixels.len() {
                return Err(corrupt(format!(
                    "dimension {} does not match {} stored rows",
                    file.dimension,
                    file.pixels.len()
                )));
            }
            debug!(
                "Decoding {0}x{0} snapshot (last modified {1})",
                file.dimension,
                file.last_modified.as_deref().unwrap_or("unknown")
            );
            (file.pixels, StoredFormat::Versioned)
        }
        StoredSnapshot::Legacy(rows) => {
            debug!("Decoding legacy snapshot without dimension field");
            (rows, StoredFormat::Legacy)
        }
    };

    let pixels = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|text| HexColor::parse(&text).map_err(|err| corrupt(err.to_string())))
                .collect::<CanvasResult<Vec<_>>>()
        })
        .collect::<CanvasResult<Vec<_>>>()?;

    Ok((Snapshot::from_rows(pixels)?, format))
}
