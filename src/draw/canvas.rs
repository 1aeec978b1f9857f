//! Grid-aware drawing operations on top of a [`Surface`].

use super::color::{self, HexColor, Rgb, WHITE};
use super::grid::GridModel;
use super::surface::Surface;
use crate::error::CanvasResult;
use crate::session::{self, Snapshot};
use log::debug;

/// A drawing surface paired with the grid that divides it into cells.
///
/// Painting goes through the grid (one whole cell per stroke), while fill,
/// clear, and pixel reads address the full physical surface.
pub struct PixelCanvas<S: Surface> {
    surface: S,
    grid: GridModel,
    background: Rgb,
}

impl<S: Surface> PixelCanvas<S> {
    /// Wraps `surface`, clears it, and lays a `dimension × dimension` grid over it.
    pub fn new(surface: S, dimension: u32) -> Self {
        Self::with_background(surface, dimension, WHITE)
    }

    /// Like [`PixelCanvas::new`] with a custom clear color.
    pub fn with_background(surface: S, dimension: u32, background: Rgb) -> Self {
        let grid = GridModel::new(surface.size(), dimension);
        let mut canvas = Self {
            surface,
            grid,
            background,
        };
        canvas.clear_all();
        canvas
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface for snapshot capture and restore.
    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Changes the grid dimension. Painted content is discarded, not resampled.
    pub fn set_dimension(&mut self, dimension: u32) {
        self.grid.set_dimension(dimension);
        debug!(
            "Grid set to {0}x{0} ({1}px cells)",
            self.grid.dimension(),
            self.grid.cell_size()
        );
        self.clear_all();
    }

    /// Paints the whole cell under pointer position `(x, y)`.
    ///
    /// Positions in the leftover strip past the last cell paint nothing.
    pub fn paint_cell(&mut self, x: u32, y: u32, color: Rgb) {
        let (row, col) = self.grid.cell_at(x, y);
        let dimension = self.grid.dimension();
        if row >= dimension || col >= dimension {
            debug!("Pointer ({0}, {1}) is outside the {2}x{2} grid", x, y, dimension);
            return;
        }
        let (cell_x, cell_y) = self.grid.cell_origin(row, col);
        let size = self.grid.cell_size();
        self.surface.fill_rect(cell_x, cell_y, size, size, color);
    }

    /// Paints one cell addressed in snapshot scan order.
    pub(crate) fn paint_scan_cell(&mut self, y_index: u32, x_index: u32, color: Rgb) {
        let size = self.grid.cell_size();
        self.surface
            .fill_rect(x_index * size, y_index * size, size, size, color);
    }

    /// Paints the entire physical surface, including area outside the grid.
    pub fn fill_all(&mut self, color: Rgb) {
        let size = self.surface.size();
        self.surface.fill_rect(0, 0, size, size, color);
    }

    /// Resets the entire physical surface to the background color.
    pub fn clear_all(&mut self) {
        let background = self.background;
        self.fill_all(background);
    }

    /// Reads the exact pixel at `(x, y)` as a hex color.
    pub fn read_color_at(&mut self, x: u32, y: u32) -> CanvasResult<HexColor> {
        let pixel = self.surface.pixel(x, y)?;
        color::to_hex(&color::rgb_text(pixel))
    }

    /// Captures the current coloring of every cell.
    pub fn snapshot(&mut self) -> CanvasResult<Snapshot> {
        session::capture(self)
    }

    /// Repaints every cell from `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) -> CanvasResult<()> {
        session::apply(self, snapshot)
    }
}
