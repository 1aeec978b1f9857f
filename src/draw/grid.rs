//! Mapping between surface pixels and logical grid cells.

use log::warn;

/// Logical N×N grid laid over a square surface of fixed pixel size.
///
/// `cell_size` is `floor(surface_size / dimension)`, so `cell_size * dimension`
/// never exceeds the surface; the leftover strip along the right and bottom
/// edges belongs to no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridModel {
    surface_size: u32,
    dimension: u32,
    cell_size: u32,
}

impl GridModel {
    /// Creates a grid for a surface of `surface_size` pixels per side.
    pub fn new(surface_size: u32, dimension: u32) -> Self {
        let mut grid = Self {
            surface_size: surface_size.max(1),
            dimension: 1,
            cell_size: surface_size.max(1),
        };
        grid.set_dimension(dimension);
        grid
    }

    /// Sets the number of cells per side and recomputes the cell size.
    ///
    /// The dimension is clamped to `1..=surface_size` so every cell covers at
    /// least one pixel. Clearing painted content is the caller's job.
    pub fn set_dimension(&mut self, dimension: u32) {
        let clamped = dimension.clamp(1, self.surface_size);
        if clamped != dimension {
            warn!(
                "Grid dimension {} does not fit a {}px surface, using {}",
                dimension, self.surface_size, clamped
            );
        }
        self.dimension = clamped;
        self.cell_size = self.surface_size / clamped;
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn surface_size(&self) -> u32 {
        self.surface_size
    }

    /// Pixel origin of cell `(row, col)`: `(row * cell_size, col * cell_size)`.
    pub fn cell_origin(&self, row: u32, col: u32) -> (u32, u32) {
        (row * self.cell_size, col * self.cell_size)
    }

    /// Cell containing pixel `(x, y)`.
    ///
    /// No clamping: pixels in the leftover strip map to indices `>= dimension`.
    pub fn cell_at(&self, x: u32, y: u32) -> (u32, u32) {
        (x / self.cell_size, y / self.cell_size)
    }

    /// Sample points of every cell in scan order (vertical index outer).
    ///
    /// Yields `(y_index, x_index, x, y)` where `(x, y)` is the cell's top-left pixel.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32, u32)> + '_ {
        let dimension = self.dimension;
        let cell_size = self.cell_size;
        (0..dimension).flat_map(move |i| {
            (0..dimension).map(move |j| (i as usize, j as usize, j * cell_size, i * cell_size))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_is_floored() {
        let grid = GridModel::new(128, 4);
        assert_eq!(grid.cell_size(), 32);

        let grid = GridModel::new(100, 32);
        assert_eq!(grid.cell_size(), 3);
        assert!(grid.cell_size() * grid.dimension() <= grid.surface_size());
    }

    #[test]
    fn cell_at_and_origin_agree() {
        let grid = GridModel::new(128, 4);
        assert_eq!(grid.cell_at(33, 65), (1, 2));
        assert_eq!(grid.cell_origin(1, 2), (32, 64));
        assert_eq!(grid.cell_at(0, 0), (0, 0));
        assert_eq!(grid.cell_at(127, 127), (3, 3));
    }

    #[test]
    fn set_dimension_recomputes_cell_size() {
        let mut grid = GridModel::new(512, 4);
        assert_eq!(grid.cell_size(), 128);
        grid.set_dimension(32);
        assert_eq!(grid.dimension(), 32);
        assert_eq!(grid.cell_size(), 16);
    }

    #[test]
    fn dimension_is_clamped_to_surface() {
        let mut grid = GridModel::new(8, 0);
        assert_eq!(grid.dimension(), 1);
        assert_eq!(grid.cell_size(), 8);

        grid.set_dimension(64);
        assert_eq!(grid.dimension(), 8);
        assert_eq!(grid.cell_size(), 1);
    }

    #[test]
    fn cells_iterate_in_scan_order() {
        let grid = GridModel::new(10, 2);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![(0, 0, 0, 0), (0, 1, 5, 0), (1, 0, 0, 5), (1, 1, 5, 5)]
        );
    }
}
