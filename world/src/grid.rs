//! Dense cell storage backing the maze.

use maze_raider_core::{Cell, GridPos, OutOfBounds};

/// Rectangular grid of maze cells stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the provided dimensions with every cell set to
    /// `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Cell) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![fill; capacity],
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the position lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x() < self.width && pos.y() < self.height
    }

    /// Cell stored at the provided position.
    ///
    /// Fails with [`OutOfBounds`] when the position lies outside the grid.
    pub fn get(&self, pos: GridPos) -> Result<Cell, OutOfBounds> {
        self.index(pos)
            .and_then(|index| self.cells.get(index).copied())
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Replaces the cell stored at the provided position.
    ///
    /// Fails with [`OutOfBounds`] when the position lies outside the grid.
    pub fn set(&mut self, pos: GridPos, cell: Cell) -> Result<(), OutOfBounds> {
        let index = self.index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        let out_of_bounds = self.out_of_bounds(pos);
        let slot = self.cells.get_mut(index).ok_or(out_of_bounds)?;
        *slot = cell;
        Ok(())
    }

    /// Replaces the cell at a position known to be in bounds; positions
    /// outside the grid are ignored.
    pub(crate) fn put(&mut self, pos: GridPos, cell: Cell) {
        if let Some(index) = self.index(pos) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = cell;
            }
        }
    }

    /// Dense cell contents stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.contains(pos) {
            let x = usize::try_from(pos.x()).ok()?;
            let y = usize::try_from(pos.y()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(y * width + x)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, pos: GridPos) -> OutOfBounds {
        OutOfBounds {
            x: pos.x(),
            y: pos.y(),
            width: self.width,
            height: self.height,
        }
    }
}
