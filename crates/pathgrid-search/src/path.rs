use std::fmt;

use pathgrid_core::Point;

/// A path found by a search: the cells from start to goal, both included,
/// and the total cost of entering every cell after the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Point>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>, cost: i32) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells, cost }
    }

    /// Cells in walking order, start first.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Number of cells, including both endpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a path holds at least its start cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (`len() - 1`).
    #[inline]
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Total terrain cost.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn start(&self) -> Point {
        self.cells[0]
    }

    pub fn goal(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {} moves, cost {}",
            self.start(),
            self.goal(),
            self.moves(),
            self.cost
        )
    }
}
