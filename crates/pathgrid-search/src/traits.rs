use pathgrid_core::{Point, Range};

/// Minimal search interface: bounds, passability and neighbour enumeration.
pub trait Pather {
    /// Rectangle of valid cells. Searches size their bookkeeping from it.
    fn bounds(&self) -> Range;

    /// Whether `p` may be entered. Must be `false` outside [`bounds`](Pather::bounds).
    fn passable(&self, p: Point) -> bool;

    /// Append the enterable neighbours of `p` into `buf`, in the order they
    /// should be examined. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 1.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Weighted pather with a heuristic, as needed by best-first search.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}
