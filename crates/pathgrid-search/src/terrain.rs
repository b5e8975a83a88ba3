//! [`AstarPather`] implementation for [`TerrainMap`].

use pathgrid_core::{Point, Range, TerrainMap};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

impl Pather for TerrainMap {
    fn bounds(&self) -> Range {
        TerrainMap::bounds(self)
    }

    fn passable(&self, p: Point) -> bool {
        self.is_passable(p)
    }

    /// Orthogonal neighbours in the order up, down, left, right.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }
}

impl WeightedPather for TerrainMap {
    /// The cost of an edge is the cost of the terrain being entered.
    fn cost(&self, _from: Point, to: Point) -> i32 {
        TerrainMap::cost(self, to).unwrap_or(i32::MAX)
    }
}

impl AstarPather for TerrainMap {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let map: TerrainMap = "\
.#.
...
.~."
        .parse()
        .unwrap();
        let mut buf = Vec::new();
        map.neighbors(Point::new(1, 1), &mut buf);
        // up is a wall
        assert_eq!(
            buf,
            vec![Point::new(1, 2), Point::new(0, 1), Point::new(2, 1)]
        );
        buf.clear();
        map.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1)]);
    }

    #[test]
    fn cost_is_entered_terrain() {
        let map: TerrainMap = ".~%".parse().unwrap();
        let cost = |a, b| WeightedPather::cost(&map, a, b);
        assert_eq!(cost(Point::new(0, 0), Point::new(1, 0)), 8);
        assert_eq!(cost(Point::new(1, 0), Point::new(2, 0)), 3);
        assert_eq!(cost(Point::new(1, 0), Point::new(0, 0)), 1);
        assert_eq!(map.estimate(Point::new(0, 0), Point::new(2, 0)), 2);
    }
}
