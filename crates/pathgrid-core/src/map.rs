//! The [`TerrainMap`] grid and its text form, [`Layout`].
//!
//! A layout is plain text with one line per row and one glyph per cell:
//!
//! ```text
//! S..#....
//! .%.#.~~.
//! .:.....G
//! ```
//!
//! Terrain glyphs are listed in [`Terrain::glyph`]; `S` and `G` mark the
//! start and goal cells and stand on empty ground.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};
use crate::terrain::Terrain;

/// Layout glyph for the start cell.
pub const START_GLYPH: char = 'S';
/// Layout glyph for the goal cell.
pub const GOAL_GLYPH: char = 'G';

// ---------------------------------------------------------------------------
// TerrainMap
// ---------------------------------------------------------------------------

/// A fixed-size 2D grid of [`Terrain`] cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainMap {
    cells: Vec<Terrain>,
    bounds: Range,
}

impl TerrainMap {
    /// Create a `width` x `height` map of empty ground.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(width, height);
        Self {
            cells: vec![Terrain::Empty; bounds.len()],
            bounds,
        }
    }

    /// The bounding range, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size as a `Point` (width = columns, height = rows).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// Terrain at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Terrain> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Cost of entering `p`, or `None` if `p` is out of bounds or impassable.
    #[inline]
    pub fn cost(&self, p: Point) -> Option<i32> {
        self.at(p).and_then(Terrain::cost)
    }

    /// Whether `p` is in bounds and passable.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cost(p).is_some()
    }

    /// Set the terrain at `p`. Returns `false` (and does nothing) if `p` is
    /// out of bounds.
    pub fn set(&mut self, p: Point, terrain: Terrain) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = terrain;
                true
            }
            None => false,
        }
    }

    /// Fill the whole map with `terrain`.
    pub fn fill(&mut self, terrain: Terrain) {
        self.cells.fill(terrain);
    }

    /// Fill the map using a function of each position.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> Terrain) {
        for (p, cell) in self.bounds.iter().zip(self.cells.iter_mut()) {
            *cell = f(p);
        }
    }

    /// Count how many cells hold `terrain`.
    pub fn count(&self, terrain: Terrain) -> usize {
        self.cells.iter().filter(|&&t| t == terrain).count()
    }

    /// Row-major iterator over `(Point, Terrain)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Point, Terrain)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl fmt::Display for TerrainMap {
    /// Writes the map in layout form, without start/goal markers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width().max(1) as usize;
        for (i, row) in self.cells.chunks(w).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for t in row {
                write!(f, "{}", t.glyph())?;
            }
        }
        Ok(())
    }
}

impl FromStr for TerrainMap {
    type Err = MapError;

    /// Parse a layout, discarding the start and goal markers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Layout>()?.map)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// A [`TerrainMap`] together with optional start and goal cells, as read
/// from (or written to) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub map: TerrainMap,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl Layout {
    /// Parse a text layout.
    ///
    /// Blank lines before the first and after the last row are ignored and
    /// trailing `\r` is stripped. Every row must have the same number of
    /// glyphs.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = s
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let len = rows
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        let rows = &rows[..len];
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let width = rows[0].chars().count();
        let mut map = TerrainMap::new(width as i32, rows.len() as i32);
        let mut start = None;
        let mut goal = None;

        for (y, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::InconsistentWidth {
                    row: y as i32,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let terrain = match ch {
                    START_GLYPH => {
                        if start.replace(p).is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos: p });
                        }
                        Terrain::Empty
                    }
                    GOAL_GLYPH => {
                        if goal.replace(p).is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos: p });
                        }
                        Terrain::Empty
                    }
                    _ => Terrain::from_glyph(ch).ok_or(MapError::InvalidGlyph { ch, pos: p })?,
                };
                map.set(p, terrain);
            }
        }

        Ok(Self { map, start, goal })
    }
}

impl FromStr for Layout {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::parse(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.map.height() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..self.map.width() {
                let p = Point::new(x, y);
                let ch = if Some(p) == self.start {
                    START_GLYPH
                } else if Some(p) == self.goal {
                    GOAL_GLYPH
                } else {
                    self.map.at(p).unwrap_or_default().glyph()
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MapError
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing a text layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The text holds no rows.
    Empty,
    /// A row is wider or narrower than the first one.
    InconsistentWidth {
        row: i32,
        expected: usize,
        found: usize,
    },
    /// A character that is neither a terrain glyph nor a marker.
    InvalidGlyph { ch: char, pos: Point },
    /// A second `S` or `G` marker.
    DuplicateMarker { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("map: layout is empty"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "map: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "map: invalid glyph {ch:?} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "map: duplicate {ch:?} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S..#
.%.#
.:~G";

    #[test]
    fn new_map_is_empty_ground() {
        let m = TerrainMap::new(4, 3);
        assert_eq!(m.size(), Point::new(4, 3));
        assert_eq!(m.count(Terrain::Empty), 12);
        assert_eq!(m.at(Point::new(3, 2)), Some(Terrain::Empty));
        assert_eq!(m.at(Point::new(4, 0)), None);
        assert_eq!(m.at(Point::new(0, -1)), None);
    }

    #[test]
    fn set_and_cost() {
        let mut m = TerrainMap::new(3, 3);
        assert!(m.set(Point::new(1, 1), Terrain::Water));
        assert!(!m.set(Point::new(3, 1), Terrain::Water));
        assert_eq!(m.cost(Point::new(1, 1)), Some(8));
        m.set(Point::new(0, 0), Terrain::Wall);
        assert_eq!(m.cost(Point::new(0, 0)), None);
        assert!(!m.is_passable(Point::new(0, 0)));
        assert!(!m.is_passable(Point::new(-1, 0)));
        assert!(m.is_passable(Point::new(2, 2)));
    }

    #[test]
    fn fill_fn_is_row_major() {
        let mut m = TerrainMap::new(3, 2);
        m.fill_fn(|p| if p.y == 1 { Terrain::Sand } else { Terrain::Empty });
        assert_eq!(m.to_string(), "...\n:::");
        m.fill(Terrain::Mud);
        assert_eq!(m.count(Terrain::Mud), 6);
    }

    #[test]
    fn parse_layout() {
        let l = Layout::parse(ROOM).unwrap();
        assert_eq!(l.map.size(), Point::new(4, 3));
        assert_eq!(l.start, Some(Point::new(0, 0)));
        assert_eq!(l.goal, Some(Point::new(3, 2)));
        assert_eq!(l.map.at(Point::new(3, 0)), Some(Terrain::Wall));
        assert_eq!(l.map.at(Point::new(1, 1)), Some(Terrain::Mud));
        assert_eq!(l.map.at(Point::new(1, 2)), Some(Terrain::Sand));
        assert_eq!(l.map.at(Point::new(2, 2)), Some(Terrain::Water));
        // Markers stand on empty ground.
        assert_eq!(l.map.at(Point::new(3, 2)), Some(Terrain::Empty));
        assert_eq!(l.to_string(), ROOM);
    }

    #[test]
    fn parse_ignores_surrounding_blank_lines() {
        let m: TerrainMap = "\n\n..#\r\n#..\n\n".parse().unwrap();
        assert_eq!(m.size(), Point::new(3, 2));
        assert_eq!(m.to_string(), "..#\n#..");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Layout::parse("  \n"), Err(MapError::Empty));
        assert_eq!(
            Layout::parse("...\n..\n"),
            Err(MapError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Layout::parse("..\n.x"),
            Err(MapError::InvalidGlyph {
                ch: 'x',
                pos: Point::new(1, 1)
            })
        );
        assert_eq!(
            Layout::parse("S.S"),
            Err(MapError::DuplicateMarker {
                ch: 'S',
                pos: Point::new(2, 0)
            })
        );
    }

    #[test]
    fn error_messages_use_row_col() {
        let err = Layout::parse("..\n.x").unwrap_err();
        assert_eq!(err.to_string(), "map: invalid glyph 'x' at (1, 1)");
        let err = Layout::parse("G..\n.G.").unwrap_err();
        assert_eq!(err.to_string(), "map: duplicate 'G' marker at (1, 1)");
    }
}
