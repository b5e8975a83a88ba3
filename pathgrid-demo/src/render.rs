//! Drawing a [`Maze`] into a character screen, and the plain text form used
//! by the headless commands.

use std::fmt::Write as _;

use pathgrid_core::{Point, Range, Terrain};

use crate::session::Maze;

/// 24-bit colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// -- Terrain --

pub const EMPTY: Rgb = Rgb::new(240, 240, 240);
pub const WALL: Rgb = Rgb::new(0, 0, 0);
pub const MUD: Rgb = Rgb::new(139, 101, 8);
pub const SAND: Rgb = Rgb::new(210, 180, 140);
pub const WATER: Rgb = Rgb::new(70, 130, 180);

// -- Search overlay --

pub const START: Rgb = Rgb::new(0, 200, 0);
pub const GOAL: Rgb = Rgb::new(220, 0, 0);
pub const EXPANDED: Rgb = Rgb::new(255, 235, 59);
pub const FRONTIER: Rgb = Rgb::new(160, 210, 255);
pub const PATH: Rgb = Rgb::new(30, 60, 255);

// -- Footer --

pub const FOOTER_BG: Rgb = Rgb::new(40, 40, 40);
pub const TEXT: Rgb = Rgb::new(255, 255, 255);
pub const TEXT_DIM: Rgb = Rgb::new(170, 170, 170);

/// Screen columns used by one grid cell, so cells look roughly square.
pub const CELL_WIDTH: i32 = 2;

/// What a grid cell shows once the search overlay is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Terrain(Terrain),
    Expanded,
    Frontier,
    Path,
    Start,
    Goal,
}

impl Shade {
    pub fn color(self) -> Rgb {
        match self {
            Shade::Terrain(t) => terrain_color(t),
            Shade::Expanded => EXPANDED,
            Shade::Frontier => FRONTIER,
            Shade::Path => PATH,
            Shade::Start => START,
            Shade::Goal => GOAL,
        }
    }

    /// Character for the plain text form.
    pub fn glyph(self) -> char {
        match self {
            Shade::Terrain(t) => t.glyph(),
            Shade::Expanded => 'o',
            Shade::Frontier => '+',
            Shade::Path => '*',
            Shade::Start => pathgrid_core::map::START_GLYPH,
            Shade::Goal => pathgrid_core::map::GOAL_GLYPH,
        }
    }
}

pub fn terrain_color(t: Terrain) -> Rgb {
    match t {
        Terrain::Empty => EMPTY,
        Terrain::Wall => WALL,
        Terrain::Mud => MUD,
        Terrain::Sand => SAND,
        Terrain::Water => WATER,
    }
}

/// Row-major shades of every cell of the maze.
///
/// Later layers win: terrain, expanded, frontier, path, start, goal.
pub fn shades(maze: &Maze) -> Vec<Shade> {
    let map = maze.map();
    let width = map.width().max(0) as usize;
    let bounds = map.bounds();
    let mut out: Vec<Shade> = map.iter().map(|(_, t)| Shade::Terrain(t)).collect();
    let mut put = |p: Point, shade: Shade| {
        if bounds.contains(p) {
            out[p.y as usize * width + p.x as usize] = shade;
        }
    };
    if let Some(search) = maze.search() {
        for &p in search.expanded() {
            put(p, Shade::Expanded);
        }
        for p in search.frontier() {
            put(p, Shade::Frontier);
        }
        if let Some(path) = search.path() {
            for &p in path.cells() {
                put(p, Shade::Path);
            }
        }
    }
    if let Some(p) = maze.start() {
        put(p, Shade::Start);
    }
    if let Some(p) = maze.goal() {
        put(p, Shade::Goal);
    }
    out
}

/// Plain text picture of the maze with the search overlay, one line per row.
pub fn to_text(maze: &Maze) -> String {
    let width = maze.map().width().max(1) as usize;
    let mut s = String::new();
    for (i, row) in shades(maze).chunks(width).enumerate() {
        if i > 0 {
            s.push('\n');
        }
        s.extend(row.iter().map(|shade| shade.glyph()));
    }
    s
}

/// Glyph legend printed under headless output.
pub fn legend() -> String {
    let mut s = String::new();
    for t in Terrain::ALL {
        let cost = t.cost().map_or_else(|| "-".to_string(), |c| c.to_string());
        let _ = write!(s, "{} {} ({cost})  ", t.glyph(), t.name());
    }
    let _ = write!(
        s,
        "\n{} start  {} goal  {} path  {} expanded  {} frontier",
        Shade::Start.glyph(),
        Shade::Goal.glyph(),
        Shade::Path.glyph(),
        Shade::Expanded.glyph(),
        Shade::Frontier.glyph()
    );
    s
}

// ---------------------------------------------------------------------------
// Screen buffer
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenCell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for ScreenCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: TEXT,
            bg: WALL,
        }
    }
}

/// A changed cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub pos: Point,
    pub cell: ScreenCell,
}

/// Character screen drawn once per frame and diffed against the previous
/// one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    rng: Range,
    cells: Vec<ScreenCell>,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        let rng = Range::with_size(width.max(0), height.max(0));
        Self {
            rng,
            cells: vec![ScreenCell::default(); rng.len()],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.rng
    }

    pub fn clear(&mut self) {
        self.cells.fill(ScreenCell::default());
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.rng
            .contains(p)
            .then(|| (p.y * self.rng.width() + p.x) as usize)
    }

    pub fn at(&self, p: Point) -> Option<ScreenCell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set a cell; positions off screen are clipped.
    pub fn set(&mut self, p: Point, cell: ScreenCell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Write `text` starting at `p`, clipped at the right edge.
    pub fn text(&mut self, p: Point, text: &str, fg: Rgb, bg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            self.set(p.shift(i as i32, 0), ScreenCell { ch, fg, bg });
        }
    }

    /// Fill row `y` with `bg`.
    pub fn fill_row(&mut self, y: i32, bg: Rgb) {
        for x in 0..self.rng.width() {
            self.set(Point::new(x, y), ScreenCell { ch: ' ', fg: TEXT, bg });
        }
    }

    /// Cells that differ from `prev`. Every cell is reported when the sizes
    /// differ.
    pub fn diff(&self, prev: &Screen) -> Vec<FrameCell> {
        let resized = prev.rng != self.rng;
        self.rng
            .iter()
            .zip(self.cells.iter())
            .enumerate()
            .filter(|&(i, (_, c))| resized || prev.cells[i] != *c)
            .map(|(_, (pos, &cell))| FrameCell { pos, cell })
            .collect()
    }
}

/// Draw the maze with its top-left corner at `origin`.
pub fn draw_maze(screen: &mut Screen, maze: &Maze, origin: Point) {
    let map = maze.map();
    for (p, shade) in map.bounds().iter().zip(shades(maze)) {
        let bg = shade.color();
        let cell = ScreenCell { ch: ' ', fg: TEXT, bg };
        let x = origin.x + p.x * CELL_WIDTH;
        for dx in 0..CELL_WIDTH {
            screen.set(Point::new(x + dx, origin.y + p.y), cell);
        }
    }
}

/// Grid cell under screen position `pos`, for a maze drawn at `origin`.
pub fn cell_at(maze: &Maze, origin: Point, pos: Point) -> Option<Point> {
    let rel = pos - origin;
    if rel.x < 0 || rel.y < 0 {
        return None;
    }
    let p = Point::new(rel.x / CELL_WIDTH, rel.y);
    maze.map().contains(p).then_some(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_search::Strategy;

    fn maze(text: &str) -> Maze {
        Maze::from_layout(text.parse().unwrap())
    }

    #[test]
    fn text_without_search_shows_terrain_and_endpoints() {
        let m = maze("S.#\n~%G");
        assert_eq!(to_text(&m), "S.#\n~%G");
    }

    #[test]
    fn solved_path_is_drawn_over_expanded_cells() {
        let mut m = maze("S...\n.##.\n...G");
        m.set_strategy(Strategy::BestFirst);
        let outcome = m.solve().unwrap();
        let path = outcome.path().unwrap();
        let text = to_text(&m);
        let rows: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        for &p in &path.cells()[1..path.len() - 1] {
            assert_eq!(rows[p.y as usize][p.x as usize], '*');
        }
        assert_eq!(rows[0][0], 'S');
        assert_eq!(rows[2][3], 'G');
        assert_eq!(rows[1][1], '#');
    }

    #[test]
    fn overlay_order() {
        let mut m = maze("S..\n...\n..G");
        m.start_search().unwrap();
        m.tick(1);
        let s = shades(&m);
        // Start stays on top of its own expansion.
        assert_eq!(s[0], Shade::Start);
        // Below and right of the start are waiting in the frontier.
        assert_eq!(s[3], Shade::Frontier);
        assert_eq!(s[1], Shade::Frontier);
        assert_eq!(s[4], Shade::Terrain(Terrain::Empty));
        assert_eq!(s[8], Shade::Goal);
        assert_eq!(Shade::Frontier.color(), FRONTIER);
    }

    #[test]
    fn screen_diff_reports_changes_only() {
        let prev = Screen::new(4, 2);
        let mut curr = prev.clone();
        assert!(curr.diff(&prev).is_empty());

        curr.text(Point::new(1, 1), "hi", TEXT, FOOTER_BG);
        let d = curr.diff(&prev);
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].pos, Point::new(1, 1));
        assert_eq!(d[1].cell.ch, 'i');

        // Clipped at the edge.
        curr.text(Point::new(3, 0), "xyz", TEXT, FOOTER_BG);
        assert_eq!(curr.at(Point::new(3, 0)).unwrap().ch, 'x');
        assert_eq!(curr.diff(&prev).len(), 3);

        assert_eq!(curr.diff(&Screen::new(3, 3)).len(), 8);
    }

    #[test]
    fn cells_are_two_columns_wide() {
        let m = maze("S.\n.G");
        let origin = Point::ZERO;
        let mut screen = Screen::new(4, 2);
        draw_maze(&mut screen, &m, origin);
        assert_eq!(screen.at(Point::new(0, 0)).unwrap().bg, START);
        assert_eq!(screen.at(Point::new(1, 0)).unwrap().bg, START);
        assert_eq!(screen.at(Point::new(2, 0)).unwrap().bg, EMPTY);
        assert_eq!(screen.at(Point::new(3, 1)).unwrap().bg, GOAL);

        assert_eq!(cell_at(&m, origin, Point::new(3, 1)), Some(Point::new(1, 1)));
        assert_eq!(cell_at(&m, origin, Point::new(4, 0)), None);
    }

    #[test]
    fn legend_lists_costs() {
        let l = legend();
        assert!(l.contains("# wall (-)"));
        assert!(l.contains("~ water (8)"));
    }
}
