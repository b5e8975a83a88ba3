//! Interactive editor: key and mouse handling, per-frame stepping and the
//! footer.

use std::io;
use std::time::{Duration, Instant};

use pathgrid_core::{Point, Terrain};
use pathgrid_search::{Status, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::DemoConfig;
use crate::render::{self, FOOTER_BG, Screen, TEXT, TEXT_DIM};
use crate::session::Maze;
use crate::term::{Input, Terminal};

/// Lines below the grid used by the footer.
pub const FOOTER_LINES: i32 = 3;

const HELP: &str = "s start  g goal  w wall  1-4 empty/mud/sand/water  e erase  \
                    b/d/a BFS/DFS/A*  space run  r reset  f/F random  q quit";

/// What a mouse press does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Start,
    Goal,
    Terrain,
    Erase,
}

impl Mode {
    fn label(self) -> &'static str {
        match self {
            Mode::Start => "start",
            Mode::Goal => "goal",
            Mode::Terrain => "terrain",
            Mode::Erase => "erase",
        }
    }
}

/// Whether the loop keeps going after an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Editor {
    maze: Maze,
    config: DemoConfig,
    mode: Mode,
    paint: Terrain,
    mouse_down: bool,
    message: Option<String>,
    rng: StdRng,
}

impl Editor {
    pub fn new(mut maze: Maze, config: DemoConfig, seed: u64) -> Self {
        maze.set_strategy(config.strategy);
        Self {
            maze,
            config,
            mode: Mode::Terrain,
            paint: Terrain::Wall,
            mouse_down: false,
            message: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn paint_terrain(&self) -> Terrain {
        self.paint
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn select_terrain(&mut self, terrain: Terrain) {
        self.mode = Mode::Terrain;
        self.paint = terrain;
    }

    fn select_strategy(&mut self, strategy: Strategy) {
        self.maze.set_strategy(strategy);
        self.message = None;
    }

    fn key(&mut self, ch: char) -> Control {
        match ch {
            'q' => return Control::Quit,
            's' => self.mode = Mode::Start,
            'g' => self.mode = Mode::Goal,
            'e' => self.mode = Mode::Erase,
            'w' => self.select_terrain(Terrain::Wall),
            '1' => self.select_terrain(Terrain::Empty),
            '2' => self.select_terrain(Terrain::Mud),
            '3' => self.select_terrain(Terrain::Sand),
            '4' => self.select_terrain(Terrain::Water),
            'b' => self.select_strategy(Strategy::BreadthFirst),
            'd' => self.select_strategy(Strategy::DepthFirst),
            'a' => self.select_strategy(Strategy::BestFirst),
            'r' => {
                self.maze.clear_all();
                self.message = None;
            }
            'f' => {
                self.maze.randomize(&self.config.mix, &mut self.rng);
                self.message = None;
            }
            'F' => {
                self.maze.scatter_walls(self.config.wall_density, &mut self.rng);
                self.message = None;
            }
            ' ' => match self.maze.start_search() {
                Ok(()) => self.message = None,
                Err(e) => {
                    log::info!("cannot start search: {e}");
                    self.message = Some(e.to_string());
                }
            },
            _ => {}
        }
        Control::Continue
    }

    /// Apply the current mode at screen position `pos`.
    fn paint_at(&mut self, pos: Point) {
        if self.maze.is_animating() {
            return;
        }
        let Some(p) = render::cell_at(&self.maze, Point::ZERO, pos) else {
            return;
        };
        match self.mode {
            Mode::Start => {
                self.maze.set_start(p);
            }
            Mode::Goal => {
                self.maze.set_goal(p);
            }
            Mode::Terrain => {
                self.maze.paint(p, self.paint);
            }
            Mode::Erase => {
                self.maze.erase(p);
            }
        }
    }

    pub fn update(&mut self, input: Input) -> Control {
        match input {
            Input::Escape => return Control::Quit,
            Input::Key(ch) => return self.key(ch),
            Input::Press(pos) => {
                self.mouse_down = true;
                self.paint_at(pos);
            }
            Input::Drag(pos) => {
                if self.mouse_down {
                    self.paint_at(pos);
                }
            }
            Input::Release => self.mouse_down = false,
            Input::Resize { .. } => {}
        }
        Control::Continue
    }

    /// Advance the animation by one frame's worth of steps.
    pub fn frame(&mut self) {
        let outcomes = self.maze.tick(self.config.steps_per_frame);
        if let Some(last) = outcomes.last().filter(|o| o.is_terminal()) {
            match last.path() {
                Some(path) => log::info!("{} found {path}", self.maze.strategy()),
                None => log::info!("{} found no path", self.maze.strategy()),
            }
        }
    }

    fn status_line(&self) -> String {
        let Some(search) = self.maze.search() else {
            return "idle".to_string();
        };
        let expanded = search.expanded().len();
        match search.status() {
            Status::Running => format!(
                "searching: {expanded} expanded, {} in frontier",
                search.frontier().len()
            ),
            Status::PathFound => match search.path() {
                Some(path) => format!(
                    "path: {} moves, cost {}, {expanded} expanded",
                    path.moves(),
                    path.cost()
                ),
                None => format!("path found, {expanded} expanded"),
            },
            Status::NoPathFound => format!("no path, {expanded} expanded"),
        }
    }

    pub fn draw(&self, screen: &mut Screen) {
        screen.clear();
        render::draw_maze(screen, &self.maze, Point::ZERO);

        let y = self.maze.map().height();
        for dy in 0..FOOTER_LINES {
            screen.fill_row(y + dy, FOOTER_BG);
        }
        let head = format!(
            " mode: {}  paint: {}  algorithm: {}  {}",
            self.mode.label(),
            self.paint.name(),
            self.maze.strategy().label(),
            self.status_line()
        );
        screen.text(Point::new(0, y), &head, TEXT, FOOTER_BG);
        if let Some(msg) = &self.message {
            screen.text(Point::new(1, y + 1), msg, render::GOAL, FOOTER_BG);
        }
        screen.text(Point::new(1, y + 2), HELP, TEXT_DIM, FOOTER_BG);
    }
}

/// Run the editor until the user quits.
///
/// The terminal is initialised here and restored before returning, also on
/// error.
pub fn run(editor: &mut Editor, term: &mut Terminal) -> io::Result<()> {
    term.init()?;
    let result = event_loop(editor, term);
    term.close();
    result
}

fn event_loop(editor: &mut Editor, term: &mut Terminal) -> io::Result<()> {
    let frame_time = Duration::from_secs(1) / editor.config.fps.max(1);
    let (w, h) = term.size()?;
    let mut prev = Screen::new(w, h);
    let mut curr = Screen::new(w, h);
    // Force a full first paint.
    let mut dirty = true;

    loop {
        let started = Instant::now();
        for input in term.poll(frame_time)? {
            if let Input::Resize { width, height } = input {
                curr = Screen::new(width, height);
                dirty = true;
            }
            if editor.update(input) == Control::Quit {
                return Ok(());
            }
        }
        editor.frame();

        editor.draw(&mut curr);
        let cells = if dirty {
            curr.diff(&Screen::new(0, 0))
        } else {
            curr.diff(&prev)
        };
        term.flush(&cells)?;
        dirty = false;
        prev.clone_from(&curr);

        if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
