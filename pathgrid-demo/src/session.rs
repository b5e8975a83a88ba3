//! The editable maze: terrain, endpoints and the search running on them.

use std::fmt;

use pathgrid_core::{Layout, MapGen, Point, Terrain, TerrainMap, TerrainMix};
use pathgrid_search::{Endpoint, SearchError, SearchState, StepOutcome, Strategy};
use rand::Rng;

/// A maze being edited and searched.
///
/// Any edit drops the current search, so a paused animation never steps
/// over a grid that changed under it.
#[derive(Debug, Clone)]
pub struct Maze {
    map: TerrainMap,
    start: Option<Point>,
    goal: Option<Point>,
    strategy: Strategy,
    search: Option<SearchState>,
    animating: bool,
}

impl Maze {
    /// An empty `rows` x `cols` maze without endpoints.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self::from_layout(Layout {
            map: TerrainMap::new(cols, rows),
            start: None,
            goal: None,
        })
    }

    pub fn from_layout(layout: Layout) -> Self {
        Self {
            map: layout.map,
            start: layout.start,
            goal: layout.goal,
            strategy: Strategy::default(),
            search: None,
            animating: false,
        }
    }

    /// Snapshot of the terrain and endpoints.
    pub fn layout(&self) -> Layout {
        Layout {
            map: self.map.clone(),
            start: self.start,
            goal: self.goal,
        }
    }

    #[inline]
    pub fn map(&self) -> &TerrainMap {
        &self.map
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The current search, if one was started since the last edit.
    #[inline]
    pub fn search(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    /// Whether [`tick`](Maze::tick) will advance the search.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    fn invalidate(&mut self) {
        if self.search.take().is_some() {
            log::debug!("maze edited, search discarded");
        }
        self.animating = false;
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Paint `terrain` at `p`. Out-of-bounds cells are ignored.
    pub fn paint(&mut self, p: Point, terrain: Terrain) -> bool {
        if !self.map.contains(p) {
            return false;
        }
        self.map.set(p, terrain);
        self.invalidate();
        true
    }

    /// Reset `p` to empty ground.
    pub fn erase(&mut self, p: Point) -> bool {
        self.paint(p, Terrain::Empty)
    }

    pub fn set_start(&mut self, p: Point) -> bool {
        if !self.map.contains(p) {
            return false;
        }
        self.start = Some(p);
        self.invalidate();
        true
    }

    pub fn set_goal(&mut self, p: Point) -> bool {
        if !self.map.contains(p) {
            return false;
        }
        self.goal = Some(p);
        self.invalidate();
        true
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        self.invalidate();
    }

    /// Regenerate every cell from `mix`. Endpoints are kept.
    pub fn randomize<R: Rng>(&mut self, mix: &TerrainMix, rng: R) {
        let map = std::mem::replace(&mut self.map, TerrainMap::new(0, 0));
        let mut mg = MapGen::with_map(map, rng);
        mg.terrain_mix(mix);
        self.map = mg.into_map();
        self.invalidate();
    }

    /// Sprinkle walls with probability `density` over the current terrain.
    pub fn scatter_walls<R: Rng>(&mut self, density: f64, rng: R) {
        let map = std::mem::replace(&mut self.map, TerrainMap::new(0, 0));
        let mut mg = MapGen::with_map(map, rng);
        mg.scatter_walls(density);
        self.map = mg.into_map();
        self.invalidate();
    }

    /// Empty the grid and forget the endpoints.
    pub fn clear_all(&mut self) {
        self.map.fill(Terrain::Empty);
        self.start = None;
        self.goal = None;
        self.invalidate();
    }

    // -----------------------------------------------------------------------
    // Searching
    // -----------------------------------------------------------------------

    fn new_search(&self) -> Result<SearchState, SessionError> {
        let start = self.start.ok_or(SessionError::MissingEndpoint(Endpoint::Start))?;
        let goal = self.goal.ok_or(SessionError::MissingEndpoint(Endpoint::Goal))?;
        Ok(SearchState::new(&self.map, start, goal, self.strategy)?)
    }

    /// Start a fresh search with the selected strategy and begin animating.
    pub fn start_search(&mut self) -> Result<(), SessionError> {
        self.invalidate();
        self.search = Some(self.new_search()?);
        self.animating = true;
        log::info!("{} search started", self.strategy);
        Ok(())
    }

    /// Advance the animation by up to `steps` steps.
    ///
    /// Stops early, and ends the animation, at a terminal outcome. Returns
    /// the outcomes of the steps taken.
    pub fn tick(&mut self, steps: usize) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        if !self.animating {
            return outcomes;
        }
        let Some(search) = self.search.as_mut() else {
            self.animating = false;
            return outcomes;
        };
        for _ in 0..steps {
            let outcome = search.step(&self.map);
            let done = outcome.is_terminal();
            outcomes.push(outcome);
            if done {
                self.animating = false;
                break;
            }
        }
        outcomes
    }

    /// Start a search and run it to completion, returning the terminal
    /// outcome. The finished search stays available for inspection.
    pub fn solve(&mut self) -> Result<StepOutcome, SessionError> {
        self.invalidate();
        let mut search = self.new_search()?;
        let outcome = search.run(&self.map);
        self.search = Some(search);
        Ok(outcome)
    }
}

/// Errors raised when a search cannot be started from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The start or goal has not been placed yet.
    MissingEndpoint(Endpoint),
    Search(SearchError),
}

impl From<SearchError> for SessionError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint(endpoint) => write!(f, "no {endpoint} placed"),
            Self::Search(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::MissingEndpoint(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_search::{EndpointFault, Status};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn maze(text: &str) -> Maze {
        Maze::from_layout(text.parse().unwrap())
    }

    #[test]
    fn missing_endpoints() {
        let mut m = Maze::new(3, 4);
        assert_eq!(m.map().size(), Point::new(4, 3));
        assert_eq!(
            m.start_search(),
            Err(SessionError::MissingEndpoint(Endpoint::Start))
        );
        m.set_start(Point::new(0, 0));
        assert_eq!(
            m.start_search(),
            Err(SessionError::MissingEndpoint(Endpoint::Goal))
        );
        assert!(!m.is_animating());
        assert!(m.search().is_none());
    }

    #[test]
    fn wall_on_endpoint_is_reported() {
        let mut m = maze("S.#G");
        m.paint(Point::new(3, 0), Terrain::Wall);
        let err = m.start_search().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Search(SearchError::InvalidEndpoints {
                endpoint: Endpoint::Goal,
                fault: EndpointFault::Impassable,
                ..
            })
        ));
        assert!(m.search().is_none());
    }

    #[test]
    fn tick_animates_until_terminal() {
        let mut m = maze("S...\n.##.\n...G");
        m.start_search().unwrap();
        assert!(m.is_animating());
        let mut total = 0;
        while m.is_animating() {
            let outcomes = m.tick(2);
            assert!(!outcomes.is_empty() && outcomes.len() <= 2);
            total += outcomes.len();
        }
        let search = m.search().unwrap();
        assert_eq!(search.status(), Status::PathFound);
        assert_eq!(total, search.steps_taken());
        // Paused: no more steps.
        assert!(m.tick(5).is_empty());
    }

    #[test]
    fn edits_invalidate_the_search() {
        let mut m = maze("S...\n...G");
        m.start_search().unwrap();
        m.tick(1);
        assert!(m.search().is_some());

        assert!(m.paint(Point::new(1, 1), Terrain::Mud));
        assert!(m.search().is_none());
        assert!(!m.is_animating());

        m.start_search().unwrap();
        assert!(!m.paint(Point::new(9, 9), Terrain::Mud));
        assert!(m.search().is_some(), "out-of-bounds edit is ignored");

        m.set_strategy(Strategy::DepthFirst);
        assert!(m.search().is_none());

        m.start_search().unwrap();
        m.randomize(&TerrainMix::default(), StdRng::seed_from_u64(5));
        assert!(m.search().is_none());
        assert_eq!(m.start(), Some(Point::new(0, 0)));
    }

    #[test]
    fn solve_prefers_cheap_terrain_with_best_first() {
        let mut m = maze("S~~G\n....");
        let bfs = m.solve().unwrap();
        assert_eq!(bfs.path().unwrap().cost(), 17);

        m.set_strategy(Strategy::BestFirst);
        let astar = m.solve().unwrap();
        assert_eq!(astar.path().unwrap().cost(), 5);
        assert!(!m.is_animating());
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut m = maze("S#\n#G");
        m.clear_all();
        assert_eq!(m.start(), None);
        assert_eq!(m.goal(), None);
        assert_eq!(m.map().count(Terrain::Empty), 4);
        assert_eq!(m.layout().to_string(), "..\n..");
    }

    #[test]
    fn scatter_walls_adds_walls() {
        let mut m = Maze::new(10, 10);
        m.scatter_walls(0.5, StdRng::seed_from_u64(3));
        assert!(m.map().count(Terrain::Wall) > 0);
    }
}
