use pathgrid_core::{Point, Range};

use crate::error::{Endpoint, EndpointFault, SearchError};
use crate::frontier::{Frontier, UNREACHABLE};
use crate::path::Path;
use crate::strategy::Strategy;
use crate::traits::{AstarPather, Pather, WeightedPather};

// ---------------------------------------------------------------------------
// Step outcomes
// ---------------------------------------------------------------------------

/// One expansion: the cell popped from the frontier and the cells this
/// expansion added to the frontier.
///
/// For best-first searches `discovered` also lists cells that were already
/// known but got a strictly cheaper route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub cell: Point,
    pub discovered: Vec<Point>,
}

/// Result of a single [`SearchState::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was expanded; the search goes on.
    Expanded(Expansion),
    /// The goal was popped. Terminal.
    PathFound(Path),
    /// The frontier ran dry without reaching the goal. Terminal.
    NoPathFound,
}

impl StepOutcome {
    /// Whether no further steps will change the search.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepOutcome::Expanded(_))
    }

    /// The path, for [`StepOutcome::PathFound`].
    pub fn path(&self) -> Option<&Path> {
        match self {
            StepOutcome::PathFound(path) => Some(path),
            _ => None,
        }
    }
}

/// Coarse progress of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    PathFound,
    NoPathFound,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Predecessor record of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Undiscovered,
    Root,
    Via(usize),
}

#[derive(Clone, Debug)]
enum Finish {
    Found(Path),
    Exhausted,
}

/// State of one search run, advanced one expansion at a time.
///
/// A state is created with [`SearchState::new`], which validates the
/// endpoints, and then driven with [`step`](SearchState::step) until a
/// terminal [`StepOutcome`]. The pather passed to `step` must describe the
/// same grid as the one given to `new`: after editing the grid, call
/// [`restart`](SearchState::restart) or build a new state.
#[derive(Clone, Debug)]
pub struct SearchState {
    rng: Range,
    width: usize,
    start: Point,
    goal: Point,
    strategy: Strategy,
    frontier: Frontier,
    came_from: Vec<Link>,
    expanded: Vec<bool>,
    order: Vec<Point>,
    finish: Option<Finish>,
    steps: usize,
    // scratch buffer for neighbour queries
    nbuf: Vec<Point>,
}

impl SearchState {
    /// Start a search from `start` to `goal` over `pather`.
    ///
    /// Fails with [`SearchError::InvalidEndpoints`] if either endpoint is out
    /// of bounds or impassable; no steps can be taken in that case.
    pub fn new<P: AstarPather>(
        pather: &P,
        start: Point,
        goal: Point,
        strategy: Strategy,
    ) -> Result<Self, SearchError> {
        let rng = pather.bounds();
        check_endpoint(pather, rng, Endpoint::Start, start)?;
        check_endpoint(pather, rng, Endpoint::Goal, goal)?;

        let len = rng.len();
        let mut state = Self {
            rng,
            width: rng.width().max(0) as usize,
            start,
            goal,
            strategy,
            frontier: Frontier::new(strategy, len),
            came_from: vec![Link::Undiscovered; len],
            expanded: vec![false; len],
            order: Vec::new(),
            finish: None,
            steps: 0,
            nbuf: Vec::with_capacity(4),
        };
        state.seed(pather);
        log::debug!("{strategy} search from {start} to {goal} on {rng}");
        Ok(state)
    }

    /// Throw away all progress and start over with the same endpoints and
    /// strategy, possibly on an edited grid.
    pub fn restart<P: AstarPather>(&mut self, pather: &P) -> Result<(), SearchError> {
        *self = Self::new(pather, self.start, self.goal, self.strategy)?;
        Ok(())
    }

    fn seed<P: AstarPather>(&mut self, pather: &P) {
        let Some(si) = self.idx(self.start) else {
            return;
        };
        self.came_from[si] = Link::Root;
        match &mut self.frontier {
            Frontier::Cheapest(c) => {
                c.relax(si, 0, pather.estimate(self.start, self.goal));
            }
            f => f.push(si),
        }
    }

    /// Perform exactly one expansion.
    ///
    /// Once a terminal outcome has been returned, every further call returns
    /// it again and leaves the state untouched.
    pub fn step<P: AstarPather>(&mut self, pather: &P) -> StepOutcome {
        match &self.finish {
            Some(Finish::Found(path)) => return StepOutcome::PathFound(path.clone()),
            Some(Finish::Exhausted) => return StepOutcome::NoPathFound,
            None => {}
        }

        let Some(ci) = self.frontier.pop(&self.expanded) else {
            log::debug!(
                "{} search: no path from {} to {} ({} expanded)",
                self.strategy,
                self.start,
                self.goal,
                self.order.len()
            );
            self.finish = Some(Finish::Exhausted);
            return StepOutcome::NoPathFound;
        };
        self.steps += 1;
        let cp = self.point(ci);

        if cp == self.goal {
            let path = self.reconstruct(pather, ci);
            log::debug!(
                "{} search: found {path} after {} steps",
                self.strategy,
                self.steps
            );
            self.finish = Some(Finish::Found(path.clone()));
            return StepOutcome::PathFound(path);
        }

        let current_cost = self.frontier.costs().map_or(0, |c| c.best_cost(ci));
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        let mut discovered = Vec::new();
        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            match &mut self.frontier {
                Frontier::Cheapest(c) => {
                    let tentative = current_cost.saturating_add(pather.cost(cp, np));
                    if c.relax(ni, tentative, pather.estimate(np, self.goal)) {
                        self.came_from[ni] = Link::Via(ci);
                        discovered.push(np);
                    }
                }
                f => {
                    if self.came_from[ni] == Link::Undiscovered {
                        self.came_from[ni] = Link::Via(ci);
                        f.push(ni);
                        discovered.push(np);
                    }
                }
            }
        }
        self.nbuf = nbuf;

        self.expanded[ci] = true;
        self.order.push(cp);
        log::trace!("expanded {cp}, discovered {}", discovered.len());
        StepOutcome::Expanded(Expansion {
            cell: cp,
            discovered,
        })
    }

    /// Step until a terminal outcome and return it.
    pub fn run<P: AstarPather>(&mut self, pather: &P) -> StepOutcome {
        loop {
            let outcome = self.step(pather);
            if outcome.is_terminal() {
                return outcome;
            }
        }
    }

    /// Lazy sequence of step outcomes, ending with (and including) the
    /// terminal one.
    pub fn steps<'a, P: AstarPather>(&'a mut self, pather: &'a P) -> Steps<'a, P> {
        Steps {
            state: self,
            pather,
            done: false,
        }
    }

    fn reconstruct<P: WeightedPather>(&self, pather: &P, goal_idx: usize) -> Path {
        let mut cells = Vec::new();
        let mut ci = goal_idx;
        loop {
            cells.push(self.point(ci));
            match self.came_from[ci] {
                Link::Via(pi) => ci = pi,
                Link::Root | Link::Undiscovered => break,
            }
        }
        cells.reverse();
        let cost = cells
            .windows(2)
            .map(|w| pather.cost(w[0], w[1]))
            .fold(0i32, i32::saturating_add);
        Path::new(cells, cost)
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Grid rectangle the search was started on.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.rng
    }

    pub fn status(&self) -> Status {
        match self.finish {
            None => Status::Running,
            Some(Finish::Found(_)) => Status::PathFound,
            Some(Finish::Exhausted) => Status::NoPathFound,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finish.is_some()
    }

    /// The path, once found.
    pub fn path(&self) -> Option<&Path> {
        match &self.finish {
            Some(Finish::Found(path)) => Some(path),
            _ => None,
        }
    }

    /// Number of cells popped so far, the goal included.
    #[inline]
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Expanded cells in expansion order.
    #[inline]
    pub fn expanded(&self) -> &[Point] {
        &self.order
    }

    pub fn is_expanded(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.expanded[i])
    }

    /// Cells waiting in the frontier, in row-major order, without duplicates.
    pub fn frontier(&self) -> Vec<Point> {
        let mut cells: Vec<Point> = self
            .frontier
            .indices()
            .filter(|&i| !self.expanded[i])
            .map(|i| self.point(i))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// Whether `p` has been reached (it has a predecessor or is the start).
    pub fn is_discovered(&self, p: Point) -> bool {
        self.idx(p)
            .is_some_and(|i| self.came_from[i] != Link::Undiscovered)
    }

    /// The cell `p` was reached from. `None` for the start and for
    /// undiscovered cells.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        match self.came_from[self.idx(p)?] {
            Link::Via(i) => Some(self.point(i)),
            Link::Root | Link::Undiscovered => None,
        }
    }

    /// Lowest known cost to reach `p`. Best-first searches only.
    pub fn best_cost(&self, p: Point) -> Option<i32> {
        let c = self.frontier.costs()?.best_cost(self.idx(p)?);
        (c != UNREACHABLE).then_some(c)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

fn check_endpoint<P: Pather>(
    pather: &P,
    rng: Range,
    endpoint: Endpoint,
    pos: Point,
) -> Result<(), SearchError> {
    let fault = if !rng.contains(pos) {
        EndpointFault::OutOfBounds
    } else if !pather.passable(pos) {
        EndpointFault::Impassable
    } else {
        return Ok(());
    };
    Err(SearchError::InvalidEndpoints {
        endpoint,
        pos,
        fault,
    })
}

// ---------------------------------------------------------------------------
// Steps iterator / one-shot helper
// ---------------------------------------------------------------------------

/// Iterator returned by [`SearchState::steps`].
pub struct Steps<'a, P> {
    state: &'a mut SearchState,
    pather: &'a P,
    done: bool,
}

impl<P: AstarPather> Iterator for Steps<'_, P> {
    type Item = StepOutcome;

    fn next(&mut self) -> Option<StepOutcome> {
        if self.done {
            return None;
        }
        let outcome = self.state.step(self.pather);
        self.done = outcome.is_terminal();
        Some(outcome)
    }
}

/// Run a whole search and return the path, if any.
pub fn find_path<P: AstarPather>(
    pather: &P,
    start: Point,
    goal: Point,
    strategy: Strategy,
) -> Result<Option<Path>, SearchError> {
    let mut state = SearchState::new(pather, start, goal, strategy)?;
    Ok(match state.run(pather) {
        StepOutcome::PathFound(path) => Some(path),
        _ => None,
    })
}
