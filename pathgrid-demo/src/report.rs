//! Headless runs: one summary line per strategy.

use std::fmt;

use pathgrid_core::{Layout, Point, Terrain};
use pathgrid_search::{StepOutcome, Strategy};

use crate::session::{Maze, SessionError};

/// Statistics of one finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub strategy: Strategy,
    pub steps: usize,
    pub expanded: usize,
    /// Cells and cost of the path, when one was found.
    pub path: Option<(usize, i32)>,
}

/// Header matching the [`Summary`] `Display` columns.
pub const TABLE_HEADER: &str = "strategy  steps  expanded  cells  cost";

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8}  {:>5}  {:>8}  ",
            self.strategy.label(),
            self.steps,
            self.expanded
        )?;
        match self.path {
            Some((cells, cost)) => write!(f, "{cells:>5}  {cost:>4}"),
            None => write!(f, "{:>5}  {:>4}", "-", "no path"),
        }
    }
}

/// Run the maze's current strategy to completion and summarize it.
pub fn summarize(maze: &mut Maze) -> Result<Summary, SessionError> {
    let outcome = maze.solve()?;
    let (steps, expanded) = maze
        .search()
        .map_or((0, 0), |s| (s.steps_taken(), s.expanded().len()));
    let path = match &outcome {
        StepOutcome::PathFound(path) => Some((path.len(), path.cost())),
        _ => None,
    };
    Ok(Summary {
        strategy: maze.strategy(),
        steps,
        expanded,
        path,
    })
}

/// Run every strategy on the same layout.
pub fn compare(layout: &Layout) -> Result<Vec<Summary>, SessionError> {
    Strategy::ALL
        .iter()
        .map(|&strategy| {
            let mut maze = Maze::from_layout(layout.clone());
            maze.set_strategy(strategy);
            summarize(&mut maze)
        })
        .collect()
}

/// Place the endpoints of a generated map, clearing whatever terrain was
/// drawn under them. Missing endpoints default to opposite corners.
pub fn place_endpoints(maze: &mut Maze, start: Option<Point>, goal: Option<Point>) {
    let size = maze.map().size();
    let start = start.or(maze.start()).unwrap_or(Point::ZERO);
    let goal = goal
        .or(maze.goal())
        .unwrap_or(Point::new(size.x - 1, size.y - 1));
    for p in [start, goal] {
        if maze.map().at(p).is_some_and(|t| !t.is_passable()) {
            maze.paint(p, Terrain::Empty);
        }
    }
    maze.set_start(start);
    maze.set_goal(goal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn compare_on_open_grid() {
        let layout = Layout::parse("S....\n.....\n.....\n.....\n....G").unwrap();
        let rows = compare(&layout).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].strategy, Strategy::BreadthFirst);
        assert_eq!(rows[0].path, Some((9, 8)));
        assert_eq!(rows[2].path.map(|(_, cost)| cost), Some(8));
        for r in &rows {
            assert_eq!(r.steps, r.expanded + 1);
        }
    }

    #[test]
    fn best_first_is_never_costlier() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let mut maze = Maze::new(8, 12);
            maze.randomize(&Default::default(), &mut rng);
            place_endpoints(&mut maze, None, None);
            let rows = compare(&maze.layout()).unwrap();
            let costs: Vec<Option<i32>> = rows.iter().map(|r| r.path.map(|p| p.1)).collect();
            if let Some(best) = costs[2] {
                assert!(costs[0].unwrap() >= best);
                assert!(costs[1].unwrap() >= best);
            } else {
                assert!(costs.iter().all(Option::is_none));
            }
        }
    }

    #[test]
    fn no_path_row() {
        let layout = Layout::parse("S#G").unwrap();
        let rows = compare(&layout).unwrap();
        assert!(rows.iter().all(|r| r.path.is_none()));
        assert!(rows[0].to_string().ends_with("no path"));
    }

    #[test]
    fn endpoints_are_cleared() {
        let mut maze = Maze::from_layout(Layout::parse("###\n###").unwrap());
        place_endpoints(&mut maze, None, Some(Point::new(1, 0)));
        assert_eq!(maze.start(), Some(Point::ZERO));
        assert_eq!(maze.goal(), Some(Point::new(1, 0)));
        assert_eq!(maze.map().at(Point::ZERO), Some(Terrain::Empty));
        assert_eq!(maze.map().at(Point::new(1, 0)), Some(Terrain::Empty));
        assert_eq!(maze.map().at(Point::new(2, 1)), Some(Terrain::Wall));
    }
}
