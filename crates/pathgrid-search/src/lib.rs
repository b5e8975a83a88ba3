//! Step-by-step grid search.
//!
//! This crate drives breadth-first, depth-first and best-first (A\*) search
//! over a grid one expansion at a time, so that a caller such as an
//! animation loop can interleave a bounded number of steps per frame:
//!
//! ```
//! use pathgrid_core::{Point, TerrainMap};
//! use pathgrid_search::{SearchState, StepOutcome, Strategy};
//!
//! let map = TerrainMap::new(5, 5);
//! let mut search =
//!     SearchState::new(&map, Point::new(0, 0), Point::new(4, 4), Strategy::BestFirst).unwrap();
//! let outcome = search.run(&map);
//! assert_eq!(outcome.path().map(|p| p.cost()), Some(8));
//! assert!(matches!(search.step(&map), StepOutcome::PathFound(_)));
//! ```
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | bounds, passability, neighbour order |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible heuristic |
//!
//! [`TerrainMap`](pathgrid_core::TerrainMap) implements all three: edges cost
//! the terrain being entered and the heuristic is the Manhattan distance.

mod distance;
mod error;
mod frontier;
mod path;
mod state;
mod strategy;
mod terrain;
mod traits;

pub use distance::manhattan;
pub use error::{Endpoint, EndpointFault, SearchError};
pub use path::Path;
pub use state::{Expansion, SearchState, Status, StepOutcome, Steps, find_path};
pub use strategy::Strategy;
pub use traits::{AstarPather, Pather, WeightedPather};
