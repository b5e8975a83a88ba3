use std::fmt;

use pathgrid_core::Point;

/// Which end of a search an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::Goal => "goal",
        })
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Impassable,
}

/// Errors reported when starting a search. No search state exists after one
/// of these is returned.
///
/// An unreachable goal is not an error: it ends the search with
/// [`StepOutcome::NoPathFound`](crate::StepOutcome::NoPathFound).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start or goal cell is outside the grid or cannot be entered.
    InvalidEndpoints {
        endpoint: Endpoint,
        pos: Point,
        fault: EndpointFault,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoints {
                endpoint,
                pos,
                fault: EndpointFault::OutOfBounds,
            } => write!(f, "search: {endpoint} {pos} is out of bounds"),
            Self::InvalidEndpoints {
                endpoint,
                pos,
                fault: EndpointFault::Impassable,
            } => write!(f, "search: {endpoint} {pos} is impassable"),
        }
    }
}

impl std::error::Error for SearchError {}
