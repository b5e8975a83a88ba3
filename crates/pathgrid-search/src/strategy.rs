use std::fmt;
use std::str::FromStr;

/// Order in which a search pops cells from its frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Oldest discovered cell first (FIFO).
    #[default]
    BreadthFirst,
    /// Most recently discovered cell first (LIFO).
    DepthFirst,
    /// Lowest `cost so far + heuristic` first (A*).
    BestFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::BestFirst,
    ];

    /// Short label: `BFS`, `DFS` or `A*`.
    pub const fn label(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "BFS",
            Strategy::DepthFirst => "DFS",
            Strategy::BestFirst => "A*",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
            Strategy::BestFirst => "best-first",
        })
    }
}

impl FromStr for Strategy {
    type Err = String;

    /// Accepts the long names as well as `bfs`, `dfs`, `astar` and `a*`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breadth-first" | "bfs" => Ok(Strategy::BreadthFirst),
            "depth-first" | "dfs" => Ok(Strategy::DepthFirst),
            "best-first" | "astar" | "a*" => Ok(Strategy::BestFirst),
            _ => Err(format!("unknown strategy {s:?}")),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn strategy_uses_kebab_case() {
        let json = serde_json::to_string(&Strategy::BestFirst).unwrap();
        assert_eq!(json, "\"best-first\"");
        let back: Strategy = serde_json::from_str("\"depth-first\"").unwrap();
        assert_eq!(back, Strategy::DepthFirst);
    }
}
