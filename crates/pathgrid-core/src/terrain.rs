//! Terrain codes and their traversal costs.

use std::fmt;
use std::str::FromStr;

/// Kind of ground occupying a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Terrain {
    /// Open floor, cost 1.
    #[default]
    Empty,
    /// Impassable.
    Wall,
    /// Cost 3.
    Mud,
    /// Cost 5.
    Sand,
    /// Cost 8.
    Water,
}

impl Terrain {
    /// Every terrain kind, in palette order.
    pub const ALL: [Terrain; 5] = [
        Terrain::Empty,
        Terrain::Wall,
        Terrain::Mud,
        Terrain::Sand,
        Terrain::Water,
    ];

    /// Cost of entering a cell of this terrain, or `None` if impassable.
    ///
    /// Passable costs are always at least 1.
    #[inline]
    pub const fn cost(self) -> Option<i32> {
        match self {
            Terrain::Empty => Some(1),
            Terrain::Wall => None,
            Terrain::Mud => Some(3),
            Terrain::Sand => Some(5),
            Terrain::Water => Some(8),
        }
    }

    #[inline]
    pub const fn is_passable(self) -> bool {
        self.cost().is_some()
    }

    /// Character used for this terrain in text layouts.
    pub const fn glyph(self) -> char {
        match self {
            Terrain::Empty => '.',
            Terrain::Wall => '#',
            Terrain::Mud => '%',
            Terrain::Sand => ':',
            Terrain::Water => '~',
        }
    }

    /// Inverse of [`glyph`](Terrain::glyph).
    pub const fn from_glyph(ch: char) -> Option<Terrain> {
        match ch {
            '.' => Some(Terrain::Empty),
            '#' => Some(Terrain::Wall),
            '%' => Some(Terrain::Mud),
            ':' => Some(Terrain::Sand),
            '~' => Some(Terrain::Water),
            _ => None,
        }
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Terrain::Empty => "empty",
            Terrain::Wall => "wall",
            Terrain::Mud => "mud",
            Terrain::Sand => "sand",
            Terrain::Water => "water",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown terrain {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs() {
        assert_eq!(Terrain::Empty.cost(), Some(1));
        assert_eq!(Terrain::Mud.cost(), Some(3));
        assert_eq!(Terrain::Sand.cost(), Some(5));
        assert_eq!(Terrain::Water.cost(), Some(8));
        assert_eq!(Terrain::Wall.cost(), None);
        assert!(!Terrain::Wall.is_passable());
        for t in Terrain::ALL {
            if let Some(c) = t.cost() {
                assert!(c >= 1, "{t} has cost {c}");
            }
        }
    }

    #[test]
    fn glyphs_are_distinct_and_invertible() {
        for t in Terrain::ALL {
            assert_eq!(Terrain::from_glyph(t.glyph()), Some(t));
        }
        assert_eq!(Terrain::from_glyph('S'), None);
    }

    #[test]
    fn parse_names() {
        assert_eq!("Mud".parse::<Terrain>(), Ok(Terrain::Mud));
        assert_eq!(
            "lava".parse::<Terrain>(),
            Err("unknown terrain \"lava\"".to_string())
        );
    }
}
