//! Random terrain generation.
//!
//! Two generators are provided:
//! - **Terrain mix**: every cell independently becomes a wall or one of the
//!   passable terrains, following a [`TerrainMix`].
//! - **Wall scatter**: sprinkles walls over the existing map and leaves the
//!   other cells alone.

use rand::Rng;

use crate::map::TerrainMap;
use crate::terrain::Terrain;

/// Probabilities used by [`MapGen::terrain_mix`].
///
/// `wall` is the chance for a cell to become a wall. The remaining fields
/// are the chances, among non-wall cells, of water, sand and mud; leftover
/// probability is empty ground.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainMix {
    pub wall: f64,
    pub mud: f64,
    pub sand: f64,
    pub water: f64,
}

impl Default for TerrainMix {
    fn default() -> Self {
        Self {
            wall: 0.25,
            mud: 0.10,
            sand: 0.06,
            water: 0.04,
        }
    }
}

impl TerrainMix {
    /// Pick a terrain from two uniform draws in `[0, 1)`.
    pub fn pick(&self, p: f64, q: f64) -> Terrain {
        if p < self.wall {
            return Terrain::Wall;
        }
        if q < self.water {
            Terrain::Water
        } else if q < self.water + self.sand {
            Terrain::Sand
        } else if q < self.water + self.sand + self.mud {
            Terrain::Mud
        } else {
            Terrain::Empty
        }
    }
}

/// Default wall density for [`MapGen::scatter_walls`].
pub const DEFAULT_WALL_DENSITY: f64 = 0.3;

/// Map generator operating on a [`TerrainMap`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub map: TerrainMap,
}

impl<R: Rng> MapGen<R> {
    /// Create a new generator working on `map`.
    pub fn with_map(map: TerrainMap, rng: R) -> Self {
        Self { rng, map }
    }

    /// Overwrite every cell with a terrain drawn from `mix`.
    ///
    /// Returns the number of passable cells in the result.
    pub fn terrain_mix(&mut self, mix: &TerrainMix) -> usize {
        let rng = &mut self.rng;
        self.map.fill_fn(|_| {
            let p: f64 = rng.random();
            if p < mix.wall {
                return Terrain::Wall;
            }
            mix.pick(p, rng.random())
        });
        let passable = self.map.bounds().len() - self.map.count(Terrain::Wall);
        log::debug!(
            "terrain mix on {}: {passable} passable cells",
            self.map.bounds()
        );
        passable
    }

    /// Turn each cell into a wall with probability `density`.
    ///
    /// Returns the number of walls in the result.
    pub fn scatter_walls(&mut self, density: f64) -> usize {
        for p in self.map.bounds() {
            if self.rng.random::<f64>() < density {
                self.map.set(p, Terrain::Wall);
            }
        }
        let walls = self.map.count(Terrain::Wall);
        log::debug!("wall scatter on {}: {walls} walls", self.map.bounds());
        walls
    }

    /// Consume the generator, returning the map.
    pub fn into_map(self) -> TerrainMap {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pick_thresholds() {
        let mix = TerrainMix::default();
        assert_eq!(mix.pick(0.1, 0.0), Terrain::Wall);
        assert_eq!(mix.pick(0.5, 0.01), Terrain::Water);
        assert_eq!(mix.pick(0.5, 0.05), Terrain::Sand);
        assert_eq!(mix.pick(0.5, 0.15), Terrain::Mud);
        assert_eq!(mix.pick(0.5, 0.5), Terrain::Empty);
    }

    #[test]
    fn terrain_mix_produces_all_kinds() {
        let mut mg = MapGen::with_map(TerrainMap::new(40, 40), StdRng::seed_from_u64(7));
        let passable = mg.terrain_mix(&TerrainMix::default());
        let total = 40 * 40;
        assert!(passable > 0 && passable < total);
        for t in Terrain::ALL {
            assert!(mg.map.count(t) > 0, "no {t} generated");
        }
    }

    #[test]
    fn terrain_mix_is_reproducible() {
        let gen_map = |seed| {
            let mut mg = MapGen::with_map(TerrainMap::new(12, 9), StdRng::seed_from_u64(seed));
            mg.terrain_mix(&TerrainMix::default());
            mg.into_map()
        };
        assert_eq!(gen_map(3), gen_map(3));
    }

    #[test]
    fn zero_wall_mix_has_no_walls() {
        let mix = TerrainMix {
            wall: 0.0,
            ..TerrainMix::default()
        };
        let mut mg = MapGen::with_map(TerrainMap::new(20, 20), StdRng::seed_from_u64(1));
        assert_eq!(mg.terrain_mix(&mix), 400);
    }

    #[test]
    fn scatter_keeps_existing_terrain() {
        let mut map = TerrainMap::new(20, 20);
        map.fill(Terrain::Water);
        let mut mg = MapGen::with_map(map, StdRng::seed_from_u64(11));
        let walls = mg.scatter_walls(DEFAULT_WALL_DENSITY);
        assert!(walls > 0 && walls < 400);
        assert_eq!(mg.map.count(Terrain::Water) + walls, 400);
        assert_eq!(mg.map.count(Terrain::Empty), 0);
    }
}
