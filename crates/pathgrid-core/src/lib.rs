//! **pathgrid-core**: core types for grid pathfinding.
//!
//! This crate provides the foundational types used across the *pathgrid*
//! workspace: geometry primitives, terrain codes with traversal costs, the
//! [`TerrainMap`] grid with its text [`Layout`] form, and random terrain
//! generation.

pub mod geom;
pub mod map;
pub mod mapgen;
pub mod terrain;

pub use geom::{Point, Range};
pub use map::{Layout, MapError, TerrainMap};
pub use mapgen::{MapGen, TerrainMix};
pub use terrain::Terrain;
