//! Demo configuration, read from TOML.
//!
//! Every field is optional in the file; missing ones take the defaults
//! below.
//!
//! ```toml
//! rows = 25
//! cols = 35
//! fps = 120
//! steps_per_frame = 10
//! strategy = "best-first"
//! wall_density = 0.3
//! seed = 7
//!
//! [mix]
//! wall = 0.25
//! mud = 0.1
//! sand = 0.06
//! water = 0.04
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use pathgrid_core::TerrainMix;
use pathgrid_core::mapgen::DEFAULT_WALL_DENSITY;
use pathgrid_search::Strategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Grid rows.
    pub rows: i32,
    /// Grid columns.
    pub cols: i32,
    /// Frames per second of the interactive loop.
    pub fps: u32,
    /// Search steps performed per frame while animating.
    pub steps_per_frame: usize,
    /// Strategy selected at startup.
    pub strategy: Strategy,
    /// Terrain probabilities for random maps.
    pub mix: TerrainMix,
    /// Wall probability for the plain wall scatter.
    pub wall_density: f64,
    /// Seed for random maps; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 35,
            fps: 120,
            steps_per_frame: 10,
            strategy: Strategy::BreadthFirst,
            mix: TerrainMix::default(),
            wall_density: DEFAULT_WALL_DENSITY,
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would leave the editor unusable. Run again
    /// after applying command-line overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 1 || self.cols < 1 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".into()));
        }
        if self.steps_per_frame == 0 {
            return Err(ConfigError::Invalid(
                "steps_per_frame must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Errors raised while loading a [`DemoConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "config: cannot read {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "config: {e}"),
            Self::Invalid(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let c = DemoConfig::from_toml("").unwrap();
        assert_eq!(c, DemoConfig::default());
        assert_eq!(c.rows, 25);
        assert_eq!(c.cols, 35);
        assert_eq!(c.fps, 120);
        assert_eq!(c.steps_per_frame, 10);
        assert_eq!(c.mix, TerrainMix::default());
    }

    #[test]
    fn partial_override() {
        let c = DemoConfig::from_toml(
            r#"
rows = 10
strategy = "best-first"
seed = 9

[mix]
wall = 0.5
"#,
        )
        .unwrap();
        assert_eq!(c.rows, 10);
        assert_eq!(c.cols, 35);
        assert_eq!(c.strategy, Strategy::BestFirst);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.mix.wall, 0.5);
        assert_eq!(c.mix.mud, TerrainMix::default().mud);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            DemoConfig::from_toml("rows = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml("colls = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml("strategy = \"greedy\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_speeds_are_rejected() {
        for text in ["fps = 0", "steps_per_frame = 0"] {
            let err = DemoConfig::from_toml(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}");
        }
        let c = DemoConfig {
            steps_per_frame: 0,
            ..DemoConfig::default()
        };
        assert_eq!(
            c.validate().unwrap_err().to_string(),
            "config: steps_per_frame must be positive"
        );
    }

    #[test]
    fn missing_file() {
        let err = DemoConfig::load(Path::new("/nonexistent/pathgrid.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/pathgrid.toml"));
    }
}
