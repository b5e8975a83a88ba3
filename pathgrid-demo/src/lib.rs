//! Terminal front-end for the *pathgrid* searches.
//!
//! A [`Maze`] holds the edited grid and the running search; [`app`] drives
//! it from the keyboard and mouse through the crossterm [`Terminal`], and
//! [`report`] runs it headless.

pub mod app;
pub mod config;
pub mod render;
pub mod report;
pub mod session;
pub mod term;

pub use app::{Control, Editor, Mode};
pub use config::{ConfigError, DemoConfig};
pub use report::Summary;
pub use session::{Maze, SessionError};
pub use term::{Input, Terminal};
