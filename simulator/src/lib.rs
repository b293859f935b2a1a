//! A known maze, the two-run trial that drives a [`maze_planner::Robot`]
//! through it, and helpers for watching and tuning the planner.

pub mod maze;
pub mod render;
pub mod service;
pub mod sweep;
pub mod trial;

pub use maze::{Maze, MazeError};
pub use service::MazeService;
pub use sweep::{SweepResult, sweep};
pub use trial::{Trial, TrialConfig, TrialOutcome};
