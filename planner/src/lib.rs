//! Mapping and planning engine for a micromouse-style robot.
//!
//! The robot starts in the south-west corner of an unknown `dim x dim` maze
//! and has to reach the four centre cells. During the first run it feeds
//! left/front/right wall distances into a [`MazeModel`], which keeps wall
//! masks and a graph of cells reachable in one move of up to three cells.
//! Once enough of the maze has been seen and the goal is known, the
//! [`Planner`] builds all-pairs shortest paths and precomputes the commands
//! for the second, timed run.
//!
//! ```text
//!  sensors ──► Planner::step ──► MazeModel::update_walls
//!                   │
//!                   ├─ exploring: explore() ──► translate_move()
//!                   └─ racing:    precomputed plan[t]
//! ```

pub mod command;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod maze_model;
pub mod path_tree;
pub mod planner;
pub mod robot;

pub use command::{Command, MOVE_CAP, Rotation};
pub use config::PlannerConfig;
pub use direction::{DirectionMap, Heading, SensorReading};
pub use error::PlannerError;
pub use grid::Grid;
pub use maze_model::MazeModel;
pub use path_tree::ShortestPathTree;
pub use planner::{Mode, ORIGIN, Planner, Pose};
pub use robot::Robot;
