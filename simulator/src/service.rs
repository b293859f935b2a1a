use maze_planner::Heading;

/// The environment the robot runs in. It knows the real walls; the planner
/// only ever sees what this service reports.
pub trait MazeService {
    fn dim(&self) -> usize;

    /// Whether a single step from `cell` towards `heading` is unobstructed.
    fn is_permissible(&self, cell: usize, heading: Heading) -> bool;

    /// Number of open cells ahead of `cell` before the next wall.
    fn dist_to_wall(&self, cell: usize, heading: Heading) -> usize;
}
