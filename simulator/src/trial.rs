use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use maze_planner::{Command, Grid, Heading, MOVE_CAP, PlannerConfig, PlannerError, Pose, Robot};

use crate::render;
use crate::service::MazeService;

/// Limits and scoring for one two-run trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Steps shared by both runs before the trial is abandoned.
    pub max_time: usize,
    /// Weight of the exploration run in the score.
    pub exploration_weight: f64,
    /// Print the planner's map after every step.
    pub render: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            max_time: 1000,
            exploration_weight: 1.0 / 30.0,
            render: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialOutcome {
    /// Steps spent in the exploration run, the reset step included.
    pub exploration_steps: Option<usize>,
    /// Steps the race run needed to enter the goal.
    pub race_steps: Option<usize>,
    /// Whether the robot physically entered the goal while exploring.
    pub entered_goal_while_exploring: bool,
    pub visited_percentage: f64,
    pub score: Option<f64>,
}

impl TrialOutcome {
    pub fn completed(&self) -> bool {
        self.score.is_some()
    }
}

/// Runs a robot through a maze twice: once to explore, once to race.
pub struct Trial<'a, M: MazeService> {
    maze: &'a M,
    grid: Grid,
    config: TrialConfig,
}

impl<'a, M: MazeService> Trial<'a, M> {
    pub fn new(maze: &'a M, config: TrialConfig) -> Result<Self, PlannerError> {
        let grid = Grid::new(maze.dim())?;
        Ok(Self { maze, grid, config })
    }

    /// Fresh robot for this maze, then [`Trial::run_robot`].
    pub fn run(&self, planner: PlannerConfig) -> Result<TrialOutcome, PlannerError> {
        let mut robot = Robot::new(self.maze.dim(), planner)?;
        self.run_robot(&mut robot)
    }

    /// A reset is accepted at any point of the first run: the planner only
    /// asks for one after it has mapped a route into the goal. A reset during
    /// the race is ignored.
    pub fn run_robot(&self, robot: &mut Robot) -> Result<TrialOutcome, PlannerError> {
        let mut total_time = 0;
        let mut exploration_steps = None;
        let mut entered_goal_while_exploring = false;

        for run in 0..2 {
            let mut pose = Pose::origin();
            loop {
                total_time += 1;
                if total_time > self.config.max_time {
                    warn!(run, max_time = self.config.max_time, "allotted time exceeded");
                    return Ok(self.outcome(robot, exploration_steps, None, entered_goal_while_exploring));
                }

                let sensors = self.sense(pose);
                let command = robot.next_move(sensors)?;
                if self.config.render {
                    let planner = robot.planner();
                    println!("{}", render::ascii_map(planner.model(), planner.pose()));
                }

                match command {
                    Command::Reset if run == 0 => {
                        info!(steps = total_time, "ending exploration run");
                        exploration_steps = Some(total_time);
                        break;
                    }
                    Command::Reset => {
                        warn!(step = total_time, "reset ignored during the race");
                        continue;
                    }
                    Command::Move { rotation, movement } => {
                        pose.heading = rotation.apply(pose.heading);
                        self.advance(&mut pose, movement);
                        debug!(run, step = total_time, cell = pose.cell, heading = %pose.heading, ?rotation, movement, "moved");
                    }
                }

                if self.grid.is_goal(pose.cell) {
                    if run == 0 {
                        entered_goal_while_exploring = true;
                    } else {
                        let race_steps = total_time - exploration_steps.unwrap_or(0);
                        info!(race_steps, "goal reached");
                        return Ok(self.outcome(robot, exploration_steps, Some(race_steps), entered_goal_while_exploring));
                    }
                }
            }
        }

        Ok(self.outcome(robot, exploration_steps, None, entered_goal_while_exploring))
    }

    /// Left, front and right distances as seen from `pose`.
    fn sense(&self, pose: Pose) -> [usize; 3] {
        let heading = pose.heading;
        [heading.turn_left(), heading, heading.turn_right()].map(|h| self.maze.dist_to_wall(pose.cell, h))
    }

    /// Moves cell by cell, stopping early at a wall. Negative movement backs
    /// up without turning.
    fn advance(&self, pose: &mut Pose, movement: i32) {
        let cap = MOVE_CAP as i32;
        let movement = movement.clamp(-cap, cap);
        let direction: Heading = if movement < 0 { pose.heading.opposite() } else { pose.heading };

        for _ in 0..movement.unsigned_abs() {
            if !self.maze.is_permissible(pose.cell, direction) {
                debug!(cell = pose.cell, %direction, "movement stopped by wall");
                break;
            }
            match self.grid.neighbor(pose.cell, direction) {
                Some(next) => pose.cell = next,
                None => break,
            }
        }
    }

    fn outcome(
        &self,
        robot: &Robot,
        exploration_steps: Option<usize>,
        race_steps: Option<usize>,
        entered_goal_while_exploring: bool,
    ) -> TrialOutcome {
        let score = exploration_steps
            .zip(race_steps)
            .map(|(explore, race)| race as f64 + self.config.exploration_weight * explore as f64);
        TrialOutcome {
            exploration_steps,
            race_steps,
            entered_goal_while_exploring,
            visited_percentage: robot.planner().model().percentage_visited(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    #[test]
    fn open_field_trial_completes() {
        let maze = Maze::open_field(4).unwrap();
        let trial = Trial::new(&maze, TrialConfig::default()).unwrap();
        let outcome = trial.run(PlannerConfig::default().with_threshold(10.0)).unwrap();

        // (0,0) -> (1,0) -> (1,1), then reset
        assert_eq!(outcome.exploration_steps, Some(3));
        assert!(outcome.entered_goal_while_exploring);
        assert_eq!(outcome.race_steps, Some(2));
        let score = outcome.score.unwrap();
        assert!((score - 2.1).abs() < 1e-9);
    }

    #[test]
    fn time_limit_abandons_the_trial() {
        let maze = Maze::open_field(6).unwrap();
        let config = TrialConfig {
            max_time: 5,
            ..TrialConfig::default()
        };
        let trial = Trial::new(&maze, config).unwrap();
        // an unreachable threshold keeps the robot exploring
        let outcome = trial.run(PlannerConfig::default().with_threshold(101.0)).unwrap();

        assert!(!outcome.completed());
        assert_eq!(outcome.exploration_steps, None);
        assert_eq!(outcome.score, None);
        assert!(outcome.visited_percentage > 0.0);
    }

    #[test]
    fn advance_stops_at_walls_and_backs_up() {
        let maze: Maze = "4\n2,3,5,6\n10,11,6,10\n9,15,13,14\n1,13,5,12\n".parse().unwrap();
        let grid = maze.grid();
        let trial = Trial::new(&maze, TrialConfig::default()).unwrap();

        let mut pose = Pose {
            cell: grid.index(0, 0),
            heading: Heading::East,
        };
        trial.advance(&mut pose, 7);
        assert_eq!(pose.cell, grid.index(2, 0));

        trial.advance(&mut pose, -1);
        assert_eq!(pose.cell, grid.index(1, 0));
        assert_eq!(pose.heading, Heading::East);
    }

    #[test]
    fn senses_left_front_right() {
        let maze = Maze::open_field(6).unwrap();
        let trial = Trial::new(&maze, TrialConfig::default()).unwrap();
        let pose = Pose {
            cell: maze.grid().index(1, 2),
            heading: Heading::East,
        };
        assert_eq!(trial.sense(pose), [3, 4, 2]);
    }
}
