use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::command::{Command, MOVE_CAP, Rotation};
use crate::config::PlannerConfig;
use crate::direction::{Heading, SensorReading};
use crate::error::PlannerError;
use crate::maze_model::MazeModel;

/// Start cell of every run: the south-west corner.
pub const ORIGIN: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Exploring,
    Racing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub cell: usize,
    pub heading: Heading,
}

impl Pose {
    pub const fn origin() -> Self {
        Self {
            cell: ORIGIN,
            heading: Heading::North,
        }
    }
}

/// One precomputed race command and the pose it leaves the robot in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RaceLeg {
    command: Command,
    pose: Pose,
}

pub struct Planner {
    config: PlannerConfig,
    model: MazeModel,
    pose: Pose,
    mode: Mode,
    goal_cells: [usize; 4],
    found_goal: Option<usize>,
    race_plan: Vec<RaceLeg>,
    rng: StdRng,
}

impl Planner {
    pub fn new(dim: usize, config: PlannerConfig) -> Result<Self, PlannerError> {
        let model = MazeModel::new(dim)?;
        let goal_cells = model.grid().goal_cells();
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            model,
            pose: Pose::origin(),
            mode: Mode::Exploring,
            goal_cells,
            found_goal: None,
            race_plan: Vec::new(),
            rng,
        })
    }

    pub fn model(&self) -> &MazeModel {
        &self.model
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn goal_cells(&self) -> [usize; 4] {
        self.goal_cells
    }

    /// Goal cell recorded when the graph first touched the goal region.
    pub fn found_goal(&self) -> Option<usize> {
        self.found_goal
    }

    /// The commands replayed in the race run, empty until exploration ends.
    pub fn race_commands(&self) -> Vec<Command> {
        self.race_plan.iter().map(|leg| leg.command).collect()
    }

    /// Handles one sensor reading and returns the next command.
    ///
    /// While exploring, `t` is only used for logging. While racing it indexes
    /// the precomputed plan, and the pose follows that plan so later readings
    /// are still recorded against the right cell.
    pub fn step(&mut self, t: usize, sensors: SensorReading) -> Result<Command, PlannerError> {
        if self.mode == Mode::Racing {
            self.pose = self.race_pose(t)?;
        }

        let runs = sensors.align(self.pose.heading);
        self.model.update_walls(self.pose.cell, &runs)?;

        match self.mode {
            Mode::Exploring => {
                let visited = self.model.percentage_visited();
                debug!(step = t, cell = self.pose.cell, heading = %self.pose.heading, visited, "exploring");

                if visited >= self.config.visited_threshold && self.found_goal.is_some() {
                    info!(step = t, visited, "exploration finished");
                    self.reset()?;
                    return Ok(Command::Reset);
                }
                self.explore()
            }
            Mode::Racing => self.race(t),
        }
    }

    /// Picks the next cell while mapping the maze.
    ///
    /// Cells straight behind the robot are never candidates. Unvisited
    /// candidates win by reward, with the lowest index taking ties; once every
    /// candidate has been visited the choice is random. With no candidate at
    /// all the robot turns clockwise on the spot.
    pub fn explore(&mut self) -> Result<Command, PlannerError> {
        let here = self.pose.cell;
        let grid = self.model.grid();
        let behind: Vec<usize> = grid.ray(here, self.pose.heading.opposite()).skip(1).take(MOVE_CAP).collect();
        let candidates: Vec<usize> = self.model.neighbors(here).filter(|cell| !behind.contains(cell)).collect();

        if candidates.is_empty() {
            self.pose.heading = Rotation::Clockwise.apply(self.pose.heading);
            debug!(cell = here, "dead end, turning in place");
            return Ok(Command::rotate_in_place(Rotation::Clockwise));
        }

        let best_unvisited = candidates
            .iter()
            .copied()
            .filter(|&cell| !self.model.is_visited(cell))
            .reduce(|best, cell| {
                if self.model.reward_of(cell) > self.model.reward_of(best) {
                    cell
                } else {
                    best
                }
            });
        let target = match best_unvisited {
            Some(cell) => cell,
            None => candidates[self.rng.gen_range(0..candidates.len())],
        };

        let command = self.translate_move(here, target)?;
        self.pose.cell = target;
        debug!(from = here, to = target, ?command, "explore move");

        if self.found_goal.is_none() {
            self.check_goal_found();
        }
        Ok(command)
    }

    fn check_goal_found(&mut self) {
        let found = self
            .goal_cells
            .iter()
            .copied()
            .filter(|&goal| self.model.has_any_edge(goal))
            .last();
        if let Some(goal) = found {
            info!(goal, "goal region found");
            self.found_goal = Some(goal);
        }
    }

    /// Command that takes the robot from `from` to `to` in one straight move,
    /// turning its heading towards `to`.
    pub fn translate_move(&mut self, from: usize, to: usize) -> Result<Command, PlannerError> {
        let (heading, distance) = self
            .model
            .grid()
            .direction_to(from, to, MOVE_CAP)
            .ok_or(PlannerError::NotAdjacent {
                from,
                to,
                cap: MOVE_CAP,
            })?;
        let rotation = Rotation::between(self.pose.heading, heading).ok_or(PlannerError::UnsupportedRotation {
            from: self.pose.heading,
            to: heading,
        })?;

        self.pose.heading = heading;
        Ok(Command::Move {
            rotation,
            movement: distance as i32,
        })
    }

    /// Ends exploration: back to the origin, build the path tree and turn the
    /// shortest route to the goal into the race plan.
    pub fn reset(&mut self) -> Result<(), PlannerError> {
        let goal = self.found_goal.ok_or(PlannerError::GoalNotFound)?;

        self.pose = Pose::origin();
        self.model.build_shortest_path_tree();
        let path = self.model.reconstruct_path(ORIGIN, goal)?;
        self.race_plan = self.plan_race(&path)?;
        self.pose = Pose::origin();
        self.mode = Mode::Racing;

        info!(goal, moves = self.race_plan.len(), "race plan ready");
        Ok(())
    }

    fn plan_race(&mut self, path: &[usize]) -> Result<Vec<RaceLeg>, PlannerError> {
        let mut legs = Vec::with_capacity(path.len().saturating_sub(1));
        for hop in path.windows(2) {
            let (from, to) = (hop[0], hop[1]);
            let command = match self.translate_move(from, to) {
                Ok(command) => command,
                // a reversal is driven backwards without turning
                Err(PlannerError::UnsupportedRotation { to: heading, .. }) => {
                    let distance = self
                        .model
                        .grid()
                        .direction_to(from, to, MOVE_CAP)
                        .map_or(0, |(_, distance)| distance);
                    debug!(from, to, %heading, "reversing");
                    Command::Move {
                        rotation: Rotation::None,
                        movement: -(distance as i32),
                    }
                }
                Err(err) => return Err(err),
            };
            legs.push(RaceLeg {
                command,
                pose: Pose {
                    cell: to,
                    heading: self.pose.heading,
                },
            });
        }
        Ok(legs)
    }

    fn race_pose(&self, t: usize) -> Result<Pose, PlannerError> {
        match t.checked_sub(1) {
            None => Ok(Pose::origin()),
            Some(previous) => self.race_plan.get(previous).map(|leg| leg.pose).ok_or(PlannerError::RacePathExhausted {
                step: t,
                len: self.race_plan.len(),
            }),
        }
    }

    fn race(&mut self, t: usize) -> Result<Command, PlannerError> {
        let leg = *self.race_plan.get(t).ok_or(PlannerError::RacePathExhausted {
            step: t,
            len: self.race_plan.len(),
        })?;
        self.pose = leg.pose;
        debug!(step = t, command = ?leg.command, "race move");
        Ok(leg.command)
    }
}
