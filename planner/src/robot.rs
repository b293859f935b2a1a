use crate::command::Command;
use crate::config::PlannerConfig;
use crate::direction::SensorReading;
use crate::error::PlannerError;
use crate::planner::{Mode, Planner};

/// Thin driver around a [`Planner`]: counts steps and restarts the count when
/// exploration hands over to the race.
pub struct Robot {
    planner: Planner,
    step: usize,
}

impl Robot {
    pub fn new(dim: usize, config: PlannerConfig) -> Result<Self, PlannerError> {
        Ok(Self {
            planner: Planner::new(dim, config)?,
            step: 0,
        })
    }

    /// `sensors` holds the left, front and right distances, in that order.
    pub fn next_move(&mut self, sensors: [usize; 3]) -> Result<Command, PlannerError> {
        let command = self.planner.step(self.step, SensorReading::from(sensors))?;
        self.step = match command {
            Command::Reset => 0,
            Command::Move { .. } => self.step + 1,
        };
        Ok(command)
    }

    pub fn is_racing(&self) -> bool {
        self.planner.mode() == Mode::Racing
    }

    pub fn step_count(&self) -> usize {
        self.step
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_steps_while_exploring() {
        let mut robot = Robot::new(4, PlannerConfig::default()).unwrap();
        robot.next_move([0, 1, 0]).unwrap();
        robot.next_move([0, 0, 0]).unwrap();
        assert_eq!(robot.step_count(), 2);
        assert!(!robot.is_racing());
    }

    #[test]
    fn reset_restarts_the_count_for_the_race() {
        let config = PlannerConfig::default().with_threshold(10.0);
        let mut robot = Robot::new(4, config).unwrap();

        // open 4x4 field, readings as seen from the poses the planner picks
        assert_eq!(robot.next_move([0, 3, 3]).unwrap().as_pair(), Some((90, 1)));
        assert_eq!(robot.next_move([3, 2, 0]).unwrap().as_pair(), Some((-90, 1)));
        assert_eq!(robot.next_move([1, 2, 2]).unwrap(), Command::Reset);
        assert_eq!(robot.step_count(), 0);
        assert!(robot.is_racing());

        let first = robot.planner().race_commands()[0];
        assert_eq!(robot.next_move([0, 3, 3]).unwrap(), first);
        assert_eq!(robot.step_count(), 1);
    }
}
