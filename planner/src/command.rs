use crate::direction::Heading;
use serde::{Deserialize, Serialize};

/// Largest number of cells a single command may move.
pub const MOVE_CAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    CounterClockwise,
    None,
    Clockwise,
}

impl Rotation {
    pub const fn degrees(self) -> i32 {
        match self {
            Rotation::CounterClockwise => -90,
            Rotation::None => 0,
            Rotation::Clockwise => 90,
        }
    }

    /// Rotation taking `from` onto `to`, or `None` for a reversal.
    pub fn between(from: Heading, to: Heading) -> Option<Rotation> {
        match (to.index() + 4 - from.index()) % 4 {
            0 => Some(Rotation::None),
            1 => Some(Rotation::Clockwise),
            3 => Some(Rotation::CounterClockwise),
            _ => None,
        }
    }

    pub const fn apply(self, heading: Heading) -> Heading {
        match self {
            Rotation::CounterClockwise => heading.turn_left(),
            Rotation::None => heading,
            Rotation::Clockwise => heading.turn_right(),
        }
    }
}

/// What the robot should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Rotate first, then move `movement` cells (negative = backwards).
    Move { rotation: Rotation, movement: i32 },
    /// End the exploration run and put the robot back at the origin.
    Reset,
}

impl Command {
    pub const fn rotate_in_place(rotation: Rotation) -> Self {
        Command::Move {
            rotation,
            movement: 0,
        }
    }

    /// `(degrees, cells)` for a move, `None` for the reset sentinel.
    pub const fn as_pair(self) -> Option<(i32, i32)> {
        match self {
            Command::Move { rotation, movement } => Some((rotation.degrees(), movement)),
            Command::Reset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_between_headings() {
        assert_eq!(Rotation::between(Heading::North, Heading::North), Some(Rotation::None));
        assert_eq!(Rotation::between(Heading::North, Heading::East), Some(Rotation::Clockwise));
        assert_eq!(Rotation::between(Heading::North, Heading::West), Some(Rotation::CounterClockwise));
        assert_eq!(Rotation::between(Heading::West, Heading::North), Some(Rotation::Clockwise));
        assert_eq!(Rotation::between(Heading::East, Heading::West), None);
    }

    #[test]
    fn apply_matches_between() {
        for from in Heading::ALL {
            for to in Heading::ALL {
                if let Some(rotation) = Rotation::between(from, to) {
                    assert_eq!(rotation.apply(from), to);
                } else {
                    assert_eq!(from.opposite(), to);
                }
            }
        }
    }

    #[test]
    fn reset_has_no_pair() {
        assert_eq!(Command::Reset.as_pair(), None);
        assert_eq!(Command::rotate_in_place(Rotation::Clockwise).as_pair(), Some((90, 0)));
    }
}
