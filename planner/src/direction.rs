use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Cardinal heading of the robot. `North` points towards growing `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Clockwise order, starting at north.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub const fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Bit set in a cell's wall mask when the wall on this side is open.
    pub const fn wall_bit(self) -> u8 {
        1 << self.index()
    }

    /// Unit step `(dx, dy)` for one cell in this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Heading {
        Heading::ALL[(self.index() + 2) % 4]
    }

    pub const fn turn_right(self) -> Heading {
        Heading::ALL[(self.index() + 1) % 4]
    }

    pub const fn turn_left(self) -> Heading {
        Heading::ALL[(self.index() + 3) % 4]
    }

    pub const fn glyph(self) -> char {
        match self {
            Heading::North => '^',
            Heading::East => '>',
            Heading::South => 'v',
            Heading::West => '<',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "north",
            Heading::East => "east",
            Heading::South => "south",
            Heading::West => "west",
        };
        f.write_str(name)
    }
}

/// One value per cardinal direction, indexed by [`Heading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionMap<T>([T; 4]);

impl<T> DirectionMap<T> {
    pub const fn new(north: T, east: T, south: T, west: T) -> Self {
        Self([north, east, south, west])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Heading, &T)> {
        Heading::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Heading> for DirectionMap<T> {
    type Output = T;

    fn index(&self, heading: Heading) -> &T {
        &self.0[heading.index()]
    }
}

impl<T> IndexMut<Heading> for DirectionMap<T> {
    fn index_mut(&mut self, heading: Heading) -> &mut T {
        &mut self.0[heading.index()]
    }
}

/// Raw distance readings in the robot's own frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    pub left: usize,
    pub front: usize,
    pub right: usize,
}

impl SensorReading {
    pub const fn new(left: usize, front: usize, right: usize) -> Self {
        Self { left, front, right }
    }

    /// Rotates the reading into cardinal directions. There is no rear sensor,
    /// so the direction behind the robot always gets a run of zero.
    pub fn align(self, heading: Heading) -> DirectionMap<usize> {
        let mut runs = DirectionMap::default();
        runs[heading.turn_left()] = self.left;
        runs[heading] = self.front;
        runs[heading.turn_right()] = self.right;
        runs
    }
}

impl From<[usize; 3]> for SensorReading {
    fn from([left, front, right]: [usize; 3]) -> Self {
        Self::new(left, front, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_are_inverse() {
        for heading in Heading::ALL {
            assert_eq!(heading.turn_left().turn_right(), heading);
            assert_eq!(heading.turn_right().turn_right(), heading.opposite());
        }
    }

    #[test]
    fn wall_bits_are_distinct() {
        let mask = Heading::ALL.iter().fold(0u8, |acc, h| acc | h.wall_bit());
        assert_eq!(mask, 0b1111);
        assert_eq!(Heading::North.wall_bit(), 1);
        assert_eq!(Heading::West.wall_bit(), 8);
    }

    #[test]
    fn align_fills_left_front_right() {
        let reading = SensorReading::new(1, 2, 3);

        let north = reading.align(Heading::North);
        assert_eq!(north, DirectionMap::new(2, 3, 0, 1));

        let east = reading.align(Heading::East);
        assert_eq!(east, DirectionMap::new(1, 2, 3, 0));

        let west = reading.align(Heading::West);
        assert_eq!(west, DirectionMap::new(3, 0, 1, 2));

        let south = reading.align(Heading::South);
        assert_eq!(south[Heading::North], 0);
        assert_eq!(south[Heading::South], 2);
        assert_eq!(south[Heading::East], 1);
        assert_eq!(south[Heading::West], 3);
    }
}
