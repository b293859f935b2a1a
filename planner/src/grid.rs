use crate::direction::Heading;
use crate::error::PlannerError;

/// Geometry of a square `dim x dim` maze. Cells are numbered `x + y * dim`
/// with `(0, 0)` in the south-west corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    dim: usize,
}

impl Grid {
    pub fn new(dim: usize) -> Result<Self, PlannerError> {
        if dim == 0 || dim % 2 != 0 {
            return Err(PlannerError::InvalidDimension(dim));
        }
        Ok(Self { dim })
    }

    pub const fn dim(self) -> usize {
        self.dim
    }

    pub const fn cell_count(self) -> usize {
        self.dim * self.dim
    }

    pub const fn index(self, x: usize, y: usize) -> usize {
        x + y * self.dim
    }

    pub const fn coords(self, cell: usize) -> (usize, usize) {
        (cell % self.dim, cell / self.dim)
    }

    pub const fn contains(self, cell: usize) -> bool {
        cell < self.cell_count()
    }

    pub fn check(self, cell: usize) -> Result<usize, PlannerError> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(PlannerError::CellOutOfRange {
                cell,
                dim: self.dim,
            })
        }
    }

    /// The adjacent cell in `heading`, ignoring walls.
    pub fn neighbor(self, cell: usize, heading: Heading) -> Option<usize> {
        let (x, y) = self.coords(cell);
        let (dx, dy) = heading.offset();
        let nx = x.checked_add_signed(dx).filter(|&nx| nx < self.dim)?;
        let ny = y.checked_add_signed(dy).filter(|&ny| ny < self.dim)?;
        Some(self.index(nx, ny))
    }

    /// Cells on a straight line from `cell` (included) to the grid edge.
    pub fn ray(self, cell: usize, heading: Heading) -> impl Iterator<Item = usize> {
        std::iter::successors(Some(cell), move |&c| self.neighbor(c, heading))
    }

    /// The cell `steps` cells away in `heading`, if it is on the grid.
    pub fn step(self, cell: usize, heading: Heading, steps: usize) -> Option<usize> {
        self.ray(cell, heading).nth(steps)
    }

    /// Direction and distance of `to` from `from` when both lie on one
    /// straight line at most `max_steps` cells apart.
    pub fn direction_to(self, from: usize, to: usize, max_steps: usize) -> Option<(Heading, usize)> {
        Heading::ALL.into_iter().find_map(|heading| {
            self.ray(from, heading)
                .enumerate()
                .skip(1)
                .take(max_steps)
                .find(|&(_, cell)| cell == to)
                .map(|(distance, _)| (heading, distance))
        })
    }

    /// The four centre cells.
    pub const fn goal_cells(self) -> [usize; 4] {
        let half = self.dim / 2;
        [
            self.index(half, half),
            self.index(half, half - 1),
            self.index(half - 1, half),
            self.index(half - 1, half - 1),
        ]
    }

    pub const fn is_goal(self, cell: usize) -> bool {
        let (x, y) = self.coords(cell);
        let half = self.dim / 2;
        (x == half || x + 1 == half) && (y == half || y + 1 == half)
    }

    /// Ring depth of a cell: 0 on the outer border, `dim / 2 - 1` in the centre.
    pub const fn depth(self, cell: usize) -> usize {
        let (x, y) = self.coords(cell);
        let dx = if x < self.dim - 1 - x { x } else { self.dim - 1 - x };
        let dy = if y < self.dim - 1 - y { y } else { self.dim - 1 - y };
        if dx < dy { dx } else { dy }
    }
}
