use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use maze_planner::{Grid, Heading};

use crate::service::MazeService;

#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("failed to read maze file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("maze file is empty")]
    Empty,
    #[error("invalid maze dimension {0:?}")]
    BadDimension(String),
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("column {column}: expected {expected} cells, found {found}")]
    RowCount {
        column: usize,
        expected: usize,
        found: usize,
    },
    #[error("column {column}: invalid wall mask {value:?}")]
    BadMask { column: usize, value: String },
    #[error("outer wall is open at ({x}, {y}) towards {heading}")]
    OpenPerimeter { x: usize, y: usize, heading: Heading },
    #[error("wall between ({x}, {y}) and its {heading} neighbour is one-sided")]
    Inconsistent { x: usize, y: usize, heading: Heading },
}

/// A fully known maze. Each cell carries the same open-wall mask the planner
/// uses: north 1, east 2, south 4, west 8.
///
/// The text format is the dimension on the first line, followed by one line
/// per column `x`, each holding the comma-separated masks for `y = 0..dim`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    walls: Vec<u8>,
}

impl Maze {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Builds a maze from masks indexed by `x + y * dim`, checking the outer
    /// wall and that every opening is recorded on both sides.
    pub fn from_walls(dim: usize, walls: Vec<u8>) -> Result<Self, MazeError> {
        let grid = Grid::new(dim).map_err(|_| MazeError::BadDimension(dim.to_string()))?;
        if walls.len() != grid.cell_count() {
            return Err(MazeError::RowCount {
                column: 0,
                expected: grid.cell_count(),
                found: walls.len(),
            });
        }

        let maze = Self { grid, walls };
        maze.validate()?;
        Ok(maze)
    }

    /// Every interior wall removed.
    pub fn open_field(dim: usize) -> Result<Self, MazeError> {
        let grid = Grid::new(dim).map_err(|_| MazeError::BadDimension(dim.to_string()))?;
        let walls = (0..grid.cell_count())
            .map(|cell| {
                Heading::ALL
                    .into_iter()
                    .filter(|&heading| grid.neighbor(cell, heading).is_some())
                    .fold(0, |mask, heading| mask | heading.wall_bit())
            })
            .collect();
        Self::from_walls(dim, walls)
    }

    fn validate(&self) -> Result<(), MazeError> {
        for cell in 0..self.grid.cell_count() {
            let (x, y) = self.grid.coords(cell);
            for heading in Heading::ALL {
                let open = self.is_permissible(cell, heading);
                match self.grid.neighbor(cell, heading) {
                    None if open => return Err(MazeError::OpenPerimeter { x, y, heading }),
                    Some(next) if open != self.is_permissible(next, heading.opposite()) => {
                        return Err(MazeError::Inconsistent { x, y, heading });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn walls(&self, cell: usize) -> u8 {
        self.walls[cell]
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().ok_or(MazeError::Empty)?;
        let dim: usize = header
            .parse()
            .map_err(|_| MazeError::BadDimension(header.to_string()))?;
        let grid = Grid::new(dim).map_err(|_| MazeError::BadDimension(header.to_string()))?;

        let columns: Vec<&str> = lines.collect();
        if columns.len() != dim {
            return Err(MazeError::ColumnCount {
                expected: dim,
                found: columns.len(),
            });
        }

        let mut walls = vec![0u8; grid.cell_count()];
        for (x, line) in columns.into_iter().enumerate() {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            if values.len() != dim {
                return Err(MazeError::RowCount {
                    column: x,
                    expected: dim,
                    found: values.len(),
                });
            }
            for (y, value) in values.into_iter().enumerate() {
                let mask = value
                    .parse::<u8>()
                    .ok()
                    .filter(|&mask| mask <= 0b1111)
                    .ok_or_else(|| MazeError::BadMask {
                        column: x,
                        value: value.to_string(),
                    })?;
                walls[grid.index(x, y)] = mask;
            }
        }

        Self::from_walls(dim, walls)
    }
}

impl MazeService for Maze {
    fn dim(&self) -> usize {
        self.grid.dim()
    }

    fn is_permissible(&self, cell: usize, heading: Heading) -> bool {
        self.walls[cell] & heading.wall_bit() != 0
    }

    fn dist_to_wall(&self, cell: usize, heading: Heading) -> usize {
        let mut distance = 0;
        let mut current = cell;
        while self.is_permissible(current, heading) {
            match self.grid.neighbor(current, heading) {
                Some(next) => current = next,
                None => break,
            }
            distance += 1;
        }
        distance
    }
}
