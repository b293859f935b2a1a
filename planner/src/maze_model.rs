use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::command::MOVE_CAP;
use crate::direction::{DirectionMap, Heading};
use crate::error::PlannerError;
use crate::grid::Grid;
use crate::path_tree::ShortestPathTree;

/// What the robot has learned about one maze: wall masks, visited cells and
/// the graph of cells reachable from each other in a single bounded move.
#[derive(Debug, Clone)]
pub struct MazeModel {
    grid: Grid,
    walls: Vec<u8>,
    visited: BTreeSet<usize>,
    edges: Vec<bool>,
    rewards: Vec<i32>,
    tree: Option<ShortestPathTree>,
}

impl MazeModel {
    pub fn new(dim: usize) -> Result<Self, PlannerError> {
        let grid = Grid::new(dim)?;
        let cells = grid.cell_count();
        let rewards = (0..cells).map(|cell| reward_for(grid, cell)).collect();

        Ok(Self {
            grid,
            walls: vec![0; cells],
            visited: BTreeSet::new(),
            edges: vec![false; cells * cells],
            rewards,
            tree: None,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn dim(&self) -> usize {
        self.grid.dim()
    }

    /// Feeds one set of cardinal sensor runs taken at `cell`.
    ///
    /// Every wall segment inside a sensed run is opened on both sides, and for
    /// each cell of the run the cells up to [`MOVE_CAP`] further along become
    /// mutually reachable. The whole reading is checked against the grid
    /// before anything is written, so a bad reading leaves the model intact.
    ///
    /// Returns the number of wall segments that were newly opened.
    pub fn update_walls(&mut self, cell: usize, runs: &DirectionMap<usize>) -> Result<usize, PlannerError> {
        self.grid.check(cell)?;
        for (heading, &run) in runs.iter() {
            if run > 0 && self.grid.step(cell, heading, run).is_none() {
                return Err(PlannerError::MalformedSensorData { cell, heading, run });
            }
        }

        let mut opened = 0;
        for (heading, &run) in runs.iter() {
            if run == 0 {
                continue;
            }
            self.visited.insert(cell);

            let corridor: Vec<usize> = self.grid.ray(cell, heading).take(run + 1).collect();
            for i in 0..run {
                if self.open_wall(corridor[i], heading) {
                    opened += 1;
                }
                let reach = (run - i).min(MOVE_CAP);
                self.connect_all(&corridor[i..=i + reach]);
            }
        }

        if opened > 0 {
            debug!(cell, opened, "opened walls");
        }
        Ok(opened)
    }

    fn open_wall(&mut self, cell: usize, heading: Heading) -> bool {
        if self.walls[cell] & heading.wall_bit() != 0 {
            return false;
        }
        // only called on validated runs, so the neighbour exists
        let Some(next) = self.grid.neighbor(cell, heading) else {
            return false;
        };
        self.walls[cell] |= heading.wall_bit();
        self.walls[next] |= heading.opposite().wall_bit();
        true
    }

    fn connect_all(&mut self, cells: &[usize]) {
        let n = self.grid.cell_count();
        for &a in cells {
            for &b in cells {
                if a != b {
                    self.edges[a * n + b] = true;
                }
            }
        }
    }

    /// Share of the grid the robot has stood on, in percent.
    pub fn percentage_visited(&self) -> f64 {
        100.0 * self.visited.len() as f64 / self.grid.cell_count() as f64
    }

    pub fn reward_of(&self, cell: usize) -> i32 {
        self.rewards[cell]
    }

    pub fn walls(&self, cell: usize) -> u8 {
        self.walls[cell]
    }

    pub fn is_open(&self, cell: usize, heading: Heading) -> bool {
        self.walls[cell] & heading.wall_bit() != 0
    }

    pub fn is_visited(&self, cell: usize) -> bool {
        self.visited.contains(&cell)
    }

    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        let n = self.grid.cell_count();
        from < n && to < n && self.edges[from * n + to]
    }

    /// Cells one bounded move away from `cell`, in ascending order.
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.grid.cell_count();
        let row = &self.edges[cell * n..(cell + 1) * n];
        row.iter().enumerate().filter(|(_, linked)| **linked).map(|(to, _)| to)
    }

    pub fn has_any_edge(&self, cell: usize) -> bool {
        self.neighbors(cell).next().is_some()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|linked| **linked).count()
    }

    /// Runs Floyd-Warshall over the current graph. Cubic in the cell count,
    /// so this belongs at the end of exploration, not in the step loop.
    pub fn build_shortest_path_tree(&mut self) {
        let tree = ShortestPathTree::build(self.grid.cell_count(), &self.edges);
        info!(cells = tree.nodes(), edges = self.edge_count(), "built shortest-path tree");
        self.tree = Some(tree);
    }

    pub fn shortest_path_tree(&self) -> Option<&ShortestPathTree> {
        self.tree.as_ref()
    }

    pub fn reconstruct_path(&self, from: usize, to: usize) -> Result<Vec<usize>, PlannerError> {
        self.grid.check(from)?;
        self.grid.check(to)?;
        self.tree.as_ref().ok_or(PlannerError::TreeNotBuilt)?.path(from, to)
    }
}

/// Concentric rings: `-(dim / 2)` on the border, rising by one per ring to
/// `-1` on the centre block.
fn reward_for(grid: Grid, cell: usize) -> i32 {
    let half = (grid.dim() / 2) as i32;
    -(half - grid.depth(cell) as i32)
}
