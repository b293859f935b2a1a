use crate::direction::Heading;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error("maze dimension must be a positive even number, got {0}")]
    InvalidDimension(usize),
    #[error("cell {cell} is outside the {dim}x{dim} grid")]
    CellOutOfRange { cell: usize, dim: usize },
    #[error("sensor run of {run} heading {heading} from cell {cell} leaves the grid")]
    MalformedSensorData {
        cell: usize,
        heading: Heading,
        run: usize,
    },
    #[error("cell {to} is not reachable from cell {from}")]
    UnreachableTarget { from: usize, to: usize },
    #[error("shortest-path tree has not been built yet")]
    TreeNotBuilt,
    #[error("race step {step} is past the end of a {len}-move plan")]
    RacePathExhausted { step: usize, len: usize },
    #[error("turning from {from} to {to} needs a 180 degree rotation")]
    UnsupportedRotation { from: Heading, to: Heading },
    #[error("cell {to} is not within {cap} straight cells of cell {from}")]
    NotAdjacent { from: usize, to: usize, cap: usize },
    #[error("no goal cell has been found yet")]
    GoalNotFound,
}
