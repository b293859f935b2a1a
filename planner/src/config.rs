use serde::{Deserialize, Serialize};

pub const DEFAULT_VISITED_THRESHOLD: f64 = 40.0;

/// Tunables for one planner. Missing fields in a JSON config fall back to the
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Percentage of cells that must have been visited before exploration may
    /// stop (the goal must also be known).
    pub visited_threshold: f64,
    /// Seed for the tie-break among already visited candidates.
    pub seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            visited_threshold: DEFAULT_VISITED_THRESHOLD,
            seed: 0,
        }
    }
}

impl PlannerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_threshold(mut self, visited_threshold: f64) -> Self {
        self.visited_threshold = visited_threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
