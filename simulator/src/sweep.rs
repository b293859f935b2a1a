use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use maze_planner::PlannerConfig;

use crate::maze::Maze;
use crate::trial::{Trial, TrialConfig};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub maze: String,
    pub threshold: f64,
    /// Mean over the trials that reached the goal in time.
    pub mean_score: Option<f64>,
    pub completed: usize,
    pub failed: usize,
}

/// Runs `repeats` trials, seeded `base_seed..base_seed + repeats`, for every
/// maze and threshold pair.
pub fn sweep(
    mazes: &[PathBuf],
    thresholds: &[f64],
    repeats: u64,
    base_seed: u64,
    config: &TrialConfig,
) -> Result<Vec<SweepResult>> {
    let mut results = Vec::with_capacity(mazes.len() * thresholds.len());

    for path in mazes {
        let maze = Maze::from_file(path).with_context(|| format!("loading {}", path.display()))?;
        let trial = Trial::new(&maze, config.clone())?;
        let name = path.display().to_string();

        for &threshold in thresholds {
            let mut scores = Vec::new();
            for seed in base_seed..base_seed + repeats {
                let planner = PlannerConfig::default().with_threshold(threshold).with_seed(seed);
                let outcome = trial
                    .run(planner)
                    .with_context(|| format!("{name}: threshold {threshold}, seed {seed}"))?;
                scores.extend(outcome.score);
            }

            let completed = scores.len();
            let mean_score = (completed > 0).then(|| scores.iter().sum::<f64>() / completed as f64);
            info!(maze = %name, threshold, ?mean_score, completed, "sweep point done");

            results.push(SweepResult {
                maze: name.clone(),
                threshold,
                mean_score,
                completed,
                failed: repeats as usize - completed,
            });
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn bundled(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("mazes").join(name)
    }

    #[test]
    fn one_result_per_maze_and_threshold() {
        let mazes = [bundled("test_maze_02.txt"), bundled("test_maze_03.txt")];
        let results = sweep(&mazes, &[10.0, 20.0], 2, 0, &TrialConfig::default()).unwrap();

        assert_eq!(results.len(), 4);
        assert!(results[0].maze.ends_with("test_maze_02.txt"));
        assert_eq!(results[1].threshold, 20.0);
        for result in &results {
            assert_eq!(result.completed + result.failed, 2);
        }
    }

    #[test]
    fn deterministic_points_average_exactly() {
        // no visited-only choice happens before the reset at this threshold
        let results = sweep(&[bundled("test_maze_02.txt")], &[20.0], 3, 5, &TrialConfig::default()).unwrap();
        let mean = results[0].mean_score.unwrap();
        assert_eq!(results[0].completed, 3);
        assert!((mean - 16.4).abs() < 1e-9);
    }

    #[test]
    fn starved_trials_are_counted_as_failures() {
        let config = TrialConfig {
            max_time: 3,
            ..TrialConfig::default()
        };
        let results = sweep(&[bundled("test_maze_01.txt")], &[40.0], 2, 0, &config).unwrap();
        assert_eq!(results[0].failed, 2);
        assert_eq!(results[0].mean_score, None);
    }

    #[test]
    fn missing_maze_is_reported() {
        let err = sweep(&[bundled("nope.txt")], &[40.0], 1, 0, &TrialConfig::default()).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
