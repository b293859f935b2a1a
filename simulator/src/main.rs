use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use maze_planner::PlannerConfig;
use maze_simulator::{Maze, Trial, TrialConfig, sweep};
use tracing::info;

#[derive(Parser)]
#[command(name = "maze-sim")]
#[command(about = "Runs the maze planner against maze files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore and race a single maze
    Run {
        /// Maze file
        maze: PathBuf,
        /// Percentage of visited cells required before racing
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        /// JSON planner config; --threshold and --seed override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "1000")]
        max_time: usize,
        /// Print the planner's map after every step
        #[arg(long)]
        render: bool,
    },
    /// Average scores over seeds for a range of thresholds
    Sweep {
        #[arg(required = true)]
        mazes: Vec<PathBuf>,
        #[arg(long, value_delimiter = ',', default_value = "40")]
        thresholds: Vec<f64>,
        #[arg(long, default_value = "5")]
        repeats: u64,
        #[arg(long, default_value = "0")]
        seed: u64,
        #[arg(long, default_value = "1000")]
        max_time: usize,
    },
}

fn load_planner_config(path: Option<&PathBuf>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    PlannerConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            maze,
            threshold,
            seed,
            config,
            max_time,
            render,
        } => {
            let mut planner = load_planner_config(config.as_ref())?;
            if let Some(threshold) = threshold {
                planner = planner.with_threshold(threshold);
            }
            if let Some(seed) = seed {
                planner = planner.with_seed(seed);
            }

            let loaded = Maze::from_file(&maze).with_context(|| format!("loading {}", maze.display()))?;
            let trial_config = TrialConfig {
                max_time,
                render,
                ..TrialConfig::default()
            };
            let trial = Trial::new(&loaded, trial_config)?;
            info!(maze = %maze.display(), threshold = planner.visited_threshold, seed = planner.seed, "starting trial");

            let outcome = trial.run(planner).context("planner failed")?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if !outcome.completed() {
                bail!("the robot did not reach the goal within {max_time} steps");
            }
        }
        Commands::Sweep {
            mazes,
            thresholds,
            repeats,
            seed,
            max_time,
        } => {
            let trial_config = TrialConfig {
                max_time,
                ..TrialConfig::default()
            };
            let results = sweep(&mazes, &thresholds, repeats, seed, &trial_config)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
