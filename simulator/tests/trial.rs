use std::path::{Path, PathBuf};

use maze_planner::{Command, MOVE_CAP, PlannerConfig, Robot, Rotation};
use maze_simulator::{Maze, MazeService, Trial, TrialConfig};

fn bundled(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("mazes").join(name)
}

const MAZES: [&str; 3] = ["test_maze_01.txt", "test_maze_02.txt", "test_maze_03.txt"];

#[test]
fn bundled_mazes_are_solved_for_several_seeds() {
    for name in MAZES {
        let maze = Maze::from_file(bundled(name)).unwrap();
        let trial = Trial::new(&maze, TrialConfig::default()).unwrap();
        for seed in 0..5 {
            let outcome = trial.run(PlannerConfig::default().with_seed(seed)).unwrap();
            assert!(outcome.completed(), "{name} seed {seed}: {outcome:?}");
            assert!(outcome.visited_percentage >= 40.0);
        }
    }
}

#[test]
fn race_follows_the_precomputed_plan() {
    for name in MAZES {
        let maze = Maze::from_file(bundled(name)).unwrap();
        let trial = Trial::new(&maze, TrialConfig::default()).unwrap();
        let mut robot = Robot::new(maze.dim(), PlannerConfig::default()).unwrap();

        let outcome = trial.run_robot(&mut robot).unwrap();
        let plan = robot.planner().race_commands();

        assert!(robot.is_racing());
        assert!(!plan.is_empty());
        // the route may cross another goal cell before its end
        assert!(outcome.race_steps.unwrap() <= plan.len(), "{name}");
        for command in plan {
            let Command::Move { rotation, movement } = command else {
                panic!("reset inside the race plan of {name}");
            };
            assert!(matches!(rotation, Rotation::CounterClockwise | Rotation::None | Rotation::Clockwise));
            assert!(movement != 0 && movement.unsigned_abs() as usize <= MOVE_CAP);
        }
    }
}

#[test]
fn low_threshold_run_is_reproducible() {
    let maze = Maze::from_file(bundled("test_maze_02.txt")).unwrap();
    let trial = Trial::new(&maze, TrialConfig::default()).unwrap();

    for seed in [0, 9] {
        let outcome = trial
            .run(PlannerConfig::default().with_threshold(20.0).with_seed(seed))
            .unwrap();
        assert_eq!(outcome.exploration_steps, Some(42));
        assert_eq!(outcome.race_steps, Some(15));
        assert!((outcome.score.unwrap() - 16.4).abs() < 1e-9);
    }
}

#[test]
fn open_field_is_solved() {
    let maze = Maze::open_field(6).unwrap();
    let trial = Trial::new(&maze, TrialConfig::default()).unwrap();
    let outcome = trial.run(PlannerConfig::default()).unwrap();

    assert_eq!(outcome.exploration_steps, Some(15));
    assert_eq!(outcome.race_steps, Some(2));
}

#[test]
fn json_config_drives_the_trial() {
    let maze = Maze::from_file(bundled("test_maze_03.txt")).unwrap();
    let config = PlannerConfig::from_json(r#"{ "visited_threshold": 10.0 }"#).unwrap();
    let trial: Trial<'_, Maze> = Trial::new(&maze, TrialConfig::default()).unwrap();

    let outcome = trial.run(config).unwrap();
    assert_eq!(outcome.exploration_steps, Some(31));
    assert_eq!(outcome.race_steps, Some(14));
}
