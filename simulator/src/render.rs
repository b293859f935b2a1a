use std::fmt::Write;

use maze_planner::{Heading, MazeModel, Pose};

/// Draws the walls the planner currently knows about.
///
/// North is up. Each cell takes two characters: its west wall and its south
/// wall, with the robot's heading glyph replacing the south wall of its cell.
/// Rows are labelled with `y`, and a ruler of `x % 10` runs along the bottom.
pub fn ascii_map(model: &MazeModel, pose: Pose) -> String {
    let grid = model.grid();
    let dim = grid.dim();
    let mut out = String::with_capacity((dim + 2) * (2 * dim + 5));

    out.push_str("   ");
    for _ in 0..dim {
        out.push_str(" _");
    }
    out.push('\n');

    for y in (0..dim).rev() {
        let _ = write!(out, "{y:02} ");
        for x in 0..dim {
            let cell = grid.index(x, y);
            out.push(if model.is_open(cell, Heading::West) { ' ' } else { '|' });
            out.push(if cell == pose.cell {
                pose.heading.glyph()
            } else if model.is_open(cell, Heading::South) {
                ' '
            } else {
                '_'
            });
        }
        out.push_str("|\n");
    }

    out.push_str("   ");
    for x in 0..dim {
        let _ = write!(out, " {}", x % 10);
    }
    out
}
