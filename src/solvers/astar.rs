use super::{Solver, solve};
use crate::maze::{Coord, Maze};

/// Manhattan distance between two cells. Never overestimates the number of
/// steps on a 4-connected grid with unit step cost.
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}

/// Heuristic-guided search: the frontier is ordered by steps taken plus the
/// Manhattan distance to `goal`.
/// Returns the cells from `start` to `goal`, or an empty path if `goal` is unreachable.
pub fn search(maze: &Maze, start: Coord, goal: Coord) -> Vec<Coord> {
    solve(maze, start, goal, Solver::AStar).path
}
