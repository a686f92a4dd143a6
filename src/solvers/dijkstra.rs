use super::{Solver, solve};
use crate::maze::{Coord, Maze};

/// Uniform-cost search: the frontier is ordered by steps taken from `start`.
/// Returns the cells from `start` to `goal`, or an empty path if `goal` is unreachable.
pub fn search(maze: &Maze, start: Coord, goal: Coord) -> Vec<Coord> {
    solve(maze, start, goal, Solver::Dijkstra).path
}
