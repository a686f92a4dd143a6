use rand::Rng;

use crate::generators::GenerationStatus;
use crate::maze::{Coord, Maze};

/// Iterative recursive-backtracker carving, advanced one step at a time so the
/// caller can draw the maze between steps.
pub struct Backtracker<R: Rng> {
    rng: R,
    /// The cell the carver is standing on
    current: Coord,
    /// Visited cells that may still have unvisited neighbors
    stack: Vec<Coord>,
    /// Number of distinct cells visited so far
    visited: usize,
    status: GenerationStatus,
}

impl<R: Rng> Backtracker<R> {
    /// Starts carving from the top-left cell.
    pub fn new(maze: &Maze, rng: R) -> Self {
        Self::with_start(maze, (0, 0), rng)
    }

    /// Starts carving from `start`. An empty maze or an out-of-bounds start
    /// yields a generator that is already done.
    pub fn with_start(maze: &Maze, start: Coord, rng: R) -> Self {
        let status = if maze.is_in_bounds(start) {
            GenerationStatus::Carving
        } else {
            tracing::warn!("Start {:?} is outside the maze, nothing to carve", start);
            GenerationStatus::Done
        };
        Backtracker {
            rng,
            current: start,
            stack: Vec::with_capacity(maze.len()),
            visited: maze.cells().filter(|c| c.visited).count(),
            status,
        }
    }

    pub fn current(&self) -> Coord {
        self.current
    }

    pub fn stack(&self) -> &[Coord] {
        &self.stack
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status == GenerationStatus::Done
    }

    /// Performs one carving step on `maze`.
    ///
    /// Generation is done on the step that visits the last unvisited cell. The
    /// maze must be the one this generator was created for.
    pub fn step(&mut self, maze: &mut Maze) -> GenerationStatus {
        if self.is_done() {
            return self.status;
        }

        if maze.set_visited(self.current) {
            self.visited += 1;
        }
        if self.visited >= maze.len() {
            return self.finish();
        }

        let unvisited = maze
            .grid_neighbors(self.current)
            .filter(|&(x, y)| maze.cell_at(x, y).is_some_and(|c| !c.visited))
            .collect::<Vec<_>>();

        if !unvisited.is_empty() {
            let next = unvisited[self.rng.random_range(0..unvisited.len())];
            tracing::trace!("[generator] carving {:?} -> {:?}", self.current, next);
            self.stack.push(self.current);
            maze.remove_wall_between(self.current, next);
            self.current = next;
        } else if let Some(previous) = self.stack.pop() {
            tracing::trace!("[generator] backtracking {:?} -> {:?}", self.current, previous);
            self.current = previous;
        } else {
            // Only reachable when part of the grid is cut off from the start
            return self.finish();
        }

        debug_assert!(maze.is_in_bounds(self.current));
        self.status
    }

    /// Steps until done. Returns the number of steps taken.
    pub fn run_to_completion(&mut self, maze: &mut Maze) -> usize {
        let mut steps = 0;
        while !self.is_done() {
            self.step(maze);
            steps += 1;
        }
        steps
    }

    fn finish(&mut self) -> GenerationStatus {
        tracing::debug!(
            "[generator] done after visiting {} cells, {} left on stack",
            self.visited,
            self.stack.len()
        );
        self.stack.clear();
        self.status = GenerationStatus::Done;
        self.status
    }
}
