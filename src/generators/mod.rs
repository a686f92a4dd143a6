use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

pub use recur_backtrack::Backtracker;

use crate::maze::Maze;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Progress of a stepwise maze generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Some cells are still unvisited
    Carving,
    /// Every reachable cell has been visited; the maze is a spanning tree
    Done,
}

/// Carves the whole maze in one call, starting from the top-left cell.
/// Returns the number of steps taken.
pub fn generate_maze(maze: &mut Maze, seed: Option<u64>) -> usize {
    let mut generator = Backtracker::new(maze, get_rng(seed));
    let steps = generator.run_to_completion(maze);
    tracing::info!(
        "Generated {}x{} maze in {} steps (seed: {:?})",
        maze.width(),
        maze.height(),
        steps,
        seed
    );
    steps
}
