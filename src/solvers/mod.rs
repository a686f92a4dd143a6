pub mod astar;
pub mod dijkstra;
mod frontier;
pub mod path;

use crate::maze::{Coord, Grid, Maze};
use frontier::Frontier;
pub use path::{PathError, reconstruct_path};

/// Cost of a cell the search has not reached yet.
pub const UNREACHED: u32 = u32::MAX;

/// Bookkeeping one search keeps for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRecord {
    /// Steps from the start along the best route found so far
    pub cost_so_far: u32,
    /// Estimated steps remaining to the goal
    pub heuristic: u32,
    /// `cost_so_far + heuristic`
    pub total_cost: u32,
    /// The cell this one was reached from
    pub predecessor: Option<Coord>,
}

impl Default for SearchRecord {
    fn default() -> Self {
        SearchRecord {
            cost_so_far: UNREACHED,
            heuristic: 0,
            total_cost: UNREACHED,
            predecessor: None,
        }
    }
}

/// Per-search working storage, one record per maze cell.
///
/// A fresh state is built for every search, so two runs never share records
/// and the maze itself stays read-only while searching.
#[derive(Debug, Clone)]
pub struct SearchState {
    records: Grid<SearchRecord>,
}

impl SearchState {
    pub fn new(width: u8, height: u8) -> Self {
        SearchState {
            records: Grid::new(width, height, SearchRecord::default()),
        }
    }

    pub fn record(&self, coord: Coord) -> Option<&SearchRecord> {
        self.records.get(coord)
    }

    pub fn record_mut(&mut self, coord: Coord) -> Option<&mut SearchRecord> {
        self.records.get_mut(coord)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of cells the search assigned a finite cost to.
    pub fn reached(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.cost_so_far != UNREACHED)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dijkstra,
    AStar,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl Solver {
    pub const ALL: [Solver; 2] = [Solver::Dijkstra, Solver::AStar];

    /// Estimated remaining steps from `coord` to `goal`.
    fn estimate(self, coord: Coord, goal: Coord) -> u32 {
        match self {
            Solver::Dijkstra => 0,
            Solver::AStar => astar::manhattan(coord, goal),
        }
    }
}

/// Result of a single search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub solver: Solver,
    /// Cells from start to goal, both included. Empty when the goal is unreachable.
    pub path: Vec<Coord>,
    /// Number of cells taken off the frontier and expanded
    pub expanded: usize,
    /// Final bookkeeping of the run, for inspection and drawing
    pub state: SearchState,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of steps along the path, or `None` when no path was found.
    pub fn cost(&self) -> Option<u32> {
        self.path.len().checked_sub(1).map(|n| n as u32)
    }
}

/// Runs `solver` from `start` to `goal` through the open passages of `maze`.
pub fn solve(maze: &Maze, start: Coord, goal: Coord, solver: Solver) -> SearchOutcome {
    let mut state = SearchState::new(maze.width(), maze.height());
    if !maze.is_in_bounds(start) || !maze.is_in_bounds(goal) {
        tracing::warn!(
            "[{}] start {:?} or goal {:?} is outside the {}x{} maze",
            solver,
            start,
            goal,
            maze.width(),
            maze.height()
        );
        return SearchOutcome {
            solver,
            path: Vec::new(),
            expanded: 0,
            state,
        };
    }

    // Cells whose neighbors have already been relaxed
    let mut closed = Grid::new(maze.width(), maze.height(), false);
    let mut frontier = Frontier::default();
    let mut expanded = 0;

    let heuristic = solver.estimate(start, goal);
    state.records[start] = SearchRecord {
        cost_so_far: 0,
        heuristic,
        total_cost: heuristic,
        predecessor: None,
    };
    frontier.push(heuristic, start);

    while let Some((_, current)) = frontier.pop() {
        if std::mem::replace(&mut closed[current], true) {
            // Stale entry, the cell was expanded through a cheaper route
            continue;
        }
        expanded += 1;

        if current == goal {
            let path = match reconstruct_path(&state, start, goal) {
                Ok(path) => path,
                Err(e) => {
                    tracing::error!("[{}] failed to reconstruct path: {}", solver, e);
                    Vec::new()
                }
            };
            tracing::debug!(
                "[{}] reached {:?} from {:?}: {} cells, {} expanded",
                solver,
                goal,
                start,
                path.len(),
                expanded
            );
            return SearchOutcome {
                solver,
                path,
                expanded,
                state,
            };
        }

        // Uniform cost for each step
        let next_cost = state.records[current].cost_so_far + 1;
        for neighbor in maze.open_neighbors(current) {
            let record = &mut state.records[neighbor];
            if next_cost < record.cost_so_far {
                record.predecessor = Some(current);
                record.cost_so_far = next_cost;
                record.heuristic = solver.estimate(neighbor, goal);
                record.total_cost = next_cost + record.heuristic;
                frontier.push(record.total_cost, neighbor);
            }
        }
    }

    tracing::debug!(
        "[{}] no path from {:?} to {:?} after expanding {} cells",
        solver,
        start,
        goal,
        expanded
    );
    SearchOutcome {
        solver,
        path: Vec::new(),
        expanded,
        state,
    }
}

/// Both searches run against the same start and goal.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub dijkstra: SearchOutcome,
    pub astar: SearchOutcome,
}

impl Comparison {
    /// Whether both searches returned the same sequence of cells.
    pub fn paths_agree(&self) -> bool {
        self.dijkstra.path == self.astar.path
    }
}

/// Runs Dijkstra and A* from `start` to `goal`, each on its own fresh state.
pub fn compare(maze: &Maze, start: Coord, goal: Coord) -> Comparison {
    let comparison = Comparison {
        dijkstra: solve(maze, start, goal, Solver::Dijkstra),
        astar: solve(maze, start, goal, Solver::AStar),
    };
    tracing::info!(
        "Target {:?}: Dijkstra {} cells / {} expanded, A* {} cells / {} expanded",
        goal,
        comparison.dijkstra.path.len(),
        comparison.dijkstra.expanded,
        comparison.astar.path.len(),
        comparison.astar.expanded
    );
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_maze;

    fn generated(width: u8, height: u8, seed: u64) -> Maze {
        let mut maze = Maze::new(width, height);
        generate_maze(&mut maze, Some(seed));
        maze
    }

    fn is_open_path(maze: &Maze, path: &[Coord]) -> bool {
        path.windows(2)
            .all(|pair| maze.wall_between(pair[0], pair[1]) == Some(false))
    }

    fn is_simple(path: &[Coord]) -> bool {
        let unique = path.iter().collect::<std::collections::HashSet<_>>();
        unique.len() == path.len()
    }

    #[test]
    fn test_both_solvers_agree_on_generated_mazes() {
        for seed in 0..10 {
            let maze = generated(4, 4, seed);
            for goal in maze.cells().map(|c| c.coord()) {
                let comparison = compare(&maze, (0, 0), goal);
                assert!(comparison.dijkstra.is_found());
                assert!(comparison.paths_agree());
                assert_eq!(comparison.dijkstra.cost(), comparison.astar.cost());
            }
        }
    }

    #[test]
    fn test_every_pair_has_one_simple_open_path() {
        let maze = generated(5, 4, 17);
        let coords = maze.cells().map(|c| c.coord()).collect::<Vec<_>>();
        for &start in &coords {
            for &goal in &coords {
                for solver in Solver::ALL {
                    let outcome = solve(&maze, start, goal, solver);
                    assert_eq!(outcome.path.first(), Some(&start));
                    assert_eq!(outcome.path.last(), Some(&goal));
                    assert!(is_open_path(&maze, &outcome.path));
                    assert!(is_simple(&outcome.path));
                }
            }
        }
    }

    #[test]
    fn test_disconnected_grid_has_no_path() {
        let maze = Maze::new(3, 3);
        for solver in Solver::ALL {
            let outcome = solve(&maze, (0, 0), (2, 2), solver);
            assert!(outcome.path.is_empty());
            assert_eq!(outcome.cost(), None);
            assert_eq!(outcome.expanded, 1);
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let maze = generated(3, 3, 2);
        for solver in Solver::ALL {
            let outcome = solve(&maze, (1, 2), (1, 2), solver);
            assert_eq!(outcome.path, vec![(1, 2)]);
            assert_eq!(outcome.cost(), Some(0));
            assert_eq!(outcome.state.record((1, 2)).map(|r| r.cost_so_far), Some(0));
        }
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let maze = generated(3, 3, 2);
        for solver in Solver::ALL {
            assert!(solve(&maze, (0, 0), (3, 0), solver).path.is_empty());
            assert!(solve(&maze, (0, 9), (0, 0), solver).path.is_empty());
        }
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let maze = generated(6, 6, 8);
        let first = solve(&maze, (0, 0), (5, 5), Solver::AStar);
        let second = solve(&maze, (0, 0), (0, 1), Solver::AStar);
        let again = solve(&maze, (0, 0), (5, 5), Solver::AStar);
        assert_eq!(first.path, again.path);
        assert_eq!(first.expanded, again.expanded);
        assert_eq!(second.path.last(), Some(&(0, 1)));
        assert_eq!(second.state.record((0, 0)).and_then(|r| r.predecessor), None);
    }

    #[test]
    fn test_partial_grid_with_open_corridor() {
        // A single corridor along the top row, everything else closed off
        let mut maze = Maze::new(4, 3);
        for x in 0..3 {
            maze.remove_wall_between((x, 0), (x + 1, 0));
        }
        for solver in Solver::ALL {
            let outcome = solve(&maze, (0, 0), (3, 0), solver);
            assert_eq!(outcome.path, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
            assert!(solve(&maze, (0, 0), (3, 2), solver).path.is_empty());
        }
    }

    #[test]
    fn test_astar_expands_no_more_than_dijkstra() {
        let maze = generated(16, 16, 21);
        let comparison = compare(&maze, (0, 0), (15, 15));
        assert!(comparison.paths_agree());
        assert!(comparison.astar.expanded <= comparison.dijkstra.expanded);
    }
}
