use thiserror::Error;

use super::SearchState;
use crate::maze::Coord;

/// Ways a predecessor chain can fail to lead back to the start.
///
/// Any of these means the search bookkeeping is corrupt; they never occur for a
/// terminal cell that the search actually reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The terminal cell lies outside the searched grid.
    #[error("cell {0:?} is outside the searched grid")]
    OutOfBounds(Coord),

    /// The chain stopped at a cell with no predecessor before reaching the start.
    #[error("predecessor chain stops at {0:?} before reaching the start")]
    MissingPredecessor(Coord),

    /// The chain did not reach the start within one step per cell.
    #[error("predecessor chain did not reach the start within {0} steps")]
    ChainTooLong(usize),
}

/// Walks predecessor links from `terminal` back to `start` and returns the
/// cells in start-to-terminal order, both ends included.
///
/// The walk is bounded by the number of cells, so a cyclic chain is reported
/// instead of looping forever.
pub fn reconstruct_path(
    state: &SearchState,
    start: Coord,
    terminal: Coord,
) -> Result<Vec<Coord>, PathError> {
    if state.record(terminal).is_none() {
        return Err(PathError::OutOfBounds(terminal));
    }

    let max_steps = state.len();
    let mut path = vec![terminal];
    let mut current = terminal;
    while current != start {
        if path.len() > max_steps {
            return Err(PathError::ChainTooLong(max_steps));
        }
        current = state
            .record(current)
            .and_then(|r| r.predecessor)
            .ok_or(PathError::MissingPredecessor(current))?;
        path.push(current);
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked(width: u8, height: u8, links: &[(Coord, Coord)]) -> SearchState {
        let mut state = SearchState::new(width, height);
        for &(cell, predecessor) in links {
            state.record_mut(cell).unwrap().predecessor = Some(predecessor);
        }
        state
    }

    #[test]
    fn test_reconstruct_in_start_to_terminal_order() {
        let state = linked(3, 1, &[((1, 0), (0, 0)), ((2, 0), (1, 0))]);
        assert_eq!(
            reconstruct_path(&state, (0, 0), (2, 0)),
            Ok(vec![(0, 0), (1, 0), (2, 0)])
        );
    }

    #[test]
    fn test_terminal_equal_to_start() {
        let state = SearchState::new(2, 2);
        assert_eq!(reconstruct_path(&state, (1, 1), (1, 1)), Ok(vec![(1, 1)]));
    }

    #[test]
    fn test_missing_predecessor() {
        let state = linked(3, 1, &[((2, 0), (1, 0))]);
        assert_eq!(
            reconstruct_path(&state, (0, 0), (2, 0)),
            Err(PathError::MissingPredecessor((1, 0)))
        );
    }

    #[test]
    fn test_cycle_is_bounded() {
        let state = linked(2, 1, &[((0, 0), (1, 0)), ((1, 0), (0, 0))]);
        assert_eq!(
            reconstruct_path(&state, (5, 5), (1, 0)),
            Err(PathError::ChainTooLong(2))
        );
    }

    #[test]
    fn test_out_of_bounds_terminal() {
        let state = SearchState::new(2, 2);
        assert_eq!(
            reconstruct_path(&state, (0, 0), (2, 0)),
            Err(PathError::OutOfBounds((2, 0)))
        );
    }
}
