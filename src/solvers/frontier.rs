use std::{cmp::Reverse, collections::BinaryHeap};

use crate::maze::Coord;

/// Min-priority queue of discovered cells.
///
/// Entries with equal priority come out in insertion order. A cell may be
/// pushed again when a cheaper route to it is found; the older entry stays in
/// the heap and has to be skipped by the caller.
#[derive(Debug, Default)]
pub struct Frontier {
    // Using Reverse to turn the max-heap into a min-heap
    heap: BinaryHeap<Reverse<(u32, u64, Coord)>>,
    pushed: u64,
}

impl Frontier {
    pub fn push(&mut self, priority: u32, coord: Coord) {
        self.heap.push(Reverse((priority, self.pushed, coord)));
        self.pushed += 1;
    }

    pub fn pop(&mut self) -> Option<(u32, Coord)> {
        self.heap
            .pop()
            .map(|Reverse((priority, _, coord))| (priority, coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_priority_first() {
        let mut frontier = Frontier::default();
        frontier.push(5, (0, 0));
        frontier.push(1, (1, 0));
        frontier.push(3, (2, 0));
        assert_eq!(frontier.pop(), Some((1, (1, 0))));
        assert_eq!(frontier.pop(), Some((3, (2, 0))));
        assert_eq!(frontier.pop(), Some((5, (0, 0))));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let mut frontier = Frontier::default();
        frontier.push(2, (9, 9));
        frontier.push(2, (0, 0));
        frontier.push(2, (4, 1));
        assert_eq!(frontier.pop().map(|(_, c)| c), Some((9, 9)));
        assert_eq!(frontier.pop().map(|(_, c)| c), Some((0, 0)));
        assert_eq!(frontier.pop().map(|(_, c)| c), Some((4, 1)));
        assert!(frontier.pop().is_none());
    }
}
