pub mod cell;
pub mod grid;

pub use cell::{Cell, Direction, Walls};
pub use grid::Grid;

/// Cell coordinate as `(x, y)`: column first, then row.
pub type Coord = (u8, u8);

/// A rectangular grid of cells whose wall pairs are carved into a maze.
///
/// Every wall is stored twice, once on each side. All mutation goes through
/// [`Maze::remove_wall_between`], which keeps the two flags mirrored.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid<Cell>,
}

impl Maze {
    /// Creates a maze with every wall intact and no cell visited.
    pub fn new(width: u8, height: u8) -> Self {
        Maze {
            grid: Grid::from_fn(width, height, |(x, y)| Cell::new(x, y)),
        }
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Checks if the maze has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        self.grid.is_in_bounds(coord)
    }

    /// Looks up a cell. Out-of-bounds coordinates give `None`, never a panic.
    pub fn cell_at(&self, x: u8, y: u8) -> Option<&Cell> {
        self.grid.get((x, y))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    /// Marks a cell as visited by the generator.
    /// Returns `true` only the first time a given cell is marked.
    pub fn set_visited(&mut self, coord: Coord) -> bool {
        match self.grid.get_mut(coord) {
            Some(cell) if !cell.visited => {
                cell.visited = true;
                true
            }
            _ => false,
        }
    }

    /// Grid-adjacent neighbors, regardless of walls.
    pub fn grid_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let in_bounds = self.is_in_bounds(coord);
        Direction::ALL
            .into_iter()
            .filter(move |_| in_bounds)
            .filter_map(move |d| d.step(coord))
            .filter(move |&c| self.is_in_bounds(c))
    }

    /// Neighbors reachable through an open passage, in top, right, bottom, left order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let walls = self.grid.get(coord).map(|cell| cell.walls);
        Direction::ALL
            .into_iter()
            .filter(move |&d| walls.is_some_and(|w| !w.has(d)))
            .filter_map(move |d| d.step(coord))
            .filter(move |&c| self.is_in_bounds(c))
    }

    /// Whether there is a wall between two 4-adjacent cells, as seen from `a`.
    /// `None` if either cell is out of bounds or they are not adjacent.
    pub fn wall_between(&self, a: Coord, b: Coord) -> Option<bool> {
        let (cell_a, cell_b) = (self.grid.get(a)?, self.grid.get(b)?);
        cell_a.wall_facing(cell_b)
    }

    /// Opens the wall pair between two 4-adjacent cells.
    ///
    /// Returns `false`, leaving the maze untouched, if the cells are not
    /// adjacent or lie outside the maze.
    pub fn remove_wall_between(&mut self, a: Coord, b: Coord) -> bool {
        if !self.is_in_bounds(a) || !self.is_in_bounds(b) {
            return false;
        }
        let Some(direction) = Direction::between(a, b) else {
            tracing::warn!("Refusing to remove wall between non-adjacent cells {:?} and {:?}", a, b);
            return false;
        };
        self.grid[a].walls.set(direction, false);
        self.grid[b].walls.set(direction.opposite(), false);
        true
    }

    /// Number of adjacent cell pairs with the wall between them removed.
    pub fn open_wall_pairs(&self) -> usize {
        // Count each pair once, from its left or top member.
        self.cells()
            .map(|cell| {
                let right = cell.x + 1 < self.width() && !cell.walls.right;
                let bottom = cell.y + 1 < self.height() && !cell.walls.bottom;
                right as usize + bottom as usize
            })
            .sum()
    }

    /// Checks that every interior wall is mirrored on both sides.
    pub fn is_wall_symmetric(&self) -> bool {
        self.cells().all(|cell| {
            self.grid_neighbors(cell.coord()).all(|n| {
                self.wall_between(cell.coord(), n) == self.wall_between(n, cell.coord())
            })
        })
    }

    /// Checks if every cell has been visited by the generator.
    pub fn is_fully_visited(&self) -> bool {
        self.cells().all(|cell| cell.visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_bounds() {
        let maze = Maze::new(5, 4);
        assert!(maze.cell_at(4, 3).is_some());
        assert!(maze.cell_at(5, 0).is_none());
        assert!(maze.cell_at(0, 4).is_none());
        assert_eq!(maze.cell_at(2, 3).map(|c| c.coord()), Some((2, 3)));
    }

    #[test]
    fn test_remove_wall_is_mirrored() {
        let mut maze = Maze::new(3, 3);
        assert!(maze.remove_wall_between((1, 1), (2, 1)));
        assert_eq!(maze.wall_between((1, 1), (2, 1)), Some(false));
        assert_eq!(maze.wall_between((2, 1), (1, 1)), Some(false));
        assert!(!maze.cell_at(1, 1).unwrap().walls.right);
        assert!(!maze.cell_at(2, 1).unwrap().walls.left);

        assert!(maze.remove_wall_between((1, 1), (1, 0)));
        assert!(!maze.cell_at(1, 1).unwrap().walls.top);
        assert!(!maze.cell_at(1, 0).unwrap().walls.bottom);
        assert!(maze.is_wall_symmetric());
        assert_eq!(maze.open_wall_pairs(), 2);
    }

    #[test]
    fn test_remove_wall_rejects_non_adjacent() {
        let mut maze = Maze::new(3, 3);
        assert!(!maze.remove_wall_between((0, 0), (1, 1)));
        assert!(!maze.remove_wall_between((0, 0), (0, 2)));
        assert!(!maze.remove_wall_between((2, 2), (3, 2)));
        assert_eq!(maze.open_wall_pairs(), 0);
    }

    #[test]
    fn test_grid_neighbors_corner_and_center() {
        let maze = Maze::new(3, 3);
        let corner = maze.grid_neighbors((0, 0)).collect::<Vec<_>>();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);
        let center = maze.grid_neighbors((1, 1)).collect::<Vec<_>>();
        assert_eq!(center, vec![(1, 0), (2, 1), (1, 2), (0, 1)]);
        assert_eq!(maze.grid_neighbors((3, 3)).count(), 0);
    }

    #[test]
    fn test_open_neighbors_follow_walls() {
        let mut maze = Maze::new(3, 3);
        assert_eq!(maze.open_neighbors((1, 1)).count(), 0);
        maze.remove_wall_between((1, 1), (0, 1));
        maze.remove_wall_between((1, 1), (1, 0));
        let open = maze.open_neighbors((1, 1)).collect::<Vec<_>>();
        assert_eq!(open, vec![(1, 0), (0, 1)]);
        assert_eq!(maze.open_neighbors((0, 1)).collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn test_set_visited_once() {
        let mut maze = Maze::new(2, 2);
        assert!(maze.set_visited((1, 0)));
        assert!(!maze.set_visited((1, 0)));
        assert!(!maze.set_visited((2, 0)));
        assert!(!maze.is_fully_visited());
    }
}
