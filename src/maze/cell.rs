use super::Coord;

/// One side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// The side of the neighboring cell that faces this one.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Direction from `from` towards `to`, if the two are 4-adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let dx = from.0 as i16 - to.0 as i16;
        let dy = from.1 as i16 - to.1 as i16;
        match (dx, dy) {
            (1, 0) => Some(Direction::Left),
            (-1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Top),
            (0, -1) => Some(Direction::Bottom),
            _ => None,
        }
    }

    /// Coordinate one step in this direction. `None` on underflow or overflow;
    /// the caller still has to check the upper bounds of the maze.
    pub fn step(self, coord: Coord) -> Option<Coord> {
        let (x, y) = coord;
        match self {
            Direction::Top => y.checked_sub(1).map(|y| (x, y)),
            Direction::Right => x.checked_add(1).map(|x| (x, y)),
            Direction::Bottom => y.checked_add(1).map(|y| (x, y)),
            Direction::Left => x.checked_sub(1).map(|x| (x, y)),
        }
    }
}

/// Wall flags of a single cell. A fresh cell is closed on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Walls {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl Walls {
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub fn set(&mut self, direction: Direction, present: bool) {
        let flag = match direction {
            Direction::Top => &mut self.top,
            Direction::Right => &mut self.right,
            Direction::Bottom => &mut self.bottom,
            Direction::Left => &mut self.left,
        };
        *flag = present;
    }
}

/// A single maze position with its walls and generation marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
    pub walls: Walls,
    pub visited: bool,
}

impl Cell {
    pub fn new(x: u8, y: u8) -> Self {
        Cell {
            x,
            y,
            walls: Walls::default(),
            visited: false,
        }
    }

    pub fn coord(&self) -> Coord {
        (self.x, self.y)
    }

    /// Whether this cell has a wall on the side facing `other`.
    /// `None` when the two cells are not 4-adjacent.
    pub fn wall_facing(&self, other: &Cell) -> Option<bool> {
        Direction::between(self.coord(), other.coord()).map(|d| self.walls.has(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between((1, 1), (0, 1)), Some(Direction::Left));
        assert_eq!(Direction::between((1, 1), (2, 1)), Some(Direction::Right));
        assert_eq!(Direction::between((1, 1), (1, 0)), Some(Direction::Top));
        assert_eq!(Direction::between((1, 1), (1, 2)), Some(Direction::Bottom));
        assert_eq!(Direction::between((1, 1), (2, 2)), None);
        assert_eq!(Direction::between((1, 1), (1, 1)), None);
        assert_eq!(Direction::between((0, 0), (0, 2)), None);
    }

    #[test]
    fn test_step_does_not_wrap() {
        assert_eq!(Direction::Left.step((0, 3)), None);
        assert_eq!(Direction::Top.step((3, 0)), None);
        assert_eq!(Direction::Right.step((u8::MAX, 0)), None);
        assert_eq!(Direction::Bottom.step((2, 2)), Some((2, 3)));
    }

    #[test]
    fn test_new_cell_is_closed() {
        let cell = Cell::new(3, 4);
        assert!(Direction::ALL.iter().all(|&d| cell.walls.has(d)));
        assert!(!cell.visited);
        assert_eq!(cell.coord(), (3, 4));
    }

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }
}
