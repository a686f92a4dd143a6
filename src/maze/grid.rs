use super::Coord;

/// Dense row-major storage for one value per maze cell.
///
/// Shared by the maze itself and by per-search bookkeeping, so both can be
/// addressed with the same `(x, y)` coordinates.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    pub data: Box<[T]>,
    width: u8,
    height: u8,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: u8, height: u8, value: T) -> Self {
        let data = vec![value; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }
}

impl<T> Grid<T> {
    /// Builds the grid by calling `init` once per coordinate, in row-major order.
    pub fn from_fn(width: u8, height: u8, mut init: impl FnMut(Coord) -> T) -> Self {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(&mut init)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, x: u8, y: u8) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Bounds-checked lookup. Out-of-range coordinates yield `None`.
    pub fn get(&self, coord: Coord) -> Option<&T> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        self.data.get(self.ravel_index(coord.0, coord.1))
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        let idx = self.ravel_index(coord.0, coord.1);
        self.data.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> std::ops::Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl<T> std::ops::IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_row_major() {
        let grid = Grid::from_fn(3, 2, |c| c);
        assert_eq!(grid.data[0], (0, 0));
        assert_eq!(grid.data[2], (2, 0));
        assert_eq!(grid.data[3], (0, 1));
        assert_eq!(grid[(1, 1)], (1, 1));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mut grid = Grid::new(4, 3, 0u32);
        assert!(grid.get((4, 0)).is_none());
        assert!(grid.get((0, 3)).is_none());
        assert!(grid.get_mut((255, 255)).is_none());
        assert_eq!(grid.get((3, 2)), Some(&0));
    }
}
