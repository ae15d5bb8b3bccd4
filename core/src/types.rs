/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine, flag, and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional position `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Conversion of a board position into an `ndarray` index.
pub trait GridIndex {
    fn grid_index(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn grid_index(self) -> [usize; 2] {
        let (row, col) = self;
        [usize::from(row), usize::from(col)]
    }
}

/// Number of tiles on a board of `size`.
pub const fn area(size: Coord2) -> CellCount {
    (size.0 as CellCount) * (size.1 as CellCount)
}

/// `(d_row, d_col)` offsets, clockwise starting south.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),   // S
    (1, -1),  // SW
    (0, -1),  // W
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 1),   // SE
];

fn step(axis: Coord, delta: i8, len: Coord) -> Option<Coord> {
    axis.checked_add_signed(delta).filter(|&next| next < len)
}

/// In-bounds neighbours of a position, in [`DIRECTIONS`] order.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    directions: std::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            directions: DIRECTIONS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (row, col) = self.center;
        let (rows, cols) = self.bounds;
        self.directions
            .by_ref()
            .find_map(|&(d_row, d_col)| Some((step(row, d_row, rows)?, step(col, d_col, cols)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
        assert_eq!(NeighborIter::new((1, 2), (3, 3)).count(), 5);
    }

    #[test]
    fn interior_walks_clockwise_from_south() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(
            neighbors,
            vec![
                (2, 1),
                (2, 0),
                (1, 0),
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
    }

    #[test]
    fn single_tile_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).next(), None);
    }

    #[test]
    fn area_fits_largest_board() {
        assert_eq!(area((3, 4)), 12);
        assert_eq!(area((Coord::MAX, Coord::MAX)), 65025);
    }

    #[test]
    fn grid_index_is_row_major() {
        assert_eq!((2, 7).grid_index(), [2, 7]);
    }
}
