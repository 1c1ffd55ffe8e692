use ndarray::Array2;

/// Single grid axis, used for row/column counts and positions.
pub type Coord = u8;

/// Count type for mines, flags and total cells.
pub type CellCount = u16;

/// Grid position as `(row, col)`, 0-based.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

/// Shape of an `Array2` as `(rows, cols)`.
///
/// Arrays in this crate are always created from a `Coord2` size, so the
/// conversion cannot truncate.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (rows as Coord, cols as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        NeighborIter::new(center, grid_size(self))
    }
}

/// Offsets of the 3x3 window around a cell, the center excluded.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn offset_within(center: Coord2, (dr, dc): (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(dr)?;
    let col = center.1.checked_add_signed(dc)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterates the in-bounds members of a cell's 8-neighbourhood.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next_offset: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next_offset: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(self.next_offset) {
            self.next_offset += 1;
            if let Some(coords) = offset_within(self.center, offset, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}
