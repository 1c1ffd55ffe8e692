use core::ops::Index;

use ndarray::Array2;
use serde::Serialize;

use crate::types::grid_size;
use crate::*;

/// The grid of cells for one game, with mines and adjacency counts fixed at
/// construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    pub fn from_layout(layout: &MineLayout) -> Self {
        let size = layout.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if layout.contains_mine(coords) {
                Cell::mine()
            } else {
                Cell::safe(layout.adjacent_mine_count(coords))
            }
        });

        Self {
            cells,
            mine_count: layout.mine_count(),
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        let (row, col) = coords;
        if row < rows && col < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All cells in row-major order with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_mine)
            .map(|(coords, _)| coords)
            .collect()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine || cell.is_revealed)
    }

    pub fn all_mines_flagged(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| !cell.is_mine || cell.is_flagged)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Opens every mine, dropping any flag on it. Other cells are untouched.
    pub(crate) fn reveal_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
            cell.is_flagged = false;
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
