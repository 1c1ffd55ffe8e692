use serde::{Deserialize, Serialize};

/// State of one grid position.
///
/// Cells are handed out by value, so a copy is the read-only view callers get
/// of the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    /// Mines in the 8-neighbourhood. Always 0 for mines.
    pub surrounding_mines: u8,
    pub is_revealed: bool,
    pub is_flagged: bool,
}

impl Cell {
    pub const fn mine() -> Self {
        Self {
            is_mine: true,
            surrounding_mines: 0,
            is_revealed: false,
            is_flagged: false,
        }
    }

    pub const fn safe(surrounding_mines: u8) -> Self {
        Self {
            is_mine: false,
            surrounding_mines,
            is_revealed: false,
            is_flagged: false,
        }
    }

    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Whether a reveal on this cell opens its neighbours too.
    pub const fn is_empty(self) -> bool {
        !self.is_mine && self.surrounding_mines == 0
    }
}
