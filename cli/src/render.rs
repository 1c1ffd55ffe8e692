use minegrid_core::{Board, Cell, SessionStatus};

fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell { is_flagged: true, .. } => 'F',
        Cell { is_revealed: false, .. } => '#',
        Cell { is_mine: true, .. } => '*',
        Cell { surrounding_mines: 0, .. } => '.',
        Cell { surrounding_mines, .. } => char::from(b'0' + surrounding_mines),
    }
}

/// Plain text dump of the board, one row per line with column indices on top.
pub fn board_text(board: &Board) -> String {
    let mut out = String::from("    ");
    for col in 0..board.cols() {
        out.push_str(&format!("{:>3}", col));
    }
    out.push('\n');

    for row in 0..board.rows() {
        out.push_str(&format!("{:>3} ", row));
        for col in 0..board.cols() {
            out.push_str(&format!("{:>3}", cell_glyph(board[(row, col)])));
        }
        out.push('\n');
    }
    out
}

pub fn status_text(status: &SessionStatus) -> String {
    let state = if status.is_game_won {
        "won"
    } else if status.is_game_over {
        "lost"
    } else {
        "playing"
    };
    format!(
        "state: {}, flags left: {}, undo {}",
        state,
        status.flags_remaining,
        if status.has_pending_undo {
            "available"
        } else {
            "unavailable"
        }
    )
}
