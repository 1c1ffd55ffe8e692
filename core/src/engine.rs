use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Lost,
    Won,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Outcome of a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Game already over, or the cell is flagged.
    NoChange,
    AlreadyRevealed,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// The caller tapped a cell that was open already.
    pub const fn already_revealed(self) -> bool {
        matches!(self, Self::AlreadyRevealed)
    }

    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            AlreadyRevealed => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UndoOutcome {
    NoChange,
    Restored,
}

impl UndoOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Restored)
    }
}

/// Cell value captured right before the last reveal or flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub coords: Coord2,
    pub previous: Cell,
}

/// Session-level values a UI needs besides the cells themselves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub state: GameState,
    pub is_game_over: bool,
    pub is_game_won: bool,
    pub flags_remaining: isize,
    pub has_pending_undo: bool,
}

/// One game from construction until the next restart.
///
/// Mutated only through [`reveal`](Self::reveal),
/// [`toggle_flag`](Self::toggle_flag), [`undo`](Self::undo) and
/// [`restart`](Self::restart). Rejected moves are reported as `NoChange`
/// outcomes, never as errors; errors are reserved for coordinates outside the
/// board.
#[derive(Clone, Debug)]
pub struct Session<G = RandomMinefieldGenerator> {
    config: GameConfig,
    rules: Rules,
    board: Board,
    state: GameState,
    flags_remaining: isize,
    last_move: Option<LastMove>,
    undo_used: bool,
    generator: G,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rules(config, Rules::default())
    }

    pub fn with_rules(config: GameConfig, rules: Rules) -> Result<Self> {
        Self::with_generator(config, rules, RandomMinefieldGenerator::from_entropy())
    }

    /// Reproducible session: the first layout and every restart layout derive
    /// from `seed`.
    pub fn with_seed(config: GameConfig, rules: Rules, seed: u64) -> Result<Self> {
        Self::with_generator(config, rules, RandomMinefieldGenerator::new(seed))
    }

    /// Starts from a prepared layout. Restarts are random.
    pub fn from_layout(layout: &MineLayout, rules: Rules) -> Result<Self> {
        let config = layout.game_config();
        config.validate()?;
        Ok(Self::from_parts(
            config,
            rules,
            Board::from_layout(layout),
            RandomMinefieldGenerator::from_entropy(),
        ))
    }
}

impl<G: MinefieldGenerator> Session<G> {
    pub fn with_generator(config: GameConfig, rules: Rules, mut generator: G) -> Result<Self> {
        let layout = generator.generate(config)?;
        Ok(Self::from_parts(
            config,
            rules,
            Board::from_layout(&layout),
            generator,
        ))
    }

    fn from_parts(config: GameConfig, rules: Rules, board: Board, generator: G) -> Self {
        log::debug!(
            "New session: {}x{} with {} mines, {:?}",
            config.rows,
            config.cols,
            config.mines,
            rules
        );
        Self {
            config,
            rules,
            board,
            state: GameState::Playing,
            flags_remaining: config.mines as isize,
            last_move: None,
            undo_used: false,
            generator,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// True once a mine has been revealed.
    pub fn is_game_over(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub fn is_game_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn flags_remaining(&self) -> isize {
        self.flags_remaining
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn undo_used(&self) -> bool {
        self.undo_used
    }

    pub fn has_pending_undo(&self) -> bool {
        self.last_move.is_some() && !self.undo_used
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.board.cell(coords)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state,
            is_game_over: self.is_game_over(),
            is_game_won: self.is_game_won(),
            flags_remaining: self.flags_remaining,
            has_pending_undo: self.has_pending_undo(),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        let cell = self.board[coords];

        if self.state.is_finished() || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }
        if cell.is_revealed {
            return Ok(RevealOutcome::AlreadyRevealed);
        }

        self.last_move = Some(LastMove {
            coords,
            previous: cell,
        });
        self.board.cell_mut(coords).is_revealed = true;
        log::debug!("Revealed {:?}: {:?}", coords, self.board[coords]);

        if cell.is_mine {
            self.board.reveal_mines();
            self.end_game(GameState::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        if cell.is_empty() {
            self.cascade_from(coords);
        }

        Ok(if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Opens the region connected to an empty cell, including its numbered
    /// border.
    ///
    /// Cells are opened depth first, neighbors in row-major order, and each
    /// opened cell replaces the undo snapshot. Undo after a cascade therefore
    /// hides the last cell the cascade opened.
    fn cascade_from(&mut self, origin: Coord2) {
        let mut to_visit: Vec<Coord2> = Vec::new();
        self.push_candidates(origin, &mut to_visit);
        log::trace!(
            "Starting cascade from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(coords) = to_visit.pop() {
            let cell = self.board[coords];
            // pushed more than once before being opened
            if !cell.is_hidden() {
                continue;
            }
            self.last_move = Some(LastMove {
                coords,
                previous: cell,
            });
            self.board.cell_mut(coords).is_revealed = true;
            log::trace!("Cascade opened {:?}, {} adjacent", coords, cell.surrounding_mines);

            if cell.is_empty() {
                self.push_candidates(coords, &mut to_visit);
            }
        }
    }

    /// Pushes the hidden safe neighbors of `coords` so that the first one in
    /// row-major order is popped first.
    fn push_candidates(&self, coords: Coord2, to_visit: &mut Vec<Coord2>) {
        let start = to_visit.len();
        to_visit.extend(self.cascade_candidates(coords));
        to_visit[start..].reverse();
    }

    fn cascade_candidates(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.board
            .iter_neighbors(coords)
            .filter(|&pos| {
                let cell = self.board[pos];
                cell.is_hidden() && !cell.is_mine
            })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        let cell = self.board[coords];

        if self.state.is_finished() || cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }
        if !cell.is_flagged
            && self.rules.flag_limit == FlagLimit::MineCount
            && self.flags_remaining <= 0
        {
            log::debug!("No flags left for {:?}", coords);
            return Ok(MarkOutcome::NoChange);
        }

        self.last_move = Some(LastMove {
            coords,
            previous: cell,
        });
        let flagged = !cell.is_flagged;
        self.board.cell_mut(coords).is_flagged = flagged;
        self.flags_remaining += if flagged { -1 } else { 1 };
        log::debug!(
            "{} {:?}, {} flags remaining",
            if flagged { "Flagged" } else { "Unflagged" },
            coords,
            self.flags_remaining
        );

        Ok(if self.check_win() {
            MarkOutcome::Won
        } else {
            MarkOutcome::Changed
        })
    }

    /// Puts back the cell captured by the last reveal or flag toggle.
    ///
    /// Works once per session. Only the snapshotted cell is restored: after a
    /// cascade that is the last cell it opened, and the rest of the region stays
    /// open. Mines opened by a loss stay open and the game state is kept.
    pub fn undo(&mut self) -> UndoOutcome {
        if self.undo_used {
            return UndoOutcome::NoChange;
        }
        let Some(LastMove { coords, previous }) = self.last_move.take() else {
            return UndoOutcome::NoChange;
        };

        let current = self.board[coords];
        *self.board.cell_mut(coords) = previous;

        if previous.is_flagged != current.is_flagged {
            self.flags_remaining += match self.rules.undo_flag_accounting {
                UndoFlagAccounting::AlwaysRefund => 1,
                UndoFlagAccounting::Symmetric if previous.is_flagged => -1,
                UndoFlagAccounting::Symmetric => 1,
            };
        }

        self.undo_used = true;
        log::debug!(
            "Undo restored {:?}, {} flags remaining",
            coords,
            self.flags_remaining
        );
        UndoOutcome::Restored
    }

    /// Discards the board and starts over on a fresh layout with the same
    /// config and rules.
    pub fn restart(&mut self) -> Result<()> {
        let layout = self.generator.generate(self.config)?;
        self.board = Board::from_layout(&layout);
        self.state = GameState::Playing;
        self.flags_remaining = self.config.mines as isize;
        self.last_move = None;
        self.undo_used = false;
        log::debug!("Session restarted");
        Ok(())
    }

    fn check_win(&mut self) -> bool {
        let won = match self.rules.win_condition {
            WinCondition::RevealOrFlagAll => {
                self.board.all_safe_revealed() || self.board.all_mines_flagged()
            }
            WinCondition::RevealAll => self.board.all_safe_revealed(),
        };
        if won {
            self.end_game(GameState::Won);
        }
        won
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }
        log::debug!("Game ended: {:?}", state);
        self.state = state;
    }
}
