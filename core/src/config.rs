use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Builds a config, rejecting empty boards and mine counts outside
    /// `1..rows*cols`.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let total = self.total_cells();
        if total == 0 || self.mines == 0 || self.mines >= total {
            return Err(GameError::InvalidConfiguration {
                rows: self.rows,
                cols: self.cols,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        preset.config()
    }
}

/// Fixed board setups offered to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Easy, Preset::Medium, Preset::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(8, 8, 10),
            Self::Medium => GameConfig::new_unchecked(9, 9, 12),
            Self::Hard => GameConfig::new_unchecked(10, 9, 15),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown preset `{0}`, expected one of: easy, medium, hard")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPreset(s.to_owned()))
    }
}

/// When a game counts as won.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Every safe cell revealed, or every mine flagged.
    RevealOrFlagAll,
    /// Every safe cell revealed. Flags never decide the game.
    RevealAll,
}

impl Default for WinCondition {
    fn default() -> Self {
        Self::RevealOrFlagAll
    }
}

/// How undoing a flag change moves the flag counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoFlagAccounting {
    /// Any change of flagged-ness gives one flag back, in both directions.
    AlwaysRefund,
    /// Removing a flag gives one back, restoring a flag takes one.
    Symmetric,
}

impl Default for UndoFlagAccounting {
    fn default() -> Self {
        Self::AlwaysRefund
    }
}

/// Whether the flag counter limits placing flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagLimit {
    /// The counter is informational and may go negative.
    Unbounded,
    /// No new flag once the counter reaches zero.
    MineCount,
}

impl Default for FlagLimit {
    fn default() -> Self {
        Self::Unbounded
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub win_condition: WinCondition,
    pub undo_flag_accounting: UndoFlagAccounting,
    pub flag_limit: FlagLimit,
}
