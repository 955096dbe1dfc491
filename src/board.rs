//! Board data structures: cells, the grid, and board configuration.
//!
//! Pure data with construction and validation helpers. All gameplay
//! mutation goes through `board_generation`, `board_logic`, and `session`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::SAFE_ZONE_CELLS;

/// Represents a single cell in the minefield grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    /// Whether this cell contains a mine.
    pub has_mine: bool,
    /// Whether this cell has been revealed.
    pub revealed: bool,
    /// Whether this cell has been flagged by the player.
    pub flagged: bool,
    /// Number of adjacent mines (0-8). Not maintained for mine cells.
    pub adjacent_mines: u8,
}

/// The minefield grid, indexed as `cells[row][col]`.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Grid width (number of columns).
    pub width: usize,
    /// Grid height (number of rows).
    pub height: usize,
    /// The cells, row-major.
    pub cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid of default cells: mine-free, hidden, unflagged.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::default(); width]; height],
        }
    }

    /// Whether (row, col) addresses a cell on this grid.
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }
}

/// Board parameters accepted by `GameSession::reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Grid width (number of columns).
    pub width: usize,
    /// Grid height (number of rows).
    pub height: usize,
    /// Total number of mines to place.
    pub mines: usize,
}

impl BoardConfig {
    /// Total number of cells on the board.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check that a board with these parameters can actually be played.
    ///
    /// The mine count must leave room for the 3x3 safe zone around the
    /// first revealed cell; otherwise mine placement cannot terminate.
    /// Checked here, at configuration time, never mid-game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.mines as i64 >= self.area() as i64 - SAFE_ZONE_CELLS as i64 {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Why a board configuration was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must have at least one row and one column")]
    EmptyBoard,
    #[error("{mines} mines cannot fit a {width}x{height} board with a safe opening")]
    TooManyMines {
        mines: usize,
        width: usize,
        height: usize,
    },
}

/// Board size presets selectable on the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Apprentice,
        Difficulty::Journeyman,
        Difficulty::Master,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Novice)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Journeyman => "Journeyman",
            Self::Master => "Master",
        }
    }

    /// Returns (height, width) for the grid.
    fn grid_size(&self) -> (usize, usize) {
        match self {
            Self::Novice => (9, 9),
            Self::Apprentice => (12, 12),
            Self::Journeyman => (16, 16),
            Self::Master => (16, 20),
        }
    }

    /// Returns the number of mines for this preset.
    fn mine_count(&self) -> usize {
        match self {
            Self::Novice => 10,
            Self::Apprentice => 25,
            Self::Journeyman => 40,
            Self::Master => 60,
        }
    }

    /// The board configuration this preset stands for.
    pub fn config(&self) -> BoardConfig {
        let (height, width) = self.grid_size();
        BoardConfig {
            width,
            height,
            mines: self.mine_count(),
        }
    }
}
