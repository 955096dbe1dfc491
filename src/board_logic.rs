//! Cell reveal, flood fill, flag toggling, and the win predicate.
//!
//! These functions mutate a `Grid` directly and report what happened
//! through outcome enums; session-level counters and state transitions
//! are `session`'s job.

use crate::board::Grid;
use crate::board_generation::get_neighbors;

/// Outcome of a reveal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Out of bounds, already revealed, or flagged: nothing changed.
    NoOp,
    /// The cell opened safely. Carries every coordinate revealed by this
    /// call, the origin plus any flood-filled region, for the renderer.
    Opened(Vec<(usize, usize)>),
    /// The cell was a mine.
    Mine,
}

/// Outcome of a flag toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    /// Out of bounds or already revealed: nothing changed.
    NoOp,
    Flagged,
    Unflagged,
}

/// Reveal the cell at (row, col).
///
/// - Out-of-bounds, flagged, or already-revealed cells: `NoOp`.
/// - A mine: the cell is marked revealed and `Mine` is returned.
/// - `adjacent_mines > 0`: only that cell is revealed.
/// - `adjacent_mines == 0`: flood fill reveals the connected region.
pub fn reveal_cell(grid: &mut Grid, row: usize, col: usize) -> RevealOutcome {
    if !grid.in_bounds(row, col) {
        return RevealOutcome::NoOp;
    }

    let cell = &grid.cells[row][col];
    if cell.flagged || cell.revealed {
        return RevealOutcome::NoOp;
    }

    grid.cells[row][col].revealed = true;

    if grid.cells[row][col].has_mine {
        return RevealOutcome::Mine;
    }

    let mut opened = vec![(row, col)];
    if grid.cells[row][col].adjacent_mines == 0 {
        flood_fill_reveal(grid, row, col, &mut opened);
    }

    RevealOutcome::Opened(opened)
}

/// Flood-fill reveal outward from a cell with 0 adjacent mines.
///
/// Uses an explicit stack; each cell flips from hidden to revealed at
/// most once, so the loop does at most one pass over the grid. Numbered
/// cells are revealed but not expanded; revealed, flagged, and mine
/// cells are skipped. Newly revealed coordinates are appended to
/// `opened`.
pub fn flood_fill_reveal(
    grid: &mut Grid,
    start_row: usize,
    start_col: usize,
    opened: &mut Vec<(usize, usize)>,
) {
    let mut stack: Vec<(usize, usize)> = vec![(start_row, start_col)];

    while let Some((row, col)) = stack.pop() {
        for (n_row, n_col) in get_neighbors(row, col, grid.height, grid.width) {
            let neighbor = &grid.cells[n_row][n_col];

            if neighbor.revealed || neighbor.flagged || neighbor.has_mine {
                continue;
            }

            grid.cells[n_row][n_col].revealed = true;
            opened.push((n_row, n_col));

            if grid.cells[n_row][n_col].adjacent_mines == 0 {
                stack.push((n_row, n_col));
            }
        }
    }
}

/// Reveal every mine that is not flagged, to display the full field
/// after a loss. Flagged mines stay hidden even when the flag was
/// wrong. Returns how many cells this revealed.
pub fn reveal_unflagged_mines(grid: &mut Grid) -> usize {
    let mut shown = 0;
    for row in 0..grid.height {
        for col in 0..grid.width {
            let cell = &grid.cells[row][col];
            if cell.has_mine && !cell.flagged && !cell.revealed {
                grid.cells[row][col].revealed = true;
                shown += 1;
            }
        }
    }
    shown
}

/// Toggle the flag on a cell. Revealed cells cannot be flagged.
pub fn toggle_flag(grid: &mut Grid, row: usize, col: usize) -> FlagOutcome {
    if !grid.in_bounds(row, col) {
        return FlagOutcome::NoOp;
    }

    let cell = &grid.cells[row][col];
    if cell.revealed {
        return FlagOutcome::NoOp;
    }

    if cell.flagged {
        grid.cells[row][col].flagged = false;
        FlagOutcome::Unflagged
    } else {
        grid.cells[row][col].flagged = true;
        FlagOutcome::Flagged
    }
}

/// Whether the board is cleared: every non-mine cell revealed.
pub fn has_won(revealed_count: usize, width: usize, height: usize, mines: usize) -> bool {
    revealed_count == width * height - mines
}
