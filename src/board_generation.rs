//! Mine placement and adjacency counting.
//!
//! Placement is deferred until the first reveal so the safe zone can be
//! centered on the cell the player actually opens; `session` drives that
//! sequencing and calls `generate` exactly once per board.

use rand::Rng;

use crate::board::Grid;

/// Get valid neighbor coordinates for a cell.
///
/// Returns a vector of (row, col) tuples for all valid neighbors (up to 8 directions).
pub fn get_neighbors(row: usize, col: usize, height: usize, width: usize) -> Vec<(usize, usize)> {
    let mut neighbors = Vec::with_capacity(8);

    for d_row in -1i32..=1 {
        for d_col in -1i32..=1 {
            // Skip the cell itself
            if d_row == 0 && d_col == 0 {
                continue;
            }

            let new_row = row as i32 + d_row;
            let new_col = col as i32 + d_col;

            // Check bounds
            if new_row >= 0 && new_row < height as i32 && new_col >= 0 && new_col < width as i32 {
                neighbors.push((new_row as usize, new_col as usize));
            }
        }
    }

    neighbors
}

/// Place `mines` mines on the grid, keeping (safe_row, safe_col) and all
/// of its neighbors mine-free, then cache adjacency counts.
///
/// This is the full board generation step: after it returns, the grid is
/// ready for reveals.
pub fn generate<R: Rng>(
    grid: &mut Grid,
    mines: usize,
    safe_row: usize,
    safe_col: usize,
    rng: &mut R,
) {
    place_mines(grid, mines, safe_row, safe_col, rng);
    calculate_adjacent_counts(grid);
}

/// Scatter `mines` mines across the grid by rejection sampling: draw a
/// uniformly random cell, skip it if it is already mined or inside the
/// safe zone, and repeat until enough mines have landed.
///
/// There is no retry cap. Callers must have validated that `mines` leaves
/// room outside the safe zone (`BoardConfig::validate`); otherwise this
/// loop cannot terminate.
pub fn place_mines<R: Rng>(
    grid: &mut Grid,
    mines: usize,
    safe_row: usize,
    safe_col: usize,
    rng: &mut R,
) {
    // The safe zone: the first-revealed cell plus its neighbors.
    let mut safe_zone: Vec<(usize, usize)> = vec![(safe_row, safe_col)];
    safe_zone.extend(get_neighbors(safe_row, safe_col, grid.height, grid.width));

    let mut remaining = mines;
    while remaining > 0 {
        let row = rng.gen_range(0..grid.height);
        let col = rng.gen_range(0..grid.width);

        if grid.cells[row][col].has_mine || safe_zone.contains(&(row, col)) {
            continue;
        }

        grid.cells[row][col].has_mine = true;
        remaining -= 1;
    }
}

/// Count the mines among the up-to-8 neighbors of (row, col).
pub fn count_adjacent_mines(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0u8;
    for (n_row, n_col) in get_neighbors(row, col, grid.height, grid.width) {
        if grid.cells[n_row][n_col].has_mine {
            count += 1;
        }
    }
    count
}

/// Cache adjacency counts on every non-mine cell.
///
/// Mine cells are skipped; their count is never displayed or relied upon.
pub fn calculate_adjacent_counts(grid: &mut Grid) {
    for row in 0..grid.height {
        for col in 0..grid.width {
            if grid.cells[row][col].has_mine {
                continue;
            }
            grid.cells[row][col].adjacent_mines = count_adjacent_mines(grid, row, col);
        }
    }
}
