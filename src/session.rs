//! Game session orchestration: screen state machine, deferred board
//! generation, counters, and the read-only view the renderer consumes.
//!
//! `GameSession` is the sole owner and mutator of the grid. Its fields
//! are private so nothing outside this module can see where the mines
//! are; renderers get `CellView`s, which only describe revealed cells.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{BoardConfig, ConfigError, Difficulty, Grid};
use crate::board_generation::generate;
use crate::board_logic::{self, FlagOutcome, RevealOutcome};

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Title,
    Instructions,
    Playing,
    GameOverWin,
    GameOverLose,
}

impl SessionPhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionPhase::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, SessionPhase::GameOverWin | SessionPhase::GameOverLose)
    }
}

/// Whether mines have been placed on the current board.
///
/// Placement waits for the first reveal so the safe zone can be centered
/// on the cell the player opens; `reveal` resolves `Deferred` exactly
/// once per board, atomically with the reveal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinePlacement {
    Deferred,
    Placed,
}

/// What the presentation layer may know about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    /// A revealed non-mine cell, with its adjacency count.
    Open(u8),
    /// A revealed mine.
    Mine,
}

/// Read-only copy of the board as the renderer is allowed to see it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Per-cell views, indexed as `cells[row][col]`.
    pub cells: Vec<Vec<CellView>>,
    /// Total mines minus flags placed; negative when overflagged.
    pub mines_remaining: i32,
    pub phase: SessionPhase,
}

/// One playable game: grid, configuration, counters, and screen state.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    config: BoardConfig,
    phase: SessionPhase,
    placement: MinePlacement,
    revealed_count: usize,
    flagged_count: usize,
}

impl GameSession {
    /// Create a session on the title screen with the default board.
    pub fn new() -> Self {
        let config = Difficulty::Novice.config();
        Self {
            grid: Grid::new(config.width, config.height),
            config,
            phase: SessionPhase::Title,
            placement: MinePlacement::Deferred,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Advance from the title screen to the instructions screen.
    pub fn show_instructions(&mut self) {
        if self.phase == SessionPhase::Title {
            self.phase = SessionPhase::Instructions;
        }
    }

    /// Return to the title screen. Not available mid-game; the shell
    /// only routes this from instructions and game-over screens.
    pub fn to_title(&mut self) {
        if !self.phase.is_playing() {
            self.phase = SessionPhase::Title;
        }
    }

    /// Start a fresh board with the given configuration and enter play.
    ///
    /// On a rejected configuration nothing changes: the grid, counters,
    /// and phase are exactly as they were before the call.
    pub fn reset(&mut self, config: BoardConfig) -> Result<(), ConfigError> {
        config.validate()?;

        self.grid = Grid::new(config.width, config.height);
        self.config = config;
        self.phase = SessionPhase::Playing;
        self.placement = MinePlacement::Deferred;
        self.revealed_count = 0;
        self.flagged_count = 0;
        Ok(())
    }

    /// Restart with the same configuration as the current board.
    pub fn play_again(&mut self) -> Result<(), ConfigError> {
        self.reset(self.config)
    }

    /// Reveal the cell at (row, col).
    ///
    /// Ignored outside of play and for out-of-bounds coordinates. The
    /// first reveal on a fresh board places the mines, keeping the
    /// clicked cell and its neighbors clear, then opens the cell. A
    /// mine hit ends the game and uncovers every unflagged mine; a win
    /// is detected as soon as the last safe cell opens.
    pub fn reveal<R: Rng>(&mut self, row: usize, col: usize, rng: &mut R) -> RevealOutcome {
        if self.phase != SessionPhase::Playing {
            return RevealOutcome::NoOp;
        }
        if !self.grid.in_bounds(row, col) {
            return RevealOutcome::NoOp;
        }

        if self.placement == MinePlacement::Deferred {
            generate(&mut self.grid, self.config.mines, row, col, rng);
            self.placement = MinePlacement::Placed;
        }

        match board_logic::reveal_cell(&mut self.grid, row, col) {
            RevealOutcome::NoOp => RevealOutcome::NoOp,
            RevealOutcome::Opened(opened) => {
                self.revealed_count += opened.len();
                if self.check_win() {
                    self.phase = SessionPhase::GameOverWin;
                }
                RevealOutcome::Opened(opened)
            }
            RevealOutcome::Mine => {
                // The hit mine itself, then the rest of the field.
                self.revealed_count += 1;
                self.revealed_count += board_logic::reveal_unflagged_mines(&mut self.grid);
                self.phase = SessionPhase::GameOverLose;
                RevealOutcome::Mine
            }
        }
    }

    /// Toggle a flag at (row, col).
    ///
    /// Ignored outside of play, before the board has been generated, on
    /// revealed cells, and out of bounds.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> FlagOutcome {
        if self.phase != SessionPhase::Playing {
            return FlagOutcome::NoOp;
        }
        if self.placement == MinePlacement::Deferred {
            // Flags mean nothing until a board exists.
            return FlagOutcome::NoOp;
        }

        let outcome = board_logic::toggle_flag(&mut self.grid, row, col);
        match outcome {
            FlagOutcome::Flagged => self.flagged_count += 1,
            FlagOutcome::Unflagged => self.flagged_count -= 1,
            FlagOutcome::NoOp => {}
        }

        // Flagging never changes the revealed count, so this can only
        // re-confirm a win that the reveal path already detected.
        if self.check_win() {
            self.phase = SessionPhase::GameOverWin;
        }

        outcome
    }

    fn check_win(&self) -> bool {
        board_logic::has_won(
            self.revealed_count,
            self.config.width,
            self.config.height,
            self.config.mines,
        )
    }

    /// What the renderer may know about the cell at (row, col).
    /// Out-of-bounds coordinates read as hidden.
    pub fn view(&self, row: usize, col: usize) -> CellView {
        if !self.grid.in_bounds(row, col) {
            return CellView::Hidden;
        }
        let cell = &self.grid.cells[row][col];
        if cell.flagged {
            CellView::Flagged
        } else if !cell.revealed {
            CellView::Hidden
        } else if cell.has_mine {
            CellView::Mine
        } else {
            CellView::Open(cell.adjacent_mines)
        }
    }

    /// Full read-only copy of the visible board state.
    pub fn snapshot(&self) -> Snapshot {
        let cells = (0..self.grid.height)
            .map(|row| (0..self.grid.width).map(|col| self.view(row, col)).collect())
            .collect();
        Snapshot {
            width: self.grid.width,
            height: self.grid.height,
            cells,
            mines_remaining: self.mines_remaining(),
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn total_mines(&self) -> usize {
        self.config.mines
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    /// Returns the number of mines remaining (total mines - flags placed).
    /// Can be negative if the player has placed more flags than mines.
    pub fn mines_remaining(&self) -> i32 {
        self.config.mines as i32 - self.flagged_count as i32
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_generation::calculate_adjacent_counts;
    use rand_chacha::ChaCha8Rng;
    use rand::SeedableRng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Build a mid-game session from a string layout ('M' = mine),
    /// with mines already placed and nothing revealed.
    fn make_session(layout: &[&str]) -> GameSession {
        let height = layout.len();
        let width = layout[0].len();
        let mut grid = Grid::new(width, height);
        let mut mines = 0usize;

        for (r, row_str) in layout.iter().enumerate() {
            for (c, ch) in row_str.chars().enumerate() {
                if ch == 'M' {
                    grid.cells[r][c].has_mine = true;
                    mines += 1;
                }
            }
        }

        calculate_adjacent_counts(&mut grid);

        GameSession {
            grid,
            config: BoardConfig {
                width,
                height,
                mines,
            },
            phase: SessionPhase::Playing,
            placement: MinePlacement::Placed,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    fn count_revealed(session: &GameSession) -> usize {
        session
            .grid
            .cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.revealed)
            .count()
    }

    #[test]
    fn test_new_session_starts_on_title() {
        let session = GameSession::new();

        assert_eq!(session.phase(), SessionPhase::Title);
        assert_eq!(session.revealed_count(), 0);
        assert_eq!(session.flagged_count(), 0);
        assert_eq!(session.config(), Difficulty::Novice.config());
    }

    #[test]
    fn test_title_to_playing_flow() {
        let mut session = GameSession::new();

        session.show_instructions();
        assert_eq!(session.phase(), SessionPhase::Instructions);

        session.reset(Difficulty::Apprentice.config()).unwrap();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.width(), 12);
        assert_eq!(session.height(), 12);
        assert_eq!(session.total_mines(), 25);
    }

    #[test]
    fn test_show_instructions_only_from_title() {
        let mut session = make_session(&["M....", ".....", ".....", ".....", "....."]);

        session.show_instructions();
        assert_eq!(
            session.phase(),
            SessionPhase::Playing,
            "Mid-game sessions stay in play"
        );
    }

    #[test]
    fn test_reveal_ignored_on_title_screen() {
        let mut session = GameSession::new();
        let mut rng = test_rng();

        let outcome = session.reveal(4, 4, &mut rng);

        assert_eq!(outcome, RevealOutcome::NoOp);
        assert_eq!(session.phase(), SessionPhase::Title);
        assert_eq!(session.revealed_count(), 0);
        assert_eq!(
            session.placement,
            MinePlacement::Deferred,
            "No board may be generated outside of play"
        );
        assert_eq!(count_revealed(&session), 0);
    }

    #[test]
    fn test_toggle_flag_ignored_on_title_screen() {
        let mut session = GameSession::new();

        let outcome = session.toggle_flag(4, 4);

        assert_eq!(outcome, FlagOutcome::NoOp);
        assert_eq!(session.flagged_count(), 0);
        assert!(!session.grid.cells[4][4].flagged);
    }

    #[test]
    fn test_operations_ignored_after_game_over() {
        let mut session = make_session(&["M....", ".....", ".....", ".....", "....."]);
        let mut rng = test_rng();

        assert_eq!(session.reveal(0, 0, &mut rng), RevealOutcome::Mine);
        assert_eq!(session.phase(), SessionPhase::GameOverLose);

        let revealed_before = session.revealed_count();
        assert_eq!(session.reveal(4, 4, &mut rng), RevealOutcome::NoOp);
        assert_eq!(session.toggle_flag(4, 4), FlagOutcome::NoOp);
        assert_eq!(session.revealed_count(), revealed_before);
        assert_eq!(session.phase(), SessionPhase::GameOverLose);
    }

    #[test]
    fn test_first_reveal_generates_board_with_safe_zone() {
        // 8x8, 10 mines, first reveal at (4,4): the 3x3 block around
        // the click must be mine-free and the mine count exact.
        let mut session = GameSession::new();
        let mut rng = test_rng();

        session
            .reset(BoardConfig {
                width: 8,
                height: 8,
                mines: 10,
            })
            .unwrap();
        assert_eq!(session.placement, MinePlacement::Deferred);

        let outcome = session.reveal(4, 4, &mut rng);

        assert_eq!(session.placement, MinePlacement::Placed);
        assert!(matches!(outcome, RevealOutcome::Opened(_)));

        for r in 3..=5 {
            for c in 3..=5 {
                assert!(
                    !session.grid.cells[r][c].has_mine,
                    "Safe zone cell ({}, {}) must not hold a mine",
                    r, c
                );
            }
        }

        let mines: usize = session
            .grid
            .cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.has_mine)
            .count();
        assert_eq!(mines, 10);
    }

    #[test]
    fn test_first_reveal_is_never_a_mine() {
        for seed in 0..25 {
            let mut session = GameSession::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            session.reset(Difficulty::Novice.config()).unwrap();
            let outcome = session.reveal(0, 0, &mut rng);

            assert!(
                matches!(outcome, RevealOutcome::Opened(_)),
                "Seed {}: first reveal must open safely",
                seed
            );
            assert_ne!(session.phase(), SessionPhase::GameOverLose);
        }
    }

    #[test]
    fn test_first_reveal_opens_a_clearing() {
        // The safe zone guarantees the first cell has zero adjacency,
        // so its whole neighborhood opens with it.
        let mut session = GameSession::new();
        let mut rng = test_rng();

        session.reset(Difficulty::Novice.config()).unwrap();
        match session.reveal(4, 4, &mut rng) {
            RevealOutcome::Opened(cells) => {
                assert!(
                    cells.len() >= 9,
                    "Expected at least the 3x3 clearing, got {} cells",
                    cells.len()
                );
                assert!(cells.contains(&(4, 4)));
            }
            other => panic!("Expected Opened, got {:?}", other),
        }
    }

    #[test]
    fn test_flag_before_first_reveal_is_noop() {
        let mut session = GameSession::new();

        session.reset(Difficulty::Novice.config()).unwrap();
        let outcome = session.toggle_flag(3, 3);

        assert_eq!(outcome, FlagOutcome::NoOp);
        assert_eq!(session.flagged_count(), 0);
        assert!(!session.grid.cells[3][3].flagged);
        assert_eq!(session.mines_remaining(), 10);
    }

    #[test]
    fn test_revealed_count_matches_grid() {
        let mut session = make_session(&[
            "M....",
            ".....",
            ".....",
            ".....",
            "....M",
        ]);
        let mut rng = test_rng();

        session.reveal(0, 1, &mut rng);
        assert_eq!(session.revealed_count(), count_revealed(&session));

        session.reveal(2, 2, &mut rng);
        assert_eq!(session.revealed_count(), count_revealed(&session));
    }

    #[test]
    fn test_mine_hit_ends_game_and_uncovers_unflagged_mines() {
        // Mine at (2,2) is hit; the flagged mine at (0,4) must stay
        // hidden, the unflagged mine at (4,0) must be uncovered.
        let mut session = make_session(&[
            "....M",
            ".....",
            "..M..",
            ".....",
            "M....",
        ]);
        let mut rng = test_rng();

        session.toggle_flag(0, 4);
        assert_eq!(session.view(0, 4), CellView::Flagged);

        let outcome = session.reveal(2, 2, &mut rng);

        assert_eq!(outcome, RevealOutcome::Mine);
        assert_eq!(session.phase(), SessionPhase::GameOverLose);

        assert_eq!(session.view(2, 2), CellView::Mine, "Hit mine shown");
        assert_eq!(session.view(4, 0), CellView::Mine, "Unflagged mine shown");
        assert_eq!(
            session.view(0, 4),
            CellView::Flagged,
            "Flagged mine stays covered"
        );

        // Ordinary hidden cells are untouched by the sweep.
        assert_eq!(session.view(1, 1), CellView::Hidden);

        // The counter still matches the grid after the sweep.
        assert_eq!(session.revealed_count(), count_revealed(&session));
    }

    #[test]
    fn test_win_by_revealing_every_safe_cell() {
        // 5x5 with 1 mine: 24 reveals win the game.
        let mut session = make_session(&[
            "M....",
            ".....",
            ".....",
            ".....",
            ".....",
        ]);
        let mut rng = test_rng();

        let mut opened_total = 0usize;
        for row in 0..5 {
            for col in 0..5 {
                if row == 0 && col == 0 {
                    continue;
                }
                if let RevealOutcome::Opened(cells) = session.reveal(row, col, &mut rng) {
                    opened_total += cells.len();
                }
            }
        }

        assert_eq!(opened_total, 24);
        assert_eq!(session.revealed_count(), 24);
        assert_eq!(session.phase(), SessionPhase::GameOverWin);
    }

    #[test]
    fn test_win_detected_on_the_final_reveal() {
        // All non-mine cells numbered: each reveal opens exactly one.
        //   M M
        //   . .   both bottom cells have 2 adjacent mines
        let mut session = make_session(&["MM", ".."]);
        let mut rng = test_rng();

        session.reveal(1, 0, &mut rng);
        assert_eq!(session.phase(), SessionPhase::Playing);

        session.reveal(1, 1, &mut rng);
        assert_eq!(session.phase(), SessionPhase::GameOverWin);
        assert_eq!(session.revealed_count(), 2);
    }

    #[test]
    fn test_flag_counters_can_go_negative() {
        // 1 mine, 3 flags: remaining dips to -2, unflagging one
        // brings it back to -1.
        let mut session = make_session(&[
            "M....",
            ".....",
            ".....",
            ".....",
            ".....",
        ]);

        assert_eq!(session.mines_remaining(), 1);

        session.toggle_flag(1, 1);
        session.toggle_flag(2, 2);
        session.toggle_flag(3, 3);
        assert_eq!(session.flagged_count(), 3);
        assert_eq!(session.mines_remaining(), -2);

        session.toggle_flag(3, 3);
        assert_eq!(session.mines_remaining(), -1);
    }

    #[test]
    fn test_flag_toggle_leaves_phase_alone() {
        let mut session = make_session(&["M....", ".....", ".....", ".....", "....."]);

        session.toggle_flag(1, 1);
        session.toggle_flag(2, 2);

        assert_eq!(
            session.phase(),
            SessionPhase::Playing,
            "Flagging alone can never end the game"
        );
    }

    #[test]
    fn test_reset_rejects_bad_config_without_mutation() {
        let mut session = make_session(&["M....", ".....", ".....", ".....", "....."]);
        let mut rng = test_rng();

        session.reveal(0, 1, &mut rng);
        session.toggle_flag(3, 3);

        let phase_before = session.phase();
        let revealed_before = session.revealed_count();
        let flagged_before = session.flagged_count();
        let snapshot_before = session.snapshot();

        let result = session.reset(BoardConfig {
            width: 8,
            height: 8,
            mines: 60,
        });

        assert_eq!(
            result,
            Err(ConfigError::TooManyMines {
                mines: 60,
                width: 8,
                height: 8,
            })
        );
        assert_eq!(session.phase(), phase_before);
        assert_eq!(session.revealed_count(), revealed_before);
        assert_eq!(session.flagged_count(), flagged_before);
        assert_eq!(session.snapshot().cells, snapshot_before.cells);
    }

    #[test]
    fn test_reset_after_game_over_starts_fresh() {
        let mut session = make_session(&["M....", ".....", ".....", ".....", "....."]);
        let mut rng = test_rng();

        assert_eq!(session.reveal(0, 0, &mut rng), RevealOutcome::Mine);
        assert!(session.phase().is_game_over());

        session.play_again().unwrap();

        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.placement, MinePlacement::Deferred);
        assert_eq!(session.revealed_count(), 0);
        assert_eq!(session.flagged_count(), 0);
        assert_eq!(count_revealed(&session), 0);
        assert_eq!(session.config().mines, 1, "Same configuration as before");
    }

    #[test]
    fn test_to_title_from_game_over_but_not_mid_game() {
        let mut session = make_session(&["M....", ".....", ".....", ".....", "....."]);
        let mut rng = test_rng();

        session.to_title();
        assert_eq!(session.phase(), SessionPhase::Playing);

        session.reveal(0, 0, &mut rng);
        session.to_title();
        assert_eq!(session.phase(), SessionPhase::Title);
    }

    #[test]
    fn test_snapshot_never_exposes_hidden_mines() {
        let mut session = make_session(&[
            "M.M..",
            ".....",
            "..M..",
            ".....",
            "....M",
        ]);

        // Before anything is revealed every cell reads Hidden; mined
        // and mine-free cells are indistinguishable.
        let snapshot = session.snapshot();
        for row in &snapshot.cells {
            for view in row {
                assert_eq!(*view, CellView::Hidden);
            }
        }

        // A numbered reveal shows its count and nothing else.
        let mut rng = test_rng();
        session.reveal(1, 1, &mut rng);
        assert_eq!(session.view(1, 1), CellView::Open(3));
        assert_eq!(session.view(0, 0), CellView::Hidden, "Mine still hidden");
        assert_eq!(session.view(2, 2), CellView::Hidden, "Mine still hidden");
    }

    #[test]
    fn test_snapshot_metadata() {
        let mut session = make_session(&["M....", ".....", ".....", ".....", "....."]);

        session.toggle_flag(2, 2);
        session.toggle_flag(3, 3);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.width, 5);
        assert_eq!(snapshot.height, 5);
        assert_eq!(snapshot.mines_remaining, -1);
        assert_eq!(snapshot.phase, SessionPhase::Playing);
        assert_eq!(snapshot.cells[2][2], CellView::Flagged);
    }

    #[test]
    fn test_view_out_of_bounds_reads_hidden() {
        let session = make_session(&["M....", ".....", ".....", ".....", "....."]);
        assert_eq!(session.view(99, 0), CellView::Hidden);
        assert_eq!(session.view(0, 99), CellView::Hidden);
    }

    #[test]
    fn test_independent_sessions_do_not_interfere() {
        let mut a = make_session(&["M....", ".....", ".....", ".....", "....."]);
        let mut b = make_session(&["M....", ".....", ".....", ".....", "....."]);
        let mut rng = test_rng();

        a.reveal(0, 0, &mut rng);
        b.toggle_flag(1, 1);

        assert_eq!(a.phase(), SessionPhase::GameOverLose);
        assert_eq!(b.phase(), SessionPhase::Playing);
        assert_eq!(b.revealed_count(), 0);
        assert_eq!(a.flagged_count(), 0);
    }
}
