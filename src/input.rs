//! Input handling for every screen.
//!
//! Keys are mapped to semantic inputs first, then dispatched on the
//! session's current screen. Keeping the dispatch out of main.rs keeps
//! the event loop a thin shell around `handle_key`.

use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;

use crate::board::Difficulty;
use crate::session::{GameSession, SessionPhase};

/// Semantic input, decoupled from the physical key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Up,
    Down,
    Left,
    Right,
    Primary,
    Flag,
    Cancel,
    Restart,
    Quit,
    Other,
}

/// Result of handling one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the event loop normally.
    Continue,
    /// Player asked to leave the program.
    Quit,
}

/// Shell-side state that is not part of the game itself: where the
/// cursor sits and which difficulty the title screen has selected.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// Cursor position as (row, col).
    pub cursor: (usize, usize),
    /// Index into `Difficulty::ALL` for the title-screen selector.
    pub difficulty_index: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            cursor: (0, 0),
            difficulty_index: 0,
        }
    }

    /// Move the cursor by the given delta, clamped to the board.
    pub fn move_cursor(&mut self, session: &GameSession, d_row: i32, d_col: i32) {
        let new_row = (self.cursor.0 as i32 + d_row).clamp(0, session.height() as i32 - 1) as usize;
        let new_col = (self.cursor.1 as i32 + d_col).clamp(0, session.width() as i32 - 1) as usize;
        self.cursor = (new_row, new_col);
    }

    /// Put the cursor in the middle of the board, where a fresh game
    /// starts.
    pub fn center_cursor(&mut self, session: &GameSession) {
        self.cursor = (session.height() / 2, session.width() / 2);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified key → input mapping, shared by every screen.
pub fn map_key(key: KeyEvent) -> GameInput {
    match key.code {
        KeyCode::Up => GameInput::Up,
        KeyCode::Down => GameInput::Down,
        KeyCode::Left => GameInput::Left,
        KeyCode::Right => GameInput::Right,
        KeyCode::Enter => GameInput::Primary,
        KeyCode::Char('f') | KeyCode::Char('F') => GameInput::Flag,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        KeyCode::Esc => GameInput::Cancel,
        _ => GameInput::Other,
    }
}

/// Main dispatcher: map the key and route it to the current screen.
pub fn handle_key<R: Rng>(
    key: KeyEvent,
    session: &mut GameSession,
    app: &mut AppState,
    rng: &mut R,
) -> InputResult {
    process_input(session, app, map_key(key), rng)
}

/// Route a semantic input to the current screen's handler.
pub fn process_input<R: Rng>(
    session: &mut GameSession,
    app: &mut AppState,
    input: GameInput,
    rng: &mut R,
) -> InputResult {
    if input == GameInput::Quit {
        return InputResult::Quit;
    }

    match session.phase() {
        SessionPhase::Title => handle_title(session, app, input),
        SessionPhase::Instructions => handle_instructions(session, app, input),
        SessionPhase::Playing => handle_playing(session, app, input, rng),
        SessionPhase::GameOverWin | SessionPhase::GameOverLose => {
            handle_game_over(session, app, input)
        }
    }
    InputResult::Continue
}

fn handle_title(session: &mut GameSession, app: &mut AppState, input: GameInput) {
    match input {
        GameInput::Up => {
            app.difficulty_index = app.difficulty_index.saturating_sub(1);
        }
        GameInput::Down => {
            if app.difficulty_index + 1 < Difficulty::ALL.len() {
                app.difficulty_index += 1;
            }
        }
        GameInput::Primary => session.show_instructions(),
        _ => {}
    }
}

fn handle_instructions(session: &mut GameSession, app: &mut AppState, input: GameInput) {
    match input {
        GameInput::Primary => {
            let config = Difficulty::from_index(app.difficulty_index).config();
            // Presets always satisfy the mine-count rule.
            if session.reset(config).is_ok() {
                app.center_cursor(session);
            }
        }
        GameInput::Cancel => session.to_title(),
        _ => {}
    }
}

fn handle_playing<R: Rng>(
    session: &mut GameSession,
    app: &mut AppState,
    input: GameInput,
    rng: &mut R,
) {
    match input {
        GameInput::Up => app.move_cursor(session, -1, 0),
        GameInput::Down => app.move_cursor(session, 1, 0),
        GameInput::Left => app.move_cursor(session, 0, -1),
        GameInput::Right => app.move_cursor(session, 0, 1),
        GameInput::Primary => {
            let (row, col) = app.cursor;
            session.reveal(row, col, rng);
        }
        GameInput::Flag => {
            let (row, col) = app.cursor;
            session.toggle_flag(row, col);
        }
        _ => {}
    }
}

fn handle_game_over(session: &mut GameSession, app: &mut AppState, input: GameInput) {
    match input {
        GameInput::Primary => {
            if session.play_again().is_ok() {
                app.center_cursor(session);
            }
        }
        GameInput::Restart | GameInput::Cancel => session.to_title(),
        _ => {}
    }
}
