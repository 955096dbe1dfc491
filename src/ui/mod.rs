//! Terminal rendering for every screen.

pub mod board_scene;
pub mod title_scene;

use crate::input::AppState;
use crate::session::{GameSession, SessionPhase};
use ratatui::Frame;

/// Main drawing function: dispatch to the scene for the current screen.
pub fn draw(frame: &mut Frame, session: &GameSession, app: &AppState, elapsed_secs: u64) {
    let size = frame.size();

    match session.phase() {
        SessionPhase::Title => {
            title_scene::render_title(frame, size, app.difficulty_index);
        }
        SessionPhase::Instructions => {
            title_scene::render_instructions(frame, size);
        }
        SessionPhase::Playing | SessionPhase::GameOverWin | SessionPhase::GameOverLose => {
            board_scene::render_board(frame, size, session, app, elapsed_secs);
        }
    }
}
