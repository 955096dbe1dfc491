//! Board scene: the minefield grid, the info panel, and the game-over
//! overlay.
//!
//! Cells are drawn strictly from the session's `Snapshot`, so this
//! module can never paint information the player is not allowed to see.

use crate::board::{BoardConfig, Difficulty};
use crate::input::AppState;
use crate::session::{CellView, GameSession, SessionPhase, Snapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the board scene.
pub fn render_board(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    app: &AppState,
    elapsed_secs: u64,
) {
    frame.render_widget(Clear, area);

    let snapshot = session.snapshot();

    // Split: grid on left, info panel on right (24 chars wide)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),    // Grid area
            Constraint::Length(24), // Info panel
        ])
        .split(area);

    render_grid(frame, chunks[0], &snapshot, app.cursor);
    render_info_panel(frame, chunks[1], &snapshot, session, elapsed_secs);

    // Game over overlay (centered on grid area, not full area)
    if snapshot.phase.is_game_over() {
        render_game_over_overlay(frame, chunks[0], snapshot.phase);
    }
}

/// Render the minefield grid.
fn render_grid(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: (usize, usize)) {
    let block = Block::default()
        .title(" Minefield ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Each cell is 2 chars wide, 1 char tall
    let grid_width = (snapshot.width * 2) as u16;
    let grid_height = snapshot.height as u16;

    // Center the grid in available space
    let x_offset = inner.x + (inner.width.saturating_sub(grid_width)) / 2;
    let y_offset = inner.y + (inner.height.saturating_sub(grid_height)) / 2;

    let game_over = snapshot.phase.is_game_over();

    for row in 0..snapshot.height {
        let mut spans = Vec::new();

        for col in 0..snapshot.width {
            let (text, color) = get_cell_display(snapshot.cells[row][col]);

            let mut style = Style::default().fg(color);
            if cursor == (row, col) && !game_over {
                style = style.bg(Color::DarkGray);
            }

            spans.push(Span::styled(text, style));
        }

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(
            line,
            Rect::new(x_offset, y_offset + row as u16, grid_width, 1),
        );
    }
}

/// Get the display text and color for a cell view.
fn get_cell_display(view: CellView) -> (&'static str, Color) {
    match view {
        CellView::Flagged => ("F ", Color::Red),
        CellView::Hidden => ("# ", Color::Gray),
        CellView::Mine => ("* ", Color::Red),
        CellView::Open(0) => (". ", Color::DarkGray),
        CellView::Open(1) => ("1 ", Color::Blue),
        CellView::Open(2) => ("2 ", Color::Green),
        CellView::Open(3) => ("3 ", Color::Red),
        CellView::Open(4) => ("4 ", Color::Magenta),
        CellView::Open(5) => ("5 ", Color::Yellow),
        CellView::Open(6) => ("6 ", Color::Cyan),
        CellView::Open(7) => ("7 ", Color::Gray),
        CellView::Open(8) => ("8 ", Color::White),
        CellView::Open(_) => ("? ", Color::White),
    }
}

/// Name the preset matching a configuration, if any.
fn config_label(config: BoardConfig) -> &'static str {
    Difficulty::ALL
        .iter()
        .find(|difficulty| difficulty.config() == config)
        .map(|difficulty| difficulty.name())
        .unwrap_or("Custom")
}

/// Render the info panel on the right side.
fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    session: &GameSession,
    elapsed_secs: u64,
) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Minefield",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(Color::DarkGray)),
            Span::styled(config_label(session.config()), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Grid: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}x{}", snapshot.width, snapshot.height),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Mines: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.total_mines()),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    // Remaining (mines - flags)
    let remaining = snapshot.mines_remaining;
    let remaining_color = if remaining < 0 {
        Color::Red
    } else {
        Color::White
    };
    lines.push(Line::from(vec![
        Span::styled("Remaining: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}", remaining),
            Style::default().fg(remaining_color),
        ),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}m {:02}s", elapsed_secs / 60, elapsed_secs % 60),
            Style::default().fg(Color::White),
        ),
    ]));

    lines.push(Line::from(""));

    // Status
    let status = match snapshot.phase {
        SessionPhase::GameOverWin => Span::styled("Field cleared!", Style::default().fg(Color::Green)),
        SessionPhase::GameOverLose => Span::styled("Mine hit!", Style::default().fg(Color::Red)),
        _ if session.revealed_count() == 0 => {
            Span::styled("Pick a cell to begin", Style::default().fg(Color::Yellow))
        }
        _ => Span::styled("Sweeping...", Style::default().fg(Color::Green)),
    };
    lines.push(Line::from(status));
    lines.push(Line::from(""));

    // Controls
    if !snapshot.phase.is_game_over() {
        lines.push(Line::from(Span::styled(
            "[Arrows] Move",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "[Enter] Reveal",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "[F] Flag",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "[Q] Quit",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}

/// Render the game over overlay.
fn render_game_over_overlay(frame: &mut Frame, area: Rect, phase: SessionPhase) {
    let (title, color) = match phase {
        SessionPhase::GameOverWin => ("Field Cleared!", Color::Green),
        _ => ("Mine Hit!", Color::Red),
    };

    // Center overlay
    let width = 30;
    let height = 6;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Play again",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "[R] Title  [Q] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}
