//! Title and instructions screens.

use crate::board::Difficulty;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Center a fixed-size box inside the available area, shrinking it if
/// the terminal is smaller than the box.
fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Render the title screen with the difficulty selector.
pub fn render_title(frame: &mut Frame, area: Rect, difficulty_index: usize) {
    frame.render_widget(Clear, area);

    let box_area = centered_box(area, 44, 14);

    let block = Block::default()
        .title(" Minefield ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "M I N E F I E L D",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Select difficulty:",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let is_selected = i == difficulty_index;
        let prefix = if is_selected { "> " } else { "  " };
        let name_style = if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let config = difficulty.config();
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<12}", prefix, difficulty.name()), name_style),
            Span::styled(
                format!("{}x{}, {} mines", config.width, config.height, config.mines),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Up/Down] Select  [Enter] Continue  [Q] Quit",
        Style::default().fg(Color::DarkGray),
    )));

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

/// Render the instructions screen.
pub fn render_instructions(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let box_area = centered_box(area, 52, 16);

    let block = Block::default()
        .title(" How to Play ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let lines = vec![
        Line::from(Span::styled(
            "Clear the field without hitting a mine.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Numbers show how many mines touch a cell.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Your first reveal is always safe and opens",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "a clearing around it.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Arrows] Move the cursor",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "[Enter]  Reveal a cell",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "[F]      Flag a suspected mine",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Start  [Esc] Back",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}
