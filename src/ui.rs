//! Lock-screen rendering: date, status, now-playing info, gesture glyph.
//!
//! The screen mirrors a minimal lock surface: a header with the date, a
//! big status line, the three-line song info block, a direction indicator
//! while a gesture is in progress and a one-line key help footer.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::gesture::Gesture;

pub fn draw(f: &mut Frame, app: &App, ui: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new(app.date_line.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(ui.header_text.as_str()),
        );
    f.render_widget(header, chunks[0]);

    let status = Paragraph::new(app.status.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(status, chunks[1]);

    let info = Paragraph::new(app.info.as_str())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(info, chunks[2]);

    let glyph = Paragraph::new(gesture_glyph(app.gesture)).alignment(Alignment::Center);
    f.render_widget(glyph, chunks[3]);

    let help = Paragraph::new(
        "[qwe/asd/zxc] aim | [enter] commit | [esc] cancel/dismiss | [tab] playlist | [space] play/pause",
    )
    .alignment(Alignment::Center)
    .style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(help, chunks[4]);
}

/// Direction indicator for an in-progress gesture.
fn gesture_glyph(gesture: Option<Gesture>) -> &'static str {
    match gesture {
        None => "",
        Some(Gesture::UpLeft) => "↖",
        Some(Gesture::Up) => "↑ rewind",
        Some(Gesture::UpRight) => "↗",
        Some(Gesture::Left) => "←",
        Some(Gesture::Center) => "●",
        Some(Gesture::Right) => "→",
        Some(Gesture::DownLeft) => "↙",
        Some(Gesture::Down) => "↓ fast forward",
        Some(Gesture::DownRight) => "↘",
    }
}
