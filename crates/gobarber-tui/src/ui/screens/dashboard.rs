use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Longest field name shown in full in the profile panel
const MAX_KEY_WIDTH: usize = 16;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Greeting
            Constraint::Min(4),    // Profile
        ])
        .split(area);

    render_greeting(frame, app, chunks[0]);
    render_profile(frame, app, chunks[1]);
}

fn render_greeting(frame: &mut Frame, app: &App, area: Rect) {
    let name = app
        .user()
        .and_then(|u| u.display_name())
        .unwrap_or_else(|| "there".to_string());

    let since = match app.session_started_at {
        Some(at) => format!("Session active since {}", at.format("%H:%M")),
        None => String::new(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Welcome, ", styles::text_style()),
            Span::styled(name, styles::title_style()),
        ]),
        Line::from(Span::styled(format!(" {}", since), styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let fields = app.user().map(|u| u.fields()).unwrap_or_default();

    let lines: Vec<Line> = if fields.is_empty() {
        vec![Line::from(Span::styled(
            " No profile details",
            styles::muted_style(),
        ))]
    } else {
        fields
            .into_iter()
            .map(|(key, value)| {
                let key: String = key.chars().take(MAX_KEY_WIDTH).collect();
                Line::from(vec![
                    Span::styled(format!(" {:<width$} ", key, width = MAX_KEY_WIDTH), styles::muted_style()),
                    Span::styled(value, styles::text_style()),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .title(Span::styled(" Profile ", styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
