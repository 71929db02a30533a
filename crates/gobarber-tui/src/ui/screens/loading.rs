use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::styles;

use super::centered_rect_fixed;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Loop ticks per spinner frame
const TICKS_PER_FRAME: usize = 2;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let spinner = SPINNER[(app.tick / TICKS_PER_FRAME) % SPINNER.len()];
    let area = centered_rect_fixed(30, 1, area);
    let line = Line::from(vec![
        Span::styled(spinner, styles::highlight_style()),
        Span::styled(" Loading session...", styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
