use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::routes::AuthScreen;
use crate::ui::styles;

use super::{centered_rect_fixed, form_lines, logo_lines};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(48, 16, area);

    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        AuthScreen::SignIn.title(),
        styles::text_style(),
    )));
    lines.push(Line::from(""));
    lines.extend(form_lines(&app.sign_in_form));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
