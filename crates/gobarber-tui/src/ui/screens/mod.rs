//! Screen content, one module per route / auth screen.

pub mod dashboard;
pub mod loading;
pub mod sign_in;
pub mod sign_up;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
};

use super::form::{Form, FormFocus};
use super::styles;

/// Width of the input box between the brackets
const FIELD_WIDTH: usize = 28;

/// Logo drawn at the top of the unauthenticated screens
pub const LOGO: [&str; 3] = [
    "╔═╗╔═╗  ╔╗ ╔═╗╦═╗╔╗ ╔═╗╦═╗",
    "║ ╦║ ║  ╠╩╗╠═╣╠╦╝╠╩╗║╣ ╠╦╝",
    "╚═╝╚═╝  ╚═╝╩ ╩╩╚═╚═╝╚═╝╩╚═",
];

pub fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| Line::from(Span::styled(*row, styles::title_style())))
        .collect()
}

/// Lines for a form: each field with its inline error, then the button and link
pub fn form_lines(form: &Form) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for field in form.fields() {
        let focused = field.is_focused();
        let errored = field.error().is_some();
        let frame_style = styles::field_frame_style(focused, errored);

        let mut shown = field.display_value();
        let len = shown.chars().count();
        if len > FIELD_WIDTH - 1 {
            // Keep the tail visible while typing
            shown = shown.chars().skip(len - (FIELD_WIDTH - 1)).collect();
        }
        let cursor = if focused { "▌" } else { "" };
        let value = format!("{:<width$}", format!("{}{}", shown, cursor), width = FIELD_WIDTH);

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>10} ", field.label()),
                styles::field_label_style(focused, field.is_filled()),
            ),
            Span::styled("[", frame_style),
            Span::styled(value, styles::text_style()),
            Span::styled("]", frame_style),
        ]));

        match field.error() {
            Some(msg) => lines.push(Line::from(Span::styled(
                format!("{:>11}{}", "", msg),
                styles::error_style(),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    let submit_focused = form.focus() == FormFocus::Submit;
    let label = if submit_focused {
        format!(" ▶ {} ◀ ", form.submit_label())
    } else {
        format!("   {}   ", form.submit_label())
    };
    lines.push(Line::from(vec![
        Span::raw(format!("{:>11}", "")),
        Span::styled(label, styles::button_style(submit_focused)),
    ]));
    lines.push(Line::from(""));

    let link_focused = form.focus() == FormFocus::Link;
    lines.push(Line::from(vec![
        Span::raw(format!("{:>11}", "")),
        Span::styled(form.link_label().to_string(), styles::link_style(link_focused)),
    ]));

    lines
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
