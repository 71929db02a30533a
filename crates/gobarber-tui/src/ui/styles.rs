use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const BACKGROUND: Color = Color::Rgb(49, 46, 56);
pub const ACCENT: Color = Color::Rgb(255, 144, 0);
pub const TEXT: Color = Color::Rgb(244, 237, 232);
pub const ERROR: Color = Color::Rgb(197, 48, 48);
pub const MUTED: Color = Color::Rgb(102, 99, 96);
pub const HIGHLIGHT: Color = Color::Rgb(35, 33, 41);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn text_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn button_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(ACCENT)
            .fg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    }
}

pub fn link_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(TEXT)
    }
}

/// Label/icon color of an input: accent when focused or filled
pub fn field_label_style(focused: bool, filled: bool) -> Style {
    if focused || filled {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Bracket color of an input: error wins over focus
pub fn field_frame_style(focused: bool, errored: bool) -> Style {
    if errored {
        Style::default().fg(ERROR)
    } else if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn screen_style() -> Style {
    Style::default().bg(BACKGROUND).fg(TEXT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(HIGHLIGHT).fg(TEXT)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
