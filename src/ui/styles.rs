use crate::domain::{Task, TaskStatus};
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Cursor row highlight
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Row style: completed tasks are struck through
pub fn row_style(task: &Task) -> Style {
    if task.is_completed {
        Style::default().fg(Color::Green).add_modifier(Modifier::CROSSED_OUT)
    } else {
        default_style()
    }
}

/// Timer badge and elapsed colour for a status
pub fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::InProgress => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        TaskStatus::Paused => Style::default().fg(Color::Yellow),
        TaskStatus::Pending => Style::default().fg(Color::Gray),
    }
}

/// Bulk selection marker
pub fn marked_style() -> Style {
    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style, also used for typed input
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Destructive confirmation text
pub fn warning_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Tag badge style
pub fn tag_style() -> Style {
    Style::default().fg(Color::Blue)
}
