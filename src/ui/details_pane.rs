use crate::app::AppState;
use crate::domain::format_elapsed;
use crate::ui::styles::{border_style, default_style, status_style, tag_style, title_style};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task, with its live timer
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task() else {
        let empty = Paragraph::new("No task selected").block(block);
        f.render_widget(empty, area);
        return;
    };

    let now = app.store.now();
    let mut lines = Vec::new();

    // Title
    lines.push(Line::from(vec![
        Span::styled("Title: ", title_style()),
        Span::raw(task.title.as_str()),
    ]));
    lines.push(Line::raw(""));

    // Elapsed, live while running
    lines.push(Line::from(vec![
        Span::styled("Elapsed: ", title_style()),
        Span::styled(format_elapsed(task.live_elapsed(now)), status_style(task.status)),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Status:  ", title_style()),
        Span::styled(task.status.label(), status_style(task.status)),
    ]));

    if let Some(started) = task.last_start_time {
        lines.push(Line::from(vec![
            Span::styled("Since:   ", title_style()),
            Span::raw(started.with_timezone(&Local).format("%H:%M:%S").to_string()),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Done:    ", title_style()),
        Span::raw(if task.is_completed { "yes" } else { "no" }),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Created: ", title_style()),
        Span::raw(task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
    ]));
    lines.push(Line::raw(""));

    if task.tags.is_empty() {
        lines.push(Line::from(Span::styled("Tags: (none)", default_style())));
    } else {
        let mut spans = vec![Span::styled("Tags: ", title_style())];
        for tag in &task.tags {
            spans.push(Span::styled(format!("[{}] ", tag), tag_style()));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
