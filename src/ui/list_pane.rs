use crate::app::AppState;
use crate::domain::{check_glyph, format_elapsed, status_badge, Task};
use crate::ui::styles::{border_style, marked_style, row_style, selected_style, status_style, tag_style, title_style};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let visible = app.visible();
    let now = app.store.now();

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let marked = app.selection.contains(&task.id);
            let line = create_task_line(task, marked, app.settings.use_emoji, now);
            ListItem::new(line).style(row_style(task))
        })
        .collect();

    let total = app.store.tasks().len();
    let title = if app.view.is_filtered() {
        format!(" Tasks ({} of {}) ", visible.len(), total)
    } else {
        format!(" Tasks ({}) ", total)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .highlight_style(selected_style());

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected_index.min(visible.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: ● ✅ Write report  ⏱ 00:01:30 (RUNNING) [work] [urgent]
fn create_task_line(task: &Task, marked: bool, use_emoji: bool, now: DateTime<Utc>) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::styled(if marked { "● " } else { "  " }, marked_style()));
    spans.push(Span::raw(format!("{} ", check_glyph(task.is_completed, use_emoji))));
    spans.push(Span::raw(task.title.clone()));
    spans.push(Span::raw("  "));

    let clock = if use_emoji { "⏱" } else { "t" };
    spans.push(Span::raw(format!("{} {} ", clock, format_elapsed(task.live_elapsed(now)))));

    spans.push(Span::styled(status_badge(task), status_style(task.status)));

    for tag in &task.tags {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]", tag), tag_style()));
    }

    Line::from(spans)
}
