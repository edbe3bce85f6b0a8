use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, selected_style, warning_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, modal_title_style()))
        .style(modal_bg_style())
}

fn render_lines(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let height = (lines.len() as u16 + 2).min(area.height);
    let modal_area = create_modal_area(area, height);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(modal_block(title))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Render the search prompt
pub fn render_search_prompt(f: &mut Frame, app: &AppState, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(app.view.search.as_str(), modal_title_style()),
            Span::styled("█", modal_title_style()),
        ]),
        Line::raw(""),
        Line::raw(format!("{} matching  ·  Enter to keep  ·  Esc to clear", app.visible().len())),
    ];
    render_lines(f, area, " Search title or tag ", lines);
}

/// Render the tag manager, or the rename prompt on top of it
pub fn render_tag_manager(f: &mut Frame, app: &AppState, area: Rect) {
    let tags = app.tags();
    let mut lines = vec![Line::raw("")];

    if tags.is_empty() {
        lines.push(Line::raw("  No tags yet"));
    }
    for (index, tag) in tags.iter().enumerate() {
        let count = app.store.tasks().iter().filter(|t| t.has_tag(tag)).count();
        let text = format!("  {}  ({})", tag, count);
        if index == app.tag_index {
            lines.push(Line::from(Span::styled(text, selected_style())));
        } else {
            lines.push(Line::raw(text));
        }
    }

    lines.push(Line::raw(""));
    if app.ui_mode == UiMode::RenamingTag {
        lines.push(Line::from(vec![
            Span::raw("Rename to: "),
            Span::styled(app.rename_input.as_str(), modal_title_style()),
            Span::styled("█", modal_title_style()),
        ]));
        lines.push(Line::raw("Enter to rename  ·  Esc to cancel"));
    } else {
        lines.push(Line::from(vec![
            Span::styled("[Enter]", modal_title_style()),
            Span::raw(" filter  "),
            Span::styled("[r]", modal_title_style()),
            Span::raw(" rename  "),
            Span::styled("[d]", modal_title_style()),
            Span::raw(" delete  "),
            Span::styled("[Esc]", modal_title_style()),
            Span::raw(" close"),
        ]));
    }

    render_lines(f, area, " Tags ", lines);
}

/// Render the bulk delete confirmation
pub fn render_confirm_bulk_delete(f: &mut Frame, app: &AppState, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("  Delete {} selected task(s)?", app.selection.len()),
            warning_style(),
        )),
        Line::raw("  This can be undone with u."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Delete  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Cancel"),
        ]),
    ];
    render_lines(f, area, " Confirm ", lines);
}
