use crate::app::AppState;
use crate::ui::styles::{hint_style, modal_title_style};
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("Enter start/pause   "),
        Span::raw("s stop   "),
        Span::raw("c complete   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("d delete   "),
        Span::raw("u/r undo/redo   "),
        Span::raw("o sort   "),
        Span::raw("f/t filter   "),
        Span::raw("/ search   "),
        Span::raw("T tags   "),
        Span::raw("space/A select   "),
        Span::raw("D bulk delete   "),
        Span::raw("x/X export   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the bottom bar: active view options, undo state and the last status message
pub fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::raw(format!(
        " Sort: {}  ·  Status: {}",
        app.view.sort.label(),
        app.view.status_filter.label()
    ))];

    if let Some(tag) = &app.view.tag_filter {
        spans.push(Span::raw(format!("  ·  Tag: {}", tag)));
    }
    if !app.view.search.is_empty() {
        spans.push(Span::raw(format!("  ·  Search: \"{}\"", app.view.search)));
    }
    if !app.selection.is_empty() {
        spans.push(Span::raw(format!("  ·  {} selected", app.selection.len())));
    }
    spans.push(Span::raw(format!(
        "  ·  undo {} redo {}",
        if app.store.can_undo() { "✓" } else { "-" },
        if app.store.can_redo() { "✓" } else { "-" },
    )));

    if let Some(message) = &app.status_message {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(message.clone(), modal_title_style()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
