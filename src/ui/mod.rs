pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::{render_keybindings, render_status_bar};
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_bulk_delete, render_search_prompt, render_tag_manager};
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_status_bar(f, app, layout.status_area);

    match app.ui_mode {
        UiMode::AddingTask | UiMode::EditingTask => render_input_form(f, app, size),
        UiMode::Searching => render_search_prompt(f, app, size),
        UiMode::TagManager | UiMode::RenamingTag => render_tag_manager(f, app, size),
        UiMode::ConfirmBulkDelete => render_confirm_bulk_delete(f, app, size),
        UiMode::Normal => {}
    }
}
