use crate::app::AppState;
use crate::domain::UiMode;
use crate::export::ExportFormat;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::TagManager => handle_tag_manager_mode(app, key),
        UiMode::RenamingTag => handle_rename_tag_mode(app, key),
        UiMode::ConfirmBulkDelete => handle_confirm_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    app.clear_status();

    // Ctrl-R redo, like most editors
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('r') => app.redo(),
            KeyCode::Char('c') => return Ok(true),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Timer
        KeyCode::Enter => app.toggle_run_pause(),
        KeyCode::Char('s') => app.stop_selected(),

        KeyCode::Char('c') => app.toggle_complete_selected(),
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('e') => app.start_edit_task(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),

        // History
        KeyCode::Char('u') => app.undo(),
        KeyCode::Char('r') => app.redo(),

        // View
        KeyCode::Char('o') => app.cycle_sort(),
        KeyCode::Char('f') => app.cycle_status_filter(),
        KeyCode::Char('t') => app.cycle_tag_filter(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => app.clear_filters(),

        KeyCode::Char('T') => app.open_tag_manager(),

        // Bulk selection
        KeyCode::Char(' ') => app.toggle_mark(),
        KeyCode::Char('A') => app.toggle_select_all_visible(),
        KeyCode::Char('D') => app.request_bulk_delete(),

        // Export
        KeyCode::Char('x') => app.export(ExportFormat::Json),
        KeyCode::Char('X') => app.export(ExportFormat::Csv),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in input form mode (adding or editing a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        // Switch between title and tags
        KeyCode::Tab | KeyCode::BackTab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_tag_manager_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.tag_manager_up(),
        KeyCode::Down | KeyCode::Char('j') => app.tag_manager_down(),
        KeyCode::Enter => app.filter_by_selected_tag(),
        KeyCode::Char('r') => app.start_rename_tag(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_tag(),
        KeyCode::Char('u') => app.undo(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('T') => app.close_tag_manager(),
        _ => {}
    }
    Ok(false)
}

fn handle_rename_tag_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_rename_tag(),
        KeyCode::Esc => app.cancel_rename_tag(),
        KeyCode::Backspace => app.rename_backspace(),
        KeyCode::Char(c) => app.rename_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Bulk delete confirmation
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_bulk_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_modal(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::TaskStatus;
    use crate::persistence::Settings;
    use crate::store::testing::MemoryRepository;
    use crate::store::TaskStore;
    use tempfile::TempDir;

    fn create_test_app() -> (AppState, TempDir) {
        let clock = ManualClock::at_epoch_secs(0);
        let mut store = TaskStore::open(Box::new(MemoryRepository::default()), Box::new(clock.clone()));
        store.add_task::<&str>("Test task", &[]);
        clock.advance_secs(1);
        store.add_task("Task 2", &["work"]);

        let temp_dir = tempfile::tempdir().unwrap();
        let app = AppState::new(store, Settings::default(), temp_dir.path().to_path_buf());
        (app, temp_dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let (mut app, _dir) = create_test_app();
        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _dir) = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_add_task() {
        let (mut app, _dir) = create_test_app();
        let initial_count = app.store.tasks().len();

        // Press 'a' to open form
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.is_some());

        // Keys that are commands in normal mode are plain text here
        type_text(&mut app, "quad");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "x, y");

        // Submit with Enter
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.tasks().len(), initial_count + 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.selected_task().unwrap().tags, vec!["x", "y"]);
    }

    #[test]
    fn test_handle_timer_keys() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.selected_task().unwrap().status, TaskStatus::InProgress);

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.selected_task().unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn test_handle_undo_and_ctrl_redo() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert_eq!(app.store.tasks().len(), 1);

        handle_key(&mut app, key(KeyCode::Char('u'))).unwrap();
        assert_eq!(app.store.tasks().len(), 2);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(app.store.tasks().len(), 1);
    }

    #[test]
    fn test_handle_search_escape_restores_list() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        type_text(&mut app, "work");
        assert_eq!(app.visible().len(), 1);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.visible().len(), 2);
    }

    #[test]
    fn test_handle_bulk_delete_confirm_and_cancel() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('A'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('D'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmBulkDelete);

        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.tasks().len(), 2);

        handle_key(&mut app, key(KeyCode::Char('D'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_handle_tag_manager_rename() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('T'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::TagManager);

        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::RenamingTag);
        for _ in 0.."work".len() {
            handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut app, "office");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.tags(), vec!["office"]);
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
