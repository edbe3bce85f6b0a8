use crate::domain::{all_tags, parse_tags, visible_tasks, Task, UiMode, ViewOptions};
use crate::export::{self, ExportFormat};
use crate::persistence::{save_settings, settings_file, Settings};
use crate::store::TaskStore;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

/// Input form state for adding and editing tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub title: String,
    pub tags: String, // Comma-separated tags
    pub editing_field: usize, // 0 = title, 1 = tags
    /// Task being edited; `None` when adding
    pub editing_id: Option<Uuid>,
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub settings: Settings,
    pub view: ViewOptions,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Ids marked for bulk actions
    pub selection: HashSet<Uuid>,
    pub tag_index: usize,
    pub rename_input: String,
    pub status_message: Option<String>,
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn new(store: TaskStore, settings: Settings, data_dir: PathBuf) -> Self {
        let view = ViewOptions {
            sort: settings.sort,
            status_filter: settings.status_filter,
            ..ViewOptions::default()
        };

        Self {
            store,
            settings,
            view,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            selection: HashSet::new(),
            tag_index: 0,
            rename_input: String::new(),
            status_message: None,
            data_dir,
        }
    }

    /// Tasks in display order
    pub fn visible(&self) -> Vec<&Task> {
        visible_tasks(self.store.tasks(), &self.view)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.selected_task().map(|t| t.id)
    }

    /// Ids of visible tasks whose timer is running
    pub fn running_visible_ids(&self) -> Vec<Uuid> {
        self.visible().iter().filter(|t| t.is_running()).map(|t| t.id).collect()
    }

    pub fn tags(&self) -> Vec<String> {
        all_tags(self.store.tasks())
    }

    pub fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let count = self.visible().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Keep the cursor inside the list and drop selected ids that no longer exist
    fn after_change(&mut self) {
        let count = self.visible().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }

        let tasks = self.store.tasks();
        self.selection.retain(|id| tasks.iter().any(|t| t.id == *id));

        let tag_count = all_tags(tasks).len();
        if self.tag_index >= tag_count {
            self.tag_index = tag_count.saturating_sub(1);
        }
        if let Some(tag) = &self.view.tag_filter {
            if !tasks.iter().any(|t| t.has_tag(tag)) {
                self.view.tag_filter = None;
            }
        }
    }

    /// Start the selected task's timer, or pause it if it is running
    pub fn toggle_run_pause(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, running, completed) = (task.id, task.is_running(), task.is_completed);

        if running {
            self.store.pause_timer(id);
        } else if completed {
            self.set_status("Completed tasks can't be started");
        } else {
            self.store.start_timer(id);
        }
        self.after_change();
    }

    pub fn stop_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.stop_timer(id);
            self.after_change();
        }
    }

    pub fn toggle_complete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle_complete(id);
            self.after_change();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if self.store.delete_task(id) {
                self.set_status("Task deleted (u to undo)");
            }
            self.after_change();
        }
    }

    pub fn undo(&mut self) {
        if self.store.undo() {
            self.set_status("Undone");
        } else {
            self.set_status("Nothing to undo");
        }
        self.after_change();
    }

    pub fn redo(&mut self) {
        if self.store.redo() {
            self.set_status("Redone");
        } else {
            self.set_status("Nothing to redo");
        }
        self.after_change();
    }

    pub fn cycle_sort(&mut self) {
        self.view.sort = self.view.sort.next();
        self.settings.sort = self.view.sort;
        self.set_status(format!("Sort: {}", self.view.sort.label()));
        self.persist_settings();
    }

    pub fn cycle_status_filter(&mut self) {
        self.view.status_filter = self.view.status_filter.next();
        self.settings.status_filter = self.view.status_filter;
        self.selected_index = 0;
        self.persist_settings();
    }

    /// Step the tag filter through every tag, then back to no filter
    pub fn cycle_tag_filter(&mut self) {
        let tags = self.tags();
        self.view.tag_filter = match &self.view.tag_filter {
            None => tags.first().cloned(),
            Some(current) => match tags.iter().position(|t| t == current) {
                Some(i) => tags.get(i + 1).cloned(),
                None => tags.first().cloned(),
            },
        };
        self.selected_index = 0;
    }

    pub fn clear_filters(&mut self) {
        self.view.tag_filter = None;
        self.view.search.clear();
        self.view.status_filter = Default::default();
        self.settings.status_filter = self.view.status_filter;
        self.selected_index = 0;
        self.persist_settings();
    }

    fn persist_settings(&self) {
        if let Err(err) = save_settings(settings_file(&self.data_dir), &self.settings) {
            warn!(error = %err, "failed to save settings");
        }
    }

    /// Toggle the bulk selection mark on the task under the cursor
    pub fn toggle_mark(&mut self) {
        if let Some(id) = self.selected_id() {
            if !self.selection.remove(&id) {
                self.selection.insert(id);
            }
        }
    }

    /// Select every visible task, or clear the selection if they already are
    pub fn toggle_select_all_visible(&mut self) {
        let visible: HashSet<Uuid> = self.visible().iter().map(|t| t.id).collect();
        if !visible.is_empty() && visible.is_subset(&self.selection) {
            self.selection.clear();
        } else {
            self.selection = visible;
        }
    }

    pub fn request_bulk_delete(&mut self) {
        if self.selection.is_empty() {
            self.set_status("No tasks selected");
        } else {
            self.ui_mode = UiMode::ConfirmBulkDelete;
        }
    }

    pub fn confirm_bulk_delete(&mut self) {
        let count = self.selection.len();
        if self.store.delete_tasks(&self.selection) {
            self.set_status(format!("Deleted {} task(s) (u to undo)", count));
        }
        self.selection.clear();
        self.ui_mode = UiMode::Normal;
        self.after_change();
    }

    pub fn cancel_modal(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the input form prefilled with the selected task
    pub fn start_edit_task(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.input_form = Some(InputFormState {
            title: task.title.clone(),
            tags: task.tags.join(", "),
            editing_field: 0,
            editing_id: Some(task.id),
        });
        self.ui_mode = UiMode::EditingTask;
    }

    /// Toggle between editing fields in input form (title -> tags)
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.push(c),
                _ => form.tags.push(c),
            }
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.pop(),
                _ => form.tags.pop(),
            };
        }
    }

    /// Submit input form, adding or updating a task
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        if form.title.trim().is_empty() {
            self.set_status("Title can't be empty");
            return;
        }
        let tags = parse_tags(&form.tags);

        match form.editing_id {
            Some(id) => {
                if let Some(task) = self.store.get(id) {
                    let updated = Task {
                        title: form.title,
                        tags,
                        ..task.clone()
                    };
                    self.store.update_task(&updated);
                }
            }
            None => {
                if let Some(id) = self.store.add_task(&form.title, &tags) {
                    self.select_task_if_visible(id);
                }
            }
        }
        self.after_change();
    }

    fn select_task_if_visible(&mut self, id: Uuid) {
        if let Some(index) = self.visible().iter().position(|t| t.id == id) {
            self.selected_index = index;
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_add_char(&mut self, c: char) {
        self.view.search.push(c);
        self.selected_index = 0;
    }

    pub fn search_backspace(&mut self) {
        self.view.search.pop();
        self.selected_index = 0;
    }

    /// Keep the query and return to the list
    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.view.search.clear();
        self.selected_index = 0;
        self.ui_mode = UiMode::Normal;
    }

    pub fn open_tag_manager(&mut self) {
        self.tag_index = 0;
        self.ui_mode = UiMode::TagManager;
    }

    pub fn selected_tag(&self) -> Option<String> {
        self.tags().get(self.tag_index).cloned()
    }

    pub fn tag_manager_up(&mut self) {
        self.tag_index = self.tag_index.saturating_sub(1);
    }

    pub fn tag_manager_down(&mut self) {
        if self.tag_index + 1 < self.tags().len() {
            self.tag_index += 1;
        }
    }

    /// Filter the list by the tag under the cursor and close the manager
    pub fn filter_by_selected_tag(&mut self) {
        if let Some(tag) = self.selected_tag() {
            self.view.tag_filter = Some(tag);
            self.selected_index = 0;
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn start_rename_tag(&mut self) {
        if let Some(tag) = self.selected_tag() {
            self.rename_input = tag;
            self.ui_mode = UiMode::RenamingTag;
        }
    }

    pub fn rename_add_char(&mut self, c: char) {
        self.rename_input.push(c);
    }

    pub fn rename_backspace(&mut self) {
        self.rename_input.pop();
    }

    pub fn submit_rename_tag(&mut self) {
        let Some(old) = self.selected_tag() else {
            self.ui_mode = UiMode::TagManager;
            return;
        };
        let new = self.rename_input.trim().to_string();

        if self.store.rename_tag(&old, &new) {
            if self.view.tag_filter.as_deref() == Some(old.as_str()) {
                self.view.tag_filter = Some(new.clone());
            }
            if let Some(index) = self.tags().iter().position(|t| *t == new) {
                self.tag_index = index;
            }
            self.set_status(format!("Renamed tag '{}' to '{}'", old, new));
        }
        self.rename_input.clear();
        self.ui_mode = UiMode::TagManager;
        self.after_change();
    }

    pub fn cancel_rename_tag(&mut self) {
        self.rename_input.clear();
        self.ui_mode = UiMode::TagManager;
    }

    pub fn delete_selected_tag(&mut self) {
        if let Some(tag) = self.selected_tag() {
            if self.store.delete_tag(&tag) {
                self.set_status(format!("Deleted tag '{}'", tag));
            }
            self.after_change();
        }
    }

    pub fn close_tag_manager(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Write an export file into the data directory
    pub fn export(&mut self, format: ExportFormat) {
        let path = format.default_path(&self.data_dir);
        let now = self.store.now();
        match export::write_export(self.store.tasks(), format, now, &path) {
            Ok(()) => self.set_status(format!("Exported to {}", path.display())),
            Err(err) => {
                warn!(error = %err, "export failed");
                self.set_status(format!("Export failed: {}", err));
            }
        }
    }
}
