use super::enums::{SortOption, StatusFilter};
use super::task::Task;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Filter, search and sort settings for the task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub sort: SortOption,
    pub status_filter: StatusFilter,
    pub tag_filter: Option<String>,
    pub search: String,
}

impl ViewOptions {
    /// Whether any filter narrows the list
    pub fn is_filtered(&self) -> bool {
        self.status_filter != StatusFilter::All || self.tag_filter.is_some() || !self.search.trim().is_empty()
    }
}

/// Tasks to display, in display order
pub fn visible_tasks<'a>(tasks: &'a [Task], options: &ViewOptions) -> Vec<&'a Task> {
    let query = options.search.trim().to_lowercase();

    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| query.is_empty() || matches_search(task, &query))
        .filter(|task| options.status_filter.matches(task.status))
        .filter(|task| match &options.tag_filter {
            Some(tag) => task.has_tag(tag),
            None => true,
        })
        .collect();

    visible.sort_by(|a, b| compare(a, b, options.sort));
    visible
}

fn matches_search(task: &Task, query: &str) -> bool {
    task.title.to_lowercase().contains(query) || task.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

fn compare(a: &Task, b: &Task, sort: SortOption) -> Ordering {
    match sort {
        SortOption::DateNewest => b.created_at.cmp(&a.created_at),
        SortOption::DateOldest => a.created_at.cmp(&b.created_at),
        SortOption::TitleAz => compare_titles(a, b),
        SortOption::TitleZa => compare_titles(b, a),
    }
}

fn compare_titles(a: &Task, b: &Task) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

/// Every distinct tag in the collection, sorted
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    let tags: BTreeSet<&str> = tasks.iter().flat_map(|t| t.tags.iter().map(String::as_str)).collect();
    tags.into_iter().map(str::to_string).collect()
}

/// Format seconds as HH:MM:SS
pub fn format_elapsed(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Status badge text for list rows
pub fn status_badge(task: &Task) -> &'static str {
    if task.is_completed {
        return "(DONE)";
    }
    match task.status {
        super::TaskStatus::Pending => "",
        super::TaskStatus::InProgress => "(RUNNING)",
        super::TaskStatus::Paused => "(PAUSED)",
    }
}

/// Checkbox glyph for completion / selection
pub fn check_glyph(checked: bool, use_emoji: bool) -> &'static str {
    match (checked, use_emoji) {
        (true, true) => "✅",
        (false, true) => "⬜",
        (true, false) => "[x]",
        (false, false) => "[ ]",
    }
}
