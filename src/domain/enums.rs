use serde::{Deserialize, Serialize};

/// Timer state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Paused,
}

impl TaskStatus {
    /// Wire tag, as written to CSV exports
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Paused => "PAUSED",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Paused => "Paused",
        }
    }
}

/// Ordering of the visible task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOption {
    #[default]
    DateNewest,
    DateOldest,
    #[serde(rename = "TITLE_AZ")]
    TitleAz,
    #[serde(rename = "TITLE_ZA")]
    TitleZa,
}

impl SortOption {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DateNewest => "Newest first",
            Self::DateOldest => "Oldest first",
            Self::TitleAz => "Title A-Z",
            Self::TitleZa => "Title Z-A",
        }
    }

    /// Next option in the UI cycle
    pub fn next(&self) -> Self {
        match self {
            Self::DateNewest => Self::DateOldest,
            Self::DateOldest => Self::TitleAz,
            Self::TitleAz => Self::TitleZa,
            Self::TitleZa => Self::DateNewest,
        }
    }
}

/// Status filter for the visible task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    InProgress,
    Paused,
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == TaskStatus::Pending,
            Self::InProgress => status == TaskStatus::InProgress,
            Self::Paused => status == TaskStatus::Paused,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => TaskStatus::Pending.label(),
            Self::InProgress => TaskStatus::InProgress.label(),
            Self::Paused => TaskStatus::Paused.label(),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Paused,
            Self::Paused => Self::All,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    Searching,
    TagManager,
    RenamingTag,
    ConfirmBulkDelete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_serializes_as_stored_tags() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let parsed: TaskStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(parsed, TaskStatus::Paused);
        assert_eq!(TaskStatus::Pending.to_tag(), "PENDING");
    }

    #[test]
    fn test_sort_option_serde_names() {
        assert_eq!(serde_json::to_string(&SortOption::TitleAz).unwrap(), "\"TITLE_AZ\"");
        assert_eq!(
            serde_json::to_string(&SortOption::DateNewest).unwrap(),
            "\"DATE_NEWEST\""
        );
        let parsed: SortOption = serde_json::from_str("\"TITLE_ZA\"").unwrap();
        assert_eq!(parsed, SortOption::TitleZa);
    }

    #[test]
    fn test_sort_option_cycle_returns_to_start() {
        let mut option = SortOption::default();
        for _ in 0..4 {
            option = option.next();
        }
        assert_eq!(option, SortOption::DateNewest);
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(TaskStatus::Paused));
        assert!(StatusFilter::InProgress.matches(TaskStatus::InProgress));
        assert!(!StatusFilter::Pending.matches(TaskStatus::Paused));
        assert_eq!(StatusFilter::Paused.next(), StatusFilter::All);
    }
}
