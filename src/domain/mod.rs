pub mod collection;
pub mod enums;
pub mod task;
pub mod views;

pub use enums::{SortOption, StatusFilter, TaskStatus, UiMode};
pub use task::{parse_tags, Task};
pub use views::{all_tags, check_glyph, format_elapsed, status_badge, visible_tasks, ViewOptions};
