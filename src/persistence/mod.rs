pub mod files;
pub mod settings;
pub mod tasks;

pub use files::{atomic_write, ensure_tasky_dir, init_local_tasky, log_file, read_file, settings_file, tasks_file};
pub use settings::{load_settings, save_settings, Settings};
pub use tasks::JsonTaskFile;
