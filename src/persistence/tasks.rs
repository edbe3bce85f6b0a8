use crate::domain::Task;
use crate::error::StoreError;
use crate::persistence::{atomic_write, read_file};
use crate::store::TaskRepository;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct StoredTasksRef<'a> {
    schema_version: u32,
    tasks: &'a [Task],
}

/// On-disk layouts accepted by `load`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredTasks {
    Versioned { schema_version: u32, tasks: Vec<Task> },
    /// Plain array: older saves and JSON exports
    Bare(Vec<Task>),
}

/// Task collection stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonTaskFile {
    path: PathBuf,
}

impl JsonTaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JsonTaskFile {
    fn parse(&self, content: &str) -> Result<Vec<Task>, StoreError> {
        let stored: StoredTasks = serde_json::from_str(content).map_err(|e| StoreError::json(&self.path, e))?;
        match stored {
            StoredTasks::Versioned { schema_version, tasks } => {
                if schema_version > SCHEMA_VERSION {
                    return Err(StoreError::UnsupportedSchema {
                        path: self.path.clone(),
                        found: schema_version,
                        supported: SCHEMA_VERSION,
                    });
                }
                Ok(tasks)
            }
            StoredTasks::Bare(tasks) => Ok(tasks),
        }
    }

    /// First free `<file>.bak`, `<file>.bak.1`, ... next to the task file
    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        let base = PathBuf::from(name);

        let mut candidate = base.clone();
        let mut n = 1;
        while candidate.exists() {
            let mut name = base.as_os_str().to_owned();
            name.push(format!(".{}", n));
            candidate = PathBuf::from(name);
            n += 1;
        }
        candidate
    }

    /// Move a file we can't read out of the way so the next save can't clobber it
    fn set_aside(&self) {
        let backup = self.backup_path();
        match fs::rename(&self.path, &backup) {
            Ok(()) => warn!(path = %self.path.display(), backup = %backup.display(), "moved unreadable task file aside"),
            Err(err) => warn!(path = %self.path.display(), error = %err, "could not move unreadable task file aside"),
        }
    }
}

impl TaskRepository for JsonTaskFile {
    /// An unparseable or newer-schema file is renamed to `<file>.bak` before
    /// the error is returned.
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        let Some(content) = read_file(&self.path)? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        match self.parse(&content) {
            Ok(tasks) => Ok(Some(tasks)),
            Err(err) => {
                self.set_aside();
                Err(err)
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let stored = StoredTasksRef {
            schema_version: SCHEMA_VERSION,
            tasks,
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| StoreError::json(&self.path, e))?;
        atomic_write(&self.path, &json)
    }
}
