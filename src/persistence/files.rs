use crate::error::StoreError;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Environment variable that pins the data directory
pub const DIR_ENV_VAR: &str = "TASKY_DIR";

const DIR_NAME: &str = ".tasky";

/// Get the tasky directory - `TASKY_DIR` wins, then a local .tasky, then ~/.tasky
pub fn get_tasky_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(DIR_ENV_VAR) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_tasky(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DIR_NAME))
}

/// Find local .tasky directory by walking up the directory tree
fn find_local_tasky(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Ensure the tasky directory exists
pub fn ensure_tasky_dir() -> Result<PathBuf> {
    let dir = get_tasky_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .tasky directory in the current directory
pub fn init_local_tasky() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let dir = current_dir.join(DIR_NAME);

    if dir.exists() {
        anyhow::bail!("Tasky directory already exists: {}", dir.display());
    }

    fs::create_dir_all(&dir).with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir)
}

pub fn tasks_file(dir: &Path) -> PathBuf {
    dir.join("tasks.json")
}

pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join("settings.json")
}

pub fn log_file(dir: &Path) -> PathBuf {
    dir.join("tasky.log")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), StoreError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::io(temp_file.path(), e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp_file.path(), e))?;

    temp_file.persist(path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        message: e.error.to_string(),
    })?;

    Ok(())
}

/// Read file content; `None` if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>, StoreError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}
