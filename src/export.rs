//! JSON and CSV export of the task collection.
//!
//! Exported records carry the live elapsed time at the moment of export, so a
//! running task reports the time of its current run too. `lastStartTime` is
//! left as stored.

use crate::domain::Task;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "ID,Title,Tags,Status,ElapsedTime(seconds),CreatedAt,IsCompleted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Default export target inside the data directory
    pub fn default_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("tasky-export.{}", self.extension()))
    }
}

/// Copy of the collection with elapsed time evaluated at `now`
pub fn export_snapshot(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| Task {
            elapsed_time: task.live_elapsed(now),
            ..task.clone()
        })
        .collect()
}

pub fn render(tasks: &[Task], format: ExportFormat, now: DateTime<Utc>) -> Result<String> {
    let snapshot = export_snapshot(tasks, now);
    match format {
        ExportFormat::Json => to_json(&snapshot),
        ExportFormat::Csv => Ok(to_csv(&snapshot)),
    }
}

pub fn to_json(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")
}

pub fn to_csv(tasks: &[Task]) -> String {
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for task in tasks {
        lines.push(format!(
            "{},{},{},{},{},{},{}",
            task.id,
            quote(&task.title),
            quote(&task.tags.join("|")),
            task.status.to_tag(),
            task.elapsed_time,
            task.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            task.is_completed,
        ));
    }

    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render and write an export file
pub fn write_export(tasks: &[Task], format: ExportFormat, now: DateTime<Utc>, path: &Path) -> Result<()> {
    let content = render(tasks, format, now)?;
    crate::persistence::atomic_write(path, &content)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    tracing::info!(path = %path.display(), count = tasks.len(), "exported tasks");
    Ok(())
}
