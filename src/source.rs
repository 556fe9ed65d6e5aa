//! Task producers and the lane-building policy.
//!
//! A `TaskSource` yields a flat list of task records. `build_snapshot` turns that
//! list into the three board lanes: pending tasks split on whether they were
//! started, both sorted by urgency, plus a capped list of completed tasks.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info, warn};

use crate::error::{KanbanError, Result};
use crate::task::{TaskRecord, TaskStatus};
use crate::tui::board::Snapshot;

/// Anything that can hand the board a list of task records.
pub trait TaskSource {
    /// Fetch pending and completed tasks matching `filters`.
    fn fetch(&self, filters: &[String]) -> Result<Vec<TaskRecord>>;
}

/// Knobs for how records are distributed over the lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanePolicy {
    pub max_completed: usize,
    pub due_window_days: i64,
}

impl Default for LanePolicy {
    fn default() -> Self {
        LanePolicy {
            max_completed: 30,
            due_window_days: 7,
        }
    }
}

/// Reads tasks by shelling out to `task ... export`.
pub struct TaskwarriorSource {
    binary: String,
}

impl TaskwarriorSource {
    pub fn new(binary: impl Into<String>) -> Self {
        TaskwarriorSource { binary: binary.into() }
    }

    fn export(&self, status: &str, filters: &[String]) -> Result<Vec<TaskRecord>> {
        let mut args = vec!["rc.json.depends.array=no".to_string(), status.to_string()];
        args.extend(filters.iter().cloned());
        args.push("export".to_string());

        let command_line = format!("{} {}", self.binary, args.join(" "));
        debug!(command = %command_line, "running task export");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|source| KanbanError::TaskBinaryMissing {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(KanbanError::TaskCommand {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_export(&String::from_utf8(output.stdout)?)
    }
}

impl TaskSource for TaskwarriorSource {
    fn fetch(&self, filters: &[String]) -> Result<Vec<TaskRecord>> {
        let mut tasks = self.export("status:pending", filters)?;
        tasks.extend(self.export("status:completed", filters)?);
        Ok(tasks)
    }
}

/// Reads a saved `task export` JSON array from disk.
///
/// Filters are not interpreted; the file is taken as already filtered.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: &Path) -> Self {
        JsonFileSource { path: path.to_path_buf() }
    }
}

impl TaskSource for JsonFileSource {
    fn fetch(&self, _filters: &[String]) -> Result<Vec<TaskRecord>> {
        let data = fs::read_to_string(&self.path).map_err(|source| KanbanError::ReadExport {
            path: self.path.clone(),
            source,
        })?;
        parse_export(&data)
    }
}

/// Parse the JSON array emitted by `task export`.
///
/// Only a payload that is not a JSON array is an error. Entries that are not
/// task objects are logged and skipped.
pub fn parse_export(data: &str) -> Result<Vec<TaskRecord>> {
    // Older TaskWarrior versions emit one object per line inside the array.
    let flattened = data.replace('\n', "");
    if flattened.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<serde_json::Value> = serde_json::from_str(&flattened)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!(index, "skipping malformed export entry: {e}");
                None
            }
        })
        .collect())
}

/// Split records into Backlog / In Progress / Done and apply the date policies.
pub fn build_snapshot(records: Vec<TaskRecord>, policy: &LanePolicy, now: DateTime<Utc>) -> Snapshot {
    let mut backlog = Vec::new();
    let mut in_progress = Vec::new();
    let mut done = Vec::new();

    for mut task in records {
        if task.is_completed() {
            done.push(task);
            continue;
        }
        if task.status.is_some_and(|s| s != TaskStatus::Pending) {
            continue;
        }
        apply_date_policy(&mut task, policy, now);
        if task.is_started() {
            in_progress.push(task);
        } else {
            backlog.push(task);
        }
    }

    sort_by_urgency(&mut backlog);
    sort_by_urgency(&mut in_progress);
    done.truncate(policy.max_completed);

    info!(
        backlog = backlog.len(),
        in_progress = in_progress.len(),
        done = done.len(),
        "built board snapshot"
    );

    Snapshot {
        columns: [backlog, in_progress, done],
        taken_at: now,
    }
}

/// Most urgent first; tasks without an urgency score sink to the bottom.
fn sort_by_urgency(tasks: &mut [TaskRecord]) {
    tasks.sort_by(|a, b| {
        let a = a.urgency.unwrap_or(f64::NEG_INFINITY);
        let b = b.urgency.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });
}

/// Only near-term due dates and this week's scheduled dates are shown.
fn apply_date_policy(task: &mut TaskRecord, policy: &LanePolicy, now: DateTime<Utc>) {
    if let Some(due) = task.due {
        if (due - now).num_days() > policy.due_window_days {
            task.due = None;
        }
    }
    if let Some(scheduled) = task.scheduled {
        if scheduled.iso_week() != now.iso_week() {
            task.scheduled = None;
        }
    }
}
