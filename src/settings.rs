//! User settings loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::source::LanePolicy;
use crate::tui::board::CONTROL_LINES;

const MIN_CONTROL_LINES: u16 = 5;
const MAX_CONTROL_LINES: u16 = 20;
const MAX_DUE_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name or path of the TaskWarrior executable.
    pub task_binary: String,
    /// Cap on the number of tasks in the Done lane.
    pub max_completed: usize,
    /// Due dates further out than this many days are not shown.
    pub due_window_days: i64,
    /// Height of the bottom control strip.
    pub control_lines: u16,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let policy = LanePolicy::default();
        Settings {
            task_binary: "task".to_string(),
            max_completed: policy.max_completed,
            due_window_days: policy.due_window_days,
            control_lines: CONTROL_LINES,
            log_level: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("taskwarrior-kanban");
        path.push("settings.toml");
        Some(path)
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error the caller may choose to downgrade to a warning.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        Self::load_from_path(&path)
    }

    fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let mut settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        settings.validate();
        Ok(settings)
    }

    fn validate(&mut self) {
        self.control_lines = self.control_lines.clamp(MIN_CONTROL_LINES, MAX_CONTROL_LINES);
        self.due_window_days = self.due_window_days.clamp(0, MAX_DUE_WINDOW_DAYS);
        if self.task_binary.trim().is_empty() {
            self.task_binary = Self::default().task_binary;
        }
    }

    pub fn lane_policy(&self) -> LanePolicy {
        LanePolicy {
            max_completed: self.max_completed,
            due_window_days: self.due_window_days,
        }
    }
}
