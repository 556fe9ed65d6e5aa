//! Task record data structure.
//!
//! This module defines the read-only `TaskRecord` the board displays. Records are
//! deserialized from TaskWarrior's JSON export; the board never writes them back.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Date format used by `task export` (e.g. `20190815T220000Z`).
pub const TASKWARRIOR_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Lifecycle status as reported by TaskWarrior.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Deleted,
    Waiting,
    Recurring,
    #[serde(other)]
    Unknown,
}

/// A single task as exported by the producer.
///
/// `description` is always present (an absent, null or non-string value
/// becomes an empty string). Every other field is optional, and a value of the
/// wrong type or a date that fails to parse is treated as absent rather than
/// rejecting the whole record. Fields the board has no use for are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient_description")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub urgency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub scheduled: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Create a record with just a description and optional project.
    pub fn new(description: impl Into<String>, project: Option<&str>) -> Self {
        TaskRecord {
            description: description.into(),
            project: project.map(str::to_string),
            ..Default::default()
        }
    }

    /// A pending task counts as started once it carries a `start` timestamp.
    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Whether TaskWarrior reports this task as completed.
    pub fn is_completed(&self) -> bool {
        self.status == Some(TaskStatus::Completed)
    }
}

/// Parse a TaskWarrior compact timestamp.
pub fn parse_tw_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TASKWARRIOR_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Accept any JSON value; keep it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_description<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => parse_tw_date(&s),
        _ => None,
    })
}
