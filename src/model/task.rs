use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Upper-case badge text shown next to a task
    pub fn badge(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "unknown priority '{}' (expected: low, medium, high)",
                s
            )),
        }
    }
}

/// Opaque task identifier.
///
/// Always held as a string. Numeric ids written by counter-based stores
/// (`"id": 7`) are accepted on load and kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of this id, if it is a plain counter id
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        TaskId(n.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => TaskId(n.to_string()),
            RawId::Text(s) => TaskId(s),
        })
    }
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "priority_or_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    /// Informational only; older records without it load as the Unix epoch
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a fresh, not-yet-completed task. `text` is stored as given;
    /// callers are expected to have trimmed and validated it.
    pub fn new(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Task {
            id,
            text,
            completed: false,
            priority: Priority::default(),
            due_date: None,
            created_at,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// `null` and absent both mean medium
fn priority_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Priority, D::Error> {
    Ok(Option::<Priority>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `null`, `""` and `YYYY-MM-DD`
fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_camel_case_fields() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let task = Task::new(TaskId::from("abc"), "buy milk".into(), created)
            .with_priority(Priority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2025, 3, 4));

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "text": "buy milk",
                "completed": false,
                "priority": "high",
                "dueDate": "2025-03-04",
                "createdAt": "2025-03-01T09:30:00Z",
            })
        );
    }

    #[test]
    fn numeric_id_is_accepted() {
        let task: Task =
            serde_json::from_str(r#"{"id":1,"text":"buy milk","completed":false}"#).unwrap();
        assert_eq!(task.id, TaskId::from(1));
        assert_eq!(task.id.as_number(), Some(1));
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"x","text":"walk dog"}"#).unwrap();
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
        assert_eq!(task.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn null_and_empty_optionals_take_defaults() {
        let task: Task = serde_json::from_str(
            r#"{"id":"x","text":"t","priority":null,"dueDate":""}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);

        let task: Task =
            serde_json::from_str(r#"{"id":"x","text":"t","dueDate":null}"#).unwrap();
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn bad_due_date_is_rejected() {
        let result: Result<Task, _> =
            serde_json::from_str(r#"{"id":"x","text":"t","dueDate":"next week"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn priority_from_str() {
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
    }
}
