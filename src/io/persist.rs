use tracing::warn;

use crate::io::storage::{Storage, StorageError};
use crate::model::{Task, Theme};

pub const TODOS_KEY: &str = "todos";
pub const THEME_KEY: &str = "theme";
/// Older stores kept the theme as a boolean under this key
pub const LEGACY_DARK_MODE_KEY: &str = "darkMode";
pub const ID_COUNTER_KEY: &str = "todoIdCounter";

/// Load the task list. Absent or malformed data yields an empty list.
pub fn load_tasks<S: Storage + ?Sized>(storage: &S) -> Result<Vec<Task>, StorageError> {
    let Some(raw) = storage.get(TODOS_KEY)? else {
        return Ok(Vec::new());
    };
    Ok(decode_tasks(&raw))
}

/// Decode a stored `todos` value, falling back to an empty list
pub fn decode_tasks(raw: &str) -> Vec<Task> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(error = %e, "stored todos are malformed; starting with an empty list");
            Vec::new()
        }
    }
}

pub fn save_tasks<S: Storage + ?Sized>(storage: &mut S, tasks: &[Task]) -> Result<(), StorageError> {
    let json = serde_json::to_string(tasks).map_err(|e| StorageError::EncodeError {
        key: TODOS_KEY.to_string(),
        source: e,
    })?;
    storage.set(TODOS_KEY, &json)
}

/// Load the theme preference, checking the legacy boolean key if the
/// current one is absent.
pub fn load_theme<S: Storage + ?Sized>(storage: &S) -> Result<Theme, StorageError> {
    if let Some(raw) = storage.get(THEME_KEY)? {
        return Ok(decode_theme(&raw));
    }
    if let Some(raw) = storage.get(LEGACY_DARK_MODE_KEY)? {
        return Ok(match serde_json::from_str::<bool>(raw.trim()) {
            Ok(true) => Theme::Dark,
            Ok(false) => Theme::Light,
            Err(e) => {
                warn!(error = %e, "stored darkMode flag is malformed; using light theme");
                Theme::Light
            }
        });
    }
    Ok(Theme::default())
}

/// Accepts a JSON string (`"dark"`) or the bare word (`dark`)
pub fn decode_theme(raw: &str) -> Theme {
    let raw = raw.trim();
    if let Ok(theme) = serde_json::from_str::<Theme>(raw) {
        return theme;
    }
    raw.parse().unwrap_or_else(|e: String| {
        warn!(error = %e, "stored theme is malformed; using light theme");
        Theme::default()
    })
}

pub fn save_theme<S: Storage + ?Sized>(storage: &mut S, theme: Theme) -> Result<(), StorageError> {
    let json = serde_json::to_string(&theme).map_err(|e| StorageError::EncodeError {
        key: THEME_KEY.to_string(),
        source: e,
    })?;
    storage.set(THEME_KEY, &json)
}

/// Load the next-id counter; `None` if absent or malformed.
pub fn load_id_counter<S: Storage + ?Sized>(storage: &S) -> Result<Option<u64>, StorageError> {
    let Some(raw) = storage.get(ID_COUNTER_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<u64>(raw.trim()) {
        Ok(n) => Ok(Some(n)),
        Err(e) => {
            warn!(error = %e, "stored id counter is malformed; recomputing from tasks");
            Ok(None)
        }
    }
}

pub fn save_id_counter<S: Storage + ?Sized>(storage: &mut S, next: u64) -> Result<(), StorageError> {
    storage.set(ID_COUNTER_KEY, &next.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::model::{Priority, TaskId};
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_tasks() -> Vec<Task> {
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let mut done = Task::new(TaskId::from("b"), "walk dog".into(), created)
            .with_priority(Priority::Low);
        done.completed = true;
        vec![
            Task::new(TaskId::from("a"), "buy milk".into(), created)
                .with_priority(Priority::High)
                .with_due_date(NaiveDate::from_ymd_opt(2025, 1, 9)),
            done,
        ]
    }

    #[test]
    fn tasks_round_trip() {
        let mut storage = MemoryStorage::new();
        let tasks = sample_tasks();
        save_tasks(&mut storage, &tasks).unwrap();
        assert_eq!(load_tasks(&storage).unwrap(), tasks);
    }

    #[test]
    fn absent_tasks_are_empty() {
        let storage = MemoryStorage::new();
        assert!(load_tasks(&storage).unwrap().is_empty());
    }

    #[test]
    fn malformed_tasks_are_empty() {
        for raw in ["not json {{{", "{\"id\":1}", "[{\"text\":\"no id\"}]", "42", ""] {
            let mut storage = MemoryStorage::new();
            storage.set(TODOS_KEY, raw).unwrap();
            assert!(load_tasks(&storage).unwrap().is_empty(), "input: {}", raw);
        }
    }

    #[test]
    fn theme_defaults_to_light() {
        let storage = MemoryStorage::new();
        assert_eq!(load_theme(&storage).unwrap(), Theme::Light);
    }

    #[test]
    fn theme_accepts_quoted_and_bare() {
        assert_eq!(decode_theme("\"dark\""), Theme::Dark);
        assert_eq!(decode_theme("dark"), Theme::Dark);
        assert_eq!(decode_theme("light\n"), Theme::Light);
        assert_eq!(decode_theme("purple"), Theme::Light);
    }

    #[test]
    fn theme_round_trip() {
        let mut storage = MemoryStorage::new();
        save_theme(&mut storage, Theme::Dark).unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));
        assert_eq!(load_theme(&storage).unwrap(), Theme::Dark);
    }

    #[test]
    fn legacy_dark_mode_flag() {
        let mut storage = MemoryStorage::new();
        storage.set(LEGACY_DARK_MODE_KEY, "true").unwrap();
        assert_eq!(load_theme(&storage).unwrap(), Theme::Dark);

        // The current key wins when both exist
        storage.set(THEME_KEY, "\"light\"").unwrap();
        assert_eq!(load_theme(&storage).unwrap(), Theme::Light);
    }

    #[test]
    fn id_counter_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_id_counter(&storage).unwrap(), None);
        save_id_counter(&mut storage, 12).unwrap();
        assert_eq!(load_id_counter(&storage).unwrap(), Some(12));
        storage.set(ID_COUNTER_KEY, "twelve").unwrap();
        assert_eq!(load_id_counter(&storage).unwrap(), None);
    }
}
