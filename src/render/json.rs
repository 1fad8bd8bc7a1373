use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{DueStatus, Filter, Priority, Task, Theme};
use crate::render::{Renderer, View};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DueJson>,
}

#[derive(Debug, Serialize)]
pub struct DueJson {
    #[serde(flatten)]
    pub status: DueStatus,
    pub label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewJson {
    pub filter: Filter,
    pub theme: Theme,
    pub remaining: usize,
    pub total: usize,
    pub has_completed: bool,
    pub tasks: Vec<TaskJson>,
}

pub fn task_to_json(task: &Task, due: Option<DueStatus>) -> TaskJson {
    TaskJson {
        id: task.id.to_string(),
        text: task.text.clone(),
        completed: task.completed,
        priority: task.priority,
        due_date: task.due_date,
        due: due.map(|status| DueJson {
            status,
            label: status.to_string(),
        }),
    }
}

pub fn view_to_json(view: &View<'_>) -> ViewJson {
    ViewJson {
        filter: view.filter,
        theme: view.theme,
        remaining: view.remaining,
        total: view.total,
        has_completed: view.has_completed,
        tasks: view
            .tasks
            .iter()
            .map(|t| task_to_json(t, view.due_status(t)))
            .collect(),
    }
}

/// Keeps the latest view as a JSON document
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    document: Option<serde_json::Value>,
    theme: Theme,
}

impl JsonRenderer {
    pub fn new() -> Self {
        JsonRenderer::default()
    }

    /// The most recent view, or `null` if nothing was rendered yet
    pub fn document(&self) -> serde_json::Value {
        self.document.clone().unwrap_or(serde_json::Value::Null)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, view: &View<'_>) {
        let document = serde_json::to_value(view_to_json(view))
            .expect("view JSON has only string keys");
        self.document = Some(document);
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use pretty_assertions::assert_eq;

    #[test]
    fn view_document_shape() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut done = Task::new(TaskId::from("1"), "buy milk".into(), Default::default());
        done.completed = true;
        let dog = Task::new(TaskId::from("2"), "walk dog".into(), Default::default())
            .with_due_date(NaiveDate::from_ymd_opt(2025, 6, 13));

        let view = View {
            tasks: vec![&done, &dog],
            filter: Filter::All,
            theme: Theme::Dark,
            remaining: 1,
            total: 2,
            has_completed: true,
            today,
        };

        let mut renderer = JsonRenderer::new();
        assert!(renderer.document().is_null());
        renderer.render(&view);

        assert_eq!(
            renderer.document(),
            serde_json::json!({
                "filter": "all",
                "theme": "dark",
                "remaining": 1,
                "total": 2,
                "hasCompleted": true,
                "tasks": [
                    {"id": "1", "text": "buy milk", "completed": true, "priority": "medium"},
                    {
                        "id": "2",
                        "text": "walk dog",
                        "completed": false,
                        "priority": "medium",
                        "dueDate": "2025-06-13",
                        "due": {"status": "soon", "value": 3, "label": "Due in 3 days"}
                    }
                ]
            })
        );
    }
}
