pub mod json;
pub mod text;

use chrono::NaiveDate;

use crate::model::{DueStatus, Filter, Task, Theme};

pub use json::JsonRenderer;
pub use text::TextRenderer;

/// Read-only snapshot of what should be on screen
#[derive(Debug, Clone)]
pub struct View<'a> {
    /// Tasks passing the current filter, in list order
    pub tasks: Vec<&'a Task>,
    pub filter: Filter,
    pub theme: Theme,
    /// Tasks not yet completed, regardless of filter
    pub remaining: usize,
    pub total: usize,
    pub has_completed: bool,
    /// Local calendar day used for due-date labels
    pub today: NaiveDate,
}

impl View<'_> {
    pub fn due_status(&self, task: &Task) -> Option<DueStatus> {
        task.due_date.map(|due| DueStatus::classify(due, self.today))
    }

    /// Message to show instead of an empty list, if any
    pub fn empty_message(&self) -> Option<String> {
        if self.total == 0 {
            Some("No todos yet. Add one above!".to_string())
        } else if self.tasks.is_empty() {
            Some(format!("No {} todos", self.filter))
        } else {
            None
        }
    }
}

pub trait Renderer {
    fn render(&mut self, view: &View<'_>);

    /// Switch visual mode. Called once at startup and on every theme change.
    fn apply_theme(&mut self, _theme: Theme) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, view: &View<'_>) {
        (**self).render(view);
    }

    fn apply_theme(&mut self, theme: Theme) {
        (**self).apply_theme(theme);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &View<'_>) {}
}
