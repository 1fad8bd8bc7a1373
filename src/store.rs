use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::io::persist;
use crate::io::storage::{Storage, StorageError};
use crate::model::config::{Config, IdStrategy, InsertPosition};
use crate::model::{Filter, Priority, Task, TaskId, Theme};
use crate::ops::ids::IdGenerator;
use crate::ops::list_ops::{self, ListError};
use crate::render::{Renderer, View};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task text is empty")]
    EmptyText,
    #[error("invalid position {index}: {len} task(s) visible")]
    InvalidIndex { index: usize, len: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Construction-time choices for a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub insert: InsertPosition,
    pub ids: IdStrategy,
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        StoreOptions {
            insert: config.store.insert,
            ids: config.store.ids,
        }
    }
}

pub struct TodoStore<S: Storage, R: Renderer> {
    storage: S,
    renderer: R,
    tasks: Vec<Task>,
    filter: Filter,
    theme: Theme,
    ids: IdGenerator,
    insert: InsertPosition,
}

impl<S: Storage, R: Renderer> TodoStore<S, R> {
    /// Load persisted state, apply the theme, and draw the first frame.
    ///
    /// Malformed stored data is recovered to defaults; only storage I/O
    /// failures are returned.
    pub fn open(storage: S, mut renderer: R, options: StoreOptions) -> Result<Self, StoreError> {
        let mut tasks = persist::load_tasks(&storage)?;
        let dropped = list_ops::dedupe_ids(&mut tasks);
        if !dropped.is_empty() {
            warn!(count = dropped.len(), "ignoring stored todos with duplicate ids");
        }

        let theme = persist::load_theme(&storage)?;
        let stored_counter = match options.ids {
            IdStrategy::Counter => persist::load_id_counter(&storage)?,
            IdStrategy::Token => None,
        };
        let ids = IdGenerator::new(options.ids, stored_counter, &tasks);
        debug!(tasks = tasks.len(), %theme, "opened store");

        renderer.apply_theme(theme);
        let mut store = TodoStore {
            storage,
            renderer,
            tasks,
            filter: Filter::default(),
            theme,
            ids,
            insert: options.insert,
        };
        store.render();
        Ok(store)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a task. Blank text is rejected before anything changes.
    pub fn add(
        &mut self,
        text: &str,
        priority: Option<Priority>,
        due_date: Option<NaiveDate>,
    ) -> Result<Task, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("rejected blank todo");
            return Err(StoreError::EmptyText);
        }

        let now = Utc::now();
        let tasks = &self.tasks;
        let id = self
            .ids
            .next_id(now, |id| list_ops::find_index(tasks, id).is_some());
        let task = Task::new(id, text.to_string(), now)
            .with_priority(priority.unwrap_or_default())
            .with_due_date(due_date);

        // Counter before the list; it may run ahead but never behind
        if let Some(counter) = self.ids.counter() {
            persist::save_id_counter(&mut self.storage, counter)?;
        }
        let mut next = self.tasks.clone();
        list_ops::insert_task(&mut next, task.clone(), self.insert);
        self.write_through(next)?;
        debug!(id = %task.id, "added todo");
        Ok(task)
    }

    /// Flip completion on a task. `Ok(false)` if no task has `id`.
    pub fn toggle(&mut self, id: &TaskId) -> Result<bool, StoreError> {
        let mut next = self.tasks.clone();
        match list_ops::toggle_task(&mut next, id) {
            Ok(completed) => {
                self.write_through(next)?;
                debug!(%id, completed, "toggled todo");
                Ok(true)
            }
            Err(e) => {
                debug!(error = %e, "toggle ignored");
                Ok(false)
            }
        }
    }

    /// Delete a task. `Ok(false)` if no task has `id`.
    pub fn remove(&mut self, id: &TaskId) -> Result<bool, StoreError> {
        let mut next = self.tasks.clone();
        match list_ops::remove_task(&mut next, id) {
            Ok(_) => {
                self.write_through(next)?;
                debug!(%id, "removed todo");
                Ok(true)
            }
            Err(e) => {
                debug!(error = %e, "remove ignored");
                Ok(false)
            }
        }
    }

    /// Delete every completed task, returning how many were removed.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let mut next = self.tasks.clone();
        let removed = list_ops::clear_completed(&mut next);
        self.write_through(next)?;
        debug!(removed, "cleared completed todos");
        Ok(removed)
    }

    /// Move the task at visible position `from` to visible position `to`.
    ///
    /// Positions count within the current filtered view; the move is
    /// applied to the full list so hidden tasks keep their places.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let mut next = self.tasks.clone();
        match list_ops::move_visible(&mut next, self.filter, from, to) {
            Ok(true) => {
                self.write_through(next)?;
                debug!(from, to, filter = %self.filter, "reordered todo");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(ListError::InvalidPosition { index, len }) => {
                warn!(index, len, "reorder position out of range");
                Err(StoreError::InvalidIndex { index, len })
            }
            Err(ListError::NotFound(_)) => Ok(()),
        }
    }

    /// Change the filter. View state only, nothing is persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.render();
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        persist::save_theme(&mut self.storage, theme)?;
        self.theme = theme;
        self.renderer.apply_theme(theme);
        self.render();
        debug!(%theme, "set theme");
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Tasks passing the current filter, in list order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn remaining_count(&self) -> usize {
        list_ops::remaining_count(&self.tasks)
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|t| t.completed)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// What a renderer would be shown right now
    pub fn snapshot(&self) -> View<'_> {
        build_view(&self.tasks, self.filter, self.theme)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (S, R) {
        (self.storage, self.renderer)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn write_through(&mut self, next: Vec<Task>) -> Result<(), StoreError> {
        persist::save_tasks(&mut self.storage, &next)?;
        self.tasks = next;
        self.render();
        Ok(())
    }

    fn render(&mut self) {
        let view = build_view(&self.tasks, self.filter, self.theme);
        self.renderer.render(&view);
    }
}

fn build_view(tasks: &[Task], filter: Filter, theme: Theme) -> View<'_> {
    View {
        tasks: tasks.iter().filter(|t| filter.matches(t)).collect(),
        filter,
        theme,
        remaining: list_ops::remaining_count(tasks),
        total: tasks.len(),
        has_completed: tasks.iter().any(|t| t.completed),
        today: Local::now().date_naive(),
    }
}
