use std::collections::HashSet;

use crate::model::config::InsertPosition;
use crate::model::{Filter, Task, TaskId};

/// Error type for list operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("invalid position {index}: {len} task(s) visible")]
    InvalidPosition { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn find_index(tasks: &[Task], id: &TaskId) -> Option<usize> {
    tasks.iter().position(|t| &t.id == id)
}

/// Positions in `tasks` of the tasks passing `filter`, in order
pub fn visible_indices(tasks: &[Task], filter: Filter) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .map(|(i, _)| i)
        .collect()
}

pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

pub fn insert_task(tasks: &mut Vec<Task>, task: Task, position: InsertPosition) {
    match position {
        InsertPosition::Top => tasks.insert(0, task),
        InsertPosition::Bottom => tasks.push(task),
    }
}

/// Flip `completed` on one task, returning the new value
pub fn toggle_task(tasks: &mut [Task], id: &TaskId) -> Result<bool, ListError> {
    let task = tasks
        .iter_mut()
        .find(|t| &t.id == id)
        .ok_or_else(|| ListError::NotFound(id.clone()))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

pub fn remove_task(tasks: &mut Vec<Task>, id: &TaskId) -> Result<Task, ListError> {
    let index = find_index(tasks, id).ok_or_else(|| ListError::NotFound(id.clone()))?;
    Ok(tasks.remove(index))
}

/// Drop every completed task, returning how many went
pub fn clear_completed(tasks: &mut Vec<Task>) -> usize {
    let before = tasks.len();
    tasks.retain(|t| !t.completed);
    before - tasks.len()
}

/// Move the task shown at `from` in the filtered view to where the task
/// shown at `to` sits in the full list. Tasks in between shift by one.
///
/// Returns `Ok(false)` when `from == to`.
pub fn move_visible(
    tasks: &mut Vec<Task>,
    filter: Filter,
    from: usize,
    to: usize,
) -> Result<bool, ListError> {
    let visible = visible_indices(tasks, filter);
    let len = visible.len();
    let from_pos = *visible
        .get(from)
        .ok_or(ListError::InvalidPosition { index: from, len })?;
    let to_pos = *visible
        .get(to)
        .ok_or(ListError::InvalidPosition { index: to, len })?;

    if from_pos == to_pos {
        return Ok(false);
    }
    let task = tasks.remove(from_pos);
    tasks.insert(to_pos, task);
    Ok(true)
}

/// Keep the first task for each id, dropping later duplicates.
/// Returns the dropped tasks.
pub fn dedupe_ids(tasks: &mut Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    let mut dropped = Vec::new();
    let mut kept = Vec::with_capacity(tasks.len());
    for task in tasks.drain(..) {
        if seen.insert(task.id.clone()) {
            kept.push(task);
        } else {
            dropped.push(task);
        }
    }
    *tasks = kept;
    dropped
}
