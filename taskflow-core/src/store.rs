//! TaskStore: the authoritative in-memory task list.
//!
//! Copy-on-write: the list lives behind an `Arc<[Task]>` and every mutation
//! builds a fresh list before swapping it in. A [`TaskStore::snapshot`] taken
//! before a mutation keeps seeing the old list, so views holding a snapshot
//! never observe a half-applied change.
//!
//! Failed operations leave the list untouched.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::project::DEFAULT_PROJECT_ID;
use crate::seed::seed_tasks;
use crate::task::{NewTask, Task, TaskStatus};
use crate::time::{Clock, SystemClock};

#[derive(Debug, Clone)]
pub struct TaskStore<C: Clock = SystemClock> {
    tasks: Arc<[Task]>,
    clock: C,
}

impl TaskStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Store preloaded with the demo seed list, timestamped now.
    pub fn seeded() -> Self {
        Self::seeded_with_clock(SystemClock)
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::from_tasks(Vec::new(), clock)
    }

    pub fn seeded_with_clock(clock: C) -> Self {
        let tasks = seed_tasks(clock.now());
        Self::from_tasks(tasks, clock)
    }

    /// Wraps an existing list. Insertion order is kept as given.
    pub fn from_tasks(tasks: Vec<Task>, clock: C) -> Self {
        Self {
            tasks: tasks.into(),
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Shared handle on the current list; unaffected by later mutations.
    pub fn snapshot(&self) -> Arc<[Task]> {
        Arc::clone(&self.tasks)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Validates `input`, appends a new pending task and returns it.
    ///
    /// Title and description are stored exactly as submitted; the trimmed
    /// title is only used for the emptiness check.
    ///
    /// # Errors
    /// `StoreError::Validation` when the title is empty after trimming.
    pub fn create(&mut self, input: NewTask) -> Result<Task, StoreError> {
        if input.title.trim().is_empty() {
            return Err(StoreError::validation("title", "task title is required"));
        }

        let now = self.clock.now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            status: TaskStatus::Pending,
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            project_id: input
                .project_id
                .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string()),
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.extend_from_slice(&self.tasks);
        next.push(task.clone());
        self.replace(next);

        debug!(task_id = %task.id, len = self.tasks.len(), "task created");
        Ok(task)
    }

    /// Flips completion. Turning it on sets status `completed`; turning it off
    /// sets status `pending` (an earlier `in-progress` is not restored).
    ///
    /// # Errors
    /// `StoreError::NotFound` when no task has `id`.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self.position(id)?;
        let now = self.clock.now();

        let mut next = self.tasks.to_vec();
        let task = &mut next[idx];
        task.completed = !task.completed;
        task.status = if task.completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        };
        task.updated_at = now;
        let updated = task.clone();
        self.replace(next);

        debug!(task_id = %id, completed = updated.completed, "task toggled");
        Ok(updated)
    }

    /// Removes the task and returns it.
    ///
    /// # Errors
    /// `StoreError::NotFound` when no task has `id`.
    pub fn delete(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self.position(id)?;

        let mut next = self.tasks.to_vec();
        let removed = next.remove(idx);
        self.replace(next);

        debug!(task_id = %id, len = self.tasks.len(), "task deleted");
        Ok(removed)
    }

    /// Ids starting with `prefix`, for callers that accept abbreviated ids.
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Task> {
        if prefix.is_empty() {
            return Vec::new();
        }
        self.tasks
            .iter()
            .filter(|t| t.id.starts_with(prefix))
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn replace(&mut self, next: Vec<Task>) {
        self.tasks = next.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use crate::time::FixedClock;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 12, 27, 9, 0, 0).unwrap())
    }

    #[test]
    fn create_applies_defaults() {
        let mut store = TaskStore::with_clock(clock());
        let t = store.create(NewTask::titled("  Write report  ")).unwrap();

        assert_eq!(t.title, "  Write report  ");
        assert_eq!(t.status, TaskStatus::Pending);
        assert!(!t.completed);
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.project_id, "work");
        assert_eq!(t.due_date, None);
        assert_eq!(t.created_at, t.updated_at);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&t.id), Some(&t));
    }

    #[test]
    fn create_rejects_blank_title_without_mutating() {
        let mut store = TaskStore::with_clock(clock());
        store.create(NewTask::titled("keep me")).unwrap();
        let before = store.snapshot();

        let err = store.create(NewTask::titled("   \t")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.tasks(), &before[..]);
    }

    #[test]
    fn create_appends_in_insertion_order_with_unique_ids() {
        let mut store = TaskStore::with_clock(clock());
        let a = store.create(NewTask::titled("a")).unwrap();
        let b = store.create(NewTask::titled("b")).unwrap();
        assert_ne!(a.id, b.id);
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn padded_title_and_description_round_trip_unchanged() {
        let mut store = TaskStore::with_clock(clock());
        let t = store
            .create(NewTask::titled("  Buy milk ").description(" 2 litres "))
            .unwrap();

        let stored = store.get(&t.id).unwrap();
        assert_eq!(stored.title, "  Buy milk ");
        assert_eq!(stored.description.as_deref(), Some(" 2 litres "));

        let blank = store.create(NewTask::titled("x").description("  ")).unwrap();
        assert_eq!(blank.description.as_deref(), Some("  "));
    }

    #[test]
    fn toggle_sets_status_and_completed_together() {
        let mut store = TaskStore::with_clock(clock());
        let t = store.create(NewTask::titled("x")).unwrap();

        store.clock().advance(Duration::minutes(10));
        let done = store.toggle_complete(&t.id).unwrap();
        assert!(done.completed);
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.updated_at, t.created_at + Duration::minutes(10));
        assert_eq!(done.created_at, t.created_at);

        let reopened = store.toggle_complete(&t.id).unwrap();
        assert!(!reopened.completed);
        assert_eq!(reopened.status, TaskStatus::Pending);
        assert!(store.tasks().iter().all(Task::is_consistent));
    }

    #[test]
    fn reopening_in_progress_task_after_completion_goes_to_pending() {
        let now = clock().now();
        let seeded = Task::new("1", "review", now).with_status(TaskStatus::InProgress);
        let mut store = TaskStore::from_tasks(vec![seeded], clock());

        store.toggle_complete("1").unwrap();
        let t = store.toggle_complete("1").unwrap();
        assert_eq!(t.status, TaskStatus::Pending);
    }

    #[test]
    fn unknown_ids_report_not_found() {
        let mut store = TaskStore::with_clock(clock());
        store.create(NewTask::titled("x")).unwrap();

        assert!(store.toggle_complete("nope").unwrap_err().is_not_found());
        assert!(store.delete("nope").unwrap_err().is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut store = TaskStore::with_clock(clock());
        let a = store.create(NewTask::titled("a")).unwrap();
        let b = store.create(NewTask::titled("b")).unwrap();

        let removed = store.delete(&a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].id, b.id);
    }

    #[test]
    fn snapshots_are_not_affected_by_later_mutations() {
        let mut store = TaskStore::with_clock(clock());
        let a = store.create(NewTask::titled("a")).unwrap();
        let snap = store.snapshot();

        store.toggle_complete(&a.id).unwrap();
        store.create(NewTask::titled("b")).unwrap();

        assert_eq!(snap.len(), 1);
        assert!(!snap[0].completed);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_keeps_submitted_fields() {
        let mut store = TaskStore::with_clock(clock());
        let due = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let t = store
            .create(
                NewTask::titled("Study")
                    .description("chapter 4")
                    .priority(Priority::Low)
                    .due(due)
                    .project("garden"),
            )
            .unwrap();

        let stored = store.get(&t.id).unwrap();
        assert_eq!(stored.description.as_deref(), Some("chapter 4"));
        assert_eq!(stored.priority, Priority::Low);
        assert_eq!(stored.due_date, Some(due));
        assert_eq!(stored.project_id, "garden");
    }

    #[test]
    fn prefix_lookup() {
        let now = clock().now();
        let store = TaskStore::from_tasks(
            vec![Task::new("abc1", "a", now), Task::new("abd2", "b", now)],
            clock(),
        );
        assert_eq!(store.find_by_prefix("ab").len(), 2);
        assert_eq!(store.find_by_prefix("abc").len(), 1);
        assert!(store.find_by_prefix("").is_empty());
    }
}
