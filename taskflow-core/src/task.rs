//! Task model shared by the store and every projection.
//!
//! A task's `completed` flag mirrors its status: `completed == true` exactly
//! when `status == TaskStatus::Completed`. Only the store mutates tasks, and it
//! always updates both together.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::project::DEFAULT_PROJECT_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(ParseError::new("status", s, "pending|in-progress|completed")),
        }
    }
}

/// Priority tier. Ordering follows rank, so `High > Medium > Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Implicit numeric rank: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            _ => Err(ParseError::new("priority", s, "high|medium|low")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque, stable, unique. Never used for ordering.
    pub id: String,
    pub title: String,
    pub description: Option<String>,

    pub status: TaskStatus,
    pub priority: Priority,

    /// Calendar day only; time of day is not tracked.
    pub due_date: Option<NaiveDate>,

    /// Loose reference into the fixed project set. Unknown ids are allowed.
    pub project_id: String,

    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a pending task. Seed data and tests use this; user input goes
    /// through `TaskStore::create` so the title is validated.
    pub fn new(id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            due_date: None,
            project_id: DEFAULT_PROJECT_ID.to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Sets status and keeps `completed` in sync.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self.completed = status == TaskStatus::Completed;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// True when the task is not completed and its due day lies strictly
    /// before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == Some(date)
    }

    pub fn is_consistent(&self) -> bool {
        self.completed == (self.status == TaskStatus::Completed)
    }
}

/// User-supplied fields for a new task. Everything except `title` is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub project_id: Option<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 27, 9, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    #[test]
    fn priority_orders_by_rank() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::High.rank(), 3);
        assert_eq!(Priority::Low.rank(), 1);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn status_parses_ui_tags() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!(" Completed ".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("archived".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn with_status_keeps_completed_in_sync() {
        let t = Task::new("t1", "ship it", now()).with_status(TaskStatus::Completed);
        assert!(t.completed);
        assert!(t.is_consistent());

        let t = t.with_status(TaskStatus::InProgress);
        assert!(!t.completed);
        assert!(t.is_consistent());
    }

    #[test]
    fn overdue_requires_incomplete_and_strictly_past() {
        let t = Task::new("t1", "report", now()).with_due_date(day(26));
        assert!(t.is_overdue(day(27)));
        assert!(!t.is_overdue(day(26)));

        let done = t.clone().with_status(TaskStatus::Completed);
        assert!(!done.is_overdue(day(27)));

        let unscheduled = Task::new("t2", "someday", now());
        assert!(!unscheduled.is_overdue(day(27)));
    }

    #[test]
    fn serializes_with_ui_field_names() {
        let t = Task::new("t1", "review", now())
            .with_due_date(day(28))
            .with_status(TaskStatus::InProgress);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["dueDate"], "2024-12-28");
        assert_eq!(json["projectId"], "work");
        assert_eq!(json["priority"], "medium");
    }
}
