//! Filter/sort projection for the list view.
//!
//! Both steps borrow from the input list and never reorder or mutate it.
//! Sorting uses the stable `sort_by` so tasks with equal keys keep their
//! relative input order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
    /// Not completed and due strictly before today.
    Overdue,
}

impl Filter {
    pub const ALL: [Filter; 5] = [
        Filter::All,
        Filter::Pending,
        Filter::InProgress,
        Filter::Completed,
        Filter::Overdue,
    ];

    pub fn matches(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => task.status == TaskStatus::Pending,
            Filter::InProgress => task.status == TaskStatus::InProgress,
            Filter::Completed => task.status == TaskStatus::Completed,
            Filter::Overdue => task.is_overdue(today),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::InProgress => "in-progress",
            Filter::Completed => "completed",
            Filter::Overdue => "overdue",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str() == needle)
            .ok_or_else(|| {
                ParseError::new("filter", s, "all|pending|in-progress|completed|overdue")
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Ascending due date; unscheduled tasks last.
    #[default]
    DueDate,
    /// Highest rank first.
    Priority,
    /// Most recently created first.
    Created,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DueDate => "due-date",
            SortKey::Priority => "priority",
            SortKey::Created => "created",
        }
    }

    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Priority => b.priority.rank().cmp(&a.priority.rank()),
            SortKey::Created => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "due-date" | "due_date" | "duedate" | "due" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "created" | "created-at" | "created_at" => Ok(SortKey::Created),
            _ => Err(ParseError::new("sort key", s, "due-date|priority|created")),
        }
    }
}

/// Tasks matching `filter`, ordered by `sort`.
pub fn filter_and_sort<'a>(
    tasks: &'a [Task],
    filter: Filter,
    sort: SortKey,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let mut out: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t, today)).collect();
    out.sort_by(|a, b| sort.compare(a, b));
    out
}

/// How the list view labels a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "date")]
pub enum DueLabel {
    Today,
    Tomorrow,
    Overdue,
    On(NaiveDate),
    Unscheduled,
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueLabel::Today => f.write_str("Today"),
            DueLabel::Tomorrow => f.write_str("Tomorrow"),
            DueLabel::Overdue => f.write_str("Overdue"),
            DueLabel::On(d) => write!(f, "{}", d.format("%b %d, %Y")),
            DueLabel::Unscheduled => f.write_str("No due date"),
        }
    }
}

/// Past due dates on completed tasks are shown as plain dates, not "Overdue".
pub fn due_label(task: &Task, today: NaiveDate) -> DueLabel {
    let Some(due) = task.due_date else {
        return DueLabel::Unscheduled;
    };
    if due == today {
        DueLabel::Today
    } else if due == today + Duration::days(1) {
        DueLabel::Tomorrow
    } else if task.is_overdue(today) {
        DueLabel::Overdue
    } else {
        DueLabel::On(due)
    }
}
