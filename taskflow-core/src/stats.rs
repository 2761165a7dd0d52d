//! Statistics for the progress dashboard.
//!
//! Everything here is recomputed from the task list on each call; there is no
//! cached state to invalidate. Ratios are whole percentages in `0..=100` and
//! are 0 for empty groups.
//!
//! Time-frame scoping ("this week" / "this month") is a pre-filter: callers
//! narrow the list with [`scope`] and then call [`compute`] on the result.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calendar::Month;
use crate::error::ParseError;
use crate::project::{Project, UNKNOWN_PROJECT_ID};
use crate::task::{Priority, Task};
use crate::time::WeekStart;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFrame {
    #[default]
    Week,
    Month,
}

impl TimeFrame {
    pub fn includes(self, date: NaiveDate, today: NaiveDate, week_start: WeekStart) -> bool {
        match self {
            TimeFrame::Week => {
                week_start.week_start(today) <= date && date <= week_start.week_end(today)
            }
            TimeFrame::Month => Month::containing(today).contains(date),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFrame::Week => f.write_str("week"),
            TimeFrame::Month => f.write_str("month"),
        }
    }
}

impl FromStr for TimeFrame {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(TimeFrame::Week),
            "month" => Ok(TimeFrame::Month),
            _ => Err(ParseError::new("time frame", s, "week|month")),
        }
    }
}

/// Tasks due within the current week or month. Unscheduled tasks are dropped.
pub fn scope(
    tasks: &[Task],
    frame: TimeFrame,
    today: NaiveDate,
    week_start: WeekStart,
) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| {
            t.due_date
                .is_some_and(|due| frame.includes(due, today, week_start))
        })
        .cloned()
        .collect()
}

/// `round(part / whole * 100)`, or 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (part.min(whole) as f64 / whole as f64 * 100.0).round();
    pct as u8
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityBreakdown {
    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub project_id: String,
    pub name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayProductivity {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub weekday: String,
    pub total: usize,
    pub completed: usize,
    pub productivity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    /// Not completed and not overdue (including tasks without a due date).
    pub pending: usize,
    pub overdue: usize,
    pub completion_rate: u8,
    /// Tasks due in the week containing `today`.
    pub this_week: usize,
    /// Tasks due in the month containing `today`.
    pub this_month: usize,
    pub priority_breakdown: PriorityBreakdown,
    pub projects: Vec<ProjectProgress>,
    pub productivity: Vec<DayProductivity>,
}

pub fn compute(tasks: &[Task], today: NaiveDate, week_start: WeekStart) -> Statistics {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();
    let pending = total - completed - overdue;

    let due_within = |frame: TimeFrame| {
        tasks
            .iter()
            .filter(|t| {
                t.due_date
                    .is_some_and(|due| frame.includes(due, today, week_start))
            })
            .count()
    };

    Statistics {
        total,
        completed,
        pending,
        overdue,
        completion_rate: percent(completed, total),
        this_week: due_within(TimeFrame::Week),
        this_month: due_within(TimeFrame::Month),
        priority_breakdown: priority_breakdown(tasks),
        projects: project_progress(tasks),
        productivity: weekly_productivity(tasks, today, week_start),
    }
}

pub fn priority_breakdown(tasks: &[Task]) -> PriorityBreakdown {
    tasks
        .iter()
        .fold(PriorityBreakdown::default(), |mut acc, t| {
            match t.priority {
                Priority::High => acc.high += 1,
                Priority::Medium => acc.medium += 1,
                Priority::Low => acc.low += 1,
            }
            acc
        })
}

/// One entry per fixed project in declaration order, followed by an
/// `unknown` entry only when some task names a project outside the set.
pub fn project_progress(tasks: &[Task]) -> Vec<ProjectProgress> {
    let progress = |id: &str, name: &str, members: Vec<&Task>| {
        let total_tasks = members.len();
        let completed_tasks = members.iter().filter(|t| t.completed).count();
        ProjectProgress {
            project_id: id.to_string(),
            name: name.to_string(),
            total_tasks,
            completed_tasks,
            progress: percent(completed_tasks, total_tasks),
        }
    };

    let mut out: Vec<ProjectProgress> = Project::all()
        .iter()
        .map(|p| {
            let members = tasks.iter().filter(|t| t.project_id == p.id).collect();
            progress(p.id, p.name, members)
        })
        .collect();

    let orphans: Vec<&Task> = tasks
        .iter()
        .filter(|t| !Project::lookup(&t.project_id).is_known())
        .collect();
    if !orphans.is_empty() {
        warn!(
            count = orphans.len(),
            "tasks reference unknown projects; grouping as unknown"
        );
        out.push(progress(UNKNOWN_PROJECT_ID, "Unknown project", orphans));
    }

    out
}

/// Due/completed counts for each day of the week containing `today`.
pub fn weekly_productivity(
    tasks: &[Task],
    today: NaiveDate,
    week_start: WeekStart,
) -> Vec<DayProductivity> {
    week_start
        .week_of(today)
        .into_iter()
        .map(|date| {
            let due: Vec<&Task> = tasks.iter().filter(|t| t.is_due_on(date)).collect();
            let completed = due.iter().filter(|t| t.completed).count();
            DayProductivity {
                date,
                weekday: date.weekday().to_string(),
                total: due.len(),
                completed,
                productivity: percent(completed, due.len()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 20, 9, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    fn task(id: &str, due: u32, project: &str) -> Task {
        Task::new(id, id, now()).with_due_date(day(due)).with_project(project)
    }

    #[test]
    fn percent_rounds_and_handles_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(3, 3), 100);
    }

    #[test]
    fn empty_list_is_all_zeroes() {
        let stats = compute(&[], day(27), WeekStart::Sunday);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.projects.len(), 3);
        assert!(stats.projects.iter().all(|p| p.progress == 0 && p.total_tasks == 0));
        assert_eq!(stats.productivity.len(), 7);
        assert!(stats.productivity.iter().all(|d| d.productivity == 0));
    }

    #[test]
    fn counts_partition_the_list() {
        let tasks = vec![
            task("a", 20, "work"),
            task("b", 25, "work").with_status(TaskStatus::Completed),
            task("c", 30, "personal"),
            Task::new("d", "d", now()),
            task("e", 26, "learning").with_status(TaskStatus::InProgress),
        ];
        let stats = compute(&tasks, day(27), WeekStart::Sunday);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.overdue, 2); // a, e
        assert_eq!(stats.pending, 2); // c, d
        assert_eq!(stats.completion_rate, 20);
    }

    #[test]
    fn week_and_month_counts() {
        // Week of Fri Dec 27 (Sunday start) is Dec 22..=28.
        let tasks = vec![
            task("a", 22, "work"),
            task("b", 28, "work"),
            task("c", 29, "work"),
            Task::new("d", "d", now())
                .with_due_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()),
        ];
        let stats = compute(&tasks, day(27), WeekStart::Sunday);
        assert_eq!(stats.this_week, 2);
        assert_eq!(stats.this_month, 3);

        let monday = compute(&tasks, day(27), WeekStart::Monday);
        // Dec 23..=29 drops the Sunday task and picks up Dec 29.
        assert_eq!(monday.this_week, 2);
    }

    #[test]
    fn project_progress_per_fixed_project() {
        let tasks = vec![
            task("a", 20, "work").with_status(TaskStatus::Completed),
            task("b", 21, "work"),
            task("c", 22, "work"),
            task("d", 23, "personal").with_status(TaskStatus::Completed),
        ];
        let projects = project_progress(&tasks);
        let ids: Vec<_> = projects.iter().map(|p| p.project_id.as_str()).collect();
        assert_eq!(ids, ["work", "personal", "learning"]);
        assert_eq!(projects[0].completed_tasks, 1);
        assert_eq!(projects[0].total_tasks, 3);
        assert_eq!(projects[0].progress, 33);
        assert_eq!(projects[1].progress, 100);
        assert_eq!(projects[2].progress, 0);
    }

    #[test]
    fn unknown_projects_get_their_own_group() {
        let tasks = vec![
            task("a", 20, "work"),
            task("b", 21, "garden").with_status(TaskStatus::Completed),
            task("c", 22, "chores"),
        ];
        let projects = project_progress(&tasks);
        assert_eq!(projects.len(), 4);
        let unknown = &projects[3];
        assert_eq!(unknown.project_id, UNKNOWN_PROJECT_ID);
        assert_eq!(unknown.total_tasks, 2);
        assert_eq!(unknown.progress, 50);
    }

    #[test]
    fn weekly_series_covers_the_current_week() {
        let tasks = vec![
            task("a", 23, "work").with_status(TaskStatus::Completed),
            task("b", 23, "work"),
            task("c", 23, "work"),
            task("d", 27, "work").with_status(TaskStatus::Completed),
            task("e", 30, "work"),
        ];
        let series = weekly_productivity(&tasks, day(27), WeekStart::Sunday);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, day(22));
        assert_eq!(series[0].weekday, "Sun");

        let mon = &series[1];
        assert_eq!((mon.total, mon.completed, mon.productivity), (3, 1, 33));
        let fri = &series[5];
        assert_eq!((fri.total, fri.completed, fri.productivity), (1, 1, 100));
        assert_eq!(series.iter().map(|d| d.total).sum::<usize>(), 4);
    }

    #[test]
    fn priority_breakdown_ignores_status() {
        let tasks = vec![
            task("a", 20, "work").with_priority(Priority::High),
            task("b", 20, "work")
                .with_priority(Priority::High)
                .with_status(TaskStatus::Completed),
            task("c", 20, "work").with_priority(Priority::Low),
        ];
        let b = priority_breakdown(&tasks);
        assert_eq!(
            b,
            PriorityBreakdown {
                high: 2,
                medium: 0,
                low: 1
            }
        );
        assert_eq!(b.count(Priority::Low), 1);
    }

    #[test]
    fn scope_is_a_caller_side_prefilter() {
        let tasks = vec![
            task("a", 23, "work"),
            task("b", 10, "work"),
            Task::new("c", "c", now()),
        ];
        let week = scope(&tasks, TimeFrame::Week, day(27), WeekStart::Sunday);
        assert_eq!(week.len(), 1);
        let month = scope(&tasks, TimeFrame::Month, day(27), WeekStart::Sunday);
        assert_eq!(month.len(), 2);

        let stats = compute(&week, day(27), WeekStart::Sunday);
        assert_eq!(stats.total, 1);
    }
}
