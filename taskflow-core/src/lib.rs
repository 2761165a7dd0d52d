//! taskflow-core: task store and derived-state projections for the TaskFlow dashboard.
//!
//! The store owns the task list; the list, calendar and dashboard views are
//! pure functions of that list plus explicit view parameters (filter, sort,
//! month, selected date, today). Callers re-run the projections after every
//! store mutation.

pub mod calendar;
pub mod error;
pub mod filter;
pub mod project;
pub mod seed;
pub mod stats;
pub mod store;
pub mod task;
pub mod time;

pub use calendar::{
    project_month, select_date, tasks_due_on, CalendarGrid, DayCell, Month, SelectionHint,
    MAX_MARKERS,
};
pub use error::{ParseError, StoreError};
pub use filter::{due_label, filter_and_sort, DueLabel, Filter, SortKey};
pub use project::{Project, ProjectRef, DEFAULT_PROJECT_ID, PROJECTS, UNKNOWN_PROJECT_ID};
pub use seed::seed_tasks;
pub use stats::{
    compute as compute_statistics, percent, scope, DayProductivity, PriorityBreakdown,
    ProjectProgress, Statistics, TimeFrame,
};
pub use store::TaskStore;
pub use task::{NewTask, Priority, Task, TaskStatus};
pub use time::{today_in, Clock, FixedClock, SystemClock, WeekStart};
