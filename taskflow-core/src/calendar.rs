//! Calendar projection: month grid of day cells with their due tasks.
//!
//! The grid runs from the start of the week holding the month's first day to
//! the end of the week holding its last day, so it is always whole weeks
//! (28, 35 or 42 cells) and always contains every day of the month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::task::{Priority, Task};
use crate::time::WeekStart;

/// Priority markers drawn per cell before falling back to an overflow count.
pub const MAX_MARKERS: usize = 3;

/// A calendar month, independent of any particular day in it.
///
/// Serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first - Duration::days(1)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn prev(self) -> Self {
        self.offset(-1)
    }

    /// Shifts by `delta` months; saturates at the ends of chrono's date range.
    pub fn offset(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        Self {
            first: shifted.unwrap_or(self.first),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = ParseError;

    /// Accepts `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::new("month", s, "YYYY-MM");
        let (y, m) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        Month::new(year, month).ok_or_else(err)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

impl TryFrom<String> for Month {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One day in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// False for leading/trailing days of the neighbouring months.
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Tasks due on `date`, in list order.
    pub tasks: Vec<&'a Task>,
}

impl DayCell<'_> {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Priorities of the first `MAX_MARKERS` tasks.
    pub fn markers(&self) -> Vec<Priority> {
        self.tasks
            .iter()
            .take(MAX_MARKERS)
            .map(|t| t.priority)
            .collect()
    }

    /// Tasks beyond the drawn markers, when there are any.
    pub fn overflow(&self) -> Option<usize> {
        self.tasks
            .len()
            .checked_sub(MAX_MARKERS)
            .filter(|&hidden| hidden > 0)
    }
}

/// What the UI should do after a date is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum SelectionHint {
    /// Show the tasks due on the selected day.
    ShowTasks { date: NaiveDate, count: usize },
    /// Nothing is due that day; offer a new task due on it.
    PrefillDueDate { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid<'a> {
    pub month: Month,
    pub week_start: WeekStart,
    pub selected: Option<NaiveDate>,
    pub cells: Vec<DayCell<'a>>,
    /// Hint for `selected`, counted over the whole list so a selection
    /// outside the displayed weeks still reports its tasks.
    selection: Option<SelectionHint>,
    #[serde(skip)]
    source: &'a [Task],
}

impl<'a> CalendarGrid<'a> {
    /// Rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<'a>]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        self.cells.iter().find(|c| c.date == date)
    }

    /// Tasks due on any `date`, inside the grid or not.
    pub fn tasks_due(&self, date: NaiveDate) -> Vec<&'a Task> {
        tasks_due_on(self.source, date)
    }

    pub fn tasks_on(&self, date: NaiveDate) -> usize {
        self.tasks_due(date).len()
    }

    pub fn selection(&self) -> Option<SelectionHint> {
        self.selection
    }
}

fn selection_hint(date: NaiveDate, count: usize) -> SelectionHint {
    if count == 0 {
        SelectionHint::PrefillDueDate { date }
    } else {
        SelectionHint::ShowTasks { date, count }
    }
}

/// Tasks due exactly on `date`, in list order.
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_due_on(date)).collect()
}

/// Selection hint for any date, including dates outside a rendered grid.
pub fn select_date(tasks: &[Task], date: NaiveDate) -> SelectionHint {
    let count = tasks.iter().filter(|t| t.is_due_on(date)).count();
    selection_hint(date, count)
}

/// Builds the month grid for `month`.
pub fn project_month<'a>(
    tasks: &'a [Task],
    month: Month,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    week_start: WeekStart,
) -> CalendarGrid<'a> {
    let start = week_start.week_start(month.first_day());
    let end = week_start.week_end(month.last_day());

    let cells = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| DayCell {
            date,
            in_month: month.contains(date),
            is_today: date == today,
            is_selected: selected == Some(date),
            tasks: tasks_due_on(tasks, date),
        })
        .collect();

    CalendarGrid {
        month,
        week_start,
        selected,
        cells,
        selection: selected.map(|date| select_date(tasks, date)),
        source: tasks,
    }
}
