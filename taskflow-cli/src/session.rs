use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use taskflow_core::{
    compute_statistics, filter_and_sort, project_month, scope, Clock, Filter, Month, SortKey,
    Statistics, SystemClock, TaskStore, TimeFrame, WeekStart,
};

use crate::config::Config;
use crate::render::{render_calendar, render_list, render_stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Calendar,
    Stats,
}

/// One store plus the view parameters the projections are invoked with.
///
/// Nothing is cached: every render re-runs the projection over the current list.
pub struct Session<C: Clock = SystemClock> {
    pub store: TaskStore<C>,
    pub today: NaiveDate,
    pub week_start: WeekStart,
    pub filter: Filter,
    pub sort: SortKey,
    pub month: Month,
    pub selected: Option<NaiveDate>,
    pub time_frame: Option<TimeFrame>,
    /// Due date offered to the next `add` after selecting an empty day.
    /// Cleared by [`Session::switch_view`] and by the `add` that uses it.
    pub prefill_due: Option<NaiveDate>,
    pub view: View,
}

impl<C: Clock> Session<C> {
    pub fn new(store: TaskStore<C>, cfg: &Config, today: NaiveDate) -> Self {
        Self {
            store,
            today,
            week_start: cfg.calendar.week_start,
            filter: cfg.list.filter,
            sort: cfg.list.sort,
            month: Month::containing(today),
            selected: None,
            time_frame: None,
            prefill_due: None,
            view: View::List,
        }
    }

    /// Moves to `view`; any pending due-date prefill belongs to the old one.
    pub fn switch_view(&mut self, view: View) {
        self.prefill_due = None;
        self.view = view;
    }

    pub fn statistics(&self) -> Statistics {
        match self.time_frame {
            Some(frame) => {
                let scoped = scope(self.store.tasks(), frame, self.today, self.week_start);
                compute_statistics(&scoped, self.today, self.week_start)
            }
            None => compute_statistics(self.store.tasks(), self.today, self.week_start),
        }
    }

    pub fn render(&self, view: View) -> String {
        let tasks = self.store.tasks();
        match view {
            View::List => {
                let rows = filter_and_sort(tasks, self.filter, self.sort, self.today);
                render_list(&rows, self.filter, self.sort, self.today)
            }
            View::Calendar => {
                let grid =
                    project_month(tasks, self.month, self.selected, self.today, self.week_start);
                render_calendar(&grid, self.today)
            }
            View::Stats => render_stats(&self.statistics(), self.time_frame),
        }
    }

    pub fn render_current(&self) -> String {
        self.render(self.view)
    }

    pub fn to_json(&self, view: View) -> Result<String> {
        let tasks = self.store.tasks();
        let json = match view {
            View::List => pretty(&filter_and_sort(tasks, self.filter, self.sort, self.today))?,
            View::Calendar => pretty(&project_month(
                tasks,
                self.month,
                self.selected,
                self.today,
                self.week_start,
            ))?,
            View::Stats => pretty(&self.statistics())?,
        };
        Ok(json)
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
