//! Plain-text rendering of the core projections.
//!
//! Marker glyphs and labels live here; the core only hands over priorities,
//! project ids and dates.

use chrono::{Datelike, NaiveDate};
use taskflow_core::{
    due_label, CalendarGrid, DayCell, Filter, Priority, Project, SelectionHint, SortKey,
    Statistics, Task, TimeFrame, MAX_MARKERS,
};

const CELL_WIDTH: usize = 9;

pub fn priority_marker(priority: Priority) -> char {
    match priority {
        Priority::High => '!',
        Priority::Medium => '*',
        Priority::Low => '.',
    }
}

/// First eight characters of an id, enough to address it from the shell.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn task_line(task: &Task, today: NaiveDate) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    format!(
        "{check} {:<8}  {:<34} {:<6} {:<14} {}",
        short_id(&task.id),
        truncate(&task.title, 34),
        task.priority,
        Project::lookup(&task.project_id).name(),
        due_label(task, today),
    )
}

pub fn render_list(tasks: &[&Task], filter: Filter, sort: SortKey, today: NaiveDate) -> String {
    let mut s = format!("Tasks ({filter}, by {sort}): {}\n", tasks.len());
    if tasks.is_empty() {
        s.push_str("  (nothing here)\n");
        return s;
    }
    for t in tasks {
        s.push_str(&format!("  {}\n", task_line(t, today)));
        if let Some(desc) = &t.description {
            s.push_str(&format!("        {}\n", truncate(desc, 70)));
        }
    }
    s
}

fn cell_text(cell: &DayCell<'_>) -> String {
    let day = cell.date.day();
    let mut s = if cell.in_month {
        format!("{day:>2}")
    } else {
        format!("{:>2}", "··")
    };
    s.push(if cell.is_selected {
        '<'
    } else if cell.is_today {
        '*'
    } else {
        ' '
    });
    s.extend(cell.markers().into_iter().map(priority_marker));
    if let Some(hidden) = cell.overflow() {
        s.push_str(&format!("+{hidden}"));
    }
    s
}

pub fn render_calendar(grid: &CalendarGrid<'_>, today: NaiveDate) -> String {
    let first = grid.month.first_day();
    let mut s = format!("{}\n", first.format("%B %Y"));

    let header: Vec<String> = grid
        .cells
        .iter()
        .take(7)
        .map(|c| format!("{:<CELL_WIDTH$}", c.date.weekday().to_string()))
        .collect();
    s.push_str(header.join("").trim_end());
    s.push('\n');

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|c| format!("{:<CELL_WIDTH$}", cell_text(c)))
            .collect();
        s.push_str(row.trim_end());
        s.push('\n');
    }

    s.push_str(&format!(
        "legend: * today  < selected  {} high  {} medium  {} low  +n beyond {MAX_MARKERS}\n",
        priority_marker(Priority::High),
        priority_marker(Priority::Medium),
        priority_marker(Priority::Low),
    ));

    match grid.selection() {
        Some(SelectionHint::ShowTasks { date, count }) => {
            s.push_str(&format!("\n{}: {count} task(s)\n", date.format("%a %b %d")));
            for t in grid.tasks_due(date) {
                s.push_str(&format!("  {}\n", task_line(t, today)));
            }
        }
        Some(SelectionHint::PrefillDueDate { date }) => {
            s.push_str(&format!(
                "\n{}: nothing due. New tasks will default to this date.\n",
                date.format("%a %b %d")
            ));
        }
        None => {}
    }
    s
}

pub fn render_stats(stats: &Statistics, frame: Option<TimeFrame>) -> String {
    let scope = match frame {
        Some(f) => format!(" (this {f})"),
        None => String::new(),
    };
    let mut s = format!("Progress{scope}\n");
    s.push_str(&format!(
        "  total {:>3}   {} this week, {} this month\n",
        stats.total, stats.this_week, stats.this_month
    ));
    s.push_str(&format!(
        "  done  {:>3}   completion {}%\n",
        stats.completed, stats.completion_rate
    ));
    s.push_str(&format!("  open  {:>3}\n", stats.pending));
    s.push_str(&format!("  late  {:>3}\n", stats.overdue));

    s.push_str("\nProjects\n");
    for p in &stats.projects {
        s.push_str(&format!(
            "  {:<16} {} {:>3}%  {}/{} tasks\n",
            p.name,
            bar(p.progress, 20),
            p.progress,
            p.completed_tasks,
            p.total_tasks
        ));
    }

    s.push_str("\nThis week\n");
    for d in &stats.productivity {
        s.push_str(&format!(
            "  {} {}  {} {:>3}%  {}/{}\n",
            d.weekday,
            d.date.format("%m-%d"),
            bar(d.productivity, 10),
            d.productivity,
            d.completed,
            d.total
        ));
    }

    let b = &stats.priority_breakdown;
    s.push_str(&format!(
        "\nPriorities  high {}  medium {}  low {}\n",
        b.high, b.medium, b.low
    ));
    s
}

fn bar(pct: u8, width: usize) -> String {
    let filled = usize::from(pct.min(100)) * width / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
