//! Line-oriented session over a single in-memory store.
//!
//! Each mutation re-renders whichever view the user last looked at.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use taskflow_core::{
    select_date, Clock, Filter, Month, NewTask, SelectionHint, SortKey, Task, TimeFrame,
};
use tracing::{debug, info};

use crate::due::parse_due;
use crate::render::{short_id, task_line};
use crate::session::{Session, View};

const HELP: &str = "\
commands:
  add <title> [| due] [| priority] [| project] [| description]
  done <id>            toggle completion (id prefix is enough)
  rm <id>              delete a task
  list [filter] [sort] filter: all|pending|in-progress|completed|overdue
                       sort: due-date|priority|created
  cal [prev|next|YYYY-MM]
  select <date>        pick a calendar day (YYYY-MM-DD, today, +3d)
  stats [week|month|all]
  help
  quit";

pub enum Outcome {
    Output(String),
    Quit,
}

pub fn run_shell<C: Clock, R: BufRead, W: Write>(
    session: &mut Session<C>,
    input: R,
    mut out: W,
) -> Result<()> {
    info!(tasks = session.store.len(), today = %session.today, "shell session started");
    writeln!(out, "{}", session.render_current())?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("read command")?;
        match execute(session, &line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Output(text)) => {
                if !text.is_empty() {
                    writeln!(out, "{text}")?;
                }
            }
            Err(e) => writeln!(out, "error: {e:#}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn execute<C: Clock>(session: &mut Session<C>, line: &str) -> Result<Outcome> {
    let line = line.trim();
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    debug!(cmd, "shell command");

    match cmd {
        "" => Ok(Outcome::Output(String::new())),
        "quit" | "exit" | "q" => Ok(Outcome::Quit),
        "help" | "?" => Ok(Outcome::Output(HELP.to_string())),
        "add" => {
            let task = add(session, rest)?;
            let mut text = format!("created {}", task_line(&task, session.today));
            text.push('\n');
            text.push_str(&session.render_current());
            Ok(Outcome::Output(text))
        }
        "done" | "toggle" => {
            let id = resolve_id(session, rest)?;
            let task = session.store.toggle_complete(&id)?;
            let verb = if task.completed { "completed" } else { "reopened" };
            Ok(Outcome::Output(format!(
                "{verb} {}\n{}",
                task.title,
                session.render_current()
            )))
        }
        "rm" | "delete" => {
            let id = resolve_id(session, rest)?;
            let task = session.store.delete(&id)?;
            Ok(Outcome::Output(format!(
                "deleted {}\n{}",
                task.title,
                session.render_current()
            )))
        }
        "list" | "ls" => {
            let (mut filter, mut sort) = (session.filter, session.sort);
            for arg in rest.split_whitespace() {
                match arg.parse::<Filter>() {
                    Ok(f) => filter = f,
                    Err(_) => sort = arg.parse::<SortKey>()?,
                }
            }
            session.filter = filter;
            session.sort = sort;
            session.switch_view(View::List);
            Ok(Outcome::Output(session.render_current()))
        }
        "cal" | "calendar" => {
            session.month = match rest {
                "" => session.month,
                "prev" => session.month.prev(),
                "next" => session.month.next(),
                "today" => Month::containing(session.today),
                other => other.parse::<Month>()?,
            };
            session.switch_view(View::Calendar);
            Ok(Outcome::Output(session.render_current()))
        }
        "select" => {
            let date = parse_due(rest, session.today)?;
            session.selected = Some(date);
            session.month = Month::containing(date);
            session.prefill_due = match select_date(session.store.tasks(), date) {
                SelectionHint::PrefillDueDate { date } => Some(date),
                SelectionHint::ShowTasks { .. } => None,
            };
            session.view = View::Calendar;
            Ok(Outcome::Output(session.render_current()))
        }
        "stats" => {
            session.time_frame = match rest {
                "" | "all" => None,
                other => Some(other.parse::<TimeFrame>()?),
            };
            session.switch_view(View::Stats);
            Ok(Outcome::Output(session.render_current()))
        }
        other => bail!("unknown command '{other}' (try `help`)"),
    }
}

/// Parses `title | due | priority | project | description`; blank fields keep defaults.
fn add<C: Clock>(session: &mut Session<C>, args: &str) -> Result<Task> {
    let mut fields = args.split('|').map(str::trim);
    let mut input = NewTask::titled(fields.next().unwrap_or_default());

    match fields.next().filter(|f| !f.is_empty()) {
        Some(due) => input.due_date = Some(parse_due(due, session.today)?),
        None => input.due_date = session.prefill_due,
    }
    if let Some(p) = fields.next().filter(|f| !f.is_empty()) {
        input.priority = Some(p.parse()?);
    }
    if let Some(project) = fields.next().filter(|f| !f.is_empty()) {
        input.project_id = Some(project.to_string());
    }
    if let Some(desc) = fields.next().filter(|f| !f.is_empty()) {
        input.description = Some(desc.to_string());
    }

    let task = session.store.create(input)?;
    session.prefill_due = None;
    Ok(task)
}

fn resolve_id<C: Clock>(session: &Session<C>, prefix: &str) -> Result<String> {
    if prefix.is_empty() {
        bail!("missing task id");
    }
    if let Some(t) = session.store.get(prefix) {
        return Ok(t.id.clone());
    }
    match session.store.find_by_prefix(prefix).as_slice() {
        [] => bail!("task '{prefix}' not found"),
        [only] => Ok(only.id.clone()),
        many => bail!(
            "id '{prefix}' is ambiguous: {}",
            many.iter()
                .map(|t| short_id(&t.id))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
