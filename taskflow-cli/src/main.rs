use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::io;
use taskflow_core::{today_in, Filter, Month, SortKey, TaskStore, TimeFrame};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod due;
mod render;
mod session;
mod shell;
mod state;

use config::Config;
use session::{Session, View};

#[derive(Parser, Debug)]
#[command(name = "taskflow", version, about = "Task dashboard: list, calendar and progress views")]
struct Cli {
    /// Pretend today is this date (YYYY-MM-DD, tomorrow, -3d, ...)
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filtered and sorted task list
    List {
        /// all | pending | in-progress | completed | overdue
        #[arg(long)]
        filter: Option<Filter>,

        /// due-date | priority | created
        #[arg(long)]
        sort: Option<SortKey>,

        #[arg(long)]
        json: bool,
    },

    /// Month grid with per-day priority markers
    Calendar {
        /// YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<Month>,

        /// Highlight a day and list what is due on it
        #[arg(long)]
        select: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Completion, project progress and weekly productivity
    Stats {
        /// Restrict to tasks due this week or this month
        #[arg(long)]
        time_frame: Option<TimeFrame>,

        #[arg(long)]
        json: bool,
    },

    /// Interactive session over the seed list (default)
    Shell,

    /// Manage ~/.taskflow/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_tracing(&cfg.log.level);

    let today = resolve_today(&cfg, cli.today.as_deref())?;
    debug!(%today, week_start = %cfg.calendar.week_start, "resolved today");
    let mut session = Session::new(TaskStore::seeded(), &cfg, today);

    match cli.command.unwrap_or(Command::Shell) {
        Command::List { filter, sort, json } => {
            if let Some(f) = filter {
                session.filter = f;
            }
            if let Some(s) = sort {
                session.sort = s;
            }
            print_view(&session, View::List, json)?;
        }

        Command::Calendar {
            month,
            select,
            json,
        } => {
            if let Some(sel) = select {
                let date = due::parse_due(&sel, today)?;
                session.selected = Some(date);
                session.month = Month::containing(date);
            }
            if let Some(m) = month {
                session.month = m;
            }
            print_view(&session, View::Calendar, json)?;
        }

        Command::Stats { time_frame, json } => {
            session.time_frame = time_frame;
            print_view(&session, View::Stats, json)?;
        }

        Command::Shell => {
            let stdin = io::stdin();
            shell::run_shell(&mut session, stdin.lock(), io::stdout())?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_today(cfg: &Config, flag: Option<&str>) -> Result<NaiveDate> {
    let local = today_in(&cfg.calendar.timezone, Utc::now())?;
    match flag {
        Some(s) => due::parse_due(s, local),
        None => Ok(local),
    }
}

fn print_view(session: &Session, view: View, json: bool) -> Result<()> {
    if json {
        println!("{}", session.to_json(view)?);
    } else {
        print!("{}", session.render(view));
    }
    Ok(())
}
