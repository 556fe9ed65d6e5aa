//! # twk - TaskWarrior Kanban
//!
//! A terminal kanban board for [TaskWarrior](https://taskwarrior.org). Pending tasks
//! are split into **Backlog** and **In Progress** (started tasks), completed tasks
//! fill the **Done** lane, and a control strip along the bottom shows details
//! for the highlighted task.
//!
//! ```text
//! +-----------+-------------+----------+
//! |  Backlog  | In Progress |   Done   |
//! |           |             |          |
//! +-----------+-------------+----------+
//! |              Controls              |
//! +------------------------------------+
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the board for everything
//! twk
//!
//! # Only tasks of one project, due within a week
//! twk board project:home due:1w
//!
//! # Plain-text dump of the lanes
//! twk list
//!
//! # Work from a saved export instead of the live database
//! task export > tasks.json
//! twk --from-file tasks.json
//! ```
//!
//! ## Keys
//!
//! - `h` / `←`, `l` / `→` - previous / next lane
//! - `k` / `↑`, `j` / `↓` - previous / next task
//! - `q` or `Ctrl-C` - quit
//!
//! The board is a read-only view: it never modifies tasks. Settings live in
//! `~/.config/taskwarrior-kanban/settings.toml`, logs in the local data
//! directory under `taskwarrior-kanban/logs/`.

use clap::Parser;
use tracing::{error, warn};
use tracing_appender::non_blocking::WorkerGuard;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod logging;
pub mod settings;
pub mod source;
pub mod task;
pub mod tui {
    pub mod board;
    pub mod colors;
    pub mod column;
    pub mod controls;
    pub mod dispatch;
    pub mod enums;
    pub mod keymap;
    pub mod row;
    pub mod selection;
    pub mod session;
}

use cli::Cli;
use cmd::*;
use settings::Settings;
use source::{JsonFileSource, TaskSource, TaskwarriorSource};

fn main() {
    let mut log_guard = None;
    if let Err(e) = run(Cli::parse(), &mut log_guard) {
        error!("{e:#}");
        // Flush the log file before the process goes away.
        drop(log_guard);
        eprintln!("twk: {e:#}");
        std::process::exit(1);
    }
}

/// Execute `cli`. The log writer guard is handed back through `log_guard` so
/// `main` can still log a fatal error before flushing it.
fn run(cli: Cli, log_guard: &mut Option<WorkerGuard>) -> anyhow::Result<()> {
    // Completions never touch settings, logs or TaskWarrior.
    if let Some(Commands::Completions { shell }) = cli.command {
        cmd_completions(shell);
        return Ok(());
    }

    let (settings, settings_error) = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    let level = logging::resolve_level(cli.log_level.as_deref(), settings.log_level.as_deref());
    match logging::init_logging(level.as_deref()) {
        Ok((_, guard)) => *log_guard = Some(guard),
        Err(e) => eprintln!("twk: logging disabled: {e:#}"),
    }
    if let Some(e) = settings_error {
        warn!("using default settings: {e:#}");
    }

    tui::session::install_panic_hook();

    let source: Box<dyn TaskSource> = match &cli.from_file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(TaskwarriorSource::new(settings.task_binary.clone())),
    };

    match cli.command {
        None => cmd_board(source.as_ref(), &settings, &[])?,
        Some(Commands::Board { filters }) => cmd_board(source.as_ref(), &settings, &filters)?,
        Some(Commands::List { filters }) => cmd_list(source.as_ref(), &settings, &filters)?,
        Some(Commands::Completions { shell }) => cmd_completions(shell),
    }
    Ok(())
}
