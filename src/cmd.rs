//! Command implementations for the CLI interface.

use std::io::{self, Write};

use chrono::Utc;
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::error::{KanbanError, Result};
use crate::settings::Settings;
use crate::source::{build_snapshot, TaskSource};
use crate::tui::board::Snapshot;
use crate::tui::enums::Lane;
use crate::tui::row::{format_row, BORDER_CELLS};
use crate::tui::session::run_board;

/// Width used by `list` when stdout is not a terminal.
const FALLBACK_WIDTH: usize = 90;

#[derive(Subcommand)]
pub enum Commands {
    /// Open the kanban board (the default).
    Board {
        /// TaskWarrior filter arguments, e.g. `project:home due:1w`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        filters: Vec<String>,
    },

    /// Print the three lanes as plain text.
    List {
        /// TaskWarrior filter arguments.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        filters: Vec<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Gather a snapshot of the three lanes from `source`.
pub fn gather(source: &dyn TaskSource, settings: &Settings, filters: &[String]) -> Result<Snapshot> {
    let records = source.fetch(filters)?;
    Ok(build_snapshot(records, &settings.lane_policy(), Utc::now()))
}

/// Launch the board and block until the user quits.
pub fn cmd_board(source: &dyn TaskSource, settings: &Settings, filters: &[String]) -> Result<()> {
    let snapshot = gather(source, settings, filters)?;
    let selection = run_board(snapshot, settings.control_lines).map_err(KanbanError::Terminal)?;
    info!(column = selection.column, row = selection.row, "board closed");
    Ok(())
}

/// Print every lane to stdout.
pub fn cmd_list(source: &dyn TaskSource, settings: &Settings, filters: &[String]) -> Result<()> {
    let snapshot = gather(source, settings, filters)?;
    let width = crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(FALLBACK_WIDTH);
    let stdout = io::stdout();
    write_lanes(&snapshot, width, &mut stdout.lock())?;
    Ok(())
}

/// Write each lane heading followed by its rows, formatted for `width` cells.
pub fn write_lanes<W: Write>(snapshot: &Snapshot, width: usize, out: &mut W) -> io::Result<()> {
    for lane in Lane::ALL {
        let tasks = &snapshot.columns[lane.index()];
        writeln!(out, "== {} ({}) ==", lane.title(), tasks.len())?;
        for task in tasks {
            writeln!(out, " {}", format_row(task, width, BORDER_CELLS).trim_end())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskRecord, TaskStatus};

    struct Fixed(Vec<TaskRecord>);

    impl TaskSource for Fixed {
        fn fetch(&self, _filters: &[String]) -> Result<Vec<TaskRecord>> {
            Ok(self.0.clone())
        }
    }

    fn record(description: &str, status: TaskStatus, started: bool) -> TaskRecord {
        TaskRecord {
            description: description.to_string(),
            project: Some("home".to_string()),
            status: Some(status),
            start: started.then(Utc::now),
            ..Default::default()
        }
    }

    #[test]
    fn test_gather_builds_lanes() {
        let source = Fixed(vec![
            record("plan", TaskStatus::Pending, false),
            record("build", TaskStatus::Pending, true),
            record("ship", TaskStatus::Completed, false),
        ]);
        let snapshot = gather(&source, &Settings::default(), &[]).unwrap();
        assert_eq!(snapshot.lengths(), [1, 1, 1]);
    }

    #[test]
    fn test_write_lanes_lists_every_lane() {
        let snapshot = Snapshot::new([
            vec![TaskRecord::new("Buy milk", Some("home"))],
            Vec::new(),
            vec![TaskRecord::new("Write the quarterly financial report for stakeholders", Some("work"))],
        ]);
        let mut out = Vec::new();
        write_lanes(&snapshot, 30, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("== Backlog (1) =="));
        assert!(text.contains(" Buy milk [home]\n"));
        assert!(text.contains("== In Progress (0) =="));
        assert!(text.contains(" Write the quarterl... [work]\n"));
    }

    #[test]
    fn test_gather_propagates_source_errors() {
        struct Broken;
        impl TaskSource for Broken {
            fn fetch(&self, _filters: &[String]) -> Result<Vec<TaskRecord>> {
                Err(KanbanError::Io(io::Error::new(io::ErrorKind::NotFound, "gone")))
            }
        }
        assert!(matches!(gather(&Broken, &Settings::default(), &[]), Err(KanbanError::Io(_))));
    }
}
