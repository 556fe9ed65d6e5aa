use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Kanban board for TaskWarrior.
/// Tasks are read from `task export` unless --from-file is given.
#[derive(Parser)]
#[command(name = "twk", version, about = "Terminal kanban board for TaskWarrior")]
pub struct Cli {
    /// Read tasks from a saved `task export` JSON file instead of running TaskWarrior.
    #[arg(long, global = true)]
    pub from_file: Option<PathBuf>,

    /// Path to the settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: trace | debug | info | warn | error | off.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
