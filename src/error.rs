//! Error types for gathering tasks and driving the board.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Fatal errors surfaced to `main`.
///
/// Messages never repeat their source; `main` prints the whole chain.
/// Missing record fields and degenerate terminal sizes are not errors; they
/// are absorbed by the record deserializer and the layout respectively.
#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("failed to read task export '{}'", path.display())]
    ReadExport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not run `{binary}` (is TaskWarrior installed?)")]
    TaskBinaryMissing {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {status}: {stderr}")]
    TaskCommand {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("task export is not valid UTF-8")]
    Encoding(#[from] FromUtf8Error),

    #[error("invalid task export")]
    Parse(#[from] serde_json::Error),

    #[error("terminal error")]
    Terminal(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, KanbanError>;
