//! Terminal session setup and the board entry point.
//!
//! `TerminalSession` owns raw mode and the alternate screen for as long as it
//! lives. Dropping it (normal quit, `?` on an error, or unwinding) restores
//! the terminal; a panic hook does the same before the panic is printed.

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::tui::board::{Board, Snapshot};
use crate::tui::dispatch::{CrosstermEvents, InputDispatcher};
use crate::tui::selection::Selection;

static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Exclusive handle on the terminal for the lifetime of the board.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    /// Switch to raw mode and the alternate screen.
    ///
    /// If any step fails, whatever was already switched on is undone before
    /// the error is returned.
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);

        let setup = (|| {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
            Terminal::new(CrosstermBackend::new(stdout))
        })();

        match setup {
            Ok(terminal) => {
                info!("terminal session acquired");
                Ok(TerminalSession { terminal })
            }
            Err(e) => {
                let _ = restore_terminal();
                Err(e)
            }
        }
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            error!("failed to restore terminal: {e}");
        }
        info!("terminal session released");
    }
}

/// Return the terminal to cooked mode with a visible cursor and a clean screen.
/// Safe to call repeatedly; only the first call after acquisition does work.
fn restore_terminal() -> io::Result<()> {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let raw = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), Show, LeaveAlternateScreen)?;
    raw
}

/// Make panics restore the terminal before the message is printed.
pub fn install_panic_hook() {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        previous_hook(panic_info);
    }));
}

/// Show `snapshot` on the board until the user quits.
/// Returns the selection at the time of quitting.
pub fn run_board(snapshot: Snapshot, control_lines: u16) -> io::Result<Selection> {
    let mut session = TerminalSession::acquire()?;
    let (width, height) = session.size()?;
    info!(width, height, "starting board");

    let mut board = Board::new(width, height, control_lines);
    board.set_column_data(snapshot);

    let mut dispatcher = InputDispatcher::new(Selection::start());
    let result = dispatcher.run(&board, session.terminal_mut(), &mut CrosstermEvents);

    drop(session);
    result
}
