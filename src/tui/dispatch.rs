//! Input loop: read a key, update the selection, repaint, repeat.
//!
//! The loop is strictly sequential. Each key is fully processed (state change
//! plus redraw) before the next one is read, so the highlight on screen always
//! matches the logical selection.

use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::debug;

use crate::tui::board::Board;
use crate::tui::keymap::command_for;
use crate::tui::selection::{Selection, Step};

/// Blocking source of terminal events.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads events from the real terminal.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// What handling a single event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a key press, or a key with no binding.
    Ignored,
    /// A bound key that left the selection where it was.
    Unchanged,
    /// The selection moved; the board must be repainted.
    Moved,
    Quit,
}

/// Drives the selection from keyboard input.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    selection: Selection,
    redraws: usize,
}

impl InputDispatcher {
    pub fn new(selection: Selection) -> Self {
        InputDispatcher { selection, redraws: 0 }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Number of repaints issued so far, including the initial one.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Feed one event to the state machine.
    pub fn handle(&mut self, event: &Event, lengths: &[usize; 3]) -> Dispatch {
        let Event::Key(key) = event else {
            return Dispatch::Ignored;
        };
        if key.kind != KeyEventKind::Press {
            return Dispatch::Ignored;
        }
        let Some(command) = command_for(key) else {
            return Dispatch::Ignored;
        };

        match self.selection.apply(command, lengths) {
            Step::Quit => Dispatch::Quit,
            Step::Continue(next) if next == self.selection => Dispatch::Unchanged,
            Step::Continue(next) => {
                debug!(?command, column = next.column, row = next.row, "selection moved");
                self.selection = next;
                Dispatch::Moved
            }
        }
    }

    /// Paint the board, then process events until a quit command arrives.
    /// Returns the final selection.
    pub fn run<B: Backend, E: EventSource>(
        &mut self,
        board: &Board,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> io::Result<Selection> {
        let lengths = board.column_lengths();
        self.selection = self.selection.clamped(&lengths);
        self.repaint(board, terminal)?;

        loop {
            let event = events.next_event()?;
            match self.handle(&event, &lengths) {
                Dispatch::Quit => break,
                Dispatch::Moved => self.repaint(board, terminal)?,
                Dispatch::Ignored | Dispatch::Unchanged => {}
            }
        }
        Ok(self.selection)
    }

    fn repaint<B: Backend>(&mut self, board: &Board, terminal: &mut Terminal<B>) -> io::Result<()> {
        board.redraw(terminal, self.selection)?;
        self.redraws += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    use crate::task::TaskRecord;
    use crate::tui::board::{Snapshot, CONTROL_LINES};

    struct Scripted(VecDeque<Event>);

    impl Scripted {
        fn keys(codes: &[KeyCode]) -> Self {
            Scripted(
                codes
                    .iter()
                    .map(|code| Event::Key(KeyEvent::new(*code, KeyModifiers::NONE)))
                    .collect(),
            )
        }
    }

    impl EventSource for Scripted {
        fn next_event(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    fn board(lengths: [usize; 3]) -> Board {
        let columns: [Vec<TaskRecord>; 3] = lengths.map(|n| (0..n).map(|i| TaskRecord::new(format!("t{i}"), None)).collect());
        let mut board = Board::new(90, 30, CONTROL_LINES);
        board.set_column_data(Snapshot::new(columns));
        board
    }

    fn run(lengths: [usize; 3], start: Selection, keys: &[KeyCode]) -> (Selection, usize) {
        let board = board(lengths);
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let mut dispatcher = InputDispatcher::new(start);
        let selection = dispatcher.run(&board, &mut terminal, &mut Scripted::keys(keys)).unwrap();
        (selection, dispatcher.redraws())
    }

    #[test]
    fn test_each_move_triggers_one_redraw() {
        let (selection, redraws) = run(
            [3, 3, 3],
            Selection::start(),
            &[KeyCode::Char('j'), KeyCode::Right, KeyCode::Char('q')],
        );
        assert_eq!(selection, Selection::new(1, 1));
        assert_eq!(redraws, 3);
    }

    #[test]
    fn test_unbound_and_blocked_keys_do_not_redraw() {
        let (selection, redraws) = run(
            [3, 3, 3],
            Selection::start(),
            &[KeyCode::Char('x'), KeyCode::Up, KeyCode::Left, KeyCode::Enter, KeyCode::Char('q')],
        );
        assert_eq!(selection, Selection::start());
        assert_eq!(redraws, 1);
    }

    #[test]
    fn test_empty_backlog_scenario() {
        let (selection, _) = run(
            [0, 2, 1],
            Selection::start(),
            &[KeyCode::Down, KeyCode::Right, KeyCode::Left, KeyCode::Char('q')],
        );
        assert_eq!(selection, Selection::new(0, 0));
    }

    #[test]
    fn test_right_out_of_empty_lane() {
        let (selection, _) = run([5, 0, 3], Selection::new(1, 0), &[KeyCode::Right, KeyCode::Char('q')]);
        assert_eq!(selection, Selection::new(2, 0));
    }

    #[test]
    fn test_release_and_non_key_events_are_ignored() {
        let mut dispatcher = InputDispatcher::new(Selection::start());
        let lengths = [3, 3, 3];

        let mut release = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(dispatcher.handle(&Event::Key(release), &lengths), Dispatch::Ignored);
        assert_eq!(dispatcher.handle(&Event::Resize(10, 10), &lengths), Dispatch::Ignored);
        assert_eq!(dispatcher.handle(&Event::FocusGained, &lengths), Dispatch::Ignored);
        assert_eq!(dispatcher.selection(), Selection::start());
    }

    #[test]
    fn test_event_source_errors_propagate() {
        let board = board([1, 1, 1]);
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let mut dispatcher = InputDispatcher::new(Selection::start());
        let result = dispatcher.run(&board, &mut terminal, &mut Scripted::keys(&[KeyCode::Down]));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
