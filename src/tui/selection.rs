//! Selection state machine.
//!
//! The whole navigation state is one `(column, row)` pair. `apply` is a pure
//! transition over that pair given the current lane lengths.

use crate::tui::enums::Command;

/// Number of lanes on the board.
pub const COLUMN_COUNT: usize = 3;

/// The highlighted lane and row.
///
/// `column` is always below `COLUMN_COUNT`. `row` is below the lane length,
/// or 0 when the lane is empty (in which case nothing is highlighted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub column: usize,
    pub row: usize,
}

/// Outcome of feeding one command to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue(Selection),
    Quit,
}

impl Selection {
    pub fn new(column: usize, row: usize) -> Self {
        Selection { column, row }
    }

    /// Selection at board start: first row of the Backlog.
    pub fn start() -> Self {
        Selection::default()
    }

    /// Bring an arbitrary pair back inside the invariants.
    pub fn clamped(self, lengths: &[usize; COLUMN_COUNT]) -> Self {
        let column = self.column.min(COLUMN_COUNT - 1);
        Selection::new(column, clamp_row(self.row, lengths[column]))
    }

    /// Apply `command` and return the next state.
    pub fn apply(self, command: Command, lengths: &[usize; COLUMN_COUNT]) -> Step {
        let Selection { column, row } = self.clamped(lengths);
        let next = match command {
            Command::Quit => return Step::Quit,
            Command::Up => Selection::new(column, row.saturating_sub(1)),
            Command::Down => Selection::new(column, clamp_row(row + 1, lengths[column])),
            Command::Left => {
                let column = column.saturating_sub(1);
                Selection::new(column, clamp_row(row, lengths[column]))
            }
            Command::Right => {
                let column = (column + 1).min(COLUMN_COUNT - 1);
                Selection::new(column, clamp_row(row, lengths[column]))
            }
        };
        Step::Continue(next)
    }
}

fn clamp_row(row: usize, len: usize) -> usize {
    row.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(selection: Selection, command: Command, lengths: &[usize; 3]) -> Selection {
        match selection.apply(command, lengths) {
            Step::Continue(next) => next,
            Step::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_up_and_down_stay_in_lane() {
        let lengths = [3, 0, 0];
        let mut s = Selection::start();
        s = step(s, Command::Up, &lengths);
        assert_eq!(s, Selection::new(0, 0));
        s = step(s, Command::Down, &lengths);
        s = step(s, Command::Down, &lengths);
        assert_eq!(s, Selection::new(0, 2));
        s = step(s, Command::Up, &lengths);
        assert_eq!(s, Selection::new(0, 1));
    }

    #[test]
    fn test_down_never_passes_last_row() {
        for n in 0..6 {
            let lengths = [n, 2, 2];
            let mut s = Selection::start();
            for _ in 0..10 {
                s = step(s, Command::Down, &lengths);
                assert!(s.row < n.max(1), "row {} for lane of {n}", s.row);
            }
            assert_eq!(s.row, n.saturating_sub(1));
        }
    }

    #[test]
    fn test_column_never_leaves_board() {
        let lengths = [1, 1, 1];
        let commands = [Command::Left, Command::Right, Command::Right, Command::Right, Command::Right, Command::Left];
        let mut s = Selection::start();
        for command in commands.iter().cycle().take(60) {
            s = step(s, *command, &lengths);
            assert!(s.column < COLUMN_COUNT);
        }
        for _ in 0..5 {
            s = step(s, Command::Right, &lengths);
        }
        assert_eq!(s.column, 2);
        for _ in 0..5 {
            s = step(s, Command::Left, &lengths);
        }
        assert_eq!(s.column, 0);
    }

    #[test]
    fn test_empty_backlog_round_trip() {
        let lengths = [0, 4, 2];
        let mut s = Selection::start();

        s = step(s, Command::Down, &lengths);
        assert_eq!(s, Selection::new(0, 0));
        s = step(s, Command::Right, &lengths);
        assert_eq!(s, Selection::new(1, 0));
        s = step(s, Command::Left, &lengths);
        assert_eq!(s, Selection::new(0, 0));
    }

    #[test]
    fn test_moving_out_of_empty_lane_reclamps_row() {
        let lengths = [5, 0, 3];
        let s = step(Selection::new(1, 0), Command::Right, &lengths);
        assert_eq!(s, Selection::new(2, 0));
    }

    #[test]
    fn test_lateral_move_clamps_to_shorter_lane() {
        let lengths = [5, 2, 3];
        let s = step(Selection::new(0, 4), Command::Right, &lengths);
        assert_eq!(s, Selection::new(1, 1));
        let s = step(Selection::new(0, 4), Command::Left, &lengths);
        assert_eq!(s, Selection::new(0, 4));
    }

    #[test]
    fn test_quit_leaves_selection_alone() {
        assert_eq!(Selection::new(2, 1).apply(Command::Quit, &[3, 3, 3]), Step::Quit);
    }

    #[test]
    fn test_clamped_repairs_stale_selection() {
        assert_eq!(Selection::new(7, 9).clamped(&[1, 1, 4]), Selection::new(2, 3));
        assert_eq!(Selection::new(1, 3).clamped(&[1, 0, 4]), Selection::new(1, 0));
    }
}
