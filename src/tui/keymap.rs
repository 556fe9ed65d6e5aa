//! Key code to navigation command table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::enums::Command;

/// Unmodified keys recognised by the board.
pub const KEY_BINDINGS: &[(KeyCode, Command)] = &[
    (KeyCode::Char('k'), Command::Up),
    (KeyCode::Up, Command::Up),
    (KeyCode::Char('j'), Command::Down),
    (KeyCode::Down, Command::Down),
    (KeyCode::Char('h'), Command::Left),
    (KeyCode::Left, Command::Left),
    (KeyCode::Char('l'), Command::Right),
    (KeyCode::Right, Command::Right),
    (KeyCode::Char('q'), Command::Quit),
];

/// Look up the command bound to `key`, if any.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    // Raw mode swallows SIGINT, so Ctrl-C has to quit explicitly.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
    }
    KEY_BINDINGS
        .iter()
        .find(|(code, _)| *code == key.code)
        .map(|(_, command)| *command)
}
