//! Keyboard polling. Never blocks: one call drains at most one event.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub const RESET_KEY: char = 'x';
pub const QUIT_KEY: char = 'q';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reset,
    /// Any other character, including the jump key.
    Press(char),
    Resize { cols: u16, rows: u16 },
}

/// Bindings are lowercase only.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Char(QUIT_KEY) => Some(Command::Quit),
        KeyCode::Char(RESET_KEY) => Some(Command::Reset),
        KeyCode::Char(c) => Some(Command::Press(c)),
        _ => None,
    }
}

pub fn map_event(ev: Event) -> Option<Command> {
    match ev {
        Event::Key(key) => map_key(key),
        Event::Resize(cols, rows) => Some(Command::Resize { cols, rows }),
        _ => None,
    }
}

/// Return the next command if an event is already waiting.
pub fn poll_command() -> Result<Option<Command>> {
    while event::poll(Duration::ZERO)? {
        if let Some(cmd) = map_event(event::read()?) {
            return Ok(Some(cmd));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Option<Command> {
        map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_bindings() {
        assert_eq!(press(KeyCode::Char(' ')), Some(Command::Press(' ')));
        assert_eq!(press(KeyCode::Char('x')), Some(Command::Reset));
        assert_eq!(press(KeyCode::Char('q')), Some(Command::Quit));
    }

    #[test]
    fn test_uppercase_is_not_bound() {
        assert_eq!(press(KeyCode::Char('Q')), Some(Command::Press('Q')));
        assert_eq!(press(KeyCode::Char('X')), Some(Command::Press('X')));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Command::Quit));
    }

    #[test]
    fn test_non_character_keys_ignored() {
        assert_eq!(press(KeyCode::Up), None);
        assert_eq!(press(KeyCode::Esc), None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(
            map_event(Event::Resize(120, 40)),
            Some(Command::Resize { cols: 120, rows: 40 })
        );
    }
}
