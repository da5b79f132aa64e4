//! Key mapping from terminal events to game input.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Command(GameCommand),
    /// Pick up the offered piece at this tray slot (0-based).
    SelectPiece(usize),
    /// Move the board cursor by a row/column step.
    MoveCursor { dr: i8, dc: i8 },
    /// Drop the held piece at the cursor.
    Place,
    /// Put the held piece back in the tray.
    Cancel,
}

/// Map keyboard input to a game action.
pub fn map_key(key: KeyEvent) -> Option<InputAction> {
    let action = match key.code {
        // Tray slots
        KeyCode::Char(c @ '1'..='5') => InputAction::SelectPiece(c as usize - '1' as usize),

        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            InputAction::MoveCursor { dr: 0, dc: -1 }
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            InputAction::MoveCursor { dr: 0, dc: 1 }
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            InputAction::MoveCursor { dr: -1, dc: 0 }
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            InputAction::MoveCursor { dr: 1, dc: 0 }
        }

        // Drag
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::Place,
        KeyCode::Esc => InputAction::Cancel,

        // Session
        KeyCode::Char('n') | KeyCode::Char('N') => InputAction::Command(GameCommand::StartGame),
        KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Command(GameCommand::ResetGame),
        KeyCode::Char('m') | KeyCode::Char('M') => InputAction::Command(GameCommand::ExitToMenu),
        KeyCode::Char('v') | KeyCode::Char('V') => InputAction::Command(GameCommand::ToggleSound),
        KeyCode::Char('b') | KeyCode::Char('B') => InputAction::Command(GameCommand::ToggleHaptics),

        _ => return None,
    };
    Some(action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_tray_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('1'))),
            Some(InputAction::SelectPiece(0))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('3'))),
            Some(InputAction::SelectPiece(2))
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('6'))), None);
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(InputAction::MoveCursor { dr: 0, dc: -1 })
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('J'))),
            Some(InputAction::MoveCursor { dr: 1, dc: 0 })
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Up)),
            Some(InputAction::MoveCursor { dr: -1, dc: 0 })
        );
    }

    #[test]
    fn test_drag_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(InputAction::Place));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(InputAction::Place));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(InputAction::Cancel));
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('n'))),
            Some(InputAction::Command(GameCommand::StartGame))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('M'))),
            Some(InputAction::Command(GameCommand::ExitToMenu))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('v'))),
            Some(InputAction::Command(GameCommand::ToggleSound))
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
