//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::MOVE_LEFT)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::MOVE_RIGHT)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::SoftDrop)
        }

        // Rotation (clockwise only)
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),

        _ => None,
    }
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
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Command::MOVE_LEFT)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(Command::MOVE_RIGHT)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(Command::SoftDrop)
        );

        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('a'))),
            Some(Command::MOVE_LEFT)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('L'))),
            Some(Command::MOVE_RIGHT)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(Command::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Command::Rotate)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('w'))),
            Some(Command::Rotate)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('K'))),
            Some(Command::Rotate)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(Command::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(Command::Restart)
        );
    }

    #[test]
    fn test_control_chords_are_not_commands() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
