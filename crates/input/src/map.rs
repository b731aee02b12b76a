//! Key mapping from terminal events to board actions.
//!
//! Arrow keys move the selection cursor; WASD swaps the selected tile with
//! its neighbour. Up means toward the top of the screen, which is `+y` on the
//! board.

use crate::types::{BoardAction, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to board actions.
pub fn handle_key_event(key: KeyEvent) -> Option<BoardAction> {
    if !is_press(key) {
        return None;
    }
    match key.code {
        // Selection
        KeyCode::Left => Some(BoardAction::Select(Direction::Left)),
        KeyCode::Right => Some(BoardAction::Select(Direction::Right)),
        KeyCode::Up => Some(BoardAction::Select(Direction::Up)),
        KeyCode::Down => Some(BoardAction::Select(Direction::Down)),

        // Swaps
        KeyCode::Char('a') | KeyCode::Char('A') => Some(BoardAction::Swap(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(BoardAction::Swap(Direction::Right)),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(BoardAction::Swap(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(BoardAction::Swap(Direction::Down)),

        _ => None,
    }
}

/// True for press and repeat events. Key releases are ignored everywhere.
pub fn is_press(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}

/// Check if key should deal a fresh board.
pub fn is_restart(key: KeyEvent) -> bool {
    is_press(key) && matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    is_press(key)
        && (matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_arrow_keys_select() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(BoardAction::Select(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(BoardAction::Select(Direction::Right))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(BoardAction::Select(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(BoardAction::Select(Direction::Down))
        );
    }

    #[test]
    fn test_wasd_swaps() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('w'))),
            Some(BoardAction::Swap(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('A'))),
            Some(BoardAction::Swap(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(BoardAction::Swap(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('D'))),
            Some(BoardAction::Swap(Direction::Right))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);
        assert!(!should_quit(KeyEvent { code: KeyCode::Esc, ..release }));
    }

    #[test]
    fn test_restart_and_quit_keys() {
        assert!(is_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert!(!is_restart(KeyEvent::from(KeyCode::Char('q'))));

        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('q'))), None);
    }
}
