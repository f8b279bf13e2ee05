//! Key mapping from terminal events to controller input events.

use crate::types::{InputEvent, Key};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a terminal key code onto the key vocabulary.
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Down => Some(Key::ArrowDown),
        _ => None,
    }
}

/// Map a terminal key event onto a key-down or key-up event.
///
/// Auto-repeat is reported as another key-down.
pub fn translate(key: KeyEvent) -> Option<InputEvent> {
    let k = key_from_code(key.code)?;
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(InputEvent::KeyDown(k)),
        KeyEventKind::Release => Some(InputEvent::KeyUp(k)),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_vocabulary_keys() {
        assert_eq!(key_from_code(KeyCode::Enter), Some(Key::Enter));
        assert_eq!(key_from_code(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(key_from_code(KeyCode::Left), Some(Key::ArrowLeft));
        assert_eq!(key_from_code(KeyCode::Up), Some(Key::ArrowUp));
        assert_eq!(key_from_code(KeyCode::Right), Some(Key::ArrowRight));
        assert_eq!(key_from_code(KeyCode::Down), Some(Key::ArrowDown));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        for code in [
            KeyCode::Char(' '),
            KeyCode::Char('h'),
            KeyCode::Tab,
            KeyCode::Backspace,
            KeyCode::F(1),
        ] {
            assert_eq!(translate(KeyEvent::from(code)), None, "{code:?}");
        }
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(
            translate(KeyEvent::from(KeyCode::Down)),
            Some(InputEvent::KeyDown(Key::ArrowDown))
        );
        assert_eq!(
            translate(with_kind(KeyCode::Down, KeyEventKind::Repeat)),
            Some(InputEvent::KeyDown(Key::ArrowDown))
        );
        assert_eq!(
            translate(with_kind(KeyCode::Down, KeyEventKind::Release)),
            Some(InputEvent::KeyUp(Key::ArrowDown))
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
        assert!(!should_quit(with_kind(KeyCode::Char('q'), KeyEventKind::Release)));
    }
}
