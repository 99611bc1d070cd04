//! Keyboard to game-action mapping

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map a key event to a game action
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),

        _ => None,
    }
}

/// Check if key should quit the game
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key starts a new round
pub fn should_start(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_for(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_key_map() {
        let cases = [
            (KeyCode::Left, Some(GameAction::MoveLeft)),
            (KeyCode::Char('a'), Some(GameAction::MoveLeft)),
            (KeyCode::Right, Some(GameAction::MoveRight)),
            (KeyCode::Down, Some(GameAction::SoftDrop)),
            (KeyCode::Up, Some(GameAction::Rotate)),
            (KeyCode::Char('k'), Some(GameAction::Rotate)),
            (KeyCode::Char(' '), Some(GameAction::HardDrop)),
            (KeyCode::Char('p'), Some(GameAction::TogglePause)),
            (KeyCode::Char('x'), None),
            (KeyCode::Tab, None),
        ];
        for (code, expected) in cases {
            assert_eq!(action_for(code), expected, "{:?}", code);
        }
    }

    #[test]
    fn test_quit_and_start_predicates() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        // Plain 'c' is not ctrl-c.
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));

        assert!(should_start(KeyEvent::from(KeyCode::Enter)));
        assert!(should_start(KeyEvent::from(KeyCode::Char('r'))));
        assert!(!should_start(KeyEvent::from(KeyCode::Char(' '))));
    }
}
