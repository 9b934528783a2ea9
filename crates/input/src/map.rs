//! Key mapping from terminal events to game actions.
//!
//! | Keys | Action |
//! |------|--------|
//! | Left / Right | move along x |
//! | Up / Down | move along y |
//! | Space | drop |
//! | `q` / `a` | rotate about +x / -x |
//! | `w` / `s` | rotate about +y / -y |
//! | `e` / `d` | rotate about +z / -z |
//! | `p` / Pause | pause |
//! | Enter | confirm (new game after game over) |
//! | Esc / Ctrl-C | quit |

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Release events (reported by some terminals) are ignored, as is anything
/// pressed together with Ctrl.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Up => Some(GameAction::MoveUp),
        KeyCode::Down => Some(GameAction::MoveDown),
        KeyCode::Char(' ') => Some(GameAction::Drop),

        // Rotation
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameAction::RotateXPos),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::RotateXNeg),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::RotateYPos),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::RotateYNeg),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(GameAction::RotateZPos),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::RotateZNeg),

        // Actions
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Pause => Some(GameAction::Pause),
        KeyCode::Enter => Some(GameAction::Confirm),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
