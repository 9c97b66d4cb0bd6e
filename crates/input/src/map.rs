//! Key mapping from terminal events to game commands.
//!
//! | Key | Command |
//! |-----|---------|
//! | ←/→ | move left/right (X) |
//! | ↓ | move down |
//! | z / x | move front/back (Z) |
//! | space | hard drop |
//! | shift+→ / shift+← | turn about X, +90° / -90° |
//! | shift+↑ / shift+↓ | turn about Y, +90° / -90° |
//! | shift+z / shift+x | turn about Z, +90° / -90° |
//! | enter | start |
//! | p | pause/resume |
//! | r | reset |
//! | e | end |
//! | q, ctrl+c | quit |

use crate::types::{Action, RotateDir, TranslateDir};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Play(Action),
    Start,
    TogglePause,
    Reset,
    End,
}

/// Map keyboard input to a command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let play = |a: Action| Some(Command::Play(a));
    match key.code {
        // Rotation (shift held)
        KeyCode::Right if shift => play(Action::Rotate(RotateDir::XPos)),
        KeyCode::Left if shift => play(Action::Rotate(RotateDir::XNeg)),
        KeyCode::Up if shift => play(Action::Rotate(RotateDir::YPos)),
        KeyCode::Down if shift => play(Action::Rotate(RotateDir::YNeg)),
        KeyCode::Char('Z') => play(Action::Rotate(RotateDir::ZPos)),
        KeyCode::Char('X') => play(Action::Rotate(RotateDir::ZNeg)),
        KeyCode::Char('z') if shift => play(Action::Rotate(RotateDir::ZPos)),
        KeyCode::Char('x') if shift => play(Action::Rotate(RotateDir::ZNeg)),

        // Movement
        KeyCode::Left => play(Action::Translate(TranslateDir::Left)),
        KeyCode::Right => play(Action::Translate(TranslateDir::Right)),
        KeyCode::Down => play(Action::Translate(TranslateDir::Down)),
        KeyCode::Char('z') => play(Action::Translate(TranslateDir::Front)),
        KeyCode::Char('x') => play(Action::Translate(TranslateDir::Back)),
        KeyCode::Char(' ') => play(Action::HardDrop),

        // Session
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::End),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
