//! Key translation from crossterm to the core key type

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nmpilot_core::Key;

/// Translate a terminal key event
pub fn to_key(event: &KeyEvent) -> Key {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Key::Other;
    }

    match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}
