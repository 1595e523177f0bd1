//! Framework-independent key input
//!
//! The front end translates terminal events into [`Key`] so the form logic
//! never depends on a particular terminal library.

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Delete,
    Char(char),
    /// Anything the form does not react to
    Other,
}

impl Key {
    /// Printable ASCII (0x20..=0x7E) carried by this key, if any
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if (' '..='~').contains(c) => Some(*c),
            _ => None,
        }
    }
}
