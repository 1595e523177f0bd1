//! Screens of the nmpilot TUI
//!
//! The app owns one component per view and routes key events to the
//! active one.

pub mod editor;
pub mod interfaces;

pub use editor::EditorComponent;
pub use interfaces::InterfacesComponent;

use crate::action::Action;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

/// A full-screen view
pub trait Component {
    /// Translate a key press into an app-level action, if any
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
