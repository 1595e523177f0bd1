//! UI extensions for nmpilot-core types
//!
//! ratatui styling for the framework-free core and schema types.

use nmpilot_core::Emphasis;
use nmstate_rs::InterfaceState;
use ratatui::style::{Color, Modifier, Style};

/// Extension trait for Emphasis to provide ratatui styles
pub trait EmphasisExt {
    /// Border color of a field box
    fn color(&self) -> Color;

    /// Style for the field text
    fn style(&self) -> Style;
}

impl EmphasisExt for Emphasis {
    fn color(&self) -> Color {
        match self {
            Emphasis::Normal => Color::DarkGray,
            Emphasis::Selected => Color::Cyan,
            Emphasis::Editing => Color::Yellow,
            Emphasis::Error => Color::Red,
        }
    }

    fn style(&self) -> Style {
        match self {
            Emphasis::Normal => Style::default().fg(Color::White),
            Emphasis::Selected => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            Emphasis::Editing => Style::default().fg(Color::Yellow),
            Emphasis::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Extension trait for InterfaceState to provide an indicator
pub trait InterfaceStateExt {
    /// Get symbol and color together
    fn symbol_and_color(&self) -> (&'static str, Color);
}

impl InterfaceStateExt for InterfaceState {
    fn symbol_and_color(&self) -> (&'static str, Color) {
        match self {
            InterfaceState::Up => ("●", Color::Green),
            InterfaceState::Down => ("○", Color::DarkGray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_colors() {
        assert_eq!(Emphasis::Normal.color(), Color::DarkGray);
        assert_eq!(Emphasis::Selected.color(), Color::Cyan);
        assert_eq!(Emphasis::Editing.color(), Color::Yellow);
        assert_eq!(Emphasis::Error.color(), Color::Red);
    }

    #[test]
    fn test_interface_state_indicator() {
        let (symbol, color) = InterfaceState::Up.symbol_and_color();
        assert_eq!(symbol, "●");
        assert_eq!(color, Color::Green);
        assert_eq!(InterfaceState::Down.symbol_and_color().1, Color::DarkGray);
    }
}
