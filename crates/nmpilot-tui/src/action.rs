//! Actions for the nmpilot TUI
//!
//! Actions represent events that can modify application state.

/// Actions that can be dispatched in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Quit,
    Back,

    // View transitions
    /// Open the edit form for an interface (by name)
    OpenEditor(String),

    // Data loading
    Reload,
    /// The provider accepted a submission: (interface, status text)
    Submitted(String, String),

    // UI state
    Resize(u16, u16),
}
