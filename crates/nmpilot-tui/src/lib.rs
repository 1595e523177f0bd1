//! nmpilot-tui: Terminal UI for nmpilot
//!
//! A ratatui front end over the nmpilot-core form: an interface list screen
//! and an edit screen for one interface.

pub mod action;
pub mod app;
pub mod audit;
pub mod components;
pub mod frame_renderer;
pub mod input;
pub mod tui;
pub mod ui_ext;

pub use app::App;
pub use audit::init_audit_logger;
