//! nmpilot-core: Core editing logic for nmpilot
//!
//! This crate holds the interface form and everything behind it. It does
//! not depend on any terminal library, so the whole edit flow can be driven
//! and tested with plain [`Key`] values and a recording [`Renderer`].
//!
//! # Modules
//!
//! - [`validators`] - Per-kind value predicates (IPv4 address, bridge name)
//! - [`editors`] - Text, toggle, choice and action field editors
//! - [`form`] - Field descriptors and the form model built from an interface
//! - [`visibility`] - Which fields are shown for the current values
//! - [`session`] - The form controller driven one key at a time
//! - [`bridges`] - Bridge collection and membership reconciliation
//! - [`pipeline`] - Change detection and submission to a provider
//! - [`render`] - The renderer capability the form draws through
//! - [`selection`] - Clamped list selection shared with the list screen
//! - [`errors`] - Error types and status text formatting
//! - [`constants`] - Field names, capacities and result texts

pub mod bridges;
pub mod constants;
pub mod editors;
pub mod errors;
pub mod form;
pub mod key;
pub mod pipeline;
pub mod render;
pub mod selection;
pub mod session;
pub mod validators;
pub mod visibility;

// Re-export commonly used items at crate root
pub use bridges::BridgeSet;
pub use errors::*;
pub use form::{FieldDescriptor, FieldKind, FieldMap, FieldValue, Form};
pub use key::Key;
pub use pipeline::ApplyOutcome;
pub use render::{Emphasis, FieldView, Renderer};
pub use selection::SelectableList;
pub use session::{ControllerState, FormSession, SessionEvent, Status, open_form};
