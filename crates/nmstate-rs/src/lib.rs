//! nmstate-rs: a small client for nmstate
//!
//! This crate provides the types and the provider seam the editor uses to
//! read the current network state and to submit desired-state documents.
//!
//! # Example
//!
//! ```no_run
//! use nmstate_rs::{NmstatectlProvider, StateProvider};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = NmstatectlProvider::default();
//!
//!     for iface in provider.list_interfaces()? {
//!         println!("{}: {}", iface.name, iface.state);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod nmstatectl;
pub mod provider;
pub mod schema;

pub use config::ClientConfig;
pub use error::NmstateError;
pub use memory::MemoryProvider;
pub use nmstatectl::NetState;
pub use provider::{NmstatectlProvider, StateProvider};
pub use schema::{
    BridgeEntity, DeltaKind, DesiredState, ETHERNET, InterfaceDelta, InterfaceRecord,
    InterfaceState, Ipv4Address, Ipv4Config, LINUX_BRIDGE,
};
