//! The state provider seam
//!
//! Everything that touches the real network stack sits behind
//! [`StateProvider`]. Calls are synchronous request/response; any timeout is
//! the provider's own business.

use crate::config::ClientConfig;
use crate::error::NmstateError;
use crate::nmstatectl::{self, NetState};
use crate::schema::{BridgeEntity, DesiredState, InterfaceRecord};

/// Source of current network state and sink for desired state
pub trait StateProvider {
    /// Ethernet interfaces currently known to the system
    fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>, NmstateError>;

    /// Linux bridges and their ports
    fn list_bridges(&self) -> Result<Vec<BridgeEntity>, NmstateError>;

    /// Apply a desired-state document
    ///
    /// On rejection the error's display text is the provider's message.
    fn apply_desired_state(&self, document: &DesiredState) -> Result<(), NmstateError>;

    /// Interfaces and bridges read together
    ///
    /// Providers that can read both from one query should override this so
    /// a refresh never mixes two different states.
    fn snapshot(&self) -> Result<NetState, NmstateError> {
        Ok(NetState {
            interfaces: self.list_interfaces()?,
            bridges: self.list_bridges()?,
        })
    }
}

/// Provider backed by the `nmstatectl` command line tool
#[derive(Debug, Clone)]
pub struct NmstatectlProvider {
    binary: String,
    verify: bool,
}

impl NmstatectlProvider {
    pub fn new(binary: impl Into<String>, verify: bool) -> Self {
        Self {
            binary: binary.into(),
            verify,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.nmstatectl.clone(), config.verify)
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for NmstatectlProvider {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl StateProvider for NmstatectlProvider {
    fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>, NmstateError> {
        Ok(nmstatectl::show(&self.binary)?.interfaces)
    }

    fn list_bridges(&self) -> Result<Vec<BridgeEntity>, NmstateError> {
        Ok(nmstatectl::show(&self.binary)?.bridges)
    }

    fn apply_desired_state(&self, document: &DesiredState) -> Result<(), NmstateError> {
        let yaml = document.to_yaml()?;
        nmstatectl::apply(&self.binary, &yaml, self.verify)
    }

    fn snapshot(&self) -> Result<NetState, NmstateError> {
        nmstatectl::show(&self.binary)
    }
}
