//! In-memory state provider
//!
//! Holds interfaces and bridges in memory and folds applied documents back
//! into them, roughly the way nmstate would. Used by tests and demo mode.

use crate::error::NmstateError;
use crate::provider::StateProvider;
use crate::schema::{
    BridgeEntity, DeltaKind, DesiredState, InterfaceRecord, InterfaceState, Ipv4Config,
};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct Inner {
    interfaces: Vec<InterfaceRecord>,
    bridges: Vec<BridgeEntity>,
    apply_calls: Vec<DesiredState>,
    fail_next: Option<String>,
}

/// A [`StateProvider`] with no side effects outside the process
#[derive(Debug, Default)]
pub struct MemoryProvider {
    inner: RefCell<Inner>,
}

impl MemoryProvider {
    pub fn new(interfaces: Vec<InterfaceRecord>, bridges: Vec<BridgeEntity>) -> Self {
        Self {
            inner: RefCell::new(Inner {
                interfaces,
                bridges,
                ..Inner::default()
            }),
        }
    }

    /// A small lab network: one bridge with one port and three free ports
    pub fn demo() -> Self {
        let mut enp0s3 = InterfaceRecord::ethernet("enp0s3");
        enp0s3.mac_address = Some("08:00:27:9A:11:02".to_string());
        enp0s3.mtu = Some(1500);

        let mut enp0s8 = InterfaceRecord::ethernet("enp0s8");
        enp0s8.mac_address = Some("08:00:27:C8:5E:4A".to_string());
        enp0s8.mtu = Some(1500);
        enp0s8.controller = "br0".to_string();
        enp0s8.ipv4 = Ipv4Config::default();

        let mut enp0s9 = InterfaceRecord::ethernet("enp0s9");
        enp0s9.mac_address = Some("08:00:27:01:7F:E3".to_string());
        enp0s9.mtu = Some(1500);
        enp0s9.ipv4 = Ipv4Config::manual("192.168.56.10", 24);

        let mut enp0s10 = InterfaceRecord::ethernet("enp0s10");
        enp0s10.mac_address = Some("08:00:27:44:D0:9B".to_string());
        enp0s10.mtu = Some(9000);
        enp0s10.state = InterfaceState::Down;
        enp0s10.ipv4 = Ipv4Config::default();

        Self::new(
            vec![enp0s3, enp0s8, enp0s9, enp0s10],
            vec![BridgeEntity::new("br0", vec!["enp0s8".to_string()])],
        )
    }

    /// Make the next apply fail with `message`
    pub fn fail_next_apply(&self, message: &str) {
        self.inner.borrow_mut().fail_next = Some(message.to_string());
    }

    /// Every document passed to `apply_desired_state`, including failed ones
    pub fn apply_calls(&self) -> Vec<DesiredState> {
        self.inner.borrow().apply_calls.clone()
    }

    pub fn apply_count(&self) -> usize {
        self.inner.borrow().apply_calls.len()
    }

    pub fn interface(&self, name: &str) -> Option<InterfaceRecord> {
        self.inner
            .borrow()
            .interfaces
            .iter()
            .find(|i| i.name == name)
            .cloned()
    }
}

impl StateProvider for MemoryProvider {
    fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>, NmstateError> {
        Ok(self.inner.borrow().interfaces.clone())
    }

    fn list_bridges(&self) -> Result<Vec<BridgeEntity>, NmstateError> {
        Ok(self.inner.borrow().bridges.clone())
    }

    fn apply_desired_state(&self, document: &DesiredState) -> Result<(), NmstateError> {
        let mut inner = self.inner.borrow_mut();
        inner.apply_calls.push(document.clone());

        if let Some(message) = inner.fail_next.take() {
            return Err(NmstateError::Apply(message));
        }

        let delta = &document.delta;
        let Some(iface) = inner.interfaces.iter_mut().find(|i| i.name == delta.name) else {
            return Err(NmstateError::Apply(format!(
                "Interface {} not found",
                delta.name
            )));
        };

        iface.state = delta.state;
        match delta.kind {
            DeltaKind::Down => {}
            DeltaKind::ManualIp | DeltaKind::Dhcp => {
                if let Some(ipv4) = &delta.ipv4 {
                    iface.ipv4 = ipv4.clone();
                }
            }
            DeltaKind::Attach => {
                if let Some(controller) = &delta.controller {
                    iface.controller = controller.clone();
                }
            }
        }

        // Bridge port lists are authoritative for controller membership
        inner.bridges = document.bridges.clone();
        let Inner {
            interfaces,
            bridges,
            ..
        } = &mut *inner;
        for iface in interfaces.iter_mut() {
            iface.controller = bridges
                .iter()
                .find(|b| b.has_port(&iface.name))
                .map(|b| b.name.clone())
                .unwrap_or_default();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InterfaceDelta;

    #[test]
    fn test_apply_attach() {
        let provider = MemoryProvider::new(vec![InterfaceRecord::ethernet("eth0")], vec![]);
        let doc = DesiredState::new(
            vec![BridgeEntity::new("br0", vec!["eth0".to_string()])],
            InterfaceDelta::attach("eth0", "br0"),
        );

        provider.apply_desired_state(&doc).unwrap();

        assert_eq!(provider.apply_count(), 1);
        assert_eq!(provider.interface("eth0").unwrap().controller, "br0");
        assert_eq!(provider.list_bridges().unwrap().len(), 1);
    }

    #[test]
    fn test_dhcp_detaches_port() {
        let mut eth0 = InterfaceRecord::ethernet("eth0");
        eth0.controller = "br0".to_string();
        let provider = MemoryProvider::new(
            vec![eth0],
            vec![BridgeEntity::new("br0", vec!["eth0".to_string()])],
        );
        let doc = DesiredState::new(
            vec![BridgeEntity::new("br0", vec![])],
            InterfaceDelta::dhcp("eth0"),
        );

        provider.apply_desired_state(&doc).unwrap();

        let eth0 = provider.interface("eth0").unwrap();
        assert_eq!(eth0.controller, "");
        assert!(eth0.ipv4.dhcp);
    }

    #[test]
    fn test_fail_next_apply() {
        let provider = MemoryProvider::new(vec![InterfaceRecord::ethernet("eth0")], vec![]);
        provider.fail_next_apply("verification failed");

        let doc = DesiredState::new(vec![], InterfaceDelta::down("eth0"));
        let err = provider.apply_desired_state(&doc).unwrap_err();
        assert_eq!(err.to_string(), "verification failed");
        assert_eq!(
            provider.interface("eth0").unwrap().state,
            InterfaceState::Up
        );

        // Only the next apply fails
        provider.apply_desired_state(&doc).unwrap();
        assert_eq!(
            provider.interface("eth0").unwrap().state,
            InterfaceState::Down
        );
        assert_eq!(provider.apply_count(), 2);
    }

    #[test]
    fn test_demo_is_consistent() {
        let provider = MemoryProvider::demo();
        let bridges = provider.list_bridges().unwrap();
        for iface in provider.list_interfaces().unwrap() {
            if iface.controller.is_empty() {
                assert!(bridges.iter().all(|b| !b.has_port(&iface.name)));
            } else {
                let owner = bridges.iter().find(|b| b.name == iface.controller).unwrap();
                assert!(owner.has_port(&iface.name));
            }
        }
    }
}
