//! Bridge membership
//!
//! The session-owned collection of bridges and the reconciler that moves
//! one interface between their port sets.

use std::collections::BTreeMap;

use nmstate_rs::BridgeEntity;

/// Bridges keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeSet {
    bridges: BTreeMap<String, BridgeEntity>,
}

impl BridgeSet {
    /// Build from a provider listing; bridges listed twice are merged
    pub fn new(bridges: Vec<BridgeEntity>) -> Self {
        let mut set = Self::default();
        for bridge in bridges {
            match set.bridges.get_mut(&bridge.name) {
                Some(existing) => {
                    for port in bridge.ports {
                        if !existing.has_port(&port) {
                            existing.ports.push(port);
                        }
                    }
                }
                None => {
                    set.bridges.insert(bridge.name.clone(), bridge);
                }
            }
        }
        set
    }

    pub fn get(&self, name: &str) -> Option<&BridgeEntity> {
        self.bridges.get(name)
    }

    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BridgeEntity> {
        self.bridges.values()
    }

    /// Name of the bridge that has `iface` as a port
    pub fn owner_of(&self, iface: &str) -> Option<&str> {
        self.iter()
            .find(|b| b.has_port(iface))
            .map(|b| b.name.as_str())
    }

    pub fn to_vec(&self) -> Vec<BridgeEntity> {
        self.bridges.values().cloned().collect()
    }

    /// Move `iface` from the `previous` bridge to the `desired` one
    ///
    /// Empty names mean "no bridge". The interface is added to the desired
    /// bridge before it is removed from the previous one. A missing
    /// previous bridge is ignored; a missing desired bridge is created.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmpilot_core::bridges::BridgeSet;
    ///
    /// let mut bridges = BridgeSet::default();
    /// bridges.reconcile("eth0", "", "br0");
    /// bridges.reconcile("eth0", "br0", "br1");
    ///
    /// assert!(bridges.get("br0").unwrap().ports.is_empty());
    /// assert_eq!(bridges.owner_of("eth0"), Some("br1"));
    /// ```
    pub fn reconcile(&mut self, iface: &str, previous: &str, desired: &str) {
        if previous == desired {
            return;
        }

        if !desired.is_empty() {
            let bridge = self
                .bridges
                .entry(desired.to_string())
                .or_insert_with(|| BridgeEntity::new(desired, Vec::new()));
            if !bridge.has_port(iface) {
                bridge.ports.push(iface.to_string());
            }
            tracing::debug!("Added {} to bridge {}", iface, desired);
        }

        if !previous.is_empty() {
            match self.bridges.get_mut(previous) {
                Some(bridge) => {
                    bridge.ports.retain(|p| p != iface);
                    tracing::debug!("Removed {} from bridge {}", iface, previous);
                }
                None => {
                    tracing::debug!("Previous bridge {} of {} is gone", previous, iface);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(set: &BridgeSet, name: &str) -> Vec<String> {
        set.get(name).map(|b| b.ports.clone()).unwrap_or_default()
    }

    /// Every interface is a port of at most one bridge
    fn assert_single_owner(set: &BridgeSet) {
        let mut seen = Vec::new();
        for bridge in set.iter() {
            for port in &bridge.ports {
                assert!(!seen.contains(port), "{port} has two controllers");
                seen.push(port.clone());
            }
        }
    }

    #[test]
    fn test_attach_then_move() {
        let mut set = BridgeSet::default();

        set.reconcile("eth0", "", "br0");
        assert_eq!(ports(&set, "br0"), vec!["eth0"]);

        set.reconcile("eth0", "br0", "br1");
        assert!(ports(&set, "br0").is_empty());
        assert_eq!(ports(&set, "br1"), vec!["eth0"]);

        set.reconcile("eth0", "br0", "br1");
        assert_eq!(ports(&set, "br1"), vec!["eth0"]);
        assert_single_owner(&set);
    }

    #[test]
    fn test_same_controller_is_noop() {
        let mut set = BridgeSet::new(vec![BridgeEntity::new("br0", vec!["eth1".into()])]);
        let before = set.clone();

        set.reconcile("eth0", "", "");
        set.reconcile("eth1", "br0", "br0");
        assert_eq!(set, before);
    }

    #[test]
    fn test_detach_keeps_other_ports() {
        let mut set = BridgeSet::new(vec![
            BridgeEntity::new("br0", vec!["eth0".into(), "eth1".into(), "eth2".into()]),
            BridgeEntity::new("br1", vec!["eth3".into()]),
        ]);

        set.reconcile("eth1", "br0", "");
        assert_eq!(ports(&set, "br0"), vec!["eth0", "eth2"]);
        assert_eq!(ports(&set, "br1"), vec!["eth3"]);
        assert_eq!(set.owner_of("eth1"), None);
    }

    #[test]
    fn test_missing_previous_bridge() {
        let mut set = BridgeSet::default();
        set.reconcile("eth0", "br-gone", "br0");

        assert_eq!(set.len(), 1);
        assert_eq!(set.owner_of("eth0"), Some("br0"));
    }

    #[test]
    fn test_existing_bridge_appends_in_order() {
        let mut set = BridgeSet::new(vec![BridgeEntity::new("br0", vec!["eth1".into()])]);
        set.reconcile("eth0", "", "br0");

        assert_eq!(ports(&set, "br0"), vec!["eth1", "eth0"]);
        assert_single_owner(&set);
    }

    #[test]
    fn test_new_merges_duplicates() {
        let set = BridgeSet::new(vec![
            BridgeEntity::new("br0", vec!["eth0".into()]),
            BridgeEntity::new("br0", vec!["eth0".into(), "eth1".into()]),
        ]);

        assert_eq!(set.len(), 1);
        assert_eq!(ports(&set, "br0"), vec!["eth0", "eth1"]);
    }
}
