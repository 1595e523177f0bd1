//! nmstate document types
//!
//! Only the subset of the nmstate schema that the editor reads or writes is
//! modelled here. Unknown keys in `nmstatectl show` output are ignored.

use crate::error::NmstateError;
use serde::{Deserialize, Serialize, Serializer};

/// Interface type reported for ethernet ports
pub const ETHERNET: &str = "ethernet";

/// Interface type reported for linux bridges
pub const LINUX_BRIDGE: &str = "linux-bridge";

/// Administrative interface state
///
/// nmstate knows more states (`absent`, `ignore`, `unknown`); anything other
/// than `up` is presented as `down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceState {
    Up,
    #[default]
    #[serde(other)]
    Down,
}

impl InterfaceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceState::Up => "up",
            InterfaceState::Down => "down",
        }
    }
}

impl std::fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static IPv4 address with its prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Address {
    pub ip: String,
    #[serde(rename = "prefix-length")]
    pub prefix_length: u8,
}

/// IPv4 configuration subtree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ipv4Config {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub dhcp: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Ipv4Address>,
}

impl Ipv4Config {
    /// IPv4 enabled with DHCP, no static addresses
    pub fn dhcp() -> Self {
        Self {
            enabled: true,
            dhcp: true,
            address: Vec::new(),
        }
    }

    /// IPv4 enabled with a single static address, DHCP off
    pub fn manual(ip: &str, prefix_length: u8) -> Self {
        Self {
            enabled: true,
            dhcp: false,
            address: vec![Ipv4Address {
                ip: ip.to_string(),
                prefix_length,
            }],
        }
    }

    /// First configured address, if any
    pub fn first_ip(&self) -> Option<&str> {
        self.address.first().map(|a| a.ip.as_str())
    }
}

/// Current state of one network interface as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InterfaceRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub iface_type: String,
    #[serde(default)]
    pub state: InterfaceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    /// Name of the owning bridge; empty when the interface is not a port
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub controller: String,
    #[serde(default)]
    pub ipv4: Ipv4Config,
}

impl InterfaceRecord {
    /// Create an ethernet record that is up with DHCP and no controller
    pub fn ethernet(name: &str) -> Self {
        Self {
            name: name.to_string(),
            iface_type: ETHERNET.to_string(),
            state: InterfaceState::Up,
            mac_address: None,
            mtu: None,
            controller: String::new(),
            ipv4: Ipv4Config::dhcp(),
        }
    }

    pub fn is_ethernet(&self) -> bool {
        self.iface_type == ETHERNET
    }
}

/// A linux bridge and the names of its ports
///
/// Bridges are always written back as `state: up` with DHCP enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BridgeEntity {
    pub name: String,
    /// Port interface names in insertion order
    pub ports: Vec<String>,
}

impl BridgeEntity {
    pub fn new(name: &str, ports: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            ports,
        }
    }

    pub fn has_port(&self, port: &str) -> bool {
        self.ports.iter().any(|p| p == port)
    }
}

#[derive(Serialize)]
struct PortRef<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct BridgePorts<'a> {
    port: Vec<PortRef<'a>>,
}

#[derive(Serialize)]
struct BridgeDoc<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    iface_type: &'static str,
    state: InterfaceState,
    ipv4: Ipv4Config,
    bridge: BridgePorts<'a>,
}

impl<'a> From<&'a BridgeEntity> for BridgeDoc<'a> {
    fn from(bridge: &'a BridgeEntity) -> Self {
        Self {
            name: &bridge.name,
            iface_type: LINUX_BRIDGE,
            state: InterfaceState::Up,
            ipv4: Ipv4Config::dhcp(),
            bridge: BridgePorts {
                port: bridge.ports.iter().map(|p| PortRef { name: p }).collect(),
            },
        }
    }
}

impl Serialize for BridgeEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BridgeDoc::from(self).serialize(serializer)
    }
}

/// What an interface delta changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    /// Bring the interface down
    Down,
    /// Static IPv4 address, DHCP off
    ManualIp,
    /// Enable DHCP
    Dhcp,
    /// Attach the interface to a bridge
    Attach,
}

impl DeltaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaKind::Down => "down",
            DeltaKind::ManualIp => "manual-ip",
            DeltaKind::Dhcp => "dhcp",
            DeltaKind::Attach => "attach",
        }
    }
}

impl std::fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial interface state carrying only the changed attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDelta {
    #[serde(skip)]
    pub kind: DeltaKind,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub iface_type: Option<String>,
    pub state: InterfaceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
}

impl InterfaceDelta {
    pub fn down(name: &str) -> Self {
        Self {
            kind: DeltaKind::Down,
            name: name.to_string(),
            iface_type: None,
            state: InterfaceState::Down,
            ipv4: None,
            controller: None,
        }
    }

    pub fn manual_ip(name: &str, ip: &str, prefix_length: u8) -> Self {
        Self {
            kind: DeltaKind::ManualIp,
            name: name.to_string(),
            iface_type: None,
            state: InterfaceState::Up,
            ipv4: Some(Ipv4Config::manual(ip, prefix_length)),
            controller: None,
        }
    }

    pub fn dhcp(name: &str) -> Self {
        Self {
            kind: DeltaKind::Dhcp,
            name: name.to_string(),
            iface_type: Some(ETHERNET.to_string()),
            state: InterfaceState::Up,
            ipv4: Some(Ipv4Config::dhcp()),
            controller: None,
        }
    }

    pub fn attach(name: &str, bridge: &str) -> Self {
        Self {
            kind: DeltaKind::Attach,
            name: name.to_string(),
            iface_type: Some(ETHERNET.to_string()),
            state: InterfaceState::Up,
            ipv4: None,
            controller: Some(bridge.to_string()),
        }
    }
}

/// The document handed to the provider: every known bridge plus one delta
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredState {
    pub bridges: Vec<BridgeEntity>,
    pub delta: InterfaceDelta,
}

impl DesiredState {
    pub fn new(bridges: Vec<BridgeEntity>, delta: InterfaceDelta) -> Self {
        Self { bridges, delta }
    }

    pub fn bridge(&self, name: &str) -> Option<&BridgeEntity> {
        self.bridges.iter().find(|b| b.name == name)
    }

    /// Render the document as nmstate YAML
    pub fn to_yaml(&self) -> Result<String, NmstateError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Serialize for DesiredState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Entry<'a> {
            Bridge(BridgeDoc<'a>),
            Delta(&'a InterfaceDelta),
        }

        #[derive(Serialize)]
        struct Doc<'a> {
            interfaces: Vec<Entry<'a>>,
        }

        let mut interfaces: Vec<Entry<'_>> = self
            .bridges
            .iter()
            .map(|b| Entry::Bridge(BridgeDoc::from(b)))
            .collect();
        interfaces.push(Entry::Delta(&self.delta));

        Doc { interfaces }.serialize(serializer)
    }
}
