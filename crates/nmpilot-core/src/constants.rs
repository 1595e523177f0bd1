//! Shared constants for the interface form

/// Maximum number of characters a text field accepts
pub const TEXT_FIELD_CAPACITY: usize = 18;

/// Prefix length used for manually entered IPv4 addresses
pub const DEFAULT_PREFIX_LENGTH: u8 = 24;

/// Maximum length of a linux bridge name (IFNAMSIZ - 1)
pub const MAX_BRIDGE_NAME_LEN: usize = 15;

/// Status text for a successful submission
pub const RESULT_OK: &str = "Ok";

/// Status text when a submission would not change anything
pub const RESULT_NO_CHANGE: &str = "no change";

// =============================================================================
// Field names
// =============================================================================

/// Names of the fields in the interface form, in display order
pub mod fields {
    pub const STATE: &str = "state";
    pub const IPV4_DHCP: &str = "ipv4 dhcp";
    pub const IPV4_ADDRESS: &str = "ipv4 address";
    pub const BRIDGE: &str = "bridge";
    pub const BRIDGE_NAME: &str = "bridge name";
    pub const APPLY: &str = "apply";

    /// All field names in display order
    pub const ALL: &[&str] = &[STATE, IPV4_DHCP, IPV4_ADDRESS, BRIDGE, BRIDGE_NAME, APPLY];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_unique() {
        for (i, a) in fields::ALL.iter().enumerate() {
            for b in &fields::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_capacity_fits_ipv4() {
        assert!("255.255.255.255".len() <= TEXT_FIELD_CAPACITY);
        assert!(MAX_BRIDGE_NAME_LEN <= TEXT_FIELD_CAPACITY);
    }
}
