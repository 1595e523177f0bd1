//! Visibility rule
//!
//! Picks which fields are shown for the configuration branch the current
//! values describe. The first matching branch wins.

use crate::constants::fields::{APPLY, BRIDGE, BRIDGE_NAME, IPV4_ADDRESS, IPV4_DHCP, STATE};
use crate::form::{FieldMap, FieldValue};

/// Configuration branch of an interface form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Interface is down; nothing else applies
    StateDown,
    /// Interface is a bridge port
    Bridged,
    /// Address comes from DHCP
    Dhcp,
    /// Address is entered by hand
    Manual,
}

impl Branch {
    /// Classify a set of field values; missing fields read as false / not down
    pub fn select(values: &FieldMap) -> Self {
        let is_down = values
            .get(STATE)
            .and_then(FieldValue::as_text)
            .is_some_and(|s| s.eq_ignore_ascii_case("down"));
        let flag = |name: &str| values.get(name).is_some_and(FieldValue::as_bool);

        if is_down {
            Branch::StateDown
        } else if flag(BRIDGE) {
            Branch::Bridged
        } else if flag(IPV4_DHCP) {
            Branch::Dhcp
        } else {
            Branch::Manual
        }
    }

    /// Fields shown for this branch, in display order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Branch::StateDown => &[STATE, APPLY],
            Branch::Bridged => &[BRIDGE, BRIDGE_NAME, APPLY],
            Branch::Dhcp => &[STATE, IPV4_DHCP, BRIDGE, APPLY],
            Branch::Manual => &[STATE, IPV4_DHCP, IPV4_ADDRESS, BRIDGE, APPLY],
        }
    }
}

/// Names of the fields to display for `values`
///
/// # Examples
///
/// ```
/// use nmpilot_core::form::{FieldMap, FieldValue};
/// use nmpilot_core::visibility::visible_fields;
///
/// let mut values = FieldMap::new();
/// values.insert("state".into(), FieldValue::Text("down".into()));
/// values.insert("bridge".into(), FieldValue::Bool(true));
///
/// assert_eq!(visible_fields(&values), ["state", "apply"]);
/// ```
pub fn visible_fields(values: &FieldMap) -> &'static [&'static str] {
    Branch::select(values).fields()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(state: &str, dhcp: bool, bridge: bool) -> FieldMap {
        FieldMap::from([
            (STATE.to_string(), FieldValue::text(state)),
            (IPV4_DHCP.to_string(), FieldValue::Bool(dhcp)),
            (IPV4_ADDRESS.to_string(), FieldValue::text("")),
            (BRIDGE.to_string(), FieldValue::Bool(bridge)),
            (BRIDGE_NAME.to_string(), FieldValue::text("")),
        ])
    }

    #[test]
    fn test_branch_precedence() {
        assert_eq!(Branch::select(&values("down", true, true)), Branch::StateDown);
        assert_eq!(Branch::select(&values("up", true, true)), Branch::Bridged);
        assert_eq!(Branch::select(&values("up", true, false)), Branch::Dhcp);
        assert_eq!(Branch::select(&values("up", false, false)), Branch::Manual);
    }

    #[test]
    fn test_total_and_always_has_apply() {
        for state in ["up", "down"] {
            for dhcp in [false, true] {
                for bridge in [false, true] {
                    let shown = visible_fields(&values(state, dhcp, bridge));
                    assert!(!shown.is_empty());
                    assert_eq!(shown.last(), Some(&APPLY));
                }
            }
        }
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(Branch::select(&FieldMap::new()), Branch::Manual);
    }

    #[test]
    fn test_manual_shows_address() {
        assert_eq!(
            visible_fields(&values("up", false, false)),
            ["state", "ipv4 dhcp", "ipv4 address", "bridge", "apply"]
        );
    }
}
