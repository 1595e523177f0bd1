//! Validator registry
//!
//! Maps a field kind to a pure predicate over a candidate value. Kinds
//! without a dedicated predicate accept everything.

use crate::constants::MAX_BRIDGE_NAME_LEN;
use crate::form::{FieldKind, FieldValue};

/// A pure predicate over a field value
pub type Validator = fn(&FieldValue) -> bool;

/// Get the validator for a field kind
pub fn validator_for(kind: FieldKind) -> Validator {
    match kind {
        FieldKind::Ipv4Address => ipv4_validator,
        FieldKind::BridgeName => bridge_name_validator,
        FieldKind::Text | FieldKind::Bool | FieldKind::StateBool | FieldKind::ApplyButton => {
            nullable_validator
        }
    }
}

/// Get the validator for a kind given by its wire name
///
/// Unknown kinds fail open.
pub fn validator_for_type(kind: &str) -> Validator {
    FieldKind::parse(kind).map_or(nullable_validator as Validator, validator_for)
}

/// Accepts any value
pub fn nullable_validator(_value: &FieldValue) -> bool {
    true
}

fn ipv4_validator(value: &FieldValue) -> bool {
    value.as_text().is_some_and(is_valid_ipv4)
}

fn bridge_name_validator(value: &FieldValue) -> bool {
    value.as_text().is_some_and(is_valid_bridge_name)
}

/// Check a dotted-quad IPv4 address
///
/// # Examples
///
/// ```
/// use nmpilot_core::validators::is_valid_ipv4;
///
/// assert!(is_valid_ipv4("192.168.1.1"));
/// assert!(!is_valid_ipv4("256.1.1.1"));
/// assert!(!is_valid_ipv4("192.168.1"));
/// ```
pub fn is_valid_ipv4(candidate: &str) -> bool {
    let octets: Vec<&str> = candidate.split('.').collect();
    if octets.len() != 4 {
        return false;
    }

    octets.iter().all(|octet| {
        !octet.is_empty()
            && octet.len() <= 3
            && octet.bytes().all(|b| b.is_ascii_digit())
            && octet.parse::<u16>().is_ok_and(|n| n <= 255)
    })
}

/// Check a linux bridge name
///
/// 1 to 15 characters, starting with an ASCII letter, followed by letters,
/// digits, `-` or `_`.
pub fn is_valid_bridge_name(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    candidate.len() <= MAX_BRIDGE_NAME_LEN
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_ipv4_valid() {
        for ip in ["192.168.1.1", "255.255.255.255", "0.0.0.0", "10.0.0.001"] {
            assert!(is_valid_ipv4(ip), "{ip} should be valid");
        }
    }

    #[test]
    fn test_ipv4_invalid() {
        for ip in [
            "256.1.1.1",
            "192.168.1",
            "192.168.1.1.1",
            "a.b.c.d",
            "",
            "999.1.1.1",
            "1..1.1",
            "1.1.1.1 ",
            "+1.1.1.1",
            "1.1.1.1000",
        ] {
            assert!(!is_valid_ipv4(ip), "{ip:?} should be invalid");
        }
    }

    #[test]
    fn test_bridge_name_valid() {
        for name in ["b", "br1", "w343nfjl4kfgw32", "q12js", "br-lan_0"] {
            assert!(is_valid_bridge_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_bridge_name_invalid() {
        for name in ["1", "qazwsxedcrfvtgby", "1name", "", "-br", "br 0", "br.0"] {
            assert!(!is_valid_bridge_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_registry_dispatch() {
        let ipv4 = validator_for(FieldKind::Ipv4Address);
        assert!(ipv4(&text("10.1.2.3")));
        assert!(!ipv4(&text("10.1.2")));
        assert!(!ipv4(&FieldValue::Bool(true)));

        let bridge = validator_for(FieldKind::BridgeName);
        assert!(bridge(&text("br0")));
        assert!(!bridge(&text("0br")));

        assert!(validator_for(FieldKind::Text)(&text("")));
        assert!(validator_for(FieldKind::ApplyButton)(&FieldValue::Action));
    }

    #[test]
    fn test_unknown_type_fails_open() {
        let validator = validator_for_type("mac_address");
        assert!(validator(&text("anything")));

        let validator = validator_for_type("ipv4address");
        assert!(!validator(&text("anything")));
    }
}
