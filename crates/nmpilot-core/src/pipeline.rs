//! Change detection and submission
//!
//! Turns a proposed set of field values into at most one interface delta,
//! reconciles bridge membership and hands the resulting document to the
//! provider.

use nmstate_rs::{DeltaKind, DesiredState, InterfaceDelta, InterfaceRecord, StateProvider};

use crate::bridges::BridgeSet;
use crate::constants::{DEFAULT_PREFIX_LENGTH, RESULT_NO_CHANGE, RESULT_OK, fields};
use crate::errors::format_provider_error;
use crate::form::{FieldMap, FieldValue, record_values};

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Nothing to submit; the provider was not called
    NoChange,
    Applied(DeltaKind),
    Failed { kind: DeltaKind, message: String },
}

impl ApplyOutcome {
    /// Text shown to the user
    pub fn message(&self) -> &str {
        match self {
            ApplyOutcome::NoChange => RESULT_NO_CHANGE,
            ApplyOutcome::Applied(_) => RESULT_OK,
            ApplyOutcome::Failed { message, .. } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApplyOutcome::Applied(_))
    }

    /// Whether the provider was called
    pub fn reached_provider(&self) -> bool {
        !matches!(self, ApplyOutcome::NoChange)
    }
}

/// Current values of the proposed fields that the record also has
pub fn origin_values(record: &InterfaceRecord, proposed: &FieldMap) -> FieldMap {
    record_values(record)
        .into_iter()
        .filter(|(name, _)| proposed.contains_key(name))
        .collect()
}

/// Whether submitting `proposed` would leave the record as it is
///
/// Only field names present in `proposed` are compared.
pub fn is_unchanged(record: &InterfaceRecord, proposed: &FieldMap) -> bool {
    origin_values(record, proposed) == *proposed
}

fn text<'a>(proposed: &'a FieldMap, name: &str) -> &'a str {
    proposed
        .get(name)
        .and_then(FieldValue::as_text)
        .unwrap_or_default()
}

fn flag(proposed: &FieldMap, name: &str) -> bool {
    proposed.get(name).is_some_and(FieldValue::as_bool)
}

/// Derive the single delta a proposal asks for
///
/// Rules in order: down state, manual address, DHCP, bridge attach.
///
/// # Examples
///
/// ```
/// use nmpilot_core::form::{FieldMap, FieldValue};
/// use nmpilot_core::pipeline::derive_delta;
/// use nmstate_rs::DeltaKind;
///
/// let mut proposed = FieldMap::new();
/// proposed.insert("ipv4 address".into(), FieldValue::Text("10.0.0.5".into()));
/// proposed.insert("ipv4 dhcp".into(), FieldValue::Bool(true));
///
/// let delta = derive_delta("eth0", &proposed).unwrap();
/// assert_eq!(delta.kind, DeltaKind::ManualIp);
/// ```
pub fn derive_delta(iface: &str, proposed: &FieldMap) -> Option<InterfaceDelta> {
    if text(proposed, fields::STATE).eq_ignore_ascii_case("down") {
        return Some(InterfaceDelta::down(iface));
    }

    let address = text(proposed, fields::IPV4_ADDRESS);
    if !address.is_empty() {
        return Some(InterfaceDelta::manual_ip(
            iface,
            address,
            DEFAULT_PREFIX_LENGTH,
        ));
    }

    if flag(proposed, fields::IPV4_DHCP) {
        return Some(InterfaceDelta::dhcp(iface));
    }

    let bridge = text(proposed, fields::BRIDGE_NAME);
    if !bridge.is_empty() {
        return Some(InterfaceDelta::attach(iface, bridge));
    }

    None
}

/// Controller the interface should end up with
///
/// Empty unless `bridge` is submitted and on. A down-state proposal carries
/// no bridge fields, so it also takes the interface out of its bridge.
pub fn desired_controller(proposed: &FieldMap) -> String {
    if flag(proposed, fields::BRIDGE) {
        text(proposed, fields::BRIDGE_NAME).to_string()
    } else {
        String::new()
    }
}

/// Submit a proposal for `record`
///
/// Bridge changes are made on a copy of `bridges`, which replaces it only
/// when the provider accepts the document.
pub fn submit(
    record: &InterfaceRecord,
    proposed: &FieldMap,
    bridges: &mut BridgeSet,
    provider: &dyn StateProvider,
) -> ApplyOutcome {
    if proposed.is_empty() || is_unchanged(record, proposed) {
        tracing::debug!("No change for {}", record.name);
        return ApplyOutcome::NoChange;
    }

    let Some(delta) = derive_delta(&record.name, proposed) else {
        tracing::debug!("No delta derived for {}", record.name);
        return ApplyOutcome::NoChange;
    };
    let kind = delta.kind;

    let mut provisional = bridges.clone();
    provisional.reconcile(
        &record.name,
        &record.controller,
        &desired_controller(proposed),
    );

    let document = DesiredState::new(provisional.to_vec(), delta);
    tracing::info!(
        "Applying {} delta for {} with {} bridge(s)",
        kind,
        record.name,
        document.bridges.len()
    );

    match provider.apply_desired_state(&document) {
        Ok(()) => {
            *bridges = provisional;
            tracing::info!("Applied {} delta for {}", kind, record.name);
            ApplyOutcome::Applied(kind)
        }
        Err(e) => {
            tracing::warn!("Apply for {} failed: {}", record.name, e);
            ApplyOutcome::Failed {
                kind,
                message: format_provider_error(&e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nmstate_rs::{BridgeEntity, InterfaceState, MemoryProvider};

    fn map(entries: &[(&str, FieldValue)]) -> FieldMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn eth0() -> InterfaceRecord {
        InterfaceRecord::ethernet("eth0")
    }

    #[test]
    fn test_identical_proposal_makes_no_call() {
        let record = eth0();
        let provider = MemoryProvider::new(vec![record.clone()], vec![]);
        let mut bridges = BridgeSet::default();

        let proposed = map(&[
            ("state", FieldValue::text("up")),
            ("ipv4 dhcp", FieldValue::Bool(true)),
            ("bridge", FieldValue::Bool(false)),
        ]);

        let outcome = submit(&record, &proposed, &mut bridges, &provider);
        assert_eq!(outcome, ApplyOutcome::NoChange);
        assert_eq!(outcome.message(), "no change");
        assert_eq!(provider.apply_count(), 0);
    }

    #[test]
    fn test_empty_proposal_is_no_change() {
        let record = eth0();
        let provider = MemoryProvider::new(vec![record.clone()], vec![]);
        let mut bridges = BridgeSet::default();

        let outcome = submit(&record, &FieldMap::new(), &mut bridges, &provider);
        assert_eq!(outcome, ApplyOutcome::NoChange);
        assert_eq!(provider.apply_count(), 0);
    }

    #[test]
    fn test_origin_only_compares_proposed_names() {
        let mut record = eth0();
        record.controller = "br0".to_string();

        let proposed = map(&[("state", FieldValue::text("up"))]);
        assert_eq!(origin_values(&record, &proposed), proposed);
        assert!(is_unchanged(&record, &proposed));
    }

    #[test]
    fn test_delta_precedence() {
        let down = map(&[
            ("state", FieldValue::text("down")),
            ("ipv4 address", FieldValue::text("10.0.0.1")),
        ]);
        assert_eq!(derive_delta("eth0", &down).unwrap().kind, DeltaKind::Down);

        let manual = map(&[
            ("state", FieldValue::text("up")),
            ("ipv4 dhcp", FieldValue::Bool(false)),
            ("ipv4 address", FieldValue::text("10.0.0.1")),
        ]);
        let delta = derive_delta("eth0", &manual).unwrap();
        assert_eq!(delta.kind, DeltaKind::ManualIp);
        let ipv4 = delta.ipv4.unwrap();
        assert!(!ipv4.dhcp);
        assert_eq!(ipv4.address[0].prefix_length, 24);

        let dhcp = map(&[
            ("ipv4 dhcp", FieldValue::Bool(true)),
            ("bridge name", FieldValue::text("br0")),
        ]);
        assert_eq!(derive_delta("eth0", &dhcp).unwrap().kind, DeltaKind::Dhcp);

        let attach = map(&[
            ("bridge", FieldValue::Bool(true)),
            ("bridge name", FieldValue::text("br0")),
        ]);
        let delta = derive_delta("eth0", &attach).unwrap();
        assert_eq!(delta.kind, DeltaKind::Attach);
        assert_eq!(delta.controller.as_deref(), Some("br0"));

        let nothing = map(&[
            ("ipv4 dhcp", FieldValue::Bool(false)),
            ("bridge", FieldValue::Bool(false)),
        ]);
        assert!(derive_delta("eth0", &nothing).is_none());
    }

    #[test]
    fn test_desired_controller() {
        let down = map(&[("state", FieldValue::text("down"))]);
        assert_eq!(desired_controller(&down), "");

        let cleared = map(&[("bridge", FieldValue::Bool(false))]);
        assert_eq!(desired_controller(&cleared), "");

        let moved = map(&[
            ("bridge", FieldValue::Bool(true)),
            ("bridge name", FieldValue::text("br1")),
        ]);
        assert_eq!(desired_controller(&moved), "br1");
    }

    #[test]
    fn test_attach_creates_bridge() {
        let record = eth0();
        let provider = MemoryProvider::new(vec![record.clone()], vec![]);
        let mut bridges = BridgeSet::default();

        let proposed = map(&[
            ("bridge", FieldValue::Bool(true)),
            ("bridge name", FieldValue::text("br0")),
        ]);

        let outcome = submit(&record, &proposed, &mut bridges, &provider);
        assert_eq!(outcome, ApplyOutcome::Applied(DeltaKind::Attach));
        assert_eq!(outcome.message(), "Ok");

        let calls = provider.apply_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].bridge("br0").unwrap().ports, vec!["eth0"]);
        assert_eq!(calls[0].delta.kind, DeltaKind::Attach);
        assert_eq!(bridges.owner_of("eth0"), Some("br0"));
    }

    #[test]
    fn test_failure_discards_reconciliation() {
        let mut record = eth0();
        record.controller = "br0".to_string();
        let provider = MemoryProvider::new(
            vec![record.clone()],
            vec![BridgeEntity::new("br0", vec!["eth0".into()])],
        );
        provider.fail_next_apply("error: bridge br1 rejected\n");

        let mut bridges = BridgeSet::new(vec![BridgeEntity::new("br0", vec!["eth0".into()])]);
        let before = bridges.clone();

        let proposed = map(&[
            ("bridge", FieldValue::Bool(true)),
            ("bridge name", FieldValue::text("br1")),
        ]);

        let outcome = submit(&record, &proposed, &mut bridges, &provider);
        assert_eq!(outcome.message(), "error: bridge br1 rejected");
        assert!(outcome.reached_provider());
        assert!(!outcome.is_success());
        assert_eq!(bridges, before);

        let sent = &provider.apply_calls()[0];
        assert!(sent.bridge("br0").unwrap().ports.is_empty());
        assert_eq!(sent.bridge("br1").unwrap().ports, vec!["eth0"]);
    }

    #[test]
    fn test_down_leaves_bridge() {
        let mut record = eth0();
        record.controller = "br0".to_string();
        let provider = MemoryProvider::new(
            vec![record.clone()],
            vec![BridgeEntity::new("br0", vec!["eth0".into()])],
        );
        let mut bridges = BridgeSet::new(vec![BridgeEntity::new("br0", vec!["eth0".into()])]);

        let proposed = map(&[("state", FieldValue::text("down"))]);
        let outcome = submit(&record, &proposed, &mut bridges, &provider);

        assert_eq!(outcome, ApplyOutcome::Applied(DeltaKind::Down));
        assert_eq!(bridges.owner_of("eth0"), None);
        assert!(bridges.get("br0").unwrap().ports.is_empty());

        let sent = &provider.apply_calls()[0];
        assert!(sent.bridge("br0").unwrap().ports.is_empty());

        let applied = provider.interface("eth0").unwrap();
        assert_eq!(applied.state, InterfaceState::Down);
        assert_eq!(applied.controller, "");
    }
}
