//! nmstatectl command execution
//!
//! Runs the `nmstatectl` binary to query the current network state and to
//! apply desired-state documents, and parses its YAML output.

use crate::error::NmstateError;
use crate::schema::{BridgeEntity, InterfaceRecord, LINUX_BRIDGE};
use std::io::{self, Write};
use std::process::{Command, Output, Stdio};

/// Execute an nmstatectl command and return stdout (blocking)
fn exec_nmstatectl(binary: &str, args: &[&str]) -> Result<String, NmstateError> {
    tracing::debug!("Running {} {}", binary, args.join(" "));

    let output = Command::new(binary).args(args).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(NmstateError::Command(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Execute an nmstatectl command with `input` piped to stdin
///
/// A non-zero exit becomes [`NmstateError::Apply`] carrying stderr, or stdout
/// when stderr is empty.
fn exec_nmstatectl_with_input(
    binary: &str,
    args: &[&str],
    input: &str,
) -> Result<(), NmstateError> {
    tracing::debug!("Running {} {} with {} bytes on stdin", binary, args.join(" "), input.len());

    let mut child = Command::new(binary)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // A child that exits without reading stdin reports why on stderr
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(input.as_bytes()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!("{} closed stdin before reading the document", binary);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let output = child.wait_with_output()?;
    if output.status.success() {
        return Ok(());
    }
    Err(apply_error(&output))
}

/// Provider message of a failed apply: stderr, or stdout when stderr is empty
fn apply_error(output: &Output) -> NmstateError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    NmstateError::Apply(message)
}

/// Parsed `nmstatectl show` output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetState {
    /// Ethernet interfaces, in reported order
    pub interfaces: Vec<InterfaceRecord>,
    /// Linux bridges with their port names
    pub bridges: Vec<BridgeEntity>,
}

/// Query the current network state
///
/// Executes: nmstatectl show
pub fn show(binary: &str) -> Result<NetState, NmstateError> {
    let output = exec_nmstatectl(binary, &["show"])?;
    parse_net_state_yaml(&output)
}

/// Apply a desired-state document
///
/// Executes: nmstatectl apply [--no-verify], with the document on stdin
pub fn apply(binary: &str, document: &str, verify: bool) -> Result<(), NmstateError> {
    let mut args = vec!["apply"];
    if !verify {
        args.push("--no-verify");
    }
    exec_nmstatectl_with_input(binary, &args, document)
}

/// Parse the YAML produced by `nmstatectl show`
pub fn parse_net_state_yaml(yaml_str: &str) -> Result<NetState, NmstateError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(yaml_str)?;

    let Some(entries) = doc.get("interfaces").and_then(|v| v.as_sequence()) else {
        return Ok(NetState::default());
    };

    let mut state = NetState::default();
    for entry in entries {
        let iface_type = entry.get("type").and_then(|v| v.as_str()).unwrap_or("");

        if iface_type == LINUX_BRIDGE {
            let Some(name) = entry.get("name").and_then(|v| v.as_str()) else {
                continue;
            };
            state.bridges.push(BridgeEntity::new(name, bridge_ports(entry)));
            continue;
        }

        let record: InterfaceRecord = match serde_yaml::from_value(entry.clone()) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Skipping unparsable interface entry: {}", e);
                continue;
            }
        };
        if record.is_ethernet() {
            state.interfaces.push(record);
        }
    }

    Ok(state)
}

/// Port names from a linux-bridge entry (`bridge.port[].name`)
fn bridge_ports(entry: &serde_yaml::Value) -> Vec<String> {
    entry
        .get("bridge")
        .and_then(|b| b.get("port"))
        .and_then(|p| p.as_sequence())
        .map(|seq| {
            seq.iter()
                .filter_map(|port| port.get("name").and_then(|n| n.as_str()))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
