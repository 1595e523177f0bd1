//! Audit logging for submitted changes
//!
//! Every submission that reaches the provider leaves one line in
//! `~/.nmpilot/audit.log`.

use chrono::{DateTime, Local};
use nmpilot_core::ApplyOutcome;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Operation name recorded for form submissions
pub const APPLY_OPERATION: &str = "APPLY";

/// Audit log entry
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    /// User who initiated the operation (from environment)
    pub user: String,
    pub operation: String,
    /// Interface the change was made to
    pub interface: String,
    pub result: AuditResult,
    pub details: String,
}

/// Result of an audited operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuditResult {
    Success,
    Failure,
}

impl AuditResult {
    fn as_str(&self) -> &'static str {
        match self {
            AuditResult::Success => "SUCCESS",
            AuditResult::Failure => "FAILURE",
        }
    }
}

impl std::fmt::Display for AuditResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AuditEntry {
    /// Format: [timestamp] [user] [operation] [interface] [result] details
    pub fn to_line(&self) -> String {
        format!(
            "[{}] [{}] [{}] [{}] [{}] {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.user,
            self.operation,
            self.interface,
            self.result,
            self.details
        )
    }
}

/// Audit logger writing to a single append-only file
pub struct AuditLogger {
    log_path: PathBuf,
    user: String,
    enabled: bool,
}

impl AuditLogger {
    /// Create a logger for `~/.nmpilot/audit.log`
    ///
    /// Creates the ~/.nmpilot directory if it doesn't exist.
    pub fn new() -> Self {
        let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_path(&home.join(".nmpilot").join("audit.log"))
    }

    /// Create a logger for an explicit file
    pub fn with_path(path: &Path) -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());

        let enabled = match path.parent() {
            Some(dir) => fs::create_dir_all(dir).is_ok(),
            None => true,
        };

        Self {
            log_path: path.to_path_buf(),
            user,
            enabled,
        }
    }

    /// A logger that drops everything
    pub fn disabled() -> Self {
        Self {
            log_path: PathBuf::new(),
            user: String::new(),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Record the outcome of a submission
    ///
    /// Outcomes that never reached the provider are not recorded.
    pub fn log_outcome(&self, interface: &str, outcome: &ApplyOutcome) {
        let (result, details) = match outcome {
            ApplyOutcome::NoChange => return,
            ApplyOutcome::Applied(kind) => (AuditResult::Success, format!("delta={kind}")),
            ApplyOutcome::Failed { kind, message } => {
                (AuditResult::Failure, format!("delta={kind}: {message}"))
            }
        };
        self.log(APPLY_OPERATION, interface, result, &details);
    }

    fn log(&self, operation: &str, interface: &str, result: AuditResult, details: &str) {
        if !self.enabled {
            return;
        }

        let entry = AuditEntry {
            timestamp: Local::now(),
            user: self.user.clone(),
            operation: operation.to_string(),
            interface: interface.to_string(),
            result,
            details: details.replace('\n', " "),
        };

        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!("Failed to write audit log: {}", e);
        }
    }

    fn write_entry(&self, entry: &AuditEntry) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.write_all(entry.to_line().as_bytes())
    }

    /// Read recent audit entries (last N lines)
    pub fn read_recent(&self, count: usize) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }

        match fs::read_to_string(&self.log_path) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                let start = lines.len().saturating_sub(count);
                lines[start..].iter().map(|s| s.to_string()).collect()
            }
            Err(_) => Vec::new(),
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Global audit logger instance
static AUDIT_LOGGER: std::sync::OnceLock<std::sync::Mutex<AuditLogger>> =
    std::sync::OnceLock::new();

/// Initialize the global audit logger
pub fn init_audit_logger(enabled: bool) {
    let logger = if enabled {
        AuditLogger::new()
    } else {
        AuditLogger::disabled()
    };
    if logger.is_enabled() {
        tracing::info!("Audit log: {}", logger.log_path().display());
    }
    let _ = AUDIT_LOGGER.set(std::sync::Mutex::new(logger));
}

/// Get the global audit logger
pub fn audit_logger() -> Option<std::sync::MutexGuard<'static, AuditLogger>> {
    AUDIT_LOGGER.get().and_then(|l| l.lock().ok())
}

/// Record a submission outcome (convenience function)
pub fn audit_outcome(interface: &str, outcome: &ApplyOutcome) {
    if let Some(logger) = audit_logger() {
        logger.log_outcome(interface, outcome);
    }
}
