//! Error types and user-facing error formatting

use nmstate_rs::NmstateError;
use thiserror::Error;

/// A choice field was given a value outside its option list
///
/// This is a data-model mismatch, not a user error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid choice '{value}', expected one of: {options}")]
pub struct InvalidChoice {
    pub value: String,
    pub options: String,
}

/// Format the names of fields that failed validation
///
/// # Examples
///
/// ```
/// use nmpilot_core::errors::format_validation_errors;
///
/// let names = vec!["ipv4 address".to_string(), "bridge name".to_string()];
/// assert_eq!(
///     format_validation_errors(&names),
///     "errors field - ipv4 address, bridge name"
/// );
/// ```
pub fn format_validation_errors(fields: &[String]) -> String {
    format!("errors field - {}", fields.join(", "))
}

/// Format a provider error for the status line
///
/// Rejections from the provider are passed through verbatim; only local
/// failures to reach the provider get a friendlier wording.
pub fn format_provider_error(error: &NmstateError) -> String {
    match error {
        NmstateError::Apply(msg) => msg.trim().to_string(),
        NmstateError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            "nmstatectl not found - is nmstate installed?".to_string()
        }
        NmstateError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            "Permission denied - nmstate needs root privileges".to_string()
        }
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_error_is_verbatim() {
        let error = NmstateError::Apply("  VerificationError: br0 has no port eth0\n".to_string());
        assert_eq!(
            format_provider_error(&error),
            "VerificationError: br0 has no port eth0"
        );
    }

    #[test]
    fn test_missing_binary() {
        let error = NmstateError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(format_provider_error(&error).contains("not found"));
    }

    #[test]
    fn test_invalid_choice_display() {
        let error = InvalidChoice {
            value: "sideways".to_string(),
            options: "UP, DOWN".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid choice 'sideways', expected one of: UP, DOWN"
        );
    }
}
