// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside transcripts and results)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid field values: {}", .rejected.join("; "))]
    RejectedFields { rejected: Vec<String> },

    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Unsupported value '{value}' for {field}")]
    UnknownOption { field: &'static str, value: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid rule pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Unknown placeholder '{{{name}}}'")]
    UnknownPlaceholder { name: String },

    #[error("Malformed placeholder at byte {offset}: {reason}")]
    MalformedPlaceholder { offset: usize, reason: &'static str },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RejectedFields { rejected } => {
                let mut out = vec!["Fix the following fields and submit again:".into()];
                out.extend(rejected.iter().map(|r| format!("  • {r}")));
                out
            }
            Self::UnknownOption { field, .. } => vec![
                format!("'{field}' only accepts a fixed set of values"),
                "Try: cocoscaff simulators".into(),
            ],
            Self::UnknownPlaceholder { name } => vec![
                format!("The template references '{{{name}}}', which is not a form field"),
                "Escape literal braces in substitutable files as '{{' and '}}'".into(),
            ],
            Self::MalformedPlaceholder { .. } => vec![
                "Placeholders look like {field_name}".into(),
                "Escape literal braces in substitutable files as '{{' and '}}'".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RejectedFields { .. }
            | Self::UnknownField { .. }
            | Self::UnknownOption { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnknownPlaceholder { .. } | Self::MalformedPlaceholder { .. } => {
                ErrorCategory::Template
            }
            Self::InvalidPattern { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_placeholder_message_keeps_braces() {
        let err = DomainError::UnknownPlaceholder {
            name: "clock".into(),
        };
        assert_eq!(err.to_string(), "Unknown placeholder '{clock}'");
        assert_eq!(err.category(), ErrorCategory::Template);
    }

    #[test]
    fn rejected_fields_lists_every_reason() {
        let err = DomainError::RejectedFields {
            rejected: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "Invalid field values: a; b");
        assert_eq!(err.suggestions().len(), 3);
    }
}
