//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The template source directory could not be listed.
    #[error("Cannot read template folder {path}: {reason}")]
    TemplateUnreadable { path: PathBuf, reason: String },

    /// The target project folder could not be created. Nothing was written.
    #[error("Cannot create folder {path}: {reason}")]
    TargetCreationFailed { path: PathBuf, reason: String },

    /// Submission-time checks failed. Nothing was written.
    #[error("{}", .0.join(" "))]
    PreconditionsFailed(Vec<String>),

    /// A substitutable file could not be rendered.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Submit arrived in a state that does not accept it.
    #[error("Submit refused while {state}")]
    SubmitRefused { state: String },

    /// Event arrived after the form reached a terminal state.
    #[error("Form is closed")]
    FormClosed,

    /// In-memory filesystem lock was poisoned.
    #[error("Filesystem lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::TemplateUnreadable { path, .. } => vec![
                format!("Template folder: {}", path.display()),
                "Try: cocoscaff template install".into(),
                "Or point --template-dir at an existing template".into(),
            ],
            Self::TargetCreationFailed { path, .. } => vec![
                format!("Could not create: {}", path.display()),
                "Check that the parent folder is writable".into(),
                "Choose a different project name".into(),
            ],
            Self::PreconditionsFailed(_) => vec![
                "Nothing was written".into(),
                "Fix the problems above and submit again".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Placeholders look like {field_name}".into(),
                "Escape literal braces as '{{' and '}}'".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateUnreadable { .. } => ErrorCategory::NotFound,
            Self::PreconditionsFailed(_) | Self::SubmitRefused { .. } | Self::FormClosed => {
                ErrorCategory::Validation
            }
            Self::RenderingFailed { .. } => ErrorCategory::Template,
            Self::FilesystemError { .. }
            | Self::TargetCreationFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
