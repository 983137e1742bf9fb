//! Error handling for the cocoscaff CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use cocoscaff_core::error::CocoscaffError;

pub use cocoscaff_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input outside the form (bad flag combination, etc.).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Submit was refused because at least one field is rejected.
    #[error("Invalid project settings: {}", .reasons.join("; "))]
    FormRejected { reasons: Vec<String> },

    /// Submission-time checks failed; nothing was written.
    #[error("Cannot create project: {}", .reasons.join(" "))]
    PreconditionsFailed { reasons: Vec<String> },

    /// The run could not start (template unreadable, target not creatable).
    #[error("Project setup failed: {message}")]
    SetupFailed { message: String },

    /// The target was created but some entries failed.
    #[error("{failed} of {total} template entries failed in {}", .target.display())]
    PartialMaterialization {
        target: PathBuf,
        failed: usize,
        total: usize,
    },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `cocoscaff-core` or the adapters.
    #[error("{0}")]
    Core(#[from] CocoscaffError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],

            Self::FormRejected { .. } => vec![
                "Names may only contain letters, digits and underscores".into(),
                "The DUT file must end in .v, .sv or .vhdl".into(),
                "List simulators with: cocoscaff simulators".into(),
            ],

            Self::PreconditionsFailed { reasons } => {
                let mut out = vec!["Nothing was written".into()];
                if reasons.iter().any(|r| r.starts_with("Template folder")) {
                    out.push("Install the built-in template: cocoscaff template install".into());
                }
                if reasons.iter().any(|r| r.ends_with("already exists.")) {
                    out.push("Choose a different project name".into());
                }
                out
            }

            Self::SetupFailed { .. } => vec![
                "Nothing was written".into(),
                "Check the template folder and the parent folder permissions".into(),
            ],

            Self::PartialMaterialization { target, .. } => vec![
                format!("Files written so far remain in {}", target.display()),
                "Failed entries are listed above".into(),
                "Re-run with -v for details".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Show the active settings: cocoscaff config list".into(),
                "Create a default config: cocoscaff init".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{feature}' feature is not available in this build"),
                format!("Install with the feature enabled: cargo install cocoscaff-cli --features {feature}"),
                "Or pass --yes with field flags".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::FormRejected { .. }
            | Self::PreconditionsFailed { .. }
            | Self::Cancelled => ErrorCategory::UserError,
            Self::PartialMaterialization { .. } => ErrorCategory::Partial,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Template => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::SetupFailed { .. } | Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Partial run   |  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Partial => 5,
        }
    }

    /// Error message, cause chain (verbose only) and suggestions, coloured.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same layout as [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, f: fn(&str) -> String| {
            if color { f(text) } else { text.to_owned() }
        };
        let mut out = String::new();

        let heading = if color {
            format!("{} {}", "\u{2717}".red().bold(), "Error:".red().bold())
        } else {
            "Error:".to_owned()
        };
        out.push_str(&format!(
            "\n{heading} {}\n",
            paint(&self.to_string(), |t| t.red().to_string())
        ));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                out.push_str(&format!(
                    "  Caused by: {}\n",
                    paint(&err.to_string(), |t| t.dimmed().to_string())
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            ));
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.", |t| t
                    .dimmed()
                    .to_string())
            ));
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Partial => tracing::warn!("Partial materialization: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
    /// Some template entries failed; the rest were written.
    Partial,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::ser::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}
