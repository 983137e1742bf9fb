//! Application layer for cocoscaff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PreconditionChecker, MaterializeService)
//! - **Form**: the event-driven controller the UI talks to
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod form;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use form::{
    FailureKind, FormController, FormEvent, FormState, FormStatus, MessageLevel, TranscriptEntry,
};
pub use services::{MaterializeService, PreconditionChecker, Progress};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, Filesystem, ProbeRef, TemplateRenderer};

pub use error::ApplicationError;
