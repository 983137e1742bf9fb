//! The interactive form: state plus the event-driven controller.

pub mod controller;
pub mod state;

pub use controller::{FormController, FormEvent};
pub use state::{FailureKind, FormState, FormStatus, MessageLevel, TranscriptEntry};
