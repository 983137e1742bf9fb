//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "check a submission" or "materialize a project".

pub mod materialize_service;
pub mod precondition_service;

pub use materialize_service::{MaterializeService, Progress};
pub use precondition_service::PreconditionChecker;
