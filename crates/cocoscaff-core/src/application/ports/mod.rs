//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cocoscaff-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: probing, listing, reading, writing, copying
//!   - `TemplateRenderer`: placeholder substitution for one file
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `FormController` events (see `crate::application::form`)

pub mod output;

pub use output::{DirEntry, Filesystem, ProbeRef, TemplateRenderer};
