//! cocoscaff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the cocoscaff
//! cocotb project scaffolder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          cocoscaff-cli (CLI)            │
//! │   (prompts / flags → FormEvent queue)   │
//! └──────────────────┬──────────────────────┘
//!                    │ dispatches
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   FormController + Application Services │
//! │ (PreconditionChecker, MaterializeService)│
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │      (Filesystem, TemplateRenderer)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    cocoscaff-adapters (Infrastructure)  │
//! │ (LocalFilesystem, PlaceholderRenderer)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (FormSchema, Rule, ProjectParameters)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cocoscaff_core::prelude::*;
//!
//! let service = MaterializeService::new(filesystem, renderer);
//! let mut form = FormController::open(FormSchema::cocotb()?, "./cocotb_template", service);
//!
//! form.dispatch(FormEvent::FieldChanged {
//!     field: FieldName::ProjectName,
//!     value: "adder_tb".into(),
//! });
//! form.dispatch(FormEvent::Submit);
//! let status = form.process();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FailureKind, FormController, FormEvent, FormState, FormStatus, MaterializeService,
        MessageLevel, PreconditionChecker, Progress,
        ports::{DirEntry, Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        EntryKind, EntryOutcome, FieldName, FormSchema, HdlLanguage, MaterializationResult,
        Outcome, PathProbe, PathState, ProjectParameters, Simulator, SubstitutionList,
    };
    pub use crate::error::{CocoscaffError, CocoscaffResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
