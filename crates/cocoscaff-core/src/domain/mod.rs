// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for cocoscaff.
//!
//! Pure logic: field rules, validation outcomes, placeholder substitution
//! and template classification. Filesystem access happens only through the
//! [`PathProbe`] trait and the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Paths are probed through a trait, never opened
//! - **Value semantics**: Everything is Clone + PartialEq
//!
pub mod common;
pub mod error;
pub mod field;
pub mod materialization;
pub mod parameters;
pub mod placeholder;
pub mod rules;
pub mod template;
pub mod value_objects;

pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use field::{FieldSpec, FormSchema};
pub use materialization::{EntryOutcome, MaterializationResult};
pub use parameters::ProjectParameters;
pub use placeholder::{placeholder_names, render_placeholders};
pub use rules::{Outcome, PathProbe, PathState, Rule, RuleContext};
pub use template::{EntryKind, SubstitutionList, TemplateEntry};
pub use value_objects::{FieldName, HdlLanguage, Simulator};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::Path;

    struct Nothing;

    impl PathProbe for Nothing {
        fn probe(&self, _: &Path) -> PathState {
            PathState::Absent
        }
    }

    // ========================================================================
    // Cross-module behavior
    // ========================================================================

    #[test]
    fn option_fields_accept_every_listed_value() {
        let schema = FormSchema::cocotb().unwrap();
        for sim in Simulator::ALL {
            let outcome = schema
                .validate_field(
                    FieldName::Simulator,
                    sim.as_str(),
                    "",
                    RuleContext::new(&Nothing),
                )
                .unwrap();
            assert!(outcome.is_accepted(), "{sim}");
        }
        for lang in HdlLanguage::ALL {
            let outcome = schema
                .validate_field(
                    FieldName::ToplevelLang,
                    lang.as_str(),
                    "",
                    RuleContext::new(&Nothing),
                )
                .unwrap();
            assert!(outcome.is_accepted(), "{lang}");
        }
    }

    #[test]
    fn missing_parent_blocks_parameter_collection() {
        let values: BTreeMap<_, _> = [
            (FieldName::ProjectName, "p".to_string()),
            (FieldName::ParentFolder, "/nowhere".to_string()),
        ]
        .into_iter()
        .collect();
        let err = ProjectParameters::collect(&FormSchema::cocotb().unwrap(), &values, &Nothing)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn every_field_key_is_a_placeholder() {
        let content: String = FieldName::ALL.iter().map(|f| format!("{{{f}}}")).collect();
        let names = placeholder_names(&content).unwrap();
        assert_eq!(names.len(), FieldName::ALL.len());
    }
}
