//! Validated form values.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    field::FormSchema,
    placeholder::render_placeholders,
    rules::{Outcome, PathProbe, RuleContext},
    value_objects::FieldName,
};

/// The ten field values of a form that passed validation.
///
/// Only constructible from values whose outcomes are all `Accepted`, so
/// holding one is proof the form was valid at the time it was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectParameters {
    values: BTreeMap<FieldName, String>,
}

impl ProjectParameters {
    /// Validate `values` against `schema`, filling gaps with field defaults.
    pub fn collect(
        schema: &FormSchema,
        values: &BTreeMap<FieldName, String>,
        probe: &dyn PathProbe,
    ) -> Result<Self, DomainError> {
        let value_of = |name: FieldName| -> String {
            values
                .get(&name)
                .cloned()
                .or_else(|| schema.get(name).map(|f| f.default.clone()))
                .unwrap_or_default()
        };

        let parent = value_of(FieldName::ParentFolder);
        let mut resolved = BTreeMap::new();
        let mut outcomes = BTreeMap::new();
        for spec in schema.fields() {
            let value = value_of(spec.name);
            let outcome =
                schema.validate_field(spec.name, &value, &parent, RuleContext::new(probe))?;
            outcomes.insert(spec.name, outcome);
            resolved.insert(spec.name, value);
        }

        Self::from_outcomes(resolved, &outcomes)
    }

    /// Build from values that have already been validated one by one.
    ///
    /// Fails unless every field has a value and an `Accepted` outcome.
    pub fn from_outcomes(
        values: BTreeMap<FieldName, String>,
        outcomes: &BTreeMap<FieldName, Outcome>,
    ) -> Result<Self, DomainError> {
        let rejected: Vec<String> = FieldName::ALL
            .iter()
            .filter_map(|name| match outcomes.get(name) {
                Some(Outcome::Accepted) => None,
                Some(outcome) => Some(format!("{name}: {}", outcome.reason())),
                None => Some(format!("{name}: not validated")),
            })
            .collect();
        if !rejected.is_empty() {
            return Err(DomainError::RejectedFields { rejected });
        }

        if let Some(missing) = FieldName::ALL.iter().find(|n| !values.contains_key(n)) {
            return Err(DomainError::MissingRequiredField {
                field: missing.as_str(),
            });
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: FieldName) -> &str {
        self.values.get(&name).map(String::as_str).unwrap_or_default()
    }

    /// Look a value up by its placeholder key.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let name = FieldName::from_str(key).ok()?;
        self.values.get(&name).map(String::as_str)
    }

    pub fn project_name(&self) -> &str {
        self.get(FieldName::ProjectName)
    }

    pub fn parent_folder(&self) -> &str {
        self.get(FieldName::ParentFolder)
    }

    /// `parent_folder/project_name`.
    pub fn target_path(&self) -> PathBuf {
        PathBuf::from(self.parent_folder()).join(self.project_name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Substitute `{field_name}` placeholders in `content`.
    pub fn render(&self, content: &str) -> Result<String, DomainError> {
        render_placeholders(content, |key| self.lookup(key))
    }
}
