//! Interactive form state: values, outcomes, transcript and status.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{FieldName, FormSchema, MaterializationResult, Outcome};

/// Severity of one transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub level: MessageLevel,
    pub text: String,
}

/// Why a form ended in [`FormStatus::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Submission-time checks failed; nothing was written. Editing may resume.
    Precondition,
    /// Template listing or target creation failed; nothing was written.
    Setup,
    /// Target created, but at least one entry failed.
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "kind", rename_all = "snake_case")]
pub enum FormStatus {
    Editing,
    Validating,
    Submitting,
    Materializing,
    Done,
    Failed(FailureKind),
    Cancelled,
}

impl FormStatus {
    /// No further events change the form.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Done
                | Self::Cancelled
                | Self::Failed(FailureKind::Setup)
                | Self::Failed(FailureKind::Partial)
        )
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => f.write_str("editing"),
            Self::Validating => f.write_str("validating"),
            Self::Submitting => f.write_str("submitting"),
            Self::Materializing => f.write_str("materializing"),
            Self::Done => f.write_str("done"),
            Self::Failed(FailureKind::Precondition) => f.write_str("failed (preconditions)"),
            Self::Failed(FailureKind::Setup) => f.write_str("failed (setup)"),
            Self::Failed(FailureKind::Partial) => f.write_str("failed (partial)"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Everything the UI renders. Lives as long as the form is open.
#[derive(Debug, Clone, Serialize)]
pub struct FormState {
    values: BTreeMap<FieldName, String>,
    outcomes: BTreeMap<FieldName, Outcome>,
    /// Inline error per field; cleared when the field turns valid.
    shown_errors: BTreeMap<FieldName, String>,
    /// Append-only log.
    transcript: Vec<TranscriptEntry>,
    /// Transcript index where the latest accepted submit began.
    #[serde(skip)]
    submit_mark: Option<usize>,
    status: FormStatus,
    result: Option<MaterializationResult>,
}

impl FormState {
    /// Fresh form pre-filled with the schema defaults.
    pub fn open(schema: &FormSchema) -> Self {
        Self {
            values: schema
                .fields()
                .iter()
                .map(|f| (f.name, f.default.clone()))
                .collect(),
            outcomes: BTreeMap::new(),
            shown_errors: BTreeMap::new(),
            transcript: Vec::new(),
            submit_mark: None,
            status: FormStatus::Editing,
            result: None,
        }
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn values(&self) -> &BTreeMap<FieldName, String> {
        &self.values
    }

    pub fn outcome(&self, field: FieldName) -> Option<&Outcome> {
        self.outcomes.get(&field)
    }

    pub fn outcomes(&self) -> &BTreeMap<FieldName, Outcome> {
        &self.outcomes
    }

    pub fn shown_error(&self, field: FieldName) -> Option<&str> {
        self.shown_errors.get(&field).map(String::as_str)
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Entries logged since the latest submit got past field validation.
    /// Empty if no submit has.
    pub fn since_submit(&self) -> &[TranscriptEntry] {
        let start = self.submit_mark.unwrap_or(self.transcript.len());
        &self.transcript[start..]
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn result(&self) -> Option<&MaterializationResult> {
        self.result.as_ref()
    }

    /// Fields whose current outcome is not `Accepted`, in form order.
    pub fn rejected(&self) -> Vec<(FieldName, String)> {
        FieldName::ALL
            .iter()
            .filter_map(|f| match self.outcomes.get(f) {
                Some(Outcome::Accepted) => None,
                Some(o) => Some((*f, o.reason())),
                None => Some((*f, "not validated".to_string())),
            })
            .collect()
    }

    pub(crate) fn set_value(&mut self, field: FieldName, value: String) {
        self.values.insert(field, value);
    }

    /// Store a fresh outcome and keep the inline error in sync with it.
    pub(crate) fn set_outcome(&mut self, field: FieldName, outcome: Outcome) {
        match &outcome {
            Outcome::Accepted => {
                self.shown_errors.remove(&field);
            }
            rejected => {
                self.shown_errors.insert(field, rejected.reason());
            }
        }
        self.outcomes.insert(field, outcome);
    }

    pub(crate) fn clear_shown_errors(&mut self) {
        self.shown_errors.clear();
    }

    pub(crate) fn show_error(&mut self, field: FieldName, reason: String) {
        self.shown_errors.insert(field, reason);
    }

    pub(crate) fn push(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry {
            level,
            text: text.into(),
        });
    }

    pub(crate) fn mark_submit(&mut self) {
        self.submit_mark = Some(self.transcript.len());
    }

    pub(crate) fn set_status(&mut self, status: FormStatus) {
        self.status = status;
    }

    pub(crate) fn set_result(&mut self, result: MaterializationResult) {
        self.result = Some(result);
    }
}
