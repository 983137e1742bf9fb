//! Per-entry record of a materialization run.

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::common::RelativePath;

/// What happened to one template entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Copied byte for byte (files) or as a whole subtree (directories).
    Copied { path: RelativePath },
    /// Placeholders substituted and written.
    Rendered { path: RelativePath },
    Failed { path: RelativePath, reason: String },
}

impl EntryOutcome {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::Copied { path } | Self::Rendered { path } | Self::Failed { path, .. } => path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of instantiating a template into a target folder.
///
/// The target folder itself was created, otherwise there is no result but an
/// error. Entry failures do not roll anything back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializationResult {
    pub run_id: Uuid,
    pub target: PathBuf,
    pub outcomes: Vec<EntryOutcome>,
}

impl MaterializationResult {
    pub fn new(run_id: Uuid, target: impl Into<PathBuf>) -> Self {
        Self {
            run_id,
            target: target.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: EntryOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn is_success(&self) -> bool {
        !self.outcomes.iter().any(EntryOutcome::is_failed)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.len() - self.failed_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    #[test]
    fn counts_split_on_failure() {
        let mut result = MaterializationResult::new(Uuid::new_v4(), "/work/p");
        assert!(result.is_success());

        result.push(EntryOutcome::Rendered { path: rel("Makefile") });
        result.push(EntryOutcome::Copied { path: rel("tasks.py") });
        result.push(EntryOutcome::Failed {
            path: rel("dut.sv"),
            reason: "denied".into(),
        });

        assert!(!result.is_success());
        assert_eq!(result.failed_count(), 1);
        assert_eq!(result.succeeded_count(), 2);
        assert_eq!(result.failures().next().unwrap().path(), &rel("dut.sv"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(EntryOutcome::Failed {
            path: rel("dut.sv"),
            reason: "denied".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["path"], "dut.sv");
        assert_eq!(json["reason"], "denied");
    }
}
