//! Submission-time checks.
//!
//! Field rules run while the user types; by the time they press submit the
//! filesystem may have changed. This pass re-reads it once more, without
//! touching anything, and returns every problem it finds.

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::domain::{PathProbe, PathState, ProjectParameters, rules::MSG_UNKNOWN};

#[derive(Debug, Clone)]
pub struct PreconditionChecker {
    template_root: PathBuf,
}

impl PreconditionChecker {
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
        }
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Empty means materialization may start.
    #[instrument(skip_all, fields(target = %params.target_path().display()))]
    pub fn check(&self, params: &ProjectParameters, probe: &dyn PathProbe) -> Vec<String> {
        let mut failures = Vec::new();

        let parent = Path::new(params.parent_folder());
        match probe.probe(parent) {
            PathState::Directory => {}
            PathState::File => failures.push(format!(
                "Project folder {} is a file, not a folder.",
                parent.display()
            )),
            PathState::Absent => failures.push(format!(
                "Project folder {} doesn't exist.",
                parent.display()
            )),
            PathState::Unknown => failures.push(format!("{}: {MSG_UNKNOWN}", parent.display())),
        }

        let template = self.template_root.as_path();
        match probe.probe(template) {
            PathState::Directory => {}
            PathState::File => failures.push(format!(
                "Template folder {} is a file, not a folder.",
                template.display()
            )),
            PathState::Absent => failures.push(format!(
                "Template folder {} doesn't exist.",
                template.display()
            )),
            PathState::Unknown => failures.push(format!("{}: {MSG_UNKNOWN}", template.display())),
        }

        let target = params.target_path();
        match probe.probe(&target) {
            PathState::Absent => {}
            PathState::Directory => {
                failures.push(format!("Folder {} already exists.", target.display()))
            }
            PathState::File => failures.push(format!("File {} already exists.", target.display())),
            PathState::Unknown => failures.push(format!("{}: {MSG_UNKNOWN}", target.display())),
        }

        debug!(failures = failures.len(), "Preconditions checked");
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldName, FormSchema, Outcome};
    use std::collections::{BTreeMap, HashMap};

    #[derive(Default)]
    struct Table(HashMap<PathBuf, PathState>);

    impl PathProbe for Table {
        fn probe(&self, path: &Path) -> PathState {
            self.0.get(path).copied().unwrap_or(PathState::Absent)
        }
    }

    fn params(parent: &str, name: &str) -> ProjectParameters {
        let schema = FormSchema::cocotb().unwrap();
        let mut values: BTreeMap<_, _> = schema
            .fields()
            .iter()
            .map(|f| (f.name, f.default.clone()))
            .collect();
        values.insert(FieldName::ParentFolder, parent.into());
        values.insert(FieldName::ProjectName, name.into());
        let outcomes: BTreeMap<_, _> = FieldName::ALL.iter().map(|n| (*n, Outcome::Accepted)).collect();
        ProjectParameters::from_outcomes(values, &outcomes).unwrap()
    }

    fn table(entries: &[(&str, PathState)]) -> Table {
        Table(
            entries
                .iter()
                .map(|(p, s)| (PathBuf::from(p), *s))
                .collect(),
        )
    }

    #[test]
    fn passes_when_target_is_free() {
        let probe = table(&[("/w", PathState::Directory), ("/t", PathState::Directory)]);
        let checker = PreconditionChecker::new("/t");
        assert!(checker.check(&params("/w", "adder_tb"), &probe).is_empty());
    }

    #[test]
    fn existing_target_is_reported() {
        let probe = table(&[
            ("/w", PathState::Directory),
            ("/t", PathState::Directory),
            ("/w/adder_tb", PathState::Directory),
            ("/w/notes", PathState::File),
        ]);
        let checker = PreconditionChecker::new("/t");

        assert_eq!(
            checker.check(&params("/w", "adder_tb"), &probe),
            vec!["Folder /w/adder_tb already exists.".to_string()]
        );
        assert_eq!(
            checker.check(&params("/w", "notes"), &probe),
            vec!["File /w/notes already exists.".to_string()]
        );
    }

    #[test]
    fn every_failure_is_collected() {
        let probe = table(&[("/t", PathState::File)]);
        let failures = PreconditionChecker::new("/t").check(&params("/w", "p"), &probe);
        assert_eq!(
            failures,
            vec![
                "Project folder /w doesn't exist.".to_string(),
                "Template folder /t is a file, not a folder.".to_string(),
            ]
        );
    }
}
