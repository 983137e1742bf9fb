//! Template entries and their classification.
//!
//! Whether a file gets placeholder substitution is decided by its **name**,
//! looked up case-insensitively in a [`SubstitutionList`]. File extensions
//! play no part: `tasks.py` is copied verbatim while `test_proc.py` is
//! rendered.

use serde::{Deserialize, Serialize};

use crate::domain::common::RelativePath;

/// File names rendered by default: the build file, the DUT skeleton and the
/// primary test procedure.
pub const DEFAULT_SUBSTITUTABLE: [&str; 3] = ["makefile", "dut.sv", "test_proc.py"];

/// How a template entry is instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Contents go through placeholder substitution.
    Substitutable,
    /// Bytes are copied unchanged.
    Verbatim,
}

/// One top-level item of the template source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub path: RelativePath,
    pub kind: EntryKind,
    /// Directory entries are copied as a whole subtree.
    pub is_dir: bool,
}

impl TemplateEntry {
    pub fn name(&self) -> String {
        self.path.file_name()
    }
}

/// Allow-list of file names that receive substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionList {
    names: Vec<String>,
}

impl SubstitutionList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Classify a file by its final path component.
    pub fn classify(&self, path: &RelativePath) -> EntryKind {
        let name = path.file_name().to_lowercase();
        if self.names.iter().any(|n| *n == name) {
            EntryKind::Substitutable
        } else {
            EntryKind::Verbatim
        }
    }

    /// Build a [`TemplateEntry`]; directories are always verbatim.
    pub fn entry(&self, path: RelativePath, is_dir: bool) -> TemplateEntry {
        let kind = if is_dir {
            EntryKind::Verbatim
        } else {
            self.classify(&path)
        };
        TemplateEntry { path, kind, is_dir }
    }
}

impl Default for SubstitutionList {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSTITUTABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    #[test]
    fn allow_list_is_case_insensitive() {
        let list = SubstitutionList::default();
        assert_eq!(list.classify(&rel("Makefile")), EntryKind::Substitutable);
        assert_eq!(list.classify(&rel("MAKEFILE")), EntryKind::Substitutable);
        assert_eq!(list.classify(&rel("Test_Proc.py")), EntryKind::Substitutable);
        assert_eq!(list.classify(&rel("dut.sv")), EntryKind::Substitutable);
    }

    #[test]
    fn classification_is_by_name_not_extension() {
        let list = SubstitutionList::default();
        assert_eq!(list.classify(&rel("tasks.py")), EntryKind::Verbatim);
        assert_eq!(list.classify(&rel("sim_utils.py")), EntryKind::Verbatim);
        assert_eq!(list.classify(&rel("Makefile.sim")), EntryKind::Verbatim);
    }

    #[test]
    fn directories_are_verbatim() {
        let list = SubstitutionList::new(["rtl"]);
        let entry = list.entry(rel("rtl"), true);
        assert_eq!(entry.kind, EntryKind::Verbatim);
        assert!(entry.is_dir);
    }

    #[test]
    fn custom_list_is_normalised() {
        let list = SubstitutionList::new(["README.md"]);
        assert_eq!(list.names(), ["readme.md".to_string()]);
        assert_eq!(list.classify(&rel("readme.MD")), EntryKind::Substitutable);
    }
}
