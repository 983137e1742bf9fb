//! Shared doubles for the application tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mockall::mock;

use crate::application::ports::{DirEntry, Filesystem, TemplateRenderer};
use crate::domain::{FieldName, FormSchema, Outcome, PathProbe, PathState, ProjectParameters};
use crate::error::{CocoscaffError, CocoscaffResult};

mock! {
    pub Fs {}

    impl PathProbe for Fs {
        fn probe(&self, path: &Path) -> PathState;
    }

    impl Filesystem for Fs {
        fn create_dir(&self, path: &Path) -> CocoscaffResult<()>;
        fn create_dir_all(&self, path: &Path) -> CocoscaffResult<()>;
        fn read_dir(&self, path: &Path) -> CocoscaffResult<Vec<DirEntry>>;
        fn read_file(&self, path: &Path) -> CocoscaffResult<Vec<u8>>;
        fn write_file(&self, path: &Path, content: &[u8]) -> CocoscaffResult<()>;
        fn copy_file(&self, from: &Path, to: &Path) -> CocoscaffResult<()>;
        fn copy_tree(&self, from: &Path, to: &Path) -> CocoscaffResult<()>;
    }
}

/// Decodes UTF-8 and substitutes.
pub struct Utf8Renderer;

impl TemplateRenderer for Utf8Renderer {
    fn render(&self, source: &[u8], params: &ProjectParameters) -> CocoscaffResult<String> {
        let text = std::str::from_utf8(source).map_err(|e| CocoscaffError::Internal {
            message: e.to_string(),
        })?;
        Ok(params.render(text)?)
    }
}

/// Schema defaults plus the given location, all marked accepted.
pub fn accepted_params(parent: &str, name: &str) -> ProjectParameters {
    let schema = FormSchema::cocotb().unwrap();
    let mut values: BTreeMap<_, _> = schema
        .fields()
        .iter()
        .map(|f| (f.name, f.default.clone()))
        .collect();
    values.insert(FieldName::ParentFolder, parent.into());
    values.insert(FieldName::ProjectName, name.into());
    let outcomes: BTreeMap<_, _> = FieldName::ALL
        .iter()
        .map(|n| (*n, Outcome::Accepted))
        .collect();
    ProjectParameters::from_outcomes(values, &outcomes).unwrap()
}

/// Minimal flat in-memory tree for controller tests.
#[derive(Default)]
pub struct FakeFs {
    dirs: Mutex<BTreeSet<PathBuf>>,
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl FakeFs {
    pub fn with_dir(self, path: &str) -> Self {
        self.dirs.lock().unwrap().insert(path.into());
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.as_bytes().to_vec());
        self
    }
}

impl PathProbe for FakeFs {
    fn probe(&self, path: &Path) -> PathState {
        if self.dirs.lock().unwrap().contains(path) {
            PathState::Directory
        } else if self.files.lock().unwrap().contains_key(path) {
            PathState::File
        } else {
            PathState::Absent
        }
    }
}

impl Filesystem for FakeFs {
    fn create_dir(&self, path: &Path) -> CocoscaffResult<()> {
        if self.probe(path) != PathState::Absent {
            return Err(CocoscaffError::fs(path, "already exists"));
        }
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> CocoscaffResult<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> CocoscaffResult<Vec<DirEntry>> {
        if self.probe(path) != PathState::Directory {
            return Err(CocoscaffError::fs(path, "not a directory"));
        }
        let child = |p: &PathBuf| {
            (p.parent() == Some(path))
                .then(|| p.file_name().map(|n| n.to_os_string()))
                .flatten()
        };
        let mut out: Vec<DirEntry> = self
            .dirs
            .lock()
            .unwrap()
            .iter()
            .filter_map(child)
            .map(DirEntry::dir)
            .collect();
        out.extend(
            self.files
                .lock()
                .unwrap()
                .keys()
                .filter_map(child)
                .map(DirEntry::file),
        );
        out.sort();
        Ok(out)
    }

    fn read_file(&self, path: &Path) -> CocoscaffResult<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| CocoscaffError::fs(path, "not found"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> CocoscaffResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CocoscaffResult<()> {
        let bytes = self.read_file(from)?;
        self.write_file(to, &bytes)
    }

    fn copy_tree(&self, _from: &Path, to: &Path) -> CocoscaffResult<()> {
        self.create_dir_all(to)
    }
}
