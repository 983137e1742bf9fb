//! In-memory filesystem adapter for testing.
//!
//! Supports fault injection: paths marked with [`MemoryFilesystem::deny_read`]
//! or [`MemoryFilesystem::deny_write`] fail the matching operations the way a
//! permission error would on disk.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard},
};

use cocoscaff_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, Filesystem},
    },
    domain::{PathProbe, PathState},
    error::{CocoscaffError, CocoscaffResult},
};

/// In-memory filesystem for testing. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    unreadable: HashSet<PathBuf>,
    unwritable: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains(parent),
            _ => true,
        }
    }

    fn state(&self, path: &Path) -> PathState {
        if self.directories.contains(path) {
            PathState::Directory
        } else if self.files.contains_key(path) {
            PathState::File
        } else {
            PathState::Absent
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and its ancestors (builder-style helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.write_inner().add_dir_all(path.as_ref());
        self
    }

    /// Add a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        {
            let mut inner = self.write_inner();
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir_all(parent);
            }
            inner
                .files
                .insert(path.to_path_buf(), content.as_ref().to_vec());
        }
        self
    }

    /// Make reads of `path` fail.
    pub fn deny_read(&self, path: impl Into<PathBuf>) {
        self.write_inner().unreadable.insert(path.into());
    }

    /// Make writes to `path` fail.
    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        self.write_inner().unwritable.insert(path.into());
    }

    /// Raw contents of a file (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.read_inner().files.get(path.as_ref()).cloned()
    }

    /// File contents as text (testing helper).
    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Every file path, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_inner().files.keys().cloned().collect()
    }

    /// Every directory path, sorted.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        self.read_inner().directories.iter().cloned().collect()
    }

    fn read_inner(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_inner(&self) -> std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_write(
        &self,
    ) -> CocoscaffResult<std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn lock_read(&self) -> CocoscaffResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

fn denied(path: &Path) -> CocoscaffError {
    CocoscaffError::fs(path, "permission denied")
}

impl PathProbe for MemoryFilesystem {
    fn probe(&self, path: &Path) -> PathState {
        match self.inner.read() {
            Ok(inner) => inner.state(path),
            Err(_) => PathState::Unknown,
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> CocoscaffResult<()> {
        let mut inner = self.lock_write()?;
        if inner.unwritable.contains(path) {
            return Err(denied(path));
        }
        if inner.state(path) != PathState::Absent {
            return Err(CocoscaffError::fs(path, "already exists"));
        }
        if !inner.parent_exists(path) {
            return Err(CocoscaffError::fs(path, "parent directory does not exist"));
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> CocoscaffResult<()> {
        let mut inner = self.lock_write()?;
        if inner.files.contains_key(path) {
            return Err(CocoscaffError::fs(path, "is a file"));
        }
        inner.add_dir_all(path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> CocoscaffResult<Vec<DirEntry>> {
        let inner = self.lock_read()?;
        if inner.unreadable.contains(path) {
            return Err(denied(path));
        }
        if !inner.directories.contains(path) {
            return Err(CocoscaffError::fs(path, "not a directory"));
        }

        let name_under = |p: &PathBuf| -> Option<OsString> {
            (p.parent() == Some(path))
                .then(|| p.file_name().map(OsStr::to_os_string))
                .flatten()
        };
        let mut entries: Vec<DirEntry> = inner
            .directories
            .iter()
            .filter_map(name_under)
            .map(DirEntry::dir)
            .chain(inner.files.keys().filter_map(name_under).map(DirEntry::file))
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> CocoscaffResult<Vec<u8>> {
        let inner = self.lock_read()?;
        if inner.unreadable.contains(path) {
            return Err(denied(path));
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| CocoscaffError::fs(path, "no such file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> CocoscaffResult<()> {
        let mut inner = self.lock_write()?;
        if inner.unwritable.contains(path) {
            return Err(denied(path));
        }
        if !inner.parent_exists(path) {
            return Err(CocoscaffError::fs(path, "parent directory does not exist"));
        }
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CocoscaffResult<()> {
        let bytes = self.read_file(from)?;
        self.write_file(to, &bytes)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> CocoscaffResult<()> {
        let (dirs, files): (Vec<PathBuf>, Vec<PathBuf>) = {
            let inner = self.lock_read()?;
            if inner.unreadable.contains(from) {
                return Err(denied(from));
            }
            (
                inner
                    .directories
                    .iter()
                    .filter(|d| d.starts_with(from))
                    .cloned()
                    .collect(),
                inner
                    .files
                    .keys()
                    .filter(|f| f.starts_with(from))
                    .cloned()
                    .collect(),
            )
        };

        for dir in dirs {
            let rel = dir
                .strip_prefix(from)
                .map_err(|e| CocoscaffError::fs(&dir, e))?;
            self.create_dir_all(&to.join(rel))?;
        }
        for file in files {
            let rel = file
                .strip_prefix(from)
                .map_err(|e| CocoscaffError::fs(&file, e))?;
            self.copy_file(&file, &to.join(rel))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new().with_dir("/w");
        let other = fs.clone();
        other.write_file(Path::new("/w/a"), b"x").unwrap();
        assert_eq!(fs.text("/w/a").as_deref(), Some("x"));
    }

    #[test]
    fn create_dir_needs_parent_and_absence() {
        let fs = MemoryFilesystem::new().with_dir("/w");
        assert!(fs.create_dir(Path::new("/missing/p")).is_err());
        fs.create_dir(Path::new("/w/p")).unwrap();
        assert!(fs.create_dir(Path::new("/w/p")).is_err());
        assert_eq!(fs.probe(Path::new("/w/p")), PathState::Directory);
    }

    #[test]
    fn denied_paths_fail() {
        let fs = MemoryFilesystem::new().with_file("/t/Makefile", "all:");
        fs.deny_read("/t/Makefile");
        fs.deny_write("/w/out");
        assert!(fs.read_file(Path::new("/t/Makefile")).is_err());
        assert!(fs.write_file(Path::new("/w/out"), b"").is_err());
    }

    #[test]
    fn read_dir_lists_direct_children_only() {
        let fs = MemoryFilesystem::new()
            .with_file("/t/Makefile", "")
            .with_file("/t/rtl/adder.sv", "")
            .with_file("/t/dut.sv", "");
        let entries = fs.read_dir(Path::new("/t")).unwrap();
        assert_eq!(
            entries,
            [
                DirEntry::file("Makefile"),
                DirEntry::file("dut.sv"),
                DirEntry::dir("rtl"),
            ]
        );
    }

    #[test]
    fn copy_tree_copies_nested_files() {
        let fs = MemoryFilesystem::new()
            .with_dir("/w/p")
            .with_file("/t/rtl/inc/defs.vh", [1u8, 2, 3]);
        fs.copy_tree(Path::new("/t/rtl"), Path::new("/w/p/rtl"))
            .unwrap();
        assert_eq!(fs.contents("/w/p/rtl/inc/defs.vh"), Some(vec![1, 2, 3]));
    }
}
