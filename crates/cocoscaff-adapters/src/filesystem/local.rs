//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use cocoscaff_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, Filesystem},
    },
    domain::{PathProbe, PathState},
    error::{CocoscaffError, CocoscaffResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PathProbe for LocalFilesystem {
    fn probe(&self, path: &Path) -> PathState {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => PathState::Directory,
            Ok(meta) if meta.is_file() => PathState::File,
            Ok(_) => PathState::Unknown,
            Err(e) if e.kind() == io::ErrorKind::NotFound => PathState::Absent,
            Err(_) => PathState::Unknown,
        }
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> CocoscaffResult<()> {
        std::fs::create_dir(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_dir_all(&self, path: &Path) -> CocoscaffResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_dir(&self, path: &Path) -> CocoscaffResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))? {
            let entry = entry.map_err(|e| map_io_error(path, e, "list directory"))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "inspect entry"))?
                .is_dir();
            entries.push(DirEntry {
                name: entry.file_name(),
                is_dir,
            });
        }
        entries.sort();
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> CocoscaffResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> CocoscaffResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CocoscaffResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> CocoscaffResult<()> {
        for entry in WalkDir::new(from).sort_by_file_name() {
            let entry = entry.map_err(|e| CocoscaffError::fs(from, e))?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| CocoscaffError::fs(entry.path(), e))?;
            let dest = to.join(rel);

            if entry.file_type().is_dir() {
                trace!(path = %dest.display(), "mkdir");
                self.create_dir_all(&dest)?;
            } else {
                trace!(path = %dest.display(), "copy");
                self.copy_file(entry.path(), &dest)?;
            }
        }
        Ok(())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CocoscaffError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn probe_classifies_paths() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();

        let fs = LocalFilesystem::new();
        assert_eq!(fs.probe(tmp.path()), PathState::Directory);
        assert_eq!(fs.probe(&file), PathState::File);
        assert_eq!(fs.probe(&tmp.path().join("missing")), PathState::Absent);
    }

    #[test]
    fn create_dir_refuses_existing() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let target = tmp.path().join("p");

        fs.create_dir(&target).unwrap();
        assert!(fs.create_dir(&target).is_err());
    }

    #[test]
    fn read_dir_is_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["tasks.py", "Makefile", "dut.sv"] {
            std::fs::write(tmp.path().join(name), "").unwrap();
        }
        std::fs::create_dir(tmp.path().join("rtl")).unwrap();

        let names: Vec<_> = LocalFilesystem::new()
            .read_dir(tmp.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Makefile", "dut.sv", "rtl", "tasks.py"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn read_dir_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"wave\xff.vcd");
        std::fs::write(src.path().join(name), "x").unwrap();
        std::fs::write(src.path().join("wave\u{fffd}.vcd"), "lossy").unwrap();

        let fs = LocalFilesystem::new();
        let entries = fs.read_dir(src.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&DirEntry::file(name)));

        fs.copy_file(&src.path().join(name), &dst.path().join(name))
            .unwrap();
        assert_eq!(std::fs::read(dst.path().join(name)).unwrap(), b"x");
    }

    #[test]
    fn copy_tree_preserves_bytes() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        std::fs::create_dir_all(src.path().join("rtl/inc")).unwrap();
        std::fs::write(src.path().join("rtl/inc/defs.vh"), [0u8, 0xff, b'{', b'}']).unwrap();

        let fs = LocalFilesystem::new();
        fs.copy_tree(&src.path().join("rtl"), &dst.path().join("rtl"))
            .unwrap();

        assert_eq!(
            std::fs::read(dst.path().join("rtl/inc/defs.vh")).unwrap(),
            [0u8, 0xff, b'{', b'}']
        );
    }
}
