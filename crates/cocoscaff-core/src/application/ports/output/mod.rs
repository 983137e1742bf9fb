//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cocoscaff-adapters` crate provides implementations.

use std::ffi::OsString;
use std::path::Path;

use crate::domain::{PathProbe, PathState, ProjectParameters};
use crate::error::CocoscaffResult;

/// One child of a listed directory.
///
/// The name is kept as the OS gave it; it need not be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    pub name: OsString,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cocoscaff_adapters::filesystem::LocalFilesystem` (production)
/// - `cocoscaff_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `probe` (from [`PathProbe`]) is the only call validation makes
/// - File contents are bytes; decoding is the renderer's business
pub trait Filesystem: PathProbe + Send + Sync {
    /// Create exactly one directory. Fails if it already exists.
    fn create_dir(&self, path: &Path) -> CocoscaffResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CocoscaffResult<()>;

    /// Immediate children of `path`, sorted by name.
    fn read_dir(&self, path: &Path) -> CocoscaffResult<Vec<DirEntry>>;

    fn read_file(&self, path: &Path) -> CocoscaffResult<Vec<u8>>;

    /// Create or truncate `path` and write `content`.
    fn write_file(&self, path: &Path, content: &[u8]) -> CocoscaffResult<()>;

    /// Copy one file byte for byte.
    fn copy_file(&self, from: &Path, to: &Path) -> CocoscaffResult<()>;

    /// Copy a directory and everything below it byte for byte.
    fn copy_tree(&self, from: &Path, to: &Path) -> CocoscaffResult<()>;
}

/// Borrow a [`Filesystem`] where only a [`PathProbe`] is wanted.
pub struct ProbeRef<'a>(pub &'a dyn Filesystem);

impl PathProbe for ProbeRef<'_> {
    fn probe(&self, path: &Path) -> PathState {
        self.0.probe(path)
    }
}

/// Port for placeholder rendering.
///
/// Implemented by:
/// - `cocoscaff_adapters::renderer::PlaceholderRenderer`
pub trait TemplateRenderer: Send + Sync {
    /// Render the raw bytes of a substitutable file into its final text.
    fn render(&self, source: &[u8], params: &ProjectParameters) -> CocoscaffResult<String>;
}
