//! Built-in cocotb template pack.
//!
//! The files under `templates/cocotb/` are compiled into the binary so a
//! fresh install can scaffold without a checkout. [`install`] writes them to
//! disk, where they become an ordinary template source directory.
//!
//! # Template source resolution order
//!
//! [`resolve_source_dir`] picks the first directory that exists:
//!
//! 1. **The configured directory** (`templates.source_dir`, `--template-dir`).
//! 2. **`<executable-dir>/cocotb_template`**: sibling to the `cocoscaff`
//!    binary, for installs that ship the template next to it.
//!
//! When neither exists the configured path is returned unchanged, so the
//! precondition check reports it by name.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use cocoscaff_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{PathProbe, PathState},
    error::CocoscaffResult,
};

/// Directory name of the template source, relative to the working directory.
pub const DEFAULT_DIR_NAME: &str = "cocotb_template";

/// One embedded template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFile {
    pub name: &'static str,
    pub content: &'static str,
}

/// The embedded pack, in name order.
pub const COCOTB_TEMPLATE: &[BuiltinFile] = &[
    BuiltinFile {
        name: "Makefile",
        content: include_str!("../templates/cocotb/Makefile"),
    },
    BuiltinFile {
        name: "dut.sv",
        content: include_str!("../templates/cocotb/dut.sv"),
    },
    BuiltinFile {
        name: "sim_utils.py",
        content: include_str!("../templates/cocotb/sim_utils.py"),
    },
    BuiltinFile {
        name: "tasks.py",
        content: include_str!("../templates/cocotb/tasks.py"),
    },
    BuiltinFile {
        name: "test_proc.py",
        content: include_str!("../templates/cocotb/test_proc.py"),
    },
];

/// Write the embedded pack into `dir`.
///
/// An existing directory is only written into when `force` is set; files
/// with the same names are overwritten, anything else in it is left alone.
#[instrument(skip_all, fields(dir = %dir.display(), force))]
pub fn install(fs: &dyn Filesystem, dir: &Path, force: bool) -> CocoscaffResult<Vec<PathBuf>> {
    match fs.probe(dir) {
        PathState::Absent => {}
        PathState::Directory if force => {
            debug!("overwriting existing template directory");
        }
        PathState::Directory => {
            return Err(ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: "template directory already exists (use --force to overwrite)".into(),
            }
            .into());
        }
        PathState::File | PathState::Unknown => {
            return Err(ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: "exists and is not a directory".into(),
            }
            .into());
        }
    }

    fs.create_dir_all(dir)?;
    let mut written = Vec::with_capacity(COCOTB_TEMPLATE.len());
    for file in COCOTB_TEMPLATE {
        let path = dir.join(file.name);
        fs.write_file(&path, file.content.as_bytes())?;
        written.push(path);
    }

    info!(files = written.len(), "built-in template installed");
    Ok(written)
}

/// Choose the template source directory; see the module docs.
pub fn resolve_source_dir(probe: &dyn PathProbe, configured: &Path) -> PathBuf {
    if probe.probe(configured) == PathState::Directory {
        return configured.to_path_buf();
    }
    debug!(path = %configured.display(), "configured template directory not found");

    if let Some(sibling) = exe_sibling_template() {
        if probe.probe(&sibling) == PathState::Directory {
            debug!(path = %sibling.display(), "using template next to executable");
            return sibling;
        }
    }

    configured.to_path_buf()
}

/// `<directory of current executable>/cocotb_template`, or `None` if the
/// executable path cannot be determined.
fn exe_sibling_template() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(DEFAULT_DIR_NAME)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use cocoscaff_core::domain::{
        EntryKind, FieldName, RelativePath, SubstitutionList, placeholder_names,
    };

    #[test]
    fn pack_is_sorted_and_complete() {
        let names: Vec<_> = COCOTB_TEMPLATE.iter().map(|f| f.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn substitutable_files_only_use_known_placeholders() {
        let list = SubstitutionList::default();
        for file in COCOTB_TEMPLATE {
            let path = RelativePath::try_new(file.name).unwrap();
            if list.classify(&path) != EntryKind::Substitutable {
                continue;
            }
            for name in placeholder_names(file.content).unwrap() {
                assert!(
                    name.parse::<FieldName>().is_ok(),
                    "{}: unknown placeholder {name}",
                    file.name
                );
            }
        }
    }

    #[test]
    fn install_refuses_existing_dir_without_force() {
        let fs = MemoryFilesystem::new().with_dir("/w/cocotb_template");
        let dir = Path::new("/w/cocotb_template");

        assert!(install(&fs, dir, false).is_err());
        assert!(fs.list_files().is_empty());

        let written = install(&fs, dir, true).unwrap();
        assert_eq!(written.len(), COCOTB_TEMPLATE.len());
        assert!(fs.text("/w/cocotb_template/Makefile").unwrap().contains("{simulator}"));
    }

    #[test]
    fn configured_dir_wins_when_present() {
        let fs = MemoryFilesystem::new().with_dir("/t");
        assert_eq!(resolve_source_dir(&fs, Path::new("/t")), PathBuf::from("/t"));
        assert_eq!(
            resolve_source_dir(&fs, Path::new("/nope")),
            PathBuf::from("/nope")
        );
    }
}
