//! `cocoscaff template`: install the built-in template pack or inspect a
//! template source directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use cocoscaff_adapters::{LocalFilesystem, PlaceholderRenderer, builtin_templates};
use cocoscaff_core::{
    application::{MaterializeService, ports::Filesystem},
    domain::{EntryKind, PathProbe, PathState, TemplateEntry},
};

use crate::{cli::TemplateCommands, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(cmd: TemplateCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        TemplateCommands::Install { dir, force } => {
            let dir = dir.unwrap_or_else(|| config.templates.source_dir.clone());
            install(&LocalFilesystem::new(), &dir, force, &output)
        }
        TemplateCommands::Show { dir } => {
            let dir = dir.unwrap_or_else(|| {
                builtin_templates::resolve_source_dir(
                    &LocalFilesystem::new(),
                    &config.templates.source_dir,
                )
            });
            let service = MaterializeService::new(
                Box::new(LocalFilesystem::new()),
                Box::new(PlaceholderRenderer::new()),
            )
            .with_substitutable(config.substitution_list());
            show(&service, &dir, &output)
        }
    }
}

fn install(fs: &dyn Filesystem, dir: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if force && fs.probe(dir) == PathState::Directory {
        output.warning(&format!("Overwriting template files in {}", dir.display()))?;
    }
    let written = builtin_templates::install(fs, dir, force)?;
    for path in &written {
        output.print(&format!("  {}", path.display()))?;
    }
    output.success(&format!("Template installed to {}", dir.display()))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct Row {
    name: String,
    kind: &'static str,
}

fn rows(entries: &[TemplateEntry]) -> Vec<Row> {
    entries
        .iter()
        .map(|e| Row {
            name: e.name(),
            kind: match (e.is_dir, e.kind) {
                (true, _) => "dir",
                (false, EntryKind::Substitutable) => "substitutable",
                (false, EntryKind::Verbatim) => "verbatim",
            },
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct Listing {
    source: PathBuf,
    entries: Vec<Row>,
}

fn show(service: &MaterializeService, dir: &Path, output: &OutputManager) -> CliResult<()> {
    let entries = rows(&service.entries(dir)?);

    if output.is_json() {
        output.json(&Listing {
            source: dir.to_path_buf(),
            entries,
        })?;
        return Ok(());
    }

    output.header(&format!("Template {}", dir.display()))?;
    let width = entries.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in &entries {
        output.print(&format!("  {:<width$}  {}", row.name, row.kind))?;
    }
    Ok(())
}
