//! Materialize Service - instantiates a template into a new project folder.
//!
//! Workflow:
//! 1. List the template root (read-only)
//! 2. Create the target folder, exactly once; failure aborts the run
//! 3. Render or copy every top-level entry in name order, one outcome each
//!
//! Entry failures are recorded and the run continues. Nothing is rolled
//! back: whatever was written stays on disk and is reported.

use std::path::Path;
use tracing::{Span, field, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{
        EntryKind, EntryOutcome, MaterializationResult, ProjectParameters, RelativePath,
        SubstitutionList, TemplateEntry,
    },
    error::CocoscaffResult,
};

/// Progress notifications emitted while a run proceeds.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    TargetCreated(&'a Path),
    Entry(&'a EntryOutcome),
}

pub struct MaterializeService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    substitutable: SubstitutionList,
}

impl MaterializeService {
    /// Create a service using the default substitution allow-list.
    pub fn new(filesystem: Box<dyn Filesystem>, renderer: Box<dyn TemplateRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
            substitutable: SubstitutionList::default(),
        }
    }

    pub fn with_substitutable(mut self, substitutable: SubstitutionList) -> Self {
        self.substitutable = substitutable;
        self
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    pub fn substitutable(&self) -> &SubstitutionList {
        &self.substitutable
    }

    /// Classified top-level entries of `template_root`, in name order.
    pub fn entries(&self, template_root: &Path) -> CocoscaffResult<Vec<TemplateEntry>> {
        let mut listing = self.filesystem.read_dir(template_root).map_err(|e| {
            ApplicationError::TemplateUnreadable {
                path: template_root.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        listing.sort();

        listing
            .into_iter()
            .map(|d| -> CocoscaffResult<TemplateEntry> {
                let path = RelativePath::try_new(&d.name)?;
                Ok(self.substitutable.entry(path, d.is_dir))
            })
            .collect()
    }

    pub fn materialize(
        &self,
        template_root: &Path,
        target_root: &Path,
        params: &ProjectParameters,
    ) -> CocoscaffResult<MaterializationResult> {
        self.materialize_observed(template_root, target_root, params, &mut |_| {})
    }

    /// Like [`materialize`](Self::materialize), reporting each step to
    /// `observe` as it happens.
    #[instrument(
        skip_all,
        fields(
            run_id = field::Empty,
            template = %template_root.display(),
            target = %target_root.display()
        )
    )]
    pub fn materialize_observed(
        &self,
        template_root: &Path,
        target_root: &Path,
        params: &ProjectParameters,
        observe: &mut dyn FnMut(Progress<'_>),
    ) -> CocoscaffResult<MaterializationResult> {
        let run_id = Uuid::new_v4();
        Span::current().record("run_id", field::display(run_id));

        let entries = self.entries(template_root)?;
        info!(entries = entries.len(), "Template listed");

        self.filesystem.create_dir(target_root).map_err(|e| {
            ApplicationError::TargetCreationFailed {
                path: target_root.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        observe(Progress::TargetCreated(target_root));

        let mut result = MaterializationResult::new(run_id, target_root);
        for entry in &entries {
            let from = template_root.join(&entry.path);
            let to = target_root.join(&entry.path);

            let outcome = match self.instantiate(entry, &from, &to, params) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(entry = %entry.path, error = %e, "Entry failed");
                    EntryOutcome::Failed {
                        path: entry.path.clone(),
                        reason: e.to_string(),
                    }
                }
            };
            observe(Progress::Entry(&outcome));
            result.push(outcome);
        }

        info!(
            succeeded = result.succeeded_count(),
            failed = result.failed_count(),
            "Materialization finished"
        );
        Ok(result)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn instantiate(
        &self,
        entry: &TemplateEntry,
        from: &Path,
        to: &Path,
        params: &ProjectParameters,
    ) -> CocoscaffResult<EntryOutcome> {
        let path = entry.path.clone();
        if entry.is_dir {
            self.filesystem.copy_tree(from, to)?;
            return Ok(EntryOutcome::Copied { path });
        }

        match entry.kind {
            EntryKind::Verbatim => {
                self.filesystem.copy_file(from, to)?;
                Ok(EntryOutcome::Copied { path })
            }
            EntryKind::Substitutable => {
                let source = self.filesystem.read_file(from)?;
                let text = self.renderer.render(&source, params)?;
                self.filesystem.write_file(to, text.as_bytes())?;
                Ok(EntryOutcome::Rendered { path })
            }
        }
    }
}
