//! Form controller: the state machine behind the interactive form.
//!
//! ```text
//!  Editing ──FieldChanged──▶ Validating ──▶ Editing
//!     │
//!   Submit (all fields accepted)
//!     ▼
//!  Submitting ──preconditions fail──▶ Failed(Precondition) ──FieldChanged──▶ Editing
//!     │
//!     ▼
//!  Materializing ──▶ Done | Failed(Setup) | Failed(Partial)
//!
//!  Cancel: any non-terminal state ──▶ Cancelled
//! ```
//!
//! Input arrives as [`FormEvent`]s on a queue. The interactive prompt loop
//! and the flag-driven mode both feed the same queue.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        form::state::{FailureKind, FormState, FormStatus, MessageLevel},
        ports::ProbeRef,
        services::{MaterializeService, PreconditionChecker, Progress},
    },
    domain::{
        DomainError, EntryOutcome, FieldName, FormSchema, Outcome, ProjectParameters,
        RuleContext,
    },
    error::CocoscaffResult,
};

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldChanged { field: FieldName, value: String },
    Submit,
    Cancel,
}

pub struct FormController {
    schema: FormSchema,
    state: FormState,
    queue: VecDeque<FormEvent>,
    checker: PreconditionChecker,
    materializer: MaterializeService,
}

impl FormController {
    /// Open a form over `template_root`. Every field is validated once so
    /// submit can tell what is still missing; no inline errors are shown
    /// until the user touches a field.
    pub fn open(
        schema: FormSchema,
        template_root: impl Into<PathBuf>,
        materializer: MaterializeService,
    ) -> Self {
        let state = FormState::open(&schema);
        let mut controller = Self {
            schema,
            state,
            queue: VecDeque::new(),
            checker: PreconditionChecker::new(template_root),
            materializer,
        };
        for field in FieldName::ALL {
            let outcome = controller.validate(field);
            controller.state.set_outcome(field, outcome);
        }
        controller.state.clear_shown_errors();
        controller
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn template_root(&self) -> &Path {
        self.checker.template_root()
    }

    pub fn materializer(&self) -> &MaterializeService {
        &self.materializer
    }

    /// Queue an event without handling it.
    pub fn dispatch(&mut self, event: FormEvent) {
        self.queue.push_back(event);
    }

    /// Handle every queued event in order. Refused events are logged and
    /// leave the state untouched.
    pub fn process(&mut self) -> FormStatus {
        while let Some(event) = self.queue.pop_front() {
            if let Err(e) = self.handle(event) {
                debug!(error = %e, "Event refused");
            }
        }
        self.state.status()
    }

    /// Handle one event immediately.
    pub fn handle(&mut self, event: FormEvent) -> CocoscaffResult<()> {
        match event {
            FormEvent::FieldChanged { field, value } => self.on_field_changed(field, value),
            FormEvent::Submit => self.on_submit(),
            FormEvent::Cancel => self.on_cancel(),
        }
    }

    // ── Event handlers ───────────────────────────────────────────────────────

    fn on_field_changed(&mut self, field: FieldName, value: String) -> CocoscaffResult<()> {
        match self.state.status() {
            FormStatus::Editing | FormStatus::Failed(FailureKind::Precondition) => {}
            status if status.is_terminal() => return Err(ApplicationError::FormClosed.into()),
            status => {
                return Err(ApplicationError::SubmitRefused {
                    state: status.to_string(),
                }
                .into());
            }
        }

        self.state.set_status(FormStatus::Validating);
        self.state.set_value(field, value);
        self.revalidate(field);
        // The project name is checked as a child of the parent folder.
        if field == FieldName::ParentFolder {
            self.revalidate(FieldName::ProjectName);
        }
        self.state.set_status(FormStatus::Editing);
        Ok(())
    }

    #[instrument(skip_all, fields(project = %self.state.value(FieldName::ProjectName)))]
    fn on_submit(&mut self) -> CocoscaffResult<()> {
        let status = self.state.status();
        if !matches!(
            status,
            FormStatus::Editing | FormStatus::Failed(FailureKind::Precondition)
        ) {
            warn!(%status, "Submit refused");
            self.state
                .push(MessageLevel::Error, format!("Cannot submit while {status}."));
            return Err(ApplicationError::SubmitRefused {
                state: status.to_string(),
            }
            .into());
        }

        let rejected = self.state.rejected();
        if !rejected.is_empty() {
            for (field, reason) in &rejected {
                self.state.show_error(*field, reason.clone());
                self.state
                    .push(MessageLevel::Error, format!("{}: {reason}", field.label()));
            }
            return Err(DomainError::RejectedFields {
                rejected: rejected
                    .into_iter()
                    .map(|(f, r)| format!("{f}: {r}"))
                    .collect(),
            }
            .into());
        }

        let params =
            ProjectParameters::from_outcomes(self.state.values().clone(), self.state.outcomes())?;

        self.state.set_status(FormStatus::Submitting);
        self.state.mark_submit();
        self.state.push(MessageLevel::Info, "Creating project...");

        let failures = self
            .checker
            .check(&params, &ProbeRef(self.materializer.filesystem()));
        if !failures.is_empty() {
            for failure in &failures {
                self.state.push(MessageLevel::Error, failure.clone());
            }
            self.state
                .set_status(FormStatus::Failed(FailureKind::Precondition));
            info!(failures = failures.len(), "Preconditions failed");
            return Ok(());
        }

        self.state.set_status(FormStatus::Materializing);
        self.run(&params);
        Ok(())
    }

    fn on_cancel(&mut self) -> CocoscaffResult<()> {
        if self.state.status().is_terminal() {
            return Err(ApplicationError::FormClosed.into());
        }
        self.state.set_status(FormStatus::Cancelled);
        self.state.push(MessageLevel::Info, "Cancelled.");
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn run(&mut self, params: &ProjectParameters) {
        let template_root = self.checker.template_root().to_path_buf();
        let target = params.target_path();
        let state = &mut self.state;

        let run = self.materializer.materialize_observed(
            &template_root,
            &target,
            params,
            &mut |progress| match progress {
                Progress::TargetCreated(path) => state.push(
                    MessageLevel::Info,
                    format!("Created folder {}.", path.display()),
                ),
                Progress::Entry(outcome) => {
                    let (level, text) = describe(outcome, &target);
                    state.push(level, text);
                }
            },
        );

        match run {
            Err(e) => {
                self.state.push(MessageLevel::Error, e.to_string());
                self.state.set_status(FormStatus::Failed(FailureKind::Setup));
            }
            Ok(result) if result.is_success() => {
                self.state
                    .push(MessageLevel::Success, "Project created successfully.");
                self.state.set_status(FormStatus::Done);
                self.state.set_result(result);
            }
            Ok(result) => {
                self.state.push(
                    MessageLevel::Error,
                    format!(
                        "Project created with errors: {} of {} entries failed.",
                        result.failed_count(),
                        result.outcomes.len()
                    ),
                );
                self.state
                    .set_status(FormStatus::Failed(FailureKind::Partial));
                self.state.set_result(result);
            }
        }
    }

    fn validate(&self, field: FieldName) -> Outcome {
        let probe = ProbeRef(self.materializer.filesystem());
        let parent = self.state.value(FieldName::ParentFolder);
        self.schema
            .validate_field(field, self.state.value(field), parent, RuleContext::new(&probe))
            .unwrap_or_else(|e| Outcome::Rejected {
                reasons: vec![e.to_string()],
            })
    }

    /// Validate `field` again and log the reason if a new one is shown.
    fn revalidate(&mut self, field: FieldName) {
        let outcome = self.validate(field);
        let before = self.state.shown_error(field).map(str::to_owned);
        self.state.set_outcome(field, outcome);
        let shown = self.state.shown_error(field).map(str::to_owned);
        if let Some(reason) = shown.filter(|r| before.as_ref() != Some(r)) {
            self.state
                .push(MessageLevel::Error, format!("{}: {reason}", field.label()));
        }
    }
}

fn describe(outcome: &EntryOutcome, target: &Path) -> (MessageLevel, String) {
    match outcome {
        EntryOutcome::Rendered { path } => (
            MessageLevel::Info,
            format!("Generated {} to {}", path.file_name(), target.display()),
        ),
        EntryOutcome::Copied { path } => (
            MessageLevel::Info,
            format!("Copied {} to {}", path.file_name(), target.display()),
        ),
        EntryOutcome::Failed { path, reason } => (
            MessageLevel::Error,
            format!("Failed to create {}: {reason}", path.file_name()),
        ),
    }
}
