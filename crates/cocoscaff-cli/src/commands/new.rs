//! Implementation of the `cocoscaff new` command.
//!
//! Responsibility: open the form with configured defaults, feed it flag
//! values and (unless `--yes`) terminal answers, then report the transcript
//! and translate the final form status into an exit code. Validation and
//! materialization live in the core crate.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use cocoscaff_adapters::{LocalFilesystem, PlaceholderRenderer, builtin_templates};
use cocoscaff_core::{
    application::{
        FailureKind, FormController, FormEvent, FormStatus, MaterializeService, MessageLevel,
        TranscriptEntry,
    },
    domain::{FieldName, HdlLanguage, MaterializationResult},
    error::CocoscaffError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::prompt;

/// Execute the `cocoscaff new` command.
///
/// 1. Build the form from configuration defaults
/// 2. Queue one `FieldChanged` per flag given
/// 3. Submit right away (`--yes`) or run the interactive prompts
/// 4. Print the transcript (or a JSON report)
/// 5. Map the final status to a [`CliResult`]
#[instrument(skip_all, fields(yes = args.yes))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut form = open_form(&args, &config)?;
    for event in flag_events(&args) {
        form.dispatch(event);
    }
    form.process();

    let mut printer = TranscriptPrinter::default();
    if args.yes {
        form.dispatch(FormEvent::Submit);
        let spinner = output.spinner("Creating project...");
        form.process();
        spinner.finish_and_clear();
    } else {
        interact(&mut form, &output, &mut printer)?;
    }

    if output.is_json() {
        output.json(&NewReport::from_form(&form))?;
    } else {
        printer.flush(&form, &output)?;
    }

    let result = conclude(&form);
    if result.is_ok() && !global.quiet && !output.is_json() {
        next_steps(&form, &output)?;
    }
    result
}

fn open_form(args: &NewArgs, config: &AppConfig) -> CliResult<FormController> {
    let schema = config.schema().map_err(CocoscaffError::from)?;
    let filesystem = LocalFilesystem::new();
    let template_root = args.template_dir.clone().unwrap_or_else(|| {
        builtin_templates::resolve_source_dir(&filesystem, &config.templates.source_dir)
    });
    debug!(template = %template_root.display(), "Template source resolved");

    let service = MaterializeService::new(Box::new(filesystem), Box::new(PlaceholderRenderer))
        .with_substitutable(config.substitution_list());
    Ok(FormController::open(schema, template_root, service))
}

/// One event per flag, in form display order.
fn flag_events(args: &NewArgs) -> Vec<FormEvent> {
    let language = args.language.map(|l| HdlLanguage::from(l).as_str().to_string());
    let waves = args.no_waves.then(|| "0".to_string());

    let given = [
        (FieldName::ProjectName, args.name.clone()),
        (FieldName::ParentFolder, args.parent.clone()),
        (FieldName::DutFile, args.dut_file.clone()),
        (FieldName::TestProc, args.test_proc.clone()),
        (FieldName::DutModule, args.dut_module.clone()),
        (FieldName::ToplevelLang, language),
        (FieldName::CompileArgs, args.compile_args.clone()),
        (FieldName::Simulator, args.simulator.clone()),
        (FieldName::SimArgs, args.sim_args.clone()),
        (FieldName::Waves, waves),
    ];

    given
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| FormEvent::FieldChanged { field, value }))
        .collect()
}

#[cfg(feature = "interactive")]
fn interact(
    form: &mut FormController,
    output: &OutputManager,
    printer: &mut TranscriptPrinter,
) -> CliResult<()> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "standard input is not a terminal; pass --yes with field flags".into(),
        });
    }
    output.header("New cocotb project")?;
    let mut prompter = prompt::DialoguerPrompter::new(output.supports_color());
    prompt::drive(form, &mut prompter, &mut |form| {
        if output.is_json() {
            Ok(())
        } else {
            Ok(printer.flush(form, output)?)
        }
    })
}

#[cfg(not(feature = "interactive"))]
fn interact(
    _form: &mut FormController,
    _output: &OutputManager,
    _printer: &mut TranscriptPrinter,
) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Translate the final form status into the command result.
fn conclude(form: &FormController) -> CliResult<()> {
    let state = form.state();
    match state.status() {
        FormStatus::Done => {
            info!(path = ?state.result().map(|r| &r.target), "Project created");
            Ok(())
        }
        FormStatus::Cancelled => Err(CliError::Cancelled),
        FormStatus::Failed(FailureKind::Precondition) => Err(CliError::PreconditionsFailed {
            reasons: errors_since_submit(form),
        }),
        FormStatus::Failed(FailureKind::Setup) => Err(CliError::SetupFailed {
            message: errors_since_submit(form).join(" "),
        }),
        FormStatus::Failed(FailureKind::Partial) => match state.result() {
            Some(result) => Err(CliError::PartialMaterialization {
                target: result.target.clone(),
                failed: result.failed_count(),
                total: result.outcomes.len(),
            }),
            None => Err(CliError::SetupFailed {
                message: "run ended without a result".into(),
            }),
        },
        FormStatus::Editing | FormStatus::Validating => Err(CliError::FormRejected {
            reasons: state
                .rejected()
                .into_iter()
                .map(|(field, reason)| format!("{field}: {reason}"))
                .collect(),
        }),
        status @ (FormStatus::Submitting | FormStatus::Materializing) => {
            Err(CliError::SetupFailed {
                message: format!("form stopped while {status}"),
            })
        }
    }
}

/// Error lines logged by the latest submit attempt.
fn errors_since_submit(form: &FormController) -> Vec<String> {
    form.state()
        .since_submit()
        .iter()
        .filter(|e| e.level == MessageLevel::Error)
        .map(|e| e.text.clone())
        .collect()
}

fn next_steps(form: &FormController, output: &OutputManager) -> CliResult<()> {
    if let Some(result) = form.state().result() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", result.target.display()))?;
        output.print("  make")?;
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Prints transcript lines not printed yet.
#[derive(Debug, Default)]
struct TranscriptPrinter {
    printed: usize,
}

impl TranscriptPrinter {
    fn flush(&mut self, form: &FormController, output: &OutputManager) -> std::io::Result<()> {
        let transcript = form.state().transcript();
        for entry in transcript.iter().skip(self.printed) {
            output.transcript(entry)?;
        }
        self.printed = transcript.len();
        Ok(())
    }
}

/// `--output-format json` document.
#[derive(Debug, Serialize)]
struct NewReport<'a> {
    timestamp: DateTime<Utc>,
    status: FormStatus,
    target: PathBuf,
    values: &'a std::collections::BTreeMap<FieldName, String>,
    result: Option<&'a MaterializationResult>,
    transcript: &'a [TranscriptEntry],
}

impl<'a> NewReport<'a> {
    fn from_form(form: &'a FormController) -> Self {
        let state = form.state();
        let target = PathBuf::from(state.value(FieldName::ParentFolder))
            .join(state.value(FieldName::ProjectName));
        Self {
            timestamp: Utc::now(),
            status: state.status(),
            target,
            values: state.values(),
            result: state.result(),
            transcript: state.transcript(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
