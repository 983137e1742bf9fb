//! Interactive form loop.
//!
//! [`drive`] walks the fields in display order, feeds each answer to the
//! form as a `FieldChanged` event and re-asks while the field is rejected.
//! The terminal side is behind the [`Prompter`] trait; [`DialoguerPrompter`]
//! is the real one.

use tracing::debug;

use cocoscaff_core::{
    application::{FailureKind, FormController, FormEvent, FormStatus},
    domain::{FieldName, HdlLanguage, Simulator},
};

use crate::error::CliResult;

/// What to do once every field has an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Edit,
    Cancel,
}

/// Question-asking surface used by [`drive`].
pub trait Prompter {
    /// Free-text field. `error` is the reason the current value was rejected.
    fn text(&mut self, field: FieldName, current: &str, error: Option<&str>) -> CliResult<String>;

    /// Pick one of `options`; returns its index.
    fn choose(&mut self, field: FieldName, options: &[&str], current: usize) -> CliResult<usize>;

    fn flag(&mut self, field: FieldName, current: bool) -> CliResult<bool>;

    fn action(&mut self) -> CliResult<Action>;
}

/// Run the form until it is submitted successfully, fails for good or is
/// cancelled. `show` is called after every step so new transcript lines can
/// be printed.
pub fn drive(
    form: &mut FormController,
    prompter: &mut dyn Prompter,
    show: &mut dyn FnMut(&FormController) -> CliResult<()>,
) -> CliResult<()> {
    loop {
        for field in FieldName::ALL {
            ask(form, prompter, field)?;
        }

        match prompter.action()? {
            Action::Edit => continue,
            Action::Cancel => {
                form.dispatch(FormEvent::Cancel);
                form.process();
                show(form)?;
                return Ok(());
            }
            Action::Create => {
                form.dispatch(FormEvent::Submit);
                let status = form.process();
                show(form)?;
                match status {
                    FormStatus::Editing | FormStatus::Failed(FailureKind::Precondition) => {
                        debug!(%status, "Submit did not complete, back to editing");
                    }
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn ask(form: &mut FormController, prompter: &mut dyn Prompter, field: FieldName) -> CliResult<()> {
    loop {
        let current = form.state().value(field).to_string();
        let value = match field {
            FieldName::ToplevelLang => {
                let labels = HdlLanguage::ALL.map(|l| l.label());
                let at = HdlLanguage::ALL
                    .iter()
                    .position(|l| l.as_str() == current)
                    .unwrap_or(0);
                let picked = prompter.choose(field, &labels, at)?;
                HdlLanguage::ALL
                    .get(picked)
                    .map_or(current, |l| l.as_str().to_string())
            }
            FieldName::Simulator => {
                let names = Simulator::ALL.map(|s| s.as_str());
                let at = names.iter().position(|s| *s == current).unwrap_or(0);
                let picked = prompter.choose(field, &names, at)?;
                names.get(picked).map_or(current, |s| s.to_string())
            }
            FieldName::Waves => {
                let on = prompter.flag(field, current != "0")?;
                if on { "1" } else { "0" }.to_string()
            }
            _ => {
                let error = form.state().shown_error(field).map(str::to_owned);
                prompter.text(field, &current, error.as_deref())?
            }
        };

        form.dispatch(FormEvent::FieldChanged { field, value });
        form.process();
        if form.state().shown_error(field).is_none() {
            return Ok(());
        }
    }
}

// ── dialoguer ─────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub use terminal::DialoguerPrompter;

#[cfg(feature = "interactive")]
mod terminal {
    use console::Term;
    use dialoguer::{
        Confirm, Input, Select,
        theme::{ColorfulTheme, SimpleTheme, Theme},
    };

    use super::{Action, Prompter};
    use crate::error::{CliError, CliResult};
    use cocoscaff_core::domain::FieldName;

    /// Prompts on the controlling terminal.
    pub struct DialoguerPrompter {
        theme: Box<dyn Theme>,
        term: Term,
    }

    impl DialoguerPrompter {
        /// Without `color` every prompt and inline error is plain text.
        pub fn new(color: bool) -> Self {
            let theme: Box<dyn Theme> = if color {
                Box::new(ColorfulTheme::default())
            } else {
                Box::new(SimpleTheme)
            };
            Self {
                theme,
                term: Term::stderr(),
            }
        }
    }

    impl Prompter for DialoguerPrompter {
        fn text(
            &mut self,
            field: FieldName,
            current: &str,
            error: Option<&str>,
        ) -> CliResult<String> {
            if let Some(error) = error {
                self.term
                    .write_line(&error_line(self.theme.as_ref(), error))
                    .map_err(|source| CliError::IoError {
                        message: "terminal prompt failed".into(),
                        source,
                    })?;
            }
            let mut input = Input::<String>::with_theme(self.theme.as_ref())
                .with_prompt(field.label())
                .allow_empty(true);
            if !current.is_empty() {
                input = input.with_initial_text(current);
            }
            input.interact_text().map_err(prompt_error)
        }

        fn choose(
            &mut self,
            field: FieldName,
            options: &[&str],
            current: usize,
        ) -> CliResult<usize> {
            Select::with_theme(self.theme.as_ref())
                .with_prompt(field.label())
                .items(options)
                .default(current)
                .interact()
                .map_err(prompt_error)
        }

        fn flag(&mut self, field: FieldName, current: bool) -> CliResult<bool> {
            Confirm::with_theme(self.theme.as_ref())
                .with_prompt(field.label())
                .default(current)
                .interact()
                .map_err(prompt_error)
        }

        fn action(&mut self) -> CliResult<Action> {
            let picked = Select::with_theme(self.theme.as_ref())
                .with_prompt("Ready")
                .items(&["Create project", "Edit fields", "Cancel"])
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            Ok(match picked {
                0 => Action::Create,
                1 => Action::Edit,
                _ => Action::Cancel,
            })
        }
    }

    /// Inline error styled by `theme`.
    fn error_line(theme: &dyn Theme, error: &str) -> String {
        let mut line = String::new();
        // Writing into a String cannot fail.
        let _ = theme.format_error(&mut line, error);
        line
    }

    fn prompt_error(err: dialoguer::Error) -> CliError {
        let err = std::io::Error::from(err);
        if err.kind() == std::io::ErrorKind::Interrupted {
            CliError::Cancelled
        } else {
            CliError::IoError {
                message: "terminal prompt failed".into(),
                source: err,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn plain_prompter_writes_unstyled_errors() {
            let prompter = DialoguerPrompter::new(false);
            let line = error_line(prompter.theme.as_ref(), "Folder already exists.");
            assert_eq!(line, "error: Folder already exists.");
        }

        #[test]
        fn coloured_prompter_keeps_the_message() {
            let prompter = DialoguerPrompter::new(true);
            let line = error_line(prompter.theme.as_ref(), "Folder already exists.");
            assert!(line.contains("Folder already exists."));
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
