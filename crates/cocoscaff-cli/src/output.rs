//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use cocoscaff_core::application::{MessageLevel, TranscriptEntry};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = if args.output_format == OutputFormat::Auto {
            configured_format(&config.output.format)
        } else {
            args.output_format
        };
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Plain line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.mark(Mark::Success, msg)
    }

    /// `✗ <msg>` in red. Printed in quiet mode too.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.mark(Mark::Error, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.mark(Mark::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.mark(Mark::Info, msg)
    }

    /// Bold cyan section title.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// One line of the form transcript, styled by level.
    pub fn transcript(&self, entry: &TranscriptEntry) -> io::Result<()> {
        match entry.level {
            MessageLevel::Info => self.print(&entry.text),
            MessageLevel::Error => self.error(&entry.text),
            MessageLevel::Success => self.success(&entry.text),
        }
    }

    /// Pretty JSON on stdout. Written even in quiet mode so pipes stay
    /// parseable.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Spinner on stderr for human output; hidden otherwise.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn mark(&self, mark: Mark, msg: &str) -> io::Result<()> {
        if self.quiet && !matches!(mark, Mark::Error) {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{} {msg}", mark.symbol())
        } else {
            mark.paint(mark.symbol(), msg)
        };
        self.term.write_line(&line)
    }
}

#[derive(Clone, Copy)]
enum Mark {
    Success,
    Error,
    Warning,
    Info,
}

impl Mark {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Error => "\u{2717}",   // ✗
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }

    fn paint(self, symbol: &str, msg: &str) -> String {
        match self {
            Self::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Self::Error => format!("{} {}", symbol.red().bold(), msg.red()),
            Self::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Self::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
        }
    }
}

fn configured_format(value: &str) -> OutputFormat {
    match value.to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
