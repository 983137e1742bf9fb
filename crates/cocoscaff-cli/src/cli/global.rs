//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log level: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "Log level written to stderr:
    (none)  - warnings and errors
    -v      - info: submit, target creation, each template entry
    -vv     - debug: validation results, template resolution
    -vvv    - trace"
    )]
    pub verbose: u8,

    /// Only errors are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Also honoured through `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Read settings from this file instead of the user and local config.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Copy of the log, never coloured.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "PATH",
        help = "Append log output to a file"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format (json prints a machine-readable report)"
    )]
    pub output_format: OutputFormat,
}

/// How command output is rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from config, else human on a terminal and plain
    /// when piped.
    #[default]
    Auto,
    /// Coloured, with a spinner while the project is created.
    Human,
    /// No colour, no spinner.
    Plain,
    Json,
}
