//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use cocoscaff_core::domain::HdlLanguage;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cocoscaff",
    bin_name = "cocoscaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold cocotb testbench projects",
    long_about = "cocoscaff asks for a project name, DUT file, test procedure, \
                  HDL language and simulator, then instantiates a cocotb \
                  template folder with those values.",
    after_help = "EXAMPLES:\n\
        \x20 cocoscaff new\n\
        \x20 cocoscaff new --yes --name adder_tb --parent /tmp/work --simulator verilator\n\
        \x20 cocoscaff template install\n\
        \x20 cocoscaff completions bash > /usr/share/bash-completion/completions/cocoscaff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new cocotb project.
    #[command(
        visible_alias = "n",
        about = "Create a new cocotb project",
        after_help = "Without --yes the form is filled in interactively; flags \
            pre-fill the prompts.\n\n\
            EXAMPLES:\n\
            \x20 cocoscaff new\n\
            \x20 cocoscaff new --yes --name adder_tb --parent . --dut-file adder.sv\n\
            \x20 cocoscaff new --yes --name fir_tb --lang vhdl --dut-file fir.vhdl --simulator ghdl"
    )]
    New(NewArgs),

    /// List supported simulators and HDL languages.
    #[command(
        visible_alias = "sims",
        about = "List supported simulators and HDL languages",
        after_help = "EXAMPLES:\n\
            \x20 cocoscaff simulators\n\
            \x20 cocoscaff simulators --format json"
    )]
    Simulators(SimulatorsArgs),

    /// Manage the cocotb template source folder.
    #[command(
        about = "Template source management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cocoscaff template install\n\
            \x20 cocoscaff template install ./my_template --force\n\
            \x20 cocoscaff template show"
    )]
    Template(TemplateCommands),

    /// Initialise a cocoscaff configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cocoscaff init           # user config location\n\
            \x20 cocoscaff init --local   # .cocoscaff.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cocoscaff completions bash > ~/.local/share/bash-completion/completions/cocoscaff\n\
            \x20 cocoscaff completions zsh  > ~/.zfunc/_cocoscaff\n\
            \x20 cocoscaff completions fish > ~/.config/fish/completions/cocoscaff.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the cocoscaff configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cocoscaff config get defaults.simulator\n\
            \x20 cocoscaff config list\n\
            \x20 cocoscaff config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `cocoscaff new`.
///
/// Every field flag is optional; unset fields fall back to the configured
/// defaults. Values are checked by the form, not by clap, so a bad value
/// produces the same message in both modes.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Project folder name, created under the parent folder.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Existing folder the project is created in.
    #[arg(short = 'p', long = "parent", value_name = "DIR")]
    pub parent: Option<String>,

    /// HDL source file of the device under test (.v, .sv or .vhdl).
    #[arg(long = "dut-file", value_name = "FILE")]
    pub dut_file: Option<String>,

    /// Name of the generated cocotb test coroutine.
    #[arg(long = "test-proc", value_name = "NAME")]
    pub test_proc: Option<String>,

    /// Top-level HDL module name.
    #[arg(long = "dut-module", value_name = "NAME")]
    pub dut_module: Option<String>,

    /// Top-level HDL language.
    #[arg(short = 'l', long = "lang", value_name = "LANGUAGE", value_enum)]
    pub language: Option<HdlArg>,

    /// Simulator written into the Makefile (see `cocoscaff simulators`).
    #[arg(short = 's', long = "simulator", value_name = "SIM")]
    pub simulator: Option<String>,

    /// Extra simulator compile arguments.
    #[arg(long = "compile-args", value_name = "ARGS", allow_hyphen_values = true)]
    pub compile_args: Option<String>,

    /// Extra simulator run-time arguments.
    #[arg(long = "sim-args", value_name = "ARGS", allow_hyphen_values = true)]
    pub sim_args: Option<String>,

    /// Disable waveform dumping.
    #[arg(long = "no-waves")]
    pub no_waves: bool,

    /// Template source folder (overrides `templates.source_dir`).
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Submit immediately without prompting.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip the prompts and create immediately"
    )]
    pub yes: bool,
}

/// HDL language as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HdlArg {
    /// Verilog or SystemVerilog.
    #[value(aliases = ["sv", "systemverilog"])]
    Verilog,
    Vhdl,
}

impl From<HdlArg> for HdlLanguage {
    fn from(arg: HdlArg) -> Self {
        match arg {
            HdlArg::Verilog => HdlLanguage::Verilog,
            HdlArg::Vhdl => HdlLanguage::Vhdl,
        }
    }
}

// ── simulators ────────────────────────────────────────────────────────────────

/// Arguments for `cocoscaff simulators`.
#[derive(Debug, Args)]
pub struct SimulatorsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `simulators` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON object.
    Json,
}

// ── template ──────────────────────────────────────────────────────────────────

/// Subcommands for `cocoscaff template`.
#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// Write the built-in cocotb template to a folder.
    Install {
        /// Destination (default: `templates.source_dir`).
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Write into an existing folder, replacing same-named files.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// List the template entries and how each is instantiated.
    Show {
        /// Template folder (default: `templates.source_dir`).
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cocoscaff init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.cocoscaff.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cocoscaff completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cocoscaff config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.simulator`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_flag_mode_new() {
        let cli = Cli::parse_from([
            "cocoscaff",
            "new",
            "--yes",
            "--name",
            "adder_tb",
            "--parent",
            "/tmp/work",
            "--simulator",
            "verilator",
            "--no-waves",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert!(args.yes);
        assert!(args.no_waves);
        assert_eq!(args.name.as_deref(), Some("adder_tb"));
        assert_eq!(args.simulator.as_deref(), Some("verilator"));
        assert_eq!(args.language, None);
    }

    #[test]
    fn systemverilog_alias() {
        let cli = Cli::parse_from(["cocoscaff", "new", "-l", "sv"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.language, Some(HdlArg::Verilog));
        assert_eq!(HdlLanguage::from(HdlArg::Vhdl), HdlLanguage::Vhdl);
    }

    #[test]
    fn compile_args_accept_leading_dash() {
        let cli = Cli::parse_from(["cocoscaff", "new", "--compile-args", "-g2012"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.compile_args.as_deref(), Some("-g2012"));
    }

    #[test]
    fn template_install_takes_optional_dir() {
        let cli = Cli::parse_from(["cocoscaff", "template", "install", "./t", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Template(TemplateCommands::Install { dir: Some(_), force: true })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["cocoscaff", "--quiet", "--verbose", "simulators"]);
        assert!(result.is_err());
    }
}
