//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `COCOSCAFF_` prefix, `__` between sections,
//!    e.g. `COCOSCAFF_DEFAULTS__SIMULATOR=verilator`. A `.env` file in the
//!    working directory is loaded first by `main`.
//! 3. Config file: `--config <FILE>` (must exist), otherwise the user
//!    config file overlaid by `.cocoscaff.toml` in the working directory
//!    (both optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use cocoscaff_adapters::builtin_templates::DEFAULT_DIR_NAME;
use cocoscaff_core::domain::{
    FieldName, FormSchema, HdlLanguage, Simulator, SubstitutionList, template::DEFAULT_SUBSTITUTABLE,
};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".cocoscaff.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial form values.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template source settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Empty means the current working directory.
    pub parent_folder: String,
    pub dut_file: String,
    pub test_proc: String,
    pub dut_module: String,
    pub language: String,
    pub simulator: String,
    pub waves: bool,
    pub compile_args: String,
    pub sim_args: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub source_dir: PathBuf,
    /// File names rendered with placeholders; matched case-insensitively.
    pub substitutable: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                parent_folder: String::new(),
                dut_file: "dut.sv".into(),
                test_proc: "test_proc".into(),
                dut_module: "dut".into(),
                language: HdlLanguage::Verilog.as_str().into(),
                simulator: Simulator::Icarus.as_str().into(),
                waves: true,
                compile_args: String::new(),
                sim_args: String::new(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            templates: TemplateConfig {
                source_dir: PathBuf::from(".").join(DEFAULT_DIR_NAME),
                substitutable: DEFAULT_SUBSTITUTABLE.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration by layering defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            toml::to_string(&Self::default()).context("failed to serialise default config")?;

        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml));

        builder = match config_file {
            Some(path) => builder.add_source(file_source(path).required(true)),
            None => builder
                .add_source(file_source(&Self::config_path()).required(false))
                .add_source(file_source(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("COCOSCAFF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("templates.substitutable"),
        );

        builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cocoscaff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "cocoscaff", "cocoscaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The cocotb form with configured defaults applied.
    ///
    /// Flag values and configured defaults are not validated here; the form
    /// does that when they are entered.
    pub fn schema(&self) -> Result<FormSchema, cocoscaff_core::domain::DomainError> {
        let d = &self.defaults;
        let parent = if d.parent_folder.is_empty() {
            current_dir_string()
        } else {
            d.parent_folder.clone()
        };

        Ok(FormSchema::cocotb()?
            .with_default(FieldName::ParentFolder, parent)
            .with_default(FieldName::DutFile, &d.dut_file)
            .with_default(FieldName::TestProc, &d.test_proc)
            .with_default(FieldName::DutModule, &d.dut_module)
            .with_default(FieldName::ToplevelLang, language_tag(&d.language))
            .with_default(FieldName::Simulator, &d.simulator)
            .with_default(FieldName::CompileArgs, &d.compile_args)
            .with_default(FieldName::SimArgs, &d.sim_args)
            .with_default(FieldName::Waves, if d.waves { "1" } else { "0" }))
    }

    pub fn substitution_list(&self) -> SubstitutionList {
        SubstitutionList::new(self.templates.substitutable.iter().map(String::as_str))
    }
}

fn file_source(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

/// `Verilog/SystemVerilog` and friends become the `verilog` tag; anything
/// unrecognised is passed through so the form reports it.
fn language_tag(configured: &str) -> String {
    configured
        .parse::<HdlLanguage>()
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|_| configured.to_string())
}

fn current_dir_string() -> String {
    std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| ".".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_cocotb_form() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.simulator, "icarus");
        assert_eq!(cfg.defaults.language, "verilog");
        assert!(cfg.defaults.waves);
        assert_eq!(
            cfg.templates.substitutable,
            ["makefile", "dut.sv", "test_proc.py"]
        );
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[defaults]\nsimulator = \"verilator\"\nwaves = false\n\n[templates]\nsource_dir = \"/opt/tpl\""
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.defaults.simulator, "verilator");
        assert!(!cfg.defaults.waves);
        assert_eq!(cfg.defaults.dut_file, "dut.sv");
        assert_eq!(cfg.templates.source_dir, PathBuf::from("/opt/tpl"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/cocoscaff.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn schema_applies_configured_defaults() {
        let mut cfg = AppConfig::default();
        cfg.defaults.parent_folder = "/w".into();
        cfg.defaults.language = "VHDL".into();
        cfg.defaults.waves = false;

        let schema = cfg.schema().unwrap();
        let default_of = |f| schema.get(f).unwrap().default.clone();
        assert_eq!(default_of(FieldName::ParentFolder), "/w");
        assert_eq!(default_of(FieldName::ToplevelLang), "vhdl");
        assert_eq!(default_of(FieldName::Waves), "0");
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
