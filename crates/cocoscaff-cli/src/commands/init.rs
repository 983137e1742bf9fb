//! `cocoscaff init`: write a configuration file with the built-in defaults.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path()
    };

    output.info(&format!("Writing default configuration to {}", path.display()))?;
    write_default(&path, args.force)?;
    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

fn write_default(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput {
            message: format!(
                "config already exists at {} (use --force to overwrite)",
                path.display()
            ),
        });
    }

    let toml = toml::to_string_pretty(&AppConfig::default())
        .with_cli_context(|| "failed to serialise default config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, toml).with_cli_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "config file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_file_loads_back_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default(&path, false).unwrap();
        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.defaults, AppConfig::default().defaults);
    }

    #[test]
    fn existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let err = write_default(&path, false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[defaults]"));
    }
}
