//! `cocoscaff config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised = toml::to_string_pretty(&config)
                .with_cli_context(|| "failed to serialise config")?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let d = &config.defaults;
    let value = match key {
        "defaults.parent_folder" => d.parent_folder.clone(),
        "defaults.dut_file" => d.dut_file.clone(),
        "defaults.test_proc" => d.test_proc.clone(),
        "defaults.dut_module" => d.dut_module.clone(),
        "defaults.language" => d.language.clone(),
        "defaults.simulator" => d.simulator.clone(),
        "defaults.waves" => d.waves.to_string(),
        "defaults.compile_args" => d.compile_args.clone(),
        "defaults.sim_args" => d.sim_args.clone(),
        "output.no_color" => config.output.no_color.to_string(),
        "output.format" => config.output.format.clone(),
        "templates.source_dir" => config.templates.source_dir.display().to_string(),
        "templates.substitutable" => config.templates.substitutable.join(","),
        _ => {
            return Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            });
        }
    };
    Ok(value)
}

// ── tests ─────────────────────────────────────────────────────────────────────
