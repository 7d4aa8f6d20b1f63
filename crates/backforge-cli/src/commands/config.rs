//! `backforge config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.data(&get_config_value(&config, &key)?)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    match key {
        "defaults.language" => Ok(opt(&config.defaults.language)),
        "defaults.framework" => Ok(opt(&config.defaults.framework)),
        "defaults.database" => Ok(opt(&config.defaults.database)),
        "defaults.extras" => Ok(config.defaults.extras.join(",")),
        "install.auto_install" => Ok(config.install.auto_install.to_string()),
        "install.command_timeout_secs" => Ok(config
            .install
            .command_timeout_secs
            .map(|s| s.to_string())
            .unwrap_or_default()),
        "templates.dir" => Ok(config
            .templates
            .dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
