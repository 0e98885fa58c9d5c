//! Config command: initialize and display riskledger configuration.

use anyhow::Context as _;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::args::ConfigAction;
use crate::config::Config;

/// Execute the `config` subcommand (init, show).
///
/// Both actions work on the effective settings for this run: the loaded
/// config with the global `--data-dir` flag folded in, so `config init`
/// writes the directory the run actually used.
pub fn cmd_config(
    action: ConfigAction,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let mut effective = config.clone();
    if let Some(dir) = data_dir {
        effective.storage.data_dir = Some(dir);
    }

    match action {
        ConfigAction::Init { path } => {
            let config_path = path.unwrap_or_else(Config::default_config_path);

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }

            let toml = effective.to_toml().context("Failed to serialize config")?;
            std::fs::write(&config_path, toml).with_context(|| {
                format!("Failed to write config file '{}'", config_path.display())
            })?;

            debug!(path = %config_path.display(), "Config file written");
            println!("Created config at: {}", config_path.display());
            println!("  data dir: {}", effective.storage.data_dir().display());
            println!("  scoring policy: {}", effective.scoring.policy.as_str());
            Ok(ExitCode::SUCCESS)
        }
        ConfigAction::Show => {
            let config_path = Config::default_config_path();
            if config_path.exists() {
                println!("# {}", config_path.display());
            } else {
                println!("# No config file at: {}", config_path.display());
                println!(
                    "# Run '{}' to create one; showing defaults.",
                    "riskledger config init".bold()
                );
            }
            print!(
                "{}",
                effective.to_toml().context("Failed to serialize config")?
            );
            println!("# effective data dir: {}", effective.storage.data_dir().display());
            debug!("Config displayed");
            Ok(ExitCode::SUCCESS)
        }
    }
}
