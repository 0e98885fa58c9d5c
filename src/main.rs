use clap::Parser;
use colored::*;
use riskledger::cli::args::{Cli, ColorMode, Commands};
use riskledger::cli::commands::{
    cmd_analyze, cmd_assess, cmd_config, cmd_context, cmd_dashboard, cmd_identify, cmd_priority,
};
use riskledger::config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    // Initialize structured logging before any command runs.
    // log_level/log_format are consumed here; only command is forwarded.
    if let Err(e) = riskledger::logging::init(cli.log_level.into(), cli.log_format) {
        eprintln!("{}: Failed to initialize logging: {}", "Error".red().bold(), e);
        return ExitCode::FAILURE;
    }

    let config = Config::from_file(&Config::default_config_path()).unwrap_or_default();

    match run(cli.command, &config, cli.data_dir) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config, data_dir: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Context { action } => cmd_context(action, config, data_dir),
        Commands::Identify { action } => cmd_identify(action, config, data_dir),
        Commands::Analyze { action } => cmd_analyze(action, config, data_dir),
        Commands::Assess { action } => cmd_assess(action, config, data_dir),
        Commands::Priority {
            context,
            level,
            format,
        } => cmd_priority(context, level, format, config, data_dir),
        Commands::Dashboard { context, format } => {
            cmd_dashboard(context, format, config, data_dir)
        }
        Commands::Config { action } => cmd_config(action, config, data_dir),
    }
}
