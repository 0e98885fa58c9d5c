//! Priority command: rank analyzed risks by score.

use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use super::{level_colored, open_registry};
use crate::cli::args::{LevelArg, OutputFormat};
use crate::config::Config;
use crate::report::priority_ranking;

/// Execute the `priority` command.
pub fn cmd_priority(
    context: Option<String>,
    level: Option<LevelArg>,
    format: OutputFormat,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let (registry, _audit) = open_registry(config, data_dir)?;

    let ranking = priority_ranking(&registry, context.as_deref(), level.map(Into::into))?;
    debug!(rows = ranking.len(), "Priority ranking built");

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ranking)?);
        }
        OutputFormat::Text => {
            if ranking.is_empty() {
                println!("No analyzed risks to rank.");
            } else {
                println!(
                    "{:<5} {:<8} {:<6} {:<14} Description",
                    "Rank", "Code", "Score", "Level"
                );
                for entry in &ranking {
                    println!(
                        "{:<5} {:<8} {:<6} {:<14} {}",
                        entry.rank,
                        entry.code.bold(),
                        entry.score,
                        level_colored(entry.level),
                        entry.description
                    );
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
