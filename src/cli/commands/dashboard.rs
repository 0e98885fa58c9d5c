//! Dashboard command: register totals and breakdowns.

use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use super::open_registry;
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::report::summarize;
use crate::scoring::RiskLevel;

/// Execute the `dashboard` command.
pub fn cmd_dashboard(
    context: Option<String>,
    format: OutputFormat,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let (registry, _audit) = open_registry(config, data_dir)?;

    let summary = summarize(&registry, context.as_deref())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("{}", "Risk register".bold());
            println!("  Contexts:        {}", summary.contexts);
            println!("  Identifications: {}", summary.identifications);
            println!("  Analyses:        {}", summary.analyses);
            println!("  Assessments:     {}", summary.assessments);
            println!();
            println!("{}", "Analyses by level".bold());
            println!(
                "  {}: {}",
                RiskLevel::Low.label().green(),
                summary.by_level.low
            );
            println!(
                "  {}: {}",
                RiskLevel::Medium.label().yellow(),
                summary.by_level.medium
            );
            println!(
                "  {}: {}",
                RiskLevel::High.label().truecolor(255, 165, 0),
                summary.by_level.high
            );
            println!(
                "  {}: {}",
                RiskLevel::Critical.label().red().bold(),
                summary.by_level.critical
            );
            println!();
            println!("{}", "Identifications by category".bold());
            let mut categories: Vec<_> = summary.by_category.iter().collect();
            categories.sort();
            for (category, count) in categories {
                println!("  {}: {}", category, count);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
