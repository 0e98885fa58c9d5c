//! Analyze command: score risks and manage analysis records.

use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, info_span};

use super::{audit_event, level_colored, open_registry};
use crate::cli::args::{AnalyzeAction, OutputFormat};
use crate::config::Config;
use crate::model::{NewRiskAnalysis, RiskControl};
use crate::scoring::RiskLevel;

/// Execute the `analyze` subcommand (add, update, list, remove).
pub fn cmd_analyze(
    action: AnalyzeAction,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let (registry, audit) = open_registry(config, data_dir)?;

    match action {
        AnalyzeAction::Add {
            identification,
            likelihood,
            impact,
            control,
            verdict,
        } => {
            let _span = info_span!("analyze", identification = %identification).entered();
            let record = registry.add_analysis(NewRiskAnalysis {
                identification_id: identification,
                likelihood,
                impact,
                control: RiskControl {
                    description: control,
                    verdict: verdict.into(),
                },
            })?;
            audit_event(&audit, "analysis.created", &record.id);

            let level = RiskLevel::from_score(record.score);
            info!(
                analysis_id = %record.id,
                score = record.score,
                level = %level,
                "Analysis stored"
            );
            println!("{} Analysis recorded: {}", "+".green().bold(), record.id);
            println!(
                "  Likelihood {} x Impact {} -> Score {} ({})",
                record.likelihood,
                record.impact,
                record.score.to_string().bold(),
                level_colored(level)
            );
            println!("  {}", level.description());
            Ok(ExitCode::SUCCESS)
        }

        AnalyzeAction::Update {
            id,
            identification,
            likelihood,
            impact,
            control,
            verdict,
        } => {
            let Some(existing) = registry.analyses.get(&id)? else {
                println!("No analysis with id: {}", id);
                return Ok(ExitCode::FAILURE);
            };
            // Omitted flags keep the stored values; the score is always
            // re-stamped from the configured policy.
            let record = registry.update_analysis(
                &id,
                NewRiskAnalysis {
                    identification_id: identification.unwrap_or(existing.identification_id),
                    likelihood: likelihood.unwrap_or(existing.likelihood),
                    impact: impact.unwrap_or(existing.impact),
                    control: RiskControl {
                        description: control.unwrap_or(existing.control.description),
                        verdict: verdict.map(Into::into).unwrap_or(existing.control.verdict),
                    },
                },
            )?;
            audit_event(&audit, "analysis.updated", &record.id);

            let level = RiskLevel::from_score(record.score);
            info!(
                analysis_id = %record.id,
                score = record.score,
                level = %level,
                "Analysis revised"
            );
            println!("{} Analysis updated: {}", "~".yellow().bold(), record.id);
            println!(
                "  Likelihood {} x Impact {} -> Score {} ({})",
                record.likelihood,
                record.impact,
                record.score.to_string().bold(),
                level_colored(level)
            );
            Ok(ExitCode::SUCCESS)
        }

        AnalyzeAction::List { context, format } => {
            let records = registry.analyses_in(context.as_deref())?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                OutputFormat::Text => {
                    if records.is_empty() {
                        println!("No analyses recorded.");
                    } else {
                        for r in &records {
                            let level = RiskLevel::from_score(r.score);
                            println!(
                                "{}  L={} I={} score={}  {}",
                                r.id,
                                r.likelihood,
                                r.impact,
                                r.score,
                                level_colored(level)
                            );
                        }
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        AnalyzeAction::Remove { id } => {
            if registry.remove_analysis(&id)? {
                audit_event(&audit, "analysis.removed", &id);
                println!("{} Analysis removed: {}", "-".red().bold(), id);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("No analysis with id: {}", id);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
