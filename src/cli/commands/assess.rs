//! Assess command: record follow-up plans for analyzed risks.

use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use super::{audit_event, level_colored, open_registry};
use crate::cli::args::{AssessAction, OutputFormat};
use crate::config::Config;
use crate::model::NewRiskAssessment;
use crate::scoring::RiskLevel;

/// Execute the `assess` subcommand (add, update, list, remove).
pub fn cmd_assess(
    action: AssessAction,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let (registry, audit) = open_registry(config, data_dir)?;

    match action {
        AssessAction::Add {
            analysis,
            response,
            existing_controls,
            action_plan,
            owner,
            target_date,
            output_indicator,
            expected_likelihood,
            expected_impact,
        } => {
            let record = registry.add_assessment(NewRiskAssessment {
                analysis_id: analysis,
                response,
                existing_controls,
                action_plan,
                owner,
                target_date,
                output_indicator,
                expected_likelihood,
                expected_impact,
            })?;
            audit_event(&audit, "assessment.created", &record.id);

            let residual = RiskLevel::from_score(record.expected_score);
            println!("{} Assessment recorded: {}", "+".green().bold(), record.id);
            println!(
                "  Response: {}, target: {}",
                record.response.bold(),
                record.target_date
            );
            println!(
                "  Expected residual score {} ({})",
                record.expected_score.to_string().bold(),
                level_colored(residual)
            );
            Ok(ExitCode::SUCCESS)
        }

        AssessAction::Update {
            id,
            analysis,
            response,
            existing_controls,
            action_plan,
            owner,
            target_date,
            output_indicator,
            expected_likelihood,
            expected_impact,
        } => {
            let Some(existing) = registry.assessments.get(&id)? else {
                println!("No assessment with id: {}", id);
                return Ok(ExitCode::FAILURE);
            };
            // Omitted flags keep the stored values; the residual score is
            // always recomputed.
            let record = registry.update_assessment(
                &id,
                NewRiskAssessment {
                    analysis_id: analysis.unwrap_or(existing.analysis_id),
                    response: response.unwrap_or(existing.response),
                    existing_controls: existing_controls.or(existing.existing_controls),
                    action_plan: action_plan.or(existing.action_plan),
                    owner: owner.unwrap_or(existing.owner),
                    target_date: target_date.unwrap_or(existing.target_date),
                    output_indicator: output_indicator.or(existing.output_indicator),
                    expected_likelihood: expected_likelihood
                        .unwrap_or(existing.expected_likelihood),
                    expected_impact: expected_impact.unwrap_or(existing.expected_impact),
                },
            )?;
            audit_event(&audit, "assessment.updated", &record.id);

            let residual = RiskLevel::from_score(record.expected_score);
            println!("{} Assessment updated: {}", "~".yellow().bold(), record.id);
            println!(
                "  Response: {}, target: {}",
                record.response.bold(),
                record.target_date
            );
            println!(
                "  Expected residual score {} ({})",
                record.expected_score.to_string().bold(),
                level_colored(residual)
            );
            Ok(ExitCode::SUCCESS)
        }

        AssessAction::List { context, format } => {
            let records = registry.assessments_in(context.as_deref())?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                OutputFormat::Text => {
                    if records.is_empty() {
                        println!("No assessments recorded.");
                    } else {
                        for r in &records {
                            println!(
                                "{}  {} by {} before {} (residual score {})",
                                r.id,
                                r.response.bold(),
                                r.owner,
                                r.target_date,
                                r.expected_score
                            );
                        }
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        AssessAction::Remove { id } => {
            if registry.remove_assessment(&id)? {
                audit_event(&audit, "assessment.removed", &id);
                println!("{} Assessment removed: {}", "-".red().bold(), id);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("No assessment with id: {}", id);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
