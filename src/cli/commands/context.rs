//! Context command: record and manage risk contexts.

use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use super::{audit_event, open_registry};
use crate::cli::args::{ContextAction, OutputFormat};
use crate::config::Config;
use crate::model::NewRiskContext;

/// Execute the `context` subcommand (add, update, list, show, remove).
pub fn cmd_context(
    action: ContextAction,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let (registry, audit) = open_registry(config, data_dir)?;

    match action {
        ContextAction::Add {
            organization,
            year,
            period,
            data_source,
            assessor,
            objective,
            process,
        } => {
            let record = registry.add_context(NewRiskContext {
                organization,
                assessment_year: year,
                period,
                data_source,
                assessor,
                strategic_objective: objective,
                business_process: process,
            })?;
            audit_event(&audit, "context.created", &record.id);
            println!(
                "{} Context recorded: {} ({} {} {})",
                "+".green().bold(),
                record.id,
                record.organization,
                record.assessment_year,
                record.period
            );
            Ok(ExitCode::SUCCESS)
        }

        ContextAction::Update {
            id,
            organization,
            year,
            period,
            data_source,
            assessor,
            objective,
            process,
        } => {
            let Some(existing) = registry.contexts.get(&id)? else {
                println!("No context with id: {}", id);
                return Ok(ExitCode::FAILURE);
            };
            // Omitted flags keep the stored values.
            let record = registry.update_context(
                &id,
                NewRiskContext {
                    organization: organization.unwrap_or(existing.organization),
                    assessment_year: year.unwrap_or(existing.assessment_year),
                    period: period.unwrap_or(existing.period),
                    data_source: data_source.or(existing.data_source),
                    assessor: assessor.or(existing.assessor),
                    strategic_objective: objective.unwrap_or(existing.strategic_objective),
                    business_process: process.unwrap_or(existing.business_process),
                },
            )?;
            audit_event(&audit, "context.updated", &record.id);
            println!(
                "{} Context updated: {} ({} {} {})",
                "~".yellow().bold(),
                record.id,
                record.organization,
                record.assessment_year,
                record.period
            );
            Ok(ExitCode::SUCCESS)
        }

        ContextAction::List { format } => {
            let contexts = registry.contexts.list()?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&contexts)?);
                }
                OutputFormat::Text => {
                    if contexts.is_empty() {
                        println!("No contexts recorded.");
                        println!("Run '{}' to add one.", "riskledger context add".bold());
                    } else {
                        for ctx in &contexts {
                            println!(
                                "{}  {}  {} {}",
                                ctx.id,
                                ctx.organization.bold(),
                                ctx.assessment_year,
                                ctx.period
                            );
                        }
                        debug!(count = contexts.len(), "Contexts listed");
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        ContextAction::Show { id } => {
            match registry.contexts.get(&id)? {
                Some(ctx) => {
                    println!("{}", serde_json::to_string_pretty(&ctx)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("No context with id: {}", id);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        ContextAction::Remove { id } => {
            if registry.remove_context(&id)? {
                audit_event(&audit, "context.removed", &id);
                println!("{} Context removed: {}", "-".red().bold(), id);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("No context with id: {}", id);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
