//! Identify command: record and manage risk identifications.

use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use super::{audit_event, open_registry};
use crate::cli::args::{IdentifyAction, OutputFormat};
use crate::config::Config;
use crate::model::{NewRiskIdentification, RiskCause, RiskImpact};

/// Execute the `identify` subcommand (add, update, list, remove).
pub fn cmd_identify(
    action: IdentifyAction,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let (registry, audit) = open_registry(config, data_dir)?;

    match action {
        IdentifyAction::Add {
            context,
            code,
            owner,
            nature,
            category,
            description,
            cause_source,
            cause,
            affected_party,
            impact,
        } => {
            let record = registry.add_identification(NewRiskIdentification {
                context_id: context,
                code,
                owner,
                nature: nature.into(),
                category: category.into(),
                description,
                cause: RiskCause {
                    source: cause_source,
                    description: cause,
                },
                impact: RiskImpact {
                    affected_party,
                    description: impact,
                },
            })?;
            audit_event(&audit, "identification.created", &record.id);
            println!(
                "{} Risk identified: {} [{}] {}",
                "+".green().bold(),
                record.id,
                record.code.bold(),
                record.description
            );
            Ok(ExitCode::SUCCESS)
        }

        IdentifyAction::Update {
            id,
            context,
            code,
            owner,
            nature,
            category,
            description,
            cause_source,
            cause,
            affected_party,
            impact,
        } => {
            let Some(existing) = registry.identifications.get(&id)? else {
                println!("No identification with id: {}", id);
                return Ok(ExitCode::FAILURE);
            };
            // Omitted flags keep the stored values.
            let record = registry.update_identification(
                &id,
                NewRiskIdentification {
                    context_id: context.unwrap_or(existing.context_id),
                    code: code.unwrap_or(existing.code),
                    owner: owner.unwrap_or(existing.owner),
                    nature: nature.map(Into::into).unwrap_or(existing.nature),
                    category: category.map(Into::into).unwrap_or(existing.category),
                    description: description.unwrap_or(existing.description),
                    cause: RiskCause {
                        source: cause_source.unwrap_or(existing.cause.source),
                        description: cause.unwrap_or(existing.cause.description),
                    },
                    impact: RiskImpact {
                        affected_party: affected_party.unwrap_or(existing.impact.affected_party),
                        description: impact.unwrap_or(existing.impact.description),
                    },
                },
            )?;
            audit_event(&audit, "identification.updated", &record.id);
            println!(
                "{} Identification updated: {} [{}] {}",
                "~".yellow().bold(),
                record.id,
                record.code.bold(),
                record.description
            );
            Ok(ExitCode::SUCCESS)
        }

        IdentifyAction::List { context, format } => {
            let records = registry.identifications_in(context.as_deref())?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                OutputFormat::Text => {
                    if records.is_empty() {
                        println!("No risks identified.");
                    } else {
                        for r in &records {
                            println!(
                                "{}  [{}] {} ({}, owner: {})",
                                r.id,
                                r.code.bold(),
                                r.description,
                                r.category,
                                r.owner
                            );
                        }
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        IdentifyAction::Remove { id } => {
            if registry.remove_identification(&id)? {
                audit_event(&audit, "identification.removed", &id);
                println!("{} Identification removed: {}", "-".red().bold(), id);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("No identification with id: {}", id);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
