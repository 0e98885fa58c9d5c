//! Dashboard summary and priority ranking over stored analyses.
//!
//! Classification of already-stored scores always uses the level bands
//! (`RiskLevel::from_score`), regardless of which policy stamped the score.

use crate::model::{RiskAnalysis, RiskCategory, RiskIdentification};
use crate::scoring::RiskLevel;
use crate::store::{Registry, StoreError};
use serde::Serialize;
use std::collections::HashMap;

/// Record counts by qualitative level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl LevelCounts {
    pub fn add(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// Register totals for the dashboard view.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub contexts: usize,
    pub identifications: usize,
    pub analyses: usize,
    pub assessments: usize,
    pub by_level: LevelCounts,
    /// Identification counts keyed by category name.
    pub by_category: HashMap<String, usize>,
}

/// Build the dashboard summary, optionally narrowed to one context.
pub fn summarize(registry: &Registry, context_id: Option<&str>) -> Result<Summary, StoreError> {
    let contexts = match context_id {
        Some(id) => usize::from(registry.contexts.get(id)?.is_some()),
        None => registry.contexts.count()?,
    };
    let identifications = registry.identifications_in(context_id)?;
    let analyses = registry.analyses_in(context_id)?;
    let assessments = registry.assessments_in(context_id)?;

    let mut by_level = LevelCounts::default();
    for analysis in &analyses {
        by_level.add(RiskLevel::from_score(analysis.score));
    }

    let mut by_category: HashMap<String, usize> = RiskCategory::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), 0))
        .collect();
    for ident in &identifications {
        *by_category.entry(ident.category.as_str().to_string()).or_default() += 1;
    }

    Ok(Summary {
        contexts,
        identifications: identifications.len(),
        analyses: analyses.len(),
        assessments: assessments.len(),
        by_level,
        by_category,
    })
}

/// One row of the priority list: an analysis joined with its identification.
#[derive(Debug, Clone, Serialize)]
pub struct PriorityEntry {
    pub rank: usize,
    pub analysis_id: String,
    pub code: String,
    pub description: String,
    pub owner: String,
    pub likelihood: u8,
    pub impact: u8,
    pub score: u8,
    pub level: RiskLevel,
}

/// Analyses ranked by stored score, highest first, ties broken by code.
///
/// Analyses whose identification has been removed out from under them are
/// skipped rather than failing the whole listing.
pub fn priority_ranking(
    registry: &Registry,
    context_id: Option<&str>,
    level_filter: Option<RiskLevel>,
) -> Result<Vec<PriorityEntry>, StoreError> {
    let identifications: HashMap<String, RiskIdentification> = registry
        .identifications_in(context_id)?
        .into_iter()
        .map(|i| (i.id.clone(), i))
        .collect();

    let mut rows: Vec<(RiskAnalysis, RiskIdentification)> = registry
        .analyses_in(context_id)?
        .into_iter()
        .filter_map(|a| {
            let ident = identifications.get(&a.identification_id)?.clone();
            Some((a, ident))
        })
        .collect();

    rows.sort_by(|(a, ia), (b, ib)| b.score.cmp(&a.score).then_with(|| ia.code.cmp(&ib.code)));

    let entries = rows
        .into_iter()
        .map(|(analysis, ident)| {
            let level = RiskLevel::from_score(analysis.score);
            (analysis, ident, level)
        })
        .filter(|(_, _, level)| level_filter.map_or(true, |f| *level == f))
        .enumerate()
        .map(|(i, (analysis, ident, level))| PriorityEntry {
            rank: i + 1,
            analysis_id: analysis.id,
            code: ident.code,
            description: ident.description,
            owner: ident.owner,
            likelihood: analysis.likelihood,
            impact: analysis.impact,
            score: analysis.score,
            level,
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ControlVerdict, NewRiskAnalysis, NewRiskContext, NewRiskIdentification, RiskCause,
        RiskControl, RiskImpact, RiskNature,
    };
    use crate::scoring::ScoringPolicy;

    fn seeded_registry() -> (Registry, String) {
        let reg = Registry::in_memory(ScoringPolicy::Matrix);
        let ctx = reg
            .add_context(NewRiskContext {
                organization: "Balai Jalan".into(),
                assessment_year: 2024,
                period: "Tahunan".into(),
                data_source: None,
                assessor: None,
                strategic_objective: "Kemantapan jalan".into(),
                business_process: "Preservasi".into(),
            })
            .unwrap();

        for (code, category, likelihood, impact) in [
            ("R-001", RiskCategory::Performance, 1, 1), // matrix score 1, Low
            ("R-002", RiskCategory::Financial, 3, 3),   // matrix score 14, High
            ("R-003", RiskCategory::Performance, 5, 5), // matrix score 25, Critical
        ] {
            let ident = reg
                .add_identification(NewRiskIdentification {
                    context_id: ctx.id.clone(),
                    code: code.into(),
                    owner: "Balai".into(),
                    nature: RiskNature::Controllable,
                    category,
                    description: format!("risk {code}"),
                    cause: RiskCause {
                        source: "internal".into(),
                        description: "c".into(),
                    },
                    impact: RiskImpact {
                        affected_party: "publik".into(),
                        description: "d".into(),
                    },
                })
                .unwrap();
            reg.add_analysis(NewRiskAnalysis {
                identification_id: ident.id,
                likelihood,
                impact,
                control: RiskControl {
                    description: "kontrol".into(),
                    verdict: ControlVerdict::Adequate,
                },
            })
            .unwrap();
        }
        (reg, ctx.id)
    }

    #[test]
    fn summary_counts_records_and_levels() {
        let (reg, ctx_id) = seeded_registry();
        let summary = summarize(&reg, Some(&ctx_id)).unwrap();
        assert_eq!(summary.contexts, 1);
        assert_eq!(summary.identifications, 3);
        assert_eq!(summary.analyses, 3);
        assert_eq!(summary.assessments, 0);
        assert_eq!(summary.by_level.low, 1);
        assert_eq!(summary.by_level.high, 1);
        assert_eq!(summary.by_level.critical, 1);
        assert_eq!(summary.by_level.total(), 3);
        assert_eq!(summary.by_category["performance"], 2);
        assert_eq!(summary.by_category["financial"], 1);
        assert_eq!(summary.by_category["reputation"], 0);
    }

    #[test]
    fn priority_sorts_by_score_descending() {
        let (reg, _) = seeded_registry();
        let ranking = priority_ranking(&reg, None, None).unwrap();
        let codes: Vec<&str> = ranking.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["R-003", "R-002", "R-001"]);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[0].level, RiskLevel::Critical);
    }

    #[test]
    fn priority_level_filter_narrows_rows() {
        let (reg, _) = seeded_registry();
        let ranking = priority_ranking(&reg, None, Some(RiskLevel::High)).unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].code, "R-002");
        assert_eq!(ranking[0].rank, 1);
    }

    #[test]
    fn unknown_context_summarizes_empty() {
        let (reg, _) = seeded_registry();
        let summary = summarize(&reg, Some("missing")).unwrap();
        assert_eq!(summary.contexts, 0);
        assert_eq!(summary.analyses, 0);
    }
}
