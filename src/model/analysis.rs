//! Risk analysis: likelihood/impact scales and the stamped score.

use super::{new_id, require, require_scale, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the existing control is judged adequate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlVerdict {
    Adequate,
    Inadequate,
}

/// Existing control over the risk and its adequacy verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskControl {
    pub description: String,
    pub verdict: ControlVerdict,
}

/// Analysis of an identified risk.
///
/// `score` is stamped by the registry from the configured scoring policy;
/// it is never taken from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub id: String,
    pub context_id: String,
    pub identification_id: String,
    /// Likelihood scale, 1-5.
    pub likelihood: u8,
    /// Impact scale, 1-5.
    pub impact: u8,
    pub score: u8,
    pub control: RiskControl,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a risk analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiskAnalysis {
    pub identification_id: String,
    pub likelihood: u8,
    pub impact: u8,
    pub control: RiskControl,
}

impl NewRiskAnalysis {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("identification_id", &self.identification_id)?;
        require_scale("likelihood", self.likelihood)?;
        require_scale("impact", self.impact)?;
        require("control.description", &self.control.description)?;
        Ok(())
    }

    /// Build the stored record; `context_id` and `score` come from the registry.
    pub fn into_record(self, context_id: String, score: u8) -> RiskAnalysis {
        RiskAnalysis {
            id: new_id(),
            context_id,
            identification_id: self.identification_id,
            likelihood: self.likelihood,
            impact: self.impact,
            score,
            control: self.control,
            created_at: Utc::now(),
        }
    }

    /// Apply the payload onto an existing record; `context_id` and `score`
    /// come from the registry, id and creation time from the existing record.
    pub fn apply_to(self, existing: RiskAnalysis, context_id: String, score: u8) -> RiskAnalysis {
        RiskAnalysis {
            id: existing.id,
            context_id,
            identification_id: self.identification_id,
            likelihood: self.likelihood,
            impact: self.impact,
            score,
            control: self.control,
            created_at: existing.created_at,
        }
    }
}
