//! Risk identification: a named risk with its cause and impact narrative.

use super::{new_id, require, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the organization can influence the risk source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskNature {
    Controllable,
    Uncontrollable,
}

/// Reporting category of the risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Performance,
    Financial,
    Reputation,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Performance,
        RiskCategory::Financial,
        RiskCategory::Reputation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Performance => "performance",
            RiskCategory::Financial => "financial",
            RiskCategory::Reputation => "reputation",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cause of the risk: where it originates and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCause {
    pub source: String,
    pub description: String,
}

/// Impact of the risk: who is affected and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskImpact {
    pub affected_party: String,
    pub description: String,
}

/// An identified risk scoped to a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskIdentification {
    pub id: String,
    pub context_id: String,
    /// Short register code, e.g. "R-001".
    pub code: String,
    pub owner: String,
    pub nature: RiskNature,
    pub category: RiskCategory,
    pub description: String,
    pub cause: RiskCause,
    pub impact: RiskImpact,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a risk identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiskIdentification {
    pub context_id: String,
    pub code: String,
    pub owner: String,
    pub nature: RiskNature,
    pub category: RiskCategory,
    pub description: String,
    pub cause: RiskCause,
    pub impact: RiskImpact,
}

impl NewRiskIdentification {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("context_id", &self.context_id)?;
        require("code", &self.code)?;
        require("owner", &self.owner)?;
        require("description", &self.description)?;
        require("cause.source", &self.cause.source)?;
        require("cause.description", &self.cause.description)?;
        require("impact.affected_party", &self.impact.affected_party)?;
        require("impact.description", &self.impact.description)?;
        Ok(())
    }

    pub fn into_record(self) -> RiskIdentification {
        RiskIdentification {
            id: new_id(),
            context_id: self.context_id,
            code: self.code,
            owner: self.owner,
            nature: self.nature,
            category: self.category,
            description: self.description,
            cause: self.cause,
            impact: self.impact,
            created_at: Utc::now(),
        }
    }

    /// Apply the payload onto an existing record, keeping its id and
    /// creation timestamp.
    pub fn apply_to(self, existing: RiskIdentification) -> RiskIdentification {
        RiskIdentification {
            id: existing.id,
            context_id: self.context_id,
            code: self.code,
            owner: self.owner,
            nature: self.nature,
            category: self.category,
            description: self.description,
            cause: self.cause,
            impact: self.impact,
            created_at: existing.created_at,
        }
    }
}
