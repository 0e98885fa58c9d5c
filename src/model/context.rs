//! Risk context: the organizational scope risks are identified against.

use super::{new_id, require, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organizational scoping record (entity, year, period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskContext {
    pub id: String,
    /// Ministry/agency or unit being assessed.
    pub organization: String,
    pub assessment_year: i32,
    /// Assessment period within the year, e.g. "Triwulan I".
    pub period: String,
    pub data_source: Option<String>,
    pub assessor: Option<String>,
    pub strategic_objective: String,
    pub business_process: String,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a risk context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiskContext {
    pub organization: String,
    pub assessment_year: i32,
    pub period: String,
    pub data_source: Option<String>,
    pub assessor: Option<String>,
    pub strategic_objective: String,
    pub business_process: String,
}

impl NewRiskContext {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("organization", &self.organization)?;
        require("period", &self.period)?;
        require("strategic_objective", &self.strategic_objective)?;
        require("business_process", &self.business_process)?;
        if !(1990..=2100).contains(&self.assessment_year) {
            return Err(ValidationError::OutOfRange {
                field: "assessment_year",
                min: 1990,
                max: 2100,
                value: i64::from(self.assessment_year),
            });
        }
        Ok(())
    }

    /// Stamp id and timestamp, producing the stored record.
    pub fn into_record(self) -> RiskContext {
        RiskContext {
            id: new_id(),
            organization: self.organization,
            assessment_year: self.assessment_year,
            period: self.period,
            data_source: self.data_source,
            assessor: self.assessor,
            strategic_objective: self.strategic_objective,
            business_process: self.business_process,
            created_at: Utc::now(),
        }
    }

    /// Apply the payload onto an existing record, keeping its id and
    /// creation timestamp.
    pub fn apply_to(self, existing: RiskContext) -> RiskContext {
        RiskContext {
            id: existing.id,
            organization: self.organization,
            assessment_year: self.assessment_year,
            period: self.period,
            data_source: self.data_source,
            assessor: self.assessor,
            strategic_objective: self.strategic_objective,
            business_process: self.business_process,
            created_at: existing.created_at,
        }
    }
}
