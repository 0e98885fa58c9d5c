//! Risk assessment: the follow-up plan after analysis.

use super::{new_id, require, require_scale, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Assessment follow-up plan for an analyzed risk.
///
/// `expected_score` is the residual score after the planned controls take
/// effect, recomputed by the registry from the expected scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: String,
    pub context_id: String,
    pub identification_id: String,
    pub analysis_id: String,
    /// Chosen risk response, e.g. "mitigate", "transfer", "accept".
    pub response: String,
    pub existing_controls: Option<String>,
    pub action_plan: Option<String>,
    pub owner: String,
    pub target_date: NaiveDate,
    pub output_indicator: Option<String>,
    /// Expected residual likelihood, 1-5.
    pub expected_likelihood: u8,
    /// Expected residual impact, 1-5.
    pub expected_impact: u8,
    pub expected_score: u8,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiskAssessment {
    pub analysis_id: String,
    pub response: String,
    pub existing_controls: Option<String>,
    pub action_plan: Option<String>,
    pub owner: String,
    pub target_date: NaiveDate,
    pub output_indicator: Option<String>,
    pub expected_likelihood: u8,
    pub expected_impact: u8,
}

impl NewRiskAssessment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("analysis_id", &self.analysis_id)?;
        require("response", &self.response)?;
        require("owner", &self.owner)?;
        require_scale("expected_likelihood", self.expected_likelihood)?;
        require_scale("expected_impact", self.expected_impact)?;
        Ok(())
    }

    /// Build the stored record; parent ids and the residual score come from
    /// the registry.
    pub fn into_record(
        self,
        context_id: String,
        identification_id: String,
        expected_score: u8,
    ) -> RiskAssessment {
        RiskAssessment {
            id: new_id(),
            context_id,
            identification_id,
            analysis_id: self.analysis_id,
            response: self.response,
            existing_controls: self.existing_controls,
            action_plan: self.action_plan,
            owner: self.owner,
            target_date: self.target_date,
            output_indicator: self.output_indicator,
            expected_likelihood: self.expected_likelihood,
            expected_impact: self.expected_impact,
            expected_score,
            created_at: Utc::now(),
        }
    }

    /// Apply the payload onto an existing record; parent ids and the residual
    /// score come from the registry, id and creation time from the existing
    /// record.
    pub fn apply_to(
        self,
        existing: RiskAssessment,
        context_id: String,
        identification_id: String,
        expected_score: u8,
    ) -> RiskAssessment {
        RiskAssessment {
            id: existing.id,
            context_id,
            identification_id,
            analysis_id: self.analysis_id,
            response: self.response,
            existing_controls: self.existing_controls,
            action_plan: self.action_plan,
            owner: self.owner,
            target_date: self.target_date,
            output_indicator: self.output_indicator,
            expected_likelihood: self.expected_likelihood,
            expected_impact: self.expected_impact,
            expected_score,
            created_at: existing.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewRiskAssessment {
        NewRiskAssessment {
            analysis_id: "an-1".into(),
            response: "mitigate".into(),
            existing_controls: Some("Audit internal berkala".into()),
            action_plan: Some("Perkuat monitoring kontraktor".into()),
            owner: "Kepala Balai".into(),
            target_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            output_indicator: Some("Laporan triwulanan".into()),
            expected_likelihood: 2,
            expected_impact: 2,
        }
    }

    #[test]
    fn valid_payload_accepted() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn blank_response_rejected() {
        let mut p = payload();
        p.response = "".into();
        assert_eq!(p.validate(), Err(ValidationError::MissingField("response")));
    }

    #[test]
    fn expected_scales_validated() {
        let mut p = payload();
        p.expected_likelihood = 9;
        assert!(p.validate().is_err());
    }

    #[test]
    fn parent_ids_stamped_by_caller() {
        let record = payload().into_record("ctx-1".into(), "ident-1".into(), 4);
        assert_eq!(record.context_id, "ctx-1");
        assert_eq!(record.identification_id, "ident-1");
        assert_eq!(record.expected_score, 4);
    }
}
