//! Domain records and their validated creation payloads.
//!
//! Every record enters the system through a `New*` payload whose `validate()`
//! rejects blank required fields and out-of-range scales before any business
//! logic runs. Stored records carry UUID ids and UTC timestamps.

pub mod analysis;
pub mod assessment;
pub mod context;
pub mod identification;

pub use analysis::{ControlVerdict, NewRiskAnalysis, RiskAnalysis, RiskControl};
pub use assessment::{NewRiskAssessment, RiskAssessment};
pub use context::{NewRiskContext, RiskContext};
pub use identification::{
    NewRiskIdentification, RiskCategory, RiskCause, RiskImpact, RiskIdentification, RiskNature,
};

use thiserror::Error;

/// Payload validation failures, reported at the boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}

/// Require a non-blank string field.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Require an ordinal scale value in [1,5].
pub(crate) fn require_scale(field: &'static str, value: u8) -> Result<(), ValidationError> {
    if !(1..=5).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: 1,
            max: 5,
            value: i64::from(value),
        });
    }
    Ok(())
}

/// Fresh UUID v4 record id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
