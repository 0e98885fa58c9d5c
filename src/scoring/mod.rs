//! Risk scoring core: matrix lookup and multiplicative classification.

pub mod level;
pub mod matrix;

pub use level::{classify, RiskLevel, RiskRating};
pub use matrix::{matrix_score, RISK_MATRIX};

use serde::{Deserialize, Serialize};

/// Which formula stamps the persisted score on an analysis record.
///
/// The two formulas are not equivalent: the matrix is asymmetric in
/// likelihood/impact, the product is commutative. Historically the
/// record-creation path used the matrix while dashboards used the product
/// bands, so the choice is surfaced in configuration instead of unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// Fixed 5x5 matrix lookup, clamped inputs.
    #[default]
    Matrix,
    /// Plain likelihood x impact product.
    Product,
}

impl ScoringPolicy {
    /// Compute the score for a validated likelihood/impact pair.
    pub fn score(&self, likelihood: u8, impact: u8) -> u8 {
        match self {
            ScoringPolicy::Matrix => matrix_score(i32::from(likelihood), i32::from(impact)),
            ScoringPolicy::Product => classify(likelihood, impact).score,
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "matrix" => Some(ScoringPolicy::Matrix),
            "product" => Some(ScoringPolicy::Product),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPolicy::Matrix => "matrix",
            ScoringPolicy::Product => "product",
        }
    }
}
