//! Qualitative risk levels and multiplicative classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band a risk score falls into.
///
/// Labels follow the assessment forms this tool records ("Rendah" through
/// "Sangat Tinggi"); variant names are the English equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score 1-5: acceptable with minimal controls.
    Low,
    /// Score 6-12: needs controls and monitoring.
    Medium,
    /// Score 13-20: needs priority handling.
    High,
    /// Score 21-25: needs immediate and comprehensive handling.
    Critical,
}

impl RiskLevel {
    /// Band a numeric score (1-25) into a level.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=5 => RiskLevel::Low,
            6..=12 => RiskLevel::Medium,
            13..=20 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    /// Label as printed on the assessment forms.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Rendah",
            RiskLevel::Medium => "Sedang",
            RiskLevel::High => "Tinggi",
            RiskLevel::Critical => "Sangat Tinggi",
        }
    }

    /// Handling guidance for the level.
    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Acceptable with minimal controls",
            RiskLevel::Medium => "Needs controls and monitoring",
            RiskLevel::High => "Needs priority handling",
            RiskLevel::Critical => "Needs immediate and comprehensive handling",
        }
    }

    /// CSS classes for web front-ends consuming the JSON output.
    pub fn color_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "text-green-600 bg-green-100",
            RiskLevel::Medium => "text-yellow-600 bg-yellow-100",
            RiskLevel::High => "text-orange-600 bg-orange-100",
            RiskLevel::Critical => "text-red-600 bg-red-100",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying a likelihood/impact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRating {
    pub score: u8,
    pub level: RiskLevel,
}

impl RiskRating {
    pub fn description(&self) -> &'static str {
        self.level.description()
    }

    pub fn color_class(&self) -> &'static str {
        self.level.color_class()
    }
}

/// Multiplicative scoring: `score = likelihood x impact`, banded into a level.
///
/// No clamping here; the payload boundary guarantees inputs are in [1,5].
pub fn classify(likelihood: u8, impact: u8) -> RiskRating {
    let score = likelihood * impact;
    RiskRating {
        score,
        level: RiskLevel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_extremes() {
        let low = classify(1, 1);
        assert_eq!(low.score, 1);
        assert_eq!(low.level, RiskLevel::Low);
        assert_eq!(low.level.label(), "Rendah");

        let critical = classify(5, 5);
        assert_eq!(critical.score, 25);
        assert_eq!(critical.level, RiskLevel::Critical);
        assert_eq!(critical.level.label(), "Sangat Tinggi");
    }

    #[test]
    fn band_boundaries_are_exact() {
        // Products straddling each threshold.
        assert_eq!(classify(1, 5).level, RiskLevel::Low); // 5
        assert_eq!(classify(2, 3).level, RiskLevel::Medium); // 6
        assert_eq!(classify(3, 4).level, RiskLevel::Medium); // 12
        assert_eq!(RiskLevel::from_score(13), RiskLevel::High);
        assert_eq!(classify(4, 5).level, RiskLevel::High); // 20
        assert_eq!(RiskLevel::from_score(21), RiskLevel::Critical);
    }

    #[test]
    fn classify_is_commutative() {
        for l in 1..=5u8 {
            for i in 1..=5u8 {
                assert_eq!(classify(l, i).score, classify(i, l).score);
                assert_eq!(classify(l, i).level, classify(i, l).level);
            }
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let a = classify(3, 4);
        let b = classify(3, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn descriptions_and_colors_are_distinct() {
        let levels = [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Critical,
        ];
        for (i, a) in levels.iter().enumerate() {
            for b in &levels[i + 1..] {
                assert_ne!(a.description(), b.description());
                assert_ne!(a.color_class(), b.color_class());
            }
        }
    }
}
