//! Risk and grade classification.
//!
//! Pure threshold ladders over numeric measurements. Nothing here validates
//! its input: out-of-range values (negative heights, scores above 100, NaN)
//! resolve through the same comparisons and land wherever they fall.
//! Callers that care about physically valid input check it upstream.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marine risk tier, ordered by severity.
///
/// `Safe < Warning < Danger < Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskStatus {
    Safe,
    Warning,
    Danger,
    Emergency,
}

/// Freshness bucket derived from a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreshnessGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Quality bucket derived from a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    Premium,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

/// Classify sea conditions into a risk tier.
///
/// Tiers are checked from most to least severe; the first match wins.
/// Either quantity alone is enough to reach a tier.
pub fn classify_risk(wave_height_m: f64, wind_speed_kmh: f64) -> RiskStatus {
    if wave_height_m >= 4.0 || wind_speed_kmh >= 60.0 {
        RiskStatus::Emergency
    } else if wave_height_m >= 2.5 || wind_speed_kmh >= 40.0 {
        RiskStatus::Danger
    } else if wave_height_m >= 1.5 || wind_speed_kmh >= 25.0 {
        RiskStatus::Warning
    } else {
        RiskStatus::Safe
    }
}

/// Map a freshness score to its grade.
///
/// Scores are not clamped: anything below 50, negatives included, is `Poor`.
pub fn freshness_grade(score: i64) -> FreshnessGrade {
    match score {
        s if s >= 90 => FreshnessGrade::Excellent,
        s if s >= 70 => FreshnessGrade::Good,
        s if s >= 50 => FreshnessGrade::Fair,
        _ => FreshnessGrade::Poor,
    }
}

/// Map a quality score to its grade.
///
/// Same boundaries as [`freshness_grade`], different labels.
pub fn quality_grade(score: i64) -> QualityGrade {
    match score {
        s if s >= 90 => QualityGrade::Premium,
        s if s >= 70 => QualityGrade::Good,
        s if s >= 50 => QualityGrade::Average,
        _ => QualityGrade::BelowAverage,
    }
}

// ── Presentation ──

impl RiskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
            Self::Emergency => "Emergency",
        }
    }

    /// Colour token a renderer can use for this tier.
    pub fn style(self) -> &'static str {
        match self {
            Self::Safe => "green",
            Self::Warning => "yellow",
            Self::Danger => "orange",
            Self::Emergency => "red",
        }
    }
}

impl FreshnessGrade {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            Self::Excellent => "emerald",
            Self::Good => "cyan",
            Self::Fair => "yellow",
            Self::Poor => "red",
        }
    }
}

impl QualityGrade {
    pub fn label(self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            Self::Premium => "purple",
            Self::Good => "blue",
            Self::Average => "yellow",
            Self::BelowAverage => "orange",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for FreshnessGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
