//! Identification: what the assistant made of a photographed fish.

use serde::{Deserialize, Serialize};

use crate::classify::{FreshnessGrade, QualityGrade, freshness_grade, quality_grade};

/// A species identification with optional freshness and quality assessments.
///
/// Field names serialize in camelCase, matching the schema the assistant
/// is asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    /// Identifying features: coloration, body shape, fins, markings.
    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edibility: Option<String>,

    /// Self-reported confidence, 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<FreshnessAssessment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityAssessment>,
}

impl FishResult {
    /// The best available name: common, then scientific.
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .or(self.scientific_name.as_deref())
            .unwrap_or("Unknown fish")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessAssessment {
    pub score: i64,
    pub grade: FreshnessGrade,
    #[serde(default)]
    pub indicators: Vec<String>,
    #[serde(default)]
    pub assessment: String,
}

impl FreshnessAssessment {
    /// Builds an assessment whose grade is derived from the score.
    pub fn graded(score: i64, indicators: Vec<String>, assessment: String) -> Self {
        Self {
            score,
            grade: freshness_grade(score),
            indicators,
            assessment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    pub score: i64,
    pub grade: QualityGrade,
    #[serde(default)]
    pub factors: Vec<String>,
    #[serde(default)]
    pub assessment: String,
}

impl QualityAssessment {
    /// Builds an assessment whose grade is derived from the score.
    pub fn graded(score: i64, factors: Vec<String>, assessment: String) -> Self {
        Self {
            score,
            grade: quality_grade(score),
            factors,
            assessment,
        }
    }
}
