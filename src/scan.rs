//! Fish identification: photograph in, displayable outcome out.
//!
//! Every failure along the way (missing credential, transport error, empty
//! reply, unparseable reply) becomes a [`ScanFailure`] value. Nothing here
//! returns an error to the caller; the outcome is always something to show.

use std::{fs, io, path::Path};

use jiff::Timestamp;
use serde::Deserialize;
use uuid::Uuid;

use crate::assistant::{Assistant, AssistantRequest, InlineImage};
use crate::extract::{ExtractError, extract_object};
use crate::http::ServiceError;
use crate::model::{FishResult, FreshnessAssessment, HistoryItem, QualityAssessment};
use crate::storage::{self, KeyValueStore};

pub const IDENTIFY_PROMPT: &str = r#"Analyze this fish image and identify the species, then assess its freshness and quality. Provide your response ONLY as valid JSON with no additional text, using this exact structure:
{
  "commonName": "name",
  "scientificName": "name",
  "features": ["feature1", "feature2", "feature3"],
  "habitat": "description",
  "edibility": "description",
  "confidence": 85,
  "freshness": {
    "score": 80,
    "grade": "Excellent | Good | Fair | Poor",
    "indicators": ["indicator1", "indicator2"],
    "assessment": "one or two sentences"
  },
  "quality": {
    "score": 75,
    "grade": "Premium | Good | Average | Below Average",
    "factors": ["factor1", "factor2"],
    "assessment": "one or two sentences"
  }
}
Be specific about identifying features like coloration, body shape, fin structure, and markings. Judge freshness from eye clarity, gill colour, skin sheen, and firmness; judge quality from size, condition, and damage. Scores are integers from 0 to 100. If unsure, still provide your best identification with appropriate confidence level."#;

/// An image ready to send for identification.
#[derive(Debug, Clone)]
pub struct ScanImage {
    /// Where the image came from, as recorded in history.
    pub label: String,
    pub image: InlineImage,
}

impl ScanImage {
    /// Reads an image file. PNG is detected by extension; anything else is sent as JPEG.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        Ok(Self {
            label: path.display().to_string(),
            image: InlineImage {
                mime_type: if is_png { "image/png" } else { "image/jpeg" },
                bytes,
            },
        })
    }
}

/// Why an identification produced no result. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanFailure {
    #[error("API key not configured.")]
    NotConfigured,

    #[error("Failed to identify fish: {0}.")]
    Service(String),

    #[error("No response received from the API.")]
    Empty,

    #[error("Could not parse identification results.")]
    Unparseable(ExtractError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Identified(FishResult),
    Failed(ScanFailure),
}

/// Send an image to the assistant and interpret the reply.
pub fn identify(assistant: &dyn Assistant, image: &ScanImage) -> ScanOutcome {
    let request = AssistantRequest {
        image: Some(image.image.clone()),
        ..AssistantRequest::prompt(IDENTIFY_PROMPT)
    };

    let text = match assistant.generate(&request) {
        Ok(text) => text,
        Err(ServiceError::MissingCredential) => {
            return ScanOutcome::Failed(ScanFailure::NotConfigured);
        }
        Err(e) => {
            tracing::warn!(error = %e, "identification request failed");
            return ScanOutcome::Failed(ScanFailure::Service(e.to_string()));
        }
    };

    match parse_identification(&text) {
        Ok(result) => ScanOutcome::Identified(result),
        Err(ExtractError::Empty) => ScanOutcome::Failed(ScanFailure::Empty),
        Err(e) => {
            tracing::warn!(error = %e, "could not parse identification reply");
            ScanOutcome::Failed(ScanFailure::Unparseable(e))
        }
    }
}

/// Push a successful identification onto the scan history.
pub fn record(
    store: &dyn KeyValueStore,
    image: &ScanImage,
    result: &FishResult,
) -> storage::Result<HistoryItem> {
    let item = HistoryItem {
        id: Uuid::new_v4(),
        timestamp: Timestamp::now(),
        image: image.label.clone(),
        result: result.clone(),
    };
    storage::record_scan(store, item.clone())?;
    Ok(item)
}

// ── Reply parsing ──

/// The reply as the assistant writes it. Grades are ignored and recomputed
/// from the scores.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentificationReply {
    common_name: Option<String>,
    scientific_name: Option<String>,
    #[serde(default)]
    features: Vec<String>,
    habitat: Option<String>,
    edibility: Option<String>,
    confidence: Option<f64>,
    freshness: Option<ScoredReply>,
    quality: Option<ScoredReply>,
}

#[derive(Debug, Deserialize)]
struct ScoredReply {
    score: f64,
    #[serde(default)]
    indicators: Vec<String>,
    #[serde(default)]
    factors: Vec<String>,
    #[serde(default)]
    assessment: String,
}

/// Extract an identification from reply text.
///
/// A reply naming neither a common nor a scientific name is a shape error.
pub fn parse_identification(text: &str) -> Result<FishResult, ExtractError> {
    let reply: IdentificationReply = extract_object(text)?;

    let named = |name: &Option<String>| name.as_deref().is_some_and(|n| !n.trim().is_empty());
    if !named(&reply.common_name) && !named(&reply.scientific_name) {
        return Err(ExtractError::Shape(
            "reply names neither a common nor a scientific name".to_string(),
        ));
    }

    Ok(FishResult {
        common_name: reply.common_name,
        scientific_name: reply.scientific_name,
        features: reply.features,
        habitat: reply.habitat,
        edibility: reply.edibility,
        confidence: reply.confidence,
        freshness: reply
            .freshness
            .map(|f| FreshnessAssessment::graded(whole(f.score), f.indicators, f.assessment)),
        quality: reply
            .quality
            .map(|q| QualityAssessment::graded(whole(q.score), q.factors, q.assessment)),
    })
}

/// Scores arrive as JSON numbers; fractional ones are rounded.
#[allow(clippy::cast_possible_truncation)]
fn whole(score: f64) -> i64 {
    score.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use tempfile::TempDir;

    use crate::classify::{FreshnessGrade, QualityGrade};
    use crate::storage::MemoryStore;

    /// Replies with a canned result and remembers the last request.
    struct Scripted {
        reply: Result<String, fn() -> ServiceError>,
        last: RefCell<Option<AssistantRequest>>,
    }

    impl Scripted {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                last: RefCell::new(None),
            }
        }

        fn err(make: fn() -> ServiceError) -> Self {
            Self {
                reply: Err(make),
                last: RefCell::new(None),
            }
        }
    }

    impl Assistant for Scripted {
        fn generate(&self, request: &AssistantRequest) -> Result<String, ServiceError> {
            *self.last.borrow_mut() = Some(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn sample_image() -> ScanImage {
        ScanImage {
            label: "catch.jpg".into(),
            image: InlineImage {
                mime_type: "image/jpeg",
                bytes: vec![0xFF, 0xD8, 0xFF],
            },
        }
    }

    const FULL_REPLY: &str = r#"```json
{
  "commonName": "Indian Mackerel",
  "scientificName": "Rastrelliger kanagurta",
  "features": ["dark stripes", "golden spots"],
  "habitat": "Coastal waters of the Indian Ocean.",
  "edibility": "Widely eaten.",
  "confidence": 91,
  "freshness": {"score": 95, "grade": "Good", "indicators": ["clear eyes"], "assessment": "Very fresh."},
  "quality": {"score": 65, "grade": "Premium", "factors": ["minor scale loss"], "assessment": "Decent."}
}
```"#;

    #[test]
    fn identifies_and_regrades_from_scores() {
        let assistant = Scripted::ok(FULL_REPLY);
        let ScanOutcome::Identified(result) = identify(&assistant, &sample_image()) else {
            panic!("expected identification");
        };

        assert_eq!(result.common_name.as_deref(), Some("Indian Mackerel"));
        assert_eq!(result.features.len(), 2);
        let freshness = result.freshness.unwrap();
        assert_eq!(freshness.score, 95);
        assert_eq!(freshness.grade, FreshnessGrade::Excellent);
        let quality = result.quality.unwrap();
        assert_eq!(quality.grade, QualityGrade::Average);
    }

    #[test]
    fn sends_prompt_with_inline_image() {
        let assistant = Scripted::ok(FULL_REPLY);
        identify(&assistant, &sample_image());

        let request = assistant.last.borrow().clone().unwrap();
        assert_eq!(request.prompt, IDENTIFY_PROMPT);
        let image = request.image.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn missing_credential_is_not_configured() {
        let assistant = Scripted::err(|| ServiceError::MissingCredential);
        assert_eq!(
            identify(&assistant, &sample_image()),
            ScanOutcome::Failed(ScanFailure::NotConfigured)
        );
    }

    #[test]
    fn transport_failure_is_service_failure() {
        let assistant = Scripted::err(|| ServiceError::Network("connection refused".into()));
        let outcome = identify(&assistant, &sample_image());
        let ScanOutcome::Failed(failure) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(
            failure.to_string(),
            "Failed to identify fish: request failed: connection refused."
        );
    }

    #[test]
    fn empty_reply_is_distinct() {
        let assistant = Scripted::ok("  ");
        assert_eq!(
            identify(&assistant, &sample_image()),
            ScanOutcome::Failed(ScanFailure::Empty)
        );
    }

    #[test]
    fn prose_reply_is_unparseable() {
        let assistant = Scripted::ok("Sorry, I can't identify this image.");
        let outcome = identify(&assistant, &sample_image());
        assert!(matches!(
            outcome,
            ScanOutcome::Failed(ScanFailure::Unparseable(ExtractError::Parse(_)))
        ));
    }

    #[test]
    fn nameless_reply_is_shape_error() {
        let err = parse_identification(r#"{"features": ["fins"], "confidence": 10}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Shape(_)));

        let err = parse_identification(r#"{"commonName": "  "}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Shape(_)));
    }

    #[test]
    fn wrong_field_type_is_shape_error() {
        let err = parse_identification(r#"{"commonName": "Rohu", "features": "scales"}"#)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Shape(_)));
    }

    #[test]
    fn minimal_reply_without_assessments() {
        let result = parse_identification(r#"{"scientificName": "Labeo catla"}"#).unwrap();
        assert_eq!(result.display_name(), "Labeo catla");
        assert!(result.freshness.is_none());
        assert!(result.quality.is_none());
    }

    #[test]
    fn fractional_scores_are_rounded() {
        let result = parse_identification(
            r#"{"commonName": "Hilsa", "freshness": {"score": 89.6}, "quality": {"score": 49.4}}"#,
        )
        .unwrap();
        assert_eq!(result.freshness.unwrap().grade, FreshnessGrade::Excellent);
        assert_eq!(result.quality.unwrap().grade, QualityGrade::BelowAverage);
    }

    #[test]
    fn record_pushes_to_history() {
        let store = MemoryStore::default();
        let result = parse_identification(r#"{"commonName": "Pomfret"}"#).unwrap();
        let item = record(&store, &sample_image(), &result).unwrap();

        let history = storage::load_history(&store).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, item.id);
        assert_eq!(history[0].image, "catch.jpg");
    }

    #[test]
    fn reads_png_by_extension() {
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("fish.PNG");
        let jpg = dir.path().join("fish.jpeg");
        fs::write(&png, b"png").unwrap();
        fs::write(&jpg, b"jpg").unwrap();

        assert_eq!(ScanImage::from_path(&png).unwrap().image.mime_type, "image/png");
        assert_eq!(ScanImage::from_path(&jpg).unwrap().image.mime_type, "image/jpeg");
        assert!(ScanImage::from_path(&dir.path().join("missing.jpg")).is_err());
    }
}
