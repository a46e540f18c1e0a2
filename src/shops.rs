//! Nearby shop discovery through the assistant.

use crate::assistant::{Assistant, AssistantRequest};
use crate::extract::{ExtractError, extract_array};
use crate::http::ServiceError;
use crate::model::{Location, Shop};

#[derive(Debug, thiserror::Error)]
pub enum ShopSearchError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("no response received")]
    Empty,

    #[error("could not parse shop results: {0}")]
    Unparseable(ExtractError),
}

impl From<ExtractError> for ShopSearchError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Empty => Self::Empty,
            other => Self::Unparseable(other),
        }
    }
}

/// The shop-search prompt for a location.
pub fn shops_prompt(location: Location) -> String {
    format!(
        r#"Find fishing net shops, marine supply stores, and fishing equipment stores near coordinates {lat}, {lng}. Search for boat net shops, fishing gear stores, and marine equipment suppliers in this area. Provide response as JSON array with this structure:
[
  {{
    "name": "Shop Name",
    "address": "Full address",
    "distance": "2.3 km",
    "type": "Fishing Net Shop",
    "phone": "phone number if available",
    "description": "brief description",
    "lat": 0.0,
    "lng": 0.0
  }}
]
Provide at least 5-8 results if possible. Return ONLY the JSON array."#,
        lat = location.lat,
        lng = location.lng,
    )
}

/// Ask the assistant for fishing-supply shops near `location`.
pub fn find_nearby(
    assistant: &dyn Assistant,
    location: Location,
) -> Result<Vec<Shop>, ShopSearchError> {
    let text = assistant.generate(&AssistantRequest::prompt(shops_prompt(location)))?;
    let shops: Vec<Shop> = extract_array(&text)?;
    tracing::info!(count = shops.len(), %location, "found nearby shops");
    Ok(shops)
}
