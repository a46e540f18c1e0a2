//! Shops: fishing-supply stores near the user.

use reqwest::Url;
use serde::{Deserialize, Serialize};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// A nearby fishing net, gear, or marine-supply shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub name: String,

    #[serde(default)]
    pub address: String,

    /// Free text as given by the assistant, e.g. `"2.3 km"`.
    #[serde(default)]
    pub distance: String,

    /// Kind of shop, e.g. `"Fishing Net Shop"`.
    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Shop {
    /// A maps search URL for this shop's name and address.
    pub fn maps_url(&self) -> Option<Url> {
        let query = format!("{} {}", self.name, self.address);
        Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", query.trim())]).ok()
    }
}
