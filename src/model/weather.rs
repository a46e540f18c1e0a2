//! Marine weather: raw conditions and the classified report built from them.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::classify::RiskStatus;

use super::Location;

/// Current sea conditions at a location, as reported by the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarineConditions {
    /// Significant wave height in meters.
    pub wave_height: f64,

    /// Wind speed at 10 m in km/h.
    pub wind_speed: f64,

    /// Sea-surface temperature in °C, when the marine model covers the point.
    pub temperature: Option<f64>,
}

/// Classified conditions ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: Location,
    pub wind_speed: f64,
    pub wave_height: f64,
    pub temperature: Option<f64>,
    pub status: RiskStatus,
    pub analysis: String,
    pub last_updated: Timestamp,
}
