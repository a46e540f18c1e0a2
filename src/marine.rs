//! Marine weather report: fetch conditions, classify risk, advise.

use jiff::Timestamp;

use crate::classify::{RiskStatus, classify_risk};
use crate::http::ServiceError;
use crate::model::{Location, MarineConditions, WeatherReport};
use crate::weather::MarineWeather;

/// Fetch current conditions at `location` and classify them.
pub fn report(
    weather: &dyn MarineWeather,
    location: Location,
) -> Result<WeatherReport, ServiceError> {
    let conditions = weather.current(location)?;
    let status = classify_risk(conditions.wave_height, conditions.wind_speed);
    tracing::info!(%location, %status, "classified marine conditions");

    Ok(WeatherReport {
        location,
        wind_speed: conditions.wind_speed,
        wave_height: conditions.wave_height,
        temperature: conditions.temperature,
        status,
        analysis: analysis(&conditions, status),
        last_updated: Timestamp::now(),
    })
}

/// A one-line advisory for the classified conditions.
pub fn analysis(conditions: &MarineConditions, status: RiskStatus) -> String {
    let readings = format!(
        "waves {:.1} m, wind {:.0} km/h",
        conditions.wave_height, conditions.wind_speed
    );
    match status {
        RiskStatus::Safe => format!("Calm seas ({readings}). Conditions are suitable for fishing."),
        RiskStatus::Warning => format!(
            "Moderate seas ({readings}). Small boats should stay close to shore and watch for changes."
        ),
        RiskStatus::Danger => {
            format!("Rough seas ({readings}). Avoid going out; return to harbour if already at sea.")
        }
        RiskStatus::Emergency => format!(
            "Severe conditions ({readings}). Do not put to sea; vessels at sea should contact the Coast Guard."
        ),
    }
}
