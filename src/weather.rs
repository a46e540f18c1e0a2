//! The marine-weather collaborator.
//!
//! [`OpenMeteo`] reads wave height and sea-surface temperature from the
//! Open-Meteo marine API and wind speed from its forecast API. Both are
//! keyless. Locations with no marine coverage (inland points) come back
//! with null wave data, which is reported as a decode failure. A missing
//! sea-surface temperature is not an error; waves and wind decide the risk.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::http::{self, ServiceError};
use crate::model::{Location, MarineConditions};

const MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// A source of current sea conditions.
pub trait MarineWeather {
    fn current(&self, location: Location) -> Result<MarineConditions, ServiceError>;
}

pub struct OpenMeteo {
    client: Client,
}

impl OpenMeteo {
    pub fn new(timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http::client(timeout)?,
        })
    }

    fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        location: Location,
        current: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let lat = location.lat.to_string();
        let lng = location.lng.to_string();
        let mut query = vec![
            ("latitude", lat.as_str()),
            ("longitude", lng.as_str()),
            ("current", current),
        ];
        query.extend_from_slice(extra);

        tracing::debug!(url, %location, "fetching marine weather");
        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        http::read_json(response)
    }
}

impl MarineWeather for OpenMeteo {
    fn current(&self, location: Location) -> Result<MarineConditions, ServiceError> {
        let marine: MarineResponse = self.fetch(
            MARINE_URL,
            location,
            "wave_height,sea_surface_temperature",
            &[],
        )?;
        let forecast: ForecastResponse = self.fetch(
            FORECAST_URL,
            location,
            "wind_speed_10m",
            &[("wind_speed_unit", "kmh")],
        )?;
        conditions(&marine, &forecast)
    }
}

// ── Wire format ──

#[derive(Debug, Deserialize)]
struct MarineResponse {
    current: MarineCurrent,
}

#[derive(Debug, Deserialize)]
struct MarineCurrent {
    wave_height: Option<f64>,
    sea_surface_temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    wind_speed_10m: Option<f64>,
}

fn conditions(
    marine: &MarineResponse,
    forecast: &ForecastResponse,
) -> Result<MarineConditions, ServiceError> {
    let wave_height = marine
        .current
        .wave_height
        .ok_or_else(|| ServiceError::Decode("no wave data for this location".to_string()))?;
    let wind_speed = forecast
        .current
        .wind_speed_10m
        .ok_or_else(|| ServiceError::Decode("no wind data for this location".to_string()))?;
    Ok(MarineConditions {
        wave_height,
        wind_speed,
        temperature: marine.current.sea_surface_temperature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn marine(wave: Option<f64>, sst: Option<f64>) -> MarineResponse {
        serde_json::from_value(json!({
            "latitude": 19.0,
            "longitude": 72.875,
            "current_units": {"wave_height": "m", "sea_surface_temperature": "°C"},
            "current": {"time": "2026-10-16T09:00", "interval": 900, "wave_height": wave, "sea_surface_temperature": sst}
        }))
        .unwrap()
    }

    fn forecast(wind: Option<f64>) -> ForecastResponse {
        serde_json::from_value(json!({
            "current": {"time": "2026-10-16T09:00", "interval": 900, "wind_speed_10m": wind}
        }))
        .unwrap()
    }

    #[test]
    fn combines_marine_and_forecast() {
        let conditions = conditions(&marine(Some(1.8), Some(28.4)), &forecast(Some(22.0))).unwrap();
        assert_eq!(
            conditions,
            MarineConditions {
                wave_height: 1.8,
                wind_speed: 22.0,
                temperature: Some(28.4),
            }
        );
    }

    #[test]
    fn inland_point_has_no_wave_data() {
        let err = conditions(&marine(None, None), &forecast(Some(10.0))).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(msg) if msg.contains("wave")));
    }

    #[test]
    fn missing_temperature_is_not_an_error() {
        let conditions = conditions(&marine(Some(3.0), None), &forecast(Some(45.0))).unwrap();
        assert_eq!(conditions.temperature, None);
        assert!((conditions.wave_height - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_wind_is_decode_error() {
        let err = conditions(&marine(Some(0.5), Some(27.0)), &forecast(None)).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(msg) if msg.contains("wind")));
    }
}
