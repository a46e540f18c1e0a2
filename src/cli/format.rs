//! Output formatting for CLI display.

use std::fmt::Write;

use crate::location::LocationSource;
use crate::model::{ChatMessage, FishResult, HistoryItem, Location, Role, Shop, WeatherReport};

/// Multi-line summary of an identification.
pub(super) fn format_fish_result(result: &FishResult) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", result.display_name());
    if let (Some(_), Some(scientific)) = (&result.common_name, &result.scientific_name) {
        let _ = write!(out, " ({scientific})");
    }
    if let Some(confidence) = result.confidence {
        let _ = write!(out, "  [{confidence:.0}% confidence]");
    }

    if let Some(freshness) = &result.freshness {
        let _ = write!(
            out,
            "\nFreshness: {} {}/100",
            freshness.grade, freshness.score
        );
        push_detail(&mut out, &freshness.assessment, &freshness.indicators);
    }
    if let Some(quality) = &result.quality {
        let _ = write!(out, "\nQuality:   {} {}/100", quality.grade, quality.score);
        push_detail(&mut out, &quality.assessment, &quality.factors);
    }

    if !result.features.is_empty() {
        let _ = write!(out, "\nFeatures:  {}", result.features.join(", "));
    }
    if let Some(habitat) = &result.habitat {
        let _ = write!(out, "\nHabitat:   {habitat}");
    }
    if let Some(edibility) = &result.edibility {
        let _ = write!(out, "\nEdibility: {edibility}");
    }
    out
}

fn push_detail(out: &mut String, assessment: &str, points: &[String]) {
    if !assessment.is_empty() {
        let _ = write!(out, "\n  {assessment}");
    }
    for point in points {
        let _ = write!(out, "\n  - {point}");
    }
}

pub(super) fn format_weather_report(report: &WeatherReport, source: LocationSource) -> String {
    let temp = report
        .temperature
        .map_or_else(|| "n/a".to_string(), |t| format!("{t:.1} °C"));
    format!(
        "{status} at {location} ({source})\n\
         Waves:       {wave:.1} m\n\
         Wind:        {wind:.0} km/h\n\
         Sea surface: {temp}\n\
         {analysis}",
        status = report.status.label().to_uppercase(),
        location = report.location,
        wave = report.wave_height,
        wind = report.wind_speed,
        analysis = report.analysis,
    )
}

pub(super) fn format_shops(shops: &[Shop], location: Location, source: LocationSource) -> String {
    if shops.is_empty() {
        return format!("No shops found near {location} ({source})");
    }

    let mut out = format!(
        "{} shop(s) near {location} ({source})",
        shops.len()
    );
    for shop in shops {
        let _ = write!(out, "\n\n{}", shop.name);
        if !shop.kind.is_empty() {
            let _ = write!(out, "  [{}]", shop.kind);
        }
        if !shop.distance.is_empty() {
            let _ = write!(out, "  {}", shop.distance);
        }
        if !shop.address.is_empty() {
            let _ = write!(out, "\n  {}", shop.address);
        }
        if let Some(phone) = &shop.phone {
            let _ = write!(out, "\n  {phone}");
        }
        if let Some(url) = shop.maps_url() {
            let _ = write!(out, "\n  {url}");
        }
    }
    out
}

pub(super) fn format_transcript(transcript: &[ChatMessage]) -> String {
    if transcript.is_empty() {
        return "No conversation".to_string();
    }
    transcript
        .iter()
        .map(|m| {
            let who = match m.role {
                Role::User => "you",
                Role::Assistant => "assistant",
            };
            format!("{who}> {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One line per history entry: short ID, time, name, grades.
pub(super) fn format_history_item(item: &HistoryItem) -> String {
    let short_id = &item.id.to_string()[..8];
    let mut line = format!(
        "{short_id}  {}  {}",
        item.timestamp.strftime("%Y-%m-%d %H:%M"),
        item.result.display_name()
    );
    if let Some(freshness) = &item.result.freshness {
        let _ = write!(line, "  freshness: {}", freshness.grade);
    }
    if let Some(quality) = &item.result.quality {
        let _ = write!(line, "  quality: {}", quality.grade);
    }
    let _ = write!(line, "  ({})", item.image);
    line
}
