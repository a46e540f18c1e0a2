//! Core data model for FishID.
//!
//! These types travel between the assistant, the weather service,
//! the local store, and the CLI: identifications, weather reports,
//! shops, chat messages, and scan history.

mod chat;
mod history;
mod identification;
mod location;
mod shop;
mod weather;

pub use chat::{ChatMessage, Role};
pub use history::HistoryItem;
pub use identification::{FishResult, FreshnessAssessment, QualityAssessment};
pub use location::Location;
pub use shop::Shop;
pub use weather::{MarineConditions, WeatherReport};
