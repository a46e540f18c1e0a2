//! Scan history entries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FishResult;

/// A past identification, kept in the capped scan history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: Uuid,
    pub timestamp: Timestamp,

    /// Where the scanned image came from (a path or label, never the bytes).
    pub image: String,

    pub result: FishResult,
}
