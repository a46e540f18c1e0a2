//! Scan history: the most recent identifications, newest first.
//!
//! Stored as a JSON array under one key and capped at [`HISTORY_LIMIT`]
//! entries. Recording a scan pushes it to the front and drops the oldest
//! entries past the cap.

use crate::model::HistoryItem;

use super::{KeyValueStore, Result};

const HISTORY_KEY: &str = "scan_history";

/// Maximum number of scans kept.
pub const HISTORY_LIMIT: usize = 10;

/// Loads the scan history, newest first. Empty if nothing was recorded.
pub fn load_history(store: &dyn KeyValueStore) -> Result<Vec<HistoryItem>> {
    match store.get(HISTORY_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Records a scan at the front of the history, trimming to the cap.
pub fn record_scan(store: &dyn KeyValueStore, item: HistoryItem) -> Result<()> {
    let mut items = load_history(store)?;
    items.insert(0, item);
    items.truncate(HISTORY_LIMIT);
    store.set(HISTORY_KEY, &serde_json::to_string(&items)?)
}

/// Removes all recorded scans.
///
/// Idempotent: does nothing if no history exists.
pub fn clear_history(store: &dyn KeyValueStore) -> Result<()> {
    store.delete(HISTORY_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use uuid::Uuid;

    use crate::model::FishResult;
    use crate::storage::MemoryStore;

    fn sample_item(name: &str) -> HistoryItem {
        HistoryItem {
            id: Uuid::new_v4(),
            timestamp: Timestamp::now(),
            image: format!("{name}.jpg"),
            result: FishResult {
                common_name: Some(name.to_string()),
                scientific_name: None,
                features: vec![],
                habitat: None,
                edibility: None,
                confidence: Some(80.0),
                freshness: None,
                quality: None,
            },
        }
    }

    #[test]
    fn load_history_empty() {
        let store = MemoryStore::default();
        assert!(load_history(&store).unwrap().is_empty());
    }

    #[test]
    fn newest_first() {
        let store = MemoryStore::default();
        record_scan(&store, sample_item("Hilsa")).unwrap();
        record_scan(&store, sample_item("Pomfret")).unwrap();

        let items = load_history(&store).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].result.display_name(), "Pomfret");
        assert_eq!(items[1].result.display_name(), "Hilsa");
    }

    #[test]
    fn capped_at_limit_dropping_oldest() {
        let store = MemoryStore::default();
        for i in 0..HISTORY_LIMIT + 3 {
            record_scan(&store, sample_item(&format!("fish-{i}"))).unwrap();
        }

        let items = load_history(&store).unwrap();
        assert_eq!(items.len(), HISTORY_LIMIT);
        assert_eq!(items[0].result.display_name(), "fish-12");
        assert_eq!(items[HISTORY_LIMIT - 1].result.display_name(), "fish-3");
    }

    #[test]
    fn clear_history_removes_all() {
        let store = MemoryStore::default();
        record_scan(&store, sample_item("Rohu")).unwrap();
        clear_history(&store).unwrap();
        assert!(load_history(&store).unwrap().is_empty());

        // Clearing an empty history is fine.
        clear_history(&store).unwrap();
    }

    #[test]
    fn corrupt_history_is_an_error() {
        let store = MemoryStore::default();
        store.set(HISTORY_KEY, "not json").unwrap();
        let err = load_history(&store).unwrap_err();
        assert!(matches!(err, crate::storage::StorageError::Json(_)));
    }
}
