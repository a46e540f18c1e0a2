//! Chat transcript: the running conversation with the assistant.
//!
//! Capped at [`TRANSCRIPT_LIMIT`] messages. Appending past the cap drops the
//! oldest messages in user/assistant pairs, so the kept transcript still
//! starts with a user turn.

use crate::model::ChatMessage;

use super::{KeyValueStore, Result};

const TRANSCRIPT_KEY: &str = "chat_transcript";

/// Maximum number of messages kept (twenty exchanges).
pub const TRANSCRIPT_LIMIT: usize = 40;

/// Loads the transcript in conversation order. Empty if none was stored.
pub fn load_transcript(store: &dyn KeyValueStore) -> Result<Vec<ChatMessage>> {
    match store.get(TRANSCRIPT_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Appends messages to the end of the transcript, trimming to the cap.
pub fn append_transcript(store: &dyn KeyValueStore, messages: &[ChatMessage]) -> Result<()> {
    let mut transcript = load_transcript(store)?;
    transcript.extend_from_slice(messages);
    let excess = transcript.len().saturating_sub(TRANSCRIPT_LIMIT);
    let dropped = (excess + excess % 2).min(transcript.len());
    transcript.drain(..dropped);
    store.set(TRANSCRIPT_KEY, &serde_json::to_string(&transcript)?)
}

/// Forgets the conversation.
pub fn clear_transcript(store: &dyn KeyValueStore) -> Result<()> {
    store.delete(TRANSCRIPT_KEY)
}
