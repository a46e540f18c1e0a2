//! Chat with the fishing assistant.
//!
//! The conversation persists in the store between invocations. Each turn
//! replays the transcript as history, then records the user message and
//! the reply. Service failures and empty replies still produce a reply (an
//! apology, or a note that no key is configured) and that reply is recorded
//! too, so the replayed history never carries an empty turn.

use crate::assistant::{Assistant, AssistantRequest};
use crate::http::ServiceError;
use crate::model::ChatMessage;
use crate::storage::{self, KeyValueStore, StorageError};

pub const APOLOGY: &str = "Sorry, I encountered an error.";
pub const NOT_CONFIGURED: &str = "API key not configured.";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is empty")]
    Blank,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The system instruction for a reply language.
pub fn system_instruction(language: &str) -> String {
    format!("You are a helpful fishing assistant. Respond in {language}.")
}

/// Send one message and return the assistant's reply.
///
/// `language` is the display name of the reply language, e.g. `"Tamil"`.
pub fn send(
    assistant: &dyn Assistant,
    store: &dyn KeyValueStore,
    language: &str,
    message: &str,
) -> Result<String, ChatError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ChatError::Blank);
    }

    let request = AssistantRequest {
        system: Some(system_instruction(language)),
        history: storage::load_transcript(store)?,
        prompt: message.to_string(),
        image: None,
    };

    let reply = match assistant.generate(&request) {
        Ok(text) if text.trim().is_empty() => {
            tracing::warn!("chat reply was empty");
            APOLOGY.to_string()
        }
        Ok(text) => text,
        Err(ServiceError::MissingCredential) => NOT_CONFIGURED.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "chat request failed");
            APOLOGY.to_string()
        }
    };

    storage::append_transcript(
        store,
        &[ChatMessage::user(message), ChatMessage::assistant(reply.as_str())],
    )?;
    Ok(reply)
}
