//! The generated user identifier.
//!
//! Created once on first use and then read back. Format:
//! `FISH-<base36 unix millis>-<9 uppercase base36 chars>`.

use jiff::Timestamp;
use uuid::Uuid;

use super::{KeyValueStore, Result};

const USER_ID_KEY: &str = "user_id";

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the stored user identifier, generating and storing one if absent.
pub fn user_id(store: &dyn KeyValueStore) -> Result<String> {
    if let Some(id) = store.get(USER_ID_KEY)?
        && !id.is_empty()
    {
        return Ok(id);
    }

    let id = generate_user_id();
    store.set(USER_ID_KEY, &id)?;
    tracing::info!(user_id = %id, "generated new user id");
    Ok(id)
}

/// Generates a fresh identifier without storing it.
pub fn generate_user_id() -> String {
    let millis = u64::try_from(Timestamp::now().as_millisecond()).unwrap_or_default();
    let suffix: String = Uuid::new_v4().as_bytes()[..9]
        .iter()
        .map(|b| char::from(BASE36[usize::from(*b) % BASE36.len()]))
        .collect();
    format!("FISH-{}-{suffix}", to_base36(millis).to_lowercase())
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // n % 36 < 36, so the index is in range.
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
