use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};

use super::token_store::TokenStore;

/// Read the `exp` claim of a JWT-shaped token without verifying anything.
///
/// This is a client-side hint for skipping doomed requests. The backend stays
/// the only authority on whether a token is valid.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;
    let seconds = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;
    DateTime::from_timestamp(seconds, 0)
}

/// A session counts as valid when a token is present and, if it carries an
/// `exp` claim, that instant is still in the future.
pub fn is_session_valid(store: &dyn TokenStore, now: DateTime<Utc>) -> bool {
    match store.get() {
        None => false,
        Some(token) => token_expiry(&token).is_none_or(|exp| exp > now),
    }
}

/// Clear the stored session when the hint says the token already expired.
/// Returns whether a usable token remains.
pub fn drop_if_expired(store: &dyn TokenStore, now: DateTime<Utc>) -> bool {
    if store.get().is_none() {
        return false;
    }
    if is_session_valid(store, now) {
        return true;
    }
    log::info!("Stored token expired, clearing session");
    if let Err(e) = store.clear() {
        log::warn!("Failed to clear expired session: {}", e);
    }
    false
}
