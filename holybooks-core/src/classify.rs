//! Status code classification
//!
//! Single dispatch point turning a transport response into either a body to
//! decode, the absence value (204), or one of the typed transport errors.

use crate::error::{HolyBooksError, Result};
use crate::transport::Response;
use serde_json::Value;

/// Classify a response by status code
///
/// `Ok(Some(_))` for 200, `Ok(None)` for 204, an error otherwise.
pub fn classify(response: Response) -> Result<Option<Response>> {
    match response.status {
        200 => Ok(Some(response)),
        204 => {
            tracing::debug!("No content for {}", response.url);
            Ok(None)
        }
        404 => {
            let message = not_found_message(&response.body);
            tracing::warn!("Not found: {} ({})", response.url, message);
            Err(HolyBooksError::NotFound(message))
        }
        429 => {
            tracing::warn!("Rate limited by provider: {}", response.url);
            Err(HolyBooksError::TooManyRequests)
        }
        status => {
            let message = error_message(&response.body);
            tracing::warn!("Provider returned {} for {}: {}", status, response.url, message);
            Err(HolyBooksError::Api { status, message })
        }
    }
}

/// `data`, then `error`, then the whole payload
fn not_found_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("data").or_else(|| map.get("error")) {
            Some(value) => text_of(value),
            None => Value::Object(map).to_string(),
        },
        Ok(other) => text_of(&other),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

/// Best-effort `error` field, falling back to the raw body
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if map.contains_key("error") => text_of(&map["error"]),
        _ => String::from_utf8_lossy(body).into_owned(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
