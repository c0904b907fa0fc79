//! Response normalizer
//!
//! Decodes provider responses into the raw shapes of [`raw`], fills in what the
//! providers leave implicit (edition stamps, hoisted book fields, folded
//! translation blocks) and hands the result to the model constructors.

pub mod bible;
mod citation;
pub mod quran;
pub mod raw;

pub use citation::{validate_ayah_citation, Citation};

use crate::error::{HolyBooksError, Result};
use crate::transport::Response;
use serde::de::DeserializeOwned;

/// Decode a JSON body, rejecting non-JSON content types
pub fn decode<T: DeserializeOwned>(response: &Response) -> Result<T> {
    if let Some(content_type) = &response.content_type {
        if !content_type.to_ascii_lowercase().contains("json") {
            return Err(HolyBooksError::ContentType {
                url: response.url.clone(),
                content_type: content_type.clone(),
            });
        }
    }
    Ok(serde_json::from_slice(&response.body)?)
}
