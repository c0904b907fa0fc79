//! Error types for holybooks

use std::fmt;
use thiserror::Error;

/// Result type alias using HolyBooksError
pub type Result<T> = std::result::Result<T, HolyBooksError>;

/// Top-level error type for all holybooks operations
#[derive(Debug, Error)]
pub enum HolyBooksError {
    /// The provider answered 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// The provider answered 429
    #[error("Too many requests!")]
    TooManyRequests,

    /// Any other non-200 status
    #[error("Api has an error, return code: {status}.\n{message}")]
    Api { status: u16, message: String },

    /// The response body was not JSON
    #[error("Attempt to decode JSON with unexpected mimetype: {content_type}\nlink: {url}")]
    ContentType { url: String, content_type: String },

    #[error("Wrong citation '{0}'! the citation must use one of these formats: 1:1, 3:10, 3:1-10")]
    InvalidCitation(String),

    #[error("The lang '{0}' is not supported, it only supports arabic(ar) and english(en)")]
    WrongLang(String),

    #[error("{0}")]
    Number(NumberError),

    /// A Torah lookup was given a book that only exists in the wider Bible
    #[doc(alias = "TorahOnly")]
    #[error("The book {0} wasn't found because it's available only in the Bible")]
    BibleOnly(String),

    /// The provider payload lacks a required key
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("This ayah has no audio attached")]
    NoAudio,

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HolyBooksError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Whether the error was raised before any request went out
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCitation(_) | Self::WrongLang(_) | Self::Number(_) | Self::BibleOnly(_)
        )
    }
}

/// Which bound a number violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBound {
    /// Must be at least `min`
    Lower { min: i64 },
    /// Must lie within `min..=max`
    Range { min: i64, max: i64 },
}

/// An out-of-range number, e.g. an ayah past the end of its surah
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberError {
    pub subject: String,
    pub bound: NumberBound,
}

impl NumberError {
    pub fn lower(subject: impl Into<String>, min: i64) -> Self {
        Self {
            subject: subject.into(),
            bound: NumberBound::Lower { min },
        }
    }

    pub fn range(subject: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            subject: subject.into(),
            bound: NumberBound::Range { min, max },
        }
    }
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            NumberBound::Lower { min } => write!(f, "{} must be at least {}", self.subject, min),
            NumberBound::Range { min, max } => {
                write!(f, "{} must be between {} to {}", self.subject, min, max)
            }
        }
    }
}

impl From<NumberError> for HolyBooksError {
    fn from(err: NumberError) -> Self {
        Self::Number(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_error_messages() {
        let lower = NumberError::lower("ayah", 1);
        assert_eq!(lower.to_string(), "ayah must be at least 1");

        let range = NumberError::range("ayah", 1, 7);
        assert_eq!(range.to_string(), "ayah must be between 1 to 7");
    }

    #[test]
    fn test_validation_errors() {
        assert!(HolyBooksError::BibleOnly("John".into()).is_validation());
        assert!(HolyBooksError::InvalidCitation("x".into()).is_validation());
        assert!(!HolyBooksError::TooManyRequests.is_validation());
    }

    #[test]
    fn test_too_many_requests_message() {
        assert_eq!(HolyBooksError::TooManyRequests.to_string(), "Too many requests!");
    }
}
