//! Translation (edition) records attached to every scripture entity

use crate::error::{HolyBooksError, Result};
use crate::normalize::raw::{RawBibleTranslation, RawEdition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider identifier of a translation. Quran editions use strings like
/// `"en.asad"`, other providers may hand out numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationId {
    Text(String),
    Number(i64),
}

impl fmt::Display for TranslationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationId::Text(s) => f.write_str(s),
            TranslationId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for TranslationId {
    fn from(s: &str) -> Self {
        TranslationId::Text(s.to_string())
    }
}

impl From<i64> for TranslationId {
    fn from(n: i64) -> Self {
        TranslationId::Number(n)
    }
}

/// Capability shared by every translation record
pub trait Translation {
    /// Human readable name of the translation
    fn name(&self) -> &str;

    /// Provider identifier
    fn id(&self) -> &TranslationId;
}

/// Edition metadata returned by the Quran provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuranTranslation {
    name: String,
    id: TranslationId,
    language: Option<String>,
    author: Option<String>,
    format: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    direction: Option<String>,
}

impl QuranTranslation {
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The edition's English name, usually the translator
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// `"text"` or `"audio"`
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// `"translation"`, `"tafsir"`, `"quran"`, ...
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// `"ltr"` or `"rtl"` when the provider sets it
    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }
}

impl Translation for QuranTranslation {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &TranslationId {
        &self.id
    }
}

impl TryFrom<RawEdition> for QuranTranslation {
    type Error = HolyBooksError;

    fn try_from(raw: RawEdition) -> Result<Self> {
        Ok(Self {
            name: raw.name.ok_or_else(|| HolyBooksError::missing("edition.name"))?,
            id: raw
                .identifier
                .ok_or_else(|| HolyBooksError::missing("edition.identifier"))?,
            language: raw.language,
            author: raw.english_name,
            format: raw.format,
            kind: raw.kind,
            direction: raw.direction,
        })
    }
}

/// Translation metadata returned by the Bible provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibleTranslation {
    name: String,
    id: TranslationId,
    note: Option<String>,
}

impl BibleTranslation {
    pub fn new(name: impl Into<String>, id: impl Into<TranslationId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

impl Translation for BibleTranslation {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &TranslationId {
        &self.id
    }
}

impl TryFrom<RawBibleTranslation> for BibleTranslation {
    type Error = HolyBooksError;

    fn try_from(raw: RawBibleTranslation) -> Result<Self> {
        Ok(Self {
            name: raw
                .name
                .ok_or_else(|| HolyBooksError::missing("translation.name"))?,
            id: raw.id.ok_or_else(|| HolyBooksError::missing("translation.id"))?,
            note: raw.note,
        })
    }
}
