//! Bible realization: BibleBook → BibleChapter → BibleVerse

use super::{Book, Chapter, Verse};
use crate::error::{HolyBooksError, Result};
use crate::normalize::raw::{RawBibleChapter, RawBibleVerse};
use crate::translation::BibleTranslation;
use serde::Serialize;
use std::fmt;

/// A single bible book, rebuilt on demand from a chapter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BibleBook {
    name: String,
    id: String,
    translation: BibleTranslation,
    chapter_number: u32,
}

impl BibleBook {
    /// Provider book id, e.g. `"GEN"`
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of the chapter this view was built from
    pub fn chapter_number(&self) -> u32 {
        self.chapter_number
    }
}

impl Book for BibleBook {
    type Translation = BibleTranslation;

    fn name(&self) -> &str {
        &self.name
    }

    fn translation(&self) -> &BibleTranslation {
        &self.translation
    }
}

impl fmt::Display for BibleBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A bible chapter
#[derive(Debug, Clone, Serialize)]
pub struct BibleChapter {
    number: u32,
    book_name: String,
    book_id: String,
    reference: Option<String>,
    full_text: Option<String>,
    translation: BibleTranslation,
    verses: Vec<BibleVerse>,
}

impl BibleChapter {
    /// A bare chapter view around an already-built translation, as rebuilt by a verse
    pub fn derived(
        number: u32,
        book_name: impl Into<String>,
        book_id: impl Into<String>,
        translation: BibleTranslation,
    ) -> Self {
        Self {
            number,
            book_name: book_name.into(),
            book_id: book_id.into(),
            reference: None,
            full_text: None,
            translation,
            verses: Vec::new(),
        }
    }

    pub fn book_name(&self) -> &str {
        &self.book_name
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    /// Reference of the response this chapter came from, e.g. `"John 3"`
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Whole chapter text as one string
    pub fn full_text(&self) -> Option<&str> {
        self.full_text.as_deref()
    }

    pub fn translation(&self) -> &BibleTranslation {
        &self.translation
    }

    /// Verses carried by the response; empty for derived views
    pub fn verses(&self) -> &[BibleVerse] {
        &self.verses
    }

    /// Rebuild the book this chapter belongs to
    pub fn book(&self) -> BibleBook {
        BibleBook {
            name: self.book_name.clone(),
            id: self.book_id.clone(),
            translation: self.translation.clone(),
            chapter_number: self.number,
        }
    }
}

impl TryFrom<RawBibleChapter> for BibleChapter {
    type Error = HolyBooksError;

    fn try_from(raw: RawBibleChapter) -> Result<Self> {
        let translation = raw
            .translation
            .ok_or_else(|| HolyBooksError::missing("translation"))?;
        let verses = raw
            .verses
            .into_iter()
            .map(BibleVerse::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            number: raw.number.ok_or_else(|| HolyBooksError::missing("number"))?,
            book_name: raw
                .book_name
                .ok_or_else(|| HolyBooksError::missing("book_name"))?,
            book_id: raw.book_id.ok_or_else(|| HolyBooksError::missing("book_id"))?,
            reference: raw.reference,
            full_text: raw.text,
            translation: BibleTranslation::try_from(translation)?,
            verses,
        })
    }
}

impl Chapter for BibleChapter {
    fn number(&self) -> u32 {
        self.number
    }
}

impl PartialEq for BibleChapter {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.book_id == other.book_id
    }
}

impl fmt::Display for BibleChapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book_name, self.number)
    }
}

/// A bible verse
#[derive(Debug, Clone, Serialize)]
pub struct BibleVerse {
    number: u32,
    text: String,
    book_id: String,
    book_name: String,
    chapter_number: u32,
    reference: String,
    translation: BibleTranslation,
}

impl BibleVerse {
    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn book_name(&self) -> &str {
        &self.book_name
    }

    pub fn chapter_number(&self) -> u32 {
        self.chapter_number
    }

    /// Reference of the whole response, shared by every verse of a range
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn translation(&self) -> &BibleTranslation {
        &self.translation
    }

    /// `"{book} {chapter}:{verse}"`
    pub fn citation(&self) -> String {
        format!("{} {}:{}", self.book_name, self.chapter_number, self.number)
    }

    /// Rebuild the chapter this verse belongs to
    pub fn chapter(&self) -> BibleChapter {
        BibleChapter::derived(
            self.chapter_number,
            self.book_name.clone(),
            self.book_id.clone(),
            self.translation.clone(),
        )
    }

    /// Rebuild the book this verse belongs to
    pub fn book(&self) -> BibleBook {
        self.chapter().book()
    }
}

impl TryFrom<RawBibleVerse> for BibleVerse {
    type Error = HolyBooksError;

    fn try_from(raw: RawBibleVerse) -> Result<Self> {
        let translation = raw
            .translation
            .ok_or_else(|| HolyBooksError::missing("translation"))?;

        Ok(Self {
            number: raw.verse.ok_or_else(|| HolyBooksError::missing("verse"))?,
            text: raw.text.ok_or_else(|| HolyBooksError::missing("text"))?,
            book_id: raw.book_id.ok_or_else(|| HolyBooksError::missing("book_id"))?,
            book_name: raw
                .book_name
                .ok_or_else(|| HolyBooksError::missing("book_name"))?,
            chapter_number: raw.chapter.ok_or_else(|| HolyBooksError::missing("chapter"))?,
            reference: raw
                .reference
                .ok_or_else(|| HolyBooksError::missing("reference"))?,
            translation: BibleTranslation::try_from(translation)?,
        })
    }
}

impl Verse for BibleVerse {
    fn text(&self) -> &str {
        &self.text
    }

    fn number(&self) -> u32 {
        self.number
    }
}

impl PartialEq for BibleVerse {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
            && self.chapter_number == other.chapter_number
            && self.book_id == other.book_id
    }
}

impl fmt::Display for BibleVerse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
