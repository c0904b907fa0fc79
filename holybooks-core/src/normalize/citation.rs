//! Citation parsing (`3:16`, `3:1-10`)

use crate::error::{HolyBooksError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn bible_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([1-9]\d*):([1-9]\d*)(?:-([1-9]\d*))?$").expect("citation pattern compiles")
    })
}

fn ayah_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[1-9]\d*(?::[1-9]\d*)?$").expect("ayah pattern compiles"))
}

/// A `chapter:verse` or `chapter:verse-verse` locator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Citation {
    pub chapter: u32,
    pub start: u32,
    pub end: Option<u32>,
}

impl Citation {
    pub fn verse(chapter: u32, verse: u32) -> Self {
        Self {
            chapter,
            start: verse,
            end: None,
        }
    }

    pub fn range(chapter: u32, start: u32, end: u32) -> Self {
        Self {
            chapter,
            start,
            end: Some(end),
        }
    }

    pub fn is_range(&self) -> bool {
        self.end.is_some()
    }

    /// The verse part: `"16"` or `"1-10"`
    pub fn verses(&self) -> String {
        match self.end {
            Some(end) => format!("{}-{}", self.start, end),
            None => self.start.to_string(),
        }
    }
}

impl FromStr for Citation {
    type Err = HolyBooksError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || HolyBooksError::InvalidCitation(s.to_string());
        let captures = bible_pattern().captures(s).ok_or_else(invalid)?;
        let number = |i: usize| -> Result<Option<u32>> {
            captures
                .get(i)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                .transpose()
        };

        let chapter = number(1)?.ok_or_else(invalid)?;
        let start = number(2)?.ok_or_else(invalid)?;
        let end = number(3)?;
        if matches!(end, Some(end) if end < start) {
            return Err(invalid());
        }

        Ok(Self {
            chapter,
            start,
            end,
        })
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verses())
    }
}

/// Quran ayah citations are either a global ayah number or `surah:ayah`
pub fn validate_ayah_citation(citation: &str) -> Result<()> {
    if ayah_pattern().is_match(citation) {
        Ok(())
    } else {
        Err(HolyBooksError::InvalidCitation(citation.to_string()))
    }
}
