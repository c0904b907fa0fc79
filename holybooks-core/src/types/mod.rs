//! Document model: Book → Chapter → Verse
//!
//! Two realizations share the capabilities below: the Quran (`Quran` → `Surah` →
//! `Ayah`) and the Bible/Torah (`BibleBook` → `BibleChapter` → `BibleVerse`).
//! Children never hold their parent; they cache the parent's identifying fields
//! and rebuild a parent view on demand, so `verse.chapter()` returns a fresh value
//! on every call and is compared structurally.

mod bible;
mod lookup;
mod quran;
mod search;
mod torah;

pub use bible::{BibleBook, BibleChapter, BibleVerse};
pub use lookup::Lookup;
pub use quran::{Ayah, Quran, Sajda, SajdaInfo, Surah, SurahInfo};
pub use search::SearchResult;
pub use torah::TorahBook;

use crate::translation::Translation;

/// A whole scripture edition or a single bible book
pub trait Book {
    type Translation: Translation;

    fn name(&self) -> &str;

    fn translation(&self) -> &Self::Translation;
}

/// A chapter (or surah)
pub trait Chapter {
    fn number(&self) -> u32;
}

/// A verse (or ayah)
pub trait Verse {
    fn text(&self) -> &str;

    fn number(&self) -> u32;
}
