//! Bible provider responses
//!
//! The provider answers with a flat passage: the reference and the three
//! `translation_*` fields sit beside the verse list. They are folded into one
//! translation block and copied down onto every verse.

use super::raw::{RawBibleChapter, RawBibleTranslation, RawPassage};
use super::{decode, Citation};
use crate::error::{HolyBooksError, Result};
use crate::transport::Response;
use crate::types::{BibleChapter, BibleVerse, Lookup};

fn translation_of(passage: &RawPassage) -> RawBibleTranslation {
    RawBibleTranslation {
        name: passage.translation_name.clone(),
        id: passage.translation_id.clone(),
        note: passage.translation_note.clone(),
    }
}

fn stamp_verses(passage: &mut RawPassage) -> RawBibleTranslation {
    let translation = translation_of(passage);
    for verse in &mut passage.verses {
        verse.translation = Some(translation.clone());
        if verse.reference.is_none() {
            verse.reference = passage.reference.clone();
        }
    }
    translation
}

/// Lift book and chapter fields from the first verse onto a chapter object
pub fn hoist(mut passage: RawPassage) -> Result<RawBibleChapter> {
    let translation = stamp_verses(&mut passage);
    let first = passage
        .verses
        .first()
        .ok_or_else(|| HolyBooksError::missing("verses"))?;

    Ok(RawBibleChapter {
        number: first.chapter,
        book_name: first.book_name.clone(),
        book_id: first.book_id.clone(),
        reference: passage.reference,
        text: passage.text,
        translation: Some(translation),
        verses: passage.verses,
    })
}

/// `/{book}{chapter}`
pub fn chapter(response: &Response) -> Result<BibleChapter> {
    let passage = decode::<RawPassage>(response)?;
    BibleChapter::try_from(hoist(passage)?)
}

/// `/{book}{chapter}:{verse|verse-verse}`
///
/// A range citation yields every returned verse in provider order, a single
/// citation yields one verse.
pub fn verses(response: &Response, citation: &Citation) -> Result<Lookup<BibleVerse>> {
    let mut passage = decode::<RawPassage>(response)?;
    stamp_verses(&mut passage);

    let mut verses = passage
        .verses
        .into_iter()
        .map(BibleVerse::try_from)
        .collect::<Result<Vec<_>>>()?;

    if citation.is_range() {
        return Ok(Lookup::Many(verses));
    }
    if verses.len() > 1 {
        tracing::warn!(
            "Expected one verse for {}, provider sent {}",
            citation,
            verses.len()
        );
    }
    if verses.is_empty() {
        return Err(HolyBooksError::missing("verses"));
    }
    Ok(Lookup::One(verses.swap_remove(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::Translation;
    use crate::types::{Book, Chapter, Verse};
    use serde_json::{json, Value};

    fn passage(reference: &str, chapter: u32, verses: std::ops::RangeInclusive<u32>) -> Value {
        let verses: Vec<Value> = verses
            .map(|verse| {
                json!({
                    "book_id": "GEN",
                    "book_name": "Genesis",
                    "chapter": chapter,
                    "verse": verse,
                    "text": format!("Genesis {}:{}", chapter, verse)
                })
            })
            .collect();
        json!({
            "reference": reference,
            "verses": verses,
            "text": "joined text",
            "translation_id": "kjv",
            "translation_name": "King James Version",
            "translation_note": "Public Domain"
        })
    }

    #[test]
    fn test_chapter_hoists_book_fields() {
        let response = Response::json("http://bible.test", &passage("Genesis 1", 1, 1..=31));
        let chapter = chapter(&response).unwrap();
        assert_eq!(chapter.number(), 1);
        assert_eq!(chapter.book_name(), "Genesis");
        assert_eq!(chapter.book_id(), "GEN");
        assert_eq!(chapter.reference(), Some("Genesis 1"));
        assert_eq!(chapter.full_text(), Some("joined text"));
        assert_eq!(chapter.translation().name(), "King James Version");
        assert_eq!(chapter.translation().note(), Some("Public Domain"));
        assert_eq!(chapter.verses().len(), 31);
        assert_eq!(chapter.verses()[30].reference(), "Genesis 1");
        assert_eq!(chapter.book().name(), "Genesis");
    }

    #[test]
    fn test_range_yields_ordered_verses() {
        let response = Response::json("http://bible.test", &passage("Genesis 3:1-10", 3, 1..=10));
        let citation: Citation = "3:1-10".parse().unwrap();
        let verses = verses(&response, &citation).unwrap().into_vec();

        assert_eq!(verses.len(), 10);
        for (i, verse) in verses.iter().enumerate() {
            assert_eq!(verse.number(), i as u32 + 1);
            assert_eq!(verse.reference(), "Genesis 3:1-10");
            assert_eq!(verse.chapter().book().name(), verse.book_name());
        }
    }

    #[test]
    fn test_single_verse() {
        let response = Response::json("http://bible.test", &passage("Genesis 1:1", 1, 1..=1));
        let citation: Citation = "1:1".parse().unwrap();
        let lookup = verses(&response, &citation).unwrap();
        let verse = lookup.as_one().unwrap();
        assert_eq!(verse.text(), "Genesis 1:1");
        assert_eq!(verse.translation().id().to_string(), "kjv");
    }

    #[test]
    fn test_empty_passage() {
        let response = Response::json("http://bible.test", &json!({ "reference": "x", "verses": [] }));
        assert!(matches!(chapter(&response), Err(HolyBooksError::MissingField(f)) if f == "verses"));
    }

    #[test]
    fn test_missing_translation_name() {
        let mut body = passage("Genesis 1", 1, 1..=1);
        body.as_object_mut().unwrap().remove("translation_name");
        let response = Response::json("http://bible.test", &body);
        assert!(matches!(
            chapter(&response),
            Err(HolyBooksError::MissingField(f)) if f == "translation.name"
        ));
    }
}
