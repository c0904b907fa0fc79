//! Quran provider responses
//!
//! The provider only sends the edition once per response; every surah and ayah
//! gets it stamped before construction so each entity carries its translation.

use super::decode;
use super::raw::{RawAyah, RawAyahBatch, RawEdition, RawQuran, RawSearch, RawShape, RawSurah};
use crate::endpoint::Locator;
use crate::error::{HolyBooksError, Result};
use crate::transport::{Response, TransportHandle};
use crate::types::{Ayah, Lookup, Quran, SearchResult, Surah, SurahInfo};
use std::collections::HashMap;
use std::sync::Arc;

fn stamp_surah(surah: &mut RawSurah, edition: &RawEdition) {
    surah.edition = Some(edition.clone());
    for ayah in &mut surah.ayahs {
        ayah.edition = Some(edition.clone());
    }
}

fn stamp_nested_surah(ayah: &mut RawAyah, edition: &RawEdition) {
    if let Some(surah) = ayah.surah.as_mut() {
        surah.edition.get_or_insert_with(|| edition.clone());
    }
}

/// `/quran/{translation}`
pub fn quran(response: &Response, transport: Option<TransportHandle>) -> Result<Quran> {
    let mut raw = decode::<RawShape<RawQuran>>(response)?.into_inner();
    let edition = raw
        .edition
        .clone()
        .ok_or_else(|| HolyBooksError::missing("edition"))?;
    for surah in &mut raw.surahs {
        stamp_surah(surah, &edition);
    }
    Quran::from_raw(raw, transport)
}

/// `/surah/{n}/{translation}`
pub fn surah(response: &Response, transport: Option<TransportHandle>) -> Result<Surah> {
    let mut raw = decode::<RawShape<RawSurah>>(response)?.into_inner();
    let edition = raw
        .edition
        .clone()
        .ok_or_else(|| HolyBooksError::missing("edition"))?;
    stamp_surah(&mut raw, &edition);
    Surah::from_raw(raw, transport)
}

/// `/ayah/{citation}/{translation}` or one of the locator endpoints
pub fn ayahs(
    response: &Response,
    locator: &Locator,
    transport: Option<TransportHandle>,
) -> Result<Lookup<Ayah>> {
    if locator.is_batch() {
        batch(response, transport).map(Lookup::Many)
    } else {
        single(response, transport).map(Lookup::One)
    }
}

fn single(response: &Response, transport: Option<TransportHandle>) -> Result<Ayah> {
    let mut raw = decode::<RawShape<RawAyah>>(response)?.into_inner();
    let edition = raw
        .edition
        .clone()
        .ok_or_else(|| HolyBooksError::missing("edition"))?;
    stamp_nested_surah(&mut raw, &edition);
    Ayah::from_raw(raw, None, transport)
}

/// Ayahs of a juz/manzil/... run. Ayahs of the same surah share one surah
/// record rather than each rebuilding its own.
fn batch(response: &Response, transport: Option<TransportHandle>) -> Result<Vec<Ayah>> {
    let raw = decode::<RawShape<RawAyahBatch>>(response)?.into_inner();
    let edition = raw
        .edition
        .ok_or_else(|| HolyBooksError::missing("edition"))?;

    let mut surahs: HashMap<u32, Arc<SurahInfo>> = HashMap::new();
    raw.ayahs
        .into_iter()
        .map(|mut ayah| {
            ayah.edition = Some(edition.clone());
            stamp_nested_surah(&mut ayah, &edition);

            let number = ayah.surah.as_ref().and_then(|s| s.number);
            let shared = match (number, ayah.surah.take()) {
                (Some(number), Some(nested)) => {
                    let info = match surahs.get(&number) {
                        Some(info) => Arc::clone(info),
                        None => {
                            let info = Arc::new(SurahInfo::from_raw(*nested)?);
                            surahs.insert(number, Arc::clone(&info));
                            info
                        }
                    };
                    Some(info)
                }
                (_, nested) => {
                    ayah.surah = nested;
                    None
                }
            };
            Ayah::from_raw(ayah, shared, transport.clone())
        })
        .collect()
}

/// `/search/{keyword}/{surah|all}/{translation}`; every match carries its own edition
///
/// The provider's `count` is kept as reported; it falls back to the number of
/// matches when absent.
pub fn search(response: &Response, transport: Option<TransportHandle>) -> Result<SearchResult> {
    let raw = decode::<RawShape<RawSearch>>(response)?.into_inner();
    let count = raw.count.unwrap_or(raw.matches.len() as u32);
    tracing::debug!("Search matched {} ayahs", count);

    let matches = raw
        .matches
        .into_iter()
        .map(|mut ayah| {
            let edition = ayah
                .edition
                .clone()
                .ok_or_else(|| HolyBooksError::missing("match.edition"))?;
            stamp_nested_surah(&mut ayah, &edition);
            Ayah::from_raw(ayah, None, transport.clone())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchResult::new(count, matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::Translation;
    use crate::types::{Book, Chapter, Verse};
    use serde_json::{json, Value};

    fn edition() -> Value {
        json!({
            "identifier": "en.asad", "language": "en", "name": "Asad",
            "englishName": "Muhammad Asad", "format": "text", "type": "translation"
        })
    }

    fn surah_header(number: u32) -> Value {
        json!({
            "number": number, "name": format!("surah-{}", number),
            "englishName": format!("Surah {}", number),
            "englishNameTranslation": "Meaning", "numberOfAyahs": 7, "revelationType": "Meccan"
        })
    }

    fn ayah(number: u32, in_surah: u32) -> Value {
        json!({
            "number": number, "text": format!("ayah {}", number), "numberInSurah": in_surah,
            "juz": 1, "manzil": 1, "page": 1, "ruku": 1, "hizbQuarter": 1, "sajda": false
        })
    }

    fn envelope(data: Value) -> Response {
        Response::json("http://quran.test", &json!({ "code": 200, "status": "OK", "data": data }))
    }

    #[test]
    fn test_quran_stamps_every_surah() {
        let response = envelope(json!({
            "surahs": [
                { "number": 1, "name": "a", "englishName": "A", "englishNameTranslation": "x",
                  "revelationType": "Meccan", "ayahs": [ayah(1, 1), ayah(2, 2)] },
                { "number": 2, "name": "b", "englishName": "B", "englishNameTranslation": "y",
                  "revelationType": "Medinan", "ayahs": [ayah(8, 1)] }
            ],
            "edition": edition()
        }));

        let quran = quran(&response, None).unwrap();
        assert_eq!(quran.name(), "Quran");
        assert_eq!(quran.surahs().len(), 2);
        assert_eq!(quran.surahs()[1].number(), 2);
        assert_eq!(quran.surahs()[1].translation().name(), "Asad");
        assert_eq!(quran.surahs()[0].ayats()[1].translation().name(), "Asad");
        assert_eq!(quran.surah(2).unwrap().number_of_verses(), 1);
    }

    #[test]
    fn test_quran_empty_surahs() {
        let response = envelope(json!({ "surahs": [], "edition": edition() }));
        assert!(quran(&response, None).unwrap().surahs().is_empty());
    }

    #[test]
    fn test_surah_accepts_bare_payload() {
        let mut data = surah_header(1);
        data["ayahs"] = json!([ayah(1, 1)]);
        data["edition"] = edition();

        let wrapped = surah(&envelope(data.clone()), None).unwrap();
        let bare = surah(&Response::json("http://quran.test", &data), None).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(bare.number_of_verses(), 7);
        assert!(bare.ayats()[0].is_in(&bare));
    }

    #[test]
    fn test_single_ayah() {
        let mut data = ayah(262, 255);
        data["edition"] = edition();
        data["surah"] = surah_header(2);

        let lookup = ayahs(&envelope(data), &Locator::Citation("2:255".into()), None).unwrap();
        let ayah = lookup.as_one().unwrap();
        assert_eq!(ayah.number(), 262);
        assert_eq!(ayah.surah().name(), "surah-2");
        assert_eq!(ayah.surah().translation().name(), "Asad");
    }

    #[test]
    fn test_batch_shares_surah_records() {
        let mut first = ayah(1, 1);
        first["surah"] = surah_header(1);
        let mut second = ayah(2, 2);
        second["surah"] = surah_header(1);
        let mut third = ayah(8, 1);
        third["surah"] = surah_header(2);

        let response = envelope(json!({
            "number": 1,
            "ayahs": [first, second, third],
            "surahs": {},
            "edition": edition()
        }));
        let ayahs = ayahs(&response, &Locator::Juz(1), None).unwrap().into_vec();
        assert_eq!(ayahs.len(), 3);
        assert!(std::ptr::eq(ayahs[0].surah(), ayahs[1].surah()));
        assert_eq!(ayahs[2].surah().number(), 2);
    }

    #[test]
    fn test_sajda_batch_records() {
        let mut data = ayah(1160, 206);
        data["sajda"] = json!({ "id": 1, "recommended": true, "obligatory": false });
        data["surah"] = surah_header(7);

        let response = envelope(json!({ "ayahs": [data], "edition": edition() }));
        let ayahs = ayahs(&response, &Locator::Sajda, None).unwrap().into_vec();
        let info = ayahs[0].sajda().info().copied().unwrap();
        assert_eq!(info.id, Some(1));
        assert!(info.recommended);
        assert!(!info.obligatory);
    }

    #[test]
    fn test_search_matches_keep_their_edition() {
        let response = envelope(json!({
            "count": 1,
            "matches": [{
                "number": 5, "text": "Thee alone do we worship", "numberInSurah": 5,
                "edition": { "identifier": "en.pickthall", "name": "Pickthall" },
                "surah": surah_header(1)
            }]
        }));
        let result = search(&response, None).unwrap();
        let matches = result.matches();
        assert_eq!(result.count(), 1);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].translation().id().to_string(), "en.pickthall");
        assert_eq!(matches[0].surah().translation().name(), "Pickthall");
        assert_eq!(matches[0].juz(), None);
        assert_eq!(matches[0].sajda(), false);
    }

    #[test]
    fn test_search_keeps_provider_count() {
        let page: Vec<Value> = (1..=2)
            .map(|n| {
                let mut m = ayah(n, n);
                m["edition"] = edition();
                m["surah"] = surah_header(1);
                m
            })
            .collect();
        let response = envelope(json!({ "count": 40, "matches": page }));

        let result = search(&response, None).unwrap();
        assert_eq!(result.count(), 40);
        assert_eq!(result.len(), 2);

        let response = envelope(json!({ "matches": [] }));
        let result = search(&response, None).unwrap();
        assert_eq!(result.count(), 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_malformed_enveloped_ayah_is_a_decode_error() {
        let mut data = ayah(262, 255);
        data["juz"] = json!("first");
        data["edition"] = edition();
        data["surah"] = surah_header(2);

        let err = ayahs(&envelope(data), &Locator::Citation("2:255".into()), None).unwrap_err();
        assert!(matches!(err, HolyBooksError::Decode(_)), "{:?}", err);
    }

    #[test]
    fn test_missing_edition() {
        let response = envelope(json!({ "surahs": [] }));
        assert!(matches!(
            quran(&response, None),
            Err(HolyBooksError::MissingField(f)) if f == "edition"
        ));
    }
}
