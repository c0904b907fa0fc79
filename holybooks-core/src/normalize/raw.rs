//! Raw provider payload shapes
//!
//! Every field is optional here; the typed model decides what is required and
//! reports `MissingField` for anything absent. Numeric fields accept both JSON
//! numbers and numeric strings since the Quran provider is inconsistent about it.

use crate::translation::TranslationId;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `7`, `"7"` or `null`
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => u32::try_from(n).map(Some).map_err(de::Error::custom),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got '{}'", s))),
    }
}

/// Payload that may or may not sit inside the provider's `{code, status, data}` envelope
///
/// The shape is chosen by the presence of a `data` key, so a malformed `data`
/// fails to decode instead of being retried as a bare payload.
#[derive(Debug)]
pub enum RawShape<T> {
    Enveloped(Envelope<T>),
    Bare(T),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RawShape<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let shape = if value.get("data").is_some() {
            serde_json::from_value(value).map(RawShape::Enveloped)
        } else {
            serde_json::from_value(value).map(RawShape::Bare)
        };
        shape.map_err(de::Error::custom)
    }
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub status: Option<String>,
    pub data: T,
}

impl<T> RawShape<T> {
    /// Strip the envelope, if any
    pub fn into_inner(self) -> T {
        match self {
            RawShape::Enveloped(envelope) => {
                if let Some(code) = envelope.code.filter(|c| *c != 200) {
                    tracing::warn!(
                        "Provider envelope reports code {} ({})",
                        code,
                        envelope.status.as_deref().unwrap_or("no status")
                    );
                }
                envelope.data
            }
            RawShape::Bare(inner) => inner,
        }
    }
}

/// Quran edition sub-object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEdition {
    pub identifier: Option<TranslationId>,
    pub language: Option<String>,
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub format: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuran {
    #[serde(default)]
    pub surahs: Vec<RawSurah>,
    pub edition: Option<RawEdition>,
}

/// A surah, either bare (nested under an ayah) or with its ayah list.
/// `translation` is accepted for `edition` so stamped payloads read back unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSurah {
    #[serde(default, deserialize_with = "lenient_number")]
    pub number: Option<u32>,
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub english_name_translation: Option<String>,
    pub revelation_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub number_of_ayahs: Option<u32>,
    #[serde(default)]
    pub ayahs: Vec<RawAyah>,
    #[serde(alias = "translation")]
    pub edition: Option<RawEdition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAyah {
    #[serde(default, deserialize_with = "lenient_number")]
    pub number: Option<u32>,
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub number_in_surah: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub juz: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub manzil: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ruku: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hizb_quarter: Option<u32>,
    #[serde(default)]
    pub sajda: RawSajda,
    pub audio: Option<String>,
    pub surah: Option<Box<RawSurah>>,
    #[serde(alias = "translation")]
    pub edition: Option<RawEdition>,
}

/// `false` or a `{id, recommended, obligatory}` record
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSajda {
    Flag(bool),
    Record {
        #[serde(default, deserialize_with = "lenient_number")]
        id: Option<u32>,
        #[serde(default)]
        recommended: bool,
        #[serde(default)]
        obligatory: bool,
    },
}

impl Default for RawSajda {
    fn default() -> Self {
        RawSajda::Flag(false)
    }
}

/// Ayah list returned by the juz/manzil/ruku/page/hizbQuarter/sajda endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAyahBatch {
    #[serde(default)]
    pub ayahs: Vec<RawAyah>,
    pub edition: Option<RawEdition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearch {
    #[serde(default, deserialize_with = "lenient_number")]
    pub count: Option<u32>,
    #[serde(default)]
    pub matches: Vec<RawAyah>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBibleTranslation {
    pub name: Option<String>,
    pub id: Option<TranslationId>,
    pub note: Option<String>,
}

/// One line of a Bible provider response. `reference` and `translation` are
/// not sent per verse; the normalizer copies them down from the passage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBibleVerse {
    pub book_id: Option<String>,
    pub book_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub chapter: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub verse: Option<u32>,
    pub text: Option<String>,
    pub reference: Option<String>,
    pub translation: Option<RawBibleTranslation>,
}

/// The flat Bible provider response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPassage {
    pub reference: Option<String>,
    #[serde(default)]
    pub verses: Vec<RawBibleVerse>,
    pub text: Option<String>,
    pub translation_id: Option<TranslationId>,
    pub translation_name: Option<String>,
    pub translation_note: Option<String>,
}

/// A chapter-level object built from a passage
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBibleChapter {
    #[serde(default, deserialize_with = "lenient_number")]
    pub number: Option<u32>,
    pub book_name: Option<String>,
    pub book_id: Option<String>,
    pub reference: Option<String>,
    pub text: Option<String>,
    pub translation: Option<RawBibleTranslation>,
    #[serde(default)]
    pub verses: Vec<RawBibleVerse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_strings_are_coerced() {
        let ayah: RawAyah = serde_json::from_value(json!({
            "number": "8",
            "numberInSurah": 1,
            "juz": "1",
            "hizbQuarter": " 2 "
        }))
        .unwrap();
        assert_eq!(ayah.number, Some(8));
        assert_eq!(ayah.juz, Some(1));
        assert_eq!(ayah.hizb_quarter, Some(2));
        assert_eq!(ayah.page, None);
    }

    #[test]
    fn test_non_numeric_string_is_rejected() {
        let result: Result<RawAyah, _> = serde_json::from_value(json!({ "juz": "first" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_shape_unwraps_envelope() {
        let shape: RawShape<RawSurah> = serde_json::from_value(json!({
            "code": 200,
            "status": "OK",
            "data": { "number": 1, "name": "الفاتحة" }
        }))
        .unwrap();
        assert!(matches!(shape, RawShape::Enveloped(_)));
        assert_eq!(shape.into_inner().number, Some(1));

        let shape: RawShape<RawSurah> =
            serde_json::from_value(json!({ "number": 2, "name": "البقرة" })).unwrap();
        assert!(matches!(shape, RawShape::Bare(_)));
        assert_eq!(shape.into_inner().number, Some(2));
    }

    #[test]
    fn test_malformed_envelope_data_is_an_error() {
        let result: Result<RawShape<RawAyah>, _> = serde_json::from_value(json!({
            "code": 200,
            "status": "OK",
            "data": { "number": 1, "text": "x", "juz": "first" }
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("first"), "{}", err);
    }

    #[test]
    fn test_sajda_shapes() {
        let flag: RawSajda = serde_json::from_value(json!(false)).unwrap();
        assert!(matches!(flag, RawSajda::Flag(false)));

        let record: RawSajda =
            serde_json::from_value(json!({ "id": 1, "recommended": true, "obligatory": false }))
                .unwrap();
        assert!(matches!(record, RawSajda::Record { id: Some(1), recommended: true, .. }));
    }
}
