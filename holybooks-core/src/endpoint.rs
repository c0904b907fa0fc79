//! Endpoint routing
//!
//! Turns caller intent into provider URLs. Everything here is validation and
//! string building; nothing is sent.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::normalize::{validate_ayah_citation, Citation};
use std::borrow::Cow;
use std::fmt;

/// How an ayah lookup is located. Variants are listed in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Juz(u32),
    Manzil(u32),
    Ruku(u32),
    Page(u32),
    HizbQuarter(u32),
    Sajda,
    Citation(String),
}

impl Locator {
    /// Whether the endpoint answers with a list of ayahs rather than one
    pub fn is_batch(&self) -> bool {
        !matches!(self, Locator::Citation(_))
    }

    fn path(&self) -> String {
        match self {
            Locator::Juz(n) => format!("juz/{}", n),
            Locator::Manzil(n) => format!("manzil/{}", n),
            Locator::Ruku(n) => format!("ruku/{}", n),
            Locator::Page(n) => format!("page/{}", n),
            Locator::HizbQuarter(n) => format!("hizbQuarter/{}", n),
            Locator::Sajda => "sajda".to_string(),
            Locator::Citation(citation) => format!("ayah/{}", citation),
        }
    }
}

/// Parameters of a Quran chapter-verse lookup
///
/// Only one locator is honored: `juz > manzil > ruku > page > hizb_quarter > sajda
/// > citation`. `offset`/`limit` page through the batch endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AyahQuery {
    pub citation: Option<String>,
    pub juz: Option<u32>,
    pub manzil: Option<u32>,
    pub ruku: Option<u32>,
    pub page: Option<u32>,
    pub hizb_quarter: Option<u32>,
    pub sajda: bool,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub translation: Option<String>,
}

impl AyahQuery {
    /// Look up `"262"` or `"2:255"`
    pub fn citation(citation: impl Into<String>) -> Self {
        Self {
            citation: Some(citation.into()),
            ..Self::default()
        }
    }

    pub fn juz(juz: u32) -> Self {
        Self {
            juz: Some(juz),
            ..Self::default()
        }
    }

    pub fn manzil(manzil: u32) -> Self {
        Self {
            manzil: Some(manzil),
            ..Self::default()
        }
    }

    pub fn ruku(ruku: u32) -> Self {
        Self {
            ruku: Some(ruku),
            ..Self::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn hizb_quarter(hizb_quarter: u32) -> Self {
        Self {
            hizb_quarter: Some(hizb_quarter),
            ..Self::default()
        }
    }

    /// All prostration verses
    pub fn sajda() -> Self {
        Self {
            sajda: true,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    fn supplied(&self) -> usize {
        [
            self.juz.is_some(),
            self.manzil.is_some(),
            self.ruku.is_some(),
            self.page.is_some(),
            self.hizb_quarter.is_some(),
            self.sajda,
            self.citation.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// The locator this query resolves to
    pub fn locator(&self) -> Result<Locator> {
        if self.supplied() > 1 {
            tracing::debug!("Several locators supplied, honoring the first by precedence");
        }

        let locator = if let Some(n) = self.juz {
            Locator::Juz(n)
        } else if let Some(n) = self.manzil {
            Locator::Manzil(n)
        } else if let Some(n) = self.ruku {
            Locator::Ruku(n)
        } else if let Some(n) = self.page {
            Locator::Page(n)
        } else if let Some(n) = self.hizb_quarter {
            Locator::HizbQuarter(n)
        } else if self.sajda {
            Locator::Sajda
        } else {
            let citation = self.citation.as_deref().unwrap_or_default();
            validate_ayah_citation(citation)?;
            Locator::Citation(citation.to_string())
        };
        Ok(locator)
    }
}

/// Restrict a Quran search to one surah or search everywhere
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    All,
    Surah(u32),
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScope::All => f.write_str("all"),
            SearchScope::Surah(n) => write!(f, "{}", n),
        }
    }
}

/// Edition path segment, percent-encoded
fn quran_translation<'a>(config: &'a ClientConfig, translation: Option<&'a str>) -> Cow<'a, str> {
    urlencoding::encode(config.quran_translation_or(translation))
}

/// `/quran/{translation}`
pub fn quran_url(config: &ClientConfig, translation: Option<&str>) -> String {
    format!(
        "{}/quran/{}",
        config.quran_base_url,
        quran_translation(config, translation)
    )
}

/// `/surah/{n}/{translation}`
pub fn surah_url(config: &ClientConfig, number: u32, translation: Option<&str>) -> String {
    format!(
        "{}/surah/{}/{}",
        config.quran_base_url,
        number,
        quran_translation(config, translation)
    )
}

/// URL for an ayah lookup, together with the locator it was routed by
pub fn ayah_url(config: &ClientConfig, query: &AyahQuery) -> Result<(String, Locator)> {
    let locator = query.locator()?;
    let mut url = format!(
        "{}/{}/{}",
        config.quran_base_url,
        locator.path(),
        quran_translation(config, query.translation.as_deref())
    );

    let params: Vec<String> = [("offset", query.offset), ("limit", query.limit)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
        .collect();
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }

    Ok((url, locator))
}

/// `/search/{keyword}/{surah|all}/{translation}`
pub fn search_url(
    config: &ClientConfig,
    keyword: &str,
    scope: SearchScope,
    translation: Option<&str>,
) -> String {
    format!(
        "{}/search/{}/{}/{}",
        config.quran_base_url,
        urlencoding::encode(keyword),
        scope,
        quran_translation(config, translation)
    )
}

/// `/{book}{chapter}?translation=X`
pub fn bible_chapter_url(
    config: &ClientConfig,
    book: &str,
    chapter: u32,
    translation: Option<&str>,
) -> String {
    format!(
        "{}/{}{}?translation={}",
        config.bible_base_url,
        urlencoding::encode(book),
        chapter,
        urlencoding::encode(config.bible_translation_or(translation))
    )
}

/// `/{book}{chapter}:{verse|verse-verse}?translation=X`
pub fn bible_verse_url(
    config: &ClientConfig,
    book: &str,
    citation: &Citation,
    translation: Option<&str>,
) -> String {
    format!(
        "{}/{}{}?translation={}",
        config.bible_base_url,
        urlencoding::encode(book),
        citation,
        urlencoding::encode(config.bible_translation_or(translation))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HolyBooksError;

    fn config() -> ClientConfig {
        ClientConfig::new().with_quran_base_url("http://quran.test/v1")
    }

    #[test]
    fn test_plain_citation() {
        let (url, locator) = ayah_url(&config(), &AyahQuery::citation("2:255")).unwrap();
        assert_eq!(url, "http://quran.test/v1/ayah/2:255/en.asad");
        assert!(!locator.is_batch());
    }

    #[test]
    fn test_locator_precedence() {
        let query = AyahQuery {
            citation: Some("1:1".into()),
            manzil: Some(2),
            page: Some(9),
            juz: Some(30),
            sajda: true,
            ..AyahQuery::default()
        };
        assert_eq!(query.locator().unwrap(), Locator::Juz(30));

        let query = AyahQuery {
            page: Some(9),
            hizb_quarter: Some(4),
            sajda: true,
            ..AyahQuery::default()
        };
        assert_eq!(query.locator().unwrap(), Locator::Page(9));

        let query = AyahQuery {
            citation: Some("1:1".into()),
            sajda: true,
            ..AyahQuery::default()
        };
        assert_eq!(query.locator().unwrap(), Locator::Sajda);
    }

    #[test]
    fn test_every_locator_path() {
        let cases = [
            (AyahQuery::juz(1), "juz/1"),
            (AyahQuery::manzil(7), "manzil/7"),
            (AyahQuery::ruku(2), "ruku/2"),
            (AyahQuery::page(604), "page/604"),
            (AyahQuery::hizb_quarter(3), "hizbQuarter/3"),
            (AyahQuery::sajda(), "sajda"),
        ];
        for (query, path) in cases {
            let (url, locator) = ayah_url(&config(), &query).unwrap();
            assert_eq!(url, format!("http://quran.test/v1/{}/en.asad", path));
            assert!(locator.is_batch());
        }
    }

    #[test]
    fn test_pagination_only_when_present() {
        let (url, _) = ayah_url(&config(), &AyahQuery::juz(1).with_limit(10)).unwrap();
        assert_eq!(url, "http://quran.test/v1/juz/1/en.asad?limit=10");

        let query = AyahQuery::juz(1).with_offset(3).with_limit(10).with_translation("ar.alafasy");
        let (url, _) = ayah_url(&config(), &query).unwrap();
        assert_eq!(url, "http://quran.test/v1/juz/1/ar.alafasy?offset=3&limit=10");
    }

    #[test]
    fn test_missing_citation_is_invalid() {
        let err = ayah_url(&config(), &AyahQuery::default()).unwrap_err();
        assert!(matches!(err, HolyBooksError::InvalidCitation(c) if c.is_empty()));
    }

    #[test]
    fn test_search_url() {
        let url = search_url(&config(), "Abraham", SearchScope::All, None);
        assert_eq!(url, "http://quran.test/v1/search/Abraham/all/en.asad");

        let url = search_url(&config(), "day of judgment", SearchScope::Surah(1), Some("en.pickthall"));
        assert_eq!(url, "http://quran.test/v1/search/day%20of%20judgment/1/en.pickthall");
    }

    #[test]
    fn test_bible_urls() {
        let config = ClientConfig::new();
        assert_eq!(
            bible_chapter_url(&config, "john", 3, None),
            "https://bible-api.com/john3?translation=kjv"
        );
        assert_eq!(
            bible_verse_url(&config, "1 john", &Citation::range(3, 1, 10), Some("web")),
            "https://bible-api.com/1%20john3:1-10?translation=web"
        );
    }

    #[test]
    fn test_quran_urls() {
        assert_eq!(quran_url(&config(), None), "http://quran.test/v1/quran/en.asad");
        assert_eq!(surah_url(&config(), 114, Some("en.sahih")), "http://quran.test/v1/surah/114/en.sahih");
    }

    #[test]
    fn test_translation_segment_is_encoded() {
        let odd = Some("en/asad x");
        assert_eq!(quran_url(&config(), odd), "http://quran.test/v1/quran/en%2Fasad%20x");
        assert_eq!(surah_url(&config(), 1, odd), "http://quran.test/v1/surah/1/en%2Fasad%20x");
        assert_eq!(
            search_url(&config(), "mercy", SearchScope::All, odd),
            "http://quran.test/v1/search/mercy/all/en%2Fasad%20x"
        );

        let query = AyahQuery::juz(30).with_translation("en/asad x");
        let (url, _) = ayah_url(&config(), &query).unwrap();
        assert_eq!(url, "http://quran.test/v1/juz/30/en%2Fasad%20x");
    }
}
