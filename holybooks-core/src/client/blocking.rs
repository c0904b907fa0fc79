use super::torah_book;
use crate::classify::classify;
use crate::config::ClientConfig;
use crate::endpoint::{self, AyahQuery, SearchScope};
use crate::error::Result;
use crate::normalize::{self, Citation};
use crate::transport::{Response, Transport, TransportHandle};
use crate::types::{Ayah, BibleChapter, BibleVerse, Lookup, Quran, SearchResult, Surah};
use std::sync::Arc;

/// Client whose calls block the current thread
///
/// Every fetch returns `Ok(None)` when the provider answers 204.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn handle(&self) -> Option<TransportHandle> {
        Some(TransportHandle::Blocking(Arc::clone(&self.transport)))
    }

    fn get(&self, url: &str) -> Result<Option<Response>> {
        tracing::debug!("GET {}", url);
        let response = self.transport.get(url)?;
        tracing::debug!("{} -> {}", url, response.status);
        classify(response)
    }

    /// The whole Quran in one edition
    pub fn fetch_quran(&self, translation: Option<&str>) -> Result<Option<Quran>> {
        let url = endpoint::quran_url(&self.config, translation);
        self.get(&url)?
            .map(|response| normalize::quran::quran(&response, self.handle()))
            .transpose()
    }

    pub fn fetch_surah(&self, number: u32, translation: Option<&str>) -> Result<Option<Surah>> {
        let url = endpoint::surah_url(&self.config, number, translation);
        self.get(&url)?
            .map(|response| normalize::quran::surah(&response, self.handle()))
            .transpose()
    }

    /// One ayah for a plain citation, a run of ayahs for any other locator
    pub fn fetch_ayah(&self, query: &AyahQuery) -> Result<Option<Lookup<Ayah>>> {
        let (url, locator) = endpoint::ayah_url(&self.config, query)?;
        self.get(&url)?
            .map(|response| normalize::quran::ayahs(&response, &locator, self.handle()))
            .transpose()
    }

    pub fn search(
        &self,
        keyword: &str,
        scope: SearchScope,
        translation: Option<&str>,
    ) -> Result<Option<SearchResult>> {
        let url = endpoint::search_url(&self.config, keyword, scope, translation);
        self.get(&url)?
            .map(|response| normalize::quran::search(&response, self.handle()))
            .transpose()
    }

    /// A whole bible chapter
    pub fn fetch_chapter(
        &self,
        book: &str,
        chapter: u32,
        translation: Option<&str>,
    ) -> Result<Option<BibleChapter>> {
        let url = endpoint::bible_chapter_url(&self.config, book, chapter, translation);
        self.get(&url)?
            .map(|response| normalize::bible::chapter(&response))
            .transpose()
    }

    /// Verses for a `chapter:verse` or `chapter:verse-verse` citation
    pub fn fetch_verse(
        &self,
        book: &str,
        citation: &str,
        translation: Option<&str>,
    ) -> Result<Option<Lookup<BibleVerse>>> {
        let citation = citation.parse::<Citation>()?;
        let url = endpoint::bible_verse_url(&self.config, book, &citation, translation);
        self.get(&url)?
            .map(|response| normalize::bible::verses(&response, &citation))
            .transpose()
    }

    /// Like [`Client::fetch_chapter`], restricted to the five books of the Torah
    pub fn fetch_torah_chapter(
        &self,
        book: &str,
        chapter: u32,
        translation: Option<&str>,
    ) -> Result<Option<BibleChapter>> {
        let book = torah_book(book)?;
        self.fetch_chapter(book.as_str(), chapter, translation)
    }

    /// Like [`Client::fetch_verse`], restricted to the five books of the Torah
    pub fn fetch_torah_verse(
        &self,
        book: &str,
        citation: &str,
        translation: Option<&str>,
    ) -> Result<Option<Lookup<BibleVerse>>> {
        let book = torah_book(book)?;
        self.fetch_verse(book.as_str(), citation, translation)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("config", &self.config).finish()
    }
}
