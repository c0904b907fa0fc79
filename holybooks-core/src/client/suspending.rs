use super::torah_book;
use crate::classify::classify;
use crate::config::ClientConfig;
use crate::endpoint::{self, AyahQuery, SearchScope};
use crate::error::Result;
use crate::normalize::{self, Citation};
use crate::transport::{AsyncTransport, Response, TransportHandle};
use crate::types::{Ayah, BibleChapter, BibleVerse, Lookup, Quran, SearchResult, Surah};
use std::sync::Arc;

/// Client whose calls suspend while the request is outstanding
///
/// Same operations as [`crate::Client`]; validation failures still surface
/// before the first await point touches the transport.
#[derive(Clone)]
pub struct AsyncClient {
    config: ClientConfig,
    transport: Arc<dyn AsyncTransport>,
}

impl AsyncClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn AsyncTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn handle(&self) -> Option<TransportHandle> {
        Some(TransportHandle::Suspending(Arc::clone(&self.transport)))
    }

    async fn get(&self, url: &str) -> Result<Option<Response>> {
        tracing::debug!("GET {}", url);
        let response = self.transport.get(url).await?;
        tracing::debug!("{} -> {}", url, response.status);
        classify(response)
    }

    pub async fn fetch_quran(&self, translation: Option<&str>) -> Result<Option<Quran>> {
        let url = endpoint::quran_url(&self.config, translation);
        self.get(&url)
            .await?
            .map(|response| normalize::quran::quran(&response, self.handle()))
            .transpose()
    }

    pub async fn fetch_surah(&self, number: u32, translation: Option<&str>) -> Result<Option<Surah>> {
        let url = endpoint::surah_url(&self.config, number, translation);
        self.get(&url)
            .await?
            .map(|response| normalize::quran::surah(&response, self.handle()))
            .transpose()
    }

    pub async fn fetch_ayah(&self, query: &AyahQuery) -> Result<Option<Lookup<Ayah>>> {
        let (url, locator) = endpoint::ayah_url(&self.config, query)?;
        self.get(&url)
            .await?
            .map(|response| normalize::quran::ayahs(&response, &locator, self.handle()))
            .transpose()
    }

    pub async fn search(
        &self,
        keyword: &str,
        scope: SearchScope,
        translation: Option<&str>,
    ) -> Result<Option<SearchResult>> {
        let url = endpoint::search_url(&self.config, keyword, scope, translation);
        self.get(&url)
            .await?
            .map(|response| normalize::quran::search(&response, self.handle()))
            .transpose()
    }

    pub async fn fetch_chapter(
        &self,
        book: &str,
        chapter: u32,
        translation: Option<&str>,
    ) -> Result<Option<BibleChapter>> {
        let url = endpoint::bible_chapter_url(&self.config, book, chapter, translation);
        self.get(&url)
            .await?
            .map(|response| normalize::bible::chapter(&response))
            .transpose()
    }

    pub async fn fetch_verse(
        &self,
        book: &str,
        citation: &str,
        translation: Option<&str>,
    ) -> Result<Option<Lookup<BibleVerse>>> {
        let citation = citation.parse::<Citation>()?;
        let url = endpoint::bible_verse_url(&self.config, book, &citation, translation);
        self.get(&url)
            .await?
            .map(|response| normalize::bible::verses(&response, &citation))
            .transpose()
    }

    pub async fn fetch_torah_chapter(
        &self,
        book: &str,
        chapter: u32,
        translation: Option<&str>,
    ) -> Result<Option<BibleChapter>> {
        let book = torah_book(book)?;
        self.fetch_chapter(book.as_str(), chapter, translation).await
    }

    pub async fn fetch_torah_verse(
        &self,
        book: &str,
        citation: &str,
        translation: Option<&str>,
    ) -> Result<Option<Lookup<BibleVerse>>> {
        let book = torah_book(book)?;
        self.fetch_verse(book.as_str(), citation, translation).await
    }
}

impl std::fmt::Debug for AsyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncClient").field("config", &self.config).finish()
    }
}
