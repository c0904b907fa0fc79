//! HolyBooks Core Library
//!
//! This crate provides the scripture model, response normalization and the
//! blocking and suspending clients for the Quran and Bible providers. Network
//! access goes through the [`Transport`]/[`AsyncTransport`] traits; the
//! `holybooks` crate ships the HTTP implementations.

pub mod classify;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod normalize;
pub mod translation;
pub mod transport;
pub mod types;

pub use client::{AsyncClient, Client};
pub use config::ClientConfig;
pub use endpoint::{AyahQuery, Locator, SearchScope};
pub use error::{HolyBooksError, NumberBound, NumberError, Result};
pub use normalize::Citation;
pub use translation::{BibleTranslation, QuranTranslation, Translation, TranslationId};
pub use transport::{AsyncTransport, MemoryTransport, Response, Transport, TransportHandle};
pub use types::{
    Ayah, BibleBook, BibleChapter, BibleVerse, Book, Chapter, Lookup, Quran, Sajda, SajdaInfo,
    SearchResult, Surah, SurahInfo, TorahBook, Verse,
};
