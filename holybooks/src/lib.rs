//! HolyBooks
//!
//! Quran, Bible and Torah lookups over HTTP. This crate wires the clients from
//! `holybooks-core` to reqwest:
//!
//! ```no_run
//! use holybooks::{ClientConfig, Verse};
//!
//! let client = holybooks::blocking(ClientConfig::new());
//! if let Some(surah) = client.fetch_surah(1, None)? {
//!     println!("{} has {} ayahs", surah, surah.number_of_verses());
//!     println!("{}", surah.ayah(1)?.text());
//! }
//! # Ok::<(), holybooks::HolyBooksError>(())
//! ```

pub mod transport;

pub use holybooks_core::*;
pub use transport::{AsyncReqwestTransport, ReqwestTransport};

use std::sync::Arc;

/// Blocking client over reqwest
pub fn blocking(config: ClientConfig) -> Client {
    Client::new(config, Arc::new(ReqwestTransport::new()))
}

/// Suspending client over reqwest
pub fn suspending(config: ClientConfig) -> AsyncClient {
    AsyncClient::new(config, Arc::new(AsyncReqwestTransport::new()))
}

/// Blocking client configured from `HOLYBOOKS_*` environment variables
pub fn blocking_from_env() -> Client {
    blocking(ClientConfig::from_env())
}

/// Suspending client configured from `HOLYBOOKS_*` environment variables
pub fn suspending_from_env() -> AsyncClient {
    suspending(ClientConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_keep_config() {
        let config = ClientConfig::new().with_bible_translation("web");
        assert_eq!(blocking(config.clone()).config().bible_translation, "web");
        assert_eq!(suspending(config).config().bible_translation, "web");
    }

    #[tokio::test]
    async fn test_validation_needs_no_network() {
        let client = suspending(ClientConfig::new());
        let err = client.fetch_torah_verse("john", "3:16", None).await.unwrap_err();
        assert!(matches!(err, HolyBooksError::BibleOnly(_)));
    }
}
