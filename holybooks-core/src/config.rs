//! Client configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_QURAN_TRANSLATION: &str = "en.asad";
pub const DEFAULT_BIBLE_TRANSLATION: &str = "kjv";
pub const DEFAULT_QURAN_URL: &str = "http://api.alquran.cloud/v1";
pub const DEFAULT_BIBLE_URL: &str = "https://bible-api.com";

/// Where to fetch from and which translations to use by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Quran edition identifier, e.g. `"en.asad"` or `"ar.alafasy"`
    pub quran_translation: String,

    /// Bible translation id, e.g. `"kjv"` or `"web"`
    pub bible_translation: String,

    pub quran_base_url: String,

    pub bible_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            quran_translation: DEFAULT_QURAN_TRANSLATION.to_string(),
            bible_translation: DEFAULT_BIBLE_TRANSLATION.to_string(),
            quran_base_url: DEFAULT_QURAN_URL.to_string(),
            bible_base_url: DEFAULT_BIBLE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from `HOLYBOOKS_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let var = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());

        Self::default()
            .with_quran_translation(var("HOLYBOOKS_QURAN_TRANSLATION", DEFAULT_QURAN_TRANSLATION))
            .with_bible_translation(var("HOLYBOOKS_BIBLE_TRANSLATION", DEFAULT_BIBLE_TRANSLATION))
            .with_quran_base_url(var("HOLYBOOKS_QURAN_URL", DEFAULT_QURAN_URL))
            .with_bible_base_url(var("HOLYBOOKS_BIBLE_URL", DEFAULT_BIBLE_URL))
    }

    /// Set the default Quran edition
    pub fn with_quran_translation(mut self, translation: impl Into<String>) -> Self {
        self.quran_translation = translation.into();
        self
    }

    /// Set the default Bible translation
    pub fn with_bible_translation(mut self, translation: impl Into<String>) -> Self {
        self.bible_translation = translation.into();
        self
    }

    pub fn with_quran_base_url(mut self, url: impl Into<String>) -> Self {
        self.quran_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_bible_base_url(mut self, url: impl Into<String>) -> Self {
        self.bible_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-call override, or the configured Quran edition
    pub fn quran_translation_or<'a>(&'a self, translation: Option<&'a str>) -> &'a str {
        translation
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.quran_translation)
    }

    /// Per-call override, or the configured Bible translation
    pub fn bible_translation_or<'a>(&'a self, translation: Option<&'a str>) -> &'a str {
        translation
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.bible_translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.quran_translation, "en.asad");
        assert_eq!(config.bible_translation, "kjv");
        assert_eq!(config.quran_base_url, "http://api.alquran.cloud/v1");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new().with_bible_base_url("http://localhost:8080/");
        assert_eq!(config.bible_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_translation_override() {
        let config = ClientConfig::new();
        assert_eq!(config.quran_translation_or(None), "en.asad");
        assert_eq!(config.quran_translation_or(Some("")), "en.asad");
        assert_eq!(config.quran_translation_or(Some("ar.alafasy")), "ar.alafasy");
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: ClientConfig = serde_json::from_str(r#"{"bible_translation": "web"}"#).unwrap();
        assert_eq!(config.bible_translation, "web");
        assert_eq!(config.quran_translation, "en.asad");
    }
}
