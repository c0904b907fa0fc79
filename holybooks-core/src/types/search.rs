//! Quran search results

use super::Ayah;
use serde::Serialize;

/// Matches of a keyword search together with the provider's match count
///
/// `count` is the provider's total and may exceed the number of matches carried.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    count: u32,
    matches: Vec<Ayah>,
}

impl SearchResult {
    pub fn new(count: u32, matches: Vec<Ayah>) -> Self {
        Self { count, matches }
    }

    /// Number of matches reported by the provider
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Matches carried by this response, in provider order
    pub fn matches(&self) -> &[Ayah] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Ayah> {
        self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ayah> {
        self.matches.iter()
    }
}

impl IntoIterator for SearchResult {
    type Item = Ayah;
    type IntoIter = std::vec::IntoIter<Ayah>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}
