//! The five books of the Torah

use crate::error::HolyBooksError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A book of the Torah. Parsing anything else fails with `BibleOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TorahBook {
    Genesis,
    Exodus,
    Leviticus,
    Numbers,
    Deuteronomy,
}

impl TorahBook {
    pub const ALL: [TorahBook; 5] = [
        TorahBook::Genesis,
        TorahBook::Exodus,
        TorahBook::Leviticus,
        TorahBook::Numbers,
        TorahBook::Deuteronomy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TorahBook::Genesis => "genesis",
            TorahBook::Exodus => "exodus",
            TorahBook::Leviticus => "leviticus",
            TorahBook::Numbers => "numbers",
            TorahBook::Deuteronomy => "deuteronomy",
        }
    }
}

impl FromStr for TorahBook {
    type Err = HolyBooksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TorahBook::ALL
            .into_iter()
            .find(|book| book.as_str() == wanted)
            .ok_or_else(|| HolyBooksError::BibleOnly(s.to_string()))
    }
}

impl fmt::Display for TorahBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
