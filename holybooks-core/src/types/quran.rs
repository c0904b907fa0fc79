//! Quran realization: Quran → Surah → Ayah

use super::{Book, Chapter, Verse};
use crate::classify::classify;
use crate::error::{HolyBooksError, NumberError, Result};
use crate::normalize::raw::{RawAyah, RawQuran, RawSajda, RawSurah};
use crate::translation::QuranTranslation;
use crate::transport::{Response, TransportHandle};
use serde::{Serialize, Serializer};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The whole Quran in one edition
#[derive(Debug, Clone, Serialize)]
pub struct Quran {
    name: String,
    translation: QuranTranslation,
    surahs: Vec<Surah>,
}

impl Quran {
    /// Build from a normalized whole-Quran payload. Every surah shares `transport`
    /// for later audio downloads.
    pub fn from_raw(raw: RawQuran, transport: Option<TransportHandle>) -> Result<Self> {
        let edition = raw.edition.ok_or_else(|| HolyBooksError::missing("edition"))?;
        let translation = QuranTranslation::try_from(edition)?;
        let surahs = raw
            .surahs
            .into_iter()
            .map(|surah| Surah::from_raw(surah, transport.clone()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: "Quran".to_string(),
            translation,
            surahs,
        })
    }

    /// Surahs in provider order
    pub fn surahs(&self) -> &[Surah] {
        &self.surahs
    }

    /// Look a surah up by its number
    pub fn surah(&self, number: u32) -> Option<&Surah> {
        self.surahs.iter().find(|s| s.number() == number)
    }
}

impl Book for Quran {
    type Translation = QuranTranslation;

    fn name(&self) -> &str {
        &self.name
    }

    fn translation(&self) -> &QuranTranslation {
        &self.translation
    }
}

impl fmt::Display for Quran {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Descriptive fields of a surah, shared by the surah and every ayah built from it
#[derive(Debug, Clone, Serialize)]
pub struct SurahInfo {
    number: u32,
    name: String,
    english_name: String,
    english_name_translation: String,
    revelation_type: String,
    number_of_verses: Option<u32>,
    translation: QuranTranslation,
}

impl SurahInfo {
    pub(crate) fn from_raw(raw: RawSurah) -> Result<Self> {
        let edition = raw
            .edition
            .ok_or_else(|| HolyBooksError::missing("surah.edition"))?;

        Ok(Self {
            number: raw.number.ok_or_else(|| HolyBooksError::missing("surah.number"))?,
            name: raw.name.ok_or_else(|| HolyBooksError::missing("surah.name"))?,
            english_name: raw
                .english_name
                .ok_or_else(|| HolyBooksError::missing("surah.englishName"))?,
            english_name_translation: raw
                .english_name_translation
                .ok_or_else(|| HolyBooksError::missing("surah.englishNameTranslation"))?,
            revelation_type: raw
                .revelation_type
                .ok_or_else(|| HolyBooksError::missing("surah.revelationType"))?,
            number_of_verses: raw.number_of_ayahs,
            translation: QuranTranslation::try_from(edition)?,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Arabic name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn english_name(&self) -> &str {
        &self.english_name
    }

    /// Meaning of the name, e.g. "The Opening"
    pub fn english_name_translation(&self) -> &str {
        &self.english_name_translation
    }

    /// "Meccan" or "Medinan"
    pub fn revelation_type(&self) -> &str {
        &self.revelation_type
    }

    /// Verse count as reported by the provider
    pub fn number_of_verses(&self) -> Option<u32> {
        self.number_of_verses
    }

    pub fn translation(&self) -> &QuranTranslation {
        &self.translation
    }

    /// Name in the requested language: `ar`/`arabic` or `en`/`eng`/`english`
    pub fn name_in(&self, lang: &str) -> Result<&str> {
        match lang.to_lowercase().as_str() {
            "ar" | "arabic" => Ok(&self.name),
            "en" | "eng" | "english" => Ok(&self.english_name),
            _ => Err(HolyBooksError::WrongLang(lang.to_string())),
        }
    }
}

impl PartialEq for SurahInfo {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

/// A chapter of the Quran
#[derive(Debug, Clone, Serialize)]
pub struct Surah {
    #[serde(flatten)]
    info: Arc<SurahInfo>,
    ayahs: Vec<Ayah>,
}

impl Surah {
    /// Build from a normalized surah payload; every ayah gets a handle on this
    /// surah's shared info instead of rebuilding it from raw data.
    pub fn from_raw(mut raw: RawSurah, transport: Option<TransportHandle>) -> Result<Self> {
        let raw_ayahs = std::mem::take(&mut raw.ayahs);
        let info = Arc::new(SurahInfo::from_raw(raw)?);
        let ayahs = raw_ayahs
            .into_iter()
            .map(|ayah| Ayah::from_raw(ayah, Some(Arc::clone(&info)), transport.clone()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { info, ayahs })
    }

    pub fn info(&self) -> &SurahInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn english_name(&self) -> &str {
        self.info.english_name()
    }

    pub fn english_name_translation(&self) -> &str {
        self.info.english_name_translation()
    }

    pub fn revelation_type(&self) -> &str {
        self.info.revelation_type()
    }

    pub fn translation(&self) -> &QuranTranslation {
        self.info.translation()
    }

    pub fn name_in(&self, lang: &str) -> Result<&str> {
        self.info.name_in(lang)
    }

    /// Provider's verse count, or the number of ayahs carried when it is missing
    pub fn number_of_verses(&self) -> u32 {
        self.info
            .number_of_verses()
            .unwrap_or(self.ayahs.len() as u32)
    }

    /// Ayahs in order
    pub fn ayats(&self) -> &[Ayah] {
        &self.ayahs
    }

    /// The `n`-th ayah of this surah, counting from 1
    pub fn ayah(&self, n: i64) -> Result<&Ayah> {
        if n <= 0 {
            return Err(NumberError::lower("ayah", 1).into());
        }
        let count = i64::from(self.number_of_verses());
        if n > count {
            return Err(NumberError::range("ayah", 1, count).into());
        }
        self.ayahs
            .get((n - 1) as usize)
            .ok_or_else(|| HolyBooksError::NotFound(format!("ayah {} was not loaded", n)))
    }
}

impl Chapter for Surah {
    fn number(&self) -> u32 {
        self.info.number
    }
}

impl PartialEq for Surah {
    fn eq(&self, other: &Self) -> bool {
        self.info.number == other.info.number
    }
}

impl fmt::Display for Surah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info.english_name())
    }
}

/// Prostration marker of an ayah
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sajda {
    /// Not a prostration verse
    Absent,
    Marked(SajdaInfo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SajdaInfo {
    pub id: Option<u32>,
    pub recommended: bool,
    pub obligatory: bool,
}

impl Sajda {
    pub fn is_sajda(&self) -> bool {
        matches!(self, Sajda::Marked(_))
    }

    pub fn info(&self) -> Option<&SajdaInfo> {
        match self {
            Sajda::Absent => None,
            Sajda::Marked(info) => Some(info),
        }
    }
}

impl From<RawSajda> for Sajda {
    fn from(raw: RawSajda) -> Self {
        match raw {
            RawSajda::Flag(false) => Sajda::Absent,
            RawSajda::Flag(true) => Sajda::Marked(SajdaInfo::default()),
            RawSajda::Record {
                id,
                recommended,
                obligatory,
            } => Sajda::Marked(SajdaInfo {
                id,
                recommended,
                obligatory,
            }),
        }
    }
}

impl PartialEq<bool> for Sajda {
    fn eq(&self, other: &bool) -> bool {
        self.is_sajda() == *other
    }
}

impl Serialize for Sajda {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Sajda::Absent => serializer.serialize_bool(false),
            Sajda::Marked(info) => info.serialize(serializer),
        }
    }
}

fn serialize_surah_number<S: Serializer>(
    surah: &Arc<SurahInfo>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u32(surah.number)
}

/// A verse of the Quran
#[derive(Clone, Serialize)]
pub struct Ayah {
    number: u32,
    text: String,
    number_in_surah: u32,
    juz: Option<u32>,
    manzil: Option<u32>,
    page: Option<u32>,
    ruku: Option<u32>,
    hizb_quarter: Option<u32>,
    sajda: Sajda,
    audio: Option<String>,
    translation: QuranTranslation,
    #[serde(rename = "surah_number", serialize_with = "serialize_surah_number")]
    surah: Arc<SurahInfo>,
    #[serde(skip)]
    transport: Option<TransportHandle>,
}

impl Ayah {
    /// Build from a normalized ayah payload
    ///
    /// Without `surah`, the parent is rebuilt from the payload's nested `surah`
    /// object; this is the path taken by single-ayah lookups and search matches.
    pub fn from_raw(
        raw: RawAyah,
        surah: Option<Arc<SurahInfo>>,
        transport: Option<TransportHandle>,
    ) -> Result<Self> {
        let surah = match surah {
            Some(surah) => surah,
            None => {
                let nested = raw.surah.ok_or_else(|| HolyBooksError::missing("surah"))?;
                Arc::new(SurahInfo::from_raw(*nested)?)
            }
        };
        let translation = match raw.edition {
            Some(edition) => QuranTranslation::try_from(edition)?,
            None => surah.translation.clone(),
        };

        Ok(Self {
            number: raw.number.ok_or_else(|| HolyBooksError::missing("ayah.number"))?,
            text: raw.text.ok_or_else(|| HolyBooksError::missing("ayah.text"))?,
            number_in_surah: raw
                .number_in_surah
                .ok_or_else(|| HolyBooksError::missing("ayah.numberInSurah"))?,
            juz: raw.juz,
            manzil: raw.manzil,
            page: raw.page,
            ruku: raw.ruku,
            hizb_quarter: raw.hizb_quarter,
            sajda: raw.sajda.into(),
            audio: raw.audio,
            translation,
            surah,
            transport,
        })
    }

    pub fn number_in_surah(&self) -> u32 {
        self.number_in_surah
    }

    pub fn juz(&self) -> Option<u32> {
        self.juz
    }

    pub fn manzil(&self) -> Option<u32> {
        self.manzil
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    pub fn ruku(&self) -> Option<u32> {
        self.ruku
    }

    pub fn hizb_quarter(&self) -> Option<u32> {
        self.hizb_quarter
    }

    pub fn sajda(&self) -> Sajda {
        self.sajda
    }

    /// Recitation URL, for audio editions
    pub fn audio(&self) -> Option<&str> {
        self.audio.as_deref()
    }

    pub fn translation(&self) -> &QuranTranslation {
        &self.translation
    }

    /// The surah this ayah belongs to
    pub fn surah(&self) -> &SurahInfo {
        &self.surah
    }

    /// Whether this ayah was built through `surah` (identity, not equality)
    pub fn is_in(&self, surah: &Surah) -> bool {
        Arc::ptr_eq(&self.surah, &surah.info)
    }

    /// `"{surah}:{ayah}.mp3"`
    pub fn default_audio_filename(&self) -> String {
        format!("{}:{}.mp3", self.surah.number, self.number_in_surah)
    }

    fn audio_target(&self, filename: Option<&Path>) -> PathBuf {
        filename
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.default_audio_filename()))
    }

    /// Fetch the recitation and write it to `filename` (or the default name),
    /// returning the written file
    pub fn download_audio(&self, filename: Option<&Path>) -> Result<std::fs::File> {
        let url = self.audio.as_deref().ok_or(HolyBooksError::NoAudio)?;
        let transport = match &self.transport {
            Some(TransportHandle::Blocking(transport)) => transport,
            Some(TransportHandle::Suspending(_)) => {
                return Err(HolyBooksError::Transport(
                    "ayah was fetched by an async client, use download_audio_async".to_string(),
                ))
            }
            None => {
                return Err(HolyBooksError::Transport(
                    "no transport attached to this ayah".to_string(),
                ))
            }
        };

        let body = audio_body(transport.get(url)?)?;
        let path = self.audio_target(filename);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(&body)?;
        tracing::info!("Downloaded {} -> {:?}", url, path);
        Ok(file)
    }

    /// Suspending variant of [`Ayah::download_audio`]
    pub async fn download_audio_async(&self, filename: Option<&Path>) -> Result<tokio::fs::File> {
        use tokio::io::AsyncWriteExt;

        let url = self.audio.as_deref().ok_or(HolyBooksError::NoAudio)?;
        let transport = match &self.transport {
            Some(TransportHandle::Suspending(transport)) => transport,
            Some(TransportHandle::Blocking(_)) => {
                return Err(HolyBooksError::Transport(
                    "ayah was fetched by a blocking client, use download_audio".to_string(),
                ))
            }
            None => {
                return Err(HolyBooksError::Transport(
                    "no transport attached to this ayah".to_string(),
                ))
            }
        };

        let body = audio_body(transport.get(url).await?)?;
        let path = self.audio_target(filename);
        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(&body).await?;
        file.flush().await?;
        tracing::info!("Downloaded {} -> {:?}", url, path);
        Ok(file)
    }
}

fn audio_body(response: Response) -> Result<Vec<u8>> {
    classify(response)?
        .map(|response| response.body)
        .ok_or(HolyBooksError::NoAudio)
}

impl Verse for Ayah {
    fn text(&self) -> &str {
        &self.text
    }

    fn number(&self) -> u32 {
        self.number
    }
}

impl PartialEq for Ayah {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.surah.number == other.surah.number
    }
}

impl fmt::Debug for Ayah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ayah")
            .field("number", &self.number)
            .field("number_in_surah", &self.number_in_surah)
            .field("surah", &self.surah.number)
            .finish()
    }
}

impl fmt::Display for Ayah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
