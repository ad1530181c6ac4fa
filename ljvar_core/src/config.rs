use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// Where a corpus release comes from and how its archive is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseConfig {
    pub url: &'static str,
    pub folder_in_archive: &'static str,
    /// SHA-256 of the archive. Carried for reference only; nothing here fetches it.
    pub checksum: &'static str,
}

impl ReleaseConfig {
    pub const LJSPEECH_1_1: ReleaseConfig = ReleaseConfig {
        url: "https://data.keithito.com/data/speech/LJSpeech-1.1.tar.bz2",
        folder_in_archive: "wavs",
        checksum: "be1a30453f28eb8dd26af4101ae40cbf2c50413b1bb21936cbcdc6fae3de8aa5",
    };
}

/// How to treat variant files whose sample rate differs from the primary's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RatePolicy {
    /// Report the primary rate and log the mismatch.
    #[default]
    Primary,
    /// Fail the lookup.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub root: PathBuf,
    pub url: String,
    pub folder_in_archive: String,
    /// Kept for compatibility with existing job configs. Has no effect.
    pub download: bool,
    pub variant_1_label: String,
    pub variant_2_label: String,
    pub rate_policy: RatePolicy,
}

impl CorpusConfig {
    pub const DEFAULT_VARIANT_1: &'static str = "pseudo";
    pub const DEFAULT_VARIANT_2: &'static str = "se-vad";
    pub const ARCHIVE_SUFFIX: &'static str = ".tar.bz2";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_folder_in_archive(mut self, folder: impl Into<String>) -> Self {
        self.folder_in_archive = folder.into();
        self
    }

    pub fn with_variants(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.variant_1_label = first.into();
        self.variant_2_label = second.into();
        self
    }

    pub fn with_download(mut self, download: bool) -> Self {
        self.download = download;
        self
    }

    pub fn with_rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate_policy = policy;
        self
    }

    pub fn corpus_name(&self) -> Result<String, CorpusError> {
        corpus_name_from_url(&self.url)
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let release = ReleaseConfig::LJSPEECH_1_1;
        Self {
            root: PathBuf::from("."),
            url: release.url.to_string(),
            folder_in_archive: release.folder_in_archive.to_string(),
            download: false,
            variant_1_label: Self::DEFAULT_VARIANT_1.to_string(),
            variant_2_label: Self::DEFAULT_VARIANT_2.to_string(),
            rate_policy: RatePolicy::default(),
        }
    }
}

/// `https://host/path/LJSpeech-1.1.tar.bz2` -> `LJSpeech-1.1`.
///
/// Anything from the first `.tar.bz2` onwards is dropped; a basename without
/// the suffix is used as is.
pub fn corpus_name_from_url(url: &str) -> Result<String, CorpusError> {
    let basename = url.rsplit('/').next().unwrap_or(url);
    let name = basename
        .split(CorpusConfig::ARCHIVE_SUFFIX)
        .next()
        .unwrap_or(basename);
    if name.is_empty() {
        return Err(CorpusError::invalid_config(format!(
            "cannot derive a corpus name from url {url:?}"
        )));
    }
    Ok(name.to_string())
}
