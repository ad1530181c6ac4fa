use std::path::PathBuf;

use thiserror::Error;

use crate::audio::DecodeError;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("manifest not found or unreadable: {}: {source}", path.display())]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(
        "malformed manifest record in {} at line {line}: expected 3 fields, found {fields}",
        path.display()
    )]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        fields: usize,
    },
    #[error("index {index} out of range for corpus of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("failed to decode {}: {source}", path.display())]
    AudioDecode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error(
        "sample rate mismatch for {file_id}: primary is {primary} Hz, {label} variant is {variant} Hz"
    )]
    SampleRateMismatch {
        file_id: String,
        label: String,
        primary: u32,
        variant: u32,
    },
    #[error("corpus path missing: {} (check the root path or provision the corpus first)", path.display())]
    CorpusMissing { path: PathBuf },
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CorpusError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
