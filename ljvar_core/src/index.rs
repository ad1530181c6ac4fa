use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::{debug, warn};

use crate::audio::{AudioLoader, SymphoniaLoader, Waveform};
use crate::config::{CorpusConfig, RatePolicy};
use crate::error::CorpusError;
use crate::layout::CorpusLayout;
use crate::manifest::{ManifestEntry, load_manifest};

/// One decoded item: the original recording, both processed variants, and
/// the transcripts.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub primary: Array2<f32>,
    pub variant_1: Array2<f32>,
    pub variant_2: Array2<f32>,
    /// Rate of the primary file.
    pub sample_rate: u32,
    pub transcript: String,
    pub normalized_transcript: String,
}

/// Resolved locations of the three files behind one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePaths {
    pub primary: PathBuf,
    pub variant_1: PathBuf,
    pub variant_2: PathBuf,
}

impl SamplePaths {
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.primary, &self.variant_1, &self.variant_2]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Random-access view over a corpus whose manifest has been read into memory.
///
/// Nothing is mutated after construction, so a shared reference can serve
/// lookups from several loader threads at once.
#[derive(Debug)]
pub struct CorpusIndex<L = SymphoniaLoader> {
    layout: CorpusLayout,
    variant_labels: [String; 2],
    rate_policy: RatePolicy,
    entries: Vec<ManifestEntry>,
    loader: L,
}

impl CorpusIndex {
    pub fn open(config: &CorpusConfig) -> Result<Self, CorpusError> {
        Self::with_loader(config, SymphoniaLoader)
    }
}

impl<L: AudioLoader> CorpusIndex<L> {
    pub fn with_loader(config: &CorpusConfig, loader: L) -> Result<Self, CorpusError> {
        validate_label(&config.variant_1_label)?;
        validate_label(&config.variant_2_label)?;

        if config.download {
            warn!(
                url = %config.url,
                "download requested but fetching is not supported; using files already under root"
            );
        }

        let layout = CorpusLayout::from_config(config)?;
        let entries = load_manifest(&layout.manifest_path())?;

        debug!(
            corpus = layout.corpus_name(),
            data_dir = %layout.data_dir().display(),
            entries = entries.len(),
            "opened corpus index"
        );

        Ok(Self {
            layout,
            variant_labels: [
                config.variant_1_label.clone(),
                config.variant_2_label.clone(),
            ],
            rate_policy: config.rate_policy,
            entries,
            loader,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Result<&ManifestEntry, CorpusError> {
        self.entries
            .get(index)
            .ok_or(CorpusError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn layout(&self) -> &CorpusLayout {
        &self.layout
    }

    pub fn variant_labels(&self) -> [&str; 2] {
        [&self.variant_labels[0], &self.variant_labels[1]]
    }

    /// Where the three files for `index` live, without touching them.
    pub fn paths(&self, index: usize) -> Result<SamplePaths, CorpusError> {
        let entry = self.entry(index)?;
        Ok(self.paths_for(entry))
    }

    fn paths_for(&self, entry: &ManifestEntry) -> SamplePaths {
        let id = &entry.file_id;
        SamplePaths {
            primary: self.layout.primary_audio(id),
            variant_1: self.layout.variant_audio(&self.variant_labels[0], id),
            variant_2: self.layout.variant_audio(&self.variant_labels[1], id),
        }
    }

    /// Decode the primary recording and both variants for `index`.
    ///
    /// Any file that fails to decode fails the whole lookup.
    pub fn get(&self, index: usize) -> Result<Sample, CorpusError> {
        let entry = self.entry(index)?;
        let paths = self.paths_for(entry);
        debug!(index, file_id = %entry.file_id, primary = %paths.primary.display(), "loading sample");

        let primary = self.decode(&paths.primary)?;
        let variant_1 = self.decode(&paths.variant_1)?;
        let variant_2 = self.decode(&paths.variant_2)?;

        for (label, variant) in self.variant_labels.iter().zip([&variant_1, &variant_2]) {
            self.check_rate(entry, label, primary.sample_rate, variant.sample_rate)?;
        }

        Ok(Sample {
            primary: primary.samples,
            variant_1: variant_1.samples,
            variant_2: variant_2.samples,
            sample_rate: primary.sample_rate,
            transcript: entry.transcript.clone(),
            normalized_transcript: entry.normalized_transcript.clone(),
        })
    }

    /// Lookups in manifest order. Each item decodes on demand.
    pub fn iter(&self) -> impl Iterator<Item = Result<Sample, CorpusError>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    fn decode(&self, path: &Path) -> Result<Waveform, CorpusError> {
        self.loader
            .load(path)
            .map_err(|source| CorpusError::AudioDecode {
                path: path.to_path_buf(),
                source,
            })
    }

    fn check_rate(
        &self,
        entry: &ManifestEntry,
        label: &str,
        primary: u32,
        variant: u32,
    ) -> Result<(), CorpusError> {
        if primary == variant {
            return Ok(());
        }
        match self.rate_policy {
            RatePolicy::Primary => {
                warn!(
                    file_id = %entry.file_id,
                    label,
                    primary,
                    variant,
                    "variant sample rate differs from primary; reporting primary rate"
                );
                Ok(())
            }
            RatePolicy::Strict => Err(CorpusError::SampleRateMismatch {
                file_id: entry.file_id.clone(),
                label: label.to_string(),
                primary,
                variant,
            }),
        }
    }
}

fn validate_label(label: &str) -> Result<(), CorpusError> {
    if label.is_empty() || label.contains(['/', '\\']) {
        return Err(CorpusError::invalid_config(format!(
            "variant label {label:?} must be a non-empty single path segment"
        )));
    }
    Ok(())
}
