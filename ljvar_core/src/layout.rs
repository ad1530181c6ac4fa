use std::path::{Path, PathBuf};

use crate::config::CorpusConfig;
use crate::error::CorpusError;

pub const MANIFEST_FILE: &str = "metadata.csv";
pub const AUDIO_EXTENSION: &str = "wav";

/// On-disk layout of a corpus and its processed siblings:
///
/// ```text
/// <root>/<corpus>/metadata.csv
/// <root>/<corpus>/<audio>/<id>.wav
/// <root>/<corpus>-<label>/<audio>/<id>.wav
/// ```
///
/// Variant directories are built from the parts, so a corpus name that also
/// appears in `root` is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    root: PathBuf,
    corpus_name: String,
    audio_folder: String,
}

impl CorpusLayout {
    pub fn new(
        root: impl Into<PathBuf>,
        corpus_name: impl Into<String>,
        audio_folder: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            corpus_name: corpus_name.into(),
            audio_folder: audio_folder.into(),
        }
    }

    pub fn from_config(config: &CorpusConfig) -> Result<Self, CorpusError> {
        Ok(Self::new(
            config.root.clone(),
            config.corpus_name()?,
            config.folder_in_archive.clone(),
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn corpus_name(&self) -> &str {
        &self.corpus_name
    }

    pub fn audio_folder(&self) -> &str {
        &self.audio_folder
    }

    pub fn corpus_dir(&self) -> PathBuf {
        self.root.join(&self.corpus_name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.corpus_dir().join(MANIFEST_FILE)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.corpus_dir().join(&self.audio_folder)
    }

    pub fn variant_dir(&self, label: &str) -> PathBuf {
        self.root
            .join(format!("{}-{}", self.corpus_name, label))
            .join(&self.audio_folder)
    }

    pub fn primary_audio(&self, file_id: &str) -> PathBuf {
        self.data_dir().join(audio_file_name(file_id))
    }

    pub fn variant_audio(&self, label: &str, file_id: &str) -> PathBuf {
        self.variant_dir(label).join(audio_file_name(file_id))
    }
}

fn audio_file_name(file_id: &str) -> String {
    // Not Path::with_extension: ids like "LJ001-0001.a" must keep their dot.
    format!("{file_id}.{AUDIO_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CorpusLayout {
        CorpusLayout::new("/data", "LJSpeech-1.1", "wavs")
    }

    #[test]
    fn primary_paths() {
        let l = layout();
        assert_eq!(l.manifest_path(), PathBuf::from("/data/LJSpeech-1.1/metadata.csv"));
        assert_eq!(l.data_dir(), PathBuf::from("/data/LJSpeech-1.1/wavs"));
        assert_eq!(
            l.primary_audio("LJ001-0001"),
            PathBuf::from("/data/LJSpeech-1.1/wavs/LJ001-0001.wav")
        );
    }

    #[test]
    fn variant_paths_are_siblings() {
        let l = layout();
        assert_eq!(
            l.variant_audio("pseudo", "LJ001-0001"),
            PathBuf::from("/data/LJSpeech-1.1-pseudo/wavs/LJ001-0001.wav")
        );
        assert_eq!(
            l.variant_dir("se-vad"),
            PathBuf::from("/data/LJSpeech-1.1-se-vad/wavs")
        );
    }

    #[test]
    fn corpus_name_in_root_is_left_alone() {
        let l = CorpusLayout::new("/mnt/LJSpeech-1.1/cache", "LJSpeech-1.1", "wavs");
        assert_eq!(
            l.variant_audio("pseudo", "x"),
            PathBuf::from("/mnt/LJSpeech-1.1/cache/LJSpeech-1.1-pseudo/wavs/x.wav")
        );
    }

    #[test]
    fn dotted_ids_keep_their_dots() {
        assert_eq!(
            layout().primary_audio("a.b"),
            PathBuf::from("/data/LJSpeech-1.1/wavs/a.b.wav")
        );
    }
}
