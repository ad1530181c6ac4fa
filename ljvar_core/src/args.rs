use std::path::PathBuf;

use clap::Args;

use crate::config::{CorpusConfig, RatePolicy};

/// Corpus selection flags shared by the binaries. Each one falls back to an
/// `LJVAR_*` environment variable.
#[derive(Debug, Clone, Args)]
pub struct CorpusArgs {
    /// Directory holding the corpus and its variant siblings.
    #[arg(long, env = "LJVAR_ROOT", global = true, default_value = ".")]
    pub root: PathBuf,
    /// Release URL; only its file name is used, to name the corpus directory.
    #[arg(long, env = "LJVAR_URL", global = true)]
    pub url: Option<String>,
    #[arg(long, env = "LJVAR_AUDIO_FOLDER", global = true)]
    pub audio_folder: Option<String>,
    #[arg(long, env = "LJVAR_VARIANT_1", global = true, default_value = CorpusConfig::DEFAULT_VARIANT_1)]
    pub variant_1: String,
    #[arg(long, env = "LJVAR_VARIANT_2", global = true, default_value = CorpusConfig::DEFAULT_VARIANT_2)]
    pub variant_2: String,
    #[arg(long, env = "LJVAR_RATE_POLICY", global = true, value_enum, default_value_t = RatePolicy::Primary)]
    pub rate_policy: RatePolicy,
}

impl CorpusArgs {
    pub fn to_config(&self) -> CorpusConfig {
        let mut config = CorpusConfig::new(&self.root)
            .with_variants(&self.variant_1, &self.variant_2)
            .with_rate_policy(self.rate_policy);
        if let Some(url) = &self.url {
            config = config.with_url(url);
        }
        if let Some(folder) = &self.audio_folder {
            config = config.with_folder_in_archive(folder);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        corpus: CorpusArgs,
    }

    #[test]
    fn flags_map_onto_config() {
        let harness = Harness::try_parse_from([
            "ljvar",
            "--root",
            "/corpora",
            "--url",
            "https://example.org/Other-2.tar.bz2",
            "--audio-folder",
            "clips",
            "--variant-1",
            "ppw",
            "--variant-2",
            "denoised",
            "--rate-policy",
            "strict",
        ])
        .unwrap();
        let config = harness.corpus.to_config();

        assert_eq!(config.root, PathBuf::from("/corpora"));
        assert_eq!(config.corpus_name().unwrap(), "Other-2");
        assert_eq!(config.folder_in_archive, "clips");
        assert_eq!(config.variant_1_label, "ppw");
        assert_eq!(config.variant_2_label, "denoised");
        assert_eq!(config.rate_policy, RatePolicy::Strict);
    }

    #[test]
    fn omitted_flags_keep_release_defaults() {
        let harness = Harness::try_parse_from(["ljvar", "--root", "/corpora"]).unwrap();
        let config = harness.corpus.to_config();
        assert_eq!(config.folder_in_archive, "wavs");
        assert_eq!(config.variant_1_label, "pseudo");
        assert_eq!(config.variant_2_label, "se-vad");
    }
}
