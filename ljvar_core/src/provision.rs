use std::path::PathBuf;

use tracing::debug;

use crate::config::CorpusConfig;
use crate::error::CorpusError;
use crate::layout::CorpusLayout;

/// Makes sure a corpus is available on disk before an index is opened.
///
/// Kept apart from [`crate::CorpusIndex`] construction so that "already on
/// disk" and "fetch it first" can be swapped and tested independently.
pub trait Provisioner {
    fn ensure(&self, layout: &CorpusLayout, variant_labels: [&str; 2]) -> Result<(), CorpusError>;
}

/// Only checks what is already present. Never writes or downloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvisioner;

impl LocalProvisioner {
    pub fn required_paths(layout: &CorpusLayout, variant_labels: [&str; 2]) -> Vec<PathBuf> {
        let mut paths = vec![layout.manifest_path(), layout.data_dir()];
        paths.extend(variant_labels.iter().map(|label| layout.variant_dir(label)));
        paths
    }
}

impl Provisioner for LocalProvisioner {
    fn ensure(&self, layout: &CorpusLayout, variant_labels: [&str; 2]) -> Result<(), CorpusError> {
        for path in Self::required_paths(layout, variant_labels) {
            if !path.exists() {
                return Err(CorpusError::CorpusMissing { path });
            }
        }
        debug!(corpus = layout.corpus_name(), root = %layout.root().display(), "corpus present");
        Ok(())
    }
}

/// Run `provisioner` against the layout `config` describes.
pub fn provision(config: &CorpusConfig, provisioner: &impl Provisioner) -> Result<(), CorpusError> {
    let layout = CorpusLayout::from_config(config)?;
    provisioner.ensure(
        &layout,
        [
            config.variant_1_label.as_str(),
            config.variant_2_label.as_str(),
        ],
    )
}
