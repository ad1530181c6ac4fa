use anyhow::{Context, Result};
use ljvar_core::{CorpusConfig, CorpusIndex};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ManifestLine<'a> {
    file_id: &'a str,
    primary: String,
    variant_1: String,
    variant_2: String,
    text: &'a str,
    normalized_text: &'a str,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub kept: usize,
    pub skipped_missing_audio: usize,
}

/// Write one JSON line per manifest entry whose three audio files all exist.
pub fn convert(config: &CorpusConfig, out_path: &Path) -> Result<Summary> {
    let index = CorpusIndex::open(config).context("Failed to open corpus index")?;

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let out_file = File::create(out_path)
        .with_context(|| format!("Failed to create output: {}", out_path.display()))?;
    let mut writer = BufWriter::new(out_file);

    let mut summary = Summary::default();

    for (i, entry) in index.entries().iter().enumerate() {
        let paths = index.paths(i)?;
        if let Some(missing) = paths.iter().find(|p| !p.exists()) {
            debug!(file_id = %entry.file_id, missing = %missing.display(), "skipping entry");
            summary.skipped_missing_audio += 1;
            continue;
        }

        let line = ManifestLine {
            file_id: &entry.file_id,
            primary: paths.primary.to_string_lossy().to_string(),
            variant_1: paths.variant_1.to_string_lossy().to_string(),
            variant_2: paths.variant_2.to_string_lossy().to_string(),
            text: &entry.transcript,
            normalized_text: &entry.normalized_transcript,
        };

        serde_json::to_writer(&mut writer, &line)?;
        writer.write_all(b"\n")?;
        summary.kept += 1;
    }

    writer.flush()?;
    Ok(summary)
}
