use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::CorpusError;

pub const DELIMITER: u8 = b'|';
const FIELDS_PER_RECORD: usize = 3;

/// One manifest line: `<file-id>|<transcript>|<normalized-transcript>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_id: String,
    pub transcript: String,
    pub normalized_transcript: String,
}

/// Read the whole manifest at `path`, in file order.
pub fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>, CorpusError> {
    let file = File::open(path).map_err(|source| CorpusError::ManifestNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_manifest(file, path)?;

    debug!(path = %path.display(), entries = entries.len(), "loaded manifest");
    Ok(entries)
}

/// Fields are taken verbatim: `"` has no special meaning and nothing is trimmed.
///
/// Every physical line is one entry, so a blank line is a malformed record
/// rather than something to skip. Only the empty tail after the final
/// newline is allowed. A leading UTF-8 byte order mark is dropped.
fn parse_manifest<R: Read>(mut reader: R, path: &Path) -> Result<Vec<ManifestEntry>, CorpusError> {
    let read_error = |source: csv::Error| CorpusError::ManifestRead {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| read_error(csv::Error::from(e)))?;

    if let Some(line) = first_blank_line(&bytes) {
        return Err(CorpusError::MalformedRecord {
            path: path.to_path_buf(),
            line,
            fields: 0,
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut entries = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(read_error)?;
        if record.len() != FIELDS_PER_RECORD {
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(entries.len() as u64 + 1);
            return Err(CorpusError::MalformedRecord {
                path: path.to_path_buf(),
                line,
                fields: record.len(),
            });
        }
        entries.push(ManifestEntry {
            file_id: record[0].to_string(),
            transcript: record[1].to_string(),
            normalized_transcript: record[2].to_string(),
        });
    }
    Ok(entries)
}

/// 1-based number of the first empty line, ignoring the tail after the last `\n`.
fn first_blank_line(bytes: &[u8]) -> Option<u64> {
    let mut lines = bytes.split(|b| *b == b'\n').peekable();
    let mut number = 0u64;
    while let Some(line) = lines.next() {
        number += 1;
        let is_tail = lines.peek().is_none();
        if !is_tail && (line.is_empty() || line == b"\r") {
            return Some(number);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<ManifestEntry>, CorpusError> {
        parse_manifest(text.as_bytes(), Path::new("metadata.csv"))
    }

    #[test]
    fn parses_records_in_order() {
        let entries = parse(
            "LJ001-0001|Printing, in the only sense|printing, in the only sense\n\
             LJ001-0002|in being comparatively modern.|in being comparatively modern.\n",
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_id, "LJ001-0001");
        assert_eq!(entries[1].transcript, "in being comparatively modern.");
    }

    #[test]
    fn quotes_and_whitespace_are_literal() {
        let entries = parse("id| \"Quoted\" text |\"unbalanced\r\n").unwrap();
        assert_eq!(entries[0].transcript, " \"Quoted\" text ");
        assert_eq!(entries[0].normalized_transcript, "\"unbalanced");
    }

    #[test]
    fn two_fields_is_malformed() {
        let err = parse("a|b|c\nd|e\n").unwrap_err();
        assert!(matches!(
            err,
            CorpusError::MalformedRecord { line: 2, fields: 2, .. }
        ));
    }

    #[test]
    fn four_fields_is_malformed() {
        let err = parse("a|b|c|d\n").unwrap_err();
        assert!(matches!(
            err,
            CorpusError::MalformedRecord { line: 1, fields: 4, .. }
        ));
    }

    #[test]
    fn blank_line_is_malformed_not_skipped() {
        let err = parse("a|one|1\n\nb|two|2\n").unwrap_err();
        assert!(matches!(
            err,
            CorpusError::MalformedRecord { line: 2, fields: 0, .. }
        ));

        let err = parse("a|one|1\r\n\r\nb|two|2\r\n").unwrap_err();
        assert!(matches!(
            err,
            CorpusError::MalformedRecord { line: 2, fields: 0, .. }
        ));
    }

    #[test]
    fn trailing_blank_line_is_malformed() {
        let err = parse("a|one|1\n\n").unwrap_err();
        assert!(matches!(
            err,
            CorpusError::MalformedRecord { line: 2, fields: 0, .. }
        ));
    }

    #[test]
    fn final_newline_is_optional() {
        assert_eq!(parse("a|one|1\nb|two|2").unwrap().len(), 2);
        assert_eq!(parse("a|one|1\nb|two|2\n").unwrap().len(), 2);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn leading_bom_is_dropped_from_first_id() {
        let entries = parse("\u{feff}a|one|1\nb|two|2\n").unwrap();
        assert_eq!(entries[0].file_id, "a");
        assert_eq!(entries[1].file_id, "b");
    }

    #[test]
    fn malformed_error_names_the_file() {
        let err = parse("a|b\n").unwrap_err();
        assert!(err.to_string().contains("metadata.csv"), "{err}");
    }

    #[test]
    fn empty_fields_are_kept() {
        let entries = parse("LJ050-0278||\n").unwrap();
        assert_eq!(entries[0].transcript, "");
        assert_eq!(entries[0].normalized_transcript, "");
    }

    #[test]
    fn missing_file_is_manifest_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join("metadata.csv")).unwrap_err();
        assert!(matches!(err, CorpusError::ManifestNotFound { .. }));
    }

    #[test]
    fn invalid_utf8_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        std::fs::write(&path, b"id|\xff\xfe|x\n").unwrap();
        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, CorpusError::ManifestRead { .. }));
    }
}
