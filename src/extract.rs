use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::PrepError;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub skipped: bool,
    pub total_rows: usize,
    pub kept_rows: usize,
}

/// Copies the header and every row whose `column` equals `region` from a
/// gzip TSV into `output`.
///
/// Nothing is done when `output` is at least as new as `input`. The rows are
/// written to a temporary file next to `output` and renamed into place once
/// complete, so an interrupted run never leaves a partial file behind.
pub fn extract_region(
    input: &Path,
    output: &Path,
    column: &str,
    region: &str,
) -> Result<ExtractSummary, PrepError> {
    if is_up_to_date(input, output)? {
        debug!(output = %output.display(), "filtered metadata is up to date");
        return Ok(ExtractSummary {
            skipped: true,
            total_rows: 0,
            kept_rows: 0,
        });
    }

    let file = File::open(input)
        .map_err(|err| PrepError::Filesystem(format!("open {}: {err}", input.display())))?;
    let reader = BufReader::new(GzDecoder::new(file));

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| PrepError::Filesystem(err.to_string()))?;
    let mut temp = tempfile::Builder::new()
        .prefix(".gisaid-prep")
        .tempfile_in(parent)
        .map_err(|err| PrepError::Filesystem(err.to_string()))?;

    let (total_rows, kept_rows) = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let counts = filter_region(reader, &mut writer, column, region)?;
        writer
            .flush()
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        counts
    };
    temp.as_file()
        .sync_all()
        .map_err(|err| PrepError::Filesystem(err.to_string()))?;
    temp.persist(output)
        .map_err(|err| PrepError::Filesystem(err.to_string()))?;

    info!(total_rows, kept_rows, region, "extracted regional metadata");
    Ok(ExtractSummary {
        skipped: false,
        total_rows,
        kept_rows,
    })
}

/// Streams TSV lines from `reader` to `writer`, keeping the header and rows
/// whose `column` field equals `region`. Returns (rows read, rows kept).
pub fn filter_region<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    column: &str,
    region: &str,
) -> Result<(usize, usize), PrepError> {
    let mut line = Vec::new();
    let read = reader
        .read_until(b'\n', &mut line)
        .map_err(|err| PrepError::Decompress(err.to_string()))?;
    if read == 0 {
        return Err(PrepError::TableParse("metadata file has no header".to_string()));
    }
    let region_idx = trim_newline(&line)
        .split(|b| *b == b'\t')
        .position(|name| name == column.as_bytes())
        .ok_or_else(|| PrepError::MissingColumn {
            column: column.to_string(),
        })?;
    writer
        .write_all(&line)
        .map_err(|err| PrepError::Filesystem(err.to_string()))?;

    let mut total = 0usize;
    let mut kept = 0usize;
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|err| PrepError::Decompress(err.to_string()))?;
        if read == 0 {
            break;
        }
        total += 1;
        let field = trim_newline(&line).split(|b| *b == b'\t').nth(region_idx);
        if field == Some(region.as_bytes()) {
            writer
                .write_all(&line)
                .map_err(|err| PrepError::Filesystem(err.to_string()))?;
            kept += 1;
        }
    }
    Ok((total, kept))
}

fn is_up_to_date(input: &Path, output: &Path) -> Result<bool, PrepError> {
    let input_modified = fs::metadata(input)
        .and_then(|meta| meta.modified())
        .map_err(|err| PrepError::Filesystem(format!("stat {}: {err}", input.display())))?;
    let output_modified = match fs::metadata(output).and_then(|meta| meta.modified()) {
        Ok(modified) => modified,
        Err(_) => return Ok(false),
    };
    Ok(input_modified <= output_modified)
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const METADATA: &str = "strain\tvirus\tgisaid_epi_isl\tgenbank_accession\tdate\tregion\tcountry\n\
                            A/1\tncov\tEPI_1\t?\t2021-01-02\tAfrica\tKenya\n\
                            A/2\tncov\tEPI_2\t?\t2021-01-03\tEurope\tFrance\n\
                            A/3\tncov\tEPI_3\t?\t2021-01\tAfrica\tGhana\n";

    #[test]
    fn keeps_header_and_matching_rows() {
        let mut out = Vec::new();
        let (total, kept) = filter_region(METADATA.as_bytes(), &mut out, "region", "Africa").unwrap();
        assert_eq!((total, kept), (3, 2));
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("strain\tvirus"));
        assert!(lines[1].starts_with("A/1"));
        assert!(lines[2].starts_with("A/3"));
    }

    #[test]
    fn region_in_last_column() {
        let input = "strain\tregion\r\nA/1\tAfrica\r\nA/2\tAsia\r\n";
        let mut out = Vec::new();
        let (_, kept) = filter_region(input.as_bytes(), &mut out, "region", "Africa").unwrap();
        assert_eq!(kept, 1);
        assert_eq!(out, b"strain\tregion\r\nA/1\tAfrica\r\n");
    }

    #[test]
    fn missing_region_column_fails_fast() {
        let input = "strain\tcountry\nA/1\tKenya\n";
        let err = filter_region(input.as_bytes(), Vec::new(), "region", "Africa").unwrap_err();
        assert_matches!(err, PrepError::MissingColumn { .. });
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = filter_region(&b""[..], Vec::new(), "region", "Africa").unwrap_err();
        assert_matches!(err, PrepError::TableParse(_));
    }
}
