use anyhow::{Context, Result, bail};
use log::debug;
use memchr::memchr;
use std::path::Path;

use crate::core::composition::gc_at_content;
use crate::core::io::SequenceData;
use crate::core::model::{AnalysisResult, ErrorSummary, FastaSummary, FileType, SequenceRecord};
use crate::core::sequence::reverse_complement;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FastaRecord {
    pub title: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn id(&self) -> &str {
        self.title.split_whitespace().next().unwrap_or("")
    }
}

pub fn parse(data: &[u8]) -> Result<Vec<FastaRecord>> {
    let text = std::str::from_utf8(data).context("input is not valid UTF-8 text")?;
    let bytes = text.as_bytes();
    let mut records = Vec::new();
    let mut title: Option<String> = None;
    let mut sequence = String::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let end = match memchr(b'\n', &bytes[pos..]) {
            Some(offset) => pos + offset,
            None => bytes.len(),
        };
        let line = text[pos..end].trim_end();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(previous) = title.replace(header.to_string()) {
                records.push(FastaRecord {
                    title: previous,
                    sequence: std::mem::take(&mut sequence),
                });
            }
        } else if title.is_some() {
            // Lines before the first '>' are skipped; sequence lines drop
            // spaces and stray carriage returns, nothing else.
            sequence.extend(line.chars().filter(|&c| c != ' ' && c != '\r'));
        }
        pos = end + 1;
    }
    if let Some(title) = title {
        records.push(FastaRecord { title, sequence });
    }
    Ok(records)
}

pub fn analyze(path: &Path) -> AnalysisResult {
    match analyze_inner(path) {
        Ok(summary) => AnalysisResult::Fasta(summary),
        Err(e) => AnalysisResult::Error(ErrorSummary {
            error: format!("Error processing FASTA file: {e:#}"),
            file_type: Some(FileType::Fasta),
        }),
    }
}

fn analyze_inner(path: &Path) -> Result<FastaSummary> {
    let data = SequenceData::open(path)?;
    let records = parse(data.bytes())?;
    let mut sequences = Vec::with_capacity(records.len());
    for record in &records {
        if !record.sequence.is_ascii() {
            bail!("non-ASCII character in sequence {}", record.id());
        }
        let composition = gc_at_content(record.sequence.as_bytes());
        sequences.push(SequenceRecord {
            id: record.id().to_string(),
            length: record.sequence.len(),
            description: record.title.clone(),
            sequence: record.sequence.clone(),
            gc_content: format!("{:.2}%", composition.gc_percent),
            at_content: format!("{:.2}%", composition.at_percent),
            reverse_complement: reverse_complement(&record.sequence),
        });
    }
    debug!(
        "parsed {} FASTA records from {}",
        sequences.len(),
        path.display()
    );
    Ok(FastaSummary {
        sequences,
        file_type: FileType::Fasta,
        message: "File processed successfully".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_record() {
        let records = parse(b">seq1 demo record\nATGC\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "seq1 demo record");
        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[0].sequence, "ATGC");
    }

    #[test]
    fn joins_wrapped_sequence_lines_and_drops_spaces() {
        let records = parse(b">seq1\r\nATG C\r\nGT AA\r\n").unwrap();
        assert_eq!(records[0].sequence, "ATGCGTAA");
    }

    #[test]
    fn keeps_interior_tabs() {
        let records = parse(b">seq1\nAT\tGC\n").unwrap();
        assert_eq!(records[0].sequence, "AT\tGC");
    }

    #[test]
    fn strips_interior_carriage_returns() {
        let records = parse(b">seq1\nAT\rGC\rTT\n").unwrap();
        assert_eq!(records[0].sequence, "ATGCTT");
    }

    #[test]
    fn splits_multiple_records() {
        let records = parse(b">a\nAT\n>b\nGC\nGC\n>c\n").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].sequence, "AT");
        assert_eq!(records[1].sequence, "GCGC");
        assert_eq!(records[2].sequence, "");
        assert_eq!(records[2].title, "c");
    }

    #[test]
    fn skips_text_before_the_first_header() {
        let records = parse(b"; comment line\nignored\n>seq1\nAT\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "AT");
    }

    #[test]
    fn input_without_headers_yields_no_records() {
        assert!(parse(b"").unwrap().is_empty());
        assert!(parse(b"ATGC\nATGC\n").unwrap().is_empty());
    }

    #[test]
    fn bare_header_has_empty_id() {
        let records = parse(b">\nAT\n").unwrap();
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].id(), "");
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(parse(b">seq1\n\xff\xfe\n").is_err());
    }

    #[test]
    fn non_ascii_sequence_fails_the_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fasta");
        std::fs::write(&path, ">seq1\nAT\u{e9}GC\n").unwrap();

        let result = analyze(&path);
        assert!(result.is_error());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("Error processing FASTA file"));
        assert!(json.contains("\"fileType\":\"FASTA\""));
    }

    #[test]
    fn non_ascii_title_is_allowed() {
        let records = parse(">caf\u{e9} sample\nATGC\n".as_bytes()).unwrap();
        assert_eq!(records[0].id(), "caf\u{e9}");
        assert_eq!(records[0].sequence, "ATGC");
    }
}
