use anyhow::{Context, Result};
use log::debug;
use noodles::bam;
use noodles::sam;
use noodles::sam::alignment::Record;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::core::composition::{gc_at_content, round1};
use crate::core::model::{AlignmentSummary, AnalysisResult, FileType};

// BAM stores a missing quality array as 0xff fill bytes.
const MISSING_QUALITY: u8 = 0xff;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlignmentFormat {
    Bam,
    Sam,
}

#[derive(Clone, Debug, Default)]
pub struct ReadAgg {
    total_reads: u64,
    length_sum: u64,
    // Sum of per-read mean qualities; every read weighs the same in the
    // final average, regardless of its length.
    quality_mean_sum: f64,
    gc_percent_sum: f64,
    at_percent_sum: f64,
    length_hist: BTreeMap<usize, u64>,
    seq_buf: Vec<u8>,
    qual_buf: Vec<u8>,
}

impl ReadAgg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<R>(&mut self, record: &R) -> io::Result<()>
    where
        R: Record + ?Sized,
    {
        if record.flags()?.is_unmapped() {
            return Ok(());
        }
        let sequence = record.sequence();
        let length = sequence.len();
        if length == 0 {
            return Ok(());
        }

        let quality_scores = record.quality_scores();
        self.qual_buf.clear();
        self.qual_buf.extend(quality_scores.iter());
        if self.qual_buf.is_empty() || self.qual_buf[0] == MISSING_QUALITY {
            return Ok(());
        }

        // BAM sequences decode to uppercase; SAM text may carry lowercase.
        self.seq_buf.clear();
        self.seq_buf
            .extend(sequence.iter().map(|base| base.to_ascii_uppercase()));

        self.total_reads += 1;
        self.length_sum += length as u64;
        *self.length_hist.entry(length).or_insert(0) += 1;

        let quality_sum: u64 = self.qual_buf.iter().map(|&score| u64::from(score)).sum();
        self.quality_mean_sum += quality_sum as f64 / self.qual_buf.len() as f64;

        let composition = gc_at_content(&self.seq_buf);
        self.gc_percent_sum += composition.gc_percent;
        self.at_percent_sum += composition.at_percent;

        Ok(())
    }

    pub fn finalize(&self) -> AlignmentSummary {
        let (average_read_length, average_quality, average_gc_content, average_at_content) =
            if self.total_reads == 0 {
                (0.0, 0.0, 0.0, 0.0)
            } else {
                let count = self.total_reads as f64;
                (
                    round1(self.length_sum as f64 / count),
                    round1(self.quality_mean_sum / count),
                    round1(self.gc_percent_sum / count),
                    round1(self.at_percent_sum / count),
                )
            };
        AlignmentSummary {
            file_type: FileType::Bam,
            total_reads: self.total_reads,
            average_read_length,
            average_quality,
            average_gc_content,
            average_at_content,
            read_length_distribution: self.length_hist.clone(),
        }
    }
}

pub fn analyze(path: &Path, format: AlignmentFormat) -> AnalysisResult {
    let outcome = match format {
        AlignmentFormat::Bam => analyze_bam(path),
        AlignmentFormat::Sam => analyze_sam(path),
    };
    match outcome {
        Ok(result) => result,
        // No file type here: the dispatcher tags the error from the path.
        Err(e) => AnalysisResult::error(format!("Error opening BAM file: {e:#}")),
    }
}

fn analyze_bam(path: &Path) -> Result<AnalysisResult> {
    let mut reader = bam::io::indexed_reader::Builder::default()
        .build_from_path(path)
        .with_context(|| format!("failed to open {} with its index", path.display()))?;
    reader.read_header().context("failed to read BAM header")?;

    let mut agg = ReadAgg::new();
    for result in reader.records() {
        if let Err(e) = result.and_then(|record| agg.update(&record)) {
            return Ok(AnalysisResult::error(format!(
                "Error reading BAM file: {e}"
            )));
        }
    }
    Ok(summarize(path, &agg))
}

fn analyze_sam(path: &Path) -> Result<AnalysisResult> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = sam::io::Reader::new(BufReader::new(file));
    let header = reader.read_header().context("failed to read SAM header")?;

    let mut agg = ReadAgg::new();
    // Eager parsing: malformed fields surface as per-record read errors.
    for result in reader.record_bufs(&header) {
        if let Err(e) = result.and_then(|record| agg.update(&record)) {
            return Ok(AnalysisResult::error(format!(
                "Error reading SAM file: {e}"
            )));
        }
    }
    Ok(summarize(path, &agg))
}

fn summarize(path: &Path, agg: &ReadAgg) -> AnalysisResult {
    let summary = agg.finalize();
    debug!(
        "aggregated {} mapped reads from {}",
        summary.total_reads,
        path.display()
    );
    AnalysisResult::Alignment(summary)
}
