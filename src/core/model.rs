use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Fasta,
    Bam,
    Sam,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Fasta => "FASTA",
            FileType::Bam => "BAM",
            FileType::Sam => "SAM",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SequenceRecord {
    pub id: String,
    pub length: usize,
    pub description: String,
    pub sequence: String,
    pub gc_content: String,
    pub at_content: String,
    pub reverse_complement: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FastaSummary {
    pub sequences: Vec<SequenceRecord>,
    #[serde(rename = "fileType")]
    pub file_type: FileType,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignmentSummary {
    #[serde(rename = "fileType")]
    pub file_type: FileType,
    pub total_reads: u64,
    pub average_read_length: f64,
    pub average_quality: f64,
    pub average_gc_content: f64,
    pub average_at_content: f64,
    pub read_length_distribution: BTreeMap<usize, u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorSummary {
    pub error: String,
    #[serde(rename = "fileType", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Fasta(FastaSummary),
    Alignment(AlignmentSummary),
    Error(ErrorSummary),
}

impl AnalysisResult {
    pub fn error(message: String) -> Self {
        AnalysisResult::Error(ErrorSummary {
            error: message,
            file_type: None,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisResult::Error(_))
    }

    pub fn file_type(&self) -> Option<FileType> {
        match self {
            AnalysisResult::Fasta(summary) => Some(summary.file_type),
            AnalysisResult::Alignment(summary) => Some(summary.file_type),
            AnalysisResult::Error(summary) => summary.file_type,
        }
    }

    pub fn with_default_file_type(self, file_type: FileType) -> Self {
        match self {
            AnalysisResult::Error(mut summary) => {
                if summary.file_type.is_none() {
                    summary.file_type = Some(file_type);
                }
                AnalysisResult::Error(summary)
            }
            other => other,
        }
    }
}
