use log::debug;
use std::path::Path;

use crate::core::alignment::{self, AlignmentFormat};
use crate::core::fasta;
use crate::core::model::{AnalysisResult, FileType};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileFormat {
    Fasta,
    Bam,
    Sam,
    Unsupported(String),
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = extension_of(path);
        match ext.as_str() {
            ".fasta" | ".fa" => FileFormat::Fasta,
            ".bam" => FileFormat::Bam,
            ".sam" => FileFormat::Sam,
            ".gz" => match extension_of(&path.with_extension("")).as_str() {
                ".fasta" | ".fa" => FileFormat::Fasta,
                _ => FileFormat::Unsupported(ext),
            },
            _ => FileFormat::Unsupported(ext),
        }
    }
}

// Lowercased extension with its leading dot; empty for extensionless paths.
fn extension_of(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!(".{}", ext.to_ascii_lowercase()),
        None => String::new(),
    }
}

pub fn analyze(path: &Path, format: &FileFormat) -> AnalysisResult {
    debug!("analyzing {} as {:?}", path.display(), format);
    let (file_type, result) = match format {
        FileFormat::Fasta => (FileType::Fasta, fasta::analyze(path)),
        FileFormat::Bam => (FileType::Bam, alignment::analyze(path, AlignmentFormat::Bam)),
        FileFormat::Sam => (FileType::Sam, alignment::analyze(path, AlignmentFormat::Sam)),
        FileFormat::Unsupported(ext) => {
            return AnalysisResult::error(format!("Unsupported file format: {ext}"));
        }
    };
    result.with_default_file_type(file_type)
}
