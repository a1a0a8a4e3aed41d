//! Descriptive statistics for FASTA and BAM/SAM files.

pub mod cli;
pub mod core;
pub mod report;
pub mod store;
