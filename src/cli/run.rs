use crate::cli::args::{AnalyzeArgs, Cli, Commands, FormatArg};
use crate::core::dispatch::{self, FileFormat};
use crate::core::model::{AnalysisResult, FileType};
use crate::report;
use crate::store::{MemoryStore, ResultStore};
use anyhow::{Context, Result, bail};
use clap::Parser;
use crossbeam_channel as channel;
use log::{debug, warn};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => {
            let mut store = MemoryStore::default();
            analyze(args, &mut store)
        }
    }
}

pub fn analyze(args: AnalyzeArgs, store: &mut dyn ResultStore) -> Result<()> {
    if args.threads == 0 {
        bail!("--threads must be >= 1");
    }
    for input in &args.inputs {
        if input.as_os_str() == "-" {
            bail!("stdin is not supported; provide file paths");
        }
        if !input.is_file() {
            bail!("input file not found: {}", input.display());
        }
    }

    let formats: Vec<FileFormat> = args
        .inputs
        .iter()
        .map(|path| resolve_format(path, args.format))
        .collect();

    for (path, format) in args.inputs.iter().zip(&formats) {
        if *format == FileFormat::Bam && !bai_path(path).is_file() {
            warn!(
                "no index found for {}; create one with `samtools index {}`",
                path.display(),
                path.display()
            );
        }
    }

    let results = analyze_batch(&args.inputs, &formats, args.threads);

    match &args.out {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output dir {}", dir.display()))?;
            for (path, result) in args.inputs.iter().zip(results) {
                warn_if_error(path, &result);
                let id = store.insert(result.clone());
                let out_path = dir.join(format!("{id}.json"));
                report::json::write(&out_path, &result, args.pretty)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
                println!("{}\t{}\t{}", id, tag_of(&result), path.display());
            }
        }
        None => {
            for (path, result) in args.inputs.iter().zip(results) {
                warn_if_error(path, &result);
                let id = store.insert(result.clone());
                debug!("result for {} stored as {}", path.display(), id);
                println!("{}", report::json::to_string(&result, args.pretty)?);
            }
        }
    }

    Ok(())
}

fn resolve_format(path: &Path, format: FormatArg) -> FileFormat {
    match format {
        FormatArg::Auto => FileFormat::from_path(path),
        FormatArg::Fasta => FileFormat::Fasta,
        FormatArg::Bam => FileFormat::Bam,
        FormatArg::Sam => FileFormat::Sam,
    }
}

fn bai_path(path: &Path) -> PathBuf {
    let mut index = OsString::from(path.as_os_str());
    index.push(".bai");
    PathBuf::from(index)
}

fn tag_of(result: &AnalysisResult) -> &'static str {
    result.file_type().map(FileType::as_str).unwrap_or("-")
}

fn warn_if_error(path: &Path, result: &AnalysisResult) {
    if let AnalysisResult::Error(summary) = result {
        warn!("{}: {}", path.display(), summary.error);
    }
}

fn analyze_batch(
    inputs: &[PathBuf],
    formats: &[FileFormat],
    threads: usize,
) -> Vec<AnalysisResult> {
    if threads <= 1 || inputs.len() <= 1 {
        return inputs
            .iter()
            .zip(formats)
            .map(|(path, format)| dispatch::analyze(path, format))
            .collect();
    }

    let worker_count = threads.min(inputs.len());
    let (job_tx, job_rx) = channel::bounded::<(usize, PathBuf, FileFormat)>(inputs.len());
    let (result_tx, result_rx) = channel::unbounded::<(usize, AnalysisResult)>();

    for (index, (path, format)) in inputs.iter().zip(formats).enumerate() {
        // Channel is sized to hold every job; send cannot block here.
        let _ = job_tx.send((index, path.clone(), format.clone()));
    }
    drop(job_tx);

    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let rx = job_rx.clone();
        let tx = result_tx.clone();
        workers.push(thread::spawn(move || {
            for (index, path, format) in rx.iter() {
                let result = dispatch::analyze(&path, &format);
                if tx.send((index, result)).is_err() {
                    return;
                }
            }
        }));
    }
    drop(result_tx);
    drop(job_rx);

    let mut slots: Vec<Option<AnalysisResult>> = vec![None; inputs.len()];
    for (index, result) in result_rx.iter() {
        slots[index] = Some(result);
    }
    for worker in workers {
        let _ = worker.join();
    }

    slots
        .into_iter()
        .zip(inputs)
        .map(|(slot, path)| match slot {
            Some(result) => result,
            None => AnalysisResult::error(format!("analysis aborted for {}", path.display())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_index_path_next_to_input() {
        assert_eq!(
            bai_path(Path::new("/data/sample.bam")),
            PathBuf::from("/data/sample.bam.bai")
        );
    }

    #[test]
    fn format_override_beats_the_extension() {
        let path = Path::new("reads.txt");
        assert_eq!(
            resolve_format(path, FormatArg::Auto),
            FileFormat::Unsupported(".txt".to_string())
        );
        assert_eq!(resolve_format(path, FormatArg::Fasta), FileFormat::Fasta);
        assert_eq!(resolve_format(path, FormatArg::Sam), FileFormat::Sam);
    }

    #[test]
    fn batch_results_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = dir.path().join("a.fasta");
        std::fs::write(&fasta, b">s1\nATGC\n").unwrap();
        let unknown = dir.path().join("b.xyz");
        std::fs::write(&unknown, b"junk").unwrap();

        let inputs = vec![fasta, unknown];
        let formats: Vec<FileFormat> = inputs
            .iter()
            .map(|path| resolve_format(path, FormatArg::Auto))
            .collect();

        for threads in [1, 4] {
            let results = analyze_batch(&inputs, &formats, threads);
            assert_eq!(results.len(), 2);
            assert!(!results[0].is_error());
            assert!(results[1].is_error());
        }
    }
}
