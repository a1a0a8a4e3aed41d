use crate::core::model::AnalysisResult;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn to_string(result: &AnalysisResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.context("failed to serialize result")
}

pub fn write(path: &Path, result: &AnalysisResult, pretty: bool) -> Result<()> {
    let mut w = BufWriter::new(
        File::create(path).with_context(|| format!("create {} failed", path.display()))?,
    );
    if pretty {
        serde_json::to_writer_pretty(&mut w, result)
    } else {
        serde_json::to_writer(&mut w, result)
    }
    .context("failed to serialize result")?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}
