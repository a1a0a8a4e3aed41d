use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        // SAFETY: read-only file mapping.
        let mmap = unsafe { Mmap::map(&file) }.with_context(|| "mmap failed")?;
        Ok(Self { mmap })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

pub enum SequenceData {
    Mapped(MmapSource),
    Buffered(Vec<u8>),
}

impl SequenceData {
    pub fn open(path: &Path) -> Result<Self> {
        match detect_input_kind(path)? {
            InputKind::Plain => Ok(SequenceData::Mapped(MmapSource::open(path)?)),
            InputKind::Gzip => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                let mut decoder = MultiGzDecoder::new(BufReader::new(file));
                let mut data = Vec::new();
                decoder
                    .read_to_end(&mut data)
                    .with_context(|| format!("failed to decompress {}", path.display()))?;
                Ok(SequenceData::Buffered(data))
            }
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            SequenceData::Mapped(source) => source.bytes(),
            SequenceData::Buffered(data) => data,
        }
    }
}

pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        let ext = ext.to_ascii_lowercase();
        if ext == "gz" {
            return Ok(InputKind::Gzip);
        }
    }
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut magic = [0u8; 2];
    let n = file
        .read(&mut magic)
        .with_context(|| "failed to read magic bytes")?;
    if n == 2 && magic == [0x1f, 0x8b] {
        Ok(InputKind::Gzip)
    } else {
        Ok(InputKind::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzipped(payload: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn plain_files_are_mapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fasta");
        std::fs::write(&path, b">r1\nATGC\n").unwrap();

        let data = SequenceData::open(&path).unwrap();
        assert!(matches!(data, SequenceData::Mapped(_)));
        assert_eq!(data.bytes(), b">r1\nATGC\n");
    }

    #[test]
    fn gzip_files_are_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fasta.gz");
        std::fs::write(&path, gzipped(b">r1\nATGC\n")).unwrap();

        let data = SequenceData::open(&path).unwrap();
        assert!(matches!(data, SequenceData::Buffered(_)));
        assert_eq!(data.bytes(), b">r1\nATGC\n");
    }

    #[test]
    fn magic_bytes_trump_a_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fasta");
        std::fs::write(&path, gzipped(b">r1\nAT\n")).unwrap();

        assert_eq!(detect_input_kind(&path).unwrap(), InputKind::Gzip);
        assert_eq!(SequenceData::open(&path).unwrap().bytes(), b">r1\nAT\n");
    }
}
