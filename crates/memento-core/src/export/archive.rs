//! Compressed archive assembly (`.tar.gz`).

use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use tar::{Builder, Header};

use crate::error::{MementoError, Result};

use super::unit::ExportUnit;

/// Name of the manifest file at the archive root.
pub const MANIFEST_NAME: &str = "manifest.json";

/// In-memory archive builder. Nothing reaches disk until the caller writes
/// the finished bytes.
pub struct ArchiveWriter {
    builder: Builder<GzEncoder<Vec<u8>>>,
    mtime: u64,
}

impl ArchiveWriter {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        Self {
            builder: Builder::new(encoder),
            mtime: u64::try_from(created_at.timestamp()).unwrap_or_default(),
        }
    }

    /// Append a regular file at `path` (relative to the archive root).
    pub fn append(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let mut header = Header::new_gnu();
        header.set_size(bytes.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(self.mtime);
        header.set_entry_type(tar::EntryType::Regular);
        self.builder
            .append_data(&mut header, path, bytes)
            .map_err(|e| MementoError::Packaging(format!("failed to add {}: {}", path, e)))
    }

    /// Finish the tar stream and the gzip member.
    pub fn finish(self) -> Result<Vec<u8>> {
        let encoder = self
            .builder
            .into_inner()
            .map_err(|e| MementoError::Packaging(format!("failed to finish archive: {}", e)))?;
        encoder
            .finish()
            .map_err(|e| MementoError::Packaging(format!("failed to compress archive: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    exported_at: DateTime<Utc>,
    entries: Vec<ManifestEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    date: String,
    title: Option<&'a str>,
    document: String,
    images: Vec<String>,
    skipped_images: usize,
}

/// Pack documents, images and the manifest into one archive.
pub fn package(units: &[ExportUnit<'_>], exported_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let mut writer = ArchiveWriter::new(exported_at);

    for unit in units {
        writer.append(&unit.document_name(), unit.document.as_bytes())?;
        for image in unit.resolved_images() {
            writer.append(&image.archive_path(), &image.bytes)?;
        }
    }

    let manifest = Manifest {
        exported_at,
        entries: units
            .iter()
            .map(|unit| ManifestEntry {
                date: unit.date().format("%Y-%m-%d").to_string(),
                title: unit.entry.title_text(),
                document: unit.document_name(),
                images: unit.resolved_images().map(|i| i.archive_path()).collect(),
                skipped_images: unit.skipped_count(),
            })
            .collect(),
    };
    let manifest_json = serde_json::to_vec_pretty(&manifest)
        .map_err(|e| MementoError::Packaging(format!("failed to write manifest: {}", e)))?;
    writer.append(MANIFEST_NAME, &manifest_json)?;

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_writer_produces_readable_archive() {
        let mut writer = ArchiveWriter::new(Utc::now());
        writer.append("a.md", b"# A\n").unwrap();
        writer.append("images/a.png", &[0x89, 0x50]).unwrap();
        let bytes = writer.finish().unwrap();

        let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
        let mut seen = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let path = entry.path().unwrap().to_string_lossy().to_string();
            let mut body = Vec::new();
            entry.read_to_end(&mut body).unwrap();
            seen.push((path, body));
        }
        assert_eq!(
            seen,
            vec![
                ("a.md".to_string(), b"# A\n".to_vec()),
                ("images/a.png".to_string(), vec![0x89, 0x50]),
            ]
        );
    }
}
