use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::foundation::error::{ShotframeError, ShotframeResult};

/// In-memory zip archive of exported frames.
pub struct ExportArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: Vec<String>,
}

impl Default for ExportArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExportArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportArchive")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl ExportArchive {
    /// Empty archive.
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: Vec::new(),
        }
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// No entries yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append one file.
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> ShotframeResult<()> {
        if name.is_empty() || self.names.iter().any(|n| n == name) {
            return Err(ShotframeError::export(format!(
                "invalid or duplicate archive entry '{name}'"
            )));
        }
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer
            .start_file(name, options)
            .map_err(|e| ShotframeError::export(format!("archive entry '{name}': {e}")))?;
        self.writer
            .write_all(bytes)
            .map_err(|e| ShotframeError::export(format!("archive entry '{name}': {e}")))?;
        self.names.push(name.to_owned());
        Ok(())
    }

    /// Close the archive and return its bytes.
    pub fn finish(self) -> ShotframeResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| ShotframeError::export(format!("archive finalize failed: {e}")))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/archive.rs"]
mod tests;
