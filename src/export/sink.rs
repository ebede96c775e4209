use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::error::{PhotoverseError, PhotoverseResult};

pub const PNG_MEDIA_TYPE: &str = "image/png";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Result of delivering one export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub byte_len: usize,
    /// Where the file landed, for sinks that write to disk.
    pub location: Option<PathBuf>,
}

/// Destination for finished exports.
///
/// A sink either stores the whole artifact or fails without leaving a partial one behind.
pub trait ExportSink {
    fn deliver(
        &mut self,
        file_name: &str,
        media_type: &'static str,
        bytes: &[u8],
    ) -> PhotoverseResult<ExportedArtifact>;
}

/// Writes artifacts into a directory, atomically.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn deliver(
        &mut self,
        file_name: &str,
        media_type: &'static str,
        bytes: &[u8],
    ) -> PhotoverseResult<ExportedArtifact> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(PhotoverseError::export(format!(
                "refusing to write '{file_name}': not a plain file name"
            )));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            PhotoverseError::export(format!("create '{}': {e}", self.dir.display()))
        })?;

        let target = self.dir.join(file_name);
        let tmp = self.dir.join(partial_name(file_name));
        let written = write_and_sync(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, &target));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(PhotoverseError::export(format!(
                "write '{}': {e}",
                target.display()
            )));
        }

        Ok(ExportedArtifact {
            file_name: file_name.to_string(),
            media_type,
            byte_len: bytes.len(),
            location: Some(target),
        })
    }
}

static PARTIAL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Temp name unique per delivery, so concurrent sinks in one process never share it.
fn partial_name(file_name: &str) -> String {
    let seq = PARTIAL_SEQ.fetch_add(1, Ordering::Relaxed);
    format!(".{file_name}.{}.{seq}.partial", std::process::id())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = std::fs::File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

/// Keeps artifacts in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    artifacts: Vec<(ExportedArtifact, Vec<u8>)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[(ExportedArtifact, Vec<u8>)] {
        &self.artifacts
    }

    pub fn last(&self) -> Option<&(ExportedArtifact, Vec<u8>)> {
        self.artifacts.last()
    }
}

impl ExportSink for InMemorySink {
    fn deliver(
        &mut self,
        file_name: &str,
        media_type: &'static str,
        bytes: &[u8],
    ) -> PhotoverseResult<ExportedArtifact> {
        let artifact = ExportedArtifact {
            file_name: file_name.to_string(),
            media_type,
            byte_len: bytes.len(),
            location: None,
        };
        self.artifacts.push((artifact.clone(), bytes.to_vec()));
        Ok(artifact)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
