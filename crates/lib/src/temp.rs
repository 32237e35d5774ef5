//! # Temp Resource Manager
//!
//! Owns at most one on-disk copy of an uploaded database at a time. The slot
//! is replaced on re-upload (the old file is deleted before the new one is
//! written) and the tracked file is removed on drop, so a session never
//! leaves temp files behind even on error paths.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Single-slot store for the temporary copy of an uploaded database.
///
/// The tracked path always refers to an existing file or is absent; cleanup
/// is idempotent and deletion failures are swallowed (stale temp files are a
/// cleanliness concern, not a correctness one).
#[derive(Debug, Default)]
pub struct TempSlot {
    current: Option<tempfile::TempPath>,
}

impl TempSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `bytes` to a fresh temp file and tracks it, deleting any
    /// previously tracked file first. Returns the new file's path.
    pub fn materialize(&mut self, bytes: &[u8]) -> std::io::Result<PathBuf> {
        self.cleanup();

        let mut file = NamedTempFile::with_suffix(".db")?;
        file.write_all(bytes)?;
        file.flush()?;

        let temp_path = file.into_temp_path();
        let path = temp_path.to_path_buf();
        debug!(path = %path.display(), size = bytes.len(), "Materialized uploaded database");
        self.current = Some(temp_path);
        Ok(path)
    }

    /// Deletes the tracked file, if any. Safe to call repeatedly.
    pub fn cleanup(&mut self) {
        if let Some(temp_path) = self.current.take() {
            let path = temp_path.to_path_buf();
            if let Err(e) = temp_path.close() {
                warn!(path = %path.display(), "Failed to delete temp database: {e}");
            } else {
                debug!(path = %path.display(), "Deleted temp database");
            }
        }
    }

    /// The currently tracked path, if a temp file exists.
    pub fn path(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}
