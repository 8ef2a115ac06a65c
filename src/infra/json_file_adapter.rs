use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::app::ports::{DocumentSinkPort, DocumentSourcePort};
use crate::error::{MigrationError, Result};
use crate::pipeline::migration::OutputDocument;
use crate::types::InputDocument;

/// Reads the cooperative directory from a JSON file
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSourcePort for JsonFileSource {
    fn load(&self) -> Result<InputDocument> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MigrationError::InputNotFound {
                path: self.path.clone(),
            },
            _ => MigrationError::Io(e),
        })?;
        debug!(path = %self.path.display(), bytes = content.len(), "Read input document");

        let document: InputDocument = serde_json::from_str(&content)?;
        Ok(document)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes the migrated document as pretty-printed UTF-8 JSON.
///
/// The document is written to a temporary file next to the destination and
/// renamed over it, so readers never observe a half-written file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn target_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl DocumentSinkPort for JsonFileSink {
    fn write(&self, document: &OutputDocument) -> Result<usize> {
        let bytes = serde_json::to_vec_pretty(document)?;

        let dir = self.target_dir();
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| MigrationError::Io(e.error))?;

        info!(path = %self.path.display(), bytes = bytes.len(), "Wrote output document");
        Ok(bytes.len())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
