//! Destinations for serialized level text

use std::fs;
use std::path::{Path, PathBuf};

use crate::io::error::{LevelError, Result};

/// Receives serialized levels
pub trait LevelSink {
    /// Store `text` under `destination`
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written
    fn accept(&mut self, destination: &Path, text: &str) -> Result<()>;
}

/// Writes each level to a file, creating parent directories as needed
#[derive(Debug, Default)]
pub struct FileSink {
    written: Vec<PathBuf>,
}

impl FileSink {
    /// Create a sink that has written nothing yet
    pub const fn new() -> Self {
        Self {
            written: Vec::new(),
        }
    }

    /// Files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl LevelSink for FileSink {
    fn accept(&mut self, destination: &Path, text: &str) -> Result<()> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LevelError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        fs::write(destination, text).map_err(|e| LevelError::FileSystem {
            path: destination.to_path_buf(),
            operation: "write level",
            source: e,
        })?;

        self.written.push(destination.to_path_buf());
        Ok(())
    }
}
