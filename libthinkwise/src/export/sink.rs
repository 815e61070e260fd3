//! Destinations for exported files

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ExportError, Result};

/// Where a named export ends up
pub trait FileSink {
    fn save(&mut self, filename: &str, contents: &[u8]) -> Result<()>;
}

/// Writes each file into one directory, creating it on first use
#[derive(Debug, Clone)]
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

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, filename: &str, contents: &[u8]) -> Result<()> {
        let write_error = |source| ExportError::Write {
            filename: filename.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_error)?;
        let path = self.path_for(filename);
        fs::write(&path, contents).map_err(write_error)?;

        info!("Saved {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

/// Keeps saved files in memory, in save order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == filename)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn get_str(&self, filename: &str) -> Option<&str> {
        self.get(filename).and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn filenames(&self) -> Vec<&str> {
        self.files.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSink for MemorySink {
    fn save(&mut self, filename: &str, contents: &[u8]) -> Result<()> {
        self.files.push((filename.to_string(), contents.to_vec()));
        Ok(())
    }
}
