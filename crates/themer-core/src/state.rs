//! The persisted active theme record.
//!
//! A single file holding the name of the active theme; empty or absent
//! means no theme is active. This record is the only place "active" state
//! lives.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Store for the active theme name.
#[derive(Debug, Clone)]
pub struct ActiveThemeStore {
    path: PathBuf,
}

impl ActiveThemeStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the active theme name, if any.
    pub fn get(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let name = content.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    /// Record `name` as the active theme.
    pub fn set(&self, name: &str) -> Result<()> {
        self.write(name)
    }

    /// Record that no theme is active.
    pub fn clear(&self) -> Result<()> {
        self.write("")
    }

    /// Replace the record through a sibling temp file so readers never
    /// see a partial write.
    fn write(&self, content: &str) -> Result<()> {
        let mut tmp_name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
