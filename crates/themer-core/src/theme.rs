//! Theme folders and the catalog that holds them.
//!
//! Catalog membership is purely filesystem presence: every directory
//! under `themes/` is a theme. A theme is *valid* when both of its
//! control scripts exist.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::{COLORS_FILE, DEINIT_SCRIPT, INIT_SCRIPT};

/// A theme directory in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    path: PathBuf,
}

impl Theme {
    /// Wrap an existing theme directory.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Theme name (its directory name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Theme directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the init control script.
    pub fn init_script(&self) -> PathBuf {
        self.path.join(INIT_SCRIPT)
    }

    /// Path of the deinit control script.
    pub fn deinit_script(&self) -> PathBuf {
        self.path.join(DEINIT_SCRIPT)
    }

    /// Path of the optional colors record.
    pub fn colors_file(&self) -> PathBuf {
        self.path.join(COLORS_FILE)
    }

    /// Control scripts absent from the theme directory.
    pub fn missing_controls(&self) -> Vec<&'static str> {
        [INIT_SCRIPT, DEINIT_SCRIPT]
            .into_iter()
            .filter(|script| !self.path.join(script).exists())
            .collect()
    }

    /// Whether both control scripts exist.
    pub fn is_valid(&self) -> bool {
        self.missing_controls().is_empty()
    }

    /// Fail with [`Error::MalformedTheme`] unless the theme is valid.
    pub fn ensure_valid(&self) -> Result<()> {
        let missing = self.missing_controls();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MalformedTheme {
                name: self.name.clone(),
                missing,
            })
        }
    }

    /// Read the colors record, one token per non-blank line, in file order.
    ///
    /// A missing record (or theme directory) yields no colors.
    pub fn colors(&self) -> Result<Vec<String>> {
        match fs::read_to_string(self.colors_file()) {
            Ok(content) => Ok(parse_colors(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Split a colors record into trimmed, non-empty tokens.
pub fn parse_colors(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Whether `name` can name a theme directory.
///
/// Rejects empty names, `.` and `..`, and anything with a path separator.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Fail with [`Error::InvalidThemeName`] unless `name` is usable.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidThemeName(name.to_string()))
    }
}

/// The set of themes under a themes root.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    root: PathBuf,
}

impl ThemeCatalog {
    /// Create a catalog over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The themes root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a theme by name. `None` when no such directory exists.
    pub fn resolve(&self, name: &str) -> Option<Theme> {
        if !is_valid_name(name) {
            debug!("Rejected theme name {name:?}");
            return None;
        }

        let path = self.root.join(name);
        if path.is_dir() {
            Some(Theme::new(name, path))
        } else {
            debug!("No theme directory at {}", path.display());
            None
        }
    }

    /// Look up a theme by name, failing with [`Error::ThemeNotFound`].
    pub fn require(&self, name: &str) -> Result<Theme> {
        self.resolve(name)
            .ok_or_else(|| Error::ThemeNotFound(name.to_string()))
    }

    /// Names of all themes, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        Ok(names)
    }
}
