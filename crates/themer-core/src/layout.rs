//! On-disk layout of a Themer install root.
//!
//! ```text
//! <root>/
//! ├── .theme_cache          active theme name (empty = none)
//! └── themes/
//!     ├── skeleton/         template for new themes
//!     │   ├── init.sh
//!     │   ├── deinit.sh
//!     │   └── colors.txt
//!     └── <name>/...
//! ```
//!
//! [`Layout::ensure_layout`] creates whatever part of this skeleton is
//! missing. It only ever creates entries: existing files keep their
//! contents, so a user's edits to the skeleton scripts survive.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::{
    CACHE_FILE, COLORS_FILE, DEINIT_SCRIPT, INIT_SCRIPT, SCRIPT_HEADER, SKELETON_THEME, THEMES_DIR,
};

/// Paths making up an install root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

/// Entries created by a bootstrap run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Paths that did not exist before and were created, in creation order
    pub created: Vec<PathBuf>,
}

impl BootstrapReport {
    /// Whether the layout was already complete.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

impl Layout {
    /// Create a layout rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The catalog root, one subdirectory per theme.
    pub fn themes_dir(&self) -> PathBuf {
        self.root.join(THEMES_DIR)
    }

    /// The active theme record.
    pub fn cache_file(&self) -> PathBuf {
        self.root.join(CACHE_FILE)
    }

    /// The template theme.
    pub fn skeleton_dir(&self) -> PathBuf {
        self.themes_dir().join(SKELETON_THEME)
    }

    /// Create every missing part of the layout.
    ///
    /// Safe to call on every invocation.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if an entry cannot be created (e.g. permission
    /// denied). Entries created before the failure are kept.
    pub fn ensure_layout(&self) -> Result<BootstrapReport> {
        let mut report = BootstrapReport::default();

        if !self.root.is_dir() {
            fs::create_dir_all(&self.root)?;
            report.created.push(self.root.clone());
        }

        let cache_file = self.cache_file();
        if create_file(&cache_file, "", false)? {
            report.created.push(cache_file);
        }

        let themes_dir = self.themes_dir();
        if create_dir(&themes_dir)? {
            report.created.push(themes_dir);
        }

        let skeleton = self.skeleton_dir();
        if create_dir(&skeleton)? {
            report.created.push(skeleton.clone());
        }

        for (name, contents, executable) in [
            (INIT_SCRIPT, SCRIPT_HEADER, true),
            (DEINIT_SCRIPT, SCRIPT_HEADER, true),
            (COLORS_FILE, "", false),
        ] {
            let path = skeleton.join(name);
            if create_file(&path, contents, executable)? {
                report.created.push(path);
            }
        }

        for path in &report.created {
            debug!("Created {}", path.display());
        }

        Ok(report)
    }
}

/// Create a directory unless it exists. Returns whether it was created.
fn create_dir(path: &Path) -> io::Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }

    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}

/// Create a file with `contents` unless it exists. Returns whether it was created.
fn create_file(path: &Path, contents: &str, executable: bool) -> io::Result<bool> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if executable { 0o755 } else { 0o644 });
    }
    #[cfg(not(unix))]
    let _ = executable;

    match options.open(path) {
        Ok(mut file) => {
            file.write_all(contents.as_bytes())?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths() {
        let layout = Layout::new("/opt/themer");

        assert_eq!(layout.themes_dir(), PathBuf::from("/opt/themer/themes"));
        assert_eq!(layout.cache_file(), PathBuf::from("/opt/themer/.theme_cache"));
        assert_eq!(
            layout.skeleton_dir(),
            PathBuf::from("/opt/themer/themes/skeleton")
        );
    }

    #[test]
    fn test_bootstrap_creates_layout() {
        let tmp_dir = TempDir::new().unwrap();
        let layout = Layout::new(tmp_dir.path());

        let report = layout.ensure_layout().unwrap();
        assert!(!report.is_noop());

        assert_eq!(fs::read_to_string(layout.cache_file()).unwrap(), "");
        assert!(layout.themes_dir().is_dir());
        assert_eq!(
            fs::read_to_string(layout.skeleton_dir().join(INIT_SCRIPT)).unwrap(),
            SCRIPT_HEADER
        );
        assert_eq!(
            fs::read_to_string(layout.skeleton_dir().join(DEINIT_SCRIPT)).unwrap(),
            SCRIPT_HEADER
        );
        assert!(layout.skeleton_dir().join(COLORS_FILE).is_file());
    }

    #[test]
    fn test_bootstrap_creates_missing_root() {
        let tmp_dir = TempDir::new().unwrap();
        let layout = Layout::new(tmp_dir.path().join("nested").join("root"));

        let report = layout.ensure_layout().unwrap();

        assert_eq!(report.created[0], layout.root());
        assert!(layout.skeleton_dir().is_dir());
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let tmp_dir = TempDir::new().unwrap();
        let layout = Layout::new(tmp_dir.path());
        layout.ensure_layout().unwrap();

        let edited = "#!/usr/bin/env bash\n\nnotify-send hello\n";
        fs::write(layout.skeleton_dir().join(INIT_SCRIPT), edited).unwrap();
        fs::write(layout.cache_file(), "nord").unwrap();

        let report = layout.ensure_layout().unwrap();

        assert!(report.is_noop());
        assert_eq!(
            fs::read_to_string(layout.skeleton_dir().join(INIT_SCRIPT)).unwrap(),
            edited
        );
        assert_eq!(fs::read_to_string(layout.cache_file()).unwrap(), "nord");
    }

    #[test]
    fn test_bootstrap_repairs_partial_layout() {
        let tmp_dir = TempDir::new().unwrap();
        let layout = Layout::new(tmp_dir.path());
        layout.ensure_layout().unwrap();

        fs::remove_file(layout.skeleton_dir().join(DEINIT_SCRIPT)).unwrap();

        let report = layout.ensure_layout().unwrap();

        assert_eq!(
            report.created,
            vec![layout.skeleton_dir().join(DEINIT_SCRIPT)]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_skeleton_scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp_dir = TempDir::new().unwrap();
        let layout = Layout::new(tmp_dir.path());
        layout.ensure_layout().unwrap();

        let mode = fs::metadata(layout.skeleton_dir().join(INIT_SCRIPT))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o100, 0o100);
    }
}
