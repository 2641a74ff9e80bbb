//! Theme load/unload lifecycle.
//!
//! [`ThemeManager`] ties together the catalog, the active theme record and
//! a [`ScriptRunner`]. Conceptually there are two states, no theme active
//! or `ActiveTheme(name)`:
//!
//! - `load(n)` moves either state to `ActiveTheme(n)`, running the
//!   previous theme's deinit script before `n`'s init script.
//! - `unload()` moves `ActiveTheme(n)` to no theme, and is a no-op when
//!   nothing is active.
//!
//! A target that fails validation leaves the state untouched, and it is
//! validated before anything is unloaded. Script failures are reported
//! but never stop the record from being updated: the record tracks which
//! theme was selected, not whether its scripts succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::runner::{ScriptRunner, ScriptStatus, ShellRunner};
use crate::state::ActiveThemeStore;
use crate::theme::{self, Theme, ThemeCatalog};

/// What [`ThemeManager::unload`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnloadOutcome {
    /// No theme was active
    NothingToUnload,
    /// The active theme no longer resolves to a valid theme; the record
    /// was left as is
    MissingControls {
        /// Name held by the active theme record
        theme: String,
    },
    /// The deinit script ran and the record was cleared
    Unloaded {
        /// Theme that was unloaded
        theme: String,
        /// Result of its deinit script
        deinit: ScriptStatus,
    },
}

/// What [`ThemeManager::load`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Theme now recorded as active
    pub theme: String,
    /// How the previously active theme was handled
    pub unloaded: UnloadOutcome,
    /// Result of the new theme's init script
    pub init: ScriptStatus,
}

/// What [`ThemeManager::new_theme`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewThemeOutcome {
    /// A theme with that name already exists; nothing was changed
    AlreadyExists(Theme),
    /// The skeleton was copied into a new theme
    Created(Theme),
}

/// Manages the theme catalog and the active theme.
pub struct ThemeManager {
    layout: Layout,
    catalog: ThemeCatalog,
    store: ActiveThemeStore,
    runner: Box<dyn ScriptRunner>,
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl ThemeManager {
    /// Create a manager that runs control scripts directly.
    pub fn new(layout: Layout) -> Self {
        Self::with_runner(layout, ShellRunner::new())
    }

    /// Create a manager with a custom script runner.
    pub fn with_runner(layout: Layout, runner: impl ScriptRunner + 'static) -> Self {
        Self {
            catalog: ThemeCatalog::new(layout.themes_dir()),
            store: ActiveThemeStore::new(layout.cache_file()),
            runner: Box::new(runner),
            layout,
        }
    }

    /// The install root layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Look up a theme by name. `None` is a normal outcome, not an error.
    pub fn resolve(&self, name: &str) -> Option<Theme> {
        self.catalog.resolve(name)
    }

    /// Whether both control scripts of `theme` exist.
    pub fn validate(&self, theme: &Theme) -> bool {
        theme.is_valid()
    }

    /// Names of all themes in the catalog, sorted.
    pub fn list_themes(&self) -> Result<Vec<String>> {
        self.catalog.list()
    }

    /// Directory of the named theme.
    pub fn get_path(&self, name: &str) -> Result<PathBuf> {
        self.catalog
            .require(name)
            .map(|theme| theme.path().to_path_buf())
    }

    /// Colors of the named theme. An unknown theme has no colors.
    pub fn get_colors(&self, name: &str) -> Result<Vec<String>> {
        match self.resolve(name) {
            Some(theme) => theme.colors(),
            None => Ok(Vec::new()),
        }
    }

    /// Paths of the `(init, deinit)` scripts of a valid theme.
    pub fn get_controls(&self, name: &str) -> Result<(PathBuf, PathBuf)> {
        let theme = self.catalog.require(name)?;
        theme.ensure_valid()?;
        Ok((theme.init_script(), theme.deinit_script()))
    }

    /// Name of the active theme, if any.
    pub fn get_active(&self) -> Result<Option<String>> {
        self.store.get()
    }

    /// Record `name` as the active theme.
    pub fn set_active(&self, name: &str) -> Result<()> {
        self.store.set(name)
    }

    /// Record that no theme is active.
    pub fn clear_active(&self) -> Result<()> {
        self.store.clear()
    }

    /// Deinitialize the active theme.
    ///
    /// # Errors
    ///
    /// Only filesystem faults on the active theme record are errors.
    pub fn unload(&self) -> Result<UnloadOutcome> {
        let Some(active) = self.store.get()? else {
            debug!("No active theme to unload");
            return Ok(UnloadOutcome::NothingToUnload);
        };

        let Some(theme) = self.resolve(&active).filter(Theme::is_valid) else {
            warn!("Active theme '{active}' is missing its control scripts, keeping record");
            return Ok(UnloadOutcome::MissingControls { theme: active });
        };

        let deinit = self.runner.run(&theme.deinit_script(), theme.path());
        self.store.clear()?;
        info!("Unloaded theme '{active}'");

        Ok(UnloadOutcome::Unloaded {
            theme: active,
            deinit,
        })
    }

    /// Switch to the theme called `name`.
    ///
    /// The target is validated first, then the active theme is unloaded,
    /// then the target's init script runs, then the record is updated.
    ///
    /// # Errors
    ///
    /// [`Error::ThemeNotFound`] or [`Error::MalformedTheme`] when the
    /// target is unusable, in which case nothing has changed. Filesystem
    /// faults on the record are also errors.
    pub fn load(&self, name: &str) -> Result<LoadOutcome> {
        let target = self.catalog.require(name)?;
        target.ensure_valid()?;

        let unloaded = self.unload()?;

        let init = self.runner.run(&target.init_script(), target.path());
        if !init.is_success() {
            warn!("Init script of '{name}' {init}");
        }

        self.store.set(name)?;
        info!("Loaded theme '{name}'");

        Ok(LoadOutcome {
            theme: name.to_string(),
            unloaded,
            init,
        })
    }

    /// Create a theme called `name` by copying the skeleton theme.
    ///
    /// The copy is built in a hidden staging directory next to the target
    /// and renamed into place once complete, so a failed copy never leaves
    /// a half-built theme in the catalog. Symlinks in the skeleton are
    /// recreated as symlinks.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidThemeName`] for names that cannot be directories,
    /// [`Error::PathOccupied`] when something other than a theme folder
    /// already has the name, [`Error::SkeletonMissing`] when there is no
    /// template to copy, and I/O errors from the copy itself.
    pub fn new_theme(&self, name: &str) -> Result<NewThemeOutcome> {
        theme::validate_name(name)?;

        if let Some(existing) = self.resolve(name) {
            return Ok(NewThemeOutcome::AlreadyExists(existing));
        }

        let target = self.catalog.root().join(name);
        if fs::symlink_metadata(&target).is_ok() {
            return Err(Error::PathOccupied(target));
        }

        let skeleton = self.layout.skeleton_dir();
        if !skeleton.is_dir() {
            return Err(Error::SkeletonMissing(skeleton));
        }

        let staging = self.catalog.root().join(format!(".{name}.tmp"));
        if fs::symlink_metadata(&staging).is_ok() {
            debug!("Removing stale staging directory {}", staging.display());
            fs::remove_dir_all(&staging)?;
        }

        if let Err(e) = copy_tree(&skeleton, &staging) {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                warn!("Failed to remove {}: {cleanup}", staging.display());
            }
            return Err(e);
        }
        fs::rename(&staging, &target)?;

        info!("Created theme '{name}' at {}", target.display());
        Ok(NewThemeOutcome::Created(Theme::new(name, target)))
    }
}

/// Copy the directory tree at `src` to `dest`, which must not exist.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let link = fs::read_link(src)?;
    std::os::unix::fs::symlink(link, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dest: &Path) -> Result<()> {
    warn!("Skipping symlink {}", src.display());
    Ok(())
}
