//! # Themer Core Library
//!
//! `themer-core` provides the core functionality for Themer, a local
//! theme switcher. A theme is a directory holding an `init.sh` and a
//! `deinit.sh` control script plus an optional `colors.txt` record.
//!
//! ## Modules
//!
//! - [`config`] - Configuration management
//! - [`layout`] - On-disk layout and its bootstrap
//! - [`theme`] - Theme folders and the theme catalog
//! - [`state`] - The persisted active theme record
//! - [`runner`] - Execution of control scripts
//! - [`manager`] - Theme load/unload lifecycle
//!
//! ## Example
//!
//! ```rust,ignore
//! use themer_core::{Layout, ThemeManager};
//!
//! let layout = Layout::new("/home/me/.local/share/themer");
//! layout.ensure_layout()?;
//!
//! let manager = ThemeManager::new(layout);
//! manager.load("nord")?;
//! assert_eq!(manager.get_active()?.as_deref(), Some("nord"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod layout;
pub mod manager;
pub mod runner;
pub mod state;
pub mod theme;

pub use error::{Error, Result};
pub use layout::Layout;
pub use manager::{LoadOutcome, NewThemeOutcome, ThemeManager, UnloadOutcome};
pub use runner::{ScriptRunner, ScriptStatus, ShellRunner};
pub use theme::Theme;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory under the install root holding one subdirectory per theme
pub const THEMES_DIR: &str = "themes";

/// File under the install root recording the active theme name
pub const CACHE_FILE: &str = ".theme_cache";

/// Name of the template theme new themes are copied from
pub const SKELETON_THEME: &str = "skeleton";

/// Control script run when a theme is loaded
pub const INIT_SCRIPT: &str = "init.sh";

/// Control script run when a theme is unloaded
pub const DEINIT_SCRIPT: &str = "deinit.sh";

/// Optional color record of a theme
pub const COLORS_FILE: &str = "colors.txt";

/// Content written to freshly created control scripts
pub const SCRIPT_HEADER: &str = "#!/usr/bin/env bash\n\n";
