//! Error types for Themer.
//!
//! Conditions that are reported rather than raised (nothing to unload, a
//! control script exiting non-zero) are not errors; see
//! [`crate::manager::UnloadOutcome`] and [`crate::runner::ScriptStatus`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized `Result` type for Themer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Themer.
#[derive(Error, Debug)]
pub enum Error {
    /// Theme has no directory in the catalog (E001)
    #[error("'{0}' is not a defined theme")]
    ThemeNotFound(String),

    /// Theme directory lacks one or both control scripts (E002)
    #[error("'{name}' is a malformed theme: missing {}", missing.join(", "))]
    MalformedTheme {
        /// Theme name
        name: String,
        /// Control scripts that are absent
        missing: Vec<&'static str>,
    },

    /// Theme name cannot be used as a directory name (E003)
    #[error("invalid theme name: '{0}'")]
    InvalidThemeName(String),

    /// Template theme is missing, so new themes cannot be created (E004)
    #[error("skeleton theme not found at {}", .0.display())]
    SkeletonMissing(PathBuf),

    /// Something that is not a theme folder already has the theme's name (E005)
    #[error("{} already exists and is not a theme folder", .0.display())]
    PathOccupied(PathBuf),

    /// Configuration file error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns the error code associated with this error, if any.
    ///
    /// Error codes follow the pattern EXXX where XXX is a 3-digit number.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::ThemeNotFound(_) => Some("E001"),
            Self::MalformedTheme { .. } => Some("E002"),
            Self::InvalidThemeName(_) => Some("E003"),
            Self::SkeletonMissing(_) => Some("E004"),
            Self::PathOccupied(_) => Some("E005"),
            _ => None,
        }
    }

    /// Returns a helpful suggestion for resolving the error, if applicable.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ThemeNotFound(_) => Some(
                "List the available themes with:\n\
                   themer list-themes\n\
                 Or create a new one with:\n\
                   themer new-theme <name>",
            ),
            Self::MalformedTheme { .. } => {
                Some("A theme folder needs both an init.sh and a deinit.sh script.")
            }
            Self::InvalidThemeName(_) => {
                Some("Theme names are folder names: no '/', '\\', '.' or '..'.")
            }
            Self::SkeletonMissing(_) => {
                Some("Run any themer command once to recreate the skeleton theme.")
            }
            Self::PathOccupied(_) => Some("Move the file away or pick another theme name."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_lists_missing_scripts() {
        let err = Error::MalformedTheme {
            name: "nord".to_string(),
            missing: vec!["init.sh", "deinit.sh"],
        };
        assert_eq!(
            err.to_string(),
            "'nord' is a malformed theme: missing init.sh, deinit.sh"
        );
        assert_eq!(err.code(), Some("E002"));
    }

    #[test]
    fn test_path_occupied_message() {
        let err = Error::PathOccupied(PathBuf::from("/opt/themer/themes/nord"));
        assert_eq!(
            err.to_string(),
            "/opt/themer/themes/nord already exists and is not a theme folder"
        );
        assert_eq!(err.code(), Some("E005"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_io_error_has_no_code() {
        let err = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(err.code().is_none());
        assert!(err.suggestion().is_none());
    }
}
