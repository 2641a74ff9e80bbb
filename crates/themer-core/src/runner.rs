//! Execution of theme control scripts.
//!
//! Scripts are opaque: they run with no arguments, inherit stdio, and only
//! their exit status is observed. A failing script is reported back as a
//! [`ScriptStatus`], never as an error.

use std::fmt;
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

/// Result of running a control script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Script exited with status 0
    Success,
    /// Script exited non-zero, or was killed by a signal (`code` is `None`)
    Failed {
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },
    /// Script could not be started
    SpawnFailed(String),
}

impl ScriptStatus {
    /// Whether the script ran and exited successfully.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "succeeded"),
            Self::Failed { code: Some(code) } => write!(f, "exited with status {code}"),
            Self::Failed { code: None } => write!(f, "was terminated by a signal"),
            Self::SpawnFailed(reason) => write!(f, "could not be started: {reason}"),
        }
    }
}

/// Capability to execute an external command and report its exit status.
pub trait ScriptRunner {
    /// Run `script` from `working_dir` and wait for it to finish.
    fn run(&self, script: &Path, working_dir: &Path) -> ScriptStatus;
}

/// Runs scripts as child processes.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    interpreter: Option<String>,
}

impl ShellRunner {
    /// Execute scripts directly, relying on their shebang line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute scripts as `<interpreter> <script>`.
    pub fn with_interpreter(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: Some(interpreter.into()),
        }
    }

    /// Build the runner described by the `[scripts]` config section.
    pub fn from_config(config: &crate::config::ScriptsConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
        }
    }

    fn command(&self, script: &Path) -> Command {
        match &self.interpreter {
            Some(interpreter) => {
                let mut cmd = Command::new(interpreter);
                cmd.arg(script);
                cmd
            }
            None => Command::new(script),
        }
    }
}

impl ScriptRunner for ShellRunner {
    fn run(&self, script: &Path, working_dir: &Path) -> ScriptStatus {
        debug!("Running {}", script.display());

        let status = match self.command(script).current_dir(working_dir).status() {
            Ok(status) => status,
            Err(e) => {
                warn!("Failed to start {}: {e}", script.display());
                return ScriptStatus::SpawnFailed(e.to_string());
            }
        };

        if status.success() {
            ScriptStatus::Success
        } else {
            warn!("{} exited with {status}", script.display());
            ScriptStatus::Failed {
                code: status.code(),
            }
        }
    }
}
