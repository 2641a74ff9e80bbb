//! Common test utilities for `Themer` integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use themer_core::{Layout, ScriptRunner, ScriptStatus, ThemeManager};

/// Script runner that records every script it is asked to run.
///
/// Clones share the same log, so a test can keep one handle while the
/// manager owns another.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Rc<RefCell<Vec<PathBuf>>>,
    failing: Rc<RefCell<HashSet<PathBuf>>>,
}

impl RecordingRunner {
    /// Scripts run so far, in order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }

    /// Make `script` report a non-zero exit.
    pub fn fail(&self, script: PathBuf) {
        self.failing.borrow_mut().insert(script);
    }
}

impl ScriptRunner for RecordingRunner {
    fn run(&self, script: &Path, _working_dir: &Path) -> ScriptStatus {
        self.calls.borrow_mut().push(script.to_path_buf());
        if self.failing.borrow().contains(script) {
            ScriptStatus::Failed { code: Some(1) }
        } else {
            ScriptStatus::Success
        }
    }
}

/// A bootstrapped install root with a recording manager.
pub struct TestRoot {
    pub dir: tempfile::TempDir,
    pub manager: ThemeManager,
    pub runner: RecordingRunner,
}

/// Create a temporary install root, bootstrap it and wrap it in a manager.
pub fn setup() -> TestRoot {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let layout = Layout::new(dir.path());
    layout.ensure_layout().expect("Failed to bootstrap layout");

    let runner = RecordingRunner::default();
    let manager = ThemeManager::with_runner(layout, runner.clone());

    TestRoot {
        dir,
        manager,
        runner,
    }
}

/// Create a theme directory holding the given files (empty contents).
pub fn create_theme(root: &TestRoot, name: &str, files: &[&str]) -> PathBuf {
    let theme_dir = root.manager.layout().themes_dir().join(name);
    std::fs::create_dir_all(&theme_dir).expect("Failed to create theme directory");
    for file in files {
        std::fs::write(theme_dir.join(file), "#!/bin/sh\n").expect("Failed to write theme file");
    }
    theme_dir
}

/// Create a theme with both control scripts.
pub fn create_valid_theme(root: &TestRoot, name: &str) -> PathBuf {
    create_theme(root, name, &["init.sh", "deinit.sh"])
}
