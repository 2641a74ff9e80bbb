//! Theme lifecycle actions.

use anyhow::Result;
use themer_core::{NewThemeOutcome, ScriptStatus, ThemeManager, UnloadOutcome};

use super::Output;

/// `load-theme <name>`
pub fn load_theme(manager: &ThemeManager, args: &[String]) -> Result<Output> {
    let name = &args[0];
    let outcome = manager.load(name)?;

    if !matches!(outcome.unloaded, UnloadOutcome::NothingToUnload) {
        report_unload(&outcome.unloaded);
    }
    report_script(name, "init.sh", &outcome.init);

    Ok(Output::Nothing)
}

/// `unload-theme`
pub fn unload_theme(manager: &ThemeManager, _args: &[String]) -> Result<Output> {
    report_unload(&manager.unload()?);
    Ok(Output::Nothing)
}

/// `display-theme` / `get-theme`
pub fn display_theme(manager: &ThemeManager, _args: &[String]) -> Result<Output> {
    Ok(manager
        .get_active()?
        .map_or(Output::Nothing, Output::Scalar))
}

/// `new-theme <name>`
pub fn new_theme(manager: &ThemeManager, args: &[String]) -> Result<Output> {
    let message = match manager.new_theme(&args[0])? {
        NewThemeOutcome::AlreadyExists(theme) => {
            format!("Theme '{}' already exists.", theme.name())
        }
        NewThemeOutcome::Created(theme) => {
            format!("Created theme '{}' at {}", theme.name(), theme.path().display())
        }
    };
    Ok(Output::Scalar(message))
}

fn report_unload(outcome: &UnloadOutcome) {
    match outcome {
        UnloadOutcome::NothingToUnload => eprintln!("No theme is loaded, nothing to unload."),
        UnloadOutcome::MissingControls { theme } => eprintln!(
            "Could not unload '{}': missing control files. It is still recorded as loaded.",
            theme
        ),
        UnloadOutcome::Unloaded { theme, deinit } => report_script(theme, "deinit.sh", deinit),
    }
}

fn report_script(theme: &str, script: &str, status: &ScriptStatus) {
    if !status.is_success() {
        eprintln!("{} of '{}' {}", script, theme, status);
    }
}
