//! Read-only catalog actions.

use anyhow::Result;
use themer_core::ThemeManager;

use super::Output;

/// `list-themes`
pub fn list_themes(manager: &ThemeManager, _args: &[String]) -> Result<Output> {
    Ok(Output::List(manager.list_themes()?))
}

/// `get-colors <name>`
pub fn get_colors(manager: &ThemeManager, args: &[String]) -> Result<Output> {
    Ok(Output::List(manager.get_colors(&args[0])?))
}

/// `get-path <name>`
pub fn get_path(manager: &ThemeManager, args: &[String]) -> Result<Output> {
    let path = manager.get_path(&args[0])?;
    Ok(Output::Scalar(path.display().to_string()))
}

/// `get-controls <name>`
pub fn get_controls(manager: &ThemeManager, args: &[String]) -> Result<Output> {
    let (init, deinit) = manager.get_controls(&args[0])?;
    Ok(Output::List(vec![
        init.display().to_string(),
        deinit.display().to_string(),
    ]))
}
