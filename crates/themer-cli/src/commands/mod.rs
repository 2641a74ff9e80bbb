//! CLI command definitions and handlers.
//!
//! Actions are looked up by name in [`ACTIONS`], a fixed table of
//! `(name, arguments, handler)` entries. The argument count is checked
//! against the table before the handler runs, so a wrong number of
//! arguments is a usage error and never reaches the core.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use themer_core::config::Config;
use themer_core::{Layout, ShellRunner, ThemeManager};

pub mod query;
pub mod theme;

/// Load configuration with graceful fallback to defaults.
pub fn load_config() -> Config {
    Config::load_or_default()
}

/// Themer - local theme switching
#[derive(Parser)]
#[command(name = "themer")]
#[command(author, version, about, long_about = None)]
#[command(after_help = actions_help())]
pub struct Cli {
    /// The action to perform
    pub action: Option<String>,

    /// Arguments for the action
    pub args: Vec<String>,

    /// Install root holding themes/ and .theme_cache
    #[arg(long, env = "THEMER_ROOT")]
    pub root: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Detailed logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Signature shared by every action handler.
pub type Handler = fn(&ThemeManager, &[String]) -> Result<Output>;

/// A named action with a fixed number of arguments.
pub struct Action {
    /// Name typed on the command line
    pub name: &'static str,
    /// Names of the expected arguments, one per argument
    pub args: &'static [&'static str],
    /// One-line description
    pub about: &'static str,
    /// Function run once the arguments are checked
    pub handler: Handler,
}

impl Action {
    /// Usage line, e.g. `load-theme <name>`.
    pub fn usage(&self) -> String {
        std::iter::once(self.name.to_string())
            .chain(self.args.iter().map(|arg| format!("<{arg}>")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fail unless exactly the expected number of arguments was given.
    pub fn check_arity(&self, args: &[String]) -> Result<()> {
        if args.len() != self.args.len() {
            bail!(
                "{} is an invalid number of arguments for '{}'.\nUsage: themer {}",
                args.len(),
                self.name,
                self.usage()
            );
        }
        Ok(())
    }
}

/// Every action the CLI understands.
pub const ACTIONS: &[Action] = &[
    Action {
        name: "load-theme",
        args: &["name"],
        about: "Unload the current theme and load another",
        handler: theme::load_theme,
    },
    Action {
        name: "unload-theme",
        args: &[],
        about: "Unload the current theme",
        handler: theme::unload_theme,
    },
    Action {
        name: "display-theme",
        args: &[],
        about: "Print the name of the loaded theme",
        handler: theme::display_theme,
    },
    Action {
        name: "get-theme",
        args: &[],
        about: "Alias of display-theme",
        handler: theme::display_theme,
    },
    Action {
        name: "new-theme",
        args: &["name"],
        about: "Create a theme from the skeleton",
        handler: theme::new_theme,
    },
    Action {
        name: "list-themes",
        args: &[],
        about: "List all themes",
        handler: query::list_themes,
    },
    Action {
        name: "get-colors",
        args: &["name"],
        about: "Print the colors of a theme",
        handler: query::get_colors,
    },
    Action {
        name: "get-path",
        args: &["name"],
        about: "Print the folder of a theme",
        handler: query::get_path,
    },
    Action {
        name: "get-controls",
        args: &["name"],
        about: "Print the init and deinit scripts of a theme",
        handler: query::get_controls,
    },
];

fn actions_help() -> String {
    let width = ACTIONS
        .iter()
        .map(|action| action.usage().len())
        .max()
        .unwrap_or(0);

    let mut help = String::from("Actions:\n");
    for action in ACTIONS {
        help.push_str(&format!(
            "  {:<width$}  {}\n",
            action.usage(),
            action.about,
            width = width
        ));
    }
    help
}

/// Look up an action by name.
pub fn find_action(name: &str) -> Result<&'static Action> {
    ACTIONS
        .iter()
        .find(|action| action.name == name)
        .with_context(|| {
            let names: Vec<_> = ACTIONS.iter().map(|action| action.name).collect();
            format!(
                "'{name}' is an invalid action.\nValid actions: {}",
                names.join(", ")
            )
        })
}

/// Check an action and its arguments, then run it.
pub fn dispatch(manager: &ThemeManager, name: &str, args: &[String]) -> Result<Output> {
    let action = find_action(name)?;
    action.check_arity(args)?;
    (action.handler)(manager, args)
}

/// Result printed by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing to print
    Nothing,
    /// A single value
    Scalar(String),
    /// Several values, one per line
    List(Vec<String>),
}

impl Output {
    /// Text to print on stdout, if any.
    pub fn render(&self, json: bool) -> Result<Option<String>> {
        if json {
            let value = match self {
                Self::Nothing => serde_json::Value::Null,
                Self::Scalar(value) => serde_json::json!(value),
                Self::List(values) => serde_json::json!(values),
            };
            return Ok(Some(serde_json::to_string_pretty(&value)?));
        }

        Ok(match self {
            Self::Nothing => None,
            Self::Scalar(value) => Some(value.clone()),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join("\n")),
        })
    }
}

/// Fail with the list of actions when none was named.
fn require_action(action: Option<&str>) -> Result<&str> {
    action.with_context(|| {
        let usages: Vec<_> = ACTIONS.iter().map(Action::usage).collect();
        format!(
            "No action given.\nUsage: themer <action> [args...]\nValid actions: {}",
            usages.join(", ")
        )
    })
}

/// Run the action named on the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let action = require_action(cli.action.as_deref())?;
    find_action(action)?.check_arity(&cli.args)?;

    let config = load_config();
    let layout = Layout::new(config.install_root(cli.root.as_deref()));
    layout
        .ensure_layout()
        .with_context(|| format!("Failed to prepare {}", layout.root().display()))?;

    let manager = ThemeManager::with_runner(layout, ShellRunner::from_config(&config.scripts));
    let output = dispatch(&manager, action, &cli.args)?;

    if let Some(text) = output.render(cli.json)? {
        println!("{text}");
    }

    Ok(())
}

/// Print an error, plus a suggestion when the core has one.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {err:#}");

    let suggestion = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<themer_core::Error>())
        .and_then(themer_core::Error::suggestion);

    if let Some(suggestion) = suggestion {
        eprintln!();
        eprintln!("Suggestion:");
        for line in suggestion.lines() {
            eprintln!("  {line}");
        }
    }
}
