//! Installs or removes the `themer` command by symlinking it into a
//! binary directory (default `/usr/local/bin`).
//!
//! ```bash
//! sudo themer-install --install
//! sudo themer-install --uninstall --target /opt/bin
//! ```

#![allow(clippy::doc_markdown)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{env, fs, io};

use anyhow::{bail, Context, Result};
use clap::Parser;
use themer_core::config::Config;

/// Installs the themer command.
#[derive(Parser)]
#[command(name = "themer-install")]
#[command(author, version, about, long_about = None)]
struct InstallArgs {
    /// Installs the command
    #[arg(short, long, conflicts_with = "uninstall", required_unless_present = "uninstall")]
    install: bool,

    /// Uninstalls the command
    #[arg(short, long)]
    uninstall: bool,

    /// Changes the installation directory
    #[arg(short, long, value_name = "DIR")]
    target: Option<PathBuf>,
}

/// A symlink from `target_dir/link_name` to `source`.
struct Installer {
    source: PathBuf,
    target_dir: PathBuf,
    link_name: String,
}

impl Installer {
    fn link_path(&self) -> PathBuf {
        self.target_dir.join(&self.link_name)
    }

    /// Create the symlink, refusing to replace anything already there.
    fn install(&self) -> Result<PathBuf> {
        let link = self.link_path();
        if fs::symlink_metadata(&link).is_ok() {
            bail!("Command already installed at {}.", link.display());
        }

        symlink(&self.source, &link).with_context(|| {
            format!(
                "Failed to symlink {} to {}",
                self.source.display(),
                link.display()
            )
        })?;
        tracing::debug!("Linked {} -> {}", link.display(), self.source.display());

        Ok(link)
    }

    /// Remove the symlink, refusing when there is none.
    fn uninstall(&self) -> Result<PathBuf> {
        let link = self.link_path();
        let metadata = match fs::symlink_metadata(&link) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                bail!("No installed command detected at {}.", link.display())
            }
            Err(e) => return Err(e).context(format!("Failed to inspect {}", link.display())),
        };

        if !metadata.file_type().is_symlink() {
            bail!(
                "{} is not a symlink, refusing to remove it.",
                link.display()
            );
        }

        fs::remove_file(&link).with_context(|| format!("Failed to remove {}", link.display()))?;
        Ok(link)
    }
}

#[cfg(unix)]
fn symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
fn symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, link)
}

/// Check for root privileges.
#[cfg(unix)]
fn is_privileged() -> bool {
    #[allow(unsafe_code)]
    unsafe {
        libc::geteuid() == 0
    }
}

/// Check for root privileges (unsupported platforms never qualify).
#[cfg(not(unix))]
fn is_privileged() -> bool {
    false
}

/// The `themer` binary shipped next to this installer.
fn entry_command() -> Result<PathBuf> {
    let exe = env::current_exe().context("Could not locate the installer executable")?;
    let dir = exe
        .parent()
        .context("Installer executable has no parent directory")?;
    let source = dir.join(format!("themer{}", env::consts::EXE_SUFFIX));

    if !source.is_file() {
        bail!("Could not find the themer command at {}.", source.display());
    }

    Ok(source)
}

fn run(args: InstallArgs) -> Result<()> {
    if !is_privileged() {
        bail!("This command needs to be executed using root privileges.");
    }

    let config = Config::load_or_default();
    let installer = Installer {
        source: entry_command()?,
        target_dir: args.target.unwrap_or(config.install.target_dir),
        link_name: config.install.link_name,
    };

    if args.install {
        println!(
            "Symlinking {} to {}",
            installer.source.display(),
            installer.target_dir.display()
        );
        installer.install()?;
    } else {
        println!(
            "Removing symlink pointing to {} from {}",
            installer.source.display(),
            installer.target_dir.display()
        );
        installer.uninstall()?;
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match run(InstallArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            eprintln!("Installation was unsuccessful.");
            ExitCode::FAILURE
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn installer(dir: &TempDir) -> Installer {
        let source = dir.path().join("themer");
        fs::write(&source, "#!/bin/sh\n").unwrap();
        let target_dir = dir.path().join("bin");
        fs::create_dir(&target_dir).unwrap();

        Installer {
            source,
            target_dir,
            link_name: "themer".to_string(),
        }
    }

    #[test]
    fn test_install_then_uninstall() {
        let dir = TempDir::new().unwrap();
        let installer = installer(&dir);

        let link = installer.install().unwrap();
        assert_eq!(fs::read_link(&link).unwrap(), installer.source);

        installer.uninstall().unwrap();
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(installer.source.exists());
    }

    #[test]
    fn test_install_refuses_existing() {
        let dir = TempDir::new().unwrap();
        let installer = installer(&dir);
        installer.install().unwrap();

        let err = installer.install().unwrap_err();
        assert!(err.to_string().contains("already installed"));
    }

    #[test]
    fn test_uninstall_without_install() {
        let dir = TempDir::new().unwrap();
        let installer = installer(&dir);

        let err = installer.uninstall().unwrap_err();
        assert!(err.to_string().contains("No installed command"));
    }

    #[test]
    fn test_uninstall_refuses_regular_file() {
        let dir = TempDir::new().unwrap();
        let installer = installer(&dir);
        fs::write(installer.link_path(), "not a link").unwrap();

        assert!(installer.uninstall().is_err());
        assert!(installer.link_path().exists());
    }

    #[test]
    fn test_flags() {
        assert!(InstallArgs::try_parse_from(["themer-install"]).is_err());
        assert!(InstallArgs::try_parse_from(["themer-install", "-i", "-u"]).is_err());

        let args = InstallArgs::try_parse_from(["themer-install", "-u", "-t", "/opt/bin"]).unwrap();
        assert!(args.uninstall);
        assert_eq!(args.target, Some(PathBuf::from("/opt/bin")));
    }
}
