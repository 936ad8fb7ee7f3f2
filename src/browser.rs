//! External browser launching via the platform opener command.

use std::process::Command;

use crate::error::Error;
use crate::viewer::BrowserLauncher;

/// Launches link targets through `xdg-open` (or the platform equivalent).
/// Launch failures are reported, never fatal: the viewer stays usable.
pub struct CommandLauncher;

impl BrowserLauncher for CommandLauncher {
    /// Spawn the platform opener with the full link target.
    ///
    /// # Errors
    ///
    /// Returns `Error::Launch` if the opener cannot be spawned or exits
    /// unsuccessfully.
    fn open(&self, url: &str) -> Result<(), Error> {
        let status = opener_command(url).status().map_err(|e| Error::Launch {
            reason: e.to_string(),
            url: url.to_string(),
        })?;

        if status.success() {
            return Ok(());
        }
        return Err(Error::Launch {
            reason: format!("opener exited with {status}"),
            url: url.to_string(),
        });
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    return cmd;
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url);
    return cmd;
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    return cmd;
}
