//! File watcher: runs `check` on startup, then re-runs on help tree changes.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::config::Config;
use crate::error::Error;

/// Debounce delay between filesystem events and re-check.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return Error::FallbackUnavailable {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Runs an initial check, then watches the docs and images directories and
/// re-checks on changes.
///
/// # Errors
///
/// Returns errors from config loading or watcher setup.
pub fn run(format: &str) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;

    eprintln!("watch: initial check");
    let mut last_code = run_check(format);

    let watch_dirs = [
        root.join(config.docs_dir()),
        root.join(config.images_dir()),
    ];

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    for dir in &watch_dirs {
        if dir.exists() {
            let _ = watcher.watch(dir, RecursiveMode::Recursive);
        }
    }

    eprintln!("watch: monitoring help tree, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-checking...");
        last_code = run_check(format);
    }

    return Ok(last_code);
}

/// Run check once and print result. Returns the exit code from check.
fn run_check(format: &str) -> ExitCode {
    return match commands::check(format) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(3_u8)
        },
    };
}
