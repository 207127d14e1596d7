//! Config file watcher for hot reload.
//!
//! Watches the directory containing `salatr.toml` and posts a reload message
//! to the tick channel whenever the file changes, so settings edits take
//! effect immediately instead of at the next second boundary. The directory
//! (not the file) is watched because most editors and sync tools replace the
//! file atomically, which would orphan a file-level watch.

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::Sender;

use crate::signals::WakeMessage;

/// Start watching the config file. The returned watcher must be kept alive
/// for the lifetime of the run; dropping it stops the notifications.
pub fn start_config_watcher(
    config_path: &Path,
    sender: Sender<WakeMessage>,
) -> Result<RecommendedWatcher> {
    let watch_dir = config_path
        .parent()
        .context("Config path has no parent directory")?
        .to_path_buf();
    let file_name = config_path
        .file_name()
        .context("Config path has no file name")?
        .to_os_string();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        let Ok(event) = result else { return };
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return;
        }
        let touches_config = event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name.as_os_str()));
        if touches_config {
            // A send failure means the main loop is gone; nothing to do
            let _ = sender.send(WakeMessage::Reload);
        }
    })
    .context("Failed to create config file watcher")?;

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch config directory: {}", watch_dir.display()))?;

    Ok(watcher)
}
