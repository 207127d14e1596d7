//! Application entry point: resource acquisition and the run lifecycle.
//!
//! `Salatr` wires together the pieces a display run needs — terminal state,
//! signal handling, the config snapshot, the single-instance lock, the
//! timezone, and the config watcher — then hands control to the core loop.
//! The builder shape exists so the simulate command can run the same
//! lifecycle without taking the instance lock.

use anyhow::{Context, Result, bail};
use fs2::FileExt;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::core::{Core, CoreParams};
use crate::signals;
use crate::tz;

/// Builder for configuring and running the salatr display.
pub struct Salatr {
    debug_enabled: bool,
    create_lock: bool,
}

impl Salatr {
    /// Create a runner with defaults matching a normal `salatr` invocation.
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            create_lock: true,
        }
    }

    /// Skip the single-instance lock (simulation runs).
    pub fn without_lock(mut self) -> Self {
        self.create_lock = false;
        self
    }

    /// Execute the display run until shutdown.
    pub fn run(self) -> Result<()> {
        // Cursor hiding is best-effort; headless launches have no terminal
        let _term = TerminalGuard::new();

        let signal_state = signals::setup_signal_handler(self.debug_enabled)?;

        let config = Config::load()?;

        let lock = if self.create_lock {
            Some(acquire_instance_lock()?)
        } else {
            None
        };

        let timezone = tz::resolve_timezone(
            config.timezone.as_deref(),
            config.latitude.unwrap_or(DEFAULT_LATITUDE),
            config.longitude.unwrap_or(DEFAULT_LONGITUDE),
        )?;

        // Keep the watcher alive for the whole run; without it settings
        // edits only apply after SIGUSR2 or a restart.
        let config_path = config::get_config_path()?;
        let _watcher =
            match config::start_config_watcher(&config_path, signal_state.sender.clone()) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log_pipe!();
                    log_warning!("Config watcher unavailable, hot reload disabled: {e}");
                    None
                }
            };

        let core = Core::new(CoreParams {
            config,
            timezone,
            signal_state,
            debug_enabled: self.debug_enabled,
        });
        let result = core.execute();

        if let Some((lock_file, lock_path)) = lock {
            drop(lock_file);
            let _ = std::fs::remove_file(&lock_path);
        }

        result
    }
}

/// Take the per-user exclusive lock so two instances cannot fight over one
/// screen. The file is opened without truncation so a losing process cannot
/// clobber the winner's PID record.
fn acquire_instance_lock() -> Result<(std::fs::File, PathBuf)> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    let lock_path = PathBuf::from(runtime_dir).join("salatr.lock");

    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

    if lock_file.try_lock_exclusive().is_err() {
        bail!("Another salatr instance is already running");
    }

    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    Ok((lock_file, lock_path))
}

/// Hides the cursor for the lifetime of the run when stdout is a terminal,
/// restoring it on drop.
struct TerminalGuard {
    cursor_hidden: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        use crossterm::tty::IsTty;

        let mut stdout = std::io::stdout();
        let cursor_hidden =
            stdout.is_tty() && crossterm::execute!(stdout, crossterm::cursor::Hide).is_ok();
        Self { cursor_hidden }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = crossterm::execute!(std::io::stdout(), crossterm::cursor::Show);
        }
    }
}
