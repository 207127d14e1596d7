//! Signal handling and the tick wake channel.
//!
//! The main loop sleeps on a channel so anything that needs an out-of-band
//! tick — a termination signal, SIGUSR2, the config watcher — can wake it
//! immediately instead of waiting for the next second boundary. Signals are
//! translated into `WakeMessage`s by a dedicated thread.

use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR2};
use signal_hook::iterator::Signals;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Messages that wake the tick loop before its timer expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeMessage {
    /// Terminate the loop and clean up
    Shutdown,
    /// Re-read the config and tick immediately
    Reload,
}

/// Shared signal state handed to the core loop.
pub struct SignalState {
    /// Cleared when a termination signal arrives
    pub running: Arc<AtomicBool>,
    /// Clone for other wake sources (the config watcher)
    pub sender: Sender<WakeMessage>,
    /// Consumed by the core loop's sleep
    pub receiver: Receiver<WakeMessage>,
}

/// Install the signal handler thread.
///
/// SIGINT/SIGTERM request shutdown; SIGUSR2 requests a config reload, so an
/// external settings writer can poke the display without touching the file
/// watcher path.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let (sender, receiver) = channel();
    let running = Arc::new(AtomicBool::new(true));

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGUSR2]).context("Failed to register signal handlers")?;

    let thread_sender = sender.clone();
    let thread_running = running.clone();
    std::thread::spawn(move || {
        for signal in signals.forever() {
            match signal {
                SIGINT | SIGTERM => {
                    thread_running.store(false, Ordering::SeqCst);
                    if thread_sender.send(WakeMessage::Shutdown).is_err() {
                        break;
                    }
                }
                SIGUSR2 => {
                    if debug_enabled {
                        log_pipe!();
                        log_debug!("SIGUSR2 received, requesting config reload");
                    }
                    if thread_sender.send(WakeMessage::Reload).is_err() {
                        break;
                    }
                }
                _ => {}
            }
        }
    });

    Ok(SignalState {
        running,
        sender,
        receiver,
    })
}
