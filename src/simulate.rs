//! Accelerated-time runs for observing a full day of transitions.
//!
//! `salatr simulate "2024-06-01 11:00:00" "2024-06-01 13:00:00" 60` replays
//! the display's behavior over that span at sixty simulated seconds per real
//! second. A multiplier of 0 fast-forwards: the clock jumps tick to tick and
//! the run completes as fast as the log can be written. Every log line gains
//! the simulated clock as a prefix so the transition timeline can be read
//! (or diffed) afterwards.

use anyhow::{Result, bail};
use std::sync::Arc;

use crate::salatr::Salatr;
use crate::time_source::{self, SimulatedTimeSource};

/// Run the display lifecycle against a simulated clock.
pub fn run_simulation(
    start: &str,
    end: &str,
    multiplier: f64,
    debug_enabled: bool,
) -> Result<()> {
    let start_time = match time_source::parse_datetime(start) {
        Ok(t) => t,
        Err(e) => bail!("Invalid start time: {e}"),
    };
    let end_time = match time_source::parse_datetime(end) {
        Ok(t) => t,
        Err(e) => bail!("Invalid end time: {e}"),
    };
    if end_time <= start_time {
        bail!("Simulation end time must be after the start time");
    }

    time_source::init_time_source(Arc::new(SimulatedTimeSource::new(
        start_time, end_time, multiplier,
    )));

    log_version!();
    log_block_start!("Simulating {start} → {end}");
    if multiplier > 0.0 {
        log_indented!("{multiplier}x speed");
    } else {
        log_indented!("fast-forward");
    }

    Salatr::new(debug_enabled).without_lock().run()
}
