//! Core tick loop.
//!
//! The `Core` struct owns the runtime state of a display run: the current
//! settings snapshot, the resolved timezone, and today's schedule. Its loop
//! samples the clock once per tick, re-evaluates the event locator and the
//! phase machine, announces phase changes, then sleeps on the wake channel
//! so signals and config edits interrupt the wait.
//!
//! Each tick is a pure function of (now, schedule, settings, pin); the loop
//! holds no state a tick could corrupt, so it can be stopped between ticks
//! with no cleanup.

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::sync::atomic::Ordering;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration as StdDuration;

use crate::config::Config;
use crate::display;
use crate::phase::{self, Phase, PhaseState};
use crate::schedule::DaySchedule;
use crate::signals::{SignalState, WakeMessage};
use crate::time_source;
use crate::tz;

/// Parameters for creating a Core instance.
pub struct CoreParams {
    pub config: Config,
    pub timezone: Tz,
    pub signal_state: SignalState,
    pub debug_enabled: bool,
}

/// Runtime state of the main loop.
pub struct Core {
    config: Config,
    timezone: Tz,
    schedule: DaySchedule,
    signal_state: SignalState,
    debug_enabled: bool,
}

impl Core {
    /// Create a Core with today's schedule already built.
    pub fn new(params: CoreParams) -> Self {
        let today = time_source::now()
            .with_timezone(&params.timezone)
            .date_naive();
        let schedule = DaySchedule::build(today, &params.config, params.timezone);

        Self {
            config: params.config,
            timezone: params.timezone,
            schedule,
            signal_state: params.signal_state,
            debug_enabled: params.debug_enabled,
        }
    }

    /// Run the display loop until shutdown (or simulation end).
    pub fn execute(mut self) -> Result<()> {
        if let Some(custom_dir) = crate::config::loading::get_custom_config_dir() {
            log_block_start!("Base directory: {}", custom_dir.display());
        }

        display::log_startup_summary(&self.config, self.timezone, &self.schedule);

        self.main_loop()?;

        log_block_start!("Shutting down salatr...");
        log_end!();
        Ok(())
    }

    fn now_in_tz(&self) -> DateTime<Tz> {
        time_source::now().with_timezone(&self.timezone)
    }

    fn main_loop(&mut self) -> Result<()> {
        let mut displayed_phase: Option<Phase> = None;
        if let Some(pinned) = self.config.force_phase {
            log_block_start!(
                "Manual override active: phase pinned to {}",
                pinned.display_name()
            );
        }

        while self.signal_state.running.load(Ordering::SeqCst)
            && !time_source::simulation_ended()
        {
            let now = self.now_in_tz();

            // The schedule builder is the single source of truth; rebuild it
            // once whenever the civil date rolls over.
            if now.date_naive() != self.schedule.date() {
                self.rebuild_schedule(now.date_naive());
            }

            let state = phase::evaluate(
                now,
                &self.schedule,
                &self.config.durations(),
                self.config.force_phase,
            );

            self.publish(&state, &mut displayed_phase, now);

            // Sleep until the next tick or an out-of-band wake
            let interval = StdDuration::from_secs(self.config.tick_interval_secs());
            if time_source::is_simulated() {
                // The simulated clock advances inside sleep; drain any wake
                // messages without blocking on real time
                time_source::sleep(interval);
                if let Ok(message) = self.signal_state.receiver.try_recv() {
                    self.handle_wake(message);
                }
            } else {
                match self.signal_state.receiver.recv_timeout(interval) {
                    Ok(message) => self.handle_wake(message),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => {
                        if self.signal_state.running.load(Ordering::SeqCst) {
                            log_pipe!();
                            log_error!("Wake channel disconnected unexpectedly");
                            log_indented!("Signals and config reload will no longer be processed");
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Hand the tick's result to the renderer. Phase changes open a new log
    /// block; unchanged phases stay quiet apart from debug countdowns at
    /// whole-minute boundaries.
    fn publish(&self, state: &PhaseState, displayed_phase: &mut Option<Phase>, now: DateTime<Tz>) {
        if *displayed_phase != Some(state.phase) {
            if self.schedule.events().is_empty() {
                log_pipe!();
                log_warning!("Schedule is empty; display degraded to the resting phase");
            }
            display::log_phase_change(state, &self.config, now);
            *displayed_phase = Some(state.phase);
        } else if self.debug_enabled
            && state.phase.follows_prayer()
            && state.remaining_ms() % 60_000 < 1_000
            && state.remaining_ms() > 0
        {
            log_debug!(
                "{}: {} remaining",
                state.phase.display_name(),
                display::format_remaining(state.remaining)
            );
        }
    }

    fn rebuild_schedule(&mut self, date: NaiveDate) {
        self.schedule = DaySchedule::build(date, &self.config, self.timezone);
        display::log_schedule(&self.schedule);
    }

    fn handle_wake(&mut self, message: WakeMessage) {
        match message {
            WakeMessage::Shutdown => {
                // running was already cleared by the signal thread; the loop
                // condition ends the run on the next check
            }
            WakeMessage::Reload => self.reload_config(),
        }
    }

    /// Re-read the config after a watcher or SIGUSR2 wake. An invalid file
    /// keeps the previous snapshot so a half-saved edit cannot take down
    /// the display.
    fn reload_config(&mut self) {
        let fresh = match Config::load() {
            Ok(config) => config,
            Err(e) => {
                log_pipe!();
                log_warning!("Config reload failed, keeping previous settings: {e}");
                return;
            }
        };

        if fresh == self.config {
            if self.debug_enabled {
                log_pipe!();
                log_debug!("Config unchanged after reload");
            }
            return;
        }

        log_block_start!("Configuration reloaded");

        let timezone_changed = fresh.timezone != self.config.timezone
            || fresh.latitude != self.config.latitude
            || fresh.longitude != self.config.longitude;
        if timezone_changed {
            match tz::resolve_timezone(
                fresh.timezone.as_deref(),
                fresh.latitude.unwrap_or(crate::constants::DEFAULT_LATITUDE),
                fresh.longitude.unwrap_or(crate::constants::DEFAULT_LONGITUDE),
            ) {
                Ok(timezone) => self.timezone = timezone,
                Err(e) => log_warning!("Keeping previous timezone: {e}"),
            }
        }

        match (self.config.force_phase, fresh.force_phase) {
            (None, Some(phase)) => {
                log_decorated!("Manual override set: {}", phase.display_name());
            }
            (Some(_), None) => {
                log_decorated!("Manual override cleared, resuming automatic phases");
            }
            _ => {}
        }

        self.config = fresh;
        let today = self.now_in_tz().date_naive();
        self.rebuild_schedule(today);
    }
}
