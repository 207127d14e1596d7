//! Binary entry point and CLI dispatch.
//!
//! Argument parsing happens first; each action then sets the config
//! directory (when given) and hands off to the library: the `Salatr` runner
//! for display runs, the simulate module for accelerated replays, or a
//! one-shot schedule print.

use anyhow::Result;

use salatr::args::{self, CliAction, ParsedArgs};
use salatr::config::{self, Config};
use salatr::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use salatr::logger::Log;
use salatr::schedule::DaySchedule;
use salatr::{display, log_block_start, log_debug, log_end, log_error, log_pipe, log_version};
use salatr::{simulate, time_source, tz};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    let exit_code = match dispatch(parsed.action) {
        Ok(code) => code,
        Err(e) => {
            log_pipe!();
            log_error!("{e:#}");
            log_end!();
            1
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn dispatch(action: CliAction) -> Result<i32> {
    match action {
        CliAction::Run {
            debug_enabled,
            config_dir,
        } => {
            config::set_config_dir(config_dir);
            log_version!();
            if debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled");
            }
            salatr::Salatr::new(debug_enabled).run()?;
            Ok(0)
        }

        CliAction::ScheduleCommand { json, config_dir } => {
            config::set_config_dir(config_dir);
            if json {
                // Keep stdout pure JSON
                Log::set_enabled(false);
            }
            print_schedule(json)?;
            Ok(0)
        }

        CliAction::SimulateCommand {
            debug_enabled,
            start,
            end,
            multiplier,
            config_dir,
        } => {
            config::set_config_dir(config_dir);
            simulate::run_simulation(&start, &end, multiplier, debug_enabled)?;
            Ok(0)
        }

        CliAction::ShowHelp => {
            args::display_help();
            Ok(0)
        }

        CliAction::ShowVersion => {
            args::display_version();
            Ok(0)
        }

        CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(1)
        }
    }
}

/// Compute and print today's schedule without entering the display loop.
fn print_schedule(json: bool) -> Result<()> {
    let config = Config::load()?;
    let timezone = tz::resolve_timezone(
        config.timezone.as_deref(),
        config.latitude.unwrap_or(DEFAULT_LATITUDE),
        config.longitude.unwrap_or(DEFAULT_LONGITUDE),
    )?;
    let today = time_source::now().with_timezone(&timezone).date_naive();
    let schedule = DaySchedule::build(today, &config, timezone);

    if !json && schedule.is_degraded() {
        log_block_start!("Calculation failed; the times below are the fixed fallback");
    }
    display::print_schedule_table(&schedule, &config, timezone, json);
    Ok(())
}
