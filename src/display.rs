//! Rendering the computed state to the structured log and to stdout.
//!
//! The display hardware itself is an external collaborator; this module is
//! the boundary where each tick's `PhaseState` and the day's schedule become
//! visible. Phase changes are announced as log blocks, and the `schedule`
//! subcommand prints the day's table directly (optionally as JSON for other
//! consumers).

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::config::Config;
use crate::phase::{Phase, PhaseState};
use crate::schedule::DaySchedule;

/// Format a remaining duration as `HH:MM:SS`, clamped at zero.
pub fn format_remaining(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60
    )
}

/// Log the startup summary block: location, method, and today's table.
pub fn log_startup_summary(config: &Config, timezone: Tz, schedule: &DaySchedule) {
    log_block_start!("Display: {}", config.mosque_name());
    if let Some(description) = config.mosque_description.as_deref()
        && !description.is_empty()
    {
        log_indented!("{description}");
    }
    log_indented!(
        "Location: {:.4}, {:.4} ({})",
        config.latitude.unwrap_or(crate::constants::DEFAULT_LATITUDE),
        config.longitude.unwrap_or(crate::constants::DEFAULT_LONGITUDE),
        timezone.name()
    );
    log_indented!(
        "Method: {}, madhab: {:?}",
        config.calculation_method.unwrap_or_default().as_str(),
        config.madhab.unwrap_or_default()
    );

    log_schedule(schedule);
}

/// Log the day's timetable as an indented block.
pub fn log_schedule(schedule: &DaySchedule) {
    log_block_start!("Prayer times for {}", schedule.date());
    if schedule.is_degraded() {
        log_warning!("Schedule is using fallback times (calculation failed)");
    }
    for event in schedule.events() {
        log_indented!(
            "{:<8} {:<8} {}",
            event.prayer.name(),
            format!("({})", event.prayer.indonesian_name()),
            event.instant.format("%H:%M")
        );
    }
}

/// Announce a phase change as a new log block.
pub fn log_phase_change(state: &PhaseState, config: &Config, now: DateTime<Tz>) {
    match state.phase {
        Phase::Schedule => {
            log_block_start!(
                "Showing schedule ({} until next countdown)",
                format_remaining(state.remaining)
            );
        }
        Phase::Countdown => {
            if let Some(event) = state.active_event {
                log_block_start!(
                    "Countdown to {} at {} ({} remaining)",
                    event.prayer.name(),
                    event.instant.format("%H:%M"),
                    format_remaining(state.remaining)
                );
            }
        }
        Phase::Adhan => {
            if let Some(event) = state.active_event {
                log_block_start!(
                    "Adhan {} at {}",
                    event.prayer.indonesian_name(),
                    now.format("%H:%M")
                );
            }
        }
        Phase::Iqamah => {
            if let Some(event) = state.active_event {
                log_block_start!(
                    "Iqamah {} in {}",
                    event.prayer.indonesian_name(),
                    format_remaining(state.remaining)
                );
            }
        }
        Phase::AfterIqamah => {
            log_block_start!("\"{}\"", config.after_iqamah_message());
        }
        Phase::Blank => {
            log_block_start!(
                "Blanking screen ({} until schedule returns)",
                format_remaining(state.remaining)
            );
        }
    }
}

/// Print the day's schedule to stdout for the `schedule` subcommand.
pub fn print_schedule_table(schedule: &DaySchedule, config: &Config, timezone: Tz, json: bool) {
    if json {
        let events: Vec<serde_json::Value> = schedule
            .events()
            .iter()
            .map(|event| {
                serde_json::json!({
                    "name": event.prayer.name(),
                    "arabic": event.prayer.arabic_name(),
                    "indonesian": event.prayer.indonesian_name(),
                    "time": event.instant.format("%H:%M").to_string(),
                    "instant": event.instant.to_rfc3339(),
                    "obligatory": event.prayer.is_obligatory(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "date": schedule.date().to_string(),
            "timezone": timezone.name(),
            "mosque": config.mosque_name(),
            "degraded": schedule.is_degraded(),
            "events": events,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return;
    }

    println!("{} — {}", config.mosque_name(), schedule.date());
    if schedule.is_degraded() {
        println!("(fallback schedule: calculation failed for these coordinates)");
    }
    for event in schedule.events() {
        println!(
            "  {:<8} {:<10} {}",
            event.prayer.name(),
            event.prayer.indonesian_name(),
            event.instant.format("%H:%M")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_remaining_pads_and_clamps() {
        assert_eq!(format_remaining(Duration::seconds(3 * 3600 + 62)), "03:01:02");
        assert_eq!(format_remaining(Duration::zero()), "00:00:00");
        assert_eq!(format_remaining(Duration::seconds(-5)), "00:00:00");
    }
}
