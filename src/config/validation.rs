//! Configuration validation.
//!
//! Rejects impossible or out-of-range setups before they reach the core, so
//! the calculation and phase components can assume validated input. Boundary
//! values (latitude exactly ±90) are accepted here; the solar engine handles
//! them through its unsolvable-equation fallback rather than a crash.

use anyhow::Result;

use super::Config;
use crate::constants::*;
use crate::schedule::Prayer;

/// Comprehensive validation of a loaded configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if let Some(name) = config.timezone.as_deref()
        && name.parse::<chrono_tz::Tz>().is_err()
    {
        anyhow::bail!("timezone '{}' is not a known IANA zone name", name);
    }

    for prayer in Prayer::ALL {
        let adjustment = config.adjustments.for_prayer(prayer);
        if !(MINIMUM_ADJUSTMENT..=MAXIMUM_ADJUSTMENT).contains(&adjustment) {
            anyhow::bail!(
                "adjustment for {} ({} minutes) must be between {} and {} minutes",
                prayer.name(),
                adjustment,
                MINIMUM_ADJUSTMENT,
                MAXIMUM_ADJUSTMENT
            );
        }
    }

    let durations = config.durations();
    for prayer in Prayer::ALL {
        if let Some(iqamah) = durations.iqamah_minutes(prayer)
            && !(0..=MAXIMUM_PHASE_MINUTES).contains(&iqamah)
        {
            anyhow::bail!(
                "iqamah wait for {} ({} minutes) must be between 0 and {} minutes",
                prayer.name(),
                iqamah,
                MAXIMUM_PHASE_MINUTES
            );
        }
    }

    if !(MINIMUM_COUNTDOWN_WINDOW..=MAXIMUM_COUNTDOWN_WINDOW)
        .contains(&durations.countdown_window_minutes)
    {
        anyhow::bail!(
            "countdown_window ({} minutes) must be between {} and {} minutes",
            durations.countdown_window_minutes,
            MINIMUM_COUNTDOWN_WINDOW,
            MAXIMUM_COUNTDOWN_WINDOW
        );
    }

    if !(0..=MAXIMUM_PHASE_MINUTES).contains(&durations.after_iqamah_minutes) {
        anyhow::bail!(
            "after_iqamah_minutes ({}) must be between 0 and {} minutes",
            durations.after_iqamah_minutes,
            MAXIMUM_PHASE_MINUTES
        );
    }

    if !(0..=MAXIMUM_PHASE_MINUTES).contains(&durations.blank_minutes) {
        anyhow::bail!(
            "blank_minutes ({}) must be between 0 and {} minutes",
            durations.blank_minutes,
            MAXIMUM_PHASE_MINUTES
        );
    }

    if let Some(interval) = config.tick_interval
        && !(MINIMUM_TICK_INTERVAL..=MAXIMUM_TICK_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "tick_interval ({} seconds) must be between {} and {} seconds",
            interval,
            MINIMUM_TICK_INTERVAL,
            MAXIMUM_TICK_INTERVAL
        );
    }

    Ok(())
}
