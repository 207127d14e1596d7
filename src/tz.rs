//! Mosque timezone resolution.
//!
//! All schedule instants are stored as `DateTime<Tz>` in the mosque's
//! timezone, so comparisons across midnight and DST shifts stay correct even
//! when the host system's local zone differs from the screen's location.
//! The zone comes from the config when named there, otherwise it is derived
//! from the configured coordinates.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tzf_rs::DefaultFinder;

static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// Determine the IANA timezone for a pair of coordinates.
///
/// Falls back to UTC for coordinates in international waters, which keeps
/// startup total; a UTC schedule is wrong but the display stays alive.
pub fn timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    let name = FINDER.get_tz_name(longitude, latitude);
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// Resolve the mosque timezone from an optional config name plus coordinates.
pub fn resolve_timezone(configured: Option<&str>, latitude: f64, longitude: f64) -> Result<Tz> {
    match configured {
        Some(name) => name
            .parse::<Tz>()
            .ok()
            .with_context(|| format!("Unknown timezone '{name}' in config")),
        None => Ok(timezone_from_coordinates(latitude, longitude)),
    }
}

/// UTC offset of `tz` in fractional hours on the given date.
///
/// Sampled at local noon so the value is stable across the DST edges that
/// fall in the small hours. Ambiguous noons (rare, offset-shifting zones)
/// take the earliest mapping.
pub fn utc_offset_hours(tz: Tz, date: NaiveDate) -> f64 {
    let noon = date.and_hms_opt(12, 0, 0).expect("12:00:00 is always valid");
    let resolved = tz
        .from_local_datetime(&noon)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&noon));
    resolved.offset().fix().local_minus_utc() as f64 / 3600.0
}
