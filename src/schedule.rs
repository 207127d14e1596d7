//! Daily prayer schedule construction.
//!
//! `DaySchedule::build` turns a civil date plus a settings snapshot into the
//! day's sorted list of prayer events. The solar engine supplies the base
//! instants; per-prayer minute adjustments are applied exactly once to those
//! base values, so rebuilding with identical inputs yields identical
//! instants. When the engine cannot solve the day (extreme latitudes) the
//! fixed fallback schedule is substituted and the schedule is flagged
//! degraded so the renderer can surface it.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::config::Config;
use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, FALLBACK_TIMES};
use crate::solar;
use crate::tz;

/// The six daily events. Sunrise is a marker, not an obligatory prayer: it
/// appears on the schedule display but never drives the adhan/iqamah flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All six events in canonical order.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    pub fn arabic_name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "الفجر",
            Prayer::Sunrise => "الشروق",
            Prayer::Dhuhr => "الظهر",
            Prayer::Asr => "العصر",
            Prayer::Maghrib => "المغرب",
            Prayer::Isha => "العشاء",
        }
    }

    pub fn indonesian_name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Subuh",
            Prayer::Sunrise => "Syuruq",
            Prayer::Dhuhr => "Dzuhur",
            Prayer::Asr => "Ashar",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isya",
        }
    }

    /// True for the five prayers that have an adhan and iqamah.
    pub fn is_obligatory(&self) -> bool {
        !matches!(self, Prayer::Sunrise)
    }
}

/// One event on the day's schedule: a prayer and its absolute instant in the
/// mosque timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerEvent {
    pub prayer: Prayer,
    pub instant: DateTime<Tz>,
}

/// The computed schedule for one civil date. Immutable once built; a fresh
/// one is constructed whenever the date or the settings change.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    date: NaiveDate,
    events: Vec<PrayerEvent>,
    degraded: bool,
}

impl DaySchedule {
    /// Build the schedule for `date` from a settings snapshot.
    ///
    /// Never fails: an unsolvable solar day produces the fallback schedule
    /// with `is_degraded()` set, and a logged warning.
    pub fn build(date: NaiveDate, config: &Config, timezone: Tz) -> Self {
        let latitude = config.latitude.unwrap_or(DEFAULT_LATITUDE);
        let longitude = config.longitude.unwrap_or(DEFAULT_LONGITUDE);
        let offset_hours = tz::utc_offset_hours(timezone, date);

        match solar::compute_day(
            date,
            latitude,
            longitude,
            offset_hours,
            config.calculation_method.unwrap_or_default(),
            config.madhab.unwrap_or_default(),
        ) {
            Ok(day) => {
                let mut events: Vec<PrayerEvent> = Prayer::ALL
                    .iter()
                    .zip(day.as_array())
                    .map(|(&prayer, base_minutes)| PrayerEvent {
                        prayer,
                        instant: instant_on(
                            date,
                            base_minutes + config.adjustment_minutes(prayer),
                            offset_hours,
                            timezone,
                        ),
                    })
                    .collect();
                events.sort_by_key(|event| event.instant);

                Self {
                    date,
                    events,
                    degraded: false,
                }
            }
            Err(e) => {
                log_pipe!();
                log_warning!("Prayer time calculation failed: {e}");
                log_indented!("Using the fixed fallback schedule for {date}");
                Self::fallback(date, offset_hours, timezone)
            }
        }
    }

    /// The fixed fallback day used when the solar equations are unsolvable.
    fn fallback(date: NaiveDate, offset_hours: f64, timezone: Tz) -> Self {
        let events = Prayer::ALL
            .iter()
            .zip(FALLBACK_TIMES)
            .map(|(&prayer, (hour, minute))| PrayerEvent {
                prayer,
                instant: instant_on(
                    date,
                    (hour * 60 + minute) as i64,
                    offset_hours,
                    timezone,
                ),
            })
            .collect();

        Self {
            date,
            events,
            degraded: true,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Events sorted chronologically.
    pub fn events(&self) -> &[PrayerEvent] {
        &self.events
    }

    /// True when the fallback schedule replaced a failed calculation.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Look up a specific prayer's event.
    pub fn event(&self, prayer: Prayer) -> Option<&PrayerEvent> {
        self.events.iter().find(|event| event.prayer == prayer)
    }

    /// Construct a schedule from pre-computed events, for tests that need
    /// hand-placed instants or an empty list.
    #[cfg(any(test, feature = "testing-support"))]
    pub fn from_events(date: NaiveDate, events: Vec<PrayerEvent>, degraded: bool) -> Self {
        Self {
            date,
            events,
            degraded,
        }
    }
}

/// Convert minutes-from-midnight into an absolute instant in the mosque
/// timezone, using the same fixed offset the solar engine was given so the
/// two stay consistent even inside DST gaps. Negative or >24h spill lands on
/// the adjacent civil day.
fn instant_on(date: NaiveDate, minutes: i64, offset_hours: f64, timezone: Tz) -> DateTime<Tz> {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    let naive = midnight + Duration::minutes(minutes);
    let fixed = FixedOffset::east_opt((offset_hours * 3600.0).round() as i32)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    fixed
        .from_local_datetime(&naive)
        .single()
        .expect("fixed-offset conversion is never ambiguous")
        .with_timezone(&timezone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::Timelike;

    fn jakarta_config() -> Config {
        let mut config = Config::default();
        config.latitude = Some(-6.2088);
        config.longitude = Some(106.8456);
        config.calculation_method = Some(crate::solar::CalculationMethod::Singapore);
        config
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn builds_six_sorted_events() {
        let schedule = DaySchedule::build(date(), &jakarta_config(), chrono_tz::Asia::Jakarta);
        assert_eq!(schedule.events().len(), 6);
        assert!(!schedule.is_degraded());
        for pair in schedule.events().windows(2) {
            assert!(pair[0].instant < pair[1].instant);
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let config = jakarta_config();
        let first = DaySchedule::build(date(), &config, chrono_tz::Asia::Jakarta);
        let second = DaySchedule::build(date(), &config, chrono_tz::Asia::Jakarta);
        assert_eq!(first.events(), second.events());
    }

    #[test]
    fn adjustment_shifts_exactly_once() {
        let base = DaySchedule::build(date(), &jakarta_config(), chrono_tz::Asia::Jakarta);

        let mut adjusted_config = jakarta_config();
        adjusted_config.adjustments.fajr = Some(10);
        let adjusted = DaySchedule::build(date(), &adjusted_config, chrono_tz::Asia::Jakarta);

        let base_fajr = base.event(Prayer::Fajr).unwrap().instant;
        let adjusted_fajr = adjusted.event(Prayer::Fajr).unwrap().instant;
        assert_eq!(adjusted_fajr - base_fajr, Duration::minutes(10));
    }

    #[test]
    fn adjustment_round_trips_to_base() {
        let mut up = jakarta_config();
        up.adjustments.isha = Some(7);
        let mut down = up.clone();
        down.adjustments.isha = Some(0);

        let base = DaySchedule::build(date(), &jakarta_config(), chrono_tz::Asia::Jakarta);
        let restored = DaySchedule::build(date(), &down, chrono_tz::Asia::Jakarta);
        assert_eq!(
            base.event(Prayer::Isha).unwrap().instant,
            restored.event(Prayer::Isha).unwrap().instant
        );
    }

    #[test]
    fn polar_coordinates_fall_back_degraded() {
        crate::logger::Log::set_enabled(false);
        let mut config = jakarta_config();
        config.latitude = Some(78.2);
        config.longitude = Some(15.6);
        let schedule = DaySchedule::build(
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            &config,
            chrono_tz::Arctic::Longyearbyen,
        );
        crate::logger::Log::set_enabled(true);

        assert!(schedule.is_degraded());
        assert_eq!(schedule.events().len(), 6);
        let fajr = schedule.event(Prayer::Fajr).unwrap().instant;
        assert_eq!((fajr.hour(), fajr.minute()), (4, 30));
    }

    #[test]
    fn sunrise_is_the_only_non_obligatory_event() {
        let obligatory: Vec<_> = Prayer::ALL
            .iter()
            .filter(|prayer| prayer.is_obligatory())
            .collect();
        assert_eq!(obligatory.len(), 5);
        assert!(!Prayer::Sunrise.is_obligatory());
    }
}
