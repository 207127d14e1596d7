use chrono::NaiveDate;
use proptest::prelude::*;

use salatr::config::Config;
use salatr::locator;
use salatr::schedule::{DaySchedule, Prayer};
use salatr::solar::{CalculationMethod, Madhab, compute_day};

/// Latitudes where every method's twilight angles stay solvable year-round.
/// Above ~46° the 18-20° dawn twilight can persist all night near the
/// summer solstice, which is the engine's designed failure path, not a
/// property violation.
fn temperate_latitude_strategy() -> impl Strategy<Value = f64> {
    -44.0..=44.0
}

fn longitude_strategy() -> impl Strategy<Value = f64> {
    -180.0..=180.0
}

fn day_of_2024_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=366).prop_map(|ordinal| {
        NaiveDate::from_yo_opt(2024, ordinal).expect("2024 is a leap year")
    })
}

fn method_strategy() -> impl Strategy<Value = CalculationMethod> {
    prop_oneof![
        Just(CalculationMethod::Mwl),
        Just(CalculationMethod::Isna),
        Just(CalculationMethod::Egypt),
        Just(CalculationMethod::Makkah),
        Just(CalculationMethod::Karachi),
        Just(CalculationMethod::Tehran),
        Just(CalculationMethod::Jafari),
        Just(CalculationMethod::Singapore),
    ]
}

proptest! {
    /// The six computed instants are strictly increasing in
    /// Fajr < Sunrise < Dhuhr < Asr < Maghrib < Isha order for any
    /// temperate coordinates, any 2024 date, and any method.
    #[test]
    fn events_are_strictly_increasing(
        lat in temperate_latitude_strategy(),
        lon in longitude_strategy(),
        date in day_of_2024_strategy(),
        method in method_strategy()
    ) {
        // Natural meridian time keeps the values near a normal clock day
        let tz_hours = (lon / 15.0).round();
        let day = compute_day(date, lat, lon, tz_hours, method, Madhab::Shafi).unwrap();

        let times = day.as_array();
        for pair in times.windows(2) {
            prop_assert!(pair[0] < pair[1], "events out of order: {times:?}");
        }
    }

    /// Computing the same day twice yields identical instants.
    #[test]
    fn computation_is_deterministic(
        lat in temperate_latitude_strategy(),
        lon in longitude_strategy(),
        date in day_of_2024_strategy()
    ) {
        let tz_hours = (lon / 15.0).round();
        let first = compute_day(date, lat, lon, tz_hours, CalculationMethod::Mwl, Madhab::Shafi).unwrap();
        let second = compute_day(date, lat, lon, tz_hours, CalculationMethod::Mwl, Madhab::Shafi).unwrap();
        prop_assert_eq!(first, second);
    }

    /// An adjustment of +n followed by -n restores the unadjusted instant
    /// exactly: adjustments apply once to the base times, never
    /// cumulatively.
    #[test]
    fn adjustment_round_trips_exactly(n in -30i64..=30) {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let timezone = chrono_tz::Asia::Jakarta;

        let mut config = Config::default();
        config.latitude = Some(-6.2088);
        config.longitude = Some(106.8456);

        let base = DaySchedule::build(date, &config, timezone);

        config.adjustments.dhuhr = Some(n);
        let shifted = DaySchedule::build(date, &config, timezone);

        config.adjustments.dhuhr = Some(0);
        let restored = DaySchedule::build(date, &config, timezone);

        let base_dhuhr = base.event(Prayer::Dhuhr).unwrap().instant;
        let shifted_dhuhr = shifted.event(Prayer::Dhuhr).unwrap().instant;
        prop_assert_eq!(shifted_dhuhr - base_dhuhr, chrono::Duration::minutes(n));
        prop_assert_eq!(restored.event(Prayer::Dhuhr).unwrap().instant, base_dhuhr);
    }

    /// next_event and previous_event are total over a non-empty schedule:
    /// at any instant of the day, neither is None.
    #[test]
    fn locator_is_total_over_the_day(
        hour in 0u32..24,
        minute in 0u32..60
    ) {
        use chrono::TimeZone;

        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let timezone = chrono_tz::Asia::Jakarta;
        let schedule = DaySchedule::build(date, &Config::default(), timezone);

        let now = timezone
            .with_ymd_and_hms(2024, 6, 1, hour, minute, 0)
            .unwrap();

        let next = locator::next_event(now, &schedule);
        let prev = locator::previous_event(now, &schedule);
        prop_assert!(next.is_some());
        prop_assert!(prev.is_some());

        // And the window they bracket always contains `now`
        prop_assert!(prev.unwrap().instant <= now);
        prop_assert!(next.unwrap().instant > now);

        // Sunrise never appears in obligatory queries
        prop_assert!(next.unwrap().prayer != Prayer::Sunrise);
        prop_assert!(prev.unwrap().prayer != Prayer::Sunrise);
    }
}
