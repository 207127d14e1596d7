//! Finding the neighboring prayer events around a point in time.
//!
//! The locator answers two questions on every tick: which obligatory prayer
//! comes next, and which one most recently fired. Sunrise is skipped for
//! both (it has no adhan or iqamah); `upcoming_event` includes it for
//! display layers that show the next marker of any kind.
//!
//! Day wraparound shifts today's first/last instant by exactly one civil day
//! rather than re-running the solar engine. Near the solstices the shifted
//! instant can drift a few minutes from a freshly computed one, but the
//! window where that matters spans only the moments around midnight, and
//! the schedule itself is rebuilt as soon as the civil date changes.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::schedule::{DaySchedule, PrayerEvent};

/// First obligatory event strictly after `now`.
///
/// When nothing remains today, today's first obligatory event is returned
/// shifted one day forward. `None` only for a schedule with no obligatory
/// events at all.
pub fn next_event(now: DateTime<Tz>, schedule: &DaySchedule) -> Option<PrayerEvent> {
    let mut obligatory = schedule
        .events()
        .iter()
        .filter(|event| event.prayer.is_obligatory());

    if let Some(event) = obligatory.clone().find(|event| event.instant > now) {
        return Some(*event);
    }

    obligatory.next().map(|event| PrayerEvent {
        prayer: event.prayer,
        instant: event.instant + Duration::days(1),
    })
}

/// Most recent obligatory event at or before `now`.
///
/// A prayer firing exactly now counts as the previous event, so the adhan
/// window opens at the instant itself. Before the day's first event, the
/// last obligatory event is returned shifted one day back.
pub fn previous_event(now: DateTime<Tz>, schedule: &DaySchedule) -> Option<PrayerEvent> {
    let obligatory = || {
        schedule
            .events()
            .iter()
            .filter(|event| event.prayer.is_obligatory())
    };

    if let Some(event) = obligatory().rev().find(|event| event.instant <= now) {
        return Some(*event);
    }

    obligatory().next_back().map(|event| PrayerEvent {
        prayer: event.prayer,
        instant: event.instant - Duration::days(1),
    })
}

/// First event of any kind after `now`, Sunrise included. Used by the
/// schedule display to highlight the next row.
pub fn upcoming_event(now: DateTime<Tz>, schedule: &DaySchedule) -> Option<PrayerEvent> {
    if let Some(event) = schedule.events().iter().find(|event| event.instant > now) {
        return Some(*event);
    }

    schedule.events().first().map(|event| PrayerEvent {
        prayer: event.prayer,
        instant: event.instant + Duration::days(1),
    })
}
