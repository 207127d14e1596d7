//! End-to-end phase behavior over a built schedule: walking a whole day
//! minute by minute, boundary cases, and the manual override.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;

use salatr::config::Config;
use salatr::phase::{self, Phase, PhaseState};
use salatr::schedule::{DaySchedule, Prayer};

fn jakarta_config() -> Config {
    let mut config = Config::default();
    config.latitude = Some(-6.2088);
    config.longitude = Some(106.8456);
    config
}

fn jakarta_schedule() -> DaySchedule {
    DaySchedule::build(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        &jakarta_config(),
        chrono_tz::Asia::Jakarta,
    )
}

fn eval_at(config: &Config, schedule: &DaySchedule, now: DateTime<Tz>) -> PhaseState {
    phase::evaluate(now, schedule, &config.durations(), config.force_phase)
}

/// Walk the whole day at one-minute resolution and record each phase
/// transition in order.
fn phase_transitions(config: &Config, schedule: &DaySchedule) -> Vec<Phase> {
    let start = chrono_tz::Asia::Jakarta
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .unwrap();

    let mut transitions = Vec::new();
    let mut current: Option<Phase> = None;
    for minute in 0..(24 * 60) {
        let state = eval_at(config, schedule, start + Duration::minutes(minute));
        if current != Some(state.phase) {
            transitions.push(state.phase);
            current = Some(state.phase);
        }
    }
    transitions
}

#[test]
fn full_day_visits_every_phase_in_order() {
    let config = jakarta_config();
    let schedule = jakarta_schedule();
    let transitions = phase_transitions(&config, &schedule);

    // Five obligatory prayers, each cycling Countdown → Adhan → Iqamah →
    // AfterIqamah → Blank → Schedule, starting from the midnight resting
    // state. Sunrise contributes no cycle.
    let per_prayer = [
        Phase::Countdown,
        Phase::Adhan,
        Phase::Iqamah,
        Phase::AfterIqamah,
        Phase::Blank,
        Phase::Schedule,
    ];
    let mut expected = vec![Phase::Schedule];
    for _ in 0..5 {
        expected.extend_from_slice(&per_prayer);
    }

    assert_eq!(transitions, expected);
}

#[test]
fn every_tick_is_deterministic() {
    let config = jakarta_config();
    let schedule = jakarta_schedule();
    let now = chrono_tz::Asia::Jakarta
        .with_ymd_and_hms(2024, 6, 1, 12, 3, 30)
        .unwrap();

    let first = eval_at(&config, &schedule, now);
    let second = eval_at(&config, &schedule, now);
    assert_eq!(first, second);
}

#[test]
fn adhan_fires_at_the_exact_instant() {
    let config = jakarta_config();
    let schedule = jakarta_schedule();
    let dhuhr = schedule.event(Prayer::Dhuhr).unwrap().instant;

    let state = eval_at(&config, &schedule, dhuhr);
    assert_eq!(state.phase, Phase::Adhan);
    assert_eq!(state.active_event.unwrap().prayer, Prayer::Dhuhr);
}

#[test]
fn countdown_boundary_is_inclusive_at_the_window() {
    let config = jakarta_config();
    let schedule = jakarta_schedule();
    let asr = schedule.event(Prayer::Asr).unwrap().instant;

    let at_window = eval_at(&config, &schedule, asr - Duration::minutes(10));
    assert_eq!(at_window.phase, Phase::Countdown);
    assert_eq!(at_window.remaining, Duration::minutes(10));

    let before_window = eval_at(&config, &schedule, asr - Duration::minutes(10) - Duration::seconds(60));
    assert_eq!(before_window.phase, Phase::Schedule);
}

#[test]
fn past_iqamah_branch_follows_configured_durations() {
    // Dhuhr iqamah is 5 minutes; grace is 2. Eight minutes after Dhuhr the
    // iqamah window (7 minutes) has elapsed, and which phase shows depends
    // deterministically on the after-iqamah duration.
    let schedule = jakarta_schedule();
    let dhuhr = schedule.event(Prayer::Dhuhr).unwrap().instant;
    let now = dhuhr + Duration::minutes(8);

    let mut with_message = jakarta_config();
    with_message.after_iqamah_minutes = Some(10);
    assert_eq!(
        eval_at(&with_message, &schedule, now).phase,
        Phase::AfterIqamah
    );

    let mut without_message = jakarta_config();
    without_message.after_iqamah_minutes = Some(0);
    assert_eq!(eval_at(&without_message, &schedule, now).phase, Phase::Blank);
}

#[test]
fn override_freezes_display_and_clears_cleanly() {
    let schedule = jakarta_schedule();
    let dhuhr = schedule.event(Prayer::Dhuhr).unwrap().instant;

    let mut pinned = jakarta_config();
    pinned.force_phase = Some(Phase::Blank);

    // Pinned Blank shows regardless of the computed windows
    for offset in [-60i64, 0, 3, 30, 300] {
        let state = eval_at(&pinned, &schedule, dhuhr + Duration::minutes(offset));
        assert_eq!(state.phase, Phase::Blank, "offset {offset} minutes");
    }

    // Clearing the pin reflects the true computed phase immediately
    let mut cleared = pinned.clone();
    cleared.force_phase = None;
    let state = eval_at(&cleared, &schedule, dhuhr + Duration::minutes(3));
    assert_eq!(state.phase, Phase::Iqamah);
    assert_eq!(state.remaining, Duration::minutes(4));
}

#[test]
fn pinned_countdown_still_tracks_the_real_next_prayer() {
    let schedule = jakarta_schedule();
    let asr = schedule.event(Prayer::Asr).unwrap().instant;

    let mut pinned = jakarta_config();
    pinned.force_phase = Some(Phase::Countdown);

    let state = eval_at(&pinned, &schedule, asr - Duration::minutes(45));
    assert_eq!(state.phase, Phase::Countdown);
    assert_eq!(state.remaining, Duration::minutes(45));
    assert_eq!(state.active_event.unwrap().prayer, Prayer::Asr);
}

#[test]
fn degraded_schedule_reports_resting_phase_without_panicking() {
    let config = jakarta_config();
    let empty = DaySchedule::from_events(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        Vec::new(),
        true,
    );
    let now = chrono_tz::Asia::Jakarta
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .unwrap();

    let state = eval_at(&config, &empty, now);
    assert_eq!(state.phase, Phase::Schedule);
    assert_eq!(state.remaining_ms(), 0);
    assert!(state.active_event.is_none());
}

#[test]
fn polar_day_still_produces_a_working_display() {
    salatr::logger::Log::set_enabled(false);
    let mut config = jakarta_config();
    config.latitude = Some(78.2);
    config.longitude = Some(15.6);
    let schedule = DaySchedule::build(
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
        &config,
        chrono_tz::Arctic::Longyearbyen,
    );
    salatr::logger::Log::set_enabled(true);

    assert!(schedule.is_degraded());

    // The fallback schedule drives the same phase machine
    let dhuhr = schedule.event(Prayer::Dhuhr).unwrap().instant;
    let state = eval_at(&config, &schedule, dhuhr + Duration::minutes(1));
    assert_eq!(state.phase, Phase::Adhan);
}

#[test]
fn remaining_ms_is_never_negative_across_the_day() {
    let config = jakarta_config();
    let schedule = jakarta_schedule();
    let start = chrono_tz::Asia::Jakarta
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .unwrap();

    for minute in 0..(24 * 60) {
        let state = eval_at(&config, &schedule, start + Duration::minutes(minute));
        assert!(state.remaining_ms() >= 0, "minute {minute}");
    }
}
