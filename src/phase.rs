//! Display phase state machine.
//!
//! Every tick maps the current instant onto one of six mutually exclusive
//! display phases, driven by two durations: time since the most recent
//! obligatory prayer (`since_prev`) and time until the next (`until_next`).
//! The post-event chain Adhan → Iqamah → AfterIqamah → Blank runs off
//! `since_prev` against cumulative window boundaries; Countdown runs off
//! `until_next` against the configured lead window; Schedule is the resting
//! state between them.
//!
//! A `PhaseState` is produced fresh on every evaluation and never mutated,
//! so ticks are idempotent and safe to replay. A manual pin substitutes the
//! displayed phase without touching the underlying windows: the pinned
//! phase's remaining time is derived from the same boundary table, and
//! clearing the pin resumes automatic evaluation on the next tick with no
//! transition replay.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::ADHAN_GRACE_MINUTES;
use crate::locator;
use crate::schedule::{DaySchedule, Prayer, PrayerEvent};

/// The six display phases, in the order they occur around a prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Resting state: the day's timetable with slides
    Schedule,
    /// Large countdown during the lead window before the next prayer
    Countdown,
    /// The call to prayer is assumed to be in progress
    Adhan,
    /// Counting down the congregation wait after the adhan
    Iqamah,
    /// Post-iqamah message (straighten the rows) while prayer begins
    AfterIqamah,
    /// Screen blanked while the congregation prays
    Blank,
}

impl Phase {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Schedule => "Schedule",
            Self::Countdown => "Countdown",
            Self::Adhan => "Adhan",
            Self::Iqamah => "Iqamah",
            Self::AfterIqamah => "After-Iqamah",
            Self::Blank => "Blank",
        }
    }

    /// True for the phases that follow a prayer instant (driven by
    /// `since_prev` rather than `until_next`).
    pub fn follows_prayer(&self) -> bool {
        matches!(
            self,
            Self::Adhan | Self::Iqamah | Self::AfterIqamah | Self::Blank
        )
    }
}

/// Duration knobs for the phase windows, snapshotted from the config at the
/// start of each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSettings {
    /// Lead time before a prayer during which Countdown shows, minutes
    pub countdown_window_minutes: i64,
    /// Congregation wait per prayer, minutes
    pub iqamah_fajr: i64,
    pub iqamah_dhuhr: i64,
    pub iqamah_asr: i64,
    pub iqamah_maghrib: i64,
    pub iqamah_isha: i64,
    /// How long the after-iqamah message stays up, minutes
    pub after_iqamah_minutes: i64,
    /// Blank-screen window after the message, minutes
    pub blank_minutes: i64,
}

impl DurationSettings {
    /// Iqamah wait for an obligatory prayer; Sunrise has none.
    pub fn iqamah_minutes(&self, prayer: Prayer) -> Option<i64> {
        match prayer {
            Prayer::Fajr => Some(self.iqamah_fajr),
            Prayer::Dhuhr => Some(self.iqamah_dhuhr),
            Prayer::Asr => Some(self.iqamah_asr),
            Prayer::Maghrib => Some(self.iqamah_maghrib),
            Prayer::Isha => Some(self.iqamah_isha),
            Prayer::Sunrise => None,
        }
    }
}

/// The machine's output for one tick: which phase is active, the prayer it
/// pertains to, and how long until the phase's natural end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseState {
    pub phase: Phase,
    /// The prayer this phase pertains to: the previous one for post-prayer
    /// phases, the next one for Countdown, none for Schedule
    pub active_event: Option<PrayerEvent>,
    /// Time until the phase's natural end, floored at zero
    pub remaining: Duration,
}

impl PhaseState {
    /// Remaining time in whole milliseconds, never negative.
    pub fn remaining_ms(&self) -> i64 {
        self.remaining.num_milliseconds().max(0)
    }

    /// Degraded output for an empty or corrupt schedule.
    fn degraded() -> Self {
        Self {
            phase: Phase::Schedule,
            active_event: None,
            remaining: Duration::zero(),
        }
    }
}

/// Window boundaries around the previous/next prayers for one instant.
struct EvalContext<'a> {
    prev: PrayerEvent,
    next: PrayerEvent,
    since_prev: Duration,
    until_next: Duration,
    durations: &'a DurationSettings,
}

impl<'a> EvalContext<'a> {
    fn new(
        now: DateTime<Tz>,
        prev: PrayerEvent,
        next: PrayerEvent,
        durations: &'a DurationSettings,
    ) -> Self {
        Self {
            prev,
            next,
            since_prev: now - prev.instant,
            until_next: next.instant - now,
            durations,
        }
    }

    /// End of the adhan grace, relative to the previous prayer.
    fn adhan_end(&self) -> Duration {
        Duration::minutes(ADHAN_GRACE_MINUTES)
    }

    /// End of the iqamah wait, relative to the previous prayer.
    fn iqamah_end(&self) -> Duration {
        let iqamah = self
            .durations
            .iqamah_minutes(self.prev.prayer)
            .unwrap_or(0);
        self.adhan_end() + Duration::minutes(iqamah)
    }

    /// End of the after-iqamah message, relative to the previous prayer.
    fn after_iqamah_end(&self) -> Duration {
        self.iqamah_end() + Duration::minutes(self.durations.after_iqamah_minutes)
    }

    /// End of the blank window, relative to the previous prayer.
    fn blank_end(&self) -> Duration {
        self.after_iqamah_end() + Duration::minutes(self.durations.blank_minutes)
    }

    fn countdown_window(&self) -> Duration {
        Duration::minutes(self.durations.countdown_window_minutes)
    }
}

/// Evaluate the phase for one instant.
///
/// `pin` forces the displayed phase while leaving the window computation
/// untouched; pass the automatic result through when it is `None`. The
/// function is total: an empty schedule degrades to Schedule with zero
/// remaining time.
pub fn evaluate(
    now: DateTime<Tz>,
    schedule: &DaySchedule,
    durations: &DurationSettings,
    pin: Option<Phase>,
) -> PhaseState {
    let (Some(prev), Some(next)) = (
        locator::previous_event(now, schedule),
        locator::next_event(now, schedule),
    ) else {
        return PhaseState::degraded();
    };

    let ctx = EvalContext::new(now, prev, next, durations);
    let phase = pin.unwrap_or_else(|| determine_phase(&ctx));
    state_for_phase(phase, &ctx)
}

/// The transition table: cumulative post-prayer windows first, then the
/// pre-prayer countdown window, then the resting state.
fn determine_phase(ctx: &EvalContext) -> Phase {
    if ctx.since_prev <= ctx.adhan_end() {
        Phase::Adhan
    } else if ctx.since_prev <= ctx.iqamah_end() {
        Phase::Iqamah
    } else if ctx.since_prev <= ctx.after_iqamah_end() {
        Phase::AfterIqamah
    } else if ctx.since_prev <= ctx.blank_end() {
        Phase::Blank
    } else if ctx.until_next > Duration::zero() && ctx.until_next <= ctx.countdown_window() {
        Phase::Countdown
    } else {
        Phase::Schedule
    }
}

/// Derive the output values for a phase from the shared window table. Used
/// for both the automatically determined phase and a manual pin, so a
/// pinned phase keeps ticking against the real schedule.
fn state_for_phase(phase: Phase, ctx: &EvalContext) -> PhaseState {
    let clamp = |d: Duration| d.max(Duration::zero());
    match phase {
        Phase::Schedule => PhaseState {
            phase,
            active_event: None,
            remaining: clamp(ctx.until_next - ctx.countdown_window()),
        },
        Phase::Countdown => PhaseState {
            phase,
            active_event: Some(ctx.next),
            remaining: clamp(ctx.until_next),
        },
        Phase::Adhan => PhaseState {
            phase,
            active_event: Some(ctx.prev),
            remaining: clamp(ctx.adhan_end() - ctx.since_prev),
        },
        Phase::Iqamah => PhaseState {
            phase,
            active_event: Some(ctx.prev),
            remaining: clamp(ctx.iqamah_end() - ctx.since_prev),
        },
        Phase::AfterIqamah => PhaseState {
            phase,
            active_event: Some(ctx.prev),
            remaining: clamp(ctx.after_iqamah_end() - ctx.since_prev),
        },
        Phase::Blank => PhaseState {
            phase,
            active_event: Some(ctx.prev),
            remaining: clamp(ctx.blank_end() - ctx.since_prev),
        },
    }
}
