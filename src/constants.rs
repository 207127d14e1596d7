//! Application-wide defaults and validation limits.

/// Seconds between scheduled ticks of the main loop.
pub const DEFAULT_TICK_INTERVAL: u64 = 1;

/// Minutes before the next prayer during which the countdown phase shows.
pub const DEFAULT_COUNTDOWN_WINDOW: i64 = 10;

/// Fixed window after a prayer instant treated as "adhan in progress",
/// before the iqamah countdown begins.
pub const ADHAN_GRACE_MINUTES: i64 = 2;

/// Minutes the after-iqamah message stays on screen once iqamah elapses.
pub const DEFAULT_AFTER_IQAMAH_MINUTES: i64 = 10;

/// Minutes of blank screen after the after-iqamah message, while the
/// congregation is praying.
pub const DEFAULT_BLANK_MINUTES: i64 = 20;

/// Default iqamah wait in minutes for Fajr.
pub const DEFAULT_IQAMAH_FAJR: i64 = 20;

/// Default iqamah wait in minutes for Dhuhr, Asr, Maghrib, and Isha.
pub const DEFAULT_IQAMAH_OTHER: i64 = 5;

/// Per-prayer manual adjustment bounds, in minutes.
pub const MINIMUM_ADJUSTMENT: i64 = -30;
pub const MAXIMUM_ADJUSTMENT: i64 = 30;

/// Countdown window bounds, in minutes.
pub const MINIMUM_COUNTDOWN_WINDOW: i64 = 1;
pub const MAXIMUM_COUNTDOWN_WINDOW: i64 = 120;

/// Upper bound for iqamah, after-iqamah, and blank durations, in minutes.
/// Anything longer than this would overlap the following prayer's windows.
pub const MAXIMUM_PHASE_MINUTES: i64 = 120;

/// Tick interval bounds, in seconds.
pub const MINIMUM_TICK_INTERVAL: u64 = 1;
pub const MAXIMUM_TICK_INTERVAL: u64 = 60;

/// Default mosque identity shown in headers.
pub const DEFAULT_MOSQUE_NAME: &str = "Masjid Al-Ikhlas";

/// Default message shown during the after-iqamah window.
pub const DEFAULT_AFTER_IQAMAH_MESSAGE: &str = "Lurus Rapatkan Shaf";

/// Default coordinates (Jakarta) used when generating a fresh config.
pub const DEFAULT_LATITUDE: f64 = -6.2088;
pub const DEFAULT_LONGITUDE: f64 = 106.8456;

/// Fallback schedule used when the solar equations are unsolvable,
/// as (hour, minute) pairs in Fajr..Isha order.
pub const FALLBACK_TIMES: [(u32, u32); 6] = [
    (4, 30),  // Fajr
    (6, 0),   // Sunrise
    (12, 0),  // Dhuhr
    (15, 0),  // Asr
    (18, 0),  // Maghrib
    (19, 30), // Isha
];
