//! Configuration system for salatr with validation and hot reload.
//!
//! Settings live in a single TOML file, `salatr.toml`, found under
//! `$XDG_CONFIG_HOME/salatr/` (or an explicit `--config` directory). A
//! default file is generated on first run. The file is watched while the
//! display runs, so edits from the settings surface take effect on the next
//! out-of-band tick rather than waiting for a restart.
//!
//! ## Structure
//!
//! ```toml
//! #[Location]
//! latitude = -6.2088           # Geographic latitude (-90 to 90)
//! longitude = 106.8456         # Geographic longitude (-180 to 180)
//! # timezone = "Asia/Jakarta"  # IANA zone; derived from coordinates when absent
//!
//! #[Calculation]
//! calculation_method = "singapore"  # mwl, isna, egypt, makkah, karachi, tehran, jafari, singapore
//! madhab = "shafi"                  # shafi or hanafi (Asr shadow factor)
//!
//! #[Display]
//! mosque_name = "Masjid Al-Ikhlas"
//! countdown_window = 10        # minutes of countdown before each prayer
//! after_iqamah_message = "Lurus Rapatkan Shaf"
//! after_iqamah_minutes = 10    # minutes the message stays up
//! blank_minutes = 20           # minutes of blank screen while praying
//! tick_interval = 1            # seconds between clock samples
//! # force_phase = "blank"      # pin the displayed phase (schedule, countdown,
//! #                            # adhan, iqamah, after_iqamah, blank)
//!
//! [adjustments]                # signed minutes added per prayer (-30 to 30)
//! fajr = 0
//!
//! [iqamah]                     # congregation wait per prayer, minutes
//! fajr = 20
//! dhuhr = 5
//! ```
//!
//! All values are validated on load; an invalid file is rejected with an
//! actionable message rather than silently corrected, so a typo on the
//! settings surface cannot strand the screen in a nonsense schedule.

pub mod builder;
pub mod loading;
pub mod validation;
pub mod watcher;

#[cfg(test)]
mod tests;

use anyhow::Result;
use serde::Deserialize;

use crate::constants::*;
use crate::phase::{DurationSettings, Phase};
use crate::schedule::Prayer;
use crate::solar::{CalculationMethod, Madhab};

// Re-export public API
pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path, set_config_dir};
pub use watcher::start_config_watcher;

/// Per-prayer signed minute adjustments applied to the computed base times.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Adjustments {
    pub fajr: Option<i64>,
    pub sunrise: Option<i64>,
    pub dhuhr: Option<i64>,
    pub asr: Option<i64>,
    pub maghrib: Option<i64>,
    pub isha: Option<i64>,
}

impl Adjustments {
    pub fn for_prayer(&self, prayer: Prayer) -> i64 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
        .unwrap_or(0)
    }
}

/// Minutes between adhan and iqamah for the five obligatory prayers.
/// Sunrise has no entry; it is a marker, not a congregational prayer.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct IqamahMinutes {
    pub fajr: Option<i64>,
    pub dhuhr: Option<i64>,
    pub asr: Option<i64>,
    pub maghrib: Option<i64>,
    pub isha: Option<i64>,
}

/// Configuration for the salatr display, loaded from `salatr.toml`.
///
/// Most fields are optional and fall back to the defaults in `constants`,
/// which mirror a typical Indonesian masjid setup. The struct is cloned as
/// an immutable snapshot at the start of every tick; nothing in the core
/// mutates it.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Geographic latitude in degrees (-90 to 90)
    pub latitude: Option<f64>,
    /// Geographic longitude in degrees (-180 to 180)
    pub longitude: Option<f64>,
    /// IANA timezone name; derived from the coordinates when absent
    pub timezone: Option<String>,

    /// Solar angle profile for Fajr/Isha (and Maghrib where relevant)
    pub calculation_method: Option<CalculationMethod>,
    /// Juristic school selecting the Asr shadow factor
    pub madhab: Option<Madhab>,

    /// Mosque identity shown in display headers
    pub mosque_name: Option<String>,
    pub mosque_description: Option<String>,

    /// Minutes of countdown shown before each prayer
    pub countdown_window: Option<i64>,
    /// Message shown once the iqamah wait elapses
    pub after_iqamah_message: Option<String>,
    /// Minutes the after-iqamah message stays on screen
    pub after_iqamah_minutes: Option<i64>,
    /// Minutes of blank screen after the message
    pub blank_minutes: Option<i64>,
    /// Seconds between clock samples in the main loop
    pub tick_interval: Option<u64>,
    /// Manual phase pin; clears when removed from the file
    pub force_phase: Option<Phase>,

    #[serde(default)]
    pub adjustments: Adjustments,
    #[serde(default)]
    pub iqamah: IqamahMinutes,
}

impl Config {
    /// Load configuration from the default path, creating a default file
    /// if none exists.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    /// Signed minute adjustment for one prayer.
    pub fn adjustment_minutes(&self, prayer: Prayer) -> i64 {
        self.adjustments.for_prayer(prayer)
    }

    /// The duration snapshot handed to the phase machine each tick.
    pub fn durations(&self) -> DurationSettings {
        DurationSettings {
            countdown_window_minutes: self.countdown_window.unwrap_or(DEFAULT_COUNTDOWN_WINDOW),
            iqamah_fajr: self.iqamah.fajr.unwrap_or(DEFAULT_IQAMAH_FAJR),
            iqamah_dhuhr: self.iqamah.dhuhr.unwrap_or(DEFAULT_IQAMAH_OTHER),
            iqamah_asr: self.iqamah.asr.unwrap_or(DEFAULT_IQAMAH_OTHER),
            iqamah_maghrib: self.iqamah.maghrib.unwrap_or(DEFAULT_IQAMAH_OTHER),
            iqamah_isha: self.iqamah.isha.unwrap_or(DEFAULT_IQAMAH_OTHER),
            after_iqamah_minutes: self.after_iqamah_minutes.unwrap_or(DEFAULT_AFTER_IQAMAH_MINUTES),
            blank_minutes: self.blank_minutes.unwrap_or(DEFAULT_BLANK_MINUTES),
        }
    }

    /// Seconds between scheduled ticks.
    pub fn tick_interval_secs(&self) -> u64 {
        self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL)
    }

    /// Mosque name for headers.
    pub fn mosque_name(&self) -> &str {
        self.mosque_name.as_deref().unwrap_or(DEFAULT_MOSQUE_NAME)
    }

    /// Message shown during the after-iqamah window.
    pub fn after_iqamah_message(&self) -> &str {
        self.after_iqamah_message
            .as_deref()
            .unwrap_or(DEFAULT_AFTER_IQAMAH_MESSAGE)
    }
}
