//! Solar time engine: pure astronomical calculation of the six daily events.
//!
//! Given a civil date, coordinates, a UTC offset, and a calculation-method
//! profile, this module computes the minute-of-day for Fajr, Sunrise, Dhuhr,
//! Asr, Maghrib, and Isha. Solar declination and the equation of time come
//! from the standard day-of-year trigonometric approximations; each event
//! except Dhuhr is an hour-angle solve around the shared noon reference.
//!
//! The engine is stateless and does no I/O. When an hour-angle equation has
//! no solution (polar latitudes near the solstices push the acos argument
//! outside [-1, 1]) it returns an error instead of a NaN-contaminated time;
//! the schedule builder substitutes the fixed fallback day in that case.

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Solar depression angle for sunrise/sunset, accounting for refraction and
/// the solar disc radius.
const HORIZON_DEPRESSION: f64 = 0.833;

/// Named angle profiles for the Fajr/Isha (and where relevant Maghrib)
/// solves. The Makkah profile replaces the Isha solve with a fixed interval
/// after Maghrib.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMethod {
    /// Muslim World League: Fajr 18°, Isha 17°
    Mwl,
    /// Islamic Society of North America: Fajr 15°, Isha 15°
    Isna,
    /// Egyptian General Authority of Survey: Fajr 19.5°, Isha 17.5°
    Egypt,
    /// Umm al-Qura, Makkah: Fajr 18.5°, Isha fixed 90 minutes after Maghrib
    Makkah,
    /// University of Islamic Sciences, Karachi: Fajr 18°, Isha 18°
    Karachi,
    /// Institute of Geophysics, Tehran: Fajr 17.7°, Isha 14°, Maghrib 4.5°
    Tehran,
    /// Shia Ithna-Ashari (Jafari): Fajr 16°, Isha 14°, Maghrib 4°
    Jafari,
    /// Majlis Ugama Islam Singapura: Fajr 20°, Isha 18°
    Singapore,
}

impl Default for CalculationMethod {
    fn default() -> Self {
        Self::Singapore
    }
}

impl CalculationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mwl => "mwl",
            Self::Isna => "isna",
            Self::Egypt => "egypt",
            Self::Makkah => "makkah",
            Self::Karachi => "karachi",
            Self::Tehran => "tehran",
            Self::Jafari => "jafari",
            Self::Singapore => "singapore",
        }
    }

    /// The angle profile this method resolves to.
    pub fn params(&self) -> MethodParams {
        match self {
            Self::Mwl => MethodParams::angles(18.0, 17.0, 0.0),
            Self::Isna => MethodParams::angles(15.0, 15.0, 0.0),
            Self::Egypt => MethodParams::angles(19.5, 17.5, 0.0),
            Self::Makkah => MethodParams {
                fajr_angle: 18.5,
                isha_angle: 0.0,
                maghrib_angle: 0.0,
                isha_interval_minutes: Some(90),
            },
            Self::Karachi => MethodParams::angles(18.0, 18.0, 0.0),
            Self::Tehran => MethodParams::angles(17.7, 14.0, 4.5),
            Self::Jafari => MethodParams::angles(16.0, 14.0, 4.0),
            Self::Singapore => MethodParams::angles(20.0, 18.0, 0.0),
        }
    }
}

/// Resolved angle parameters for one calculation method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodParams {
    /// Solar depression angle for Fajr, degrees below the horizon
    pub fajr_angle: f64,
    /// Solar depression angle for Isha, degrees below the horizon
    pub isha_angle: f64,
    /// Additional depression beyond the horizon for Maghrib (0 for most
    /// methods; Tehran and Jafari delay Maghrib past sunset)
    pub maghrib_angle: f64,
    /// When set, Isha is this many minutes after Maghrib instead of an
    /// angle solve
    pub isha_interval_minutes: Option<i64>,
}

impl MethodParams {
    const fn angles(fajr: f64, isha: f64, maghrib: f64) -> Self {
        Self {
            fajr_angle: fajr,
            isha_angle: isha,
            maghrib_angle: maghrib,
            isha_interval_minutes: None,
        }
    }
}

/// Juristic school for the Asr shadow factor: Asr begins when an object's
/// shadow exceeds its height by this multiple (plus the noon shadow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Madhab {
    Shafi,
    Hanafi,
}

impl Default for Madhab {
    fn default() -> Self {
        Self::Shafi
    }
}

impl Madhab {
    pub fn shadow_factor(&self) -> f64 {
        match self {
            Self::Shafi => 1.0,
            Self::Hanafi => 2.0,
        }
    }
}

/// The six computed events as whole minutes from local midnight.
///
/// Values may fall outside 0..1440 at extreme longitudes relative to the
/// timezone; callers add them to the date's midnight so spill lands on the
/// adjacent civil day naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarDay {
    pub fajr: i64,
    pub sunrise: i64,
    pub dhuhr: i64,
    pub asr: i64,
    pub maghrib: i64,
    pub isha: i64,
}

impl SolarDay {
    /// Events in Fajr..Isha order.
    pub fn as_array(&self) -> [i64; 6] {
        [
            self.fajr,
            self.sunrise,
            self.dhuhr,
            self.asr,
            self.maghrib,
            self.isha,
        ]
    }
}

/// Compute the six event times for one civil date.
///
/// `timezone_offset_hours` is the UTC offset of the clock the display runs
/// on (fractional hours, e.g. 5.5 for India).
pub fn compute_day(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    timezone_offset_hours: f64,
    method: CalculationMethod,
    madhab: Madhab,
) -> Result<SolarDay> {
    let params = method.params();
    let day_of_year = date.ordinal() as f64;

    let declination = solar_declination(day_of_year);
    let equation = equation_of_time(day_of_year);

    // Shared noon reference: mean solar noon shifted by the clock's offset
    // from the location's natural meridian time, plus the equation of time.
    let noon = 12.0 + timezone_offset_hours - longitude / 15.0 - equation / 60.0;

    let fajr = noon - hour_angle(params.fajr_angle, declination, latitude)?;
    let sunrise = noon - hour_angle(HORIZON_DEPRESSION, declination, latitude)?;
    let maghrib = noon + hour_angle(HORIZON_DEPRESSION + params.maghrib_angle, declination, latitude)?;
    let asr = noon + asr_hour_angle(madhab.shadow_factor(), declination, latitude)?;
    let isha = match params.isha_interval_minutes {
        Some(minutes) => maghrib + minutes as f64 / 60.0,
        None => noon + hour_angle(params.isha_angle, declination, latitude)?,
    };

    Ok(SolarDay {
        fajr: round_to_minute(fajr),
        sunrise: round_to_minute(sunrise),
        dhuhr: round_to_minute(noon),
        asr: round_to_minute(asr),
        maghrib: round_to_minute(maghrib),
        isha: round_to_minute(isha),
    })
}

/// Solar declination in degrees for a day of the year.
fn solar_declination(day_of_year: f64) -> f64 {
    23.45 * (360.0 * (day_of_year - 81.0) / 365.0).to_radians().sin()
}

/// Equation of time in minutes for a day of the year.
fn equation_of_time(day_of_year: f64) -> f64 {
    let b = (360.0 * (day_of_year - 81.0) / 365.0).to_radians();
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Hours between noon and the instant the sun sits `depression` degrees
/// below the horizon.
///
/// Errors when the sun never reaches that depression on this date at this
/// latitude (polar day/night).
fn hour_angle(depression: f64, declination: f64, latitude: f64) -> Result<f64> {
    let decl = declination.to_radians();
    let lat = latitude.to_radians();

    let cos_h = (-depression.to_radians().sin() - decl.sin() * lat.sin()) / (decl.cos() * lat.cos());
    // Also catches NaN from the cos(lat) division at the poles
    if !(-1.0..=1.0).contains(&cos_h) {
        bail!(
            "sun does not reach {depression}° below the horizon at latitude {latitude}° on this date"
        );
    }
    Ok(cos_h.acos().to_degrees() / 15.0)
}

/// Hours between noon and the Asr instant for a given shadow factor.
///
/// Asr begins when the shadow of an object equals `shadow_factor` times its
/// height plus the shadow it cast at noon; the corresponding solar elevation
/// is the arctangent of the inverse total shadow length.
fn asr_hour_angle(shadow_factor: f64, declination: f64, latitude: f64) -> Result<f64> {
    let decl = declination.to_radians();
    let lat = latitude.to_radians();

    let shadow_length = shadow_factor + (latitude - declination).abs().to_radians().tan();
    let elevation = (1.0 / shadow_length).atan();

    let cos_h = (elevation.sin() - decl.sin() * lat.sin()) / (decl.cos() * lat.cos());
    if !(-1.0..=1.0).contains(&cos_h) {
        bail!("Asr elevation unreachable at latitude {latitude}° on this date");
    }
    Ok(cos_h.acos().to_degrees() / 15.0)
}

fn round_to_minute(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}
