//! Configuration loading and validation tests.

use super::*;
use crate::phase::Phase;
use crate::solar::{CalculationMethod, Madhab};

fn valid_config() -> Config {
    let mut config = Config::default();
    config.latitude = Some(-6.2088);
    config.longitude = Some(106.8456);
    config.calculation_method = Some(CalculationMethod::Singapore);
    config
}

#[test]
fn default_config_validates() {
    validation::validate_config(&Config::default()).unwrap();
}

#[test]
fn boundary_coordinates_are_accepted() {
    let mut config = valid_config();
    config.latitude = Some(90.0);
    config.longitude = Some(-180.0);
    assert!(validation::validate_config(&config).is_ok());
}

#[test]
fn out_of_range_latitude_is_rejected() {
    let mut config = valid_config();
    config.latitude = Some(91.0);
    let err = validation::validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("latitude"));
}

#[test]
fn out_of_range_adjustment_is_rejected() {
    let mut config = valid_config();
    config.adjustments.dhuhr = Some(45);
    let err = validation::validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("Dhuhr"));
}

#[test]
fn negative_iqamah_is_rejected() {
    let mut config = valid_config();
    config.iqamah.maghrib = Some(-1);
    let err = validation::validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("iqamah"));
}

#[test]
fn unknown_timezone_is_rejected() {
    let mut config = valid_config();
    config.timezone = Some("Atlantis/Capital".to_string());
    let err = validation::validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("IANA"));
}

#[test]
fn zero_countdown_window_is_rejected() {
    let mut config = valid_config();
    config.countdown_window = Some(0);
    assert!(validation::validate_config(&config).is_err());
}

#[test]
fn full_toml_round_trip() {
    let toml_text = r#"
latitude = 1.3521
longitude = 103.8198
timezone = "Asia/Singapore"
calculation_method = "singapore"
madhab = "hanafi"
mosque_name = "Masjid An-Nur"
countdown_window = 15
after_iqamah_minutes = 8
blank_minutes = 25
force_phase = "after_iqamah"

[adjustments]
fajr = 2
isha = -3

[iqamah]
fajr = 25
"#;
    let config: Config = toml::from_str(toml_text).unwrap();
    validation::validate_config(&config).unwrap();

    assert_eq!(config.timezone.as_deref(), Some("Asia/Singapore"));
    assert_eq!(config.madhab, Some(Madhab::Hanafi));
    assert_eq!(config.force_phase, Some(Phase::AfterIqamah));
    assert_eq!(config.adjustment_minutes(crate::schedule::Prayer::Fajr), 2);
    assert_eq!(config.adjustment_minutes(crate::schedule::Prayer::Isha), -3);
    assert_eq!(config.adjustment_minutes(crate::schedule::Prayer::Dhuhr), 0);

    let durations = config.durations();
    assert_eq!(durations.countdown_window_minutes, 15);
    assert_eq!(durations.iqamah_fajr, 25);
    assert_eq!(durations.iqamah_dhuhr, 5);
    assert_eq!(durations.after_iqamah_minutes, 8);
}

#[test]
fn load_from_path_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("salatr.toml");
    std::fs::write(&path, "latitude = 200.0\n").unwrap();
    assert!(loading::load_from_path(&path).is_err());
}

#[test]
fn load_from_path_reads_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("salatr.toml");
    std::fs::write(&path, "latitude = 21.4225\nlongitude = 39.8262\n").unwrap();
    let config = loading::load_from_path(&path).unwrap();
    assert_eq!(config.latitude, Some(21.4225));
    assert_eq!(config.calculation_method, None);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("salatr.toml");
    std::fs::write(&path, "latitude = [not toml").unwrap();
    let err = loading::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("parse"));
}
