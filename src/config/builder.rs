//! Default configuration file generation.

use anyhow::{Context, Result};
use std::path::Path;

/// The commented template written on first run. Values mirror the compiled
/// defaults so deleting the file and regenerating is always a clean reset.
const DEFAULT_CONFIG: &str = r#"#[Location]
latitude = -6.2088            # Geographic latitude (-90 to 90)
longitude = 106.8456          # Geographic longitude (-180 to 180)
# timezone = "Asia/Jakarta"   # IANA zone; derived from coordinates when absent

#[Calculation]
calculation_method = "singapore"  # mwl, isna, egypt, makkah, karachi, tehran, jafari, singapore
madhab = "shafi"                  # shafi or hanafi (Asr shadow factor)

#[Display]
mosque_name = "Masjid Al-Ikhlas"
mosque_description = ""
countdown_window = 10             # minutes of countdown before each prayer
after_iqamah_message = "Lurus Rapatkan Shaf"
after_iqamah_minutes = 10         # minutes the message stays on screen
blank_minutes = 20                # minutes of blank screen while praying
tick_interval = 1                 # seconds between clock samples
# force_phase = "blank"           # pin the displayed phase

# Signed minutes added to each computed time (-30 to 30)
[adjustments]
fajr = 0
sunrise = 0
dhuhr = 0
asr = 0
maghrib = 0
isha = 0

# Minutes between adhan and iqamah
[iqamah]
fajr = 20
dhuhr = 5
asr = 5
maghrib = 5
isha = 5
"#;

/// Write the default config file, creating parent directories as needed.
/// Refuses to overwrite an existing file.
pub fn create_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write default config: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_parses_and_validates() {
        let config: crate::config::Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        crate::config::validation::validate_config(&config).unwrap();
        assert_eq!(config.latitude, Some(-6.2088));
        assert_eq!(config.iqamah.fajr, Some(20));
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salatr.toml");
        create_default_config(&path).unwrap();
        assert!(create_default_config(&path).is_err());
    }
}
