//! Configuration loading and management.

use std::fmt::{Display, Write as _};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use punch_core::EntrancePolicy;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `chrono` format string for dates typed at the console.
    pub date_format: String,

    /// `chrono` format string for times of day typed at the console.
    pub time_format: String,

    /// Whether a second entrance may be opened while one is still open that day.
    pub entrance_policy: EntrancePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".to_string(),
            time_format: "%H:%M".to_string(),
            entrance_policy: EntrancePolicy::Permissive,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PUNCH_*)
        figment = figment.merge(Env::prefixed("PUNCH_"));

        let config: Self = figment.extract()?;
        config.validate().map_err(figment::Error::from)?;
        Ok(config)
    }

    /// Checks that the format strings can render a date and a time of day.
    pub fn validate(&self) -> Result<(), String> {
        let date = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap_or_default();
        check_format("date_format", &self.date_format, &date.format(&self.date_format))?;
        check_format(
            "time_format",
            &self.time_format,
            &NaiveTime::MIN.format(&self.time_format),
        )
    }
}

// chrono reports a bad format only when it is rendered, as a fmt::Error
fn check_format(key: &str, format: &str, rendered: &impl Display) -> Result<(), String> {
    let mut sink = String::new();
    write!(sink, "{rendered}").map_err(|_| format!("invalid {key} '{format}'"))
}

/// Returns the platform-specific config directory for punch.
///
/// On Linux: `~/.config/punch`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punch"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats() {
        let config = Config::default();
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.time_format, "%H:%M");
        assert_eq!(config.entrance_policy, EntrancePolicy::Permissive);
    }

    #[test]
    fn test_dirs_config_path_ends_with_punch() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "punch");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.toml");
        std::fs::write(
            &path,
            "date_format = \"%Y-%m-%d\"\nentrance_policy = \"strict\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.time_format, "%H:%M");
        assert_eq!(config.entrance_policy, EntrancePolicy::Strict);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.toml");
        std::fs::write(&path, "entrance_policy = \"sometimes\"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }

    #[test]
    fn test_unrenderable_formats_are_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.toml");

        std::fs::write(&path, "date_format = \"%Q\"\n").unwrap();
        let err = Config::load_from(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid date_format '%Q'"));

        // Valid specifiers, but a date has no hour to render
        std::fs::write(&path, "date_format = \"%H:%M\"\n").unwrap();
        assert!(Config::load_from(Some(&path)).is_err());

        std::fs::write(&path, "time_format = \"%H:%Q\"\n").unwrap();
        let err = Config::load_from(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid time_format '%H:%Q'"));
    }

    #[test]
    fn test_default_formats_validate() {
        assert_eq!(Config::default().validate(), Ok(()));

        let config = Config {
            time_format: "%Q".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
