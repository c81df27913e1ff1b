use crate::dispatcher::command::CommandTable;
use chrono::Offset;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    /// Minimum probability for a class to count as detected.
    pub threshold: f32,
    /// How long a class must stay the confident leader before it settles.
    pub hold_duration: Duration,
    pub blank_class: String,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: 0.85,
            hold_duration: Duration::from_secs(3),
            blank_class: "BLANK".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub thresholds: ThresholdConfig,
    pub class_names: Vec<String>,
    pub commands: CommandTable,
    pub serial_port: Option<String>,
    pub serial_baud_rate: u32,
    pub display_mode: DisplayMode,
    pub logger_timezone: chrono::FixedOffset,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid number: {value:?}")]
    NotANumber { key: String, value: String },

    #[error("threshold must be in (0, 1], got {0}")]
    ThresholdOutOfRange(f32),

    #[error("{0} must be greater than zero")]
    NotPositive(String),

    #[error("unknown display mode {0:?}, expected \"console\" or \"gui\"")]
    UnknownDisplayMode(String),

    #[error("class {0:?} has no sorter command")]
    MissingCommand(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            thresholds: ThresholdConfig::default(),
            class_names: vec![
                "Organik".to_string(),
                "Anorganik".to_string(),
                "B3".to_string(),
            ],
            commands: CommandTable::default(),
            serial_port: None,
            serial_baud_rate: 9600,
            display_mode: DisplayMode::Console,
            logger_timezone: western_indonesia_time(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults, overridden by whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup("TRASH_THRESHOLD") {
            config.thresholds.threshold = parse_number("TRASH_THRESHOLD", &value)?;
        }
        if let Some(value) = lookup("TRASH_HOLD_SECONDS") {
            let seconds: f64 = parse_number("TRASH_HOLD_SECONDS", &value)?;
            if !(seconds > 0.0 && seconds.is_finite()) {
                return Err(ConfigError::NotPositive("TRASH_HOLD_SECONDS".to_string()));
            }
            config.thresholds.hold_duration = Duration::from_secs_f64(seconds);
        }
        if let Some(value) = lookup("TRASH_FRAME_INTERVAL_MS") {
            let millis: u64 = parse_number("TRASH_FRAME_INTERVAL_MS", &value)?;
            config.tick_rate = Duration::from_millis(millis);
        }
        if let Some(value) = lookup("SERIAL_PORT") {
            if !value.trim().is_empty() {
                config.serial_port = Some(value.trim().to_string());
            }
        }
        if let Some(value) = lookup("SERIAL_BAUD_RATE") {
            config.serial_baud_rate = parse_number("SERIAL_BAUD_RATE", &value)?;
        }
        if let Some(value) = lookup("TRASH_DISPLAY") {
            config.display_mode = match value.trim().to_lowercase().as_str() {
                "console" => DisplayMode::Console,
                "gui" => DisplayMode::Gui,
                _ => return Err(ConfigError::UnknownDisplayMode(value)),
            };
        }

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.thresholds.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(threshold));
        }
        if self.thresholds.hold_duration.is_zero() {
            return Err(ConfigError::NotPositive("hold duration".to_string()));
        }
        if self.tick_rate.is_zero() {
            return Err(ConfigError::NotPositive("TRASH_FRAME_INTERVAL_MS".to_string()));
        }
        if self.serial_baud_rate == 0 {
            return Err(ConfigError::NotPositive("SERIAL_BAUD_RATE".to_string()));
        }
        if let Some(class_name) = self
            .class_names
            .iter()
            .find(|name| self.commands.lookup(name).is_none())
        {
            return Err(ConfigError::MissingCommand(class_name.clone()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn western_indonesia_time() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(7 * 3600).unwrap_or_else(|| chrono::Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.thresholds.threshold, 0.85);
        assert_eq!(config.thresholds.hold_duration, Duration::from_secs(3));
        assert_eq!(config.thresholds.blank_class, "BLANK");
        assert_eq!(config.serial_baud_rate, 9600);
        assert_eq!(config.serial_port, None);
        assert_eq!(config.display_mode, DisplayMode::Console);
        assert_eq!(config.class_names, vec!["Organik", "Anorganik", "B3"]);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TRASH_THRESHOLD", "0.9"),
            ("TRASH_HOLD_SECONDS", "1.5"),
            ("TRASH_FRAME_INTERVAL_MS", "50"),
            ("SERIAL_PORT", "/dev/ttyUSB0"),
            ("SERIAL_BAUD_RATE", "115200"),
            ("TRASH_DISPLAY", "GUI"),
        ]))
        .unwrap();

        assert_eq!(config.thresholds.threshold, 0.9);
        assert_eq!(config.thresholds.hold_duration, Duration::from_millis(1500));
        assert_eq!(config.tick_rate, Duration::from_millis(50));
        assert_eq!(config.serial_port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(config.serial_baud_rate, 115200);
        assert_eq!(config.display_mode, DisplayMode::Gui);
    }

    #[test]
    fn test_threshold_must_be_a_probability() {
        let result = Config::from_lookup(lookup_from(&[("TRASH_THRESHOLD", "1.2")]));
        assert_eq!(result.unwrap_err(), ConfigError::ThresholdOutOfRange(1.2));

        let result = Config::from_lookup(lookup_from(&[("TRASH_THRESHOLD", "0")]));
        assert!(matches!(result, Err(ConfigError::ThresholdOutOfRange(_))));

        let result = Config::from_lookup(lookup_from(&[("TRASH_THRESHOLD", "1")]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        let result = Config::from_lookup(lookup_from(&[("TRASH_HOLD_SECONDS", "three")]));
        assert!(matches!(result, Err(ConfigError::NotANumber { .. })));

        let result = Config::from_lookup(lookup_from(&[("TRASH_HOLD_SECONDS", "0")]));
        assert!(matches!(result, Err(ConfigError::NotPositive(_))));

        let result = Config::from_lookup(lookup_from(&[("TRASH_DISPLAY", "lcd")]));
        assert!(matches!(result, Err(ConfigError::UnknownDisplayMode(_))));
    }

    #[test]
    fn test_every_class_needs_a_command() {
        let mut config = Config::default();
        config.class_names.push("Kertas".to_string());

        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingCommand("Kertas".to_string()))
        );

        config.class_names = vec!["organik".to_string(), "B3".to_string()];
        assert_eq!(config.validate(), Ok(()));
    }
}
