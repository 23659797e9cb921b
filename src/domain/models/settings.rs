use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{recipient::RecipientHandle, theme::MessageTheme};

pub const SETTINGS_VERSION: u32 = 1;

/// Run interval as entered by the operator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunInterval {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Default for RunInterval {
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 10,
        }
    }
}

impl RunInterval {
    pub fn as_millis(&self) -> u64 {
        (u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds))
            * 1000
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.as_millis())
    }
}

/// The single persisted configuration record. Missing fields take their defaults,
/// so records written by older versions still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    pub recipients: Vec<RecipientHandle>,
    pub total_sent: u64,
    pub theme: MessageTheme,
    pub interval: RunInterval,
    pub is_active: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            recipients: Vec::new(),
            total_sent: 0,
            theme: MessageTheme::default(),
            interval: RunInterval::default(),
            is_active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_converts_all_components() {
        let interval = RunInterval {
            hours: 1,
            minutes: 2,
            seconds: 3,
        };
        assert_eq!(interval.as_millis(), 3_723_000);
        assert_eq!(interval.as_duration(), Duration::from_secs(3723));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"recipients":["alex"],"interval":{"minutes":5}}"#).unwrap();

        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.recipients.len(), 1);
        assert_eq!(settings.total_sent, 0);
        assert_eq!(settings.theme, MessageTheme::Auto);
        assert_eq!(
            settings.interval,
            RunInterval {
                hours: 0,
                minutes: 5,
                seconds: 10
            }
        );
        assert!(!settings.is_active);
    }
}
