use serde::Deserialize;

use crate::domain::entity::duration::{TimerDuration, TryNewTimerDurationError};
use crate::domain::entity::notification::{
    NotificationMessage, TryNewNotificationMessageError,
};

/// Parsed form of the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub timer: TimerSection,
    #[serde(default)]
    pub notification: NotificationSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimerSection {
    /// Countdown length in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationSection {
    #[serde(default = "default_summary")]
    pub summary: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl Configuration {
    /// Get the validated countdown duration.
    ///
    /// # Errors
    ///
    /// This function will return an error if the configured value is negative
    /// or not a number.
    pub fn duration(&self) -> Result<TimerDuration, TryNewTimerDurationError> {
        TimerDuration::try_from_secs_f64(self.timer.duration)
    }

    /// Get the validated expiry notification.
    ///
    /// # Errors
    ///
    /// This function will return an error if the summary is blank.
    pub fn notification(&self) -> Result<NotificationMessage, TryNewNotificationMessageError> {
        let NotificationSection { summary, body } = self.notification.clone();
        NotificationMessage::try_new(summary, body)
    }
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            duration: default_duration(),
        }
    }
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            summary: default_summary(),
            body: None,
        }
    }
}

fn default_duration() -> f64 {
    1500.0
}

fn default_summary() -> String {
    "Time's up".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::adapter::config::reader::DEFAULT_CONTENT;

    #[test]
    fn parse_default_content() {
        let config: Configuration = toml::from_str(DEFAULT_CONTENT).unwrap();
        assert_eq!(config.duration(), Ok(TimerDuration::from_secs(1500)));
        let message = config.notification().unwrap();
        assert_eq!(message.summary(), "Time's up");
        assert_eq!(message.body(), Some("The countdown has finished."));
    }

    #[test]
    fn parse_empty_content() {
        let config: Configuration = toml::from_str("").unwrap();
        assert_eq!(config.timer, TimerSection::default());
        assert_eq!(config.notification, NotificationSection::default());
    }

    #[test]
    fn parse_invalid_values() {
        let config: Configuration = toml::from_str(
            r#"
            [timer]
            duration = -5

            [notification]
            summary = ""
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.duration(),
            Err(TryNewTimerDurationError::Negative { .. })
        ));
        assert_eq!(
            config.notification(),
            Err(TryNewNotificationMessageError::BlankSummary)
        );
    }
}
