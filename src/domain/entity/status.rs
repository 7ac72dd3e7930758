use std::fmt::{Display, Formatter, Result as FmtResult};

/// The observable state of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// Never started, stopped, or expired. The full duration remains.
    Idle,
    /// A deadline is pending and time is running down.
    Running,
    /// Stopped early with part of the duration preserved.
    Paused,
}

impl TimerStatus {
    /// Returns `true` if the countdown is running.
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl Display for TimerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Running => f.write_str("Running"),
            Self::Paused => f.write_str("Paused"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(TimerStatus::Idle.to_string(), "Idle");
        assert_eq!(TimerStatus::Running.to_string(), "Running");
        assert_eq!(TimerStatus::Paused.to_string(), "Paused");
        assert!(TimerStatus::Running.is_running());
        assert!(!TimerStatus::Paused.is_running());
    }
}
