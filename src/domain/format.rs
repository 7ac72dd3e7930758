use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Renders durations as clock strings.
pub struct DurationFormatter;

impl DurationFormatter {
    /// Format `duration` as `"MM:SS"`, or as `"HH:MM:SS"` once it reaches an
    /// hour. Sub-second parts are truncated. Hours beyond two digits are
    /// written out in full, e.g. `"100:00:00"`.
    pub fn format(duration: Duration) -> String {
        Clock(duration).to_string()
    }
}

/// [`Display`] adapter printing a [`Duration`] the way
/// [`DurationFormatter::format`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock(pub Duration);

impl Display for Clock {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let total = self.0.as_secs();
        let hours = total / SECONDS_PER_HOUR;
        let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = total % SECONDS_PER_MINUTE;

        if hours > 0 {
            write!(f, "{hours:02}:")?;
        }
        write!(f, "{minutes:02}:{seconds:02}")
    }
}
