use std::time::Duration;

use snafu::prelude::*;

/// The length of a countdown. A [`TimerDuration`] is never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerDuration(Duration);

impl TimerDuration {
    /// A zero-length [`TimerDuration`].
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a [`TimerDuration`] from whole seconds.
    pub fn from_secs(seconds: u64) -> Self {
        Self(Duration::from_secs(seconds))
    }

    /// Try to create a [`TimerDuration`] from fractional seconds.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value is negative, NaN,
    /// infinite or too large to be represented.
    pub fn try_from_secs_f64(seconds: f64) -> Result<Self, TryNewTimerDurationError> {
        ensure!(seconds.is_finite(), NotFiniteSnafu { seconds });
        ensure!(seconds >= 0.0, NegativeSnafu { seconds });
        Duration::try_from_secs_f64(seconds)
            .map(Self)
            .ok()
            .context(NotFiniteSnafu { seconds })
    }

    /// Returns the inner [`Duration`] of this [`TimerDuration`].
    pub fn inner(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for TimerDuration {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}

impl From<TimerDuration> for Duration {
    fn from(value: TimerDuration) -> Self {
        value.0
    }
}

impl TryFrom<f64> for TimerDuration {
    type Error = TryNewTimerDurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from_secs_f64(value)
    }
}

/// An error type of creating a [`TimerDuration`].
#[derive(Debug, Clone, Snafu, PartialEq)]
#[non_exhaustive]
pub enum TryNewTimerDurationError {
    #[snafu(display("Duration must not be negative, got {seconds}s"))]
    #[non_exhaustive]
    Negative { seconds: f64 },
    #[snafu(display("Duration must be a representable number of seconds, got {seconds}"))]
    #[non_exhaustive]
    NotFinite { seconds: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_duration_try_new() {
        assert_eq!(
            TimerDuration::try_from_secs_f64(1.5),
            Ok(TimerDuration(Duration::from_millis(1500))),
        );
        assert_eq!(TimerDuration::try_from_secs_f64(0.0), Ok(TimerDuration::ZERO));
        assert!(matches!(
            TimerDuration::try_from_secs_f64(-1.0),
            Err(TryNewTimerDurationError::Negative { .. })
        ));
        assert!(matches!(
            TimerDuration::try_from_secs_f64(f64::NAN),
            Err(TryNewTimerDurationError::NotFinite { .. })
        ));
        assert!(matches!(
            TimerDuration::try_from_secs_f64(f64::INFINITY),
            Err(TryNewTimerDurationError::NotFinite { .. })
        ));
    }

    #[test]
    fn timer_duration_try_from() {
        assert_eq!(300.0.try_into(), Ok(TimerDuration::from_secs(300)));
        assert!(TryInto::<TimerDuration>::try_into(-0.5).is_err());
    }

    #[test]
    fn timer_duration_conversion() {
        let duration: TimerDuration = Duration::from_secs(7).into();
        assert_eq!(duration.inner(), Duration::from_secs(7));
        assert_eq!(Duration::from(duration), Duration::from_secs(7));
    }
}
