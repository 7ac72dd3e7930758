use std::error::Error as StdError;

use snafu::prelude::*;
use tokio::time::Instant;

use crate::domain::entity::NotificationMessage;

/// Generation number of one scheduled deadline. A fire is only honoured when
/// its id matches the deadline the timer is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeadlineId(u64);

impl DeadlineId {
    /// Get the id of the first deadline a timer schedules.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Get the id following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A port for one-shot deadline scheduling, supplied by the environment.
///
/// Implementations must deliver each scheduled deadline at most once, and a
/// deadline cancelled before it fires must not be delivered at all. How a
/// fire reaches the timer is up to the implementation; it must eventually
/// lead to [`CountdownTimer::deadline_fired`] being called with the same
/// [`DeadlineId`].
///
/// [`CountdownTimer::deadline_fired`]: crate::domain::timer::CountdownTimer::deadline_fired
#[cfg_attr(test, mockall::automock(type Handle = u32;))]
pub trait DeadlineScheduler: Send + 'static {
    /// Opaque handle of a pending deadline.
    type Handle: Send + 'static;

    /// Schedule `deadline` to fire at `fire_at`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the deadline could not be
    /// registered. Nothing is scheduled in that case.
    fn schedule_once(
        &mut self,
        fire_at: Instant,
        deadline: DeadlineId,
    ) -> Result<Self::Handle, ScheduleError>;

    /// Cancel a pending deadline. Cancelling a deadline which has already
    /// fired or been cancelled does nothing.
    fn cancel(&mut self, handle: Self::Handle);
}

/// An error type of scheduling a deadline.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum ScheduleError {
    #[snafu(display("No async runtime is available to drive the deadline"))]
    NoRuntime,
    #[snafu(whatever, display("Could not schedule a deadline: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// A public port for telling the user that a countdown has finished.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NotifyPort: Send + Sync + 'static {
    /// Emit the notification.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to make a notification.
    async fn notify(&self, message: &NotificationMessage) -> Result<(), NotifyError>;
}

/// An error type of the notification operation.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum NotifyError {
    #[snafu(whatever, display("Could not emit a notification: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_id_next() {
        let id = DeadlineId::initial();
        assert_eq!(id, DeadlineId(0));
        assert_eq!(id.next(), DeadlineId(1));
        assert_ne!(id.next(), id);
        assert_eq!(DeadlineId(u64::MAX).next(), DeadlineId(0));
    }
}
