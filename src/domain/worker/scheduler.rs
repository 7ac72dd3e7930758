use snafu::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc::Sender;
use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::domain::outbound::{DeadlineId, DeadlineScheduler, NoRuntimeSnafu, ScheduleError};

/// A [`DeadlineScheduler`] backed by tokio timers. Each deadline is a task
/// sleeping until it is due, which then reports its [`DeadlineId`] through a
/// channel.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    fired: Sender<DeadlineId>,
}

impl TokioScheduler {
    /// Creates a new [`TokioScheduler`] delivering fires to `fired`.
    pub fn new(fired: Sender<DeadlineId>) -> Self {
        Self { fired }
    }
}

impl DeadlineScheduler for TokioScheduler {
    type Handle = AbortHandle;

    fn schedule_once(
        &mut self,
        fire_at: Instant,
        deadline: DeadlineId,
    ) -> Result<AbortHandle, ScheduleError> {
        let runtime = Handle::try_current().ok().context(NoRuntimeSnafu)?;
        let fired = self.fired.clone();

        let task = runtime.spawn(async move {
            tokio::time::sleep_until(fire_at).await;
            if fired.send(deadline).await.is_err() {
                tracing::debug!(?deadline, "Deadline fired after its timer was gone");
            }
        });

        Ok(task.abort_handle())
    }

    fn cancel(&mut self, handle: AbortHandle) {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc::{self, error::TryRecvError};
    use tokio::time::Duration;

    #[test]
    fn schedule_without_runtime() {
        let (sender, _receiver) = mpsc::channel(1);
        let mut scheduler = TokioScheduler::new(sender);
        assert!(matches!(
            scheduler.schedule_once(Instant::now(), DeadlineId::initial()),
            Err(ScheduleError::NoRuntime)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_fires_at_deadline() {
        let (sender, mut receiver) = mpsc::channel(1);
        let mut scheduler = TokioScheduler::new(sender);
        let start = Instant::now();

        scheduler
            .schedule_once(start + Duration::from_secs(3), DeadlineId::initial())
            .unwrap();

        assert_eq!(receiver.recv().await, Some(DeadlineId::initial()));
        assert_eq!(Instant::now() - start, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire() {
        let (sender, mut receiver) = mpsc::channel(1);
        let mut scheduler = TokioScheduler::new(sender);

        let handle = scheduler
            .schedule_once(Instant::now(), DeadlineId::initial())
            .unwrap();
        assert_eq!(receiver.recv().await, Some(DeadlineId::initial()));

        scheduler.cancel(handle);
        assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_fire() {
        let (sender, mut receiver) = mpsc::channel(1);
        let mut scheduler = TokioScheduler::new(sender);
        let start = Instant::now();

        let handle = scheduler
            .schedule_once(start + Duration::from_secs(3), DeadlineId::initial())
            .unwrap();
        scheduler.cancel(handle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
    }
}
