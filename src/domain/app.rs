use std::sync::Arc;

use snafu::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::task::{JoinError, JoinHandle};

use crate::domain::entity::{NotificationMessage, TimerDuration};
use crate::domain::outbound::NotifyPort;
use crate::domain::worker::{self, RequestWorkerError, TimerEvent, TimerHandle};

/// Entrance to the domain logic: a background countdown plus, optionally, a
/// task announcing its expiry through a [`NotifyPort`].
pub struct ApplicationCore {
    timer: TimerHandle,
    announcer: Option<JoinHandle<()>>,
}

impl ApplicationCore {
    /// Spawn the countdown worker and the expiry announcer. Must be called
    /// within a tokio runtime.
    pub fn setup(
        duration: TimerDuration,
        notify: Option<(Arc<dyn NotifyPort>, NotificationMessage)>,
    ) -> Self {
        let timer = worker::spawn(duration);
        let announcer = notify.map(|(notify_port, message)| {
            tokio::spawn(announce(timer.subscribe(), notify_port, message))
        });
        Self { timer, announcer }
    }

    /// Returns the handle of the countdown.
    pub fn timer(&self) -> &TimerHandle {
        &self.timer
    }

    /// Shut the countdown down and wait for pending announcements.
    ///
    /// # Errors
    ///
    /// This function will return an error if a background task panicked.
    pub async fn shutdown(self) -> Result<(), ShutdownApplicationError> {
        self.timer.shutdown().await.context(WorkerSnafu)?;
        if let Some(announcer) = self.announcer {
            announcer.await.context(AnnouncerSnafu)?;
        }
        Ok(())
    }
}

async fn announce(
    mut events: Receiver<TimerEvent>,
    notify_port: Arc<dyn NotifyPort>,
    message: NotificationMessage,
) {
    loop {
        match events.recv().await {
            Ok(TimerEvent::Stopped { finished: true }) => {
                tracing::info!(summary = message.summary(), "Countdown finished");
                if let Err(err) = notify_port.notify(&message).await {
                    crate::tracing_report!(err);
                }
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Announcer fell behind the countdown events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// An error for shutting the application down.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ShutdownApplicationError {
    #[snafu(display("Could not shut the countdown worker down"))]
    Worker { source: RequestWorkerError },
    #[snafu(display("The expiry announcer terminated abnormally"))]
    Announcer { source: JoinError },
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::time::Duration;

    use crate::domain::outbound::{MockNotifyPort, NotifyError};

    #[tokio::test(start_paused = true)]
    async fn announce_on_expiry_only() {
        let mut notify_port = MockNotifyPort::new();
        notify_port
            .expect_notify()
            .withf(|message| message.summary() == "Time's up")
            .times(1)
            .returning(|_| Ok(()));

        let notify_port: Arc<dyn NotifyPort> = Arc::new(notify_port);
        let core = ApplicationCore::setup(
            TimerDuration::from_secs(3),
            Some((notify_port, new_message())),
        );
        let mut events = core.timer().subscribe();

        core.timer().start().await.unwrap();
        wait_for_stop(&mut events).await;

        core.timer().start().await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        core.timer().stop().await.unwrap();

        core.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn announce_failure_is_reported() {
        let mut notify_port = MockNotifyPort::new();
        notify_port
            .expect_notify()
            .times(1)
            .returning(|_| Err(NotifyError::Unknown {
                message: "no notification daemon".to_owned(),
                source: None,
            }));

        let notify_port: Arc<dyn NotifyPort> = Arc::new(notify_port);
        let core = ApplicationCore::setup(
            TimerDuration::from_secs(3),
            Some((notify_port, new_message())),
        );
        let mut events = core.timer().subscribe();

        core.timer().start().await.unwrap();
        wait_for_stop(&mut events).await;

        assert!(core.shutdown().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn setup_without_notification() {
        let core = ApplicationCore::setup(TimerDuration::from_secs(3), None);
        core.timer().start().await.unwrap();
        assert!(core.shutdown().await.is_ok());
    }

    fn new_message() -> NotificationMessage {
        NotificationMessage::try_new("Time's up".to_owned(), None).unwrap()
    }

    async fn wait_for_stop(events: &mut Receiver<TimerEvent>) {
        while let Ok(event) = events.recv().await {
            if let TimerEvent::Stopped { .. } = event {
                return;
            }
        }
    }
}
