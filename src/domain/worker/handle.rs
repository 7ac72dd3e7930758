use snafu::prelude::*;
use tokio::sync::broadcast::{self, Receiver as EventReceiver};
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Duration, Instant};

use crate::domain::entity::{TimerDuration, TimerStatus};
use crate::domain::timer::TimerError;

/// Snapshot of the countdown at the moment of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub status: TimerStatus,
    pub total: Duration,
    pub remaining: Duration,
}

/// Lifecycle events published by a [`WorkerRoutine`].
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Paused,
    Resumed,
    Stopped { finished: bool },
}

pub type Responder = OneshotSender<Result<(), TimerError>>;

/// Actions that a [`WorkerRoutine`] runs. Each one carries the instant at
/// which it was requested.
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug)]
pub enum Command {
    Set {
        duration: TimerDuration,
        responder: Responder,
    },
    Start {
        at: Instant,
        responder: Responder,
    },
    Pause {
        at: Instant,
        responder: Responder,
    },
    Resume {
        at: Instant,
        responder: Responder,
    },
    Stop {
        responder: Responder,
    },
    Query {
        at: Instant,
        responder: OneshotSender<QueryResponse>,
    },
}

/// Handle that controls a background [`WorkerRoutine`].
///
/// [`WorkerRoutine`]: super::routine::WorkerRoutine
#[derive(Debug)]
pub struct TimerHandle {
    requester: Sender<Command>,
    events: broadcast::Sender<TimerEvent>,
    routine: JoinHandle<()>,
}

impl TimerHandle {
    /// Creates a new [`TimerHandle`].
    pub fn new(
        requester: Sender<Command>,
        events: broadcast::Sender<TimerEvent>,
        routine: JoinHandle<()>,
    ) -> Self {
        Self {
            requester,
            events,
            routine,
        }
    }

    /// Subscribe to [`TimerEvent`]s published after this call.
    pub fn subscribe(&self) -> EventReceiver<TimerEvent> {
        self.events.subscribe()
    }

    /// Change the countdown duration. Only allowed while not running.
    ///
    /// # Errors
    ///
    /// This function will return an error if the countdown is running or the
    /// worker is gone.
    pub async fn set(&self, duration: TimerDuration) -> Result<(), RequestWorkerError> {
        self.transition(|responder| Command::Set {
            duration,
            responder,
        })
        .await
    }

    /// Start the countdown now.
    ///
    /// # Errors
    ///
    /// This function will return an error if the countdown is already
    /// running, its deadline could not be scheduled, or the worker is gone.
    pub async fn start(&self) -> Result<(), RequestWorkerError> {
        let at = Instant::now();
        self.transition(|responder| Command::Start { at, responder })
            .await
    }

    /// Pause the countdown now.
    ///
    /// # Errors
    ///
    /// This function will return an error if the worker is gone.
    pub async fn pause(&self) -> Result<(), RequestWorkerError> {
        let at = Instant::now();
        self.transition(|responder| Command::Pause { at, responder })
            .await
    }

    /// Resume the countdown now.
    ///
    /// # Errors
    ///
    /// This function will return an error if the deadline could not be
    /// scheduled or the worker is gone.
    pub async fn resume(&self) -> Result<(), RequestWorkerError> {
        let at = Instant::now();
        self.transition(|responder| Command::Resume { at, responder })
            .await
    }

    /// Stop the countdown and restore its full duration.
    ///
    /// # Errors
    ///
    /// This function will return an error if the worker is gone.
    pub async fn stop(&self) -> Result<(), RequestWorkerError> {
        self.transition(|responder| Command::Stop { responder })
            .await
    }

    /// Get the current state of the countdown.
    ///
    /// # Errors
    ///
    /// This function will return an error if the worker is gone.
    pub async fn query(&self) -> Result<QueryResponse, RequestWorkerError> {
        let at = Instant::now();
        let (responder, receiver) = oneshot::channel();
        self.requester
            .send(Command::Query { at, responder })
            .await
            .ok()
            .context(ClosedSnafu)?;
        receiver.await.ok().context(ClosedSnafu)
    }

    /// Shut the worker down. A pending deadline is cancelled without
    /// publishing any event.
    ///
    /// # Errors
    ///
    /// This function will return an error if the worker panicked.
    pub async fn shutdown(self) -> Result<(), RequestWorkerError> {
        let Self {
            requester, routine, ..
        } = self;
        drop(requester);
        routine.await.context(JoinSnafu)
    }

    async fn transition<F>(&self, command: F) -> Result<(), RequestWorkerError>
    where
        F: FnOnce(Responder) -> Command,
    {
        let (responder, receiver) = oneshot::channel();
        self.requester
            .send(command(responder))
            .await
            .ok()
            .context(ClosedSnafu)?;
        receiver
            .await
            .ok()
            .context(ClosedSnafu)?
            .context(TimerSnafu)
    }
}

/// An error type of requesting the background worker.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RequestWorkerError {
    #[snafu(display("The countdown rejected the request"))]
    Timer { source: TimerError },
    #[snafu(display("The countdown worker has shut down"))]
    Closed,
    #[snafu(display("The countdown worker terminated abnormally"))]
    Join { source: JoinError },
}
