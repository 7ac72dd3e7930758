use tokio::sync::broadcast::Sender as EventSender;
use tokio::sync::mpsc::{self, Receiver};
use tokio::task::JoinHandle;

use crate::domain::entity::TimerDuration;
use crate::domain::outbound::DeadlineId;
use crate::domain::timer::CountdownTimer;
use crate::domain::worker::handle::{Command, QueryResponse, TimerEvent};
use crate::domain::worker::scheduler::TokioScheduler;

/// A type that owns a [`CountdownTimer`] on a background task. Requests from
/// a [`TimerHandle`] and fires from the [`TokioScheduler`] are received on
/// the same task, so the timer never sees two of them at once.
///
/// [`TimerHandle`]: super::TimerHandle
pub struct WorkerRoutine {
    timer: CountdownTimer<TokioScheduler>,
    commands: Receiver<Command>,
    fired: Receiver<DeadlineId>,
}

impl WorkerRoutine {
    /// Spawn a running [`WorkerRoutine`] on background.
    pub fn spawn(
        duration: TimerDuration,
        commands: Receiver<Command>,
        events: EventSender<TimerEvent>,
    ) -> JoinHandle<()> {
        let (deadlines, fired) = mpsc::channel(1);
        let mut timer = CountdownTimer::with_duration(TokioScheduler::new(deadlines), duration);
        Self::publish(&mut timer, events);

        tokio::spawn(async move {
            let mut worker = Self {
                timer,
                commands,
                fired,
            };
            worker.run().await;
        })
    }

    fn publish(timer: &mut CountdownTimer<TokioScheduler>, events: EventSender<TimerEvent>) {
        // Sending only fails when nobody is subscribed.
        let sender = events.clone();
        timer.on_start(move || {
            let _ = sender.send(TimerEvent::Started);
        });
        let sender = events.clone();
        timer.on_pause(move || {
            let _ = sender.send(TimerEvent::Paused);
        });
        let sender = events.clone();
        timer.on_resume(move || {
            let _ = sender.send(TimerEvent::Resumed);
        });
        timer.on_stop(move |finished| {
            let _ = events.send(TimerEvent::Stopped { finished });
        });
    }

    /// Main part of its business logic.
    async fn run(&mut self) {
        loop {
            tokio::select! {
                Some(deadline) = self.fired.recv() => {
                    self.timer.deadline_fired(deadline);
                }
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
            }
        }
        tracing::debug!("Countdown worker shut down");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Set {
                duration,
                responder,
            } => {
                let _ = responder.send(self.timer.set(duration));
            }
            Command::Start { at, responder } => {
                let res = self.timer.start(at);
                if let Err(err) = &res {
                    tracing::warn!(%err, "Could not start the countdown");
                }
                let _ = responder.send(res);
            }
            Command::Pause { at, responder } => {
                self.timer.pause(at);
                let _ = responder.send(Ok(()));
            }
            Command::Resume { at, responder } => {
                let res = self.timer.resume(at);
                if let Err(err) = &res {
                    tracing::warn!(%err, "Could not resume the countdown");
                }
                let _ = responder.send(res);
            }
            Command::Stop { responder } => {
                self.timer.stop();
                let _ = responder.send(Ok(()));
            }
            Command::Query { at, responder } => {
                let _ = responder.send(QueryResponse {
                    status: self.timer.status(at),
                    total: self.timer.configured_duration(),
                    remaining: self.timer.remaining_duration(at),
                });
            }
        }
    }
}
