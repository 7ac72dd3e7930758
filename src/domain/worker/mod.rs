mod handle;
mod routine;
mod scheduler;

pub use handle::{QueryResponse, RequestWorkerError, TimerEvent, TimerHandle};
pub use scheduler::TokioScheduler;

use tokio::sync::{broadcast, mpsc};

use crate::domain::entity::TimerDuration;

use routine::WorkerRoutine;

/// Number of [`TimerEvent`]s a slow subscriber may fall behind by.
const EVENT_CAPACITY: usize = 16;

/// Spawn a background countdown set to `duration` and return its handle.
/// Must be called within a tokio runtime.
pub fn spawn(duration: TimerDuration) -> TimerHandle {
    let (requester, commands) = mpsc::channel(1);
    let (events, _) = broadcast::channel(EVENT_CAPACITY);
    let routine = WorkerRoutine::spawn(duration, commands, events.clone());
    TimerHandle::new(requester, events, routine)
}
