mod callback;

use snafu::prelude::*;
use tokio::time::{Duration, Instant};

use crate::domain::entity::{TimerDuration, TimerStatus};
use crate::domain::outbound::{DeadlineId, DeadlineScheduler, ScheduleError};

use callback::Callbacks;

/// The active part of a countdown, between a start or resume and the next
/// pause, stop or expiry.
#[derive(Debug)]
struct RunSegment<H> {
    started_at: Instant,
    deadline: DeadlineId,
    handle: H,
}

/// A single-fire countdown which can be paused and resumed.
///
/// Remaining time is never decremented by ticks. It is derived from the
/// instant passed to each query, so every operation takes the instant at
/// which it happens and callers supply "now" themselves. The only thing
/// scheduled is the terminal deadline, through a [`DeadlineScheduler`].
///
/// A [`CountdownTimer`] has no internal locking. All calls, including
/// [`deadline_fired`], must be serialized by its owner.
///
/// [`deadline_fired`]: CountdownTimer::deadline_fired
pub struct CountdownTimer<S: DeadlineScheduler> {
    scheduler: S,
    configured: Duration,
    remaining: Duration,
    segment: Option<RunSegment<S::Handle>>,
    next_deadline: DeadlineId,
    callbacks: Callbacks,
}

impl<S: DeadlineScheduler> CountdownTimer<S> {
    /// Creates an idle [`CountdownTimer`] with a zero duration.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            configured: Duration::ZERO,
            remaining: Duration::ZERO,
            segment: None,
            next_deadline: DeadlineId::initial(),
            callbacks: Callbacks::default(),
        }
    }

    /// Creates an idle [`CountdownTimer`] set to `duration`.
    pub fn with_duration(scheduler: S, duration: TimerDuration) -> Self {
        let mut timer = Self::new(scheduler);
        timer.configured = duration.inner();
        timer.remaining = duration.inner();
        timer
    }

    /// Set both the configured and the remaining duration.
    ///
    /// # Errors
    ///
    /// This function will return an error if a run segment is active. Stop or
    /// pause the timer first.
    pub fn set(&mut self, duration: TimerDuration) -> Result<(), TimerError> {
        ensure!(self.segment.is_none(), SetWhileRunningSnafu);
        self.configured = duration.inner();
        self.remaining = duration.inner();
        tracing::debug!(duration = ?self.configured, "Countdown duration set");
        Ok(())
    }

    /// Start counting down the remaining duration from `at`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is already running or
    /// the deadline could not be scheduled. The timer is left untouched in
    /// both cases.
    pub fn start(&mut self, at: Instant) -> Result<(), TimerError> {
        ensure!(self.segment.is_none(), AlreadyRunningSnafu);
        self.begin_segment(at)?;
        tracing::debug!(remaining = ?self.remaining, "Countdown started");
        self.callbacks.started();
        Ok(())
    }

    /// Pause the countdown at `at`, keeping whatever time is left. Does
    /// nothing if the timer is not running at `at`.
    pub fn pause(&mut self, at: Instant) {
        if !self.is_running(at) {
            tracing::debug!("Ignored pause of a countdown which is not running");
            return;
        }

        let remaining = self.remaining_duration(at);
        self.end_segment();
        self.remaining = remaining;
        tracing::debug!(remaining = ?self.remaining, "Countdown paused");
        self.callbacks.paused();
    }

    /// Continue a paused countdown from `at`. Does nothing if the timer is
    /// running or no time is left.
    ///
    /// # Errors
    ///
    /// This function will return an error if the deadline could not be
    /// scheduled. The timer stays paused in that case.
    pub fn resume(&mut self, at: Instant) -> Result<(), TimerError> {
        if self.is_running(at) {
            tracing::debug!("Ignored resume of a running countdown");
            return Ok(());
        }
        if self.remaining_duration(at).is_zero() {
            tracing::debug!("Ignored resume of a countdown with no time left");
            return Ok(());
        }

        self.begin_segment(at)?;
        tracing::debug!(remaining = ?self.remaining, "Countdown resumed");
        self.callbacks.resumed();
        Ok(())
    }

    /// Abandon the countdown and restore the configured duration. Always
    /// reports an unfinished stop, even if the timer was already idle.
    pub fn stop(&mut self) {
        self.reset();
        tracing::debug!("Countdown stopped");
        self.callbacks.stopped(false);
    }

    /// Handle the expiry of `deadline`. Called on behalf of the
    /// [`DeadlineScheduler`], never as a user action.
    ///
    /// Returns `false` and does nothing if `deadline` is not the one the
    /// timer is waiting for, i.e. it was cancelled or replaced before its
    /// fire got here.
    pub fn deadline_fired(&mut self, deadline: DeadlineId) -> bool {
        match &self.segment {
            Some(segment) if segment.deadline == deadline => {}
            _ => {
                tracing::debug!(?deadline, "Discarded a stale deadline");
                return false;
            }
        }

        // Already delivered, so the handle is dropped without cancelling.
        self.segment = None;
        self.remaining = self.configured;
        tracing::debug!(?deadline, "Countdown finished");
        self.callbacks.stopped(true);
        true
    }

    /// Returns `true` if a run segment is active and time is left at `at`.
    pub fn is_running(&self, at: Instant) -> bool {
        self.segment.is_some() && !self.remaining_duration(at).is_zero()
    }

    /// Returns the time left at `at`, clamped at zero.
    pub fn remaining_duration(&self, at: Instant) -> Duration {
        match &self.segment {
            Some(segment) => {
                let elapsed = at.saturating_duration_since(segment.started_at);
                self.remaining.saturating_sub(elapsed)
            }
            None => self.remaining,
        }
    }

    /// Returns the duration the countdown was set to.
    pub fn configured_duration(&self) -> Duration {
        self.configured
    }

    /// Returns the [`TimerStatus`] at `at`. A countdown which ran out but
    /// whose deadline has not been handled yet counts as idle.
    pub fn status(&self, at: Instant) -> TimerStatus {
        match &self.segment {
            Some(_) if self.is_running(at) => TimerStatus::Running,
            Some(_) => TimerStatus::Idle,
            None if self.remaining == self.configured => TimerStatus::Idle,
            None => TimerStatus::Paused,
        }
    }

    pub fn on_start(&mut self, hook: impl FnMut() + Send + 'static) {
        self.callbacks.set_on_start(Box::new(hook));
    }

    pub fn on_pause(&mut self, hook: impl FnMut() + Send + 'static) {
        self.callbacks.set_on_pause(Box::new(hook));
    }

    pub fn on_resume(&mut self, hook: impl FnMut() + Send + 'static) {
        self.callbacks.set_on_resume(Box::new(hook));
    }

    /// Register the stop handler. It receives `true` on natural expiry and
    /// `false` when [`stop`](CountdownTimer::stop) was called.
    pub fn on_stop(&mut self, hook: impl FnMut(bool) + Send + 'static) {
        self.callbacks.set_on_stop(Box::new(hook));
    }

    fn begin_segment(&mut self, at: Instant) -> Result<(), TimerError> {
        let fire_at = at
            .checked_add(self.remaining)
            .context(DeadlineOverflowSnafu {
                remaining: self.remaining,
            })?;
        let deadline = self.next_deadline;
        let handle = self
            .scheduler
            .schedule_once(fire_at, deadline)
            .context(ScheduleSnafu)?;

        self.next_deadline = deadline.next();
        self.segment = Some(RunSegment {
            started_at: at,
            deadline,
            handle,
        });
        Ok(())
    }

    fn end_segment(&mut self) {
        if let Some(segment) = self.segment.take() {
            self.scheduler.cancel(segment.handle);
        }
    }

    fn reset(&mut self) {
        self.end_segment();
        self.remaining = self.configured;
    }
}

impl<S: DeadlineScheduler> Drop for CountdownTimer<S> {
    fn drop(&mut self) {
        self.end_segment();
    }
}

impl<S: DeadlineScheduler> std::fmt::Debug for CountdownTimer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("configured", &self.configured)
            .field("remaining", &self.remaining)
            .field("running", &self.segment.is_some())
            .field("next_deadline", &self.next_deadline)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

/// An error type of countdown transitions.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum TimerError {
    #[snafu(display("Could not start a countdown which is already running"))]
    AlreadyRunning,
    #[snafu(display("Could not change the duration of a running countdown"))]
    SetWhileRunning,
    #[snafu(display("Could not compute a deadline {remaining:?} ahead"))]
    DeadlineOverflow { remaining: Duration },
    #[snafu(display("Could not schedule the countdown deadline"))]
    Schedule { source: ScheduleError },
}
