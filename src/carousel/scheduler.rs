//! Cancellable timers for the playback engine.
//!
//! A [`Scheduler`] owns every live timer it arms. A timer is a spawned task
//! that waits (a delay, or any future such as "video ended") and then
//! delivers an event back through the scheduler's channel. Only the
//! scheduler can cancel its timers, and [`Scheduler::drain_all`] cancels
//! them all at once before a new advance chain starts.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use recognitions_core::carousel::Scheduler;
//!
//! # async fn example() {
//! let mut scheduler = Scheduler::new(4);
//! scheduler.arm(Duration::from_millis(10), "tick");
//! assert_eq!(scheduler.next_event().await, Some("tick"));
//! assert_eq!(scheduler.next_event().await, None);
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default number of timers a scheduler keeps alive at once.
pub const DEFAULT_TIMER_CAPACITY: usize = 8;

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Owner of a bounded set of cancellable timers delivering events of type `E`.
#[derive(Debug)]
pub struct Scheduler<E> {
    capacity: usize,
    next_token: u64,
    live: Vec<(TimerToken, JoinHandle<()>)>,
    sender: mpsc::UnboundedSender<E>,
    receiver: mpsc::UnboundedReceiver<E>,
}

impl<E: Send + 'static> Scheduler<E> {
    /// Creates a scheduler holding at most `capacity` live timers (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            capacity: capacity.max(1),
            next_token: 0,
            live: Vec::new(),
            sender,
            receiver,
        }
    }

    /// Arms a timer delivering `event` after `delay`.
    pub fn arm(&mut self, delay: Duration, event: E) -> TimerToken {
        self.arm_after(tokio::time::sleep(delay), event)
    }

    /// Arms a timer delivering `event` once `wait` completes.
    ///
    /// When the scheduler is full, the oldest live timer is cancelled first.
    pub fn arm_after<F>(&mut self, wait: F, event: E) -> TimerToken
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.prune();
        while self.live.len() >= self.capacity {
            let (token, handle) = self.live.remove(0);
            handle.abort();
            warn!(?token, capacity = self.capacity, "Timer capacity reached; cancelled oldest timer");
        }

        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            wait.await;
            // The receiver lives as long as the scheduler.
            let _ = sender.send(event);
        });
        self.live.push((token, handle));
        debug!(?token, live = self.live.len(), "timer armed");
        token
    }

    /// Cancels one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.live.iter().position(|(live, _)| *live == token) {
            Some(index) => {
                let (_, handle) = self.live.remove(index);
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    /// Cancels every live timer and discards events not yet received.
    ///
    /// Returns how many timers were still pending.
    pub fn drain_all(&mut self) -> usize {
        let mut pending = 0;
        for (_, handle) in self.live.drain(..) {
            if !handle.is_finished() {
                pending += 1;
            }
            handle.abort();
        }
        while self.receiver.try_recv().is_ok() {}
        if pending > 0 {
            debug!(pending, "drained timers");
        }
        pending
    }

    /// Number of timers that have not fired yet.
    pub fn live_count(&mut self) -> usize {
        self.prune();
        self.live.len()
    }

    /// Waits for the next delivered event.
    ///
    /// Returns `None` when no event is queued and no timer is live, since
    /// nothing could ever be delivered.
    pub async fn next_event(&mut self) -> Option<E> {
        if let Ok(event) = self.receiver.try_recv() {
            self.prune();
            return Some(event);
        }
        if self.live_count() == 0 {
            // A timer may have delivered between the two checks.
            return self.receiver.try_recv().ok();
        }
        let event = self.receiver.recv().await;
        self.prune();
        event
    }

    fn prune(&mut self) {
        self.live.retain(|(_, handle)| !handle.is_finished());
    }
}

impl<E: Send + 'static> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_CAPACITY)
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        for (_, handle) in self.live.drain(..) {
            handle.abort();
        }
    }
}
