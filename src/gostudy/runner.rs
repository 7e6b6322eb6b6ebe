//! # Simulated Execution Timer
//!
//! Nothing is executed. A run is a timer: after the configured delay the ticket handed
//! out by [`Session::begin_run`](crate::session::Session::begin_run) comes back through
//! a channel, and whoever owns the session applies it. The timer task never sees the
//! session.
//!
//! At most one timer is pending. Scheduling a new run aborts the previous task and
//! drains any completion it already queued; the session generation check covers the
//! remaining window.

use crate::session::RunTicket;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

pub const DEFAULT_RUN_DELAY: Duration = Duration::from_millis(800);

pub struct RunScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<RunTicket>,
    rx: mpsc::UnboundedReceiver<RunTicket>,
    pending: Option<JoinHandle<()>>,
    in_flight: Option<u64>,
}

impl RunScheduler {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            tx,
            rx,
            pending: None,
            in_flight: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts the timer for `ticket`, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, ticket: RunTicket) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.in_flight = Some(ticket.generation);
        trace!(generation = ticket.generation, ?delay, "run timer armed");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver lives as long as the scheduler; a failed send means it is gone.
            let _ = tx.send(ticket);
        }));
    }

    /// Aborts the pending timer, if any, and drops completions not yet received.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        while self.rx.try_recv().is_ok() {}
        self.in_flight = None;
    }

    pub fn has_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Waits for the next completion. Returns `None` immediately when nothing is pending.
    pub async fn next_completion(&mut self) -> Option<RunTicket> {
        self.in_flight?;
        let ticket = self.rx.recv().await?;
        self.settle(&ticket);
        Some(ticket)
    }

    /// Non-blocking variant of [`next_completion`](Self::next_completion).
    pub fn try_completion(&mut self) -> Option<RunTicket> {
        let ticket = self.rx.try_recv().ok()?;
        self.settle(&ticket);
        Some(ticket)
    }

    fn settle(&mut self, ticket: &RunTicket) {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
            self.pending = None;
        }
        trace!(generation = ticket.generation, "run timer fired");
    }
}

impl Default for RunScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_RUN_DELAY)
    }
}

impl Drop for RunScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
