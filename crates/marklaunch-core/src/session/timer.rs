//! Focus-loss grace timer.
//!
//! At most one timer is pending at a time. Arming aborts the previous task, and
//! every arm hands out a fresh [`GraceToken`] so an expiry that was already
//! queued before a cancel can still be recognised as stale.

use super::SessionEvent;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_GRACE: Duration = Duration::from_millis(500);

/// Identifies one arming of the grace timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraceToken(u64);

pub struct GraceTimer {
    delay: Duration,
    events: UnboundedSender<SessionEvent>,
    pending: Option<(GraceToken, JoinHandle<()>)>,
    armed: u64,
}

impl GraceTimer {
    /// Expiries are delivered as [`SessionEvent::TimerElapsed`] on `events`.
    #[must_use]
    pub fn new(delay: Duration, events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            delay,
            events,
            pending: None,
            armed: 0,
        }
    }

    /// Start the timer, replacing any pending one. Must run inside a tokio runtime.
    pub fn arm(&mut self) -> GraceToken {
        self.cancel();

        self.armed += 1;
        let token = GraceToken(self.armed);
        let delay = self.delay;
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session already ended
            let _ = events.send(SessionEvent::TimerElapsed(token));
        });

        debug!("Grace timer {:?} armed for {:?}", token, delay);
        self.pending = Some((token, handle));
        token
    }

    /// Cancel the pending timer, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let Some((token, handle)) = self.pending.take() else {
            return false;
        };
        handle.abort();
        debug!("Grace timer {:?} cancelled", token);
        true
    }

    /// Whether `token` belongs to the timer that is currently pending.
    #[must_use]
    pub fn is_current(&self, token: GraceToken) -> bool {
        self.pending.as_ref().is_some_and(|(pending, _)| *pending == token)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for GraceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
