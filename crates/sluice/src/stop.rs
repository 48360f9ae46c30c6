use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Cancellation signal that governs the generator.
///
/// Combines a cloneable [`CancellationToken`] for manual cancellation with an
/// optional absolute deadline. Checking it never blocks, which is what lets the
/// generator poll it immediately before producing each value.
///
/// Only the generator ever looks at this signal. Every other stage stops by
/// observing its input channel close.
#[derive(Debug, Clone)]
pub struct StopSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl StopSignal {
    /// A signal that stops once `duration` has elapsed from now.
    ///
    /// A zero `duration` produces a signal that is already stopped, so a
    /// generator driven by it produces no values at all.
    pub fn after(duration: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + duration),
        }
    }

    /// A signal that only stops when [`StopSignal::cancel`] is called.
    pub fn manual() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Wraps an existing token, e.g. one that is cancelled on Ctrl+C.
    pub fn from_token(token: CancellationToken, duration: Option<Duration>) -> Self {
        Self {
            token,
            deadline: duration.map(|d| Instant::now() + d),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Non-blocking check: cancelled by hand, or past the deadline.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
