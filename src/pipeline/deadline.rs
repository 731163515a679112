//! Request deadline checked between upstream calls.
//!
//! The HTTP layer stops waiting when the request timeout elapses, but the
//! blocking pipeline keeps its thread. Every provider or model call is
//! preceded by a deadline check so the run winds down instead of issuing
//! more calls for a response nobody will read.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No deadline. Used by callers that wait for the full run.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    pub fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// `true` once expired, with a log line naming the skipped call.
    pub fn stops(&self, operation: &str) -> bool {
        let expired = self.expired();
        if expired {
            tracing::debug!(operation, "Request deadline passed, skipping call");
        }
        expired
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::none()
    }
}
