//! Retry policy for relay requests.

use crate::error::RelayError;

/// Retries timed-out requests only; every other failure is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct TimeoutRetry {
    /// Attempts allowed after the first one.
    pub(super) extra_attempts: u32,
}

impl TimeoutRetry {
    pub(super) fn new(extra_attempts: u32) -> Self {
        Self { extra_attempts }
    }

    /// `attempt` counts from zero for the initial request.
    pub(super) fn should_retry(&self, err: &RelayError, attempt: u32) -> bool {
        attempt < self.extra_attempts && err.is_timeout()
    }
}
