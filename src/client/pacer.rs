//! Fixed-delay pacing between page fetches
//!
//! The upstream API budgets requests per minute; a fixed inter-page delay
//! keeps a full catalog sweep under that budget. The pacer is deliberately
//! not adaptive: a 429 aborts the run rather than triggering backoff.

use std::time::Duration;

/// Enforces a fixed delay between successive page fetches
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// Creates a pacer with the given inter-request delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Blocks the caller for the configured delay
    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}
