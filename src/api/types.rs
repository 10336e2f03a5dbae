//! Shared state for the API layer.

use std::sync::Arc;
use std::time::Instant;

/// Shared context for all API routes and middleware.
///
/// Scoring is stateless; the context only tracks when the server started
/// so `/api/ping` can report uptime.
#[derive(Clone)]
pub struct ApiContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    started: Instant,
}

impl ApiContext {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                started: Instant::now(),
            }),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.inner.started.elapsed().as_secs()
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new()
    }
}
