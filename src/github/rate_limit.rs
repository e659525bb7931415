//! Rate-limit bookkeeping for GraphQL responses.
//!
//! Every query asks for the `rateLimit` object alongside its data. The
//! snapshot is reported after each call and never throttles anything.

use crate::log_sink::LogSink;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitSnapshot {
    pub limit: u32,
    pub cost: u32,
    pub remaining: u32,
    pub reset_at: String,
}

impl RateLimitSnapshot {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Reports the remaining call budget to the sink.
pub(crate) fn observe(snapshot: &RateLimitSnapshot, sink: &LogSink) {
    tracing::debug!(
        limit = snapshot.limit,
        cost = snapshot.cost,
        remaining = snapshot.remaining,
        reset_at = %snapshot.reset_at,
        "rate limit"
    );
    if snapshot.is_exhausted() {
        tracing::warn!(reset_at = %snapshot.reset_at, "GraphQL rate limit exhausted");
    }
    sink.log(&format!("Credits remaining {}", snapshot.remaining));
}
