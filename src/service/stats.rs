// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Request statistics.
//!
//! The dispatcher reports every request to an injected [`RequestObserver`].
//! [`ServiceStats`] is the in-process implementation: plain atomics, owned by
//! whoever constructs the processor, so there is no global registry and
//! tests can count requests without a monitoring backend.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::service::error::ErrorKind;

/// Upper bounds (inclusive, milliseconds) of the request-duration histogram.
/// A final overflow bucket catches everything slower.
pub const DURATION_BUCKETS_MS: [u64; 7] = [10, 50, 100, 200, 500, 1000, 2000];

/// Which operation a request ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Embed,
    Verify,
    Analyze,
    /// The request failed validation before an operation was chosen.
    Unknown,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Embed => "embed",
            Self::Verify => "verify",
            Self::Analyze => "analyze",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub operation: Operation,
    pub success: bool,
    pub elapsed: Duration,
    pub error_kind: Option<ErrorKind>,
}

/// Receives request lifecycle events. Both hooks default to no-ops.
pub trait RequestObserver: Send + Sync {
    fn request_started(&self) {}
    fn request_finished(&self, _outcome: &RequestOutcome) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

/// Atomic request counters and a duration histogram.
#[derive(Debug, Default)]
pub struct ServiceStats {
    total_requests: AtomicU64,
    failed_requests: AtomicU64,
    processed_images: AtomicU64,
    watermark_calls: AtomicU64,
    verify_calls: AtomicU64,
    forensics_calls: AtomicU64,
    active_requests: AtomicU64,
    duration_counts: [AtomicU64; DURATION_BUCKETS_MS.len() + 1],
    duration_sum_ms: AtomicU64,
}

impl ServiceStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        let counts: Vec<u64> = self.duration_counts.iter().map(load).collect();
        StatsSnapshot {
            total_requests: load(&self.total_requests),
            failed_requests: load(&self.failed_requests),
            processed_images: load(&self.processed_images),
            watermark_calls: load(&self.watermark_calls),
            verify_calls: load(&self.verify_calls),
            forensics_calls: load(&self.forensics_calls),
            active_requests: load(&self.active_requests),
            request_duration_ms: DurationHistogram {
                bounds: DURATION_BUCKETS_MS.to_vec(),
                count: counts.iter().sum(),
                counts,
                sum: load(&self.duration_sum_ms),
            },
        }
    }
}

impl RequestObserver for ServiceStats {
    fn request_started(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.active_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn request_finished(&self, outcome: &RequestOutcome) {
        let _ = self
            .active_requests
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));

        if outcome.success {
            self.processed_images.fetch_add(1, Ordering::Relaxed);
            let per_op = match outcome.operation {
                Operation::Embed => Some(&self.watermark_calls),
                Operation::Verify => Some(&self.verify_calls),
                Operation::Analyze => Some(&self.forensics_calls),
                Operation::Unknown => None,
            };
            if let Some(counter) = per_op {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }

        let ms = u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX);
        let bucket = DURATION_BUCKETS_MS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(DURATION_BUCKETS_MS.len());
        self.duration_counts[bucket].fetch_add(1, Ordering::Relaxed);
        self.duration_sum_ms.fetch_add(ms, Ordering::Relaxed);
    }
}

/// Serializable copy of [`ServiceStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub failed_requests: u64,
    pub processed_images: u64,
    pub watermark_calls: u64,
    pub verify_calls: u64,
    pub forensics_calls: u64,
    pub active_requests: u64,
    pub request_duration_ms: DurationHistogram,
}

/// Non-cumulative histogram. `counts[i]` covers `(bounds[i-1], bounds[i]]`;
/// the last entry counts everything above the final bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationHistogram {
    pub bounds: Vec<u64>,
    pub counts: Vec<u64>,
    pub sum: u64,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(operation: Operation, success: bool, ms: u64) -> RequestOutcome {
        RequestOutcome {
            operation,
            success,
            elapsed: Duration::from_millis(ms),
            error_kind: if success { None } else { Some(ErrorKind::Io) },
        }
    }

    #[test]
    fn counts_by_operation() {
        let stats = ServiceStats::new();
        for (op, ok) in [
            (Operation::Embed, true),
            (Operation::Verify, true),
            (Operation::Analyze, true),
            (Operation::Analyze, false),
            (Operation::Unknown, false),
        ] {
            stats.request_started();
            stats.request_finished(&outcome(op, ok, 5));
        }

        let snap = stats.snapshot();
        assert_eq!(snap.total_requests, 5);
        assert_eq!(snap.failed_requests, 2);
        assert_eq!(snap.processed_images, 3);
        assert_eq!(snap.watermark_calls, 1);
        assert_eq!(snap.verify_calls, 1);
        assert_eq!(snap.forensics_calls, 1);
        assert_eq!(snap.active_requests, 0);
    }

    #[test]
    fn active_requests_tracked() {
        let stats = ServiceStats::new();
        stats.request_started();
        stats.request_started();
        assert_eq!(stats.snapshot().active_requests, 2);
        stats.request_finished(&outcome(Operation::Verify, true, 1));
        assert_eq!(stats.snapshot().active_requests, 1);
        // An unmatched finish never wraps.
        stats.request_finished(&outcome(Operation::Verify, true, 1));
        stats.request_finished(&outcome(Operation::Verify, true, 1));
        assert_eq!(stats.snapshot().active_requests, 0);
    }

    #[test]
    fn duration_buckets() {
        let stats = ServiceStats::new();
        for ms in [0, 10, 11, 2000, 2001, 60_000] {
            stats.request_finished(&outcome(Operation::Embed, true, ms));
        }
        let hist = stats.snapshot().request_duration_ms;
        assert_eq!(hist.counts, vec![2, 1, 0, 0, 0, 0, 1, 2]);
        assert_eq!(hist.count, 6);
        assert_eq!(hist.sum, 10 + 11 + 2000 + 2001 + 60_000);
    }
}
