//! Translation run metrics.
//!
//! Counters are atomic so concurrent language jobs can record into one
//! shared instance without locking.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for a single generation run.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Requests sent to the generation API
    api_calls: AtomicUsize,

    /// Attempts that failed (HTTP, parse or write)
    attempt_failures: AtomicUsize,

    /// Translation files written
    files_written: AtomicUsize,

    /// Languages skipped because they would overwrite the base file
    skipped: AtomicUsize,

    /// Languages that exhausted their retries
    languages_failed: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attempt_failure(&self) {
        self.attempt_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_written(&self) {
        self.files_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_failed(&self) {
        self.languages_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the current counters.
    pub fn report(&self) -> MetricsReport {
        let calls = self.api_calls.load(Ordering::Relaxed);
        let failures = self.attempt_failures.load(Ordering::Relaxed);
        let attempt_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            api_calls: calls,
            attempt_failures: failures,
            attempt_success_rate,
            files_written: self.files_written.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            languages_failed: self.languages_failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of a run's counters.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricsReport {
    pub api_calls: usize,
    pub attempt_failures: usize,

    /// Percentage (0-100) of API calls that ended in a written file
    pub attempt_success_rate: f64,

    pub files_written: usize,
    pub skipped: usize,
    pub languages_failed: usize,
}
