//! Operation metrics for the customer registry.
//!
//! Counters are cheap atomics shared by clones, so a single tracker can be
//! handed to the service and read back by the server or tests.

use crate::error::CustomerError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Kinds of customer operation being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    List,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Counters for customer operations and their outcomes.
#[derive(Debug, Clone, Default)]
pub struct OperationMetrics {
    created_total: Arc<AtomicU64>,
    updated_total: Arc<AtomicU64>,
    deleted_total: Arc<AtomicU64>,
    reads_total: Arc<AtomicU64>,
    validation_failures_total: Arc<AtomicU64>,
    duplicate_emails_total: Arc<AtomicU64>,
    not_found_total: Arc<AtomicU64>,
    store_faults_total: Arc<AtomicU64>,
    phones_added_total: Arc<AtomicU64>,
    phones_removed_total: Arc<AtomicU64>,
}

impl OperationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a successful operation.
    pub fn track_success(&self, operation: Operation, duration_ms: u128) {
        let counter = match operation {
            Operation::Create => &self.created_total,
            Operation::Update => &self.updated_total,
            Operation::Delete => &self.deleted_total,
            Operation::Get | Operation::List => &self.reads_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            operation = operation.as_str(),
            duration_ms = duration_ms,
            "Customer operation succeeded"
        );
    }

    /// Track a failed operation, bucketed by outcome.
    pub fn track_failure(&self, operation: Operation, error: &CustomerError) {
        let counter = match error {
            CustomerError::ValidationFailed(_) => &self.validation_failures_total,
            CustomerError::DuplicateEmail(_) => &self.duplicate_emails_total,
            CustomerError::NotFound(_) => &self.not_found_total,
            CustomerError::Store(_) => &self.store_faults_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        if error.is_expected() {
            tracing::debug!(operation = operation.as_str(), error = %error, "Customer operation rejected");
        } else {
            tracing::error!(operation = operation.as_str(), error = %error, "Customer operation failed");
        }
    }

    /// Track the phone rows written by a reconciliation.
    pub fn track_phone_changes(&self, added: usize, removed: usize) {
        self.phones_added_total
            .fetch_add(added as u64, Ordering::Relaxed);
        self.phones_removed_total
            .fetch_add(removed as u64, Ordering::Relaxed);
    }

    pub fn created_total(&self) -> u64 {
        self.created_total.load(Ordering::Relaxed)
    }

    pub fn updated_total(&self) -> u64 {
        self.updated_total.load(Ordering::Relaxed)
    }

    pub fn deleted_total(&self) -> u64 {
        self.deleted_total.load(Ordering::Relaxed)
    }

    pub fn reads_total(&self) -> u64 {
        self.reads_total.load(Ordering::Relaxed)
    }

    pub fn validation_failures_total(&self) -> u64 {
        self.validation_failures_total.load(Ordering::Relaxed)
    }

    pub fn duplicate_emails_total(&self) -> u64 {
        self.duplicate_emails_total.load(Ordering::Relaxed)
    }

    pub fn not_found_total(&self) -> u64 {
        self.not_found_total.load(Ordering::Relaxed)
    }

    pub fn store_faults_total(&self) -> u64 {
        self.store_faults_total.load(Ordering::Relaxed)
    }

    pub fn phones_added_total(&self) -> u64 {
        self.phones_added_total.load(Ordering::Relaxed)
    }

    pub fn phones_removed_total(&self) -> u64 {
        self.phones_removed_total.load(Ordering::Relaxed)
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Created: {}\n\
             Updated: {}\n\
             Deleted: {}\n\
             Reads: {}\n\
             Validation Failures: {}\n\
             Duplicate Emails: {}\n\
             Not Found: {}\n\
             Store Faults: {}\n\
             Phones Added: {}\n\
             Phones Removed: {}",
            self.created_total(),
            self.updated_total(),
            self.deleted_total(),
            self.reads_total(),
            self.validation_failures_total(),
            self.duplicate_emails_total(),
            self.not_found_total(),
            self.store_faults_total(),
            self.phones_added_total(),
            self.phones_removed_total(),
        )
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: Operation,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn start(operation: Operation) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::trace!(
            operation = self.operation.as_str(),
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}
