//! Observability module for monitoring and metrics.
//!
//! Structured logging goes through `tracing`; this module adds counters for
//! customer operations on top of it.

pub mod metrics;

pub use metrics::{Operation, OperationMetrics, Timer};
