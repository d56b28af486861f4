//! Tracing integration for observability.
//!
//! When the `tracing` feature is enabled, parallel reductions run inside a
//! `reduce` span and the functions in [`metrics`] emit structured events for
//! partition spawns, thread joins and completed reductions.
//!
//! # Example
//!
//! ```rust,ignore
//! use rust_concurrent_blocks::prelude::*;
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! // Set up tracing subscriber
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env()
//!         .add_directive("rust_concurrent_blocks=trace".parse().unwrap()))
//!     .init();
//!
//! let data: Vec<u64> = (0..1_000_000).collect();
//! let total = parallel_sum(&data, 0)?;
//! ```

/// Metrics recording functions for observability.
///
/// Each function emits one event carrying `counter.*` (and, for completed
/// reductions, `histogram.reduce_duration_us`) fields, so any subscriber that
/// aggregates fields can count spawned partitions, joined or panicked
/// threads, and finished reductions.
#[cfg(feature = "tracing")]
pub mod metrics {
    use std::time::Duration;

    /// Records a partition being handed to its own thread.
    #[inline]
    pub fn record_partition_spawned(partition: usize, elements: usize) {
        tracing::trace!(
            counter.partitions_spawned = 1,
            partition = partition,
            elements = elements,
            "partition spawned"
        );
    }

    /// Records an owned thread being joined.
    #[inline]
    pub fn record_thread_joined(thread_name: &str, success: bool) {
        if success {
            tracing::trace!(
                counter.threads_joined = 1,
                thread_name = thread_name,
                "thread joined"
            );
        } else {
            tracing::warn!(
                counter.threads_panicked = 1,
                thread_name = thread_name,
                "joined thread had panicked"
            );
        }
    }

    /// Records a finished reduction with timing.
    #[inline]
    pub fn record_reduce_complete(
        elements: usize,
        partitions: usize,
        duration: Duration,
        success: bool,
    ) {
        let duration_us = duration.as_micros() as u64;
        if success {
            tracing::debug!(
                counter.reductions_completed = 1,
                histogram.reduce_duration_us = duration_us,
                elements = elements,
                partitions = partitions,
                "reduction completed"
            );
        } else {
            tracing::debug!(
                counter.reductions_failed = 1,
                histogram.reduce_duration_us = duration_us,
                elements = elements,
                partitions = partitions,
                "reduction failed"
            );
        }
    }
}
