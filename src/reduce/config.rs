//! Configuration for parallel reductions.

use crate::core::{Result, ThreadError};
use std::num::NonZeroUsize;

/// Minimum number of elements a partition is given before another one is added.
pub const DEFAULT_MIN_PER_PARTITION: usize = 25;

/// Concurrency assumed when the platform cannot report it.
pub const FALLBACK_CONCURRENCY: usize = 2;

/// Number of threads the hardware can run in parallel, or
/// [`FALLBACK_CONCURRENCY`] if it cannot be determined.
///
/// The value is advisory.
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_CONCURRENCY)
}

/// Configuration for a parallel reduction
///
/// # Example
///
/// ```rust
/// use rust_concurrent_blocks::ReduceConfig;
///
/// let config = ReduceConfig::new()
///     .with_min_per_partition(10)
///     .with_max_partitions(4)
///     .with_thread_name_prefix("sum");
///
/// assert_eq!(config.partition_count(0), 0);
/// assert_eq!(config.partition_count(15), 2);
/// assert_eq!(config.partition_count(1_000), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReduceConfig {
    /// Minimum elements per partition; small inputs get fewer partitions.
    /// Default: 25
    pub min_per_partition: usize,
    /// Upper bound on partitions (None = hardware concurrency).
    ///
    /// Fixing this makes partition boundaries, and therefore the combine
    /// order, independent of the machine.
    pub max_partitions: Option<usize>,
    /// Thread name prefix; spawned threads are named `"{prefix}-{index}"`.
    pub thread_name_prefix: String,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            min_per_partition: DEFAULT_MIN_PER_PARTITION,
            max_partitions: None,
            thread_name_prefix: "reduce".to_string(),
        }
    }
}

impl ReduceConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum number of elements per partition
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_min_per_partition(mut self, min: usize) -> Self {
        self.min_per_partition = min;
        self
    }

    /// Cap the number of partitions instead of using hardware concurrency
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_partitions(mut self, max: usize) -> Self {
        self.max_partitions = Some(max);
        self
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_per_partition == 0 {
            return Err(ThreadError::invalid_config(
                "min_per_partition",
                "Minimum elements per partition must be greater than 0",
            ));
        }
        if self.max_partitions == Some(0) {
            return Err(ThreadError::invalid_config(
                "max_partitions",
                "Maximum number of partitions must be greater than 0",
            ));
        }
        if self.thread_name_prefix.contains('\0') {
            return Err(ThreadError::invalid_config(
                "thread_name_prefix",
                "Thread name prefix may not contain null bytes",
            ));
        }
        Ok(())
    }

    /// Number of partitions an input of `len` elements is split into.
    ///
    /// This is the partition limit (hardware concurrency unless
    /// `max_partitions` is set) capped by `ceil(len / min_per_partition)`,
    /// and always within `1..=len` for non-empty input. Empty input yields 0.
    pub fn partition_count(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }

        let by_size = len.div_ceil(self.min_per_partition.max(1));
        let limit = self.max_partitions.unwrap_or_else(hardware_concurrency);

        limit.min(by_size).clamp(1, len)
    }
}
