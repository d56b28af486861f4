//! Error types for the concurrency building blocks

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, ThreadError>;

/// Errors that can occur in the concurrency building blocks
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ThreadError {
    /// Pop was called on an empty stack
    #[error("Cannot pop from an empty stack")]
    EmptyStack,

    /// Failed to spawn a thread with details
    #[error("Failed to spawn thread '{thread_name}': {message}")]
    SpawnError {
        /// Name the thread was given (or "<unnamed>")
        thread_name: String,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// The joined thread terminated by panicking
    #[error("Failed to join thread '{thread_name}': {message}")]
    JoinError {
        /// Name of the thread that failed to join
        thread_name: String,
        /// Panic message
        message: String,
    },

    /// A partition of a parallel reduction panicked
    #[error("Reduction partition #{partition} panicked: {message}")]
    PartitionPanic {
        /// Index of the failed partition, in input order
        partition: usize,
        /// Panic message
        message: String,
    },

    /// Invalid configuration with parameter
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

impl ThreadError {
    /// Create a spawn error
    pub fn spawn(thread_name: impl Into<String>, message: impl Into<String>) -> Self {
        ThreadError::SpawnError {
            thread_name: thread_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a spawn error with source
    pub fn spawn_with_source(thread_name: impl Into<String>, source: std::io::Error) -> Self {
        ThreadError::SpawnError {
            thread_name: thread_name.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a join error
    pub fn join(thread_name: impl Into<String>, message: impl Into<String>) -> Self {
        ThreadError::JoinError {
            thread_name: thread_name.into(),
            message: message.into(),
        }
    }

    /// Create a partition panic error
    pub fn partition_panic(partition: usize, message: impl Into<String>) -> Self {
        ThreadError::PartitionPanic {
            partition,
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        ThreadError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ThreadError::Other(msg.into())
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ThreadError::join("reduce-0", "boom");
        assert!(matches!(err, ThreadError::JoinError { .. }));

        let err = ThreadError::partition_panic(3, "overflow");
        assert!(matches!(err, ThreadError::PartitionPanic { partition: 3, .. }));

        let err = ThreadError::invalid_config("min_per_partition", "must be > 0");
        assert!(matches!(err, ThreadError::InvalidConfig { .. }));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ThreadError::EmptyStack.to_string(),
            "Cannot pop from an empty stack"
        );

        let err = ThreadError::partition_panic(2, "attempt to add with overflow");
        assert_eq!(
            err.to_string(),
            "Reduction partition #2 panicked: attempt to add with overflow"
        );

        let err = ThreadError::join("worker", "Unknown panic");
        assert_eq!(err.to_string(), "Failed to join thread 'worker': Unknown panic");
    }

    #[test]
    fn test_spawn_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WouldBlock, "resource unavailable");
        let err = ThreadError::spawn_with_source("reduce-5", io_err);

        assert!(matches!(err, ThreadError::SpawnError { source: Some(_), .. }));
        assert!(err.to_string().contains("'reduce-5'"));
        assert!(err.to_string().contains("resource unavailable"));
    }

    #[test]
    fn test_panic_message_payloads() {
        let static_str: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(static_str.as_ref()), "static");

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let other: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "Unknown panic");
    }
}
