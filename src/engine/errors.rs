//! Error types for the visualizer API
//!
//! Invalid operation parameters (bad index, empty stack, search miss) are not
//! errors here: they end the run with an `error` log entry. [`VizError`] only
//! covers misuse of the API, oversized recordings, JSON decoding and IO
//! failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VizError {
    /// A run is already animating on this visualizer
    #[error("an operation is already running")]
    Busy,

    /// The operation targets a different structure than the one loaded
    #[error("operation expects a {expected} structure, but a {got} structure is loaded")]
    WrongStructure {
        expected: &'static str,
        got: &'static str,
    },

    /// Stepping past either end of the recorded history
    #[error("cannot step {direction}: {reason}")]
    NothingToStep {
        direction: &'static str,
        reason: &'static str,
    },

    /// Recording the operation would take more memory than a trace may use
    #[error("operation too large to animate: trace exceeds {limit} bytes")]
    TraceTooLarge { limit: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed config file or collaborator payload
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A playback whose generation was superseded by a reset or a newer run.
/// Propagated with `?` and swallowed at the playback boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("run cancelled")]
pub struct Cancelled;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VizError::WrongStructure {
            expected: "stack",
            got: "tree",
        };
        assert!(err.to_string().contains("stack"));
        assert!(err.to_string().contains("tree"));
        assert_eq!(VizError::Busy.to_string(), "an operation is already running");
    }
}
