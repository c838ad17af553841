//! Error types for window function planning.

use thiserror::Error;
use windlass_core::CoreError;

/// Errors that abort planning of a window function call.
///
/// A call that is merely not a valid window invocation (a zero `NTILE`
/// bucket count, say) is not an error; see
/// [`Admission::Rejected`](crate::aggregation::Admission::Rejected).
#[derive(Debug, Error)]
pub enum PlanError {
    /// The function name is not a known window or aggregate function.
    #[error("unknown window function: {0}")]
    UnknownFunction(String),

    /// The call has the wrong number of arguments.
    #[error("wrong number of arguments to {function}: expected {expected}, got {actual}")]
    WrongArgumentCount {
        /// The function being called.
        function: String,
        /// The accepted argument counts.
        expected: String,
        /// The number of arguments supplied.
        actual: usize,
    },

    /// The result type cannot be derived from the argument types.
    #[error("cannot infer result type of {function}: {reason}")]
    TypeInference {
        /// The function being called.
        function: String,
        /// Why inference failed.
        reason: String,
    },

    /// The frame clause is malformed.
    #[error("invalid window frame: {0}")]
    InvalidFrame(String),

    /// An error from the shared core types.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_argument_count_display() {
        let err = PlanError::WrongArgumentCount {
            function: "ntile".to_string(),
            expected: "1".to_string(),
            actual: 0,
        };
        assert_eq!(err.to_string(), "wrong number of arguments to ntile: expected 1, got 0");
    }

    #[test]
    fn invalid_frame_display() {
        let err = PlanError::InvalidFrame("start cannot be UNBOUNDED FOLLOWING".to_string());
        assert!(err.to_string().contains("invalid window frame"));
    }

    #[test]
    fn core_errors_convert() {
        let err: PlanError = CoreError::UnboundParameter(2).into();
        assert!(matches!(err, PlanError::Core(CoreError::UnboundParameter(2))));
        assert_eq!(err.to_string(), "parameter ?2 is not bound");
    }
}
