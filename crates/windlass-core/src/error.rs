//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An encoding or decoding error occurred.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A prepared-statement parameter was read before a value was bound to it.
    #[error("parameter ?{0} is not bound")]
    UnboundParameter(usize),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_parameter_display() {
        let err = CoreError::UnboundParameter(2);
        assert_eq!(err.to_string(), "parameter ?2 is not bound");
    }

    #[test]
    fn encoding_display() {
        let err = CoreError::Encoding("need 8 bytes, got 3".to_string());
        assert_eq!(err.to_string(), "encoding error: need 8 bytes, got 3");
    }
}
