//! Error types for index construction and queries.

use thiserror::Error;

/// Errors reported by [`ProximityIndex`](crate::ProximityIndex).
///
/// Both kinds are local and deterministic: retrying with the same input
/// yields the same failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProximityError {
    /// Bad build parameters: non-positive cell size, a bad radius cap, or a
    /// malformed point under [`InvalidPointPolicy::Reject`](crate::InvalidPointPolicy::Reject).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Bad query parameters: out-of-range center or non-positive radius.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProximityError {
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ProximityError::InvalidConfiguration(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ProximityError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, ProximityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProximityError::InvalidConfiguration("cell size must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: cell size must be > 0");

        let err = ProximityError::InvalidArgument("radius must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid argument: radius must be > 0");
    }

    #[test]
    fn test_error_kind_helpers() {
        assert!(ProximityError::InvalidConfiguration(String::new()).is_invalid_configuration());
        assert!(!ProximityError::InvalidConfiguration(String::new()).is_invalid_argument());
        assert!(ProximityError::InvalidArgument(String::new()).is_invalid_argument());
    }
}
