//! Error types for the ringkit library.
//!
//! Failure in the hot paths is never an error: a full queue hands the
//! value back, an empty queue and a cache miss return `None`. The types
//! here cover the two remaining cases:
//!
//! - [`ConfigError`]: invalid construction parameters (zero capacity,
//!   non-power-of-two queue capacity), returned by `try_*` constructors.
//! - [`InvariantError`]: internal data-structure invariant violations,
//!   produced by the `validate` helpers on the cache and recency list.

use std::fmt;

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`BoundedQueue::try_with_capacity`](crate::queue::mpmc::BoundedQueue::try_with_capacity).
///
/// # Example
///
/// ```
/// use ringkit::error::ConfigError;
/// use ringkit::queue::mpmc::BoundedQueue;
///
/// let err = BoundedQueue::<u64>::try_with_capacity(12).unwrap_err();
/// assert_eq!(err, ConfigError::CapacityNotPowerOfTwo { got: 12 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested capacity was zero.
    ZeroCapacity,
    /// The requested capacity must be a power of two so slot indices can
    /// be computed by masking instead of modulo.
    CapacityNotPowerOfTwo {
        /// The capacity that was requested.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => f.write_str("capacity must be greater than zero"),
            ConfigError::CapacityNotPowerOfTwo { got } => {
                write!(f, "capacity must be a power of two, got {got}")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

/// Error returned when an internal invariant is violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_names_the_parameter() {
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "capacity must be greater than zero"
        );
        let err = ConfigError::CapacityNotPowerOfTwo { got: 12 };
        assert!(err.to_string().contains("power of two"));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("recency list length mismatch");
        assert_eq!(err.to_string(), "recency list length mismatch");
        assert_eq!(err.message(), "recency list length mismatch");
    }

    #[test]
    fn both_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
        assert_error::<InvariantError>();
    }
}
