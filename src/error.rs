//! Error types for namespace-watch.
//!
//! Registration, deregistration and dispatch never fail. Errors only come
//! from the edges: parsing namespace names and loading settings.

/// Result type alias for namespace-watch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors that can occur at the edges of the watcher.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// A string could not be parsed as a fully-qualified namespace name.
    #[error("Invalid namespace name '{name}': {reason}")]
    InvalidName {
        /// The rejected input
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Failed to load settings from a source.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// Failed to deserialize settings.
    #[error("Failed to deserialize settings: {0}")]
    DeserializationError(String),

    /// Generic error for other cases.
    #[error("Namespace watch error: {0}")]
    Other(String),
}

impl WatchError {
    pub(crate) fn invalid_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = WatchError::invalid_name("A::", "empty segment");
        assert_eq!(
            err.to_string(),
            "Invalid namespace name 'A::': empty segment"
        );
    }
}
