//! Controller setup errors.

/// Error returned when a [`ThemeController`](super::ThemeController) cannot be assembled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// A required capability was never provided to the builder.
    #[error("theme controller needs a {0}")]
    Missing(&'static str),
    /// The storage key was empty.
    #[error("storage key must not be empty")]
    EmptyKey,
    /// The host environment lacks something the adapter needs (window, element).
    #[error("host environment unavailable: {0}")]
    Environment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_display() {
        assert_eq!(
            SetupError::Missing("store").to_string(),
            "theme controller needs a store"
        );
    }
}
