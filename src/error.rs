//! Error types.

use thiserror::Error;

/// Errors reported by the TSP core.
///
/// Every variant is local and recoverable; nothing inside the crate aborts
/// the process.
#[derive(Debug, Error)]
pub enum TspError {
    /// The input cannot produce a tour (e.g. an empty point set).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two input points share the same identifier.
    #[error("duplicate point id {id}")]
    DuplicatePointId {
        /// The repeated identifier.
        id: usize,
    },

    /// A visiting order is not a permutation of the indexed points.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The search worker pool could not be created.
    #[error("worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TspError::invalid_input("no points").to_string(),
            "invalid input: no points"
        );
        assert_eq!(
            TspError::DuplicatePointId { id: 7 }.to_string(),
            "duplicate point id 7"
        );
        assert_eq!(
            TspError::invalid_config("worker_count must be >= 1").to_string(),
            "invalid configuration: worker_count must be >= 1"
        );
    }

    #[test]
    fn test_config_parse_conversion() {
        let err = toml::from_str::<toml::Value>("= broken").expect_err("invalid toml");
        let tsp: TspError = err.into();
        assert!(matches!(tsp, TspError::ConfigParse(_)));
    }
}
