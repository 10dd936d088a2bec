//! Error types for access resolution
//!
//! Only failures that make a resolution impossible are errors. An ACL or
//! ACR that is missing or unreadable is an expected outcome and is
//! reported as an undetermined result instead.

use thiserror::Error;

use ldaccess_model::FetchError;

/// Resolution error types.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resource's own metadata could not be fetched.
    #[error("Cannot fetch resource metadata for {url}: {source}")]
    ResourceInfo {
        /// Resource URL.
        url: String,
        /// Underlying fetch failure.
        #[source]
        source: FetchError,
    },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

impl ResolveError {
    /// The underlying fetch failure, if any.
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            ResolveError::ResourceInfo { source, .. } => Some(source),
            ResolveError::Config(_) => None,
        }
    }

    /// Get error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolveError::ResourceInfo { source, .. } => source.error_code(),
            ResolveError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("Cannot build HTTP client: {0}")]
    HttpClient(String),
}
