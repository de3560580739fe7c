//! Error types for navlink resolution
//!
//! Provides error handling for:
//! - Metadata lookups (transport, HTTP, decoding, timeouts)
//! - Resolution when lookup failures are configured to propagate
//! - Configuration loading

use navlink_model::EntityType;
use navlink_routes::ParseNavModeError;
use std::path::PathBuf;

/// Metadata lookup failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Request could not be sent or the connection failed
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status and an unreadable body
    #[error("unexpected http status {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
    },

    /// Body could not be decoded as the expected envelope
    #[error("could not decode lookup response: {0}")]
    Decode(String),

    /// Gateway base URL cannot carry lookup paths
    #[error("invalid gateway url '{0}'")]
    InvalidUrl(String),

    /// Identifier cannot be sent as a single path segment
    #[error("identifier '{0}' cannot be looked up")]
    InvalidIdentifier(String),

    /// Lookup did not finish in time
    #[error("lookup timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured lookup timeout
        timeout_ms: u64,
    },
}

impl LookupError {
    /// Check if a later attempt could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Decode(_) | Self::InvalidUrl(_) | Self::InvalidIdentifier(_) => false,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Resolution failure
///
/// Only produced under [`FailurePolicy::Propagate`](crate::FailurePolicy).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Storage lookup failed for a pipeline or trigger
    #[error("metadata lookup for {entity_type} '{identifier}' failed: {source}")]
    Lookup {
        /// Kind of the reference being resolved
        entity_type: EntityType,
        /// Identifier that was looked up
        identifier: String,
        /// Underlying failure
        #[source]
        source: LookupError,
    },
}

impl ResolveError {
    /// Underlying lookup failure
    #[must_use]
    pub fn lookup_error(&self) -> &LookupError {
        match self {
            Self::Lookup { source, .. } => source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ResolverConfig`](crate::ResolverConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Unknown navigation mode
    #[error(transparent)]
    NavMode(#[from] ParseNavModeError),

    /// Value out of range
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field, dotted for nested tables
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
