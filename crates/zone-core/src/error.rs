//! Error types for zone record changes
//!
//! [`Error`] is what callers of the core see. [`LookupError`] comes out of a
//! [`KeySource`](crate::config::KeySource) and [`ProviderError`] out of a
//! [`ZoneService`](crate::traits::ZoneService); both are carried inside
//! [`Error`] without being rewritten.

use std::fmt;
use thiserror::Error;

/// Result type alias for zone operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value could not be resolved
    #[error("{what} not found ({key}): {source}")]
    ConfigurationMissing {
        /// The configuration key that was looked up
        key: &'static str,
        /// Human readable name of the value
        what: &'static str,
        /// Why the lookup failed
        #[source]
        source: LookupError,
    },

    /// A declarative record does not satisfy its invariants
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The zone service rejected or failed the change batch
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl Error {
    /// Create an invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// The provider error, if this is one
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }

    /// The missing configuration key, if this is a configuration error
    pub fn missing_key(&self) -> Option<&'static str> {
        match self {
            Self::ConfigurationMissing { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Failure of a single key lookup
#[derive(Error, Debug)]
pub enum LookupError {
    /// Neither the environment nor the secrets directory holds the key
    #[error("no value for {key}")]
    NotFound {
        /// The key that was looked up
        key: String,
    },

    /// A secret file exists but could not be read
    #[error("unable to read {key}: {source}")]
    Unreadable {
        /// The key that was looked up
        key: String,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl LookupError {
    /// Create a "not found" lookup error
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }
}

/// Classification of a zone service failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Credentials rejected or insufficient permissions
    Authentication,
    /// The provider throttled the request
    RateLimited,
    /// Another change for the zone is still in flight
    Conflict,
    /// Zone or record does not exist
    NotFound,
    /// The provider refused the change batch itself
    InvalidChangeBatch,
    /// The request never produced a response
    Transport,
    /// The provider failed internally
    Server,
    /// Anything else
    Other,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::RateLimited => "rate limited",
            Self::Conflict => "conflict",
            Self::NotFound => "not found",
            Self::InvalidChangeBatch => "invalid change batch",
            Self::Transport => "transport",
            Self::Server => "server",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Error raised by a zone service
///
/// The core never rewrites this value; what a [`ZoneService`](crate::traits::ZoneService)
/// returns is what the caller of `create`/`delete` receives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Provider error ({provider}, {kind}): {message}")]
pub struct ProviderError {
    /// Provider name
    pub provider: String,
    /// Failure classification
    pub kind: ProviderErrorKind,
    /// Provider specific error code, when the provider sent one
    pub code: Option<String>,
    /// Error message
    pub message: String,
}

impl ProviderError {
    /// Create a provider error without a provider code
    pub fn new(
        provider: impl Into<String>,
        kind: ProviderErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Attach the provider's own error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_missing_names_the_key() {
        let err = Error::ConfigurationMissing {
            key: "AWS_ZONE_ID",
            what: "Zone ID",
            source: LookupError::not_found("AWS_ZONE_ID"),
        };

        assert_eq!(err.missing_key(), Some("AWS_ZONE_ID"));
        let msg = err.to_string();
        assert!(msg.contains("Zone ID"));
        assert!(msg.contains("AWS_ZONE_ID"));
    }

    #[test]
    fn provider_error_is_transparent() {
        let raised = ProviderError::new("route53", ProviderErrorKind::NotFound, "no such record")
            .with_code("InvalidChangeBatch");
        let err = Error::from(raised.clone());

        assert_eq!(err.to_string(), raised.to_string());
        assert_eq!(err.as_provider(), Some(&raised));
        assert_eq!(err.missing_key(), None);
    }
}
