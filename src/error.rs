//! Error taxonomy for fetches and startup configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single GET issued by the fetch client
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent, or the server answered with a non-success status
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Body was not valid JSON for the expected shape
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Parse(_) => FetchErrorKind::Parse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchErrorKind {
    Network,
    Parse,
}

impl FetchErrorKind {
    /// Network failures may succeed on reload; parse failures will not.
    pub fn is_retryable(self) -> bool {
        matches!(self, FetchErrorKind::Network)
    }
}

/// Serializable form of a [`FetchError`], carried inside actions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl From<FetchError> for FetchFailure {
    fn from(error: FetchError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Invalid command line configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listing url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported url scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_not_retryable() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let failure = FetchFailure::from(FetchError::from(err));
        assert_eq!(failure.kind, FetchErrorKind::Parse);
        assert!(!failure.kind.is_retryable());
        assert!(failure.message.starts_with("parse error"));
    }

    #[test]
    fn network_kind_is_retryable() {
        assert!(FetchErrorKind::Network.is_retryable());
    }
}
